//! One synth note: a sine with a soft second partial under a piano-ish
//! envelope (quick attack, decay towards a floor while held, linear release).

use std::f32::consts::TAU;
use std::time::Duration;

const ATTACK_SECS: f32 = 0.005;
const RELEASE_SECS: f32 = 0.25;
/// Level the held note decays towards.
const HOLD_FLOOR: f32 = 0.35;
const DECAY_RATE: f32 = 3.0;
const SECOND_PARTIAL: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct Voice {
    sample_rate: f32,
    phase: f32,
    step: f32,
    /// Samples of silence left before the note starts.
    delay: u64,
    /// Samples since the note started.
    age: u64,
    attack: u64,
    sustain: u64,
    release: u64,
}

impl Voice {
    pub fn new(frequency: f32, sample_rate: u32, delay: Duration, sustain: Duration) -> Self {
        let sr = sample_rate.max(1) as f32;
        let samples = |d: Duration| (d.as_secs_f32() * sr).round() as u64;
        Self {
            sample_rate: sr,
            phase: 0.0,
            step: frequency / sr,
            delay: samples(delay),
            age: 0,
            attack: samples(Duration::from_secs_f32(ATTACK_SECS)).max(1),
            sustain: samples(sustain),
            release: samples(Duration::from_secs_f32(RELEASE_SECS)).max(1),
        }
    }

    #[cfg(test)]
    fn is_started(&self) -> bool {
        self.delay == 0
    }

    pub fn is_finished(&self) -> bool {
        self.delay == 0 && self.age >= self.sustain + self.release
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.delay > 0 {
            self.delay -= 1;
            return 0.0;
        }
        if self.is_finished() {
            return 0.0;
        }

        let env = self.envelope(self.age);
        let tone = (TAU * self.phase).sin() + SECOND_PARTIAL * (2.0 * TAU * self.phase).sin();
        self.phase = (self.phase + self.step).fract();
        self.age += 1;
        env * tone / (1.0 + SECOND_PARTIAL)
    }

    fn envelope(&self, age: u64) -> f32 {
        if age < self.sustain {
            self.held_level(age)
        } else {
            let into_release = (age - self.sustain) as f32 / self.release as f32;
            self.held_level(self.sustain) * (1.0 - into_release).max(0.0)
        }
    }

    fn held_level(&self, age: u64) -> f32 {
        if age < self.attack {
            age as f32 / self.attack as f32
        } else {
            let t = (age - self.attack) as f32 / self.sample_rate;
            HOLD_FLOOR + (1.0 - HOLD_FLOOR) * (-DECAY_RATE * t).exp()
        }
    }
}
