use crate::voice::Voice;

/// Voices kept at once; the oldest is dropped to make room.
pub const MAX_VOICES: usize = 24;

pub struct Mixer {
    voices: Vec<Voice>,
    gain: f32,
}

impl Mixer {
    pub fn new(gain: f32) -> Self {
        Self {
            voices: Vec::with_capacity(MAX_VOICES),
            gain: gain.clamp(0.0, 1.0),
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn add(&mut self, voice: Voice) {
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(voice);
    }

    pub fn clear(&mut self) {
        self.voices.clear();
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Fill interleaved `out` with `channels` copies of the mono mix.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let sum: f32 = self.voices.iter_mut().map(|v| v.next_sample()).sum();
            frame.fill((sum * self.gain).clamp(-1.0, 1.0));
        }
        self.voices.retain(|v| !v.is_finished());
    }
}
