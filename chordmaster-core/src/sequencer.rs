//! Arpeggio playback with synchronized key highlighting.
//!
//! `play` hands every note to the audio player up front (the player does its
//! own scheduling) and queues one highlight per note on a [`TimerQueue`].
//! Each highlight carries the generation it was scheduled under; starting a
//! new pass or cancelling bumps the generation, so highlights left over from
//! an earlier pass are dropped when they come due instead of lighting keys
//! on the wrong chord.

use std::time::{Duration, Instant};

use chordmaster_types::{ActiveNoteSet, NotePlayer, Pitch};

use crate::timer::TimerQueue;

/// Onset spacing and ring-out length of an arpeggio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub note_spacing: Duration,
    pub sustain: Duration,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            note_spacing: Duration::from_millis(250),
            sustain: Duration::from_millis(1200),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Highlight {
    generation: u64,
    pitch: Pitch,
}

pub struct Sequencer {
    timing: PlaybackTiming,
    generation: u64,
    timers: TimerQueue<Highlight>,
    /// Highlights of the current generation not yet applied.
    pending: usize,
    active: ActiveNoteSet,
}

impl Sequencer {
    pub fn new(timing: PlaybackTiming) -> Self {
        Self {
            timing,
            generation: 0,
            timers: TimerQueue::new(),
            pending: 0,
            active: ActiveNoteSet::new(),
        }
    }

    pub fn active_notes(&self) -> &ActiveNoteSet {
        &self.active
    }

    /// Whether highlights from the current pass are still outstanding.
    pub fn is_playing(&self) -> bool {
        self.pending > 0
    }

    /// Start a new pass over `notes`, low to high. Returns the pass's generation.
    pub fn play(&mut self, notes: &[Pitch], now: Instant, player: &dyn NotePlayer) -> u64 {
        self.cancel();
        let order = arpeggio_order(notes);
        log::debug!(
            target: "sequencer",
            "generation {}: {}",
            self.generation,
            order.iter().map(|p| p.note_name()).collect::<Vec<_>>().join(" ")
        );

        for (i, &pitch) in order.iter().enumerate() {
            let offset = self.timing.note_spacing * i as u32;
            player.trigger(pitch, self.timing.sustain, offset);
            self.timers.schedule(
                now + offset,
                Highlight {
                    generation: self.generation,
                    pitch,
                },
            );
        }
        self.pending = order.len();

        // The first note is due immediately.
        self.poll(now);
        self.generation
    }

    /// Apply highlights that have come due. Returns true if the active set changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for highlight in self.timers.drain_due(now) {
            if highlight.generation != self.generation {
                log::trace!(
                    target: "sequencer",
                    "dropping stale highlight {} from generation {}",
                    highlight.pitch,
                    highlight.generation
                );
                continue;
            }
            self.pending = self.pending.saturating_sub(1);
            changed |= self.active.insert(highlight.pitch);
        }
        changed
    }

    /// Invalidate everything still scheduled and clear the highlights.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = 0;
        self.active.clear();
    }
}

/// Stable ascending sort by pitch; equal pitches keep their relative order.
pub fn arpeggio_order(notes: &[Pitch]) -> Vec<Pitch> {
    let mut order = notes.to_vec();
    order.sort_by_key(|p| p.get());
    order
}
