//! Flashcard state machine.
//!
//! ```text
//!   Hidden --reveal--> Revealing --replay--> Revealing
//!      ^                   |
//!      +-----advance-------+   (next chord)
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chordmaster_types::{ActiveNoteSet, NotePlayer};

use crate::catalog::{Catalog, CatalogEntry};
use crate::keyboard::{KeyboardMode, KeyboardView};
use crate::sequencer::{PlaybackTiming, Sequencer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Only the chord name is shown.
    Hidden,
    /// Keyboard visible, arpeggio playing or finished.
    Revealing,
}

/// How the next chord is drawn from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvancePolicy {
    /// Uniform over every chord except the current one.
    #[default]
    ExcludeCurrent,
    /// Uniform over the whole catalog; repeats allowed.
    Uniform,
}

impl AdvancePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            AdvancePolicy::ExcludeCurrent => "exclude-current",
            AdvancePolicy::Uniform => "uniform",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    pub policy: AdvancePolicy,
    pub keyboard: KeyboardMode,
    pub timing: PlaybackTiming,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Pick the index that follows `current` under `policy`.
///
/// With a single-chord catalog there is nothing else to exclude, so
/// `ExcludeCurrent` returns the current index.
pub fn next_index<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    current: usize,
    policy: AdvancePolicy,
) -> usize {
    match policy {
        AdvancePolicy::Uniform => rng.gen_range(0..len),
        AdvancePolicy::ExcludeCurrent if len <= 1 => current,
        AdvancePolicy::ExcludeCurrent => {
            // Draw from the other len - 1 slots and skip over `current`.
            let pick = rng.gen_range(0..len - 1);
            if pick >= current {
                pick + 1
            } else {
                pick
            }
        }
    }
}

pub struct FlashcardShell {
    catalog: Catalog,
    index: usize,
    phase: CardPhase,
    policy: AdvancePolicy,
    keyboard: KeyboardMode,
    sequencer: Sequencer,
    rng: StdRng,
}

impl FlashcardShell {
    /// Start hidden on a uniformly random chord.
    pub fn new(catalog: Catalog, options: ShellOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let index = rng.gen_range(0..catalog.len());
        log::info!(
            target: "shell",
            "{} chords, advance {}, keyboard {}, starting at {}",
            catalog.len(),
            options.policy.name(),
            options.keyboard.name(),
            index
        );
        Self {
            catalog,
            index,
            phase: CardPhase::Hidden,
            policy: options.policy,
            keyboard: options.keyboard,
            sequencer: Sequencer::new(options.timing),
            rng,
        }
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.keyboard
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current(&self) -> &CatalogEntry {
        // index is always < catalog.len(), and the catalog is never empty
        &self.catalog.entries()[self.index]
    }

    pub fn keyboard_view(&self) -> KeyboardView {
        KeyboardView::for_pitches(&self.current().pitches, self.keyboard)
    }

    pub fn active_notes(&self) -> &ActiveNoteSet {
        self.sequencer.active_notes()
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    /// Hidden -> Revealing, playing the chord once. Returns false if already revealed.
    pub fn reveal(&mut self, now: Instant, player: &dyn NotePlayer) -> bool {
        if self.phase != CardPhase::Hidden {
            return false;
        }
        self.phase = CardPhase::Revealing;
        self.play(now, player);
        true
    }

    /// Play the revealed chord again. Returns false while hidden.
    pub fn replay(&mut self, now: Instant, player: &dyn NotePlayer) -> bool {
        if self.phase != CardPhase::Revealing {
            return false;
        }
        self.play(now, player);
        true
    }

    /// Drop any playback in flight and move to a new chord, hidden.
    pub fn advance(&mut self) -> usize {
        self.sequencer.cancel();
        let previous = self.index;
        self.index = next_index(&mut self.rng, self.catalog.len(), self.index, self.policy);
        self.phase = CardPhase::Hidden;
        log::debug!(
            target: "shell",
            "advance {} -> {} ({})",
            previous,
            self.index,
            self.current().chord.name
        );
        self.index
    }

    /// Single-button interaction: reveal a hidden card, advance a revealed one.
    pub fn flip(&mut self, now: Instant, player: &dyn NotePlayer) {
        match self.phase {
            CardPhase::Hidden => {
                self.reveal(now, player);
            }
            CardPhase::Revealing => {
                self.advance();
            }
        }
    }

    /// Jump straight to a chord, hidden. Returns false for an out-of-range index.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() {
            return false;
        }
        self.sequencer.cancel();
        self.index = index;
        self.phase = CardPhase::Hidden;
        true
    }

    /// Advance timers. Returns true if the highlighted keys changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.sequencer.poll(now)
    }

    /// Invalidate all scheduled work before the shell goes away.
    pub fn teardown(&mut self) {
        self.sequencer.cancel();
        self.phase = CardPhase::Hidden;
    }

    fn play(&mut self, now: Instant, player: &dyn NotePlayer) {
        let keys = self.keyboard_view().keys;
        self.sequencer.play(&keys, now, player);
    }
}
