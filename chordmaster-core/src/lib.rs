//! # chordmaster-core
//!
//! Flashcard logic for chordmaster, independent of any terminal or audio
//! backend: the chord catalog, keyboard layout, arpeggio sequencing, and the
//! reveal/advance state machine.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use chordmaster_core::{Catalog, Config, FlashcardShell, ShellOptions};
//! use chordmaster_types::SilentPlayer;
//!
//! let config = Config::load();
//! let catalog = Catalog::embedded()?;
//! let mut shell = FlashcardShell::new(catalog, ShellOptions {
//!     policy: config.advance_policy(),
//!     keyboard: config.keyboard_mode(),
//!     timing: config.timing(),
//!     seed: None,
//! });
//!
//! // Show the keyboard and play the chord; call tick() from the event loop
//! // to light the remaining keys as their notes sound.
//! shell.reveal(Instant::now(), &SilentPlayer);
//! shell.tick(Instant::now());
//! shell.advance();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod sequencer;
pub mod shell;
pub mod timer;

pub use catalog::{Catalog, CatalogEntry};
pub use config::{app_config_dir, Config};
pub use error::CatalogError;
pub use keyboard::{
    display_range, keyboard_view, single_octave_range, transpose_to_octave, KeyboardMode,
    KeyboardView,
};
pub use sequencer::{arpeggio_order, PlaybackTiming, Sequencer};
pub use shell::{next_index, AdvancePolicy, CardPhase, FlashcardShell, ShellOptions};
pub use timer::TimerQueue;
