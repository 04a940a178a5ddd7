#![allow(dead_code)]

use std::cell::RefCell;
use std::time::Duration;

use chordmaster_core::{AdvancePolicy, Catalog, FlashcardShell, KeyboardMode, ShellOptions};
use chordmaster_types::{NotePlayer, Pitch};

/// Records every trigger as (note name, sustain, offset).
#[derive(Default)]
pub struct RecordingPlayer {
    pub calls: RefCell<Vec<(String, Duration, Duration)>>,
}

impl NotePlayer for RecordingPlayer {
    fn trigger(&self, pitch: Pitch, sustain: Duration, offset: Duration) {
        self.calls
            .borrow_mut()
            .push((pitch.note_name(), sustain, offset));
    }
}

impl RecordingPlayer {
    pub fn notes(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(n, _, _)| n.clone()).collect()
    }
}

/// Shell over the embedded catalog, parked on the chord called `name`.
pub fn shell_on(name: &str, keyboard: KeyboardMode) -> FlashcardShell {
    let catalog = Catalog::embedded().unwrap();
    let index = catalog
        .position(name)
        .unwrap_or_else(|| panic!("{name} missing from the embedded catalog"));
    let mut shell = FlashcardShell::new(
        catalog,
        ShellOptions {
            policy: AdvancePolicy::ExcludeCurrent,
            keyboard,
            seed: Some(0xC0FFEE),
            ..ShellOptions::default()
        },
    );
    assert!(shell.select(index));
    shell
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
