//! App runtime: owns the flashcard shell and the audio player and drives
//! the event loop.
//!
//! - `input` — event polling and key/mouse dispatch
//! - `render` — frame throttle and drawing

mod input;
mod render;

use std::time::{Duration, Instant};

use chordmaster_core::FlashcardShell;
use chordmaster_types::NotePlayer;

use crate::card_pane::CardPane;
use crate::ui::{Keymap, RatatuiBackend, Rect, StatusBar, StatusLevel};

/// Longest the loop waits for input before servicing timers.
const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Lifecycle owner for one session: holds the flashcard shell and the audio
/// player. `run` ends with a teardown that cancels pending highlights and
/// silences audio; dropping the runtime drops the player, which for the
/// synth stops and joins its audio thread.
pub struct AppRuntime {
    pub(crate) shell: FlashcardShell,
    pub(crate) player: Box<dyn NotePlayer>,
    pub(crate) keymap: Keymap,
    pub(crate) pane: CardPane,
    pub(crate) status_bar: StatusBar,

    // Per-frame state
    pub(crate) render_needed: bool,
    pub(crate) status_was_live: bool,
    pub(crate) last_render_time: Option<Instant>,
    pub(crate) last_area: Rect,
}

impl AppRuntime {
    pub fn new(
        shell: FlashcardShell,
        player: Box<dyn NotePlayer>,
        keymap: Keymap,
        audio_label: &str,
    ) -> Self {
        let pane = CardPane::new(keymap.hints(), audio_label);
        Self {
            shell,
            player,
            keymap,
            pane,
            status_bar: StatusBar::new(),
            render_needed: true,
            status_was_live: false,
            last_render_time: None,
            last_area: Rect::new(0, 0, 80, 24),
        }
    }

    pub fn status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status_bar.push(text, level);
        self.render_needed = true;
    }

    /// Main event loop. Returns once the user quits.
    pub fn run(&mut self, backend: &mut RatatuiBackend) -> std::io::Result<()> {
        let result = self.event_loop(backend);
        self.teardown();
        result
    }

    fn event_loop(&mut self, backend: &mut RatatuiBackend) -> std::io::Result<()> {
        loop {
            if self.process_events(backend) {
                return Ok(());
            }
            self.process_tick(Instant::now());
            self.maybe_render(backend)?;
        }
    }

    /// Light any keys whose notes have come due.
    pub(crate) fn process_tick(&mut self, now: Instant) {
        if self.shell.tick(now) {
            self.render_needed = true;
        }
    }

    /// Invalidate scheduled highlights and stop any sound still queued.
    pub(crate) fn teardown(&mut self) {
        self.shell.teardown();
        self.player.silence();
        log::info!(target: "runtime", "shut down");
    }
}
