//! Input processing: event polling and dispatch to the flashcard shell.

use std::time::{Duration, Instant};

use chordmaster_core::CardPhase;

use super::{AppRuntime, POLL_INTERVAL};
use crate::ui::{AppEvent, CardAction, InputSource};

/// Events handled per loop iteration before timers get a turn.
const MAX_EVENTS_PER_TICK: u8 = 16;

impl AppRuntime {
    /// Drain pending input. Returns true if the app should quit.
    pub(crate) fn process_events(&mut self, source: &mut impl InputSource) -> bool {
        let mut events_processed = 0u8;
        while events_processed < MAX_EVENTS_PER_TICK {
            let timeout = if events_processed == 0 {
                POLL_INTERVAL
            } else {
                Duration::ZERO
            };
            let Some(event) = source.poll_event(timeout) else {
                break;
            };
            events_processed += 1;
            if self.handle_event(event, Instant::now()) {
                return true;
            }
        }
        false
    }

    /// Apply one event. Returns true if the app should quit.
    pub(crate) fn handle_event(&mut self, event: AppEvent, now: Instant) -> bool {
        match event {
            AppEvent::Resize => {
                self.render_needed = true;
                false
            }
            AppEvent::Click { column, row } => {
                if self.pane.hit_card(self.last_area, &self.shell, column, row) {
                    self.apply_action(CardAction::Flip, now)
                } else {
                    false
                }
            }
            AppEvent::Key(key) => {
                // Holding a key must not flip through the deck.
                if key.is_repeat {
                    return false;
                }
                match self.keymap.lookup(&key) {
                    Some(action) => self.apply_action(action, now),
                    None => false,
                }
            }
        }
    }

    /// Returns true for `Quit`.
    pub(crate) fn apply_action(&mut self, action: CardAction, now: Instant) -> bool {
        log::debug!(target: "runtime", "{:?}", action);
        match action {
            CardAction::Flip => {
                let was_revealed = self.shell.phase() == CardPhase::Revealing;
                if was_revealed {
                    self.player.silence();
                }
                self.shell.flip(now, self.player.as_ref());
            }
            CardAction::Replay => {
                self.player.silence();
                self.shell.replay(now, self.player.as_ref());
            }
            CardAction::Next => {
                self.player.silence();
                self.shell.advance();
            }
            CardAction::Quit => return true,
        }
        self.render_needed = true;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use chordmaster_core::{Catalog, CardPhase, FlashcardShell, ShellOptions};
    use chordmaster_types::{NotePlayer, Pitch};

    use crate::ui::keybindings::load_keybindings_from;
    use crate::ui::{InputEvent, KeyCode, Modifiers};

    #[derive(Default)]
    struct Log {
        notes: Vec<String>,
        silences: usize,
        released: bool,
    }

    struct SharedPlayer(Rc<RefCell<Log>>);

    impl NotePlayer for SharedPlayer {
        fn trigger(&self, pitch: Pitch, _sustain: Duration, _offset: Duration) {
            self.0.borrow_mut().notes.push(pitch.note_name());
        }

        fn silence(&self) {
            self.0.borrow_mut().silences += 1;
        }
    }

    impl Drop for SharedPlayer {
        fn drop(&mut self) {
            self.0.borrow_mut().released = true;
        }
    }

    struct ScriptedInput(VecDeque<AppEvent>);

    impl InputSource for ScriptedInput {
        fn poll_event(&mut self, _timeout: Duration) -> Option<AppEvent> {
            self.0.pop_front()
        }
    }

    fn runtime() -> (AppRuntime, Rc<RefCell<Log>>) {
        let catalog = Catalog::embedded().unwrap();
        let index = catalog.position("C").unwrap();
        let mut shell = FlashcardShell::new(
            catalog,
            ShellOptions {
                seed: Some(3),
                ..ShellOptions::default()
            },
        );
        shell.select(index);
        let log = Rc::new(RefCell::new(Log::default()));
        let player = Box::new(SharedPlayer(Rc::clone(&log)));
        let rt = AppRuntime::new(shell, player, load_keybindings_from(None), "test");
        (rt, log)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(InputEvent::key(code))
    }

    #[test]
    fn enter_reveals_then_advances() {
        let (mut rt, log) = runtime();
        let now = Instant::now();
        let start = rt.shell.index();

        assert!(!rt.handle_event(key(KeyCode::Enter), now));
        assert_eq!(rt.shell.phase(), CardPhase::Revealing);
        assert_eq!(log.borrow().notes, ["C4", "E4", "G4"]);

        assert!(!rt.handle_event(key(KeyCode::Enter), now));
        assert_eq!(rt.shell.phase(), CardPhase::Hidden);
        assert_ne!(rt.shell.index(), start);
        assert_eq!(log.borrow().silences, 1);
    }

    #[test]
    fn replay_only_works_once_revealed() {
        let (mut rt, log) = runtime();
        let now = Instant::now();
        rt.handle_event(key(KeyCode::Char('r')), now);
        assert!(log.borrow().notes.is_empty());

        rt.handle_event(key(KeyCode::Char(' ')), now);
        rt.handle_event(key(KeyCode::Char('r')), now);
        assert_eq!(log.borrow().notes.len(), 6);
        assert_eq!(rt.shell.phase(), CardPhase::Revealing);
    }

    #[test]
    fn key_repeat_is_ignored() {
        let (mut rt, _log) = runtime();
        let mut held = InputEvent::key(KeyCode::Enter);
        held.is_repeat = true;
        rt.handle_event(AppEvent::Key(held), Instant::now());
        assert_eq!(rt.shell.phase(), CardPhase::Hidden);
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let (mut rt, _log) = runtime();
        let now = Instant::now();
        assert!(rt.handle_event(key(KeyCode::Char('q')), now));
        assert!(rt.handle_event(key(KeyCode::Escape), now));
        assert!(rt.handle_event(
            AppEvent::Key(InputEvent::new(KeyCode::Char('c'), Modifiers::ctrl())),
            now
        ));
    }

    #[test]
    fn clicking_the_card_flips_it() {
        let (mut rt, _log) = runtime();
        let card = rt.pane.layout(rt.last_area, &rt.shell).card;
        let click = |column, row| AppEvent::Click { column, row };

        rt.handle_event(click(0, 0), Instant::now());
        assert_eq!(rt.shell.phase(), CardPhase::Hidden);

        rt.handle_event(click(card.x + 3, card.y + 3), Instant::now());
        assert_eq!(rt.shell.phase(), CardPhase::Revealing);
    }

    #[test]
    fn process_events_stops_at_quit() {
        let (mut rt, _log) = runtime();
        let mut input = ScriptedInput(VecDeque::from([
            key(KeyCode::Enter),
            key(KeyCode::Char('q')),
            key(KeyCode::Enter),
        ]));
        assert!(rt.process_events(&mut input));
        assert_eq!(rt.shell.phase(), CardPhase::Revealing);
        assert_eq!(input.0.len(), 1);
    }

    #[test]
    fn tick_lights_keys_and_requests_a_frame() {
        let (mut rt, _log) = runtime();
        let t0 = Instant::now();
        rt.handle_event(key(KeyCode::Enter), t0);
        rt.render_needed = false;
        rt.process_tick(t0 + Duration::from_millis(300));
        assert!(rt.render_needed);
        assert_eq!(rt.shell.active_notes().len(), 2);
    }

    #[test]
    fn teardown_silences_and_clears() {
        let (mut rt, log) = runtime();
        let t0 = Instant::now();
        rt.handle_event(key(KeyCode::Enter), t0);
        rt.teardown();
        assert_eq!(rt.shell.phase(), CardPhase::Hidden);
        assert!(rt.shell.active_notes().is_empty());
        assert_eq!(log.borrow().silences, 1);
    }

    #[test]
    fn dropping_the_runtime_releases_the_player() {
        let (mut rt, log) = runtime();
        rt.handle_event(key(KeyCode::Enter), Instant::now());
        rt.teardown();
        assert!(!log.borrow().released);
        drop(rt);
        assert!(log.borrow().released);
        assert_eq!(log.borrow().silences, 1);
    }
}
