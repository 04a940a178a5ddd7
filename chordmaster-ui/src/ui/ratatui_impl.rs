//! crossterm terminal backend.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode as CtKey, KeyEvent,
    KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use super::style::{Color, Style};
use super::{AppEvent, InputEvent, InputSource, KeyCode, Modifiers, Rect};

/// Owns the terminal while the app runs: raw mode, alternate screen and
/// mouse capture are entered by `start` and undone by `stop` or on drop.
pub struct RatatuiBackend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    started: bool,
}

impl RatatuiBackend {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            started: false,
        })
    }

    pub fn start(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        self.started = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()
    }

    /// Restore the terminal. Idempotent.
    pub fn stop(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.started) {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    /// Draw one frame over a black background. ratatui diffs against the
    /// previous frame, so only changed cells reach the terminal.
    pub fn draw(&mut self, paint: impl FnOnce(Rect, &mut Buffer)) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            buf.set_style(area, Style::new().bg(Color::BLACK));
            paint(area, buf);
        })?;
        Ok(())
    }
}

impl Drop for RatatuiBackend {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

impl InputSource for RatatuiBackend {
    fn poll_event(&mut self, timeout: Duration) -> Option<AppEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining).ok()? {
                return None;
            }
            if let Some(ev) = translate(event::read().ok()?) {
                return Some(ev);
            }
        }
    }
}

/// `None` for events the app ignores: key releases, mouse motion, focus, paste.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            translate_key(key).map(AppEvent::Key)
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        Event::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    let code = match key.code {
        CtKey::Char(c) => KeyCode::Char(c),
        CtKey::Enter => KeyCode::Enter,
        CtKey::Esc => KeyCode::Escape,
        CtKey::Backspace => KeyCode::Backspace,
        CtKey::Tab => KeyCode::Tab,
        CtKey::Up => KeyCode::Up,
        CtKey::Down => KeyCode::Down,
        CtKey::Left => KeyCode::Left,
        CtKey::Right => KeyCode::Right,
        CtKey::F(n) => KeyCode::F(n),
        _ => return None,
    };
    let modifiers = Modifiers {
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    let mut event = InputEvent::new(code, modifiers);
    event.is_repeat = key.kind == KeyEventKind::Repeat;
    Some(event)
}
