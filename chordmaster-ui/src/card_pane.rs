//! The flashcard screen: header, the card itself, key hints and status line.

use std::time::Instant;

use chordmaster_core::{CardPhase, FlashcardShell};

use ratatui::layout::{Margin, Position};

use crate::ui::piano_keyboard::{self, PianoKeyboard};
use crate::ui::{Color, Rect, RenderBuf, StatusBar, Style};

const CARD_MIN_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 15;
const KEYBOARD_HEIGHT: u16 = 7;

/// Where each part of the card goes for a given screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub card: Rect,
    pub name_row: u16,
    pub detail_row: u16,
    pub keyboard: Rect,
}

/// `width x height` centered in `area`, shrunk to leave a one-cell margin.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let room = area.inner(Margin::new(1, 1));
    let (w, h) = (width.min(room.width), height.min(room.height));
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Card sized to fit a keyboard `keyboard_width` cells wide.
pub fn card_layout(area: Rect, keyboard_width: u16) -> CardLayout {
    // Leave the header row and the two footer rows alone.
    let body = Rect::new(
        area.x,
        area.y.saturating_add(1),
        area.width,
        area.height.saturating_sub(3),
    );
    let card = centered(body, (keyboard_width + 6).max(CARD_MIN_WIDTH), CARD_HEIGHT);
    let inner = Rect::new(
        card.x + 1,
        card.y + 1,
        card.width.saturating_sub(2),
        card.height.saturating_sub(2),
    );

    let name_row = inner.y + 1;
    let detail_row = inner.y + 3;
    let kb_top = inner.y + 5;
    let kb_height = KEYBOARD_HEIGHT.min(inner.bottom().saturating_sub(kb_top));
    let kb_width = keyboard_width.min(inner.width);
    let keyboard = Rect::new(
        inner.x + (inner.width - kb_width) / 2,
        kb_top,
        kb_width,
        kb_height,
    );

    CardLayout {
        card,
        name_row,
        detail_row,
        keyboard,
    }
}

pub struct CardPane {
    hints: Vec<(String, String)>,
    audio_label: String,
}

impl CardPane {
    pub fn new(hints: Vec<(String, String)>, audio_label: impl Into<String>) -> Self {
        Self {
            hints,
            audio_label: audio_label.into(),
        }
    }

    pub fn layout(&self, area: Rect, shell: &FlashcardShell) -> CardLayout {
        let view = shell.keyboard_view();
        card_layout(area, piano_keyboard::keyboard_width(&view.range))
    }

    /// Whether a click at (column, row) landed on the card.
    pub fn hit_card(&self, area: Rect, shell: &FlashcardShell, column: u16, row: u16) -> bool {
        self.layout(area, shell)
            .card
            .contains(Position::new(column, row))
    }

    pub fn render(
        &self,
        area: Rect,
        buf: &mut RenderBuf,
        shell: &FlashcardShell,
        status: &StatusBar,
        now: Instant,
    ) {
        if area.width < 10 || area.height < 6 {
            buf.draw_str(area.x, area.y, "too small", Style::new().fg(Color::RED));
            return;
        }

        self.render_header(area, buf, shell);

        let layout = self.layout(area, shell);
        let entry = shell.current();
        let border = Style::new().fg(Color::CARD_BORDER);
        let title = match shell.phase() {
            CardPhase::Hidden => " ? ",
            CardPhase::Revealing => " chord ",
        };
        buf.draw_block(layout.card, title, border, border.bold());

        let inner = Rect::new(layout.card.x + 1, layout.card.y, layout.card.width.saturating_sub(2), 1);
        buf.draw_str_centered(
            inner,
            layout.name_row,
            &entry.chord.name,
            Style::new().fg(Color::CARD_TITLE).bold(),
        );

        match shell.phase() {
            CardPhase::Hidden => {
                buf.draw_str_centered(
                    inner,
                    layout.detail_row,
                    "name the notes, then reveal",
                    Style::new().fg(Color::DARK_GRAY),
                );
            }
            CardPhase::Revealing => {
                let spelled = entry.chord.keys.join("  ");
                buf.draw_str_centered(inner, layout.detail_row, &spelled, Style::new().fg(Color::GRAY));

                if layout.keyboard.height >= piano_keyboard::MIN_HEIGHT {
                    let view = shell.keyboard_view();
                    PianoKeyboard::new(view.range, shell.active_notes())
                        .render(layout.keyboard, buf);
                }
            }
        }

        self.render_footer(area, buf, status, now);
    }

    fn render_header(&self, area: Rect, buf: &mut RenderBuf, shell: &FlashcardShell) {
        let position = format!("  {}/{}", shell.index() + 1, shell.catalog().len());
        let settings = format!(
            "   {} · {} · {}",
            shell.keyboard_mode().name(),
            shell.policy().name(),
            self.audio_label
        );
        buf.draw_line(
            Rect::new(area.x, area.y, area.width, 1),
            &[
                (" chordmaster", Style::new().fg(Color::GOLD).bold()),
                (position.as_str(), Style::new().fg(Color::GRAY)),
                (settings.as_str(), Style::new().fg(Color::DARK_GRAY)),
            ],
        );
    }

    fn render_footer(&self, area: Rect, buf: &mut RenderBuf, status: &StatusBar, now: Instant) {
        let hint_row = area.bottom().saturating_sub(2);
        let mut x = area.x + 1;
        for (keys, description) in &self.hints {
            buf.draw_str(x, hint_row, keys, Style::new().fg(Color::SKY_BLUE));
            x = x.saturating_add(keys.chars().count() as u16 + 1);
            buf.draw_str(x, hint_row, description, Style::new().fg(Color::GRAY));
            x = x.saturating_add(description.chars().count() as u16 + 3);
        }

        let status_row = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        status.render(status_row, buf, now);
    }
}
