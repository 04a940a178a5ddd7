//! Drawing primitives over a ratatui `Buffer`. Everything clips to the
//! buffer; nothing here panics on out-of-range coordinates.

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::Style as RatatuiStyle;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Widget};

pub use ratatui::layout::Rect;

use super::style::Style;

pub struct RenderBuf<'a> {
    buf: &'a mut Buffer,
}

impl<'a> RenderBuf<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf }
    }

    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(cell) = self.buf.cell_mut(Position::new(x, y)) {
            cell.set_char(ch).set_style(style);
        }
    }

    /// Write `text` from (x, y) rightwards, cut off at the buffer edge.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let bounds = self.buf.area;
        if !bounds.contains(Position::new(x, y)) {
            return;
        }
        let room = usize::from(bounds.right() - x);
        self.buf.set_stringn(x, y, text, room, style);
    }

    pub fn draw_str_centered(&mut self, area: Rect, y: u16, text: &str, style: Style) {
        let width = Line::raw(text).width() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        self.draw_str(x, y, text, style);
    }

    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        for pos in area.intersection(self.buf.area).positions() {
            self.set_cell(pos.x, pos.y, ch, style);
        }
    }

    /// Rounded frame with a title on the top edge.
    pub fn draw_block(&mut self, area: Rect, title: &str, border: Style, title_style: Style) {
        let area = area.intersection(self.buf.area);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(title, RatatuiStyle::from(title_style)))
            .render(area, self.buf);
    }

    /// One row of differently styled runs, left to right.
    pub fn draw_line(&mut self, area: Rect, runs: &[(&str, Style)]) {
        let line: Line = runs
            .iter()
            .map(|&(text, style)| Span::styled(text, style))
            .collect();
        line.render(area.intersection(self.buf.area), self.buf);
    }
}
