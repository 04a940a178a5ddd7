//! Terminal piano keyboard.
//!
//! White keys are `WHITE_KEY_WIDTH` cells wide including the one-cell gap on
//! their right; black keys are `BLACK_KEY_WIDTH` cells, centered on that gap
//! and drawn over the top rows only. Lit keys are recolored and carry their
//! pitch-class name; unlit keys have no label.

use chordmaster_types::{ActiveNoteSet, DisplayRange, Pitch};

use super::style::{Color, Style};
use super::{Rect, RenderBuf};

pub const WHITE_KEY_WIDTH: u16 = 5;
pub const BLACK_KEY_WIDTH: u16 = 3;
/// Rows the keyboard needs to look like one.
pub const MIN_HEIGHT: u16 = 4;

/// Horizontal placement of one key, relative to the keyboard's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySlot {
    pub pitch: Pitch,
    pub x: u16,
    pub width: u16,
    pub black: bool,
}

/// Lay out every key in `range`, white keys first, then black keys on top.
pub fn key_slots(range: &DisplayRange) -> Vec<KeySlot> {
    let mut whites = Vec::new();
    let mut blacks = Vec::new();
    let mut white_index: u16 = 0;

    for pitch in range.pitches() {
        if pitch.is_black_key() {
            // Straddle the gap after the previous white key; a range that
            // starts on a black key gets a clipped key at the left edge.
            let x = (white_index * WHITE_KEY_WIDTH).saturating_sub(BLACK_KEY_WIDTH / 2 + 1);
            let width = if white_index == 0 {
                BLACK_KEY_WIDTH / 2 + 1
            } else {
                BLACK_KEY_WIDTH
            };
            blacks.push(KeySlot {
                pitch,
                x,
                width,
                black: true,
            });
        } else {
            whites.push(KeySlot {
                pitch,
                x: white_index * WHITE_KEY_WIDTH,
                width: WHITE_KEY_WIDTH - 1,
                black: false,
            });
            white_index += 1;
        }
    }

    whites.extend(blacks);
    whites
}

/// Width in cells of the keyboard for `range`.
pub fn keyboard_width(range: &DisplayRange) -> u16 {
    (range.white_key_count() as u16 * WHITE_KEY_WIDTH).saturating_sub(1)
}

/// Display-only keyboard for one chord.
pub struct PianoKeyboard<'a> {
    range: DisplayRange,
    active: &'a ActiveNoteSet,
}

impl<'a> PianoKeyboard<'a> {
    pub fn new(range: DisplayRange, active: &'a ActiveNoteSet) -> Self {
        Self { range, active }
    }

    /// Draw into `area`, left-aligned and clipped to it.
    pub fn render(&self, area: Rect, buf: &mut RenderBuf) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let black_height = (area.height * 3 / 5).max(1);
        let right = area.x.saturating_add(area.width);

        for slot in key_slots(&self.range) {
            let x = area.x.saturating_add(slot.x);
            if x >= right {
                continue;
            }
            let width = slot.width.min(right - x);
            let lit = self.active.contains(slot.pitch);

            let (height, face) = match (slot.black, lit) {
                (false, false) => (area.height, Color::KEY_WHITE),
                (false, true) => (area.height, Color::KEY_ACTIVE),
                (true, false) => (black_height, Color::KEY_BLACK),
                (true, true) => (black_height, Color::KEY_ACTIVE_BLACK),
            };
            buf.fill(Rect::new(x, area.y, width, height), ' ', Style::new().bg(face));

            if !slot.black {
                let gap = x + width;
                if gap < right {
                    let gap_style = Style::new().fg(Color::KEY_SEPARATOR).bg(Color::BLACK);
                    for y in area.y..area.y + area.height {
                        buf.set_cell(gap, y, '▏', gap_style);
                    }
                }
            }

            if lit {
                let label = slot.pitch.class_name();
                let label_y = area.y + height - 1;
                let label_x = x + width.saturating_sub(label.len() as u16) / 2;
                let fg = if slot.black { Color::WHITE } else { Color::BLACK };
                buf.draw_str(label_x, label_y, label, Style::new().fg(fg).bg(face).bold());
            }
        }
    }
}
