//! Colors and text styles for the flashcard screen.

use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

/// 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const DARK_GRAY: Color = Color::new(100, 100, 100);
    pub const SKY_BLUE: Color = Color::new(135, 206, 235);
    pub const GOLD: Color = Color::new(255, 215, 0);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const RED: Color = Color::new(255, 80, 80);

    // Piano keys
    pub const KEY_WHITE: Color = Color::new(235, 235, 228);
    pub const KEY_BLACK: Color = Color::new(28, 28, 32);
    pub const KEY_SEPARATOR: Color = Color::new(150, 150, 150);
    pub const KEY_ACTIVE: Color = Color::new(255, 190, 60); // amber
    pub const KEY_ACTIVE_BLACK: Color = Color::new(230, 120, 40); // burnt orange

    // Card frame
    pub const CARD_BORDER: Color = Color::new(90, 130, 200);
    pub const CARD_TITLE: Color = Color::WHITE;
}

/// Foreground, background and weight of a run of cells. Unset colors keep
/// whatever the cell already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
        }
    }

    pub const fn fg(self, color: Color) -> Self {
        Self {
            fg: Some(color),
            ..self
        }
    }

    pub const fn bg(self, color: Color) -> Self {
        Self {
            bg: Some(color),
            ..self
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

impl From<Color> for RatatuiColor {
    fn from(c: Color) -> Self {
        RatatuiColor::Rgb(c.r, c.g, c.b)
    }
}

impl From<Style> for RatatuiStyle {
    fn from(s: Style) -> Self {
        let base = RatatuiStyle {
            fg: s.fg.map(RatatuiColor::from),
            bg: s.bg.map(RatatuiColor::from),
            ..RatatuiStyle::default()
        };
        if s.bold {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_colors_stay_unset() {
        let style: RatatuiStyle = Style::new().bold().into();
        assert_eq!(style.fg, None);
        assert_eq!(style.bg, None);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn colors_convert_to_rgb() {
        let style: RatatuiStyle = Style::new().fg(Color::GOLD).bg(Color::KEY_BLACK).into();
        assert_eq!(style.fg, Some(RatatuiColor::Rgb(255, 215, 0)));
        assert_eq!(style.bg, Some(RatatuiColor::Rgb(28, 28, 32)));
    }
}
