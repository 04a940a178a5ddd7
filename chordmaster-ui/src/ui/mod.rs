pub mod input;
pub mod keybindings;
pub mod piano_keyboard;
pub mod ratatui_impl;
pub mod render;
pub mod status_bar;
pub mod style;

pub use input::{AppEvent, InputEvent, InputSource, KeyCode, Modifiers};
pub use keybindings::{CardAction, Keymap};
pub use ratatui_impl::RatatuiBackend;
pub use render::{Rect, RenderBuf};
pub use status_bar::{StatusBar, StatusLevel};
pub use style::{Color, Style};
