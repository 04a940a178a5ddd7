//! Bottom-line notices that fade on their own.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::style::{Color, Style};
use super::{Rect, RenderBuf};

/// Most notices kept; older ones are dropped even if still live.
const CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

impl StatusLevel {
    fn lifetime(self) -> Duration {
        match self {
            StatusLevel::Info => Duration::from_secs(3),
            StatusLevel::Warning => Duration::from_secs(6),
        }
    }

    fn color(self) -> Color {
        match self {
            StatusLevel::Info => Color::SKY_BLUE,
            StatusLevel::Warning => Color::ORANGE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: StatusLevel,
    expires: Instant,
}

#[derive(Debug, Default)]
pub struct StatusBar {
    notices: VecDeque<Notice>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.push_at(text, level, Instant::now());
    }

    pub fn push_at(&mut self, text: impl Into<String>, level: StatusLevel, posted: Instant) {
        if self.notices.len() == CAPACITY {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            text: text.into(),
            level,
            expires: posted + level.lifetime(),
        });
    }

    /// Newest notice that has not expired at `now`.
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.notices.iter().rev().find(|n| now < n.expires)
    }

    pub fn render(&self, area: Rect, buf: &mut RenderBuf, now: Instant) {
        if let Some(notice) = self.current(now) {
            let style = Style::new().fg(notice.level.color());
            buf.draw_str(area.x + 1, area.y, &notice.text, style);
        }
    }
}
