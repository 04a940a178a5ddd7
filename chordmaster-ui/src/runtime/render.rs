//! Rendering: frame throttle and drawing.

use std::time::{Duration, Instant};

use super::AppRuntime;
use crate::ui::{RatatuiBackend, RenderBuf};

/// ~60 fps
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

impl AppRuntime {
    /// Draw a frame if anything changed and the throttle allows it.
    pub(crate) fn maybe_render(&mut self, backend: &mut RatatuiBackend) -> std::io::Result<()> {
        let now = Instant::now();
        if self
            .last_render_time
            .is_some_and(|last| now.duration_since(last) < FRAME_INTERVAL)
        {
            return Ok(());
        }

        // Keep drawing while a status message is up, plus once after it expires.
        let status_live = self.status_bar.current(now).is_some();
        if status_live || self.status_was_live {
            self.render_needed = true;
        }
        self.status_was_live = status_live;

        if !self.render_needed {
            return Ok(());
        }
        self.last_render_time = Some(now);

        let (pane, shell, status_bar) = (&self.pane, &self.shell, &self.status_bar);
        let mut drawn = self.last_area;
        backend.draw(|area, raw| {
            drawn = area;
            pane.render(area, &mut RenderBuf::new(raw), shell, status_bar, now);
        })?;
        self.last_area = drawn;

        self.render_needed = false;
        Ok(())
    }
}
