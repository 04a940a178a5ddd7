use std::time::Duration;

use crate::pitch::Pitch;

/// Audio-playback collaborator.
///
/// `trigger` schedules one note to start `offset` after the call and ring for
/// `sustain`. Delivery is best effort: implementations must swallow their own
/// failures rather than report them to the caller.
pub trait NotePlayer {
    fn trigger(&self, pitch: Pitch, sustain: Duration, offset: Duration);

    /// Cut every sounding or pending note.
    fn silence(&self) {}
}

/// Player used when no audio device is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl NotePlayer for SilentPlayer {
    fn trigger(&self, pitch: Pitch, _sustain: Duration, offset: Duration) {
        log::trace!(target: "audio", "silent: {} at +{:?}", pitch, offset);
    }
}
