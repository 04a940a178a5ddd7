use crate::pitch::Pitch;

/// Inclusive span of keys drawn by the keyboard widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub first: Pitch,
    pub last: Pitch,
}

impl DisplayRange {
    pub fn new(first: Pitch, last: Pitch) -> Self {
        debug_assert!(first <= last, "display range must be ordered");
        Self { first, last }
    }

    /// Number of semitones between the outer keys. Zero for a reversed range.
    pub fn span(&self) -> u8 {
        self.last.get().saturating_sub(self.first.get())
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        (self.first..=self.last).contains(&pitch)
    }

    /// All pitches in the range, low to high.
    pub fn pitches(&self) -> impl Iterator<Item = Pitch> {
        (self.first.get()..=self.last.get()).filter_map(Pitch::new)
    }

    pub fn white_key_count(&self) -> usize {
        self.pitches().filter(|p| !p.is_black_key()).count()
    }
}
