use crate::pitch::{note_name_of, Pitch};

/// Note names currently lit on the keyboard, in the order they were lit.
///
/// Names are stored in canonical sharp spelling so lookups by pitch match
/// regardless of how the catalog spelled the note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveNoteSet {
    notes: Vec<String>,
}

impl ActiveNoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the note was already present.
    pub fn insert(&mut self, pitch: Pitch) -> bool {
        let name = note_name_of(pitch);
        if self.notes.contains(&name) {
            return false;
        }
        self.notes.push(name);
        true
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        let name = note_name_of(pitch);
        self.notes.iter().any(|n| *n == name)
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::pitch_of;

    #[test]
    fn keeps_insertion_order_and_ignores_repeats() {
        let mut set = ActiveNoteSet::new();
        assert!(set.insert(pitch_of("G4").unwrap()));
        assert!(set.insert(pitch_of("C4").unwrap()));
        assert!(!set.insert(pitch_of("G4").unwrap()));
        assert_eq!(set.names(), ["G4", "C4"]);
    }

    #[test]
    fn flat_and_sharp_spellings_are_the_same_key() {
        let mut set = ActiveNoteSet::new();
        set.insert(pitch_of("Ab4").unwrap());
        assert!(set.contains(pitch_of("G#4").unwrap()));
        assert_eq!(set.names(), ["G#4"]);
    }
}
