use serde::{Deserialize, Serialize};

use crate::pitch::{pitch_of, NoteError, Pitch};

/// A named chord and the note names that make it up, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub name: String,
    pub keys: Vec<String>,
}

impl Chord {
    pub fn new(name: impl Into<String>, keys: &[&str]) -> Self {
        Self {
            name: name.into(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Parse every key, failing on the first one that is not a valid note name.
    pub fn pitches(&self) -> Result<Vec<Pitch>, NoteError> {
        self.keys.iter().map(|k| pitch_of(k)).collect()
    }
}
