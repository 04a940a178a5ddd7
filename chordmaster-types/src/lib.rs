//! # chordmaster-types
//!
//! Shared data model for the chordmaster flashcard app: pitches and note
//! names, chords, keyboard ranges, the set of highlighted notes, and the
//! audio-playback trait implemented by the synth crate.

mod active;
mod chord;
pub mod pitch;
mod player;
mod range;

pub use active::ActiveNoteSet;
pub use chord::Chord;
pub use pitch::{
    canonical_name, is_white_key, note_name_of, pitch_class, pitch_of, NoteError, Pitch,
};
pub use player::{NotePlayer, SilentPlayer};
pub use range::DisplayRange;
