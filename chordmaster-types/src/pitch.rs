use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Sharp spellings for each pitch class, C = 0.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch classes of the natural (white) keys.
pub const WHITE_KEY_CLASSES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Errors produced while reading a note name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("invalid note name '{0}': expected a letter A-G, an optional '#' or 'b', and an octave digit")]
    InvalidNoteName(String),

    #[error("note '{name}' (pitch {pitch}) is outside the piano range A0..C8")]
    OutOfRange { name: String, pitch: i32 },
}

/// Absolute pitch on an 88-key piano, in MIDI numbering (A0 = 21, C8 = 108).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(u8);

impl Pitch {
    pub const LOWEST: Pitch = Pitch(21);
    pub const HIGHEST: Pitch = Pitch(108);
    pub const C4: Pitch = Pitch(60);
    pub const C5: Pitch = Pitch(72);

    /// Returns `None` outside the playable range.
    pub fn new(value: u8) -> Option<Self> {
        if (Self::LOWEST.0..=Self::HIGHEST.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Clamp an arbitrary integer into the playable range.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::LOWEST.0 as i32, Self::HIGHEST.0 as i32) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn pitch_class(self) -> u8 {
        self.0 % 12
    }

    pub fn octave(self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    pub fn is_black_key(self) -> bool {
        !is_white_key(self.pitch_class())
    }

    /// Pitch-class label without octave, e.g. "G#".
    pub fn class_name(self) -> &'static str {
        SHARP_NAMES[self.pitch_class() as usize]
    }

    /// Canonical sharp-spelled note name, e.g. "G#4".
    pub fn note_name(self) -> String {
        format!("{}{}", self.class_name(), self.octave())
    }

    /// Equal-tempered frequency with A4 = 440 Hz.
    pub fn frequency(self) -> f32 {
        440.0 * 2f32.powf((self.0 as f32 - 69.0) / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class_name(), self.octave())
    }
}

impl FromStr for Pitch {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        pitch_of(s)
    }
}

fn note_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Ga-g])([#b]?)([0-9])$").expect("static note pattern"))
}

fn letter_semitone(letter: char) -> i32 {
    match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        _ => 11,
    }
}

/// Parse a note name such as "C#4", "Ab4" or "Cb5" into a pitch.
///
/// Accidentals shift by one semitone across octave boundaries, so "Cb5" is B4
/// and "B#3" is C4.
pub fn pitch_of(name: &str) -> Result<Pitch, NoteError> {
    let caps = note_pattern()
        .captures(name)
        .ok_or_else(|| NoteError::InvalidNoteName(name.to_string()))?;

    let letter = caps[1].chars().next().unwrap_or('C');
    let accidental = match &caps[2] {
        "#" => 1,
        "b" => -1,
        _ => 0,
    };
    let octave: i32 = caps[3]
        .parse()
        .map_err(|_| NoteError::InvalidNoteName(name.to_string()))?;

    let value = (octave + 1) * 12 + letter_semitone(letter) + accidental;
    u8::try_from(value)
        .ok()
        .and_then(Pitch::new)
        .ok_or_else(|| NoteError::OutOfRange {
            name: name.to_string(),
            pitch: value,
        })
}

/// Inverse of [`pitch_of`]; always sharp-spelled.
pub fn note_name_of(pitch: Pitch) -> String {
    pitch.note_name()
}

pub fn pitch_class(pitch: Pitch) -> u8 {
    pitch.pitch_class()
}

pub fn is_white_key(pitch_class: u8) -> bool {
    WHITE_KEY_CLASSES.contains(&(pitch_class % 12))
}

/// Normalize any accepted spelling to its canonical sharp form.
pub fn canonical_name(name: &str) -> Result<String, NoteError> {
    pitch_of(name).map(note_name_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_and_sharps() {
        assert_eq!(pitch_of("C4").unwrap().get(), 60);
        assert_eq!(pitch_of("C#4").unwrap().get(), 61);
        assert_eq!(pitch_of("A4").unwrap().get(), 69);
        assert_eq!(pitch_of("A0").unwrap().get(), 21);
        assert_eq!(pitch_of("C8").unwrap().get(), 108);
    }

    #[test]
    fn flats_cross_octave_boundaries() {
        assert_eq!(pitch_of("Ab4").unwrap().get(), 68);
        let cb5 = pitch_of("Cb5").unwrap();
        assert_eq!(cb5.get(), 71);
        assert_eq!(cb5.pitch_class(), 11);
        assert_eq!(pitch_of("B#3").unwrap(), Pitch::C4);
    }

    #[test]
    fn lowercase_letters_are_accepted() {
        assert_eq!(pitch_of("g4").unwrap().get(), 67);
        assert_eq!(pitch_of("bb3").unwrap().get(), 58);
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "H4", "C", "C##4", "C#", "4C", "C10", "Cx4", " C4 ", "C4 ", "\tA4"] {
            assert_eq!(
                pitch_of(bad),
                Err(NoteError::InvalidNoteName(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn rejects_notes_off_the_keyboard() {
        assert!(matches!(pitch_of("C0"), Err(NoteError::OutOfRange { pitch: 12, .. })));
        assert!(matches!(pitch_of("C#8"), Err(NoteError::OutOfRange { pitch: 109, .. })));
    }

    #[test]
    fn raw_numbers_off_the_keyboard_are_not_pitches() {
        for raw in [0, 20, 109, 200, u8::MAX] {
            assert_eq!(Pitch::new(raw), None, "{raw} should be rejected");
        }
        assert_eq!(Pitch::new(21), Some(Pitch::LOWEST));
        assert_eq!(Pitch::new(108), Some(Pitch::HIGHEST));
    }

    #[test]
    fn note_names_use_sharps() {
        assert_eq!(note_name_of(pitch_of("Ab4").unwrap()), "G#4");
        assert_eq!(note_name_of(pitch_of("Db3").unwrap()), "C#3");
        assert_eq!(note_name_of(pitch_of("Cb5").unwrap()), "B4");
        assert_eq!(canonical_name("Eb4").unwrap(), "D#4");
    }

    #[test]
    fn every_pitch_round_trips() {
        for value in Pitch::LOWEST.get()..=Pitch::HIGHEST.get() {
            let pitch = Pitch::new(value).unwrap();
            assert_eq!(pitch_of(&note_name_of(pitch)).unwrap(), pitch);
        }
    }

    #[test]
    fn white_keys() {
        assert!(is_white_key(0));
        assert!(is_white_key(11));
        assert!(!is_white_key(1));
        assert!(!is_white_key(10));
        assert!(pitch_of("F#4").unwrap().is_black_key());
        assert!(!pitch_of("E4").unwrap().is_black_key());
    }

    #[test]
    fn a4_is_concert_pitch() {
        let a4 = pitch_of("A4").unwrap();
        assert!((a4.frequency() - 440.0).abs() < 1e-3);
        assert!((Pitch::C4.frequency() - 261.6256).abs() < 1e-2);
    }
}
