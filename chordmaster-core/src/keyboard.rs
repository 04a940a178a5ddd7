//! Keyboard layout for a chord: which span of keys to draw, and which of
//! them belong to the chord.
//!
//! Two layouts exist. `SingleOctave` folds every note into C4..C5 so the
//! keyboard never scrolls; it is the default. `Wide` follows the chord's own
//! span with a little padding on each side.

use chordmaster_types::{is_white_key, pitch::WHITE_KEY_CLASSES, Chord, DisplayRange, NoteError, Pitch};

/// Semitones of context drawn on each side of the chord in wide mode.
pub const EDGE_PADDING: i32 = 2;

/// Narrowest span, in semitones, the wide keyboard is allowed to shrink to.
pub const MIN_SPAN: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardMode {
    #[default]
    SingleOctave,
    Wide,
}

impl KeyboardMode {
    pub fn name(&self) -> &'static str {
        match self {
            KeyboardMode::SingleOctave => "single-octave",
            KeyboardMode::Wide => "wide",
        }
    }
}

/// What the keyboard widget needs to draw one chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardView {
    pub range: DisplayRange,
    /// Chord notes as placed on this keyboard, in catalog order.
    pub keys: Vec<Pitch>,
}

impl KeyboardView {
    pub fn for_pitches(pitches: &[Pitch], mode: KeyboardMode) -> Self {
        match mode {
            KeyboardMode::SingleOctave => Self {
                range: single_octave_range(),
                keys: transpose_to_octave(pitches),
            },
            KeyboardMode::Wide => Self {
                range: display_range(pitches).unwrap_or_else(single_octave_range),
                keys: pitches.to_vec(),
            },
        }
    }

    /// Canonical note names of `keys`.
    pub fn key_names(&self) -> Vec<String> {
        self.keys.iter().map(|p| p.note_name()).collect()
    }
}

/// Parse a chord and lay it out.
pub fn keyboard_view(chord: &Chord, mode: KeyboardMode) -> Result<KeyboardView, NoteError> {
    let pitches = chord.pitches()?;
    Ok(KeyboardView::for_pitches(&pitches, mode))
}

/// Range covering the chord's own span, or `None` for an empty chord.
pub fn display_range(pitches: &[Pitch]) -> Option<DisplayRange> {
    let min = pitches.iter().min()?.get() as i32;
    let max = pitches.iter().max()?.get() as i32;

    let mut first = min - EDGE_PADDING;
    let mut last = max + EDGE_PADDING;

    if last - first < MIN_SPAN {
        let extra = MIN_SPAN - (last - first);
        let before = extra / 2;
        first -= before;
        last += extra - before;
    }

    let lowest = Pitch::LOWEST.get() as i32;
    let highest = Pitch::HIGHEST.get() as i32;
    first = first.clamp(lowest, highest);
    last = extend_to_white_key(last.clamp(lowest, highest));
    // C8 is white, so this only bites if the bounds ever change.
    while last > highest || !is_white_key(last.rem_euclid(12) as u8) {
        last -= 1;
    }

    Some(DisplayRange::new(Pitch::clamped(first), Pitch::clamped(last)))
}

/// Move a black key up to the next white key so the keyboard never ends on
/// half a black key.
fn extend_to_white_key(pitch: i32) -> i32 {
    let class = pitch.rem_euclid(12);
    if is_white_key(class as u8) {
        return pitch;
    }
    match WHITE_KEY_CLASSES.iter().find(|&&c| c as i32 > class) {
        Some(&next) => pitch - class + next as i32,
        None => pitch - class + 12,
    }
}

/// Fixed C4..C5 range used by the single-octave keyboard.
pub fn single_octave_range() -> DisplayRange {
    DisplayRange::new(Pitch::C4, Pitch::C5)
}

/// Fold each pitch into the octave starting at C4, keeping order, length and
/// any duplicates that folding produces.
pub fn transpose_to_octave(pitches: &[Pitch]) -> Vec<Pitch> {
    pitches
        .iter()
        .map(|p| Pitch::clamped(Pitch::C4.get() as i32 + p.pitch_class() as i32))
        .collect()
}
