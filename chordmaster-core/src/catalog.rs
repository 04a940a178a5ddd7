use std::path::Path;

use chordmaster_types::{Chord, Pitch};

use crate::error::CatalogError;

const EMBEDDED_CATALOG: &str = include_str!("../chords.json");

/// A validated catalog chord together with its parsed pitches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub chord: Chord,
    /// Parsed keys, same order and length as `chord.keys`.
    pub pitches: Vec<Pitch>,
}

/// Ordered, read-only list of chords. Never empty once constructed.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        log::info!(target: "catalog", "loaded {} chords from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let chords: Vec<Chord> = serde_json::from_str(json)?;
        Self::from_chords(chords)
    }

    /// Validate chords up front so a bad note fails at load time, not mid-playback.
    pub fn from_chords(chords: Vec<Chord>) -> Result<Self, CatalogError> {
        if chords.is_empty() {
            return Err(CatalogError::Empty);
        }
        let entries = chords
            .into_iter()
            .map(|chord| {
                if chord.keys.is_empty() {
                    return Err(CatalogError::EmptyChord { name: chord.name });
                }
                let pitches = chord.pitches().map_err(|source| CatalogError::InvalidNote {
                    chord: chord.name.clone(),
                    source,
                })?;
                Ok(CatalogEntry { chord, pitches })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.chord.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordmaster_types::NoteError;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() >= 24);
        for entry in catalog.entries() {
            assert_eq!(entry.pitches.len(), entry.chord.keys.len());
        }
    }

    #[test]
    fn embedded_catalog_has_fdim_with_cb() {
        let catalog = Catalog::embedded().unwrap();
        let entry = catalog.get(catalog.position("Fdim").unwrap()).unwrap();
        let values: Vec<u8> = entry.pitches.iter().map(|p| p.get()).collect();
        assert_eq!(values, vec![65, 68, 71]);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn chord_without_keys_is_rejected() {
        let err = Catalog::from_json(r#"[{"name":"Nothing","keys":[]}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyChord { ref name } if name == "Nothing"));
    }

    #[test]
    fn bad_note_names_the_chord() {
        let err = Catalog::from_json(r#"[{"name":"C","keys":["C4","E4"]},{"name":"Oops","keys":["C4","X9"]}]"#)
            .unwrap_err();
        match err {
            CatalogError::InvalidNote { chord, source } => {
                assert_eq!(chord, "Oops");
                assert_eq!(source, NoteError::InvalidNoteName("X9".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        assert!(matches!(
            Catalog::from_json(r#"{"name":"C"}"#),
            Err(CatalogError::Format(_))
        ));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chords.json");
        std::fs::write(&path, r#"[{"name":"E5","keys":["E3","B3"]}]"#).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().chord.name, "E5");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
