//! Errors raised while loading the chord catalog.
//!
//! Every variant is fatal at startup: the catalog is static data, so a bad
//! entry is a mistake to fix rather than a condition to recover from.

use std::path::PathBuf;

use chordmaster_types::NoteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("chord catalog is empty")]
    Empty,

    #[error("chord '{name}' has no keys")]
    EmptyChord { name: String },

    #[error("chord '{chord}': {source}")]
    InvalidNote {
        chord: String,
        #[source]
        source: NoteError,
    },

    #[error("malformed chord catalog: {0}")]
    Format(#[from] serde_json::Error),

    #[error("could not read chord catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
