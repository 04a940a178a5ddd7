use thiserror::Error;

/// Output could not be opened. Callers fall back to silent playback.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
}
