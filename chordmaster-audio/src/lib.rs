//! # chordmaster-audio
//!
//! Small polyphonic synth that plays chord notes through the default output
//! device. [`SynthHandle`] is the main-thread side; rendering happens in the
//! `cpal` callback on a dedicated audio thread.

mod error;
mod handle;
mod mixer;
mod voice;

pub use error::AudioError;
pub use handle::SynthHandle;
pub use mixer::{Mixer, MAX_VOICES};
pub use voice::Voice;
