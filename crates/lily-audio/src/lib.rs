//! Audio output backends for the lily oscillator voice.

mod cpal_backend;
mod traits;

pub use cpal_backend::{push_spin, CpalOutput};
pub use traits::{AudioError, AudioOutput};
