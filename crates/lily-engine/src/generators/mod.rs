//! Built-in tone generators.

mod basic;

pub use basic::{pitch_to_increment, BasicOscillator};
