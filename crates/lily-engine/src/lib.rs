//! Render core for the lily oscillator voice.
//!
//! Drives a tone generator in fixed-size sub-chunks, applies delayed
//! modulation and audio-rate FM, and quantizes the output.

#![cfg_attr(not(feature = "std"), no_std)]

mod bank;
mod gate;
pub mod generators;
mod modulation;
mod pitch;
mod quantizer;
mod tone;
mod voice;

pub use bank::{control_to_internal, BootGuard, ParameterBank, Routing, WriteOutcome, DELAY_UNIT_SAMPLES};
pub use gate::Gate;
pub use generators::{pitch_to_increment, BasicOscillator};
pub use modulation::{delayed_depth, ModulationSource};
pub use pitch::{mix_pitch, PitchInputs};
pub use quantizer::OutputQuantizer;
pub use tone::{sub_chunks, ToneGenerator, CONTROL_MAX, PITCH_MAX, TONE_BLOCK_SIZE};
pub use voice::Voice;
