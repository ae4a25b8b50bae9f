//! Core types for the lily oscillator voice.
//!
//! Parameter tables, variant shape ranges, display labels, lo-fi lookup
//! tables and the types a host hands the voice. The render engine and the
//! controller both build on these.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod command;
mod host;
mod labels;
mod lofi;
mod param;
mod variant;

pub use command::Command;
pub use host::{
    api_is_compatible, InitError, OscContext, RuntimeDesc, INPUT_CHANNELS, OUTPUT_CHANNELS,
    SAMPLE_RATE, UNIT_API_VERSION, UNIT_TARGET,
};
pub use labels::{display_value, parameter_label, BITS_LABELS, MOD_TARGET_LABELS, RATE_LABELS};
pub use lofi::{bit_mask, decimation_factor, BIT_REDUCTION_MASKS, DECIMATION_FACTORS};
pub use param::{default_values, param_info, ParamId, ParamInfo, PARAM_COUNT};
pub use variant::{ParseVariantError, Variant, SHAPE_COUNT, SHAPE_LABELS};
