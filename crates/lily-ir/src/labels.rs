//! Display strings for parameter values.

use core::fmt::Write;

use arrayvec::ArrayString;

use crate::param::ParamId;
use crate::variant::{Variant, SHAPE_LABELS};

/// Mod target labels, in selector order.
pub const MOD_TARGET_LABELS: [&str; 3] = ["TMBR", "COLR", "FMLV"];

/// Effective bit depth per `Resolution` level.
pub const BITS_LABELS: [&str; 7] = [" 2", " 3", " 4", " 6", " 8", "12", "16"];

/// Effective sample rate per `SampleRate` level.
pub const RATE_LABELS: [&str; 6] = [" 4K", " 6K", " 8K", "16K", "24K", "48K"];

/// Label for `value` of parameter `id`.
///
/// `current_shape` is the shape currently in effect: a variant's hidden
/// shape only shows its own label once it has been unlocked.
pub fn parameter_label(
    variant: Variant,
    id: ParamId,
    value: i32,
    current_shape: i32,
) -> Option<&'static str> {
    match id {
        ParamId::Shape => shape_label(variant, value, current_shape),
        ParamId::ModTarget => Some(MOD_TARGET_LABELS[value.clamp(0, 2) as usize]),
        ParamId::Resolution => usize::try_from(value).ok().and_then(|i| BITS_LABELS.get(i)).copied(),
        ParamId::SampleRate => usize::try_from(value).ok().and_then(|i| RATE_LABELS.get(i)).copied(),
        _ => None,
    }
}

fn shape_label(variant: Variant, value: i32, current_shape: i32) -> Option<&'static str> {
    let shape = u8::try_from(value).ok()?;
    if !variant.shapes().contains(&shape) {
        return None;
    }
    match variant.hidden_shape() {
        Some(hidden) if shape == hidden && current_shape != hidden as i32 => {
            Some(SHAPE_LABELS[hidden as usize - 1])
        }
        _ => Some(SHAPE_LABELS[shape as usize]),
    }
}

/// Label if the parameter has one, else the decimal value.
pub fn display_value(variant: Variant, id: ParamId, value: i32, current_shape: i32) -> ArrayString<12> {
    let mut out = ArrayString::new();
    match parameter_label(variant, id, value, current_shape) {
        Some(label) => out.push_str(label),
        // An i32 needs at most 11 characters.
        None => {
            let _ = write!(out, "{}", value);
        }
    }
    out
}
