//! Parameter identifiers and their declared ranges.
//!
//! Values are plain `i32`s in the user-facing range. Every write is clamped
//! to the range declared here; reads never re-validate.

use crate::variant::Variant;

/// Number of host-visible parameters.
pub const PARAM_COUNT: usize = 9;

/// Host-visible parameter slots, in host table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamId {
    /// Drives the generator's timbre input.
    Timbre = 0,
    /// Drives the generator's color input.
    Color,
    /// Generator shape index (range depends on the variant).
    Shape,
    /// Modulation routing selector.
    ModTarget,
    /// Modulation fade-in length, in units of 1/240 s.
    ModDelay,
    /// Audio-rate FM depth.
    FmAmount,
    /// Pitch offset in generator pitch units.
    Pitch,
    /// Bit-depth reduction level.
    Resolution,
    /// Sample-rate reduction level.
    SampleRate,
}

impl ParamId {
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Timbre,
        ParamId::Color,
        ParamId::Shape,
        ParamId::ModTarget,
        ParamId::ModDelay,
        ParamId::FmAmount,
        ParamId::Pitch,
        ParamId::Resolution,
        ParamId::SampleRate,
    ];

    /// Look up a parameter by its host table index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Host table index.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Metadata describing one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    pub id: ParamId,
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl ParamInfo {
    /// Clamp a raw value into the declared range.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

static PARAMS: [ParamInfo; PARAM_COUNT] = [
    ParamInfo { id: ParamId::Timbre, name: "Tmbr", min: -256, max: 255, default: 0 },
    ParamInfo { id: ParamId::Color, name: "Colr", min: -256, max: 255, default: 0 },
    // Shape bounds are replaced per variant in `param_info`.
    ParamInfo { id: ParamId::Shape, name: "Shap", min: 0, max: 0, default: 0 },
    ParamInfo { id: ParamId::ModTarget, name: "mTgt", min: 0, max: 2, default: 0 },
    ParamInfo { id: ParamId::ModDelay, name: "mDly", min: 0, max: 31, default: 0 },
    ParamInfo { id: ParamId::FmAmount, name: "FMLv", min: -127, max: 127, default: 0 },
    ParamInfo { id: ParamId::Pitch, name: "Ptch", min: -127, max: 127, default: 0 },
    ParamInfo { id: ParamId::Resolution, name: "Bits", min: 0, max: 6, default: 6 },
    ParamInfo { id: ParamId::SampleRate, name: "Rate", min: 0, max: 5, default: 5 },
];

/// Declared range and default of `id` for the given variant.
pub fn param_info(variant: Variant, id: ParamId) -> ParamInfo {
    let mut info = PARAMS[id.index()];
    if id == ParamId::Shape {
        let shapes = variant.shapes();
        info.min = *shapes.start() as i32;
        info.max = *shapes.end() as i32;
        info.default = info.min;
    }
    info
}

/// Default values for every slot, in host table order.
pub fn default_values(variant: Variant) -> [i32; PARAM_COUNT] {
    ParamId::ALL.map(|id| param_info(variant, id).default)
}
