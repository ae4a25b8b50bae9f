//! Parameter bank: clamped raw values plus their internal projections.

use lily_ir::{default_values, param_info, ParamId, Variant, PARAM_COUNT, SAMPLE_RATE};

/// Samples of modulation delay per `ModDelay` step.
pub const DELAY_UNIT_SAMPLES: u32 = SAMPLE_RATE / 240;

/// Companion values that unlock a variant's hidden shape.
const UNLOCK_TIMBRE: i32 = -256;
const UNLOCK_COLOR: i32 = 255;
const UNLOCK_FM_AMOUNT: i32 = 123;

/// Which destination receives the modulation source, as 0/1 weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Routing {
    pub timbre: i32,
    pub color: i32,
    pub fm: i32,
}

impl Routing {
    /// Weights for a `ModTarget` selector value.
    ///
    /// 0 routes to timbre, 1 to color, 2 to FM amount; anything else
    /// disables modulation.
    pub fn for_target(target: i32) -> Self {
        match target {
            0 | 1 => Self { timbre: 1 - target, color: target, fm: 0 },
            2 => Self { timbre: 0, color: 0, fm: 1 },
            _ => Self::default(),
        }
    }
}

/// Scale a -256..=255 control value into the generator's 0..=32767 domain.
pub fn control_to_internal(value: i32) -> i32 {
    (value + 256) << 6
}

/// Stored parameter values and everything derived from them.
#[derive(Clone, Debug)]
pub struct ParameterBank {
    variant: Variant,
    values: [i32; PARAM_COUNT],
    timbre: i32,
    color: i32,
    routing: Routing,
    delay_samples: u32,
}

impl ParameterBank {
    /// A bank holding the variant's defaults.
    pub fn new(variant: Variant) -> Self {
        let values = default_values(variant);
        Self {
            variant,
            values,
            timbre: control_to_internal(values[ParamId::Timbre.index()]),
            color: control_to_internal(values[ParamId::Color.index()]),
            routing: Routing::for_target(values[ParamId::ModTarget.index()]),
            delay_samples: DELAY_UNIT_SAMPLES * values[ParamId::ModDelay.index()] as u32,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Clamp `raw`, update derived state, and return the stored value.
    pub fn write(&mut self, id: ParamId, raw: i32) -> i32 {
        let mut value = param_info(self.variant, id).clamp(raw);
        match id {
            ParamId::Shape => value = self.resolve_shape(value),
            ParamId::Timbre => self.timbre = control_to_internal(value),
            ParamId::Color => self.color = control_to_internal(value),
            ParamId::ModTarget => self.routing = Routing::for_target(value),
            // Clamped to 0..=31, so the product is non-negative.
            ParamId::ModDelay => self.delay_samples = DELAY_UNIT_SAMPLES * value as u32,
            _ => {}
        }
        self.values[id.index()] = value;
        value
    }

    /// A request for the hidden shape only sticks when the companion controls
    /// hold the unlock combination; otherwise the shape below it is used.
    fn resolve_shape(&self, requested: i32) -> i32 {
        let Some(hidden) = self.variant.hidden_shape() else {
            return requested;
        };
        let hidden = hidden as i32;
        if requested != hidden || self.value(ParamId::Shape) == hidden {
            return requested;
        }
        if self.value(ParamId::Timbre) == UNLOCK_TIMBRE
            && self.value(ParamId::Color) == UNLOCK_COLOR
            && self.value(ParamId::FmAmount) == UNLOCK_FM_AMOUNT
        {
            tracing::info!(shape = hidden, "hidden shape unlocked");
            hidden
        } else {
            hidden - 1
        }
    }

    /// Last stored (clamped) value.
    pub fn value(&self, id: ParamId) -> i32 {
        self.values[id.index()]
    }

    /// All stored values in host table order.
    pub fn values(&self) -> &[i32; PARAM_COUNT] {
        &self.values
    }

    /// Timbre in generator units (0..=32704).
    pub fn timbre(&self) -> i32 {
        self.timbre
    }

    /// Color in generator units (0..=32704).
    pub fn color(&self) -> i32 {
        self.color
    }

    pub fn routing(&self) -> Routing {
        self.routing
    }

    /// Modulation countdown armed on each note-on.
    pub fn delay_samples(&self) -> u32 {
        self.delay_samples
    }
}

/// Parameter writes are ignored until the voice has entered its first
/// render call. Some hosts push stale values during instantiation; the
/// guard keeps those from reaching the generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct BootGuard {
    started: bool,
}

impl BootGuard {
    /// Mark the first render as entered.
    pub fn open(&mut self) {
        self.started = true;
    }

    pub fn is_open(&self) -> bool {
        self.started
    }
}

/// What happened to a parameter write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Stored, with the value after clamping.
    Applied(i32),
    /// Dropped: the voice has not rendered yet.
    IgnoredBeforeFirstRender,
}
