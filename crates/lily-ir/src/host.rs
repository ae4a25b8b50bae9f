//! Host-facing types: the runtime descriptor checked at init and the
//! per-block context the host exposes to the render callback.

use core::fmt;

/// The only host sample rate the voice supports.
pub const SAMPLE_RATE: u32 = 48_000;

/// Interleaved input channels expected from the host.
pub const INPUT_CHANNELS: u8 = 2;

/// Output channels written by the voice.
pub const OUTPUT_CHANNELS: u8 = 1;

/// Platform byte of the target word.
pub const TARGET_PLATFORM: u16 = 0x0400;

/// Module byte of the target word (oscillator).
pub const MODULE_OSC: u16 = 0x0001;

/// Target word the voice was built for.
pub const UNIT_TARGET: u16 = TARGET_PLATFORM | MODULE_OSC;

/// Host API version the voice was built against (`0x00MMmmpp`).
pub const UNIT_API_VERSION: u32 = 0x0001_0000;

const API_MAJOR_MASK: u32 = 0x007f_0000;
const API_MINOR_MASK: u32 = 0x0000_ff00;

/// Whether a host API version can run a unit built against [`UNIT_API_VERSION`].
///
/// Majors must match; the host minor must not exceed the unit's.
pub fn api_is_compatible(api: u32) -> bool {
    (api & API_MAJOR_MASK) == (UNIT_API_VERSION & API_MAJOR_MASK)
        && (api & API_MINOR_MASK) <= (UNIT_API_VERSION & API_MINOR_MASK)
}

/// What the host reports about itself when instantiating the voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeDesc {
    pub target: u16,
    pub api: u32,
    pub sample_rate: u32,
    pub input_channels: u8,
    pub output_channels: u8,
}

impl RuntimeDesc {
    /// A descriptor for a host that matches the voice exactly.
    pub const fn native() -> Self {
        Self {
            target: UNIT_TARGET,
            api: UNIT_API_VERSION,
            sample_rate: SAMPLE_RATE,
            input_channels: INPUT_CHANNELS,
            output_channels: OUTPUT_CHANNELS,
        }
    }

    /// Check every precondition the render path relies on.
    pub fn validate(&self) -> Result<(), InitError> {
        if self.target != UNIT_TARGET {
            return Err(InitError::Target(self.target));
        }
        if !api_is_compatible(self.api) {
            return Err(InitError::ApiVersion(self.api));
        }
        if self.sample_rate != SAMPLE_RATE {
            return Err(InitError::SampleRate(self.sample_rate));
        }
        if self.input_channels != INPUT_CHANNELS || self.output_channels != OUTPUT_CHANNELS {
            return Err(InitError::Geometry {
                inputs: self.input_channels,
                outputs: self.output_channels,
            });
        }
        Ok(())
    }
}

impl Default for RuntimeDesc {
    fn default() -> Self {
        Self::native()
    }
}

/// Reasons a host is rejected at init. A rejected voice is never rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitError {
    /// Built for a different platform/module pair
    Target(u16),
    /// Host API version incompatible
    ApiVersion(u32),
    /// Host runs at a rate other than 48 kHz
    SampleRate(u32),
    /// Host does not provide stereo in / mono out
    Geometry { inputs: u8, outputs: u8 },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Target(t) => write!(f, "unsupported target {:#06x}", t),
            InitError::ApiVersion(api) => write!(f, "incompatible API version {:#010x}", api),
            InitError::SampleRate(sr) => write!(f, "unsupported sample rate {} Hz (need {})", sr, SAMPLE_RATE),
            InitError::Geometry { inputs, outputs } => {
                write!(f, "unsupported geometry {} in / {} out (need 2 in / 1 out)", inputs, outputs)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

/// Values the host exposes to the render callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OscContext {
    /// Host modulation phase; the top 16 bits are used.
    pub shape_lfo: u32,
    /// Host pitch bus: note in the high byte, fraction in the low byte.
    pub pitch: u16,
}

impl OscContext {
    pub const fn new(shape_lfo: u32, pitch: u16) -> Self {
        Self { shape_lfo, pitch }
    }

    /// Pitch bus value for a MIDI note with no fraction.
    pub const fn for_note(note: u8) -> Self {
        Self { shape_lfo: 0, pitch: (note as u16) << 8 }
    }

    /// 16-bit modulation phase.
    pub fn mod_phase(&self) -> u16 {
        (self.shape_lfo >> 16) as u16
    }

    /// Pitch bus rescaled to generator pitch units (7 fractional bits).
    pub fn base_pitch(&self) -> i32 {
        (self.pitch >> 1) as i32
    }
}
