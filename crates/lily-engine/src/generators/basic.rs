//! Phase-accumulator oscillator with a few classic wave families.
//!
//! Stands in for a full macro oscillator so the voice can be heard and
//! measured on its own. The shape number picks a family: noise for the noise
//! shapes, otherwise `shape % 4` selects saw, pulse, triangle or sine.
//! Timbre drives a wavefolder (pulse width for the pulse family) and color
//! crossfades towards a sub-octave square. Physical-modelling shapes are
//! struck: they sound only after `strike` and decay exponentially.

use core::f32::consts::TAU;

use lily_ir::SAMPLE_RATE;

use crate::tone::{ToneGenerator, CONTROL_MAX};

/// First shape rendered as clocked noise.
const NOISE_SHAPES_START: u8 = 41;

/// Shapes with a struck, decaying envelope.
const STRUCK_SHAPES: core::ops::RangeInclusive<u8> = 28..=36;

/// Envelope decay per sample: `env -= max(env >> DECAY_SHIFT, 1)`.
const DECAY_SHIFT: u32 = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Saw,
    Pulse,
    Triangle,
    Sine,
    Noise,
}

impl Family {
    fn of(shape: u8) -> Self {
        if shape >= NOISE_SHAPES_START {
            return Family::Noise;
        }
        match shape % 4 {
            0 => Family::Saw,
            1 => Family::Pulse,
            2 => Family::Triangle,
            _ => Family::Sine,
        }
    }
}

/// Convert a pitch code (MIDI note << 7) to a 0.32 phase increment.
pub fn pitch_to_increment(pitch: i16) -> u32 {
    let note = pitch as f32 / 128.0;
    let freq = 440.0 * libm::exp2f((note - 69.0) / 12.0);
    let inc = freq / SAMPLE_RATE as f32 * 4_294_967_296.0;
    // Keep below Nyquist.
    inc.min(2_147_483_647.0) as u32
}

/// Reflect values that overshoot the i16 range back into it.
fn fold(x: i32) -> i16 {
    let mut x = x;
    if x > 32767 {
        x = 65534 - x;
    }
    if x < -32768 {
        x = -65536 - x;
    }
    x.clamp(-32768, 32767) as i16
}

/// Reference generator used by the CLI and tests.
#[derive(Clone, Debug)]
pub struct BasicOscillator {
    shape: u8,
    family: Family,
    timbre: i32,
    color: i32,
    pitch: i16,
    increment: u32,
    phase: u32,
    sub_phase: u32,
    /// Envelope level, 0..=0xffff; only used for struck shapes.
    envelope: u32,
    noise: u32,
    noise_value: i32,
}

impl BasicOscillator {
    pub fn new() -> Self {
        let mut osc = Self {
            shape: 0,
            family: Family::Saw,
            timbre: 0,
            color: 0,
            pitch: 0,
            increment: 0,
            phase: 0,
            sub_phase: 0,
            envelope: 0,
            noise: 0,
            noise_value: 0,
        };
        osc.init();
        osc
    }

    pub fn shape(&self) -> u8 {
        self.shape
    }

    fn is_struck(&self) -> bool {
        STRUCK_SHAPES.contains(&self.shape)
    }

    fn next_noise(&mut self) -> i32 {
        // xorshift32
        let mut x = self.noise;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise = x;
        (x >> 16) as i32 - 32768
    }

    fn wave(&mut self) -> i32 {
        let phase = self.phase;
        match self.family {
            Family::Saw => (phase >> 16) as i32 - 32768,
            Family::Pulse => {
                // Width 50% at timbre 0, about 75% at full timbre.
                let threshold = 0x8000_0000u32 + ((self.timbre as u32) << 15);
                if phase < threshold { 32767 } else { -32768 }
            }
            Family::Triangle => {
                if phase < 0x8000_0000 {
                    (phase >> 15) as i32 - 32768
                } else {
                    32767 - ((phase - 0x8000_0000) >> 15) as i32
                }
            }
            Family::Sine => (libm::sinf(phase as f32 / 4_294_967_296.0 * TAU) * 32767.0) as i32,
            Family::Noise => self.noise_value,
        }
    }

    fn next_sample(&mut self) -> i16 {
        let (phase, wrapped) = self.phase.overflowing_add(self.increment);
        if wrapped && self.family == Family::Noise {
            self.noise_value = self.next_noise();
        }

        let mut sample = self.wave();
        if self.family != Family::Pulse {
            // Drive up to 2x into the folder.
            sample = fold(sample + ((sample * self.timbre) >> 15)) as i32;
        }

        let sub = if self.sub_phase < 0x8000_0000 { 32767 } else { -32768 };
        sample = (sample * (CONTROL_MAX + 1 - self.color) + sub * self.color) >> 15;

        if self.is_struck() {
            sample = (sample * self.envelope as i32) >> 16;
            let step = (self.envelope >> DECAY_SHIFT).max(1);
            self.envelope = self.envelope.saturating_sub(step);
        }

        self.phase = phase;
        self.sub_phase = self.sub_phase.wrapping_add(self.increment >> 1);
        sample.clamp(-32768, 32767) as i16
    }
}

impl Default for BasicOscillator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneGenerator for BasicOscillator {
    fn init(&mut self) {
        self.phase = 0;
        self.sub_phase = 0;
        self.envelope = 0;
        self.noise = 0x1234_5678;
        self.noise_value = 0;
        self.set_pitch(60 << 7);
    }

    fn set_shape(&mut self, shape: u8) {
        self.shape = shape;
        self.family = Family::of(shape);
    }

    fn set_parameters(&mut self, timbre: i16, color: i16) {
        self.timbre = (timbre as i32).clamp(0, CONTROL_MAX);
        self.color = (color as i32).clamp(0, CONTROL_MAX);
    }

    fn set_pitch(&mut self, pitch: i16) {
        if pitch != self.pitch || self.increment == 0 {
            self.pitch = pitch;
            self.increment = pitch_to_increment(pitch);
        }
    }

    fn strike(&mut self) {
        self.phase = 0;
        self.sub_phase = 0;
        self.envelope = 0xffff;
    }

    fn render(&mut self, _sync: &[u8], buffer: &mut [i16]) {
        for s in buffer.iter_mut() {
            *s = self.next_sample();
        }
    }
}
