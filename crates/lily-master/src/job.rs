//! Offline render job description and the FM test input.

use lily_ir::SAMPLE_RATE;

/// Sine fed to both input channels, standing in for the host's audio bus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FmInput {
    pub hz: f32,
    /// Peak amplitude per channel.
    pub level: f32,
}

/// One note rendered from a fresh voice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderJob {
    pub note: u8,
    pub velocity: u8,
    /// Samples until note-off.
    pub gate_samples: usize,
    /// Total samples rendered.
    pub length_samples: usize,
    /// Host shape LFO rate.
    pub lfo_hz: f32,
    pub fm: Option<FmInput>,
}

impl Default for RenderJob {
    fn default() -> Self {
        Self {
            note: 48,
            velocity: 100,
            gate_samples: SAMPLE_RATE as usize / 2,
            length_samples: SAMPLE_RATE as usize,
            lfo_hz: 0.5,
            fm: None,
        }
    }
}

/// Running sine oscillator for [`FmInput`].
pub(crate) struct SineInput {
    phase: f32,
    step: f32,
    level: f32,
}

impl SineInput {
    pub(crate) fn new(fm: FmInput) -> Self {
        Self {
            phase: 0.0,
            step: fm.hz / SAMPLE_RATE as f32 * std::f32::consts::TAU,
            level: fm.level,
        }
    }

    /// Fill a stereo-interleaved buffer.
    pub(crate) fn fill(&mut self, frames: &mut [f32]) {
        for frame in frames.chunks_mut(2) {
            frame.fill(self.phase.sin() * self.level);
            self.phase = (self.phase + self.step) % std::f32::consts::TAU;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_is_identical_on_both_channels() {
        let mut sine = SineInput::new(FmInput { hz: 440.0, level: 0.5 });
        let mut buf = [0.0f32; 64];
        sine.fill(&mut buf);
        for frame in buf.chunks(2) {
            assert_eq!(frame[0], frame[1]);
            assert!(frame[0].abs() <= 0.5);
        }
        assert!(buf.iter().any(|s| *s > 0.1));
    }
}
