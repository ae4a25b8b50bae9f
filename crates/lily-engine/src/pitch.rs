//! Pitch mixing: base pitch, audio-rate FM and the pitch offset.

use crate::tone::PITCH_MAX;

/// Everything that feeds one sub-chunk's pitch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PitchInputs {
    /// Host pitch bus, already in generator units.
    pub base: i32,
    /// `FmAmount` parameter (-127..=127).
    pub fm_amount: i32,
    /// FM routing weight (0 or 1).
    pub fm_weight: i32,
    /// Delayed modulation depth for this sub-chunk.
    pub depth: u32,
    /// Stereo input frame `k` for sub-chunk `k`.
    pub input: (f32, f32),
    /// `Pitch` parameter (-127..=127).
    pub offset: i32,
}

/// Combine the inputs into a generator pitch code in `0..=PITCH_MAX`.
///
/// The FM term is `(fm_amount * 256 + fm_weight * depth) * (left + right)`
/// and is truncated towards zero when added to the base pitch.
pub fn mix_pitch(p: &PitchInputs) -> i16 {
    let fm = p.fm_amount * 256 + p.fm_weight * p.depth as i32;
    let (left, right) = p.input;
    // `as` saturates out-of-range floats and maps NaN to 0.
    let pitch = (p.base as f32 + (left + right) * fm as f32) as i32;
    pitch.saturating_add(p.offset).clamp(0, PITCH_MAX) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(base: i32) -> PitchInputs {
        PitchInputs { base, ..Default::default() }
    }

    #[test]
    fn no_fm_is_base_plus_offset() {
        let p = PitchInputs { offset: -12, input: (0.7, -0.2), ..inputs(60 << 7) };
        assert_eq!(mix_pitch(&p), (60 << 7) - 12);
    }

    #[test]
    fn fm_amount_scales_input_sum() {
        let p = PitchInputs { fm_amount: 10, input: (0.5, 0.25), ..inputs(4000) };
        // 10 * 256 * 0.75 = 1920
        assert_eq!(mix_pitch(&p), 5920);
    }

    #[test]
    fn routed_modulation_adds_to_fm_depth() {
        let p = PitchInputs { fm_weight: 1, depth: 1000, input: (0.5, 0.5), ..inputs(4000) };
        assert_eq!(mix_pitch(&p), 5000);

        let unrouted = PitchInputs { fm_weight: 0, ..p };
        assert_eq!(mix_pitch(&unrouted), 4000);
    }

    #[test]
    fn fm_term_truncates_toward_zero() {
        let p = PitchInputs { fm_amount: 1, input: (-0.001, 0.0), ..inputs(100) };
        // 100 - 0.256 -> 99.744 -> 99
        assert_eq!(mix_pitch(&p), 99);
    }

    #[test]
    fn extreme_fm_stays_in_range() {
        for (l, r) in [(1.0, 1.0), (-1.0, -1.0), (f32::MAX, f32::MAX), (f32::NAN, 0.0)] {
            for fm_amount in [-127, 127] {
                let p = PitchInputs {
                    fm_amount,
                    fm_weight: 1,
                    depth: u16::MAX as u32,
                    input: (l, r),
                    offset: 127,
                    base: PITCH_MAX,
                };
                let pitch = mix_pitch(&p) as i32;
                assert!((0..=PITCH_MAX).contains(&pitch), "pitch {} out of range", pitch);
            }
        }
    }

    #[test]
    fn offset_clamps_at_both_ends() {
        assert_eq!(mix_pitch(&PitchInputs { offset: -127, ..inputs(0) }), 0);
        assert_eq!(mix_pitch(&PitchInputs { offset: 127, ..inputs(PITCH_MAX) }), PITCH_MAX as i16);
    }
}
