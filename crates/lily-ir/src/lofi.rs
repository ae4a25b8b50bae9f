//! Lookup tables for the output bit-crush and sample-and-hold stage.

/// Sample masks indexed by the `Resolution` parameter.
pub const BIT_REDUCTION_MASKS: [u16; 7] = [0xc000, 0xe000, 0xf000, 0xf800, 0xff00, 0xfff0, 0xffff];

/// Hold-repeat counts indexed by the `SampleRate` parameter (48 kHz host).
pub const DECIMATION_FACTORS: [u16; 6] = [12, 8, 6, 3, 2, 1];

/// Mask for a resolution level, saturating at the table ends.
pub fn bit_mask(resolution: i32) -> u16 {
    let i = resolution.clamp(0, BIT_REDUCTION_MASKS.len() as i32 - 1) as usize;
    BIT_REDUCTION_MASKS[i]
}

/// Decimation factor for a rate level, saturating at the table ends.
pub fn decimation_factor(rate: i32) -> u16 {
    let i = rate.clamp(0, DECIMATION_FACTORS.len() as i32 - 1) as usize;
    DECIMATION_FACTORS[i]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_levels_are_transparent() {
        assert_eq!(bit_mask(6), 0xffff);
        assert_eq!(decimation_factor(5), 1);
    }

    #[test]
    fn out_of_range_levels_saturate() {
        assert_eq!(bit_mask(-3), 0xc000);
        assert_eq!(bit_mask(99), 0xffff);
        assert_eq!(decimation_factor(-1), 12);
        assert_eq!(decimation_factor(40), 1);
    }

    #[test]
    fn factors_divide_host_rate() {
        for f in DECIMATION_FACTORS {
            assert_eq!(48_000 % f as u32, 0);
        }
    }
}
