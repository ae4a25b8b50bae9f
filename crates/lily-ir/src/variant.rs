//! Build flavours of the voice and the shared shape label table.
//!
//! Every flavour drives the same generator; they differ only in which
//! contiguous slice of the 48 shapes is exposed.

use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;

/// Total number of generator shapes across all variants.
pub const SHAPE_COUNT: usize = 48;

/// Display labels for every generator shape, indexed by shape number.
pub static SHAPE_LABELS: [&str; SHAPE_COUNT] = [
    // Va: 0..=15
    "CSSAW", "Morph", "SawSqr", "Folded", "Combx2", "SqrSub", "SawSub", "SqrSync",
    "SawSync", "3xSaw", "3xSqr", "3xTri", "3xSin", "RingSin", "Swarm", "SawComb",
    // Fm: 16..=27
    "Toy-Lofi", "PhzLPF", "PhzPkF", "PhzBPF", "PhzHPF", "Vosim", "Vowel", "Vwl-FOF",
    "AddHarm", "PlainFM", "FB-FM", "ChaoticFM",
    // Rs: 28..=36
    "Plucked", "Bowed", "Blown", "Fluted", "Bells", "MtlDrum", "808Kick", "Cymbal",
    "Snare",
    // Wt: 37..=40
    "WaveTbl", "WaveMap", "WavLine", "WvTblx4",
    // Nz: 41..=47
    "FltdNois", "TwinQ", "Clocked", "GrnlrCld", "PartclNz", "Modem", "Q-Mark",
];

/// Which slice of the shape table a build exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Virtual analog shapes.
    Va,
    /// FM, formant and phase-distortion shapes.
    Fm,
    /// Physical-modelling and percussion shapes.
    #[default]
    Rs,
    /// Wavetable shapes.
    Wt,
    /// Noise shapes, with one locked shape.
    Nz,
}

impl Variant {
    pub const ALL: [Variant; 5] = [Variant::Va, Variant::Fm, Variant::Rs, Variant::Wt, Variant::Nz];

    /// Shapes selectable in this variant.
    pub fn shapes(self) -> RangeInclusive<u8> {
        match self {
            Variant::Va => 0..=15,
            Variant::Fm => 16..=27,
            Variant::Rs => 28..=36,
            Variant::Wt => 37..=40,
            Variant::Nz => 41..=47,
        }
    }

    /// Shape selected at init.
    pub fn default_shape(self) -> u8 {
        *self.shapes().start()
    }

    /// The last shape of the range when it is locked behind a control combination.
    pub fn hidden_shape(self) -> Option<u8> {
        match self {
            Variant::Nz => Some(47),
            _ => None,
        }
    }

    /// Lower-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Va => "va",
            Variant::Fm => "fm",
            Variant::Rs => "rs",
            Variant::Wt => "wt",
            Variant::Nz => "nz",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a variant name is not recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseVariantError;

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown variant (expected va, fm, rs, wt or nz)")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseVariantError {}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or(ParseVariantError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_tile_the_label_table() {
        let mut next = 0u8;
        for v in Variant::ALL {
            let shapes = v.shapes();
            assert_eq!(*shapes.start(), next, "{v} starts where the previous ends");
            next = shapes.end() + 1;
        }
        assert_eq!(next as usize, SHAPE_COUNT);
    }

    #[test]
    fn labels_are_dense() {
        assert!(SHAPE_LABELS.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("NZ".parse::<Variant>(), Ok(Variant::Nz));
        assert_eq!("wt".parse::<Variant>(), Ok(Variant::Wt));
        assert_eq!("plaits".parse::<Variant>(), Err(ParseVariantError));
    }

    #[test]
    fn only_noise_variant_hides_a_shape() {
        for v in Variant::ALL {
            match v {
                Variant::Nz => assert_eq!(v.hidden_shape(), Some(47)),
                _ => assert_eq!(v.hidden_shape(), None),
            }
        }
    }
}
