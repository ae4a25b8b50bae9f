//! Output stage: sample-and-hold decimation, bit masking and f32 conversion.

/// Held sample plus the running sample index used for decimation.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputQuantizer {
    /// Samples emitted since init (wraps).
    counter: u32,
    /// Most recent masked sample.
    held: i16,
}

impl OutputQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `raw` generator samples into `out`.
    ///
    /// The held sample refreshes to `raw & mask` whenever the running index
    /// is a multiple of `factor`; every position emits the held value.
    /// `out` and `raw` must have the same length.
    pub fn process(&mut self, raw: &[i16], out: &mut [f32], factor: u16, mask: u16) {
        let factor = factor.max(1) as u32;
        for (sample, dst) in raw.iter().zip(out.iter_mut()) {
            if self.counter % factor == 0 {
                self.held = (*sample as u16 & mask) as i16;
            }
            *dst = self.held as f32 / 32768.0;
            self.counter = self.counter.wrapping_add(1);
        }
    }

    pub fn held(&self) -> i16 {
        self.held
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }
}
