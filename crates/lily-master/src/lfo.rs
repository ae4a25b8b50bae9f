//! Stand-in for the host's shape LFO and pitch bus.

use lily_ir::{OscContext, SAMPLE_RATE};

/// Free-running 32-bit phase, advanced per rendered block.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostLfo {
    phase: u32,
    increment: u32,
}

impl HostLfo {
    pub fn new(rate_hz: f32) -> Self {
        let step = rate_hz.max(0.0) / SAMPLE_RATE as f32 * 4_294_967_296.0;
        Self { phase: 0, increment: step.min(u32::MAX as f32) as u32 }
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Context for the next block at the given pitch bus value.
    pub fn context(&self, pitch: u16) -> OscContext {
        OscContext::new(self.phase, pitch)
    }

    pub fn advance(&mut self, frames: usize) {
        self.phase = self.phase.wrapping_add(self.increment.wrapping_mul(frames as u32));
    }
}
