//! Fixed-point modulation source.
//!
//! Follows the host's 16-bit modulation phase once per sub-chunk and
//! attenuates it while the post-trigger delay counts down.

/// Depth of the modulation for a phase while `countdown` chunks remain.
///
/// `(phase << 16) / (1024 + countdown) >> 6`. With no countdown this is the
/// phase itself; a long countdown scales it towards zero, so modulation
/// fades in rather than switching on.
pub fn delayed_depth(phase: u16, countdown: u32) -> u32 {
    ((phase as u32) << 16) / 1024u32.saturating_add(countdown) >> 6
}

/// Running modulation phase and fade-in countdown.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModulationSource {
    /// Phase reached at the end of the previous sub-chunk.
    phase: u16,
    /// Per-sub-chunk phase step for the current block.
    increment: u16,
    /// Sub-chunks left before modulation reaches full depth.
    countdown: u32,
}

impl ModulationSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the fade-in (note-on).
    pub fn arm(&mut self, countdown: u32) {
        self.countdown = countdown;
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// Set up the per-chunk step towards the host phase `target` for a block
    /// of `frames` samples. The phase advances forward, wrapping at 16 bits.
    pub fn begin_block(&mut self, target: u16, frames: usize) {
        // Host phase only advances, so the span is taken forward (wrapping).
        // A target behind `phase` steps the long way round instead of
        // backwards; see the phase-follow note in DESIGN.md.
        let span = target.wrapping_sub(self.phase) as usize;
        self.increment = if frames == 0 { 0 } else { (span / frames) as u16 };
    }

    /// Depth for the next sub-chunk; steps the countdown and phase.
    pub fn next_chunk(&mut self) -> u32 {
        let depth = delayed_depth(self.phase, self.countdown);
        if self.countdown > 0 {
            self.countdown -= 1;
        }
        self.phase = self.phase.wrapping_add(self.increment);
        depth
    }
}
