//! Control messages handed from a control context to the render context.

use crate::param::ParamId;

/// A control-surface action, applied at the next block boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write a parameter (clamped on apply)
    SetParam { id: ParamId, value: i32 },
    /// Strike the generator and re-arm the modulation delay
    NoteOn { note: u8, velocity: u8 },
    /// Release one held note
    NoteOff { note: u8 },
    /// Drop all held notes
    Reset,
}

impl Command {
    /// Shorthand for a parameter write.
    pub fn set(id: ParamId, value: i32) -> Self {
        Self::SetParam { id, value }
    }
}
