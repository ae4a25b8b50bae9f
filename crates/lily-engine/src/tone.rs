//! Tone generator trait: the oscillator the voice drives.
//!
//! The voice never reads generator internals. It pushes shape, controls and
//! pitch, strikes on note-on, and asks for at most [`TONE_BLOCK_SIZE`]
//! samples per call.

use core::ops::Range;

/// Capacity of the generator's internal buffer, in samples.
pub const TONE_BLOCK_SIZE: usize = 24;

/// Largest timbre/color value a generator accepts.
pub const CONTROL_MAX: i32 = 32767;

/// Largest pitch code a generator accepts (MIDI note << 7).
pub const PITCH_MAX: i32 = 16383;

/// Core trait for tone generators.
pub trait ToneGenerator: Send {
    /// Reset all internal state.
    fn init(&mut self);
    /// Select a shape from the shared shape table.
    fn set_shape(&mut self, shape: u8);
    /// Set both timbre controls, each `0..=CONTROL_MAX`.
    fn set_parameters(&mut self, timbre: i16, color: i16);
    /// Set pitch, `0..=PITCH_MAX`.
    fn set_pitch(&mut self, pitch: i16);
    /// Restart excitation / envelope state.
    fn strike(&mut self);
    /// Render `buffer.len()` samples. `sync` has the same length.
    fn render(&mut self, sync: &[u8], buffer: &mut [i16]);
}

/// Split `frames` into consecutive sub-chunks of at most [`TONE_BLOCK_SIZE`].
pub fn sub_chunks(frames: usize) -> impl Iterator<Item = Range<usize>> {
    (0..frames)
        .step_by(TONE_BLOCK_SIZE)
        .map(move |start| start..(start + TONE_BLOCK_SIZE).min(frames))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_has_full_chunks() {
        let chunks: Vec<_> = sub_chunks(48).collect();
        assert_eq!(chunks, [0..24, 24..48]);
    }

    #[test]
    fn remainder_goes_in_last_chunk() {
        let chunks: Vec<_> = sub_chunks(64).collect();
        assert_eq!(chunks, [0..24, 24..48, 48..64]);
    }

    #[test]
    fn short_block_is_one_chunk() {
        let chunks: Vec<_> = sub_chunks(5).collect();
        assert_eq!(chunks, [0..5]);
    }

    #[test]
    fn empty_block_has_no_chunks() {
        assert_eq!(sub_chunks(0).count(), 0);
    }

    #[test]
    fn chunk_count_is_ceiling() {
        for frames in 1..200 {
            let n = sub_chunks(frames).count();
            assert_eq!(n, frames.div_ceil(TONE_BLOCK_SIZE));
            assert_eq!(sub_chunks(frames).map(|r| r.len()).sum::<usize>(), frames);
        }
    }
}
