//! Allocation-free render path tests.
//!
//! These tests verify that `Voice::render()` does not allocate. They sweep
//! every variant, odd block sizes, full FM and the lo-fi settings to catch
//! allocations hidden behind particular parameter combinations.
//!
//! Just run `cargo test`; no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use lily_engine::{BasicOscillator, Voice};
use lily_ir::{OscContext, ParamId, RuntimeDesc, Variant};

fn started(variant: Variant) -> Voice<BasicOscillator> {
    let mut voice = Voice::init(&RuntimeDesc::native(), variant, BasicOscillator::new()).unwrap();
    voice.render(&OscContext::default(), &[], &mut []);
    voice
}

/// Render `blocks` blocks of `frames`, aborting on any heap allocation.
fn assert_render_alloc_free(voice: &mut Voice<BasicOscillator>, frames: usize, blocks: usize) {
    let input = vec![0.8f32; frames * 2];
    let mut output = vec![0.0f32; frames];
    let mut phase = 0u32;

    assert_no_alloc(|| {
        for _ in 0..blocks {
            voice.render(&OscContext::new(phase, 60 << 8), &input, &mut output);
            phase = phase.wrapping_add(0x0100_0000);
        }
    });
}

#[test]
fn every_variant_alloc_free() {
    for variant in Variant::ALL {
        let mut voice = started(variant);
        voice.note_on(60, 100);
        assert_render_alloc_free(&mut voice, 64, 750);
    }
}

#[test]
fn odd_block_sizes_alloc_free() {
    let mut voice = started(Variant::Va);
    voice.note_on(48, 100);
    for frames in [1, 23, 24, 25, 47, 97, 480] {
        assert_render_alloc_free(&mut voice, frames, 20);
    }
}

#[test]
fn full_modulation_and_lofi_alloc_free() {
    let mut voice = started(Variant::Nz);
    voice.set_parameter(ParamId::FmAmount, 127);
    voice.set_parameter(ParamId::ModTarget, 2);
    voice.set_parameter(ParamId::ModDelay, 31);
    voice.set_parameter(ParamId::Resolution, 0);
    voice.set_parameter(ParamId::SampleRate, 0);
    voice.note_on(72, 127);
    assert_render_alloc_free(&mut voice, 64, 1500);
}
