//! Criterion benchmarks for the voice render path.
//!
//! Run with: cargo bench -p lily-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lily_engine::{BasicOscillator, Voice};
use lily_ir::{OscContext, ParamId, RuntimeDesc, Variant};

const FRAMES: usize = 480; // 10ms at 48kHz

fn voice(variant: Variant) -> Voice<BasicOscillator> {
    let mut voice = Voice::init(&RuntimeDesc::native(), variant, BasicOscillator::new()).unwrap();
    voice.render(&OscContext::default(), &[], &mut []);
    voice
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(FRAMES as u64));

    let input = vec![0.25f32; FRAMES * 2];
    let ctx = OscContext::new(0x8000_0000, 60 << 8);

    for variant in [Variant::Va, Variant::Rs, Variant::Nz] {
        let mut v = voice(variant);
        v.set_parameter(ParamId::FmAmount, 40);
        v.set_parameter(ParamId::ModTarget, 2);
        v.note_on(60, 100);
        let mut out = vec![0.0f32; FRAMES];
        group.bench_with_input(BenchmarkId::new("variant", variant.name()), &variant, |b, _| {
            b.iter(|| {
                v.render(&ctx, &input, &mut out);
                black_box(&out);
            })
        });
    }
    group.finish();
}

fn bench_lofi(c: &mut Criterion) {
    let mut group = c.benchmark_group("lofi");
    group.throughput(Throughput::Elements(FRAMES as u64));
    let ctx = OscContext::for_note(48);

    for (bits, rate) in [(6, 5), (0, 0)] {
        let mut v = voice(Variant::Va);
        v.set_parameter(ParamId::Resolution, bits);
        v.set_parameter(ParamId::SampleRate, rate);
        let mut out = vec![0.0f32; FRAMES];
        let id = format!("bits{}_rate{}", bits, rate);
        group.bench_function(id, |b| {
            b.iter(|| {
                v.render(&ctx, &[], &mut out);
                black_box(&out);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_lofi);
criterion_main!(benches);
