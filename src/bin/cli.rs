//! lily CLI: render a note to WAV or play the voice live.
//!
//! Usage:
//!   cargo run --bin lily-cli -- --variant nz --shape 44 --wav out.wav
//!   cargo run --bin lily-cli -- --note 60 --fm 40 --fm-hz 220 --play

use clap::Parser;
use lily_master::{Controller, FmInput, ParamId, RenderJob, Variant};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, process};
use tracing::Level;

/// Render or play the lily lo-fi oscillator voice
#[derive(Parser)]
#[command(name = "lily-cli")]
#[command(version)]
struct Cli {
    /// Oscillator variant: va, fm, rs, wt or nz
    #[arg(long, default_value = "rs")]
    variant: Variant,

    /// MIDI note
    #[arg(short, long, default_value_t = 48)]
    note: u8,

    #[arg(long, default_value_t = 100)]
    velocity: u8,

    /// Seconds until note-off
    #[arg(long, default_value_t = 0.5)]
    gate: f32,

    /// Total seconds rendered
    #[arg(short, long, default_value_t = 1.0)]
    length: f32,

    #[arg(long, allow_hyphen_values = true)]
    timbre: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    color: Option<i32>,
    #[arg(long)]
    shape: Option<i32>,
    /// 0 timbre, 1 color, 2 FM amount
    #[arg(long)]
    mod_target: Option<i32>,
    /// Modulation fade-in, in steps of 200 sub-chunks
    #[arg(long)]
    mod_delay: Option<i32>,
    /// FM amount
    #[arg(long, allow_hyphen_values = true)]
    fm: Option<i32>,
    /// Pitch offset
    #[arg(long, allow_hyphen_values = true)]
    pitch: Option<i32>,
    /// Bit depth level, 0 (2 bits) to 6 (16 bits)
    #[arg(long)]
    bits: Option<i32>,
    /// Sample rate level, 0 (4 kHz) to 5 (48 kHz)
    #[arg(long)]
    rate: Option<i32>,

    /// Host modulation LFO rate in Hz
    #[arg(long, default_value_t = 0.5)]
    lfo_hz: f32,

    /// Feed a sine of this frequency to the FM input
    #[arg(long)]
    fm_hz: Option<f32>,

    /// Write the render to this WAV file
    #[arg(long, conflicts_with = "play")]
    wav: Option<PathBuf>,

    /// Play through the default audio device
    #[arg(long)]
    play: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn params(&self) -> [(ParamId, Option<i32>); 9] {
        [
            (ParamId::Timbre, self.timbre),
            (ParamId::Color, self.color),
            (ParamId::Shape, self.shape),
            (ParamId::ModTarget, self.mod_target),
            (ParamId::ModDelay, self.mod_delay),
            (ParamId::FmAmount, self.fm),
            (ParamId::Pitch, self.pitch),
            (ParamId::Resolution, self.bits),
            (ParamId::SampleRate, self.rate),
        ]
    }

    fn job(&self) -> RenderJob {
        let rate = lily_ir::SAMPLE_RATE as f32;
        RenderJob {
            note: self.note,
            velocity: self.velocity,
            gate_samples: (self.gate.max(0.0) * rate) as usize,
            length_samples: (self.length.max(0.0) * rate) as usize,
            lfo_hz: self.lfo_hz,
            fm: self.fm_hz.map(|hz| FmInput { hz, level: 0.5 }),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut ctrl = Controller::new(cli.variant);
    for (id, value) in cli.params() {
        if let Some(value) = value {
            let stored = ctrl.set_param(id, value);
            if stored != value {
                tracing::warn!(param = ?id, requested = value, stored, "value clamped");
            }
        }
    }

    println!("Variant: {}", cli.variant);
    let shape = ctrl.param(ParamId::Shape);
    for id in ParamId::ALL {
        let value = ctrl.param(id);
        println!(
            "  {:<5} {}",
            lily_ir::param_info(cli.variant, id).name,
            lily_ir::display_value(cli.variant, id, value, shape)
        );
    }

    if cli.play {
        play_audio(&mut ctrl, &cli);
    } else {
        let path = cli.wav.clone().unwrap_or_else(|| PathBuf::from("lily.wav"));
        render_to_wav(&ctrl, &cli.job(), &path);
    }
}

fn play_audio(ctrl: &mut Controller, cli: &Cli) {
    ctrl.play(cli.lfo_hz);
    println!("Playing note {}...", cli.note);

    ctrl.note_on(cli.note, cli.velocity);
    std::thread::sleep(Duration::from_secs_f32(cli.gate.max(0.0)));
    ctrl.note_off(cli.note);
    std::thread::sleep(Duration::from_secs_f32((cli.length - cli.gate).max(0.0)));

    if !ctrl.is_playing() {
        eprintln!("Playback ended early; see log for details");
        process::exit(1);
    }
    ctrl.stop();
    println!("Done.");
}

fn render_to_wav(ctrl: &Controller, job: &RenderJob, path: &Path) {
    println!("Rendering {} samples to {}...", job.length_samples, path.display());

    let wav = ctrl.render_to_wav(job).unwrap_or_else(|e| {
        eprintln!("Render failed: {}", e);
        process::exit(1);
    });

    fs::write(path, &wav).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", path.display(), e);
        process::exit(1);
    });

    println!("Done.");
}
