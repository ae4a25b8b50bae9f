//! Headless controller for the lily oscillator voice.
//!
//! Owns a variant and its parameter set, renders notes offline, and plays
//! the voice live on a dedicated thread. The CLI and tests share this API.

mod error;
mod job;
mod lfo;
mod wav;

use lily_audio::{AudioOutput, CpalOutput};
use lily_engine::{BasicOscillator, Voice};
use lily_ir::{param_info, Command, InitError, OscContext, RuntimeDesc, PARAM_COUNT};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

// Re-export common types so callers don't need lily-ir directly.
pub use error::RenderError;
pub use job::{FmInput, RenderJob};
pub use lfo::HostLfo;
pub use lily_ir::{ParamId, Variant};
pub use wav::{samples_to_wav, write_wav};

use job::SineInput;

/// Frames per render call, both offline and live.
pub const BLOCK_FRAMES: usize = 64;

/// Pending control commands for the live voice.
const COMMAND_CAPACITY: usize = 256;

/// Headless voice controller: owns the configuration and manages playback.
pub struct Controller {
    variant: Variant,
    params: [i32; PARAM_COUNT],
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    commands: HeapProd<Command>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            params: lily_ir::default_values(variant),
            playback: None,
        }
    }

    // --- Configuration ---

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Switch variant. Stops playback and restores the variant's defaults.
    pub fn set_variant(&mut self, variant: Variant) {
        self.stop();
        self.variant = variant;
        self.params = lily_ir::default_values(variant);
    }

    /// Store a parameter (clamped) and forward it to the live voice.
    pub fn set_param(&mut self, id: ParamId, value: i32) -> i32 {
        let value = param_info(self.variant, id).clamp(value);
        self.params[id.index()] = value;
        self.send(Command::set(id, value));
        value
    }

    pub fn param(&self, id: ParamId) -> i32 {
        self.params[id.index()]
    }

    // --- Offline rendering ---

    /// Render one note from a fresh voice.
    pub fn render_samples(&self, job: &RenderJob) -> Result<Vec<f32>, RenderError> {
        let mut voice = configured_voice(self.variant, &self.params)?;
        let pitch = OscContext::for_note(job.note).pitch;
        let mut lfo = HostLfo::new(job.lfo_hz);
        let mut fm = job.fm.map(SineInput::new);

        let mut out = vec![0.0f32; job.length_samples];
        let mut input = [0.0f32; BLOCK_FRAMES * 2];
        let mut gate_open = true;
        let mut pos = 0;

        voice.note_on(job.note, job.velocity);
        while pos < out.len() {
            let mut frames = BLOCK_FRAMES.min(out.len() - pos);
            if gate_open {
                if pos >= job.gate_samples {
                    voice.note_off(job.note);
                    gate_open = false;
                } else {
                    frames = frames.min(job.gate_samples - pos);
                }
            }

            let input = &mut input[..frames * 2];
            match fm.as_mut() {
                Some(sine) => sine.fill(input),
                None => input.fill(0.0),
            }
            voice.render(&lfo.context(pitch), input, &mut out[pos..pos + frames]);
            lfo.advance(frames);
            pos += frames;
        }

        tracing::info!(variant = self.variant.name(), samples = out.len(), "render finished");
        Ok(out)
    }

    pub fn render_to_wav(&self, job: &RenderJob) -> Result<Vec<u8>, RenderError> {
        let samples = self.render_samples(job)?;
        Ok(wav::samples_to_wav(&samples)?)
    }

    // --- Real-time playback ---

    /// Start the live voice. Notes arrive through [`Controller::note_on`].
    pub fn play(&mut self, lfo_hz: f32) {
        self.stop();

        let (commands, consumer) = HeapRb::<Command>::new(COMMAND_CAPACITY).split();
        let stop_signal = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));

        let stop = stop_signal.clone();
        let done = finished.clone();
        let variant = self.variant;
        let params = self.params;

        let thread = std::thread::spawn(move || {
            audio_thread(variant, params, lfo_hz, consumer, stop, done);
        });

        tracing::info!(variant = variant.name(), "playback started");
        self.playback = Some(PlaybackHandle {
            stop_signal,
            finished,
            commands,
            thread: Some(thread),
        });
    }

    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                let _ = handle.join();
            }
            tracing::info!("playback stopped");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.finished.load(Ordering::Relaxed))
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        self.send(Command::NoteOn { note, velocity });
    }

    pub fn note_off(&mut self, note: u8) {
        self.send(Command::NoteOff { note });
    }

    /// Release all held notes on the live voice.
    pub fn reset(&mut self) {
        self.send(Command::Reset);
    }

    fn send(&mut self, command: Command) {
        if let Some(pb) = self.playback.as_mut() {
            if pb.commands.try_push(command).is_err() {
                tracing::warn!(?command, "command ring full, dropped");
            }
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Commands restoring `params`, shape last so hidden-shape companions are
/// already in place.
fn param_commands(params: &[i32; PARAM_COUNT]) -> impl Iterator<Item = Command> + '_ {
    ParamId::ALL
        .into_iter()
        .filter(|id| *id != ParamId::Shape)
        .chain([ParamId::Shape])
        .map(|id| Command::set(id, params[id.index()]))
}

/// A voice past its boot guard with `params` applied.
fn configured_voice(
    variant: Variant,
    params: &[i32; PARAM_COUNT],
) -> Result<Voice<BasicOscillator>, InitError> {
    let mut voice = Voice::init(&RuntimeDesc::native(), variant, BasicOscillator::new())?;
    // Writes are only accepted once the voice has entered a render call.
    voice.render(&OscContext::default(), &[], &mut []);
    voice.apply_all(param_commands(params));
    Ok(voice)
}

fn audio_thread(
    variant: Variant,
    params: [i32; PARAM_COUNT],
    lfo_hz: f32,
    mut commands: HeapCons<Command>,
    stop_signal: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
) {
    let mut voice = match configured_voice(variant, &params) {
        Ok(voice) => voice,
        Err(e) => {
            tracing::error!(error = %e, "voice init failed");
            finished.store(true, Ordering::Relaxed);
            return;
        }
    };

    let (mut output, consumer) = match CpalOutput::new() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "audio output unavailable");
            finished.store(true, Ordering::Relaxed);
            return;
        }
    };
    if let Err(e) = output.build_stream(consumer) {
        tracing::error!(error = %e, "audio stream failed");
        finished.store(true, Ordering::Relaxed);
        return;
    }
    if let Err(e) = output.start() {
        tracing::error!(error = %e, "audio stream would not start");
        finished.store(true, Ordering::Relaxed);
        return;
    }

    let mut lfo = HostLfo::new(lfo_hz);
    let mut pitch = 0u16;
    let input = [0.0f32; BLOCK_FRAMES * 2];
    let mut block = [0.0f32; BLOCK_FRAMES];

    while !stop_signal.load(Ordering::Relaxed) {
        for command in commands.pop_iter() {
            if let Command::NoteOn { note, .. } = command {
                pitch = OscContext::for_note(note).pitch;
            }
            voice.apply(command);
        }

        let ctx = lfo.context(pitch);
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| voice.render(&ctx, &input, &mut block));
        #[cfg(not(feature = "alloc_check"))]
        voice.render(&ctx, &input, &mut block);
        lfo.advance(BLOCK_FRAMES);

        if !output.write_spin(&block, &stop_signal) {
            break;
        }
    }

    let _ = output.stop();
    finished.store(true, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use std::io::Cursor;

    fn job(length: usize) -> RenderJob {
        RenderJob { length_samples: length, gate_samples: length / 2, ..RenderJob::default() }
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0, |m, s| m.max(s.abs()))
    }

    #[test]
    fn render_has_requested_length() {
        let ctrl = Controller::new(Variant::Va);
        for length in [0, 1, 63, 64, 1000] {
            assert_eq!(ctrl.render_samples(&job(length)).unwrap().len(), length);
        }
    }

    #[test]
    fn every_variant_makes_sound() {
        for variant in Variant::ALL {
            let ctrl = Controller::new(variant);
            let samples = ctrl.render_samples(&job(4800)).unwrap();
            assert!(peak(&samples) > 0.1, "{} is silent", variant);
            assert!(samples.iter().all(|s| (-1.0..1.0).contains(s)));
        }
    }

    #[test]
    fn controller_params_reach_the_voice() {
        let mut ctrl = Controller::new(Variant::Va);
        assert_eq!(ctrl.set_param(ParamId::Resolution, 0), 0);
        let samples = ctrl.render_samples(&job(2000)).unwrap();
        for s in samples {
            assert_eq!((s * 32768.0) as i32 % 0x4000, 0);
        }
    }

    #[test]
    fn decimated_render_holds_samples() {
        let mut ctrl = Controller::new(Variant::Va);
        ctrl.set_param(ParamId::SampleRate, 0);
        let samples = ctrl.render_samples(&job(1200)).unwrap();
        for window in samples.chunks(12) {
            assert!(window.iter().all(|s| *s == window[0]));
        }
    }

    #[test]
    fn set_param_clamps() {
        let mut ctrl = Controller::new(Variant::Rs);
        assert_eq!(ctrl.set_param(ParamId::Shape, 0), 28);
        assert_eq!(ctrl.set_param(ParamId::FmAmount, 1000), 127);
        assert_eq!(ctrl.param(ParamId::FmAmount), 127);
    }

    #[test]
    fn set_variant_restores_defaults() {
        let mut ctrl = Controller::new(Variant::Rs);
        ctrl.set_param(ParamId::Pitch, 40);
        ctrl.set_variant(Variant::Wt);
        assert_eq!(ctrl.param(ParamId::Pitch), 0);
        assert_eq!(ctrl.param(ParamId::Shape), 37);
    }

    #[test]
    fn shape_is_applied_after_its_companions() {
        let mut params = lily_ir::default_values(Variant::Nz);
        params[ParamId::Timbre.index()] = -256;
        params[ParamId::Color.index()] = 255;
        params[ParamId::FmAmount.index()] = 123;
        params[ParamId::Shape.index()] = 47;
        let voice = configured_voice(Variant::Nz, &params).unwrap();
        assert_eq!(voice.parameter_value(ParamId::Shape), 47);
        assert_eq!(voice.parameter_label(ParamId::Shape, 47), Some("Q-Mark"));
    }

    #[test]
    fn fm_input_changes_output() {
        let ctrl = Controller::new(Variant::Va);
        let dry = ctrl.render_samples(&job(4800)).unwrap();
        let mut ctrl = Controller::new(Variant::Va);
        ctrl.set_param(ParamId::FmAmount, 100);
        let wet = ctrl
            .render_samples(&RenderJob { fm: Some(FmInput { hz: 110.0, level: 0.5 }), ..job(4800) })
            .unwrap();
        assert_ne!(dry, wet);
    }

    #[test]
    fn wav_holds_render() {
        let ctrl = Controller::new(Variant::Rs);
        let wav = ctrl.render_to_wav(&job(4800)).unwrap();
        let reader = WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 48_000);
        assert_eq!(reader.len(), 4800);
    }

    #[test]
    fn commands_without_playback_are_dropped() {
        let mut ctrl = Controller::new(Variant::Rs);
        ctrl.note_on(60, 100);
        ctrl.note_off(60);
        ctrl.reset();
        assert!(!ctrl.is_playing());
    }
}
