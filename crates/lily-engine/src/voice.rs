//! The voice: drives a tone generator from parameters, modulation and the
//! host context, and post-processes its output.
//!
//! `render` is the real-time entry point. It never allocates and never
//! blocks; all scratch buffers live on the stack and are sized to the
//! generator's block.

use lily_ir::{
    bit_mask, decimation_factor, parameter_label, Command, InitError, OscContext, ParamId,
    RuntimeDesc, Variant,
};

use crate::bank::{BootGuard, ParameterBank, Routing, WriteOutcome};
use crate::gate::Gate;
use crate::modulation::ModulationSource;
use crate::pitch::{mix_pitch, PitchInputs};
use crate::quantizer::OutputQuantizer;
use crate::tone::{sub_chunks, ToneGenerator, CONTROL_MAX, TONE_BLOCK_SIZE};

/// A single monophonic oscillator voice.
pub struct Voice<G: ToneGenerator> {
    generator: G,
    bank: ParameterBank,
    boot: BootGuard,
    modulation: ModulationSource,
    gate: Gate,
    quantizer: OutputQuantizer,
    /// Pitch of the last note-on, in generator units.
    note_pitch: i16,
}

impl<G: ToneGenerator> Voice<G> {
    /// Validate the host and build a voice around `generator`.
    pub fn init(desc: &RuntimeDesc, variant: Variant, mut generator: G) -> Result<Self, InitError> {
        if let Err(e) = desc.validate() {
            tracing::warn!(error = %e, "host rejected");
            return Err(e);
        }

        let bank = ParameterBank::new(variant);
        generator.init();
        generator.set_shape(bank.value(ParamId::Shape) as u8);
        tracing::debug!(variant = variant.name(), shape = bank.value(ParamId::Shape), "voice initialised");

        Ok(Self {
            generator,
            bank,
            boot: BootGuard::default(),
            modulation: ModulationSource::new(),
            gate: Gate::new(),
            quantizer: OutputQuantizer::new(),
            note_pitch: 0,
        })
    }

    /// Render `output.len()` mono samples.
    ///
    /// `input` is the host's stereo-interleaved input. It is consumed one
    /// frame per sub-chunk: sub-chunk `k` reads frame `k` for FM. Missing
    /// input frames read as silence.
    pub fn render(&mut self, ctx: &OscContext, input: &[f32], output: &mut [f32]) {
        self.boot.open();

        let frames = output.len();
        if frames == 0 {
            return;
        }
        self.modulation.begin_block(ctx.mod_phase(), frames);

        let factor = decimation_factor(self.bank.value(ParamId::SampleRate));
        let mask = bit_mask(self.bank.value(ParamId::Resolution));
        let sync = [0u8; TONE_BLOCK_SIZE];
        let mut raw = [0i16; TONE_BLOCK_SIZE];

        for (chunk, range) in sub_chunks(frames).enumerate() {
            let len = range.len();
            let depth = self.modulation.next_chunk();
            let routing = self.bank.routing();

            let timbre = modulated(self.bank.timbre(), routing.timbre, depth);
            let color = modulated(self.bank.color(), routing.color, depth);
            self.generator.set_parameters(timbre, color);

            let frame = 2 * chunk;
            let pitch = mix_pitch(&PitchInputs {
                base: ctx.base_pitch(),
                fm_amount: self.bank.value(ParamId::FmAmount),
                fm_weight: routing.fm,
                depth,
                input: (
                    input.get(frame).copied().unwrap_or(0.0),
                    input.get(frame + 1).copied().unwrap_or(0.0),
                ),
                offset: self.bank.value(ParamId::Pitch),
            });
            self.generator.set_pitch(pitch);

            self.generator.render(&sync[..len], &mut raw[..len]);
            self.quantizer.process(&raw[..len], &mut output[range], factor, mask);
        }
    }

    /// Write a parameter. Ignored until the first `render` call.
    pub fn set_parameter(&mut self, id: ParamId, value: i32) -> WriteOutcome {
        if !self.boot.is_open() {
            tracing::debug!(param = ?id, value, "write before first render ignored");
            return WriteOutcome::IgnoredBeforeFirstRender;
        }
        let stored = self.bank.write(id, value);
        if id == ParamId::Shape {
            self.generator.set_shape(stored as u8);
        }
        WriteOutcome::Applied(stored)
    }

    /// Last stored value of a parameter.
    pub fn parameter_value(&self, id: ParamId) -> i32 {
        self.bank.value(id)
    }

    /// Display label for `value` of parameter `id`, if it has one.
    pub fn parameter_label(&self, id: ParamId, value: i32) -> Option<&'static str> {
        parameter_label(self.bank.variant(), id, value, self.bank.value(ParamId::Shape))
    }

    pub fn note_on(&mut self, note: u8, _velocity: u8) {
        self.note_pitch = (note as i16) << 7;
        self.gate.on();
        self.generator.strike();
        self.modulation.arm(self.bank.delay_samples());
    }

    pub fn note_off(&mut self, _note: u8) {
        self.gate.off();
    }

    /// Drop all held notes.
    pub fn reset(&mut self) {
        self.gate.reset();
    }

    /// Apply one control command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetParam { id, value } => {
                self.set_parameter(id, value);
            }
            Command::NoteOn { note, velocity } => self.note_on(note, velocity),
            Command::NoteOff { note } => self.note_off(note),
            Command::Reset => self.reset(),
        }
    }

    /// Apply commands in order (used at block boundaries).
    pub fn apply_all<I: IntoIterator<Item = Command>>(&mut self, commands: I) {
        for command in commands {
            self.apply(command);
        }
    }

    pub fn variant(&self) -> Variant {
        self.bank.variant()
    }

    /// Whether the first render has happened and writes are accepted.
    pub fn is_started(&self) -> bool {
        self.boot.is_open()
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn routing(&self) -> Routing {
        self.bank.routing()
    }

    /// Sub-chunks left before modulation reaches full depth.
    pub fn modulation_countdown(&self) -> u32 {
        self.modulation.countdown()
    }

    /// Pitch of the last note-on (`note << 7`).
    pub fn last_note_pitch(&self) -> i16 {
        self.note_pitch
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

/// Base control plus routed modulation, clamped to the generator domain.
fn modulated(base: i32, weight: i32, depth: u32) -> i16 {
    (base + weight * depth as i32).clamp(0, CONTROL_MAX) as i16
}
