//! CPAL-based audio output backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, Stream, StreamConfig};
use lily_ir::SAMPLE_RATE;
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::traits::{AudioError, AudioOutput};

/// CPAL-based mono output at the voice's fixed sample rate.
///
/// Each mono sample is copied to every device channel.
pub struct CpalOutput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    producer: HeapProd<f32>,
    running: Arc<AtomicBool>,
}

impl CpalOutput {
    /// Open the default device at 48 kHz.
    pub fn new() -> Result<(Self, HeapCons<f32>), AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoDevice)?;

        let supported = device
            .supported_output_configs()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?
            .filter(|c| c.sample_format() == SampleFormat::F32)
            .find(|c| {
                c.min_sample_rate().0 <= SAMPLE_RATE && SAMPLE_RATE <= c.max_sample_rate().0
            })
            .ok_or(AudioError::UnsupportedRate(SAMPLE_RATE))?;
        let config: StreamConfig = supported.with_sample_rate(SampleRate(SAMPLE_RATE)).into();

        tracing::info!(
            device = %device.name().unwrap_or_default(),
            channels = config.channels,
            rate = config.sample_rate.0,
            "audio output opened"
        );

        // About 100ms of mono samples
        let rb = HeapRb::<f32>::new(SAMPLE_RATE as usize / 10);
        let (producer, consumer) = rb.split();

        let output = Self {
            device,
            config,
            stream: None,
            producer,
            running: Arc::new(AtomicBool::new(false)),
        };

        Ok((output, consumer))
    }

    /// Build and start the audio stream.
    pub fn build_stream(&mut self, mut consumer: HeapCons<f32>) -> Result<(), AudioError> {
        let running = self.running.clone();
        let channels = self.config.channels as usize;

        let stream = self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !running.load(Ordering::Relaxed) {
                        data.fill(0.0);
                        return;
                    }

                    for chunk in data.chunks_mut(channels) {
                        let sample = consumer.try_pop().unwrap_or(0.0);
                        chunk.fill(sample);
                    }
                },
                |err| tracing::error!(%err, "audio stream error"),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        self.stream = Some(stream);

        Ok(())
    }

    /// Write all of `samples`, spinning while the ring buffer is full.
    ///
    /// Returns `false` if `stop` was raised before everything was queued.
    pub fn write_spin(&mut self, samples: &[f32], stop: &AtomicBool) -> bool {
        push_spin(&mut self.producer, samples, stop)
    }
}

/// Push `samples` into `producer`, spinning while it is full. Gives up once
/// `stop` is set, so a ring nobody drains cannot wedge the caller.
pub fn push_spin<P: Producer<Item = f32>>(producer: &mut P, samples: &[f32], stop: &AtomicBool) -> bool {
    let mut written = 0;
    while written < samples.len() {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let n = producer.push_slice(&samples[written..]);
        if n == 0 {
            std::hint::spin_loop();
        }
        written += n;
    }
    true
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn write(&mut self, samples: &[f32]) -> usize {
        self.producer.push_slice(samples)
    }

    fn start(&mut self) -> Result<(), AudioError> {
        self.running.store(true, Ordering::Relaxed);
        if let Some(ref stream) = self.stream {
            stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        if let Some(ref stream) = self.stream {
            stream.pause().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_spin_fills_ring_with_room() {
        let (mut prod, mut cons) = HeapRb::<f32>::new(8).split();
        let stop = AtomicBool::new(false);
        assert!(push_spin(&mut prod, &[0.25; 8], &stop));
        assert_eq!(cons.pop_iter().count(), 8);
    }

    #[test]
    fn push_spin_gives_up_on_undrained_ring_once_stopped() {
        let (mut prod, _cons) = HeapRb::<f32>::new(4).split();
        let stop = AtomicBool::new(false);
        assert!(push_spin(&mut prod, &[0.5; 4], &stop));

        // Ring is full and nothing consumes it.
        stop.store(true, Ordering::Relaxed);
        assert!(!push_spin(&mut prod, &[0.5; 16], &stop));
    }

    #[test]
    fn push_spin_returns_when_a_consumer_drains() {
        let (mut prod, mut cons) = HeapRb::<f32>::new(4).split();
        let stop = AtomicBool::new(false);
        let drain = std::thread::spawn(move || {
            let mut got = 0;
            while got < 64 {
                got += cons.pop_iter().count();
                std::thread::yield_now();
            }
            got
        });
        assert!(push_spin(&mut prod, &[1.0; 64], &stop));
        assert_eq!(drain.join().unwrap(), 64);
    }
}
