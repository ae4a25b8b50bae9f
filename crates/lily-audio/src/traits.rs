//! Audio output trait and error types.

/// Error type for audio operations.
#[derive(Debug)]
pub enum AudioError {
    /// Failed to query or configure the device
    DeviceInit(String),
    /// The device cannot run at the voice's sample rate
    UnsupportedRate(u32),
    /// Failed to create audio stream
    StreamCreate(String),
    /// Playback error
    Playback(String),
    /// No audio device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::DeviceInit(msg) => write!(f, "Device init error: {}", msg),
            AudioError::UnsupportedRate(rate) => {
                write!(f, "Output device does not support {} Hz", rate)
            }
            AudioError::StreamCreate(msg) => write!(f, "Stream create error: {}", msg),
            AudioError::Playback(msg) => write!(f, "Playback error: {}", msg),
            AudioError::NoDevice => write!(f, "No audio device available"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Trait for mono audio output backends.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Queue samples without blocking. Returns how many were accepted.
    fn write(&mut self, samples: &[f32]) -> usize;

    /// Start playback.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop playback.
    fn stop(&mut self) -> Result<(), AudioError>;
}
