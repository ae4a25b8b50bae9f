//! Controller error type.

use lily_ir::InitError;

/// Error type for offline rendering.
#[derive(Debug)]
pub enum RenderError {
    /// The voice refused the runtime
    Init(InitError),
    /// WAV encoding failed
    Wav(hound::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "Voice init error: {}", e),
            RenderError::Wav(e) => write!(f, "WAV error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Init(e) => Some(e),
            RenderError::Wav(e) => Some(e),
        }
    }
}

impl From<InitError> for RenderError {
    fn from(e: InitError) -> Self {
        RenderError::Init(e)
    }
}

impl From<hound::Error> for RenderError {
    fn from(e: hound::Error) -> Self {
        RenderError::Wav(e)
    }
}
