//! Error type shared by every stage of the label pipeline.

use thiserror::Error;

/// Failures reported by the GPIO, rendering and printing collaborators.
///
/// Each variant carries the diagnostic text of the component that failed so the
/// operator sees the underlying cause in the log.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("GPIO controller unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("GPIO line request failed: {0}")]
    LineRequestFailed(String),

    #[error("GPIO line read failed: {0}")]
    LineReadFailed(String),

    #[error("failed to initialize font renderer: {0}")]
    FontInitFailed(String),

    #[error("failed to load font: {0}")]
    FontLoadFailed(String),

    #[error("failed to load picture: {0}")]
    PictureLoadFailed(String),

    #[error("failed to create surface: {0}")]
    SurfaceAllocationFailed(String),

    #[error("failed to compose label: {0}")]
    CompositionFailed(String),

    #[error("failed to convert image to 24-bit RGB: {0}")]
    FormatConversionFailed(String),

    #[error("failed to save image to a bitmap file: {0}")]
    FileWriteFailed(String),

    #[error("print command failed: {0}")]
    PrintCommandFailed(String),
}

pub type Result<T> = std::result::Result<T, LabelError>;
