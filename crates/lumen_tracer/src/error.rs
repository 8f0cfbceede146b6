//! Error types for scene setup and rendering.

use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("thread count must be 0 or higher, got {0}")]
    InvalidThreadCount(i32),

    #[error("supersampling density must be finite and 0 or higher, got {0}")]
    InvalidDensity(f64),

    #[error("camera `to` and `up` vectors must be orthogonal")]
    CameraAxesNotOrthogonal,

    #[error("cannot normalize a zero-length vector")]
    ZeroVector,

    #[error("{0} render worker(s) panicked")]
    WorkerPanicked(usize),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
