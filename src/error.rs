// THEORY:
// Every failure the engine can report is a contract violation by the caller
// (an empty image, a non-positive crop size) or a lost worker in the batch
// pipeline. Per-contour noise (zero area, zero mass, negative centroid) is not
// an error and never reaches this type; it is filtered silently.

use thiserror::Error;

/// Result type for all vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors raised by the detection and cropping stages.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum VisionError {
    /// The input image or mask has no pixels, or its buffer does not match
    /// the dimensions it claims.
    #[error("invalid image: {reason}")]
    InvalidImage {
        /// What was wrong with the image.
        reason: String,
    },

    /// A numeric parameter is outside its domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// The offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A batch worker task did not finish (panicked or was cancelled).
    #[error("worker failed: {reason}")]
    Worker {
        /// The join error reported by the runtime.
        reason: String,
    },
}

impl VisionError {
    pub(crate) fn empty_image(width: u32, height: u32) -> Self {
        VisionError::InvalidImage {
            reason: format!("image has zero area ({width}x{height})"),
        }
    }
}
