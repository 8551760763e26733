use thiserror::Error;

use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::raster::Raster;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectionError {
    /// The detector could not run. Callers treat this as "no faces".
    #[error("face detection failed: {0}")]
    Failed(String),

    /// The detector answered with something that is not a list of
    /// observations. Signals a detector/version mismatch.
    #[error("detector returned an unexpected result: {0}")]
    UnexpectedShape(String),
}

/// Domain interface for face landmark detection.
///
/// Implementations may be stateful, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, image: &Raster) -> Result<Vec<FaceObservation>, DetectionError>;
}
