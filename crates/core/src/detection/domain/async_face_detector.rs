use std::sync::Arc;

use crate::detection::domain::face_detector::DetectionError;
use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::raster::Raster;

pub type DetectionResult = Result<Vec<FaceObservation>, DetectionError>;

/// Completion handler for an asynchronous detection request.
pub type DetectionCallback = Box<dyn FnOnce(DetectionResult) + Send>;

/// A detector that reports through a completion callback, possibly from
/// another thread. Wrap it in
/// [`BlockingFaceDetector`](crate::detection::infrastructure::blocking_face_detector::BlockingFaceDetector)
/// to use it in the pipeline.
pub trait AsyncFaceDetector: Send + Sync {
    fn detect_async(&self, image: Arc<Raster>, on_complete: DetectionCallback);
}
