use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::raster::Raster;

pub type SwapEngineError = Box<dyn std::error::Error + Send + Sync>;

/// Composites the face found in `source` onto `target`.
///
/// `target_landmarks` guide placement. Both sets are expected to have the
/// same length; what happens otherwise is up to the engine. Implementations
/// must be shareable because the two directions of a swap may run
/// concurrently.
pub trait SwapEngine: Send + Sync {
    fn swap(
        &self,
        source: &Raster,
        target: &Raster,
        source_landmarks: &LandmarkSet,
        target_landmarks: &LandmarkSet,
    ) -> Result<Raster, SwapEngineError>;
}
