use std::path::{Path, PathBuf};

use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::raster::Raster;

/// Replays observations stored as JSON by an external landmark tool.
///
/// Each file holds an array of observations. Calls consume the files in
/// order and the last one repeats once the list runs out; the image
/// argument is ignored. An unreadable file is a detection failure; a file
/// that parses but is not an observation array is an unexpected result.
pub struct JsonFaceDetector {
    paths: Vec<PathBuf>,
    next: usize,
}

impl JsonFaceDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::replaying(vec![path.into()])
    }

    pub fn replaying(paths: Vec<PathBuf>) -> Self {
        Self { paths, next: 0 }
    }

    fn next_path(&mut self) -> Option<&Path> {
        let index = self.next.min(self.paths.len().checked_sub(1)?);
        self.next += 1;
        Some(&self.paths[index])
    }
}

pub fn parse_observations(json: &str) -> Result<Vec<FaceObservation>, DetectionError> {
    serde_json::from_str(json).map_err(|e| DetectionError::UnexpectedShape(e.to_string()))
}

impl FaceDetector for JsonFaceDetector {
    fn detect(&mut self, _image: &Raster) -> Result<Vec<FaceObservation>, DetectionError> {
        let path = self
            .next_path()
            .ok_or_else(|| DetectionError::Failed("no detection files configured".to_string()))?;
        let json = std::fs::read_to_string(path)
            .map_err(|e| DetectionError::Failed(format!("cannot read {}: {e}", path.display())))?;
        let observations = parse_observations(&json)?;
        log::debug!(
            "Loaded {} observation(s) from {}",
            observations.len(),
            path.display()
        );
        Ok(observations)
    }
}
