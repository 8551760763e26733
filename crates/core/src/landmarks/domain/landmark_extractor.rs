//! Turns detector observations into the flat pixel landmark list the swap
//! engine consumes.
//!
//! Per face: left eyebrow, right eyebrow, then every second contour point.
//! Eyebrow y-values are scaled by 0.85, which in the detector's y-up space
//! pulls them toward y = 0 and raises them on the face.

use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::detection::domain::face_observation::{
    FaceObservation, LandmarkRegion, NormalizedPoint, PixelBox,
};
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::constants::{CONTOUR_STRIDE, EYEBROW_COMPRESSION};
use crate::shared::raster::Raster;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractionConfig {
    /// Multiplier applied to eyebrow y-coordinates.
    pub eyebrow_compression: f64,
    /// Keep every Nth contour point.
    pub contour_stride: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            eyebrow_compression: EYEBROW_COMPRESSION,
            contour_stride: CONTOUR_STRIDE,
        }
    }
}

pub struct LandmarkExtractor {
    config: ExtractionConfig,
}

impl LandmarkExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Detects faces in `image` and returns the landmarks of the last one.
    ///
    /// A failed detection yields an empty set. Only a malformed detector
    /// result is an error.
    pub fn extract(
        &self,
        detector: &mut dyn FaceDetector,
        image: &Raster,
    ) -> Result<LandmarkSet, DetectionError> {
        let observations = match detector.detect(image) {
            Ok(observations) => observations,
            Err(DetectionError::Failed(reason)) => {
                log::warn!("Face detection failed, treating as no faces: {reason}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        log::debug!(
            "{} face observation(s) in {}x{} image",
            observations.len(),
            image.width(),
            image.height()
        );
        Ok(self.for_observations(&observations, image.width(), image.height()))
    }

    /// Last observation wins; faces are never merged.
    pub fn for_observations(
        &self,
        observations: &[FaceObservation],
        image_width: u32,
        image_height: u32,
    ) -> LandmarkSet {
        observations
            .last()
            .map(|face| self.for_face(face, image_width, image_height))
            .unwrap_or_default()
    }

    pub fn for_face(
        &self,
        face: &FaceObservation,
        image_width: u32,
        image_height: u32,
    ) -> LandmarkSet {
        let bbox = face.bounding_box.to_pixels(image_width, image_height);
        let brow_scale = self.config.eyebrow_compression;
        let mut set = LandmarkSet::new();

        for region in [LandmarkRegion::LeftEyebrow, LandmarkRegion::RightEyebrow] {
            if let Some(points) = face.region(region) {
                set.extend(points.iter().map(|p| project(&bbox, p, brow_scale)));
            }
        }

        if let Some(points) = face.region(LandmarkRegion::FaceContour) {
            set.extend(
                contour_indices(points.len(), self.config.contour_stride)
                    .map(|i| project(&bbox, &points[i], 1.0)),
            );
        }

        set
    }
}

impl Default for LandmarkExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

/// Maps a box-relative point to pixels, scaling y by `y_scale`.
/// Fractions are truncated toward zero.
pub fn project(bbox: &PixelBox, point: &NormalizedPoint, y_scale: f64) -> (i32, i32) {
    let xx = bbox.x + point.x * bbox.width;
    let yy = (bbox.y + point.y * bbox.height) * y_scale;
    (xx as i32, yy as i32)
}

/// 0, stride, 2*stride, ... strictly below `count - 1`; the final contour
/// point is never taken.
fn contour_indices(count: usize, stride: usize) -> impl Iterator<Item = usize> {
    (0..count.saturating_sub(1)).step_by(stride.max(1))
}
