//! Detector output: one bounding box plus named landmark groups per face.
//!
//! Everything here is normalized. Box coordinates are fractions of the
//! image size with the origin at the bottom-left; landmark points are
//! fractions of the box.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for NormalizedPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<NormalizedPoint> for [f64; 2] {
    fn from(p: NormalizedPoint) -> Self {
        [p.x, p.y]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Scales the box into pixel space for an image of the given size.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelBox {
        let (iw, ih) = (image_width as f64, image_height as f64);
        PixelBox {
            x: self.x * iw,
            y: self.y * ih,
            width: self.width * iw,
            height: self.height * ih,
        }
    }
}

/// A bounding box in image pixels, still in the detector's y-up convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkRegion {
    FaceContour,
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Nose,
    NoseCrest,
    MedianLine,
    OuterLips,
    InnerLips,
    LeftPupil,
    RightPupil,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub landmarks: BTreeMap<LandmarkRegion, Vec<NormalizedPoint>>,
}

impl FaceObservation {
    pub fn new(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            landmarks: BTreeMap::new(),
        }
    }

    pub fn with_region(mut self, region: LandmarkRegion, points: Vec<NormalizedPoint>) -> Self {
        self.landmarks.insert(region, points);
        self
    }

    /// Points for `region`, or `None` when the detector did not report it.
    pub fn region(&self, region: LandmarkRegion) -> Option<&[NormalizedPoint]> {
        self.landmarks.get(&region).map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_pixels_scales_each_axis() {
        let bbox = BoundingBox::new(0.25, 0.5, 0.5, 0.25);
        let px = bbox.to_pixels(400, 200);
        assert_relative_eq!(px.x, 100.0);
        assert_relative_eq!(px.y, 100.0);
        assert_relative_eq!(px.width, 200.0);
        assert_relative_eq!(px.height, 50.0);
    }

    #[test]
    fn test_region_lookup() {
        let obs = FaceObservation::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0)).with_region(
            LandmarkRegion::Nose,
            vec![NormalizedPoint::new(0.5, 0.5)],
        );
        assert_eq!(obs.region(LandmarkRegion::Nose).map(|p| p.len()), Some(1));
        assert!(obs.region(LandmarkRegion::FaceContour).is_none());
    }

    #[test]
    fn test_deserializes_points_as_pairs() {
        let json = r#"{
            "bounding_box": {"x": 0.1, "y": 0.2, "width": 0.3, "height": 0.4},
            "landmarks": {"left_eyebrow": [[0.1, 0.9], [0.2, 0.8]]}
        }"#;
        let obs: FaceObservation = serde_json::from_str(json).unwrap();
        let brow = obs.region(LandmarkRegion::LeftEyebrow).unwrap();
        assert_eq!(brow, &[NormalizedPoint::new(0.1, 0.9), NormalizedPoint::new(0.2, 0.8)]);
    }

    #[test]
    fn test_landmarks_default_to_empty() {
        let json = r#"{"bounding_box": {"x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0}}"#;
        let obs: FaceObservation = serde_json::from_str(json).unwrap();
        assert!(obs.landmarks.is_empty());
    }

    #[test]
    fn test_serializes_region_names_snake_case() {
        let obs = FaceObservation::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .with_region(LandmarkRegion::FaceContour, vec![NormalizedPoint::new(0.0, 1.0)]);
        let json = serde_json::to_string(&obs).unwrap();
        assert!(json.contains("\"face_contour\":[[0.0,1.0]]"));
    }
}
