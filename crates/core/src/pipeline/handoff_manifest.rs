use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::pipeline::swap_faces_use_case::PreparedPair;
use crate::pipeline::swap_status::SwapStatus;

/// Everything an external swap engine needs to run both directions:
/// where the normalized images were written and their landmark sets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandoffManifest {
    pub status: SwapStatus,
    pub first: ManifestEntry,
    pub second: ManifestEntry,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub image: PathBuf,
    pub width: u32,
    pub height: u32,
    pub landmarks: LandmarkSet,
}

impl HandoffManifest {
    pub fn new(pair: &PreparedPair, image_a: &Path, image_b: &Path) -> Self {
        Self {
            status: SwapStatus::Success,
            first: ManifestEntry {
                image: image_a.to_path_buf(),
                width: pair.image_a.width(),
                height: pair.image_a.height(),
                landmarks: pair.landmarks_a.clone(),
            },
            second: ManifestEntry {
                image: image_b.to_path_buf(),
                width: pair.image_b.width(),
                height: pair.image_b.height(),
                landmarks: pair.landmarks_b.clone(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
