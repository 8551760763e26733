use thiserror::Error;

use crate::landmarks::domain::landmark_extractor::ExtractionConfig;
use crate::resizing::domain::resize_policy::ResizePolicy;
use crate::shared::constants::{MAX_INPUT_SIZE, MIN_INPUT_SIZE, MIN_LANDMARK_VALUES};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum size must be > 0")]
    ZeroMinSize,

    #[error("minimum size {min} exceeds maximum size {max}")]
    MinExceedsMax { min: u32, max: u32 },

    #[error("eyebrow compression must be in (0.0, 1.0], got {0}")]
    InvalidCompression(f64),

    #[error("contour stride must be >= 1")]
    ZeroContourStride,
}

/// Tunables for one [`SwapFacesUseCase`](super::swap_faces_use_case::SwapFacesUseCase).
#[derive(Clone, Debug, PartialEq)]
pub struct SwapConfig {
    pub min_size: u32,
    pub max_size: u32,
    /// Flattened coordinate count each image needs (2 per point).
    pub min_landmark_values: usize,
    pub resize_policy: ResizePolicy,
    pub extraction: ExtractionConfig,
    /// Run the two swap directions on separate threads.
    pub parallel_swaps: bool,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_INPUT_SIZE,
            max_size: MAX_INPUT_SIZE,
            min_landmark_values: MIN_LANDMARK_VALUES,
            resize_policy: ResizePolicy::default(),
            extraction: ExtractionConfig::default(),
            parallel_swaps: true,
        }
    }
}

impl SwapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size == 0 {
            return Err(ConfigError::ZeroMinSize);
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_size,
                max: self.max_size,
            });
        }
        let c = self.extraction.eyebrow_compression;
        if !(c > 0.0 && c <= 1.0) {
            return Err(ConfigError::InvalidCompression(c));
        }
        if self.extraction.contour_stride == 0 {
            return Err(ConfigError::ZeroContourStride);
        }
        Ok(())
    }
}
