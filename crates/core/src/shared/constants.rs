/// Inputs with either side below this are rejected.
pub const MIN_INPUT_SIZE: u32 = 250;

/// Inputs with either side above this are downscaled first.
pub const MAX_INPUT_SIZE: u32 = 1300;

/// Eyebrow y-coordinates are scaled by this to raise them for alignment.
pub const EYEBROW_COMPRESSION: f64 = 0.85;

/// Every Nth face-contour point is kept.
pub const CONTOUR_STRIDE: usize = 2;

/// Minimum flattened coordinate count (5 x,y pairs) per image.
pub const MIN_LANDMARK_VALUES: usize = 10;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
