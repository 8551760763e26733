use thiserror::Error;

use crate::resizing::domain::resize_policy::{target_size, ResizePolicy};
use crate::shared::raster::Raster;

#[derive(Debug, Error, PartialEq)]
pub enum ResizeError {
    #[error("cannot resample a raster with {0} channels")]
    UnsupportedChannels(u8),
}

/// Resamples a raster into a new one of the requested size.
///
/// The input is never modified.
pub trait ImageResizer: Send + Sync {
    fn resize(&self, image: &Raster, width: u32, height: u32) -> Result<Raster, ResizeError>;
}

/// Downscales `image` so it fits `max_dimension` under `policy`.
pub fn resize_to_fit(
    resizer: &dyn ImageResizer,
    image: &Raster,
    max_dimension: u32,
    policy: ResizePolicy,
) -> Result<Raster, ResizeError> {
    let (width, height) = target_size(image.width(), image.height(), max_dimension, policy);
    log::debug!(
        "Resizing {}x{} -> {width}x{height}",
        image.width(),
        image.height()
    );
    resizer.resize(image, width, height)
}
