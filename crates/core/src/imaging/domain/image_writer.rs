use std::path::Path;

use crate::shared::raster::Raster;

/// Writes a raster to an image file.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, image: &Raster) -> Result<(), Box<dyn std::error::Error>>;
}
