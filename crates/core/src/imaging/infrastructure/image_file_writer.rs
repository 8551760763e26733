use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::raster::Raster;

/// Writes a raster with the `image` crate; format follows the extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_dynamic(image: &Raster) -> Option<DynamicImage> {
    let (w, h, data) = (image.width(), image.height(), image.data().to_vec());
    match image.channels() {
        1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        _ => None,
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, image: &Raster) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = to_dynamic(image).ok_or_else(|| {
            format!(
                "Cannot encode {}-channel {}x{} raster",
                image.channels(),
                image.width(),
                image.height()
            )
        })?;

        img.save(path)?;
        Ok(())
    }
}
