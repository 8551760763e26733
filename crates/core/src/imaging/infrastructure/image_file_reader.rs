use std::path::Path;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::raster::Raster;

/// Decodes any format the `image` crate supports into 3-channel RGB.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Raster, Box<dyn std::error::Error>> {
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        log::debug!("Read {} ({width}x{height})", path.display());
        Ok(Raster::new(rgb.into_raw(), width, height, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("test.png");
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_read_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 100, 80);
        let raster = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(raster.width(), 100);
        assert_eq!(raster.height(), 80);
        assert_eq!(raster.channels(), 3);
    }

    #[test]
    fn test_read_pixels_are_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 10, 10);
        let raster = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(&raster.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_rgba_is_flattened_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        let raster = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(raster.channels(), 3);
        assert_eq!(raster.data().len(), 4 * 4 * 3);
    }

    #[test]
    fn test_read_nonexistent_returns_error() {
        assert!(ImageFileReader::new()
            .read(Path::new("/nonexistent/test.png"))
            .is_err());
    }
}
