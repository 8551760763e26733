use image::imageops::{self, FilterType};
use image::{GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::resizing::domain::image_resizer::{ImageResizer, ResizeError};
use crate::shared::raster::Raster;

/// Resamples with the `image` crate's triangle (bilinear) filter.
///
/// Handles 1, 2, 3 and 4 channel rasters.
pub struct TriangleResizer;

impl TriangleResizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TriangleResizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageResizer for TriangleResizer {
    fn resize(&self, image: &Raster, width: u32, height: u32) -> Result<Raster, ResizeError> {
        let (w, h, c) = (image.width(), image.height(), image.channels());
        let data = image.data().to_vec();
        let resized = match c {
            1 => GrayImage::from_raw(w, h, data)
                .map(|img| imageops::resize(&img, width, height, FilterType::Triangle).into_raw()),
            2 => GrayAlphaImage::from_raw(w, h, data)
                .map(|img| imageops::resize(&img, width, height, FilterType::Triangle).into_raw()),
            3 => RgbImage::from_raw(w, h, data)
                .map(|img| imageops::resize(&img, width, height, FilterType::Triangle).into_raw()),
            4 => RgbaImage::from_raw(w, h, data)
                .map(|img| imageops::resize(&img, width, height, FilterType::Triangle).into_raw()),
            _ => None,
        };
        resized
            .map(|pixels| Raster::new(pixels, width, height, c))
            .ok_or(ResizeError::UnsupportedChannels(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::LumaA;

    #[test]
    fn test_resize_produces_requested_size() {
        let img = Raster::filled(200, 100, [128, 128, 128]);
        let out = TriangleResizer::new().resize(&img, 100, 50).unwrap();
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 50);
        assert_eq!(out.channels(), 3);
        assert_eq!(out.data().len(), 100 * 50 * 3);
    }

    #[test]
    fn test_resize_keeps_uniform_colour() {
        let img = Raster::filled(40, 40, [50, 100, 200]);
        let out = TriangleResizer::new().resize(&img, 10, 10).unwrap();
        assert_eq!(&out.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_input_untouched() {
        let img = Raster::filled(40, 20, [1, 2, 3]);
        let before = img.clone();
        let _ = TriangleResizer::new().resize(&img, 20, 10);
        assert_eq!(img, before);
    }

    #[test]
    fn test_rgba_supported() {
        let img = Raster::new(vec![9u8; 8 * 8 * 4], 8, 8, 4);
        let out = TriangleResizer::new().resize(&img, 4, 4).unwrap();
        assert_eq!(out.channels(), 4);
        assert_eq!(out.data().len(), 4 * 4 * 4);
    }

    #[test]
    fn test_gray_alpha_is_filtered_not_sampled() {
        let pixels = vec![0, 255, 100, 255, 200, 255, 250, 255];
        let img = Raster::new(pixels.clone(), 4, 1, 2);

        let out = TriangleResizer::new().resize(&img, 2, 1).unwrap();

        let reference = GrayAlphaImage::from_raw(4, 1, pixels).unwrap();
        let expected = imageops::resize(&reference, 2, 1, FilterType::Triangle);
        assert_eq!(out.channels(), 2);
        assert_eq!(out.data(), expected.as_raw().as_slice());
        // Blended with neighbours: neither source pixel survives verbatim.
        assert_ne!(expected.get_pixel(0, 0), &LumaA([0, 255]));
        assert_ne!(expected.get_pixel(1, 0), &LumaA([200, 255]));
    }

    #[test]
    fn test_unsupported_channel_count_is_an_error() {
        let img = Raster::new(vec![7u8; 4 * 4 * 5], 4, 4, 5);
        let err = TriangleResizer::new().resize(&img, 2, 2).unwrap_err();
        assert_eq!(err, ResizeError::UnsupportedChannels(5));
    }
}
