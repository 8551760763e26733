//! Output-size math for downscaling oversized inputs.
//!
//! `WidthBound` always pins the width to the cap and derives the height
//! from the aspect ratio, even when only the height was over the cap.
//! `LongestSide` pins whichever side is longer instead.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    #[default]
    WidthBound,
    LongestSide,
}

/// True when either side is longer than `max_dimension`.
pub fn needs_resize(width: u32, height: u32, max_dimension: u32) -> bool {
    width > max_dimension || height > max_dimension
}

/// Output dimensions for scaling `width`x`height` down to `max_dimension`.
///
/// The derived side is rounded to nearest and never drops below 1.
pub fn target_size(
    width: u32,
    height: u32,
    max_dimension: u32,
    policy: ResizePolicy,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    match policy {
        ResizePolicy::WidthBound => (max_dimension, scaled(max_dimension, height, width)),
        ResizePolicy::LongestSide if width >= height => {
            (max_dimension, scaled(max_dimension, height, width))
        }
        ResizePolicy::LongestSide => (scaled(max_dimension, width, height), max_dimension),
    }
}

fn scaled(max_dimension: u32, numerator: u32, denominator: u32) -> u32 {
    let ratio = numerator as f64 / denominator as f64;
    ((max_dimension as f64 * ratio).round() as u32).max(1)
}
