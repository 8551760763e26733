//! Prepares two portraits for a face swap and drives the swap engine.
//!
//! Inputs are size-checked, oversized ones are downscaled, landmarks are
//! detected and reshaped per face, and the pair is handed to a
//! [`SwapEngine`](swapping::domain::swap_engine::SwapEngine) once in each
//! direction. Detection and swapping are pluggable; see
//! [`pipeline::swap_faces_use_case::SwapFacesUseCase`].

pub mod detection;
pub mod imaging;
pub mod landmarks;
pub mod pipeline;
pub mod resizing;
pub mod shared;
pub mod swapping;
