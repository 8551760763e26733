pub mod image_resizer;
pub mod resize_policy;
