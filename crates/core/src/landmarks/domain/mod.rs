pub mod landmark_extractor;
pub mod landmark_set;
