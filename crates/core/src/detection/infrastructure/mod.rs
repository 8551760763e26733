pub mod blocking_face_detector;
pub mod json_face_detector;
