pub mod async_face_detector;
pub mod face_detector;
pub mod face_observation;
