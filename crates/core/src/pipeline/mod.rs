pub mod handoff_manifest;
pub mod swap_config;
pub mod swap_faces_use_case;
pub mod swap_logger;
pub mod swap_status;
