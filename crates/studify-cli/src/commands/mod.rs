pub mod attendance;
pub mod config;
pub mod exam;
pub mod plan;
pub mod status;
pub mod task;
