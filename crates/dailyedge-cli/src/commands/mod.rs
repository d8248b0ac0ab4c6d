pub mod config;
pub mod grade;
pub mod stats;
pub mod task;
pub mod timer;
