pub mod config;
pub mod orrery;
pub mod types;
