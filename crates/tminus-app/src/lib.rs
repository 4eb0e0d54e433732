pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod render;
