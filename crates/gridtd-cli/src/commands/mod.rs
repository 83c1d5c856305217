//! CLI command implementations

pub mod board;
pub mod config;
pub mod train;
