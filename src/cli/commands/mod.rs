//! Command implementations

pub mod completions;
pub mod config;
pub mod describe;
pub mod import;
pub mod units;
