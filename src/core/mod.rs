//! Core module - configuration and attribute document loading

pub mod config;
pub mod loader;

pub use config::Config;
pub use loader::{AttributeDocument, DocumentFormat};
