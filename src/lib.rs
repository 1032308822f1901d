//! catdesc: canonical descriptions for electronic component catalogs
//!
//! Turns structured component attributes (type, category, electrical
//! values, potentiometer mechanics, manufacturer) into one deterministic,
//! human-readable description string.

pub mod cli;
pub mod core;
pub mod describe;
pub mod entities;
pub mod yaml;
