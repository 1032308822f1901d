//! Catalog entity types
//!
//! - [`ComponentAttributes`] - the typed attribute bag a description is
//!   synthesized from, plus the enums for its constrained fields

pub mod component;

pub use component::{
    AngleType, AttributeError, ComponentAttributes, MountingStyle, PotTaper, ShaftMaterial,
};
