//! Description synthesis engine
//!
//! Turns a [`ComponentAttributes`] set into the catalog's canonical
//! description string. The pipeline is pure: the same attributes always
//! yield the same text, and the only shared state is the read-only
//! lookup tables in [`units`].
//!
//! ```
//! use catdesc::describe::generate_description;
//! use catdesc::entities::ComponentAttributes;
//!
//! let mut attrs = ComponentAttributes::new("Resistor");
//! attrs.ohms = Some(10.0);
//! attrs.ohms_unit = Some("kΩ".to_string());
//! attrs.tolerance = Some("5%".to_string());
//! assert_eq!(generate_description(&attrs), "10kΩ Resistor 5% Tolerance");
//! ```

pub mod compose;
pub mod format;
pub mod kind;
pub mod redundancy;
pub mod units;

use serde::Serialize;

use crate::entities::component::ComponentAttributes;

pub use format::{format_pot_value, format_value};
pub use kind::{classify, Kind};
pub use redundancy::is_redundant;

/// A generated description together with how it was built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    /// Composer that produced the clauses
    pub kind: Kind,

    /// Ordered clauses before joining
    pub clauses: Vec<String>,

    /// Final description text
    pub text: String,
}

/// Build the description and keep the intermediate clauses
pub fn describe(attrs: &ComponentAttributes) -> Description {
    let kind = Kind::resolve(attrs);
    let clauses: Vec<String> = match kind {
        Kind::Potentiometer => compose::compose_potentiometer(attrs),
        Kind::Resistor | Kind::Capacitor | Kind::Generic => compose::compose_generic(attrs, kind),
    }
    .into_iter()
    .map(|c| c.trim().to_string())
    .filter(|c| !c.is_empty())
    .collect();

    let text = clauses.join(" ");
    Description {
        kind,
        clauses,
        text,
    }
}

/// Canonical description string for a component
///
/// Never fails: missing optional attributes only drop their clause.
pub fn generate_description(attrs: &ComponentAttributes) -> String {
    describe(attrs).text
}
