//! Synthesis strategy selection

use serde::Serialize;

use crate::entities::component::ComponentAttributes;

/// Type name that routes to the potentiometer composer (case-sensitive)
pub const POTENTIOMETER_TYPE: &str = "Potentiometer";

/// Which composer renders a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Resistor,
    Capacitor,
    Potentiometer,
    Generic,
}

impl Kind {
    /// Refine a classification using value presence
    ///
    /// Non-potentiometer kinds are decided by which values are populated,
    /// so a "Variable Resistor" carrying ohms still renders as a resistor.
    /// Resistance wins when both resistance and capacitance are present.
    pub fn resolve(attrs: &ComponentAttributes) -> Self {
        match classify(&attrs.type_name) {
            Kind::Potentiometer => Kind::Potentiometer,
            _ if attrs.resistance().is_some() => Kind::Resistor,
            _ if attrs.capacitance().is_some() => Kind::Capacitor,
            _ => Kind::Generic,
        }
    }

    /// Word appended to the value token, if this kind has one
    pub fn value_noun(&self) -> Option<&'static str> {
        match self {
            Kind::Resistor => Some("Resistor"),
            Kind::Capacitor => Some("Capacitor"),
            Kind::Potentiometer | Kind::Generic => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Resistor => write!(f, "resistor"),
            Kind::Capacitor => write!(f, "capacitor"),
            Kind::Potentiometer => write!(f, "potentiometer"),
            Kind::Generic => write!(f, "generic"),
        }
    }
}

/// Classify a component by its type name alone
pub fn classify(type_name: &str) -> Kind {
    if type_name == POTENTIOMETER_TYPE {
        Kind::Potentiometer
    } else {
        Kind::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_match_only() {
        assert_eq!(classify("Potentiometer"), Kind::Potentiometer);
        assert_eq!(classify("potentiometer"), Kind::Generic);
        assert_eq!(classify("Resistor"), Kind::Generic);
        assert_eq!(classify(""), Kind::Generic);
    }

    #[test]
    fn test_resolve_by_value_presence() {
        let mut attrs = ComponentAttributes::new("Variable Resistor");
        attrs.ohms = Some(10.0);
        attrs.ohms_unit = Some("kΩ".into());
        assert_eq!(Kind::resolve(&attrs), Kind::Resistor);

        let mut attrs = ComponentAttributes::new("Cap");
        attrs.farads = Some(100.0);
        attrs.farads_unit = Some("nF".into());
        assert_eq!(Kind::resolve(&attrs), Kind::Capacitor);

        assert_eq!(
            Kind::resolve(&ComponentAttributes::new("Resistor")),
            Kind::Generic
        );
    }

    #[test]
    fn test_resolve_resistance_wins() {
        let mut attrs = ComponentAttributes::new("Odd");
        attrs.ohms = Some(1.0);
        attrs.ohms_unit = Some("Ω".into());
        attrs.farads = Some(1.0);
        attrs.farads_unit = Some("pF".into());
        assert_eq!(Kind::resolve(&attrs), Kind::Resistor);
    }

    #[test]
    fn test_potentiometer_takes_precedence_over_values() {
        let mut attrs = ComponentAttributes::new("Potentiometer");
        attrs.ohms = Some(10.0);
        attrs.ohms_unit = Some("kΩ".into());
        assert_eq!(Kind::resolve(&attrs), Kind::Potentiometer);
    }
}
