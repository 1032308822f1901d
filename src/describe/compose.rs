//! Clause composers
//!
//! Each composer turns an attribute set into an ordered list of clauses.
//! Every step is guarded by a presence check; absent attributes simply
//! contribute nothing.

use crate::describe::format::{format_pot_value, format_value};
use crate::describe::kind::Kind;
use crate::describe::redundancy::is_redundant;
use crate::describe::units::DEFAULT_TAPER_CODE;
use crate::entities::component::{
    present, ComponentAttributes, MountingStyle, PotTaper, ShaftMaterial,
};

/// Clauses for resistors, capacitors and everything else that is not a
/// potentiometer
pub fn compose_generic(attrs: &ComponentAttributes, kind: Kind) -> Vec<String> {
    let mut clauses = Vec::new();

    let value = value_clause(attrs, kind);
    if let Some(label) = type_label(attrs) {
        let duplicates_value = value.as_deref().is_some_and(|value| value.ends_with(label));
        clauses.extend(value);
        if !duplicates_value {
            clauses.push(label.to_string());
        }
    } else {
        clauses.extend(value);
    }

    clauses.extend(qualifier_clauses(attrs));
    clauses.extend(manufacturer_clause(attrs));
    clauses
}

/// Clauses for potentiometers
pub fn compose_potentiometer(attrs: &ComponentAttributes) -> Vec<String> {
    let mut clauses = Vec::new();

    if let Some((ohms, unit)) = attrs.resistance() {
        let code = attrs
            .pot_taper
            .as_ref()
            .map_or(DEFAULT_TAPER_CODE, PotTaper::code);
        clauses.push(format!("{}{}", code, format_pot_value(ohms, unit)));
    }

    let core = core_details(attrs);
    // The full taper name only stands in when there are no mechanical details
    if core.is_none() {
        if let Some(taper) = &attrs.pot_taper {
            if !taper.name().trim().is_empty() {
                clauses.push(taper.name().to_string());
            }
        }
    }
    clauses.extend(core);
    clauses.extend(size_details(attrs));

    clauses.extend(qualifier_clauses(attrs));
    clauses.extend(manufacturer_clause(attrs));
    clauses
}

fn value_clause(attrs: &ComponentAttributes, kind: Kind) -> Option<String> {
    let (magnitude, unit) = match kind {
        Kind::Resistor => attrs.resistance()?,
        Kind::Capacitor => attrs.capacitance()?,
        Kind::Potentiometer | Kind::Generic => return None,
    };
    let noun = kind.value_noun()?;
    Some(format!("{} {}", format_value(magnitude, unit), noun))
}

/// Type label, or the category when it says something the type does not
fn type_label(attrs: &ComponentAttributes) -> Option<&str> {
    let type_name = attrs.type_name.trim();
    let label = match present(&attrs.category_name) {
        Some(category) if !is_redundant(category, type_name) => category,
        _ => type_name,
    };
    (!label.is_empty()).then_some(label)
}

/// Size, mounting style, wattage and tolerance
pub fn qualifier_clauses(attrs: &ComponentAttributes) -> Vec<String> {
    let mut clauses = Vec::new();

    if let Some(size) = present(&attrs.size_name) {
        clauses.push(size.to_string());
    }

    if let Some(style) = attrs.mounting_style {
        clauses.push(
            match style {
                MountingStyle::Th => "(Through Hole)",
                MountingStyle::Smt => "(SMT)",
            }
            .to_string(),
        );
    }

    if let Some(wattage) = present(&attrs.wattage) {
        match wattage.strip_suffix(['W', 'w']) {
            Some(watts) => clauses.push(format!("{}W", watts)),
            None => clauses.push(format!("{}W", wattage)),
        }
    }

    if let Some(tolerance) = present(&attrs.tolerance) {
        clauses.push(format!("{} Tolerance", tolerance));
    }

    clauses
}

/// Trailing "by <manufacturer> (Part No: <part>)" suffix
pub fn manufacturer_clause(attrs: &ComponentAttributes) -> Option<String> {
    match (
        present(&attrs.manufacturer_name),
        present(&attrs.manufacturer_part_no),
    ) {
        (Some(mfr), Some(part)) => Some(format!("by {} (Part No: {})", mfr, part)),
        (Some(mfr), None) => Some(format!("by {}", mfr)),
        (None, Some(part)) => Some(format!("(Part No: {})", part)),
        (None, None) => None,
    }
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|w| w.eq_ignore_ascii_case(word))
}

fn gang_label(gangs: u32) -> String {
    match gangs {
        2 => "Dual-gang".to_string(),
        3 => "Triple-gang".to_string(),
        4 => "Quad-gang".to_string(),
        n => format!("{}-gang", n),
    }
}

/// Angle, shaft, gang and mounting details joined into one clause
fn core_details(attrs: &ComponentAttributes) -> Option<String> {
    let mounting_type = present(&attrs.pot_mounting_type);
    let mut parts: Vec<String> = Vec::new();

    if let Some(angle) = attrs.pot_angle_type {
        // A mounting type supplies its own "Mount", so the angle stays bare
        if mounting_type.is_some() {
            parts.push(angle.to_string());
        } else {
            parts.push(format!("{} Mount", angle));
        }
    }

    if let Some(shaft_type) = present(&attrs.pot_shaft_type) {
        if contains_word(shaft_type, "Shaft") {
            parts.push(shaft_type.to_string());
        } else {
            parts.push(format!("{} Shaft", shaft_type));
        }
    }

    if attrs.pot_split_shaft {
        parts.push("Split Shaft".to_string());
    }

    if let Some(material) = attrs.pot_shaft_material {
        if material != ShaftMaterial::Metal {
            parts.push(format!("{} Shaft", material));
        }
    }

    if let Some(gangs) = attrs.pot_gangs.filter(|g| *g > 1) {
        parts.push(gang_label(gangs));
    }

    if let Some(mounting) = mounting_type {
        let phrase = if contains_word(mounting, "Mount") {
            mounting.to_string()
        } else {
            format!("{} Mount", mounting)
        };
        if attrs.pot_angle_type.is_some() {
            parts.push(format!("with {}", phrase));
        } else {
            parts.push(phrase);
        }
    }

    (!parts.is_empty()).then(|| parts.join(" "))
}

/// "(6mm diameter, 15mm length, 16mm base)"
fn size_details(attrs: &ComponentAttributes) -> Option<String> {
    let parts: Vec<String> = [
        (present(&attrs.pot_shaft_diameter), "diameter"),
        (present(&attrs.pot_shaft_length), "length"),
        (present(&attrs.pot_base_width), "base"),
    ]
    .into_iter()
    .filter_map(|(value, label)| value.map(|v| format!("{} {}", v, label)))
    .collect();

    (!parts.is_empty()).then(|| format!("({})", parts.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::component::{AngleType, PotTaper};

    fn pot() -> ComponentAttributes {
        ComponentAttributes::new("Potentiometer")
    }

    #[test]
    fn test_value_clause_skips_duplicate_label() {
        let mut attrs = ComponentAttributes::new("Resistor");
        attrs.ohms = Some(10.0);
        attrs.ohms_unit = Some("kΩ".into());
        assert_eq!(compose_generic(&attrs, Kind::Resistor), vec!["10kΩ Resistor"]);
    }

    #[test]
    fn test_category_kept_unless_value_ends_with_it() {
        let mut attrs = ComponentAttributes::new("Variable Resistor");
        attrs.category_name = Some("Resistors".into());
        attrs.ohms = Some(4.7);
        attrs.ohms_unit = Some("kΩ".into());
        assert_eq!(
            compose_generic(&attrs, Kind::Resistor),
            vec!["4.7kΩ Resistor", "Resistors"]
        );

        // A plural category redundant with the type falls back to the type
        attrs.type_name = "Resistor".into();
        assert_eq!(compose_generic(&attrs, Kind::Resistor), vec!["4.7kΩ Resistor"]);
    }

    #[test]
    fn test_distinct_category_is_used() {
        let mut attrs = ComponentAttributes::new("Standoff or Spacer");
        attrs.category_name = Some("Standoffs & Spacers".into());
        assert_eq!(
            compose_generic(&attrs, Kind::Generic),
            vec!["Standoffs & Spacers"]
        );
    }

    #[test]
    fn test_capacitor_value_clause() {
        let mut attrs = ComponentAttributes::new("Capacitor");
        attrs.category_name = Some("Ceramic".into());
        attrs.farads = Some(0.1);
        attrs.farads_unit = Some("μF".into());
        assert_eq!(
            compose_generic(&attrs, Kind::Capacitor),
            vec!["0.1μF Capacitor", "Ceramic"]
        );
    }

    #[test]
    fn test_qualifiers_in_order() {
        let mut attrs = ComponentAttributes::new("Resistor");
        attrs.size_name = Some("0805".into());
        attrs.mounting_style = Some(MountingStyle::Smt);
        attrs.wattage = Some("0.125".into());
        attrs.tolerance = Some("1%".into());
        assert_eq!(
            qualifier_clauses(&attrs),
            vec!["0805", "(SMT)", "0.125W", "1% Tolerance"]
        );
    }

    #[test]
    fn test_wattage_suffix_not_doubled() {
        let mut attrs = ComponentAttributes::new("Resistor");
        attrs.wattage = Some("1/4W".into());
        assert_eq!(qualifier_clauses(&attrs), vec!["1/4W"]);

        attrs.wattage = Some("0.5w".into());
        assert_eq!(qualifier_clauses(&attrs), vec!["0.5W"]);
    }

    #[test]
    fn test_manufacturer_variants() {
        let mut attrs = ComponentAttributes::new("IC");
        assert_eq!(manufacturer_clause(&attrs), None);

        attrs.manufacturer_part_no = Some("NE555P".into());
        assert_eq!(
            manufacturer_clause(&attrs).as_deref(),
            Some("(Part No: NE555P)")
        );

        attrs.manufacturer_name = Some("TI".into());
        assert_eq!(
            manufacturer_clause(&attrs).as_deref(),
            Some("by TI (Part No: NE555P)")
        );

        attrs.manufacturer_part_no = None;
        assert_eq!(manufacturer_clause(&attrs).as_deref(), Some("by TI"));
    }

    #[test]
    fn test_pot_value_without_taper_uses_b() {
        let mut attrs = pot();
        attrs.ohms = Some(10.0);
        attrs.ohms_unit = Some("kΩ".into());
        assert_eq!(compose_potentiometer(&attrs), vec!["B10K"]);

        attrs.pot_taper = Some(PotTaper::Logarithmic);
        assert_eq!(compose_potentiometer(&attrs), vec!["A10K", "Logarithmic"]);
    }

    #[test]
    fn test_pot_unknown_taper_defaults_to_b() {
        let mut attrs = pot();
        attrs.ohms = Some(100.0);
        attrs.ohms_unit = Some("kΩ".into());
        attrs.pot_taper = Some(PotTaper::from("Audio"));
        assert_eq!(compose_potentiometer(&attrs), vec!["B100K", "Audio"]);
    }

    #[test]
    fn test_pot_angle_without_mounting_type() {
        let mut attrs = pot();
        attrs.pot_angle_type = Some(AngleType::RightAngle);
        attrs.pot_gangs = Some(2);
        assert_eq!(
            compose_potentiometer(&attrs),
            vec!["Right-Angle Mount Dual-gang"]
        );
    }

    #[test]
    fn test_pot_mounting_type_alone() {
        let mut attrs = pot();
        attrs.pot_mounting_type = Some("Panel".into());
        assert_eq!(compose_potentiometer(&attrs), vec!["Panel Mount"]);

        attrs.pot_mounting_type = Some("Panel Mount".into());
        assert_eq!(compose_potentiometer(&attrs), vec!["Panel Mount"]);
    }

    #[test]
    fn test_pot_plastic_shaft_and_gangs() {
        let mut attrs = pot();
        attrs.pot_shaft_type = Some("D".into());
        attrs.pot_shaft_material = Some(ShaftMaterial::Plastic);
        attrs.pot_gangs = Some(5);
        assert_eq!(
            compose_potentiometer(&attrs),
            vec!["D Shaft Plastic Shaft 5-gang"]
        );
    }

    #[test]
    fn test_pot_single_gang_is_unlabeled() {
        let mut attrs = pot();
        attrs.pot_gangs = Some(1);
        attrs.pot_shaft_material = Some(ShaftMaterial::Metal);
        assert!(compose_potentiometer(&attrs).is_empty());
    }

    #[test]
    fn test_pot_size_details() {
        let mut attrs = pot();
        attrs.pot_shaft_diameter = Some("6mm".into());
        attrs.pot_base_width = Some("16mm".into());
        assert_eq!(
            compose_potentiometer(&attrs),
            vec!["(6mm diameter, 16mm base)"]
        );

        attrs.pot_shaft_length = Some("15mm".into());
        assert_eq!(
            compose_potentiometer(&attrs),
            vec!["(6mm diameter, 15mm length, 16mm base)"]
        );
    }

    #[test]
    fn test_pot_ignores_generic_label() {
        let mut attrs = pot();
        attrs.category_name = Some("Pots".into());
        attrs.mounting_style = Some(MountingStyle::Th);
        assert_eq!(compose_potentiometer(&attrs), vec!["(Through Hole)"]);
    }
}
