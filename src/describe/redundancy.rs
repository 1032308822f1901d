//! Category/type redundancy detection
//!
//! Catalog categories often repeat the type in plural form ("Resistors" for
//! "Resistor") or by acronym ("LEDs" for "Light-emitting diode (LED)").
//! When they do, only the type is printed.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([^()]*)\)").expect("parenthetical pattern is valid")
});

/// Lowercased, trimmed forms of a label with and without a plural ending
///
/// A label ending in `es` yields both the `es`-stripped and `s`-stripped
/// stems so that "Switches"/"Switch" and "Cables"/"Cable" both meet.
fn normal_forms(label: &str) -> Vec<String> {
    let base = label.trim().to_lowercase();
    if base.is_empty() {
        return Vec::new();
    }

    let mut forms = Vec::with_capacity(3);
    if let Some(stem) = base.strip_suffix("es").filter(|s| !s.is_empty()) {
        forms.push(stem.to_string());
    }
    if let Some(stem) = base.strip_suffix('s').filter(|s| !s.is_empty()) {
        forms.push(stem.to_string());
    }
    forms.push(base);
    forms
}

fn same_concept(a: &str, b: &str) -> bool {
    let a_forms = normal_forms(a);
    let b_forms = normal_forms(b);
    a_forms.iter().any(|f| b_forms.contains(f))
}

/// True if `label` contains a parenthetical naming the same concept as `other`
fn acronym_matches(label: &str, other: &str) -> bool {
    PARENTHETICAL
        .captures_iter(label)
        .filter_map(|c| c.get(1))
        .any(|inner| same_concept(inner.as_str(), other))
}

/// Whether a category label duplicates a type label
///
/// Symmetric in its arguments; false when either is empty.
pub fn is_redundant(category_name: &str, type_name: &str) -> bool {
    if category_name.trim().is_empty() || type_name.trim().is_empty() {
        return false;
    }

    same_concept(category_name, type_name)
        || acronym_matches(category_name, type_name)
        || acronym_matches(type_name, category_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_match() {
        assert!(is_redundant("Resistors", "Resistor"));
        assert!(is_redundant("Capacitors", "capacitor"));
        assert!(is_redundant("Switches", "Switch"));
        assert!(is_redundant("Cables", "Cable"));
    }

    #[test]
    fn test_identical_labels() {
        assert!(is_redundant("Jack", "Jack"));
        assert!(is_redundant("  Jack ", "jack"));
    }

    #[test]
    fn test_acronym_match_both_directions() {
        assert!(is_redundant("Light-emitting diode (LED)", "LEDs"));
        assert!(is_redundant("LEDs", "Light-emitting diode (LED)"));
        assert!(is_redundant("Integrated Circuit (IC)", "ICs"));
    }

    #[test]
    fn test_no_match_is_preserved() {
        assert!(!is_redundant("Standoffs & Spacers", "Standoff or Spacer"));
        assert!(!is_redundant("Resistors", "Capacitor"));
        assert!(!is_redundant("Diodes", "Light-emitting diode (LED)"));
    }

    #[test]
    fn test_empty_is_never_redundant() {
        assert!(!is_redundant("", ""));
        assert!(!is_redundant("", "Resistor"));
        assert!(!is_redundant("Resistor", "   "));
        assert!(!is_redundant("()", "LED"));
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("Resistors", "Resistor"),
            ("Light-emitting diode (LED)", "LEDs"),
            ("Standoffs & Spacers", "Standoff or Spacer"),
            ("Jack", "Jacks"),
        ];
        for (a, b) in pairs {
            assert_eq!(is_redundant(a, b), is_redundant(b, a), "{} / {}", a, b);
        }
    }
}
