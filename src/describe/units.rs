//! Static unit and taper lookup tables
//!
//! All tables are immutable and initialised once on first use.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Taper code used when the taper is absent or unrecognised
pub const DEFAULT_TAPER_CODE: char = 'B';

/// Taper name -> shorthand letter
static TAPER_CODES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("Linear", 'B'),
        ("Logarithmic", 'A'),
        ("Reverse Logarithmic", 'C'),
        ("Custom", 'W'),
    ])
});

/// Accepted unit spellings -> canonical symbol
static UNIT_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // resistance
        ("Ω", "Ω"),
        ("ohm", "Ω"),
        ("ohms", "Ω"),
        ("R", "Ω"),
        ("kΩ", "kΩ"),
        ("kohm", "kΩ"),
        ("kohms", "kΩ"),
        ("k", "kΩ"),
        ("K", "kΩ"),
        ("MΩ", "MΩ"),
        ("Mohm", "MΩ"),
        ("Mohms", "MΩ"),
        ("M", "MΩ"),
        // capacitance
        ("mF", "mF"),
        ("μF", "μF"),
        ("µF", "μF"),
        ("uF", "μF"),
        ("nF", "nF"),
        ("pF", "pF"),
    ])
});

/// Canonical symbol -> decimal exponent relative to the base unit
static UNIT_EXPONENTS: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("Ω", 0),
        ("kΩ", 3),
        ("MΩ", 6),
        ("mF", -3),
        ("μF", -6),
        ("nF", -9),
        ("pF", -12),
    ])
});

/// Look up the letter for a taper name, defaulting to `B`
pub fn taper_code(name: Option<&str>) -> char {
    name.and_then(|n| TAPER_CODES.get(n.trim()).copied())
        .unwrap_or(DEFAULT_TAPER_CODE)
}

/// Canonical symbol for a unit spelling, or `None` if unknown
pub fn canonical_unit(symbol: &str) -> Option<&'static str> {
    UNIT_ALIASES.get(symbol.trim()).copied()
}

/// Relative ordering of a unit as a power of ten of its base unit
pub fn unit_exponent(symbol: &str) -> Option<i32> {
    canonical_unit(symbol).and_then(|c| UNIT_EXPONENTS.get(c).copied())
}

/// Scale a magnitude to its base unit (ohms or farads)
pub fn to_base(magnitude: f64, symbol: &str) -> Option<f64> {
    unit_exponent(symbol).map(|exp| magnitude * 10f64.powi(exp))
}

/// Potentiometer shorthand suffix for a resistance unit
///
/// `Ω` has no suffix, `kΩ` is `K`, `MΩ` is `M`; unknown units pass through.
pub fn pot_suffix(symbol: &str) -> &str {
    match canonical_unit(symbol) {
        Some("Ω") => "",
        Some("kΩ") => "K",
        Some("MΩ") => "M",
        _ => symbol,
    }
}

/// Rows of the taper table in code order, for display
pub fn taper_table() -> Vec<(&'static str, char)> {
    let mut rows: Vec<_> = TAPER_CODES.iter().map(|(k, v)| (*k, *v)).collect();
    rows.sort_by_key(|(_, code)| *code);
    rows
}

/// Rows of the unit table as (alias, canonical, exponent), for display
pub fn unit_table() -> Vec<(&'static str, &'static str, i32)> {
    let mut rows: Vec<_> = UNIT_ALIASES
        .iter()
        .map(|(alias, canonical)| (*alias, *canonical, UNIT_EXPONENTS[canonical]))
        .collect();
    rows.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)));
    rows
}
