//! Numeric value formatting

use crate::describe::units::{canonical_unit, pot_suffix, unit_exponent};

/// Render a magnitude, collapsing whole-valued floats to integers
///
/// `10.0` renders as `10`, `0.47` as `0.47`. No precision is forced.
pub fn format_magnitude(magnitude: f64) -> String {
    if magnitude.is_finite() && magnitude.fract() == 0.0 && magnitude.abs() < 1e15 {
        format!("{}", magnitude as i64)
    } else {
        format!("{}", magnitude)
    }
}

/// Render a magnitude directly followed by its unit, e.g. `10kΩ`
///
/// Unknown units are appended verbatim.
pub fn format_value(magnitude: f64, unit: &str) -> String {
    format!("{}{}", format_magnitude(magnitude), unit)
}

/// Potentiometer resistance shorthand, e.g. `250K`, `500`, `1M`
///
/// Recognised resistance units are promoted to the next multiplier once the
/// magnitude reaches 1000 (`47000 Ω` is `47K`); they are never demoted.
/// Other units are appended as-is.
pub fn format_pot_value(magnitude: f64, unit: &str) -> String {
    let is_resistance = matches!(canonical_unit(unit), Some("Ω" | "kΩ" | "MΩ"));
    if !is_resistance {
        return format!("{}{}", format_magnitude(magnitude), pot_suffix(unit));
    }

    let mut value = magnitude;
    let mut exponent = unit_exponent(unit).unwrap_or(0);
    while exponent < 6 && value.abs() >= 1000.0 {
        value /= 1000.0;
        exponent += 3;
    }

    let suffix = match exponent {
        0 => "",
        3 => "K",
        _ => "M",
    };
    format!("{}{}", format_magnitude(value), suffix)
}
