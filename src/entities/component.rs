//! Component attribute set - the input to description synthesis

use log::warn;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::describe::units;

/// Mounting style of a component body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MountingStyle {
    /// Surface mount
    Smt,
    /// Through hole
    Th,
}

impl std::fmt::Display for MountingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountingStyle::Smt => write!(f, "smt"),
            MountingStyle::Th => write!(f, "th"),
        }
    }
}

impl std::str::FromStr for MountingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "smt" | "smd" | "surface mount" => Ok(MountingStyle::Smt),
            "th" | "tht" | "through hole" | "through-hole" => Ok(MountingStyle::Th),
            _ => Err(format!("Invalid mounting style: {}. Use 'smt' or 'th'", s)),
        }
    }
}

impl TryFrom<String> for MountingStyle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Potentiometer taper (resistance-vs-rotation curve)
///
/// Unrecognised names are kept verbatim in [`PotTaper::Other`] so they can
/// still be printed; their taper code falls back to `B`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PotTaper {
    Linear,
    Logarithmic,
    ReverseLogarithmic,
    Custom,
    Other(String),
}

impl PotTaper {
    /// Full display name, e.g. "Reverse Logarithmic"
    pub fn name(&self) -> &str {
        match self {
            PotTaper::Linear => "Linear",
            PotTaper::Logarithmic => "Logarithmic",
            PotTaper::ReverseLogarithmic => "Reverse Logarithmic",
            PotTaper::Custom => "Custom",
            PotTaper::Other(name) => name,
        }
    }

    /// Single-letter taper code used as the value prefix
    pub fn code(&self) -> char {
        units::taper_code(Some(self.name()))
    }
}

impl std::fmt::Display for PotTaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<String> for PotTaper {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "linear" => PotTaper::Linear,
            "logarithmic" => PotTaper::Logarithmic,
            "reverse logarithmic" => PotTaper::ReverseLogarithmic,
            "custom" => PotTaper::Custom,
            _ => PotTaper::Other(value.trim().to_string()),
        }
    }
}

impl From<&str> for PotTaper {
    fn from(value: &str) -> Self {
        PotTaper::from(value.to_string())
    }
}

impl From<PotTaper> for String {
    fn from(value: PotTaper) -> Self {
        value.name().to_string()
    }
}

/// Potentiometer shaft material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum ShaftMaterial {
    Plastic,
    /// Metal is the unlabeled default
    #[default]
    Metal,
}

impl std::fmt::Display for ShaftMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaftMaterial::Plastic => write!(f, "Plastic"),
            ShaftMaterial::Metal => write!(f, "Metal"),
        }
    }
}

impl std::str::FromStr for ShaftMaterial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plastic" => Ok(ShaftMaterial::Plastic),
            "metal" => Ok(ShaftMaterial::Metal),
            _ => Err(format!(
                "Invalid shaft material: {}. Use 'Plastic' or 'Metal'",
                s
            )),
        }
    }
}

impl TryFrom<String> for ShaftMaterial {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Potentiometer body angle relative to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AngleType {
    Straight,
    #[serde(rename = "Right-Angle")]
    RightAngle,
    #[serde(rename = "Right-Angle-Long")]
    RightAngleLong,
}

impl std::fmt::Display for AngleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleType::Straight => write!(f, "Straight"),
            AngleType::RightAngle => write!(f, "Right-Angle"),
            AngleType::RightAngleLong => write!(f, "Right-Angle-Long"),
        }
    }
}

impl std::str::FromStr for AngleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "straight" => Ok(AngleType::Straight),
            "right-angle" => Ok(AngleType::RightAngle),
            "right-angle-long" => Ok(AngleType::RightAngleLong),
            _ => Err(format!(
                "Invalid angle type: {}. Use Straight, Right-Angle, or Right-Angle-Long",
                s
            )),
        }
    }
}

impl TryFrom<String> for AngleType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Caller-side validation failures
///
/// The description engine itself never fails; these are checked at the
/// boundary before a record is handed to it.
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum AttributeError {
    #[error("component type is missing")]
    #[diagnostic(
        code(catdesc::attributes::missing_type),
        help("Every component needs a `type`, e.g. \"Resistor\" or \"Potentiometer\"")
    )]
    MissingTypeName,

    #[error("`{field}` is set without `{unit_field}`")]
    #[diagnostic(
        code(catdesc::attributes::unpaired_value),
        help("A magnitude is only meaningful together with its unit (e.g. `ohms` with `ohms_unit`)")
    )]
    MissingUnit {
        field: &'static str,
        unit_field: &'static str,
    },

    #[error("`{unit_field}` is set without `{field}`")]
    #[diagnostic(
        code(catdesc::attributes::unpaired_unit),
        help("A unit is only meaningful together with its magnitude (e.g. `farads_unit` with `farads`)")
    )]
    MissingMagnitude {
        field: &'static str,
        unit_field: &'static str,
    },

    #[error("`{field}` must be a finite number, got {value}")]
    #[diagnostic(code(catdesc::attributes::non_finite))]
    NonFiniteMagnitude { field: &'static str, value: f64 },

    #[error("`pot_gangs` must be at least 1")]
    #[diagnostic(code(catdesc::attributes::zero_gangs))]
    ZeroGangs,
}

/// Read-only attribute set for one catalog component
///
/// Field names follow the catalog record; the short aliases (`type`,
/// `category`, `manufacturer`, `part_no`, ...) match the CSV import headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentAttributes {
    /// Canonical component type, e.g. "Resistor"
    #[serde(rename = "type", alias = "type_name")]
    pub type_name: String,

    /// Secondary taxonomy label, e.g. "Resistors"
    #[serde(
        rename = "category",
        alias = "category_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ohms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ohms_unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farads: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farads_unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_rating: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wattage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_style: Option<MountingStyle>,

    /// Physical size or footprint label
    #[serde(
        rename = "size",
        alias = "size_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub size_name: Option<String>,

    #[serde(
        rename = "manufacturer",
        alias = "manufacturer_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer_name: Option<String>,

    #[serde(
        rename = "part_no",
        alias = "manufacturer_part_no",
        alias = "part",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer_part_no: Option<String>,

    // Potentiometer-only fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_taper: Option<PotTaper>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_shaft_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_shaft_material: Option<ShaftMaterial>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_angle_type: Option<AngleType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_gangs: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_mounting_type: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pot_split_shaft: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_shaft_diameter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_shaft_length: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_base_width: Option<String>,

    /// Previously generated description, persisted by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComponentAttributes {
    /// Create an attribute set with only the type populated
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Resistance magnitude and unit, when both are present
    pub fn resistance(&self) -> Option<(f64, &str)> {
        match (self.ohms, present(&self.ohms_unit)) {
            (Some(value), Some(unit)) => Some((value, unit)),
            _ => None,
        }
    }

    /// Capacitance magnitude and unit, when both are present
    pub fn capacitance(&self) -> Option<(f64, &str)> {
        match (self.farads, present(&self.farads_unit)) {
            (Some(value), Some(unit)) => Some((value, unit)),
            _ => None,
        }
    }

    /// Check the caller contract before handing the set to the engine
    ///
    /// Unknown unit symbols are logged, not rejected.
    pub fn validate(&self) -> Result<(), AttributeError> {
        if self.type_name.trim().is_empty() {
            return Err(AttributeError::MissingTypeName);
        }

        check_pair("ohms", "ohms_unit", self.ohms, &self.ohms_unit)?;
        check_pair("farads", "farads_unit", self.farads, &self.farads_unit)?;

        if self.pot_gangs == Some(0) {
            return Err(AttributeError::ZeroGangs);
        }

        for unit in [present(&self.ohms_unit), present(&self.farads_unit)]
            .into_iter()
            .flatten()
        {
            if units::canonical_unit(unit).is_none() {
                warn!(
                    "Unrecognized unit '{}' on '{}', it will be printed verbatim",
                    unit, self.type_name
                );
            }
        }

        Ok(())
    }
}

/// Trimmed string value, treating empty strings as absent
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn check_pair(
    field: &'static str,
    unit_field: &'static str,
    value: Option<f64>,
    unit: &Option<String>,
) -> Result<(), AttributeError> {
    match (value, present(unit)) {
        (Some(v), _) if !v.is_finite() => Err(AttributeError::NonFiniteMagnitude { field, value: v }),
        (Some(_), None) => Err(AttributeError::MissingUnit { field, unit_field }),
        (None, Some(_)) => Err(AttributeError::MissingMagnitude { field, unit_field }),
        _ => Ok(()),
    }
}
