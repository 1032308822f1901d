//! Configuration management with layered hierarchy

use clap::ValueEnum;
use log::debug;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

/// File name of the directory-local config, discovered by walking up
pub const LOCAL_CONFIG_FILE: &str = ".catdesc.yaml";

/// Known configuration keys with a short description
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    (
        "default_format",
        "Output format when --format is auto (tsv, csv, md, json, yaml)",
    ),
    (
        "skip_errors",
        "Keep importing after a row fails validation (true/false)",
    ),
    ("csv_delimiter", "Field delimiter for CSV import and output"),
];

/// catdesc configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Continue past invalid CSV rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_errors: Option<bool>,

    /// CSV field delimiter (a single character)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_delimiter: Option<char>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/catdesc/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Nearest .catdesc.yaml above the working directory
        if let Some(local_path) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_local(&cwd))
        {
            if let Some(local) = Self::read_file(&local_path) {
                config.merge(local);
            }
        }

        // 4. Environment variables
        if let Ok(format) = std::env::var("CATDESC_FORMAT") {
            config.default_format = Some(format);
        }
        if let Ok(skip) = std::env::var("CATDESC_SKIP_ERRORS") {
            config.skip_errors = Some(matches!(
                skip.to_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }

        config
    }

    /// Read one config layer, ignoring missing or malformed files
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!("Applied config layer {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Read one config layer for editing
    ///
    /// A missing or empty file yields the defaults. A file that exists but
    /// does not parse is an error, so it is never overwritten.
    pub fn read_for_update(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| {
            miette::miette!(
                help = "Fix or remove the file before changing settings",
                "Config file {} is malformed: {}",
                path.display(),
                e
            )
        })
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "catdesc")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Find the nearest local config walking up from `start`
    pub fn discover_local(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.skip_errors.is_some() {
            self.skip_errors = other.skip_errors;
        }
        if other.csv_delimiter.is_some() {
            self.csv_delimiter = other.csv_delimiter;
        }
    }

    /// Whether invalid import rows should be skipped
    pub fn skip_errors(&self) -> bool {
        self.skip_errors.unwrap_or(false)
    }

    /// CSV delimiter as a byte, falling back to ',' for non-ASCII values
    pub fn csv_delimiter(&self) -> u8 {
        self.csv_delimiter
            .filter(char::is_ascii)
            .map(|c| c as u8)
            .unwrap_or(b',')
    }

    /// Value of a key rendered as text
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_format" => self.default_format.clone(),
            "skip_errors" => self.skip_errors.map(|b| b.to_string()),
            "csv_delimiter" => self.csv_delimiter.map(|c| c.to_string()),
            _ => None,
        }
    }

    /// Set a key from text, validating the value
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default_format" => {
                let format = OutputFormat::from_str(value, true).map_err(|_| {
                    format!(
                        "Invalid value for default_format: {} (expected auto, yaml, tsv, json, csv or md)",
                        value
                    )
                })?;
                self.default_format = format
                    .to_possible_value()
                    .map(|v| v.get_name().to_string());
            }
            "skip_errors" => {
                let parsed = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid value for skip_errors: {}", value))?;
                self.skip_errors = Some(parsed);
            }
            "csv_delimiter" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() => self.csv_delimiter = Some(c),
                    _ => {
                        return Err(format!(
                            "csv_delimiter must be a single ASCII character, got '{}'",
                            value
                        ))
                    }
                }
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Remove a key
    pub fn unset(&mut self, key: &str) -> std::result::Result<(), String> {
        match key {
            "default_format" => self.default_format = None,
            "skip_errors" => self.skip_errors = None,
            "csv_delimiter" => self.csv_delimiter = None,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            default_format: Some("tsv".into()),
            skip_errors: Some(false),
            csv_delimiter: None,
        };
        base.merge(Config {
            default_format: Some("json".into()),
            skip_errors: None,
            csv_delimiter: Some(';'),
        });
        assert_eq!(base.default_format.as_deref(), Some("json"));
        assert_eq!(base.skip_errors, Some(false));
        assert_eq!(base.csv_delimiter(), b';');
    }

    #[test]
    fn test_discover_local_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), "skip_errors: true\n").unwrap();

        let found = Config::discover_local(&nested).unwrap();
        assert_eq!(found, dir.path().join(LOCAL_CONFIG_FILE));

        let config = Config::read_file(&found).unwrap();
        assert!(config.skip_errors());
    }

    #[test]
    fn test_malformed_layer_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "skip_errors: [not, a, bool]\n").unwrap();
        assert!(Config::read_file(&path).is_none());
    }

    #[test]
    fn test_read_for_update_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        assert_eq!(Config::read_for_update(&path).unwrap(), Config::default());

        fs::write(&path, "").unwrap();
        assert_eq!(Config::read_for_update(&path).unwrap(), Config::default());

        fs::write(&path, "default_format: json\nskip_errors: maybe\n").unwrap();
        assert!(Config::read_for_update(&path).is_err());

        fs::write(&path, "default_format: json\ncsv_delimiter: \";\"\n").unwrap();
        let config = Config::read_for_update(&path).unwrap();
        assert_eq!(config.csv_delimiter(), b';');
    }

    #[test]
    fn test_set_and_unset() {
        let mut config = Config::default();
        config.set("skip_errors", "true").unwrap();
        config.set("csv_delimiter", ";").unwrap();
        assert!(config.set("csv_delimiter", "ab").is_err());
        assert!(config.set("skip_errors", "maybe").is_err());
        assert!(config.set("colour", "red").is_err());
        assert!(config.set("default_format", "xml").is_err());
        config.set("default_format", "JSON").unwrap();
        assert_eq!(config.get("default_format").as_deref(), Some("json"));
        assert_eq!(config.get("skip_errors").as_deref(), Some("true"));

        config.unset("skip_errors").unwrap();
        assert_eq!(config.get("skip_errors"), None);
        assert_eq!(config.csv_delimiter(), b';');
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.skip_errors());
        assert_eq!(config.csv_delimiter(), b',');
    }
}
