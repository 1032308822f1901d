//! Attribute document loading
//!
//! An attribute document is a YAML or JSON file holding either a single
//! component attribute set or a list of them. Documents can be written
//! back with their `description` fields filled in.

use log::debug;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::entities::ComponentAttributes;
use crate::yaml::{YamlError, YamlSyntaxError};

/// Serialization of an attribute document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension, defaulting to YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// One or more attribute sets read from a file or stdin
#[derive(Debug, Clone)]
pub struct AttributeDocument {
    /// Source file, `None` for stdin
    pub path: Option<PathBuf>,
    pub format: DocumentFormat,
    /// Whether the document was a list rather than a single mapping
    pub is_list: bool,
    pub entries: Vec<ComponentAttributes>,
}

impl AttributeDocument {
    /// Load a document from a path, or from stdin when the path is `-`
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        if path.as_os_str() == "-" {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| YamlError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            let format = if source.trim_start().starts_with(['{', '[']) {
                DocumentFormat::Json
            } else {
                DocumentFormat::Yaml
            };
            return Ok(Self::parse(&source, "<stdin>", format)?);
        }

        let source = fs::read_to_string(path).map_err(|source| YamlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut doc = Self::parse(
            &source,
            &path.display().to_string(),
            DocumentFormat::from_path(path),
        )?;
        doc.path = Some(path.to_path_buf());
        debug!(
            "Loaded {} attribute set(s) from {}",
            doc.entries.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Parse document text
    pub fn parse(
        source: &str,
        filename: &str,
        format: DocumentFormat,
    ) -> Result<Self, YamlSyntaxError> {
        let is_list = looks_like_list(source, format);
        let entries = match (format, is_list) {
            (DocumentFormat::Yaml, true) => serde_yml::from_str::<Vec<ComponentAttributes>>(source)
                .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename))?,
            (DocumentFormat::Yaml, false) => vec![serde_yml::from_str(source)
                .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename))?],
            (DocumentFormat::Json, true) => serde_json::from_str::<Vec<ComponentAttributes>>(source)
                .map_err(|e| YamlSyntaxError::from_json_error(&e, source, filename))?,
            (DocumentFormat::Json, false) => vec![serde_json::from_str(source)
                .map_err(|e| YamlSyntaxError::from_json_error(&e, source, filename))?],
        };

        Ok(Self {
            path: None,
            format,
            is_list,
            entries,
        })
    }

    /// Render the document back to text in its original shape and format
    pub fn render(&self) -> Result<String, String> {
        match (self.format, self.is_list) {
            (DocumentFormat::Yaml, true) => {
                serde_yml::to_string(&self.entries).map_err(|e| e.to_string())
            }
            (DocumentFormat::Yaml, false) => {
                serde_yml::to_string(&self.entries[0]).map_err(|e| e.to_string())
            }
            (DocumentFormat::Json, true) => serde_json::to_string_pretty(&self.entries)
                .map(|s| s + "\n")
                .map_err(|e| e.to_string()),
            (DocumentFormat::Json, false) => serde_json::to_string_pretty(&self.entries[0])
                .map(|s| s + "\n")
                .map_err(|e| e.to_string()),
        }
    }

    /// Write the document back to the file it was loaded from
    pub fn save(&self) -> miette::Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| miette::miette!("Cannot write back a document read from stdin"))?;
        let text = self
            .render()
            .map_err(|e| miette::miette!("Failed to serialize {}: {}", path.display(), e))?;
        fs::write(path, text).map_err(|source| YamlError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} attribute set(s) to {}", self.entries.len(), path.display());
        Ok(())
    }
}

/// Whether the top-level value is a sequence
fn looks_like_list(source: &str, format: DocumentFormat) -> bool {
    match format {
        DocumentFormat::Json => source.trim_start().starts_with('['),
        DocumentFormat::Yaml => source
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#') && *l != "---")
            .is_some_and(|l| l == "-" || l.starts_with("- ") || l.starts_with('[')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_single_yaml() {
        let doc =
            AttributeDocument::parse("type: Jack\ncategory: Jack\n", "x.yaml", DocumentFormat::Yaml)
                .unwrap();
        assert!(!doc.is_list);
        assert_eq!(doc.entries.len(), 1);
        assert_eq!(doc.entries[0].type_name, "Jack");
    }

    #[test]
    fn test_parse_yaml_list_with_comment() {
        let source = "# parts\n- type: Jack\n- type: Fuse\n  size: 5x20mm\n";
        let doc = AttributeDocument::parse(source, "x.yaml", DocumentFormat::Yaml).unwrap();
        assert!(doc.is_list);
        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[1].size_name.as_deref(), Some("5x20mm"));
    }

    #[test]
    fn test_parse_json_list() {
        let source = r#"[{"type": "Resistor", "ohms": 10, "ohms_unit": "kΩ"}]"#;
        let doc = AttributeDocument::parse(source, "x.json", DocumentFormat::Json).unwrap();
        assert!(doc.is_list);
        assert_eq!(doc.entries[0].ohms, Some(10.0));
    }

    #[test]
    fn test_parse_error_is_located() {
        let err = AttributeDocument::parse("category: Jack\n", "x.yaml", DocumentFormat::Yaml)
            .unwrap_err();
        assert!(err.message().contains("type"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.JSON")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.yml")),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn test_save_roundtrips_description() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jack.yaml");
        fs::write(&path, "type: Jack\nmounting_style: th\n").unwrap();

        let mut doc = AttributeDocument::load(&path).unwrap();
        doc.entries[0].description = Some("Jack (Through Hole)".to_string());
        doc.save().unwrap();

        let reloaded = AttributeDocument::load(&path).unwrap();
        assert_eq!(
            reloaded.entries[0].description.as_deref(),
            Some("Jack (Through Hole)")
        );
        assert!(!reloaded.is_list);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AttributeDocument::load(Path::new("/nonexistent/parts.yaml")).unwrap_err();
        assert!(matches!(err, YamlError::Io { .. }));
    }
}
