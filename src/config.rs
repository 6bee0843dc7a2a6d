//! Converter configuration.
//!
//! Every field has a default, so a configuration file only needs the keys
//! it wants to change:
//!
//! ```yaml
//! table_class: report
//! default_header_styles:
//!   font:
//!     bold: true
//! dimension_precedence: styles_last
//! ```

use crate::common::{Error, Result};
use crate::compose::DimensionPrecedence;
use crate::ooxml::xlsx::writer::DEFAULT_NOTE_AUTHOR;
use crate::sheet::StyleMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options shared by the extractor, the composer and the XLSX writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Only tables carrying this class are converted
    pub table_class: Option<String>,
    /// Only rows carrying this class are converted
    pub row_class: Option<String>,
    /// Only cells carrying this class are converted
    pub cell_class: Option<String>,
    /// Style applied to every cell before its own `_excel-styles`
    pub default_styles: StyleMap,
    /// Style applied to `<th>` cells on top of `default_styles`
    pub default_header_styles: StyleMap,
    /// Width/height applied to every cell before its own `_excel-dimensions`
    pub default_dimensions: StyleMap,
    pub dimension_precedence: DimensionPrecedence,
    /// Author recorded on cell notes
    pub note_author: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            table_class: None,
            row_class: None,
            cell_class: None,
            default_styles: StyleMap::new(),
            default_header_styles: StyleMap::new(),
            default_dimensions: StyleMap::new(),
            dimension_precedence: DimensionPrecedence::default(),
            note_author: DEFAULT_NOTE_AUTHOR.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("invalid JSON configuration: {}", e)))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Configuration(format!("invalid YAML configuration: {}", e)))
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// `.json` is read as JSON, `.yaml` and `.yml` as YAML; anything else is
    /// rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            _ => Err(Error::Configuration(format!(
                "unsupported configuration file '{}': expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }

    /// Serialise to YAML, e.g. to write out a starting configuration.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Configuration(format!("failed to serialize configuration to YAML: {}", e)))
    }
}
