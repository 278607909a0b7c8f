use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PROPERTIES_FILE_NAME: &str = "ErraiApp.properties";
pub const DEFAULT_BINDABLE_TYPES_KEY: &str = "errai.ui.bindableTypes";

/// Settings for the Errai analyzer, read from the `[errai]` table of a TOML
/// document.
///
/// ```toml
/// [errai]
/// extra_bindable_types = ["com.example.Address"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErraiConfig {
    /// File name of the per-module Errai configuration resource.
    pub properties_file_name: String,
    /// Key listing additional bindable types (whitespace separated).
    pub bindable_types_key: String,
    /// Types treated as bindable in every project, on top of the configured ones.
    pub extra_bindable_types: Vec<String>,
}

impl Default for ErraiConfig {
    fn default() -> Self {
        Self {
            properties_file_name: DEFAULT_PROPERTIES_FILE_NAME.to_string(),
            bindable_types_key: DEFAULT_BINDABLE_TYPES_KEY.to_string(),
            extra_bindable_types: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    errai: ErraiConfig,
}

impl ErraiConfig {
    /// Parse the `[errai]` table of `text`. Other tables are ignored; a
    /// missing table yields the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let document: Document = toml::from_str(text)?;
        Ok(document.errai)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
