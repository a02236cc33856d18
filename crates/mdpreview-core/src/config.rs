//! Previewer configuration.

use serde::Deserialize;
use smol_str::SmolStr;

use crate::convert::ConvertOptions;
use crate::error::ConfigError;

/// Storage keys for persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub markdown_key: SmolStr,
    pub theme_key: SmolStr,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            markdown_key: SmolStr::new_static("markdown"),
            theme_key: SmolStr::new_static("darkMode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewerConfig {
    pub storage: StorageKeys,
    pub convert: ConvertOptions,
    /// DOM id of the text area.
    pub editor_id: SmolStr,
    /// Class put on the document root while the dark theme is active.
    pub dark_class: SmolStr,
}

impl Default for PreviewerConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            convert: ConvertOptions::default(),
            editor_id: SmolStr::new_static("markdown-input"),
            dark_class: SmolStr::new_static("dark"),
        }
    }
}

impl PreviewerConfig {
    /// Defaults overridden by the fields present in `json`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like [`from_json`](Self::from_json) but treats a missing or blank
    /// override as "use defaults".
    pub fn from_override(json: Option<&str>) -> Result<Self, ConfigError> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => Self::from_json(json),
        }
    }
}
