//! Runtime configuration.
//!
//! Configuration is a JSON document; every field is optional and falls back
//! to the built-in layout (16 entries, 31-byte names, 2048-byte files,
//! 80-column wrap).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SemkError, SemkResult};

/// Fixed capacities of the name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    /// Number of slots in the table.
    pub max_entries: usize,
    /// Longest accepted entry name, in bytes.
    pub max_name_len: usize,
    /// Content capacity of every file, in bytes.
    pub file_capacity: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            max_entries: 16,
            max_name_len: 31,
            file_capacity: 2048,
        }
    }
}

/// Editor screen geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Columns per row before text wraps.
    pub wrap_width: usize,
    /// Number of text rows below the header.
    pub text_rows: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wrap_width: 80,
            text_rows: 22,
        }
    }
}

/// What the table is seeded with at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootstrapConfig {
    pub directory: String,
    pub sample_file: String,
    pub sample_content: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            directory: "/home/user".to_string(),
            sample_file: "hello.txt".to_string(),
            sample_content: "Hello from the RAM filesystem!".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub layout: Layout,
    pub editor: EditorConfig,
    pub bootstrap: BootstrapConfig,
}

impl Config {
    /// Parse configuration from JSON text.
    pub fn from_json(text: &str) -> SemkResult<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SemkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject layouts the table and editor cannot operate with.
    pub fn validate(&self) -> SemkResult<()> {
        if self.layout.max_entries == 0 || self.layout.max_entries > u16::MAX as usize {
            return Err(SemkError::InvalidConfig(format!(
                "maxEntries must be in 1..={}",
                u16::MAX
            )));
        }
        if self.layout.max_name_len == 0 {
            return Err(SemkError::InvalidConfig("maxNameLen must be positive".into()));
        }
        if self.layout.file_capacity == 0 {
            return Err(SemkError::InvalidConfig("fileCapacity must be positive".into()));
        }
        if self.editor.wrap_width == 0 {
            return Err(SemkError::InvalidConfig("wrapWidth must be positive".into()));
        }
        if self.editor.text_rows == 0 {
            return Err(SemkError::InvalidConfig("textRows must be positive".into()));
        }
        Ok(())
    }
}
