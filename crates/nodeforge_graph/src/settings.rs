// SPDX-License-Identifier: MIT OR Apache-2.0
//! Builder settings stored as RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Error loading or saving settings and catalogs
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// RON text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// Value could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
    /// File was written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version understood
        supported: u32,
    },
}

/// Pretty-printer configuration shared by settings and catalog files
pub(crate) fn pretty_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::default()
        .struct_names(true)
        .enumerate_arrays(false)
}

/// Arrangement options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangeSettings {
    /// Lay out the outermost graph when its scope exits
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Distance between columns
    #[serde(default = "default_spacing")]
    pub horizontal_spacing: f32,
    /// Distance between nodes in a column
    #[serde(default = "default_spacing")]
    pub vertical_spacing: f32,
}

fn default_true() -> bool {
    true
}

fn default_spacing() -> f32 {
    200.0
}

impl Default for ArrangeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            horizontal_spacing: default_spacing(),
            vertical_spacing: default_spacing(),
        }
    }
}

/// Settings for a [`crate::TreeBuilder`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Arrangement options
    #[serde(default)]
    pub arrange: ArrangeSettings,
    /// Name used by [`crate::TreeBuilder::enter_default`]
    #[serde(default = "default_tree_name")]
    pub default_tree_name: String,
}

fn default_version() -> u32 {
    SETTINGS_FORMAT_VERSION
}

fn default_tree_name() -> String {
    "Geometry Nodes".to_string()
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            arrange: ArrangeSettings::default(),
            default_tree_name: default_tree_name(),
        }
    }
}

impl BuilderSettings {
    /// Parse settings from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let settings: BuilderSettings = ron::from_str(text)?;

        // Version check
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings)
    }

    /// Serialize settings to RON text
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, pretty_config())?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
