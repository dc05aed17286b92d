// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node catalogs: the node types a builder can instantiate and the implicit
//! conversions it may use when linking them.

pub mod geometry;

use crate::compat::CompatibilityTable;
use crate::node::NodeRegistry;
use crate::settings::{pretty_config, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Node types plus the conversion table they are linked with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Node types by type tag
    pub registry: NodeRegistry,
    /// Implicit socket conversions
    #[serde(default)]
    pub compatibility: CompatibilityTable,
}

impl Catalog {
    /// Create a catalog
    pub fn new(registry: NodeRegistry, compatibility: CompatibilityTable) -> Self {
        Self {
            registry,
            compatibility,
        }
    }

    /// Parse a catalog from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize the catalog to RON text
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, pretty_config())?)
    }

    /// Load a catalog from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_ron(&content)?;
        tracing::debug!(path = %path.display(), node_types = catalog.registry.len(), "Loaded node catalog");
        Ok(catalog)
    }

    /// Save the catalog to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
