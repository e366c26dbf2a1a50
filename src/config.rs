//! Shield configuration.
//!
//! Host-facing switches, loaded from JSON. Missing fields take their defaults.

use std::collections::BTreeSet;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::error::ShieldError;

/// Configuration for shield interception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldsConfig {
    /// Stop projectiles at shield boundaries.
    pub intercept_projectiles: bool,
    /// Truncate line-of-fire checks at the first shielded cell.
    pub enable_shot_line_check: bool,
    /// Projectile def names that shields never intercept.
    pub projectile_blacklist: BTreeSet<String>,
}

impl Default for ShieldsConfig {
    fn default() -> Self {
        Self {
            intercept_projectiles: true,
            enable_shot_line_check: true,
            projectile_blacklist: BTreeSet::new(),
        }
    }
}

impl ShieldsConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ShieldError> {
        serde_json::from_str(json).map_err(|e| ShieldError::Config(e.to_string()))
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShieldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ShieldError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Whether projectiles of this def are ever intercepted.
    pub fn intercepts(&self, def_name: &str) -> bool {
        self.intercept_projectiles && !self.projectile_blacklist.contains(def_name)
    }
}
