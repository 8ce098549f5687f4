//! # Boundary Configuration
//!
//! Hosts usually discover boundaries at session setup (symlink targets, configured
//! virtual roots) but they can also be declared in a file:
//!
//! ```toml
//! boundaries = ["./a/b", "./a/b/g/1"]
//! dedupe = false
//! ```
//!
//! The same shape is accepted as JSON. The format is picked from the file extension.
//! Unknown keys are rejected so a typo cannot silently drop a boundary.

use crate::boundary::BoundarySet;
use crate::error::{JailError, Result};
use crate::path::JailPath;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Declarative description of a boundary set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JailConfig {
    /// Boundary paths, in any anchor form accepted by [`JailPath::parse`].
    #[serde(default)]
    pub boundaries: Vec<String>,
    /// Drop repeated boundaries (with a warning) instead of failing.
    #[serde(default)]
    pub dedupe: bool,
}

impl JailConfig {
    pub fn new(boundaries: Vec<String>) -> Self {
        JailConfig {
            boundaries,
            dedupe: false,
        }
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> std::result::Result<Self, String> = match format.as_deref() {
            Some("toml") => |text| toml::from_str(text).map_err(|e| e.to_string()),
            Some("json") => |text| serde_json::from_str(text).map_err(|e| e.to_string()),
            _ => {
                return Err(JailError::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let content = fs::read_to_string(path).map_err(|source| JailError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&content).map_err(|reason| JailError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(
            "Loaded {} boundaries from {}",
            config.boundaries.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| JailError::ConfigParse {
            path: "<inline toml>".into(),
            reason: e.to_string(),
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| JailError::ConfigParse {
            path: "<inline json>".into(),
            reason: e.to_string(),
        })
    }

    /// Parse every entry and build the set.
    ///
    /// With `dedupe` set, later duplicates are dropped; otherwise they are an error.
    pub fn into_boundary_set(self) -> Result<BoundarySet> {
        let parsed = self
            .boundaries
            .iter()
            .map(|text| JailPath::parse(text))
            .collect::<Result<Vec<_>>>()?;

        if !self.dedupe {
            return BoundarySet::new(parsed);
        }

        let mut seen = HashSet::new();
        let unique = parsed
            .into_iter()
            .filter(|path| {
                let first = seen.insert(path.clone());
                if !first {
                    warn!("Dropping duplicate boundary '{}'", path);
                }
                first
            })
            .collect::<Vec<_>>();
        BoundarySet::new(unique)
    }
}
