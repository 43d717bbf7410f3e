//! Standalone constraint set files.
//!
//! A constraint file pins versions for one named set:
//!
//! ```toml
//! name = "firebase-bom"
//!
//! [versions]
//! "com.google.firebase:firebase-analytics" = "22.5.0"
//! ```
//!
//! Fetching these from a remote repository is the caller's business; by the
//! time they reach this module they are local files.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::ProjectError;
use crate::models::VersionConstraintSet;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintFile {
    name: String,
    #[serde(default)]
    versions: BTreeMap<String, String>,
}

/// Parse constraint file content.
pub fn parse_constraint_set(content: &str, path: &Path) -> Result<VersionConstraintSet, ProjectError> {
    let file: ConstraintFile = toml::from_str(content).map_err(|e| ProjectError::ParseFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut set = VersionConstraintSet::new(file.name);
    for (coordinate, version) in &file.versions {
        set.try_pin(coordinate, version)?;
    }
    Ok(set)
}

/// Read and parse a constraint file.
pub fn load_constraint_file(path: &Path) -> Result<VersionConstraintSet, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProjectError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_constraint_set(&content, path)
}
