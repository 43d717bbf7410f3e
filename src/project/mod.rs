//! Project description loading.
//!
//! Reads `keel.toml`, the plugin host's value file and any extra constraint
//! files, validates what can be validated without resolving, and assembles
//! a [`crate::resolver::ResolveInput`]. All file access happens here.

pub mod constraints;
pub mod file;
pub mod plugins;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::dependency::CoordinateError;
use crate::models::DuplicateSettingError;
use crate::resolver::ResolveInput;

pub use constraints::load_constraint_file;
pub use file::ProjectFile;
pub use plugins::PluginValues;

/// Errors while reading or validating project inputs.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("dependency '{coordinate}' gives its version twice")]
    VersionGivenTwice { coordinate: String },

    #[error("setting '{key}' has unsupported {kind} value; use a string, integer or boolean")]
    UnsupportedValue { key: String, kind: &'static str },

    #[error(transparent)]
    DuplicateSetting(#[from] DuplicateSettingError),

    #[error("plugin '{id}' is declared more than once")]
    DuplicatePlugin { id: String },

    #[error("plugin '{id}' must be applied after '{required}', which is not declared before it")]
    PluginOrder { id: String, required: String },

    #[error("plugin values were supplied for '{id}', which is not declared in the project")]
    UndeclaredPlugin { id: String },

    #[error("constraint set '{name}' is referenced but not defined")]
    UnknownConstraintSet { name: String },

    #[error("constraint set '{name}' is defined more than once")]
    DuplicateConstraintSet { name: String },
}

/// Read every input file and build the resolver input.
///
/// The project name falls back to the project file's directory name.
pub fn load_input(
    project_path: &Path,
    plugin_values_path: Option<&Path>,
    constraint_paths: &[PathBuf],
) -> Result<ResolveInput, ProjectError> {
    let mut project = ProjectFile::load(project_path)?;
    project.project.name = project.name_or_dir(project_path);

    let plugin_values = plugin_values_path.map(PluginValues::load).transpose()?;
    let extra_sets = constraint_paths
        .iter()
        .map(|p| load_constraint_file(p))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        project = %project_path.display(),
        plugin_values = plugin_values.is_some(),
        constraint_files = extra_sets.len(),
        "loaded project inputs"
    );
    project.into_input(plugin_values, extra_sets)
}
