//! Configuration resolution.
//!
//! Turns a fully materialised [`ResolveInput`] into a [`BuildManifest`] in a
//! single synchronous pass:
//!
//! 1. check layer kinds never go down in rank, then merge (later layer wins)
//! 2. type-check merged settings against the schema
//! 3. check ordering rules between settings
//! 4. resolve dependency versions through constraint sets
//! 5. reject coordinates that resolve to two versions
//! 6. pick a signing profile per variant
//!
//! The first failure aborts the run. Nothing here performs I/O.

pub mod dependencies;
pub mod merge;
pub mod schema;
pub mod signing;

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::{
    BuildManifest, DependencyDeclaration, Layer, LayerKind, PluginSpec, SettingValue,
    SigningPolicy, Variant, VersionConstraintSet,
};

pub use dependencies::resolve_dependencies;
pub use merge::{explain, merge_layers, MergedSettings, Provenance};
pub use schema::{RangeRule, Schema, SettingType};
pub use signing::resolve_signing;

/// Errors that abort a resolution run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("layer '{layer}' ({kind}) comes after a {previous} layer; layers must be ordered platform, project, plugin")]
    LayerOrder {
        layer: String,
        kind: LayerKind,
        previous: LayerKind,
    },

    #[error("setting '{key}' must be {expected}, found {found}")]
    ConfigType {
        key: String,
        expected: String,
        found: String,
    },

    #[error("setting '{upper}' ({upper_value}) must not be lower than '{lower}' ({lower_value})")]
    ConfigRange {
        lower: String,
        lower_value: i64,
        upper: String,
        upper_value: i64,
    },

    #[error("dependency '{coordinate}' has no version and no constraint set pins it")]
    UnresolvedDependency { coordinate: String },

    #[error("dependency '{coordinate}' resolves to both {first} and {second}")]
    DependencyConflict {
        coordinate: String,
        first: String,
        second: String,
    },

    #[error("variant '{variant}' has no usable signing profile: {reason}")]
    MissingSigningConfig { variant: String, reason: String },

    #[error("variant '{variant}' is declared more than once")]
    DuplicateVariant { variant: String },
}

/// Everything the resolver needs, already parsed and in memory.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    pub project: String,
    /// Applied plugins, in application order.
    pub plugins: Vec<PluginSpec>,
    /// Settings layers, lowest precedence first.
    pub layers: Vec<Layer>,
    pub schema: Schema,
    pub dependencies: Vec<DependencyDeclaration>,
    /// Constraint sets the project uses, in lookup order.
    pub constraint_refs: Vec<String>,
    pub constraint_sets: IndexMap<String, VersionConstraintSet>,
    pub signing: SigningPolicy,
    pub variants: Vec<Variant>,
}

/// Resolve the input into a manifest, or fail with the first error found.
pub fn resolve(input: &ResolveInput) -> Result<BuildManifest, ResolveError> {
    tracing::debug!(
        project = %input.project,
        layers = input.layers.len(),
        dependencies = input.dependencies.len(),
        variants = input.variants.len(),
        "resolving build configuration"
    );

    check_layer_order(&input.layers)?;
    let merged = merge_layers(&input.layers);
    tracing::debug!(settings = merged.len(), "merged settings");
    check_types(&merged, &input.schema)?;
    check_ranges(&merged, &input.schema)?;

    let dependencies = resolve_dependencies(
        &input.dependencies,
        &input.constraint_refs,
        &input.constraint_sets,
    )?;
    let variants = resolve_signing(&input.variants, &input.signing)?;

    Ok(BuildManifest::new(
        input.project.clone(),
        input.plugins.clone(),
        merged.into_entries(),
        dependencies,
        variants,
    ))
}

/// Check that layer kinds never decrease, so a plugin value can never be
/// shadowed by a project or platform value.
pub fn check_layer_order(layers: &[Layer]) -> Result<(), ResolveError> {
    for pair in layers.windows(2) {
        let (previous, layer) = (&pair[0], &pair[1]);
        if layer.kind() < previous.kind() {
            return Err(ResolveError::LayerOrder {
                layer: layer.name().to_string(),
                kind: layer.kind(),
                previous: previous.kind(),
            });
        }
    }
    Ok(())
}

/// Check every merged setting that has a declared type.
pub fn check_types(merged: &MergedSettings, schema: &Schema) -> Result<(), ResolveError> {
    for (key, entry) in merged.iter() {
        let Some(ty) = schema.type_of(key) else {
            continue;
        };
        ty.check(&entry.value).map_err(|expected| ResolveError::ConfigType {
            key: key.to_string(),
            expected,
            found: format!("{} from layer '{}'", entry.value, entry.layer),
        })?;
    }
    Ok(())
}

/// Check ordering rules between pairs of integer settings.
///
/// A rule is skipped when either side is absent; non-integer values were
/// already rejected by [`check_types`] for typed keys.
pub fn check_ranges(merged: &MergedSettings, schema: &Schema) -> Result<(), ResolveError> {
    for rule in schema.ranges() {
        let lower = merged.get(&rule.lower).and_then(SettingValue::as_integer);
        let upper = merged.get(&rule.upper).and_then(SettingValue::as_integer);
        if let (Some(lower_value), Some(upper_value)) = (lower, upper) {
            if upper_value < lower_value {
                return Err(ResolveError::ConfigRange {
                    lower: rule.lower.clone(),
                    lower_value,
                    upper: rule.upper.clone(),
                    upper_value,
                });
            }
        }
    }
    Ok(())
}
