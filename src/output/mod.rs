//! Output renderers: terminal, JSON, TOML.

pub mod json;
pub mod terminal;
pub mod toml;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::BuildManifest;

/// A manifest that could not be serialized. Nothing is written in that case.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to render manifest as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render manifest as TOML: {0}")]
    Toml(#[from] ::toml::ser::Error),
}

/// Trait for rendering a resolved manifest to an output format.
pub trait OutputRenderer {
    /// Render the manifest to a string.
    fn render(&self, manifest: &BuildManifest) -> Result<String, OutputError>;
}

/// Supported manifest output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Terminal,
    /// Pretty-printed JSON for the build engine.
    Json,
    /// TOML for the build engine.
    Toml,
}

impl OutputFormat {
    /// Renderer for this format.
    pub fn renderer(self) -> Box<dyn OutputRenderer> {
        match self {
            OutputFormat::Terminal => Box::new(terminal::TerminalRenderer),
            OutputFormat::Json => Box::new(json::JsonRenderer),
            OutputFormat::Toml => Box::new(self::toml::TomlRenderer),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Terminal => write!(f, "terminal"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Toml => write!(f, "toml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            other => Err(format!(
                "unsupported output format: '{other}'. Supported: terminal, json, toml"
            )),
        }
    }
}

/// JSON Schema of the manifest, as consumed by the build engine.
pub fn manifest_schema() -> Result<String, OutputError> {
    let schema = schemars::schema_for!(BuildManifest);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{
        Coordinate, DependencyDeclaration, Layer, LayerKind, PluginSpec, SigningPolicy,
        SigningProfile, Variant, VersionConstraintSet, BuildManifest, DEBUG_PROFILE,
    };
    use crate::resolver::{resolve, ResolveInput};

    /// Small manifest shared by renderer tests.
    pub fn sample_manifest() -> BuildManifest {
        let analytics = Coordinate::new("com.google.firebase", "firebase-analytics");
        let input = ResolveInput {
            project: "dog_book".into(),
            plugins: vec![PluginSpec::new("com.android.application")],
            layers: vec![
                Layer::from_pairs("platform", LayerKind::Platform, [("minSdk", 21), ("targetSdk", 35)])
                    .unwrap(),
                Layer::from_pairs("project", LayerKind::Project, [("minSdk", 23)]).unwrap(),
            ],
            dependencies: vec![DependencyDeclaration::new("implementation", analytics.clone(), None)],
            constraint_refs: vec!["firebase-bom".into()],
            constraint_sets: [(
                "firebase-bom".to_string(),
                VersionConstraintSet::new("firebase-bom").with_pin(analytics, "22.5.0"),
            )]
            .into_iter()
            .collect(),
            signing: SigningPolicy::default()
                .with_profile(SigningProfile::new(DEBUG_PROFILE))
                .with_fallback(DEBUG_PROFILE),
            variants: vec![Variant::new("release")],
            ..Default::default()
        };
        resolve(&input).unwrap()
    }
}
