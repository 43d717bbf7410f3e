//! `keel.toml` parsing.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::plugins::{check_plugin_order, PluginValues};
use super::ProjectError;
use crate::models::dependency::{parse_notation, validate_version};
use crate::models::{
    DependencyDeclaration, Layer, LayerKind, PluginSpec, SettingValue, SigningPolicy,
    SigningProfile, Variant, VersionConstraintSet,
};
use crate::platform::{android_schema, platform_defaults};
use crate::resolver::ResolveInput;

/// Name of the layer holding the project's explicit settings.
pub const PROJECT_LAYER: &str = "project";

/// Parsed project description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectFile {
    pub project: ProjectSection,
    pub plugins: Vec<PluginSpec>,
    /// Project layer; nested tables flatten to dotted keys.
    pub settings: toml::Table,
    pub dependencies: Vec<DependencyEntry>,
    pub platforms: PlatformsSection,
    pub constraint_sets: BTreeMap<String, BTreeMap<String, String>>,
    pub signing: SigningSection,
    pub variants: BTreeMap<String, VariantEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyEntry {
    #[serde(default = "default_configuration")]
    pub configuration: String,
    /// `group:artifact` or `group:artifact:version`.
    pub coordinate: String,
    #[serde(default)]
    pub version: Option<String>,
}

fn default_configuration() -> String {
    "implementation".to_string()
}

/// Constraint sets the project applies, in lookup order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformsSection {
    #[serde(rename = "use")]
    pub uses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SigningSection {
    pub default: Option<String>,
    pub allow_fallback: bool,
    pub profiles: BTreeMap<String, ProfileEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileEntry {
    pub store_file: Option<String>,
    pub key_alias: Option<String>,
    pub store_password_env: Option<String>,
    pub key_password_env: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantEntry {
    pub signing: Option<String>,
}

impl ProjectFile {
    /// Read and parse a project file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProjectError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parse project file content; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ProjectError> {
        toml::from_str(content).map_err(|e| ProjectError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Project name, falling back to the directory the file lives in.
    pub fn name_or_dir(&self, path: &Path) -> String {
        if !self.project.name.is_empty() {
            return self.project.name.clone();
        }
        path.canonicalize()
            .ok()
            .and_then(|p| p.parent().and_then(|d| d.file_name()).map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default()
    }

    /// Validate the project and assemble the resolver input.
    ///
    /// `extra_sets` come from standalone constraint files and must not reuse
    /// a name defined inline.
    pub fn into_input(
        self,
        plugin_values: Option<PluginValues>,
        extra_sets: Vec<VersionConstraintSet>,
    ) -> Result<ResolveInput, ProjectError> {
        check_plugin_order(&self.plugins)?;

        let mut layers = vec![platform_defaults(), self.project_layer()?];
        if let Some(values) = plugin_values {
            layers.extend(values.into_layers(&self.plugins)?);
        }

        let dependencies = self
            .dependencies
            .iter()
            .map(DependencyEntry::to_declaration)
            .collect::<Result<Vec<_>, _>>()?;

        let mut constraint_sets = IndexMap::new();
        for (name, pins) in &self.constraint_sets {
            let mut set = VersionConstraintSet::new(name.clone());
            for (coordinate, version) in pins {
                set.try_pin(coordinate, version)?;
            }
            constraint_sets.insert(name.clone(), set);
        }
        for set in extra_sets {
            if constraint_sets.contains_key(&set.name) {
                return Err(ProjectError::DuplicateConstraintSet { name: set.name });
            }
            constraint_sets.insert(set.name.clone(), set);
        }
        if let Some(name) = self.platforms.uses.iter().find(|n| !constraint_sets.contains_key(*n)) {
            return Err(ProjectError::UnknownConstraintSet { name: name.clone() });
        }

        let signing = SigningPolicy {
            profiles: self
                .signing
                .profiles
                .into_iter()
                .map(|(name, entry)| {
                    let profile = SigningProfile {
                        name: name.clone(),
                        store_file: entry.store_file,
                        key_alias: entry.key_alias,
                        store_password_env: entry.store_password_env,
                        key_password_env: entry.key_password_env,
                    };
                    (name, profile)
                })
                .collect(),
            default_profile: self.signing.default,
            allow_fallback: self.signing.allow_fallback,
        };

        let variants = self
            .variants
            .into_iter()
            .map(|(name, entry)| Variant {
                name,
                signing: entry.signing,
            })
            .collect();

        Ok(ResolveInput {
            project: self.project.name,
            plugins: self.plugins,
            layers,
            schema: android_schema(),
            dependencies,
            constraint_refs: self.platforms.uses,
            constraint_sets,
            signing,
            variants,
        })
    }

    fn project_layer(&self) -> Result<Layer, ProjectError> {
        let mut layer = Layer::new(PROJECT_LAYER, LayerKind::Project);
        flatten_into(&mut layer, "", &self.settings)?;
        Ok(layer)
    }
}

impl DependencyEntry {
    fn to_declaration(&self) -> Result<DependencyDeclaration, ProjectError> {
        let (coordinate, inline_version) = parse_notation(&self.coordinate)?;
        let version = match (inline_version, &self.version) {
            (Some(_), Some(_)) => {
                return Err(ProjectError::VersionGivenTwice {
                    coordinate: coordinate.to_string(),
                });
            }
            (Some(v), None) => Some(v),
            (None, Some(v)) => {
                validate_version(&format!("{coordinate}:{v}"), v)?;
                Some(v.clone())
            }
            (None, None) => None,
        };
        Ok(DependencyDeclaration::new(self.configuration.clone(), coordinate, version))
    }
}

/// Add every value of `table` to `layer`, joining nested table keys with dots.
pub(crate) fn flatten_into(layer: &mut Layer, prefix: &str, table: &toml::Table) -> Result<(), ProjectError> {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let setting = match value {
            toml::Value::Table(nested) => {
                flatten_into(layer, &full, nested)?;
                continue;
            }
            toml::Value::String(s) => SettingValue::String(s.clone()),
            toml::Value::Integer(n) => SettingValue::Integer(*n),
            toml::Value::Boolean(b) => SettingValue::Boolean(*b),
            toml::Value::Float(_) => return Err(unsupported(full, "float")),
            toml::Value::Array(_) => return Err(unsupported(full, "array")),
            toml::Value::Datetime(_) => return Err(unsupported(full, "datetime")),
        };
        layer.insert(full, setting)?;
    }
    Ok(())
}

fn unsupported(key: String, kind: &'static str) -> ProjectError {
    ProjectError::UnsupportedValue { key, kind }
}
