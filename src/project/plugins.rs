//! Plugin ordering and plugin-contributed values.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::file::flatten_into;
use super::ProjectError;
use crate::models::{Layer, LayerKind, PluginSpec};

/// Every plugin id must be unique and every `after` dependency must be
/// declared earlier in the list.
pub fn check_plugin_order(plugins: &[PluginSpec]) -> Result<(), ProjectError> {
    let mut applied: HashSet<&str> = HashSet::new();
    for plugin in plugins {
        if let Some(required) = plugin.after.iter().find(|r| !applied.contains(r.as_str())) {
            return Err(ProjectError::PluginOrder {
                id: plugin.id.clone(),
                required: required.clone(),
            });
        }
        if !applied.insert(plugin.id.as_str()) {
            return Err(ProjectError::DuplicatePlugin {
                id: plugin.id.clone(),
            });
        }
    }
    Ok(())
}

/// Values computed by the plugin host, keyed by plugin id.
///
/// File format: one TOML table per plugin id, e.g.
///
/// ```toml
/// ["dev.flutter.flutter-gradle-plugin"]
/// targetSdk = 35
/// versionCode = 12
/// versionName = "1.4.0"
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginValues {
    by_plugin: BTreeMap<String, toml::Table>,
}

impl PluginValues {
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProjectError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let by_plugin = toml::from_str(&content).map_err(|e| ProjectError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { by_plugin })
    }

    /// One plugin layer per plugin that supplied values, in application order.
    pub fn into_layers(mut self, plugins: &[PluginSpec]) -> Result<Vec<Layer>, ProjectError> {
        let mut layers = Vec::new();
        for plugin in plugins {
            let Some(values) = self.by_plugin.remove(&plugin.id) else {
                continue;
            };
            let mut layer = Layer::new(plugin.id.clone(), LayerKind::Plugin);
            flatten_into(&mut layer, "", &values)?;
            tracing::debug!(plugin = %plugin.id, keys = layer.len(), "plugin contributed values");
            layers.push(layer);
        }
        if let Some(id) = self.by_plugin.into_keys().next() {
            return Err(ProjectError::UndeclaredPlugin { id });
        }
        Ok(layers)
    }
}
