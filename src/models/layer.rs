//! Configuration layers.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use super::setting::SettingValue;

/// Where a layer's values come from. Declared lowest precedence first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LayerKind {
    /// Framework/platform defaults.
    Platform,
    /// Values written explicitly in the project description.
    Project,
    /// Values computed by a plugin at resolution time.
    Plugin,
}

/// A key was set twice within one layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("setting '{key}' is defined more than once in layer '{layer}'")]
pub struct DuplicateSettingError {
    pub layer: String,
    pub key: String,
}

/// One named source of settings.
///
/// Keys are unique within a layer; insertion order is kept for display but
/// has no effect on merging.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    kind: LayerKind,
    settings: IndexMap<String, SettingValue>,
}

impl Layer {
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            settings: IndexMap::new(),
        }
    }

    /// Build a layer from key/value pairs, rejecting repeated keys.
    pub fn from_pairs<K, V>(
        name: impl Into<String>,
        kind: LayerKind,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, DuplicateSettingError>
    where
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let mut layer = Self::new(name, kind);
        for (key, value) in pairs {
            layer.insert(key, value)?;
        }
        Ok(layer)
    }

    /// Add a setting. Fails if the key is already present in this layer.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Result<(), DuplicateSettingError> {
        let key = key.into();
        if self.settings.contains_key(&key) {
            return Err(DuplicateSettingError {
                layer: self.name.clone(),
                key,
            });
        }
        self.settings.insert(key, value.into());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_kind_orders_by_precedence() {
        assert!(LayerKind::Platform < LayerKind::Project);
        assert!(LayerKind::Project < LayerKind::Plugin);
    }

    #[test]
    fn layer_kind_parses_case_insensitively() {
        assert_eq!("Plugin".parse::<LayerKind>().unwrap(), LayerKind::Plugin);
        assert_eq!(LayerKind::Project.to_string(), "project");
        assert!("vendor".parse::<LayerKind>().is_err());
    }

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut layer = Layer::new("project", LayerKind::Project);
        layer.insert("minSdk", 23).unwrap();
        let err = layer.insert("minSdk", 24).unwrap_err();
        assert_eq!(err.key, "minSdk");
        assert_eq!(err.layer, "project");
        assert_eq!(layer.get("minSdk"), Some(&SettingValue::Integer(23)));
    }

    #[test]
    fn from_pairs_keeps_insertion_order() {
        let layer = Layer::from_pairs(
            "defaults",
            LayerKind::Platform,
            [("targetSdk", 35), ("minSdk", 21)],
        )
        .unwrap();
        let keys: Vec<_> = layer.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["targetSdk", "minSdk"]);
        assert_eq!(layer.len(), 2);
    }
}
