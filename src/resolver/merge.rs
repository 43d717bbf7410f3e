//! Layer merging.
//!
//! Layers are folded in the order given: a later layer overwrites any key an
//! earlier one set. The result is keyed by setting name in sorted order, so
//! only the relative order of layers matters, never the key order inside one.

use std::collections::BTreeMap;

use crate::models::{Layer, LayerKind, ResolvedSetting, SettingValue};

/// Settings after merging, each tagged with the layer it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedSettings {
    entries: BTreeMap<String, ResolvedSetting>,
}

impl MergedSettings {
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedSetting)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Collapse the merged values into a single layer, e.g. to stack it
    /// under further layers.
    pub fn into_layer(self, name: impl Into<String>, kind: LayerKind) -> Layer {
        let mut layer = Layer::new(name, kind);
        for (key, entry) in self.entries {
            // Keys of a BTreeMap are unique, so this cannot collide.
            let _ = layer.insert(key, entry.value);
        }
        layer
    }

    pub(crate) fn into_entries(self) -> BTreeMap<String, ResolvedSetting> {
        self.entries
    }
}

/// Merge layers, lowest precedence first.
pub fn merge_layers(layers: &[Layer]) -> MergedSettings {
    let mut entries = BTreeMap::new();
    for layer in layers {
        tracing::debug!(layer = layer.name(), kind = %layer.kind(), keys = layer.len(), "merging layer");
        for (key, value) in layer.iter() {
            entries.insert(
                key.to_string(),
                ResolvedSetting {
                    value: value.clone(),
                    layer: layer.name().to_string(),
                    kind: layer.kind(),
                },
            );
        }
    }
    MergedSettings { entries }
}

/// One layer's contribution to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub layer: String,
    pub kind: LayerKind,
    pub value: SettingValue,
}

/// Every definition of `key`, lowest precedence first. The last entry is the
/// value that wins the merge; an empty result means no layer sets the key.
pub fn explain(layers: &[Layer], key: &str) -> Vec<Provenance> {
    layers
        .iter()
        .filter_map(|layer| {
            layer.get(key).map(|value| Provenance {
                layer: layer.name().to_string(),
                kind: layer.kind(),
                value: value.clone(),
            })
        })
        .collect()
}
