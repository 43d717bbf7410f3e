//! Build plugin declarations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::setting::SettingValue;

/// A plugin applied to the build, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PluginSpec {
    /// Plugin id, e.g. `com.android.application`.
    pub id: String,
    /// Plugins that must be applied before this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
    /// Plugin-specific options passed through to the build engine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, SettingValue>,
}

impl PluginSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            after: Vec::new(),
            options: BTreeMap::new(),
        }
    }
}
