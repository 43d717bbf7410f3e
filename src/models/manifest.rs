//! The resolved build manifest handed to the build engine.

use schemars::JsonSchema;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::dependency::{Coordinate, ResolvedDependency};
use super::layer::LayerKind;
use super::plugin::PluginSpec;
use super::setting::SettingValue;
use super::signing::VariantSigning;

/// A merged setting and the layer that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResolvedSetting {
    pub value: SettingValue,
    pub layer: String,
    pub kind: LayerKind,
}

/// Fully resolved build configuration.
///
/// Built once by [`crate::resolver::resolve`] and read-only afterwards:
/// there are no setters and all fields are private.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BuildManifest {
    project: String,
    plugins: Vec<PluginSpec>,
    settings: BTreeMap<String, ResolvedSetting>,
    dependencies: Vec<ResolvedDependency>,
    variants: BTreeMap<String, VariantSigning>,
}

impl BuildManifest {
    pub(crate) fn new(
        project: String,
        plugins: Vec<PluginSpec>,
        settings: BTreeMap<String, ResolvedSetting>,
        dependencies: Vec<ResolvedDependency>,
        variants: BTreeMap<String, VariantSigning>,
    ) -> Self {
        Self {
            project,
            plugins,
            settings,
            dependencies,
            variants,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Applied plugins, in application order.
    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }

    /// All merged settings, sorted by key.
    pub fn settings(&self) -> &BTreeMap<String, ResolvedSetting> {
        &self.settings
    }

    /// Effective value of a single setting.
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key).map(|s| &s.value)
    }

    /// Resolved dependencies, in declaration order with duplicates removed.
    pub fn dependencies(&self) -> &[ResolvedDependency] {
        &self.dependencies
    }

    /// Resolved version of a coordinate, if it is a dependency.
    pub fn dependency_version(&self, coordinate: &Coordinate) -> Option<&str> {
        self.dependencies
            .iter()
            .find(|d| &d.coordinate == coordinate)
            .map(|d| d.version.as_str())
    }

    /// Signing selection per variant, sorted by variant name.
    pub fn variants(&self) -> &BTreeMap<String, VariantSigning> {
        &self.variants
    }

    pub fn signing_for(&self, variant: &str) -> Option<&VariantSigning> {
        self.variants.get(variant)
    }

    /// SHA-256 over the canonical JSON form, hex encoded.
    ///
    /// Equal manifests always produce equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::signing::SigningProfile;

    fn sample() -> BuildManifest {
        let mut settings = BTreeMap::new();
        settings.insert(
            "minSdk".to_string(),
            ResolvedSetting {
                value: SettingValue::Integer(23),
                layer: "project".into(),
                kind: LayerKind::Project,
            },
        );
        let mut variants = BTreeMap::new();
        variants.insert(
            "release".to_string(),
            VariantSigning {
                profile: SigningProfile::new("debug"),
                fallback: true,
            },
        );
        BuildManifest::new(
            "dog_book".into(),
            vec![PluginSpec::new("com.android.application")],
            settings,
            vec![ResolvedDependency {
                configuration: "implementation".into(),
                coordinate: Coordinate::new("androidx.multidex", "multidex"),
                version: "2.0.1".into(),
                constraint_set: None,
            }],
            variants,
        )
    }

    #[test]
    fn accessors_expose_resolved_values() {
        let m = sample();
        assert_eq!(m.project(), "dog_book");
        assert_eq!(m.setting("minSdk"), Some(&SettingValue::Integer(23)));
        assert_eq!(m.setting("targetSdk"), None);
        assert_eq!(
            m.dependency_version(&Coordinate::new("androidx.multidex", "multidex")),
            Some("2.0.1")
        );
        assert_eq!(m.signing_for("release").unwrap().profile.name, "debug");
        assert!(m.signing_for("debug").is_none());
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let mut c = sample();
        c.project = "other".into();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
