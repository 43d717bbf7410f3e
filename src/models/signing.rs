//! Signing profiles and build variants.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named signing identity.
///
/// Only references to key material are kept here: the keystore path and the
/// names of environment variables that hold passwords. The build engine
/// reads the secrets itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SigningProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_password_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_password_env: Option<String>,
}

impl SigningProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store_file: None,
            key_alias: None,
            store_password_env: None,
            key_password_env: None,
        }
    }
}

/// Signing table plus the fallback rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SigningPolicy {
    pub profiles: BTreeMap<String, SigningProfile>,
    /// Profile used for variants that do not name one, if fallback is allowed.
    pub default_profile: Option<String>,
    /// Fallback is opt-in; without it every variant must name a profile.
    pub allow_fallback: bool,
}

impl SigningPolicy {
    pub fn with_profile(mut self, profile: SigningProfile) -> Self {
        self.profiles.insert(profile.name.clone(), profile);
        self
    }

    pub fn with_fallback(mut self, default_profile: impl Into<String>) -> Self {
        self.default_profile = Some(default_profile.into());
        self.allow_fallback = true;
        self
    }
}

/// A named build configuration such as `debug` or `release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    /// Explicitly selected signing profile.
    pub signing: Option<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signing: None,
        }
    }

    pub fn signed_with(name: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signing: Some(profile.into()),
        }
    }
}

/// The signing profile chosen for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct VariantSigning {
    pub profile: SigningProfile,
    /// `true` when the profile came from the fallback rule.
    pub fallback: bool,
}
