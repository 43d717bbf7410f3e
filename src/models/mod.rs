//! Shared types used across all modules.
//!
//! Settings, layers, dependency declarations, signing profiles and the
//! resulting manifest. The loader produces these, the resolver consumes
//! them, and the renderers only ever see the manifest.

pub mod dependency;
pub mod layer;
pub mod manifest;
pub mod plugin;
pub mod setting;
pub mod signing;

pub use dependency::{Coordinate, DependencyDeclaration, ResolvedDependency, VersionConstraintSet};
pub use layer::{DuplicateSettingError, Layer, LayerKind};
pub use manifest::{BuildManifest, ResolvedSetting};
pub use plugin::PluginSpec;
pub use setting::SettingValue;
pub use signing::{SigningPolicy, SigningProfile, Variant, VariantSigning};

/// Name of the signing profile conventionally used for local builds.
pub const DEBUG_PROFILE: &str = "debug";

/// Variant name that triggers a warning when signed through fallback.
pub const RELEASE_VARIANT: &str = "release";
