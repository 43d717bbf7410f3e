//! Tool configuration loading and layering.
//!
//! Handles `.keel.toml` loading, environment variable resolution,
//! and CLI flag merging with proper priority ordering. This configures the
//! `keel` binary itself; the build being resolved is described separately
//! in the project file.

pub mod loader;

pub use loader::{Config, ConfigError};
