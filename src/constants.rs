//! App-wide constants.
//!
//! Centralises the tool name, file names, and environment variable names
//! so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "keel";

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was built for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Default project description filename.
pub const PROJECT_FILENAME: &str = "keel.toml";

/// Repo-local tool settings filename.
pub const CONFIG_FILENAME: &str = ".keel.toml";

/// Directory name under `~/.config/` for global tool settings.
pub const CONFIG_DIR: &str = "keel";

/// Tracing filter used when neither `KEEL_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_FORMAT: &str = "KEEL_FORMAT";
pub const ENV_PROJECT: &str = "KEEL_PROJECT";
pub const ENV_PLUGIN_VALUES: &str = "KEEL_PLUGIN_VALUES";
pub const ENV_LOG: &str = "KEEL_LOG";
pub const ENV_COLOR: &str = "KEEL_COLOR";
