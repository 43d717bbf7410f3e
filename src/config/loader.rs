//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.keel.toml` in the working directory
//! 4. `~/.config/keel/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::output::OutputFormat;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub project: ProjectConfig,
    pub log: LogConfig,
}

/// How manifests are printed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Unset means "not decided by this layer"; colour is on by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl OutputConfig {
    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

/// Where project inputs are found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project description file.
    pub file: PathBuf,
    /// Plugin host value file, if the plugin host wrote one.
    pub plugin_values: Option<PathBuf>,
    /// Extra constraint set files, applied to every run.
    pub constraints: Vec<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(constants::PROJECT_FILENAME),
            plugin_values: None,
            constraints: Vec::new(),
        }
    }
}

/// Tracing output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `keel=debug`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: constants::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then the config in `work_dir`, then applies
    /// environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: working-directory config
        if let Some(dir) = work_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_output = OutputConfig::default();
        if other.output.format != default_output.format {
            self.output.format = other.output.format;
        }
        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }

        let default_project = ProjectConfig::default();
        if other.project.file != default_project.file {
            self.project.file = other.project.file;
        }
        if other.project.plugin_values.is_some() {
            self.project.plugin_values = other.project.plugin_values;
        }
        if !other.project.constraints.is_empty() {
            self.project.constraints = other.project.constraints;
        }

        if other.log.filter != LogConfig::default().filter {
            self.log.filter = other.log.filter;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(constants::ENV_FORMAT) {
            match val.parse::<OutputFormat>() {
                Ok(format) => self.output.format = format,
                Err(_) => eprintln!("Warning: ignoring invalid {} value: {val}", constants::ENV_FORMAT),
            }
        }
        if let Some(path) = env.path(constants::ENV_PROJECT) {
            self.project.file = path;
        }
        if let Some(path) = env.path(constants::ENV_PLUGIN_VALUES) {
            self.project.plugin_values = Some(path);
        }
        if let Ok(val) = env.var(constants::ENV_LOG) {
            if !val.trim().is_empty() {
                self.log.filter = val;
            }
        }
        match env.flag(constants::ENV_COLOR) {
            Some(Ok(color)) => self.output.color = Some(color),
            Some(Err(val)) => eprintln!("Warning: ignoring invalid {} value: {val}", constants::ENV_COLOR),
            None => {}
        }
    }
}
