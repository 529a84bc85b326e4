//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dtree/dtree.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `DTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub greeting: Option<String>,
    pub prompt_suffix: Option<String>,
    pub fail_fast: Option<bool>,
    pub default_files: Option<Vec<PathBuf>>,
}

/// Unified configuration for dtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Line printed before the first question
    pub greeting: String,
    /// Appended to every question
    pub prompt_suffix: String,
    /// Abort loading on the first malformed line instead of skipping it
    pub fail_fast: bool,
    /// Tree files evaluated by `run` when none are given
    pub default_files: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            greeting: "Let's figure out what's wrong!".into(),
            prompt_suffix: " --> Please enter 'Yes' or 'No': ".into(),
            fail_fast: false,
            default_files: vec![PathBuf::from("tree1.txt"), PathBuf::from("tree.txt")],
        }
    }
}

/// Get the XDG config directory for dtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~` and `$VAR` in a path, leaving it untouched when expansion fails.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            greeting: overlay
                .greeting
                .clone()
                .unwrap_or_else(|| self.greeting.clone()),
            prompt_suffix: overlay
                .prompt_suffix
                .clone()
                .unwrap_or_else(|| self.prompt_suffix.clone()),
            fail_fast: overlay.fail_fast.unwrap_or(self.fail_fast),
            default_files: overlay
                .default_files
                .clone()
                .unwrap_or_else(|| self.default_files.clone()),
        }
    }

    fn expand_paths(&mut self) {
        self.default_files = self.default_files.iter().map(|p| expand_path(p)).collect();
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = current.apply_env_overrides(None)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply DTREE_* environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment, used by tests.
    pub fn apply_env_overrides(
        mut self,
        source: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("default_files")
                    .try_parsing(true)
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("greeting") {
            self.greeting = val;
        }
        if let Ok(val) = config.get_string("prompt_suffix") {
            self.prompt_suffix = val;
        }
        if let Ok(val) = config.get_bool("fail_fast") {
            self.fail_fast = val;
        }
        if let Ok(val) = config.get::<Vec<PathBuf>>("default_files") {
            self.default_files = val;
        }
        Ok(self)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
