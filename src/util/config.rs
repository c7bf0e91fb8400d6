//! Configuration file support for qtforge.
//!
//! qtforge supports two configuration file locations:
//! - Global: `~/.qtforge/config.toml` - User-wide defaults
//! - Project: `.qtforge/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. A profile passed on
//! the command line takes precedence over both, and explicit command-line
//! flags over everything.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::configure::CompilerOverrides;
use crate::core::options::OptionsConfig;
use crate::core::platform::Settings;

/// qtforge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default option values
    pub options: OptionsConfig,

    /// Compiler overrides
    pub toolchain: ToolchainConfig,
}

/// Compiler paths handed to the configure step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Path to the C compiler (e.g., /usr/bin/clang)
    pub cc: Option<String>,

    /// Path to the C++ compiler (e.g., /usr/bin/clang++)
    pub cxx: Option<String>,
}

impl ToolchainConfig {
    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolchainConfig) {
        if other.cc.is_some() {
            self.cc = other.cc;
        }
        if other.cxx.is_some() {
            self.cxx = other.cxx;
        }
    }

    pub fn overrides(&self) -> CompilerOverrides {
        CompilerOverrides {
            cc: self.cc.clone(),
            cxx: self.cxx.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.options.merge(other.options);
        self.toolchain.merge(other.toolchain);
    }
}

/// A build profile: the settings of the host plus option and toolchain
/// overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub settings: Settings,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse profile: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.qtforge/config.toml)
/// 2. Global config (~/.qtforge/config.toml)
/// 3. Defaults
///
/// Missing files are skipped; a file that exists but does not parse is an
/// error.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    for path in [global_path, project_path] {
        if path.is_file() {
            config.merge(Config::load(path)?);
        }
    }

    Ok(config)
}

/// Get the global qtforge config directory (~/.qtforge).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".qtforge"))
}

/// Get the global config path (~/.qtforge/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.qtforge/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".qtforge").join("config.toml")
}
