//! User-selectable build options.
//!
//! `OptionsConfig` is the mergeable, partially-filled form read from config
//! files, profiles and the command line. `Options` is the resolved form the
//! engine consumes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigurationError;
use crate::core::platform::{Os, Settings};

/// Qt release built when no version is configured.
pub const DEFAULT_QT_VERSION: Version = Version::new(5, 15, 2);

/// Single-configuration build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            BuildType::Debug,
            BuildType::Release,
            BuildType::RelWithDebInfo,
            BuildType::MinSizeRel,
        ]
        .into_iter()
        .find(|bt| bt.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ConfigurationError::InvalidSetting {
            setting: "build_type".to_string(),
            value: s.to_string(),
            expected: vec![
                "Debug".to_string(),
                "Release".to_string(),
                "RelWithDebInfo".to_string(),
                "MinSizeRel".to_string(),
            ],
        })
    }
}

/// What the build-type flags are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildConfiguration {
    Single(BuildType),
    /// Debug and release in one build; suppresses the build type setting.
    Multi,
}

/// OpenGL mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenGl {
    No,
    Es2,
    Desktop,
    Dynamic,
}

impl OpenGl {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenGl::No => "no",
            OpenGl::Es2 => "es2",
            OpenGl::Desktop => "desktop",
            OpenGl::Dynamic => "dynamic",
        }
    }

    /// Default mode for an OS when the user did not choose one.
    pub fn default_for(os: Os) -> Self {
        if os == Os::Windows {
            OpenGl::Dynamic
        } else {
            OpenGl::No
        }
    }
}

impl fmt::Display for OpenGl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenGl {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "no" | "none" => Ok(OpenGl::No),
            "es2" => Ok(OpenGl::Es2),
            "desktop" => Ok(OpenGl::Desktop),
            "dynamic" => Ok(OpenGl::Dynamic),
            _ => Err(ConfigurationError::InvalidSetting {
                setting: "opengl".to_string(),
                value: s.to_string(),
                expected: vec![
                    "no".to_string(),
                    "es2".to_string(),
                    "desktop".to_string(),
                    "dynamic".to_string(),
                ],
            }),
        }
    }
}

/// Resolved user options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub shared: bool,
    pub opengl: OpenGl,
    /// `-device` mkspec; replaces platform auto-detection
    pub device: Option<String>,
    /// Cross toolchain prefix passed as `CROSS_COMPILE`
    pub cross_compile: Option<String>,
    pub sysroot: Option<PathBuf>,
    pub multiconfiguration: bool,
    /// Optional submodules to build
    pub modules: Vec<String>,
    /// Install prefix passed to `-prefix`
    pub prefix: Option<PathBuf>,
    pub version: Version,
}

impl Options {
    /// Defaults for the given OS.
    pub fn for_os(os: Os) -> Self {
        Options {
            shared: false,
            opengl: OpenGl::default_for(os),
            device: None,
            cross_compile: None,
            sysroot: None,
            multiconfiguration: false,
            modules: Vec::new(),
            prefix: None,
            version: DEFAULT_QT_VERSION,
        }
    }

    /// Derive the build configuration. Returns `None` when neither a build
    /// type nor multiconfiguration is set.
    pub fn build_configuration(&self, settings: &Settings) -> Option<BuildConfiguration> {
        if self.multiconfiguration {
            Some(BuildConfiguration::Multi)
        } else {
            settings.build_type.map(BuildConfiguration::Single)
        }
    }
}

/// Mergeable options as read from config files and profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub shared: Option<bool>,
    pub opengl: Option<OpenGl>,
    pub device: Option<String>,
    pub cross_compile: Option<String>,
    pub sysroot: Option<PathBuf>,
    pub multiconfiguration: Option<bool>,
    pub modules: Option<Vec<String>>,
    pub prefix: Option<PathBuf>,
    pub qt_version: Option<String>,
}

impl OptionsConfig {
    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: OptionsConfig) {
        if other.shared.is_some() {
            self.shared = other.shared;
        }
        if other.opengl.is_some() {
            self.opengl = other.opengl;
        }
        if other.device.is_some() {
            self.device = other.device;
        }
        if other.cross_compile.is_some() {
            self.cross_compile = other.cross_compile;
        }
        if other.sysroot.is_some() {
            self.sysroot = other.sysroot;
        }
        if other.multiconfiguration.is_some() {
            self.multiconfiguration = other.multiconfiguration;
        }
        if other.modules.is_some() {
            self.modules = other.modules;
        }
        if other.prefix.is_some() {
            self.prefix = other.prefix;
        }
        if other.qt_version.is_some() {
            self.qt_version = other.qt_version;
        }
    }

    /// Fill unset options with the defaults for `os`.
    pub fn resolve(&self, os: Os) -> Result<Options, ConfigurationError> {
        let defaults = Options::for_os(os);

        let version = match &self.qt_version {
            Some(v) => Version::parse(v).map_err(|_| ConfigurationError::InvalidSetting {
                setting: "qt_version".to_string(),
                value: v.clone(),
                expected: vec![DEFAULT_QT_VERSION.to_string()],
            })?,
            None => defaults.version,
        };

        Ok(Options {
            shared: self.shared.unwrap_or(defaults.shared),
            opengl: self.opengl.unwrap_or(defaults.opengl),
            device: self.device.clone().filter(|d| !d.is_empty()),
            cross_compile: self.cross_compile.clone().filter(|c| !c.is_empty()),
            sysroot: self.sysroot.clone(),
            multiconfiguration: self.multiconfiguration.unwrap_or(false),
            modules: self.modules.clone().unwrap_or_default(),
            prefix: self.prefix.clone(),
            version,
        })
    }
}
