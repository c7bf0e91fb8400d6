//! Error types for validation, manifest parsing and graph construction.

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Incompatible option, platform or compiler combination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid value `{value}` for setting `{setting}`")]
    InvalidSetting {
        setting: String,
        value: String,
        expected: Vec<String>,
    },

    #[error("{compiler} {version} is too old, at least {minimum} is required")]
    CompilerTooOld {
        compiler: String,
        version: String,
        minimum: String,
    },

    #[error("unrecognized compiler version `{version}`")]
    InvalidCompilerVersion { version: String },

    #[error("C++ standard `{cppstd}` is not supported, C++11 or newer is required")]
    CppStdTooOld { cppstd: String },

    #[error("unrecognized C++ standard `{cppstd}`")]
    InvalidCppStd { cppstd: String },

    #[error("OpenGL desktop is not supported on Android")]
    DesktopOpenGlOnAndroid,

    #[error("dynamic OpenGL is supported only on Windows, not on {os}")]
    DynamicOpenGlOutsideWindows { os: String },

    #[error("a shared build cannot use the static runtime `{runtime}`")]
    SharedWithStaticRuntime { runtime: String },

    #[error("cross-building for {host} requires a cross_compile prefix")]
    MissingCrossCompilePrefix { host: String },

    #[error("no qmake platform is known for cross-building to {host}")]
    UnresolvedCrossPlatform { host: String },

    #[error("unknown module `{name}`")]
    UnknownModule { name: String, known: Vec<String> },
}

impl ConfigurationError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            ConfigurationError::InvalidSetting { expected, .. } => {
                if expected.is_empty() {
                    diag
                } else {
                    diag.with_context(format!("expected one of: {}", expected.join(", ")))
                }
            }

            ConfigurationError::CompilerTooOld { compiler, .. } => diag
                .with_suggestion(format!("Upgrade {}", compiler))
                .with_suggestion("Select a newer compiler_version in your profile".to_string()),

            ConfigurationError::InvalidCompilerVersion { .. } => diag.with_suggestion(
                "Use a dotted numeric version such as `9` or `10.0`".to_string(),
            ),

            ConfigurationError::CppStdTooOld { .. } | ConfigurationError::InvalidCppStd { .. } => {
                diag.with_suggestion("Set cppstd to 11 or newer, e.g. `cppstd = \"17\"`".to_string())
            }

            ConfigurationError::DesktopOpenGlOnAndroid => diag
                .with_suggestion("Use `--opengl es2` for Android".to_string()),

            ConfigurationError::DynamicOpenGlOutsideWindows { .. } => diag
                .with_suggestion("Use `--opengl desktop`, `es2` or `no`".to_string()),

            ConfigurationError::SharedWithStaticRuntime { .. } => diag
                .with_suggestion("Build static libraries".to_string())
                .with_suggestion("Switch to a dynamic runtime (MD or MDd)".to_string()),

            ConfigurationError::MissingCrossCompilePrefix { .. } => diag
                .with_context("the build machine differs from the host".to_string())
                .with_suggestion(
                    "Pass `--cross-compile <prefix>`, e.g. `aarch64-linux-gnu-`".to_string(),
                ),

            ConfigurationError::UnresolvedCrossPlatform { .. } => diag
                .with_context("a cross build cannot fall back to the build machine's mkspec".to_string())
                .with_suggestion(
                    "Pass `--device <mkspec>`, e.g. `linux-generic-g++`".to_string(),
                ),

            ConfigurationError::UnknownModule { known, .. } => {
                let diag = diag.with_suggestion("Check that the module name is spelled correctly".to_string());
                if known.is_empty() {
                    diag
                } else {
                    diag.with_context(format!("known modules: {}", known.join(", ")))
                }
            }
        }
    }
}

/// Malformed submodule manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("manifest contains no submodule sections")]
    NoSections,

    #[error("malformed section header `{header}` on line {line}")]
    MalformedHeader { line: usize, header: String },

    #[error("entry on line {line} appears before any section")]
    EntryOutsideSection { line: usize },

    #[error("malformed entry `{text}` on line {line}")]
    MalformedEntry { line: usize, text: String },

    #[error("submodule `{name}` is declared twice (line {line})")]
    DuplicateSubmodule { line: usize, name: String },

    #[error("submodule `{name}` sets `{key}` twice (line {line})")]
    DuplicateKey {
        line: usize,
        name: String,
        key: String,
    },

    #[error("submodule `{name}` has no status")]
    MissingStatus { line: usize, name: String },

    #[error("submodule `{name}` has unknown status `{status}`")]
    UnknownStatus {
        line: usize,
        name: String,
        status: String,
    },

    #[error("unknown module `{name}`")]
    UnknownModule { line: usize, name: String },

    #[error("submodule `{module}` depends on `{dependency}`, which is not declared")]
    UnknownDependency {
        line: usize,
        module: String,
        dependency: String,
    },
}

impl ManifestError {
    /// Line number (1-based) the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ManifestError::NoSections => None,
            ManifestError::MalformedHeader { line, .. }
            | ManifestError::EntryOutsideSection { line }
            | ManifestError::MalformedEntry { line, .. }
            | ManifestError::DuplicateSubmodule { line, .. }
            | ManifestError::DuplicateKey { line, .. }
            | ManifestError::MissingStatus { line, .. }
            | ManifestError::UnknownStatus { line, .. }
            | ManifestError::UnknownModule { line, .. }
            | ManifestError::UnknownDependency { line, .. } => Some(*line),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        if let Some(line) = self.line() {
            diag = diag.with_context(format!("at line {}", line));
        }

        match self {
            ManifestError::NoSections => diag.with_suggestion(
                "Declare modules as `[submodule \"qtbase\"]` sections".to_string(),
            ),
            ManifestError::MalformedHeader { .. } => diag.with_suggestion(
                "Section headers must look like `[submodule \"name\"]`".to_string(),
            ),
            ManifestError::EntryOutsideSection { .. } | ManifestError::MalformedEntry { .. } => {
                diag.with_suggestion("Entries must be `key = value` inside a section".to_string())
            }
            ManifestError::DuplicateSubmodule { .. } => diag,
            ManifestError::DuplicateKey { key, .. } => {
                diag.with_suggestion(format!("Keep a single `{}` entry per section", key))
            }
            ManifestError::MissingStatus { .. } | ManifestError::UnknownStatus { .. } => diag
                .with_suggestion(
                    "Use one of: essential, addon, deprecated, preview, obsolete, ignore"
                        .to_string(),
                ),
            ManifestError::UnknownModule { .. } => diag
                .with_suggestion("Check the manifest matches the configured Qt version".to_string()),
            ManifestError::UnknownDependency { dependency, .. } => diag.with_context(format!(
                "`{}` is missing, obsolete or ignored",
                dependency
            )),
        }
    }
}

/// Inconsistent component graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cycle detected in component graph")]
    Cycle { path: Vec<String> },

    #[error("component `{name}` is defined twice")]
    DuplicateComponent { name: String },

    #[error("component `{component}` requires unknown component `{requirement}`")]
    UnresolvedRequirement {
        component: String,
        requirement: String,
    },
}

impl GraphError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GraphError::Cycle { path } => Diagnostic::error(self.to_string())
                .with_context(format!("cycle: {}", path.join(" -> "))),

            GraphError::DuplicateComponent { .. } => Diagnostic::error(self.to_string()),

            GraphError::UnresolvedRequirement { requirement, .. } => {
                Diagnostic::error(self.to_string()).with_suggestion(format!(
                    "Prefix external targets with their package, e.g. `zlib::{}`",
                    requirement
                ))
            }
        }
    }
}
