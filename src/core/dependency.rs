//! Third-party dependencies available to the build.
//!
//! The package manager resolves these before qtforge runs; this module only
//! describes what it handed over. The input is a TOML document with one
//! table per dependency:
//!
//! ```toml
//! [freetype]
//! libs = ["freetype"]
//! include_paths = ["/deps/freetype/include", "/deps/freetype/include/freetype2"]
//! lib_paths = ["/deps/freetype/lib"]
//! public_deps = ["zlib", "libpng"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Link and compile information of one dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyInfo {
    /// Libraries the dependency provides
    pub libs: Vec<String>,
    /// System libraries it links against
    pub system_libs: Vec<String>,
    /// Apple frameworks it links against
    pub frameworks: Vec<String>,
    /// Extra linker flags for shared links
    pub shared_link_flags: Vec<String>,
    /// Dependencies whose link arguments are propagated to consumers
    pub public_deps: Vec<String>,
    pub include_paths: Vec<PathBuf>,
    pub lib_paths: Vec<PathBuf>,
    pub defines: Vec<String>,
    /// Package root, used to locate helper tools such as `mysql_config`
    pub root_path: Option<PathBuf>,
}

impl DependencyInfo {
    pub fn with_libs<I, S>(mut self, libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libs = libs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_public_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_deps = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// The set of available dependencies, keyed by name, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailableDependencies {
    deps: IndexMap<String, DependencyInfo>,
}

impl AvailableDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = crate::util::fs::read_to_string(path)?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse dependencies: {}", path.display()))
    }

    /// Parse from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let deps: IndexMap<String, DependencyInfo> =
            toml::from_str(content).context("invalid TOML")?;
        Ok(AvailableDependencies { deps })
    }

    pub fn insert(&mut self, name: impl Into<String>, info: DependencyInfo) {
        self.deps.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&DependencyInfo> {
        self.deps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.deps.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DependencyInfo)> {
        self.deps.iter()
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

impl FromIterator<(String, DependencyInfo)> for AvailableDependencies {
    fn from_iter<T: IntoIterator<Item = (String, DependencyInfo)>>(iter: T) -> Self {
        AvailableDependencies {
            deps: iter.into_iter().collect(),
        }
    }
}
