//! Submodule manifests.
//!
//! A manifest is an ini-style file with one section per Qt submodule:
//!
//! ```text
//! [submodule "qtsvg"]
//!     depends = qtbase
//!     path = qtsvg
//!     status = addon
//! ```
//!
//! Parsing drops obsolete and ignored submodules, then validates the
//! surviving names against a [`Catalog`] of known modules and checks that
//! every `depends` entry names a surviving submodule.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::Serialize;

use crate::core::errors::{ConfigurationError, ManifestError};

/// Lifecycle status of a submodule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmoduleStatus {
    Required,
    Optional,
    Obsolete,
    Ignored,
}

impl SubmoduleStatus {
    /// Map a manifest status keyword. Qt manifests use a richer vocabulary
    /// than the four statuses; `essential` is required and `addon`,
    /// `preview` and `deprecated` are optional.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "essential" | "required" => Some(SubmoduleStatus::Required),
            "addon" | "preview" | "deprecated" | "optional" => Some(SubmoduleStatus::Optional),
            "obsolete" => Some(SubmoduleStatus::Obsolete),
            "ignore" | "ignored" => Some(SubmoduleStatus::Ignored),
            _ => None,
        }
    }

    /// Whether submodules with this status are dropped by the parser.
    pub fn is_dropped(&self) -> bool {
        matches!(self, SubmoduleStatus::Obsolete | SubmoduleStatus::Ignored)
    }
}

impl fmt::Display for SubmoduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmoduleStatus::Required => write!(f, "required"),
            SubmoduleStatus::Optional => write!(f, "optional"),
            SubmoduleStatus::Obsolete => write!(f, "obsolete"),
            SubmoduleStatus::Ignored => write!(f, "ignored"),
        }
    }
}

/// A declared submodule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submodule {
    pub name: String,
    pub status: SubmoduleStatus,
    pub path: String,
    pub depends: Vec<String>,
}

/// Known module names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    core: Vec<String>,
    optional: Vec<String>,
}

/// Always-built Qt 5 submodules.
const QT5_CORE: &[&str] = &["qtbase", "qtqa", "qtrepotools", "qttranslations", "qttools"];

/// Optional Qt 5 submodules, in the order their `-skip` flags are emitted.
const QT5_OPTIONAL: &[&str] = &[
    "qtsvg",
    "qtdeclarative",
    "qtactiveqt",
    "qtscript",
    "qtmultimedia",
    "qtxmlpatterns",
    "qtdoc",
    "qtlocation",
    "qtsensors",
    "qtconnectivity",
    "qtwayland",
    "qt3d",
    "qtimageformats",
    "qtgraphicaleffects",
    "qtquickcontrols",
    "qtserialbus",
    "qtserialport",
    "qtx11extras",
    "qtmacextras",
    "qtwinextras",
    "qtandroidextras",
    "qtwebsockets",
    "qtwebchannel",
    "qtwebengine",
    "qtwebview",
    "qtquickcontrols2",
    "qtpurchasing",
    "qtcharts",
    "qtdatavis3d",
    "qtvirtualkeyboard",
    "qtgamepad",
    "qtscxml",
    "qtspeech",
    "qtnetworkauth",
    "qtremoteobjects",
    "qtwebglplugin",
    "qtlottie",
    "qtquicktimeline",
    "qtquick3d",
];

impl Catalog {
    pub fn new<C, O>(core: C, optional: O) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Catalog {
            core: core.into_iter().map(Into::into).collect(),
            optional: optional.into_iter().map(Into::into).collect(),
        }
    }

    /// The Qt 5 module catalog.
    pub fn qt5() -> Self {
        Catalog::new(QT5_CORE.iter().copied(), QT5_OPTIONAL.iter().copied())
    }

    pub fn core(&self) -> &[String] {
        &self.core
    }

    pub fn optional(&self) -> &[String] {
        &self.optional
    }

    pub fn contains(&self, name: &str) -> bool {
        self.is_core(name) || self.is_optional(name)
    }

    pub fn is_core(&self, name: &str) -> bool {
        self.core.iter().any(|c| c == name)
    }

    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.iter().any(|o| o == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::qt5()
    }
}

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^submodule\s+"([^"]+)"\s*$"#).expect("valid header regex"));

/// A section being collected.
struct RawSection {
    line: usize,
    name: String,
    entries: IndexMap<String, String>,
}

/// The validated set of surviving submodules, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmoduleSet {
    modules: IndexMap<String, Submodule>,
}

impl SubmoduleSet {
    /// Read and parse a manifest file.
    pub fn load(path: &Path, catalog: &Catalog) -> anyhow::Result<Self> {
        let content = crate::util::fs::read_to_string(path)?;
        Ok(Self::parse(&content, catalog)?)
    }

    /// Parse manifest text and validate it against `catalog`.
    pub fn parse(text: &str, catalog: &Catalog) -> Result<Self, ManifestError> {
        let sections = split_sections(text)?;
        if sections.is_empty() {
            return Err(ManifestError::NoSections);
        }

        let mut modules = IndexMap::new();
        let mut lines = IndexMap::new();

        for section in sections {
            let keyword = section.entries.get("status").ok_or_else(|| {
                ManifestError::MissingStatus {
                    line: section.line,
                    name: section.name.clone(),
                }
            })?;
            let status = SubmoduleStatus::from_keyword(keyword).ok_or_else(|| {
                ManifestError::UnknownStatus {
                    line: section.line,
                    name: section.name.clone(),
                    status: keyword.clone(),
                }
            })?;

            if status.is_dropped() {
                tracing::debug!("dropping {} submodule `{}`", status, section.name);
                continue;
            }

            let path = section
                .entries
                .get("path")
                .cloned()
                .unwrap_or_else(|| section.name.clone());
            let depends = section
                .entries
                .get("depends")
                .map(|d| d.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();

            lines.insert(section.name.clone(), section.line);
            modules.insert(
                section.name.clone(),
                Submodule {
                    name: section.name,
                    status,
                    path,
                    depends,
                },
            );
        }

        for name in modules.keys() {
            if !catalog.contains(name) {
                return Err(ManifestError::UnknownModule {
                    line: lines.get(name).copied().unwrap_or_default(),
                    name: name.clone(),
                });
            }
        }

        for module in modules.values() {
            for dependency in &module.depends {
                if !modules.contains_key(dependency) {
                    return Err(ManifestError::UnknownDependency {
                        line: lines.get(&module.name).copied().unwrap_or_default(),
                        module: module.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        Ok(SubmoduleSet { modules })
    }

    pub fn get(&self, name: &str) -> Option<&Submodule> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submodule> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Expand the requested optional modules with their transitive
    /// `depends`. Only catalog optional modules are returned; core
    /// dependencies are always built.
    pub fn enabled_closure(
        &self,
        requested: &[String],
        catalog: &Catalog,
    ) -> Result<IndexSet<String>, ConfigurationError> {
        let mut enabled = IndexSet::new();
        let mut stack: Vec<String> = Vec::new();

        for name in requested {
            if !catalog.is_optional(name) {
                return Err(ConfigurationError::UnknownModule {
                    name: name.clone(),
                    known: catalog.optional().to_vec(),
                });
            }
            stack.push(name.clone());
        }

        // Requested order first, dependencies appended as discovered.
        stack.reverse();
        while let Some(name) = stack.pop() {
            if !enabled.insert(name.clone()) {
                continue;
            }
            if let Some(module) = self.modules.get(&name) {
                for dep in module.depends.iter().rev() {
                    if catalog.is_optional(dep) && !enabled.contains(dep) {
                        stack.push(dep.clone());
                    }
                }
            }
        }

        Ok(enabled)
    }

    /// Catalog optional modules that are not enabled, in catalog order.
    pub fn skipped(&self, enabled: &IndexSet<String>, catalog: &Catalog) -> Vec<String> {
        catalog
            .optional()
            .iter()
            .filter(|m| !enabled.contains(*m))
            .cloned()
            .collect()
    }
}

fn split_sections(text: &str) -> Result<Vec<RawSection>, ManifestError> {
    let mut sections: Vec<RawSection> = Vec::new();
    let mut seen = IndexSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(inner) = line.strip_prefix('[') {
            let header = inner
                .strip_suffix(']')
                .ok_or_else(|| ManifestError::MalformedHeader {
                    line: line_no,
                    header: line.to_string(),
                })?;
            let name = HEADER
                .captures(header.trim())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| ManifestError::MalformedHeader {
                    line: line_no,
                    header: line.to_string(),
                })?;

            if !seen.insert(name.clone()) {
                return Err(ManifestError::DuplicateSubmodule {
                    line: line_no,
                    name,
                });
            }

            sections.push(RawSection {
                line: line_no,
                name,
                entries: IndexMap::new(),
            });
            continue;
        }

        let section = sections
            .last_mut()
            .ok_or(ManifestError::EntryOutsideSection { line: line_no })?;

        let (key, value) = line
            .split_once('=')
            .or_else(|| line.split_once(':'))
            .ok_or_else(|| ManifestError::MalformedEntry {
                line: line_no,
                text: line.to_string(),
            })?;

        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(ManifestError::MalformedEntry {
                line: line_no,
                text: line.to_string(),
            });
        }
        if section.entries.contains_key(&key) {
            return Err(ManifestError::DuplicateKey {
                line: line_no,
                name: section.name.clone(),
                key,
            });
        }
        section.entries.insert(key, value.trim().to_string());
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::new(["base"], ["gui", "widgets", "obsolete_mod", "extra"])
    }

    #[test]
    fn test_parse_drops_obsolete() {
        let text = r#"
[submodule "base"]
    status = required
[submodule "widgets"]
    status = optional
    depends = gui
[submodule "gui"]
    status = optional
[submodule "obsolete_mod"]
    status = obsolete
"#;
        let set = SubmoduleSet::parse(text, &small_catalog()).unwrap();
        let names: Vec<_> = set.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["base", "widgets", "gui"]);
        assert!(!set.contains("obsolete_mod"));
        assert_eq!(set.get("widgets").unwrap().depends, ["gui"]);
        assert_eq!(set.get("gui").unwrap().path, "gui");
    }

    #[test]
    fn test_depends_on_dropped_module_fails() {
        let text = r#"
[submodule "base"]
    status = required
[submodule "widgets"]
    status = optional
    depends = obsolete_mod
[submodule "obsolete_mod"]
    status = obsolete
"#;
        let err = SubmoduleSet::parse(text, &small_catalog()).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UnknownDependency { ref module, ref dependency, line: 4 }
                if module == "widgets" && dependency == "obsolete_mod"
        ));
    }

    #[test]
    fn test_unknown_module_fails() {
        let text = "[submodule \"qtfoo\"]\nstatus = addon\n";
        let err = SubmoduleSet::parse(text, &Catalog::qt5()).unwrap_err();
        assert_eq!(
            err,
            ManifestError::UnknownModule {
                line: 1,
                name: "qtfoo".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_obsolete_module_is_ignored() {
        let text = "[submodule \"qtbase\"]\nstatus = essential\n\
                    [submodule \"qtenginio\"]\nstatus = obsolete\n";
        let set = SubmoduleSet::parse(text, &Catalog::qt5()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_manifest() {
        let err = SubmoduleSet::parse("# nothing here\n", &Catalog::qt5()).unwrap_err();
        assert_eq!(err, ManifestError::NoSections);
    }

    #[test]
    fn test_malformed_headers() {
        for text in [
            "[submodule qtbase]\nstatus = essential\n",
            "[module \"qtbase\"]\nstatus = essential\n",
            "[submodule \"qtbase\"\nstatus = essential\n",
        ] {
            let err = SubmoduleSet::parse(text, &Catalog::qt5()).unwrap_err();
            assert!(
                matches!(err, ManifestError::MalformedHeader { line: 1, .. }),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_and_unknown_status() {
        let err = SubmoduleSet::parse("[submodule \"qtbase\"]\npath = qtbase\n", &Catalog::qt5())
            .unwrap_err();
        assert!(matches!(err, ManifestError::MissingStatus { .. }));

        let err = SubmoduleSet::parse("[submodule \"qtbase\"]\nstatus = maybe\n", &Catalog::qt5())
            .unwrap_err();
        assert!(matches!(err, ManifestError::UnknownStatus { .. }));
    }

    #[test]
    fn test_entry_outside_section() {
        let err = SubmoduleSet::parse("status = essential\n", &Catalog::qt5()).unwrap_err();
        assert_eq!(err, ManifestError::EntryOutsideSection { line: 1 });
    }

    #[test]
    fn test_duplicate_section() {
        let text = "[submodule \"qtbase\"]\nstatus = essential\n[submodule \"qtbase\"]\nstatus = essential\n";
        let err = SubmoduleSet::parse(text, &Catalog::qt5()).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateSubmodule { line: 3, .. }));
    }

    #[test]
    fn test_duplicate_key() {
        let text = "[submodule \"qtbase\"]\nstatus = essential\nStatus = obsolete\n";
        let err = SubmoduleSet::parse(text, &Catalog::qt5()).unwrap_err();
        assert_eq!(
            err,
            ManifestError::DuplicateKey {
                line: 3,
                name: "qtbase".to_string(),
                key: "status".to_string(),
            }
        );
    }

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(SubmoduleStatus::from_keyword("essential"), Some(SubmoduleStatus::Required));
        assert_eq!(SubmoduleStatus::from_keyword("preview"), Some(SubmoduleStatus::Optional));
        assert_eq!(SubmoduleStatus::from_keyword("ignore"), Some(SubmoduleStatus::Ignored));
        assert_eq!(SubmoduleStatus::from_keyword("bogus"), None);
    }

    #[test]
    fn test_enabled_closure_follows_depends() {
        let text = r#"
[submodule "qtbase"]
    status = essential
[submodule "qtdeclarative"]
    status = essential
    depends = qtbase qtsvg
[submodule "qtsvg"]
    status = addon
    depends = qtbase
[submodule "qtcharts"]
    status = addon
    depends = qtbase qtdeclarative
"#;
        let catalog = Catalog::qt5();
        let set = SubmoduleSet::parse(text, &catalog).unwrap();
        let enabled = set
            .enabled_closure(&["qtcharts".to_string()], &catalog)
            .unwrap();
        let enabled: Vec<_> = enabled.iter().map(String::as_str).collect();
        assert_eq!(enabled, ["qtcharts", "qtdeclarative", "qtsvg"]);

        let skipped = set.skipped(&set.enabled_closure(&[], &catalog).unwrap(), &catalog);
        assert_eq!(skipped.len(), catalog.optional().len());
        assert_eq!(skipped[0], "qtsvg");
    }

    #[test]
    fn test_enabled_closure_rejects_unknown() {
        let set = SubmoduleSet::default();
        let err = set
            .enabled_closure(&["qtbase".to_string()], &Catalog::qt5())
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownModule { .. }));
    }
}
