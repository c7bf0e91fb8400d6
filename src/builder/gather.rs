//! Transitive link-argument gathering.

use indexmap::IndexSet;

use crate::core::dependency::AvailableDependencies;

/// Collects the link arguments of a dependency and its public dependencies.
#[derive(Debug, Clone, Copy)]
pub struct LibraryGatherer<'a> {
    deps: &'a AvailableDependencies,
    /// Emit `-framework` arguments
    apple: bool,
}

impl<'a> LibraryGatherer<'a> {
    pub fn new(deps: &'a AvailableDependencies, apple: bool) -> Self {
        LibraryGatherer { deps, apple }
    }

    /// Link arguments for `name`, deduplicated in first-seen order.
    ///
    /// Own libraries and system libraries come first as `-l` arguments,
    /// then frameworks on Apple targets, then the shared link flags, then
    /// the arguments of each public dependency in declaration order. An
    /// unknown dependency yields nothing.
    pub fn gather(&self, name: &str) -> Vec<String> {
        let mut tokens = IndexSet::new();
        let mut expanded = IndexSet::new();
        self.collect(name, &mut expanded, &mut tokens);
        tokens.into_iter().collect()
    }

    fn collect(&self, name: &str, expanded: &mut IndexSet<String>, tokens: &mut IndexSet<String>) {
        let Some(info) = self.deps.get(name) else {
            return;
        };
        if !expanded.insert(name.to_string()) {
            return;
        }

        for lib in info.libs.iter().chain(&info.system_libs) {
            tokens.insert(format!("-l{}", lib));
        }
        if self.apple {
            for framework in &info.frameworks {
                tokens.insert(format!("-framework {}", framework));
            }
        }
        for flag in &info.shared_link_flags {
            tokens.insert(flag.clone());
        }

        for dep in &info.public_deps {
            self.collect(dep, expanded, tokens);
        }
    }
}
