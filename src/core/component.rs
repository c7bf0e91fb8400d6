//! Consumer-facing components and the graph they form.
//!
//! A component is one library or plugin of the installed Qt package. Its
//! `requires` edges name other components of the same graph (`qtGui`) or
//! targets of other packages (`zlib::zlib`). Edges may reference components
//! created later; they are resolved when the graph is walked.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::core::errors::GraphError;

/// Plugin category. Each category installs to its own `plugins/<dir>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// Platform integration plugins
    Platforms,
    Styles,
}

impl PluginKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            PluginKind::Platforms => "platforms",
            PluginKind::Styles => "styles",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "plugin_kind")]
pub enum ComponentKind {
    Library,
    Plugin(PluginKind),
}

impl ComponentKind {
    pub fn is_plugin(&self) -> bool {
        matches!(self, ComponentKind::Plugin(_))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Library => write!(f, "library"),
            ComponentKind::Plugin(kind) => write!(f, "plugin ({})", kind.dir_name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnippetKind {
    /// Tool imports and global settings, attached to Core
    CoreExtras,
    /// Private-module alias targets
    PrivateModule,
    /// Installed `Qt5XMacros.cmake` files
    Macros,
}

/// A build-module snippet. `id` is the path relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub id: String,
    pub kind: SnippetKind,
    /// Generated content; `None` for snippets installed by the build itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Snippet {
    pub fn generated(id: impl Into<String>, kind: SnippetKind, content: String) -> Self {
        Snippet {
            id: id.into(),
            kind,
            content: Some(content),
        }
    }

    pub fn installed(id: impl Into<String>, kind: SnippetKind) -> Self {
        Snippet {
            id: id.into(),
            kind,
            content: None,
        }
    }
}

/// A library or plugin exposed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Graph key, e.g. `qtGui`
    pub name: String,
    /// Module name, e.g. `Gui`
    pub module: String,
    /// Consumer target, e.g. `Qt5::Gui`
    pub target_name: String,
    pub kind: ComponentKind,
    pub libs: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub include_dirs: Vec<String>,
    pub defines: Vec<String>,
    pub system_libs: Vec<String>,
    pub frameworks: Vec<String>,
    pub cxxflags: Vec<String>,
    pub build_dirs: Vec<String>,
    /// Installed object files consumers link directly
    pub object_files: Vec<String>,
    pub requires: Vec<String>,
    /// Snippet ids attached directly to this component
    pub build_modules: Vec<String>,
}

impl Component {
    /// Create an empty component for `module`.
    pub fn new(module: impl Into<String>, kind: ComponentKind) -> Self {
        let module = module.into();
        Component {
            name: format!("qt{}", module),
            target_name: format!("Qt5::{}", module),
            module,
            kind,
            libs: Vec::new(),
            lib_dirs: Vec::new(),
            include_dirs: Vec::new(),
            defines: Vec::new(),
            system_libs: Vec::new(),
            frameworks: Vec::new(),
            cxxflags: Vec::new(),
            build_dirs: Vec::new(),
            object_files: Vec::new(),
            requires: Vec::new(),
            build_modules: Vec::new(),
        }
    }

    /// Requirements that point inside the graph.
    pub fn internal_requires(&self) -> impl Iterator<Item = &str> {
        self.requires
            .iter()
            .map(String::as_str)
            .filter(|r| !is_external(r))
    }
}

/// Requirements of the form `package::target` belong to other packages.
pub fn is_external(requirement: &str) -> bool {
    requirement.contains("::")
}

/// Components in creation order plus the snippets they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentGraph {
    components: IndexMap<String, Component>,
    snippets: IndexMap<String, Snippet>,
}

impl ComponentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Names are unique across the graph.
    pub fn insert(&mut self, component: Component) -> Result<(), GraphError> {
        if self.components.contains_key(&component.name) {
            return Err(GraphError::DuplicateComponent {
                name: component.name,
            });
        }
        self.components.insert(component.name.clone(), component);
        Ok(())
    }

    /// Register a snippet. Re-registering an id replaces its content.
    pub fn add_snippet(&mut self, snippet: Snippet) {
        self.snippets.insert(snippet.id.clone(), snippet);
    }

    /// Register a snippet and attach it to `component`.
    pub fn attach_snippet(&mut self, component: &str, snippet: Snippet) -> bool {
        let Some(c) = self.components.get_mut(component) else {
            return false;
        };
        if !c.build_modules.contains(&snippet.id) {
            c.build_modules.push(snippet.id.clone());
        }
        self.add_snippet(snippet);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn snippet(&self, id: &str) -> Option<&Snippet> {
        self.snippets.get(id)
    }

    /// Components in creation order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn snippets(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Check that every internal requirement names a component.
    pub fn check_requirements(&self) -> Result<(), GraphError> {
        for component in self.components.values() {
            for req in component.internal_requires() {
                if !self.components.contains_key(req) {
                    return Err(GraphError::UnresolvedRequirement {
                        component: component.name.clone(),
                        requirement: req.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Build a petgraph view. An edge `a -> b` means `a` requires `b`.
    pub fn to_digraph(&self) -> Result<DiGraph<String, ()>, GraphError> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for name in self.components.keys() {
            nodes.insert(name.as_str(), graph.add_node(name.clone()));
        }

        for component in self.components.values() {
            let from = nodes[component.name.as_str()];
            for req in component.internal_requires() {
                let to = *nodes
                    .get(req)
                    .ok_or_else(|| GraphError::UnresolvedRequirement {
                        component: component.name.clone(),
                        requirement: req.to_string(),
                    })?;
                if !graph.contains_edge(from, to) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Ok(graph)
    }

    /// Render the requires graph in Graphviz format.
    pub fn to_dot(&self) -> Result<String, GraphError> {
        let graph = self.to_digraph()?;
        Ok(format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel])))
    }
}
