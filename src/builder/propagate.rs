//! Build-module closure propagation.
//!
//! Every snippet attached in the graph is claimed exactly once: the first
//! component whose requires-closure reaches it (walking requirements before
//! the component itself) lists it. Components are visited in graph
//! insertion order, so the flattened plan lists a dependency's snippets
//! before the snippets of anything that requires it.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::core::component::{is_external, ComponentGraph};
use crate::core::errors::GraphError;

/// Snippets surfaced per component, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildModulePlan {
    entries: IndexMap<String, Vec<String>>,
}

impl BuildModulePlan {
    /// Snippets listed for `component`; empty when it claimed none.
    pub fn for_component(&self, component: &str) -> &[String] {
        self.entries
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All snippets in emission order.
    pub fn flatten(&self) -> Vec<&str> {
        self.entries
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Walk<'g> {
    graph: &'g ComponentGraph,
    expanded: IndexSet<&'g str>,
    stack: IndexSet<&'g str>,
    consumed: IndexSet<&'g str>,
}

impl<'g> Walk<'g> {
    fn visit(&mut self, name: &'g str, out: &mut Vec<String>) -> Result<(), GraphError> {
        if self.expanded.contains(name) {
            return Ok(());
        }
        if let Some(pos) = self.stack.get_index_of(name) {
            let mut path: Vec<String> = self
                .stack
                .iter()
                .skip(pos)
                .map(|s| s.to_string())
                .collect();
            path.push(name.to_string());
            return Err(GraphError::Cycle { path });
        }

        let graph = self.graph;
        let Some(component) = graph.get(name) else {
            // Callers only pass names that exist; requirements are checked below.
            return Ok(());
        };

        self.stack.insert(name);
        for req in &component.requires {
            if is_external(req) {
                continue;
            }
            if !graph.contains(req) {
                return Err(GraphError::UnresolvedRequirement {
                    component: component.name.clone(),
                    requirement: req.clone(),
                });
            }
            self.visit(req, out)?;
        }
        self.stack.pop();

        for id in &component.build_modules {
            if self.consumed.insert(id.as_str()) {
                out.push(id.clone());
            }
        }
        self.expanded.insert(name);
        Ok(())
    }
}

/// Compute the build modules each component surfaces to consumers.
pub fn propagate(graph: &ComponentGraph) -> Result<BuildModulePlan, GraphError> {
    let mut walk = Walk {
        graph,
        expanded: IndexSet::new(),
        stack: IndexSet::new(),
        consumed: IndexSet::new(),
    };
    let mut plan = BuildModulePlan::default();

    for component in graph.components() {
        let mut claimed = Vec::new();
        walk.visit(&component.name, &mut claimed)?;
        if !claimed.is_empty() {
            tracing::debug!(
                "{} surfaces {} build module(s)",
                component.name,
                claimed.len()
            );
        }
        plan.entries.insert(component.name.clone(), claimed);
    }

    Ok(plan)
}
