//! Core data structures for qtforge.
//!
//! This module contains the foundational types used throughout the engine:
//! - Build settings and platform descriptors
//! - User options
//! - Submodule manifests and the known-module catalog
//! - Available third-party dependencies
//! - The component graph and its build-module snippets

pub mod component;
pub mod dependency;
pub mod errors;
pub mod options;
pub mod platform;
pub mod submodule;

pub use component::{Component, ComponentGraph, ComponentKind, PluginKind, Snippet, SnippetKind};
pub use dependency::{AvailableDependencies, DependencyInfo};
pub use errors::{ConfigurationError, GraphError, ManifestError};
pub use options::{BuildConfiguration, BuildType, OpenGl, Options, OptionsConfig};
pub use platform::{BuildMachine, CompilerFamily, Os, PlatformDescriptor, Settings};
pub use submodule::{Catalog, Submodule, SubmoduleSet, SubmoduleStatus};
