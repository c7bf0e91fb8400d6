//! The synthesis engine.
//!
//! Turns settings, options and the available dependencies into a configure
//! argument list and a component graph with propagated build modules.

pub mod configure;
pub mod gather;
pub mod graph;
pub mod invocation;
pub mod propagate;
pub mod snippets;
pub mod validate;
pub mod xplatform;

pub use configure::{CompilerOverrides, ConfigureArgs, FlagSynthesizer};
pub use gather::LibraryGatherer;
pub use graph::{CmakeModuleDir, ComponentGraphBuilder, InstallLayout, PlatformFamily};
pub use propagate::{propagate, BuildModulePlan};
pub use validate::validate;
pub use xplatform::{resolve_platform, PlatformIdentifier};
