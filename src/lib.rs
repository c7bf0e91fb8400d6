//! qtforge - configuration-to-graph synthesis for native Qt 5 builds
//!
//! This crate turns an abstract build environment (target OS, architecture,
//! compiler, build type, user options and the set of available third-party
//! libraries) into two artifacts:
//!
//! - the ordered argument list for Qt's `configure` script, and
//! - a graph of consumer-facing components (libraries and plugins) with
//!   their requires edges, link/include metadata and the CMake build
//!   modules a consumer has to load.
//!
//! The engine itself is pure and synchronous. Reading the submodule
//! manifest, discovering an install prefix and writing snippet files happen
//! at the boundary in [`ops`] and in the `qtforge` binary.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use core::{
    component::{Component, ComponentGraph},
    dependency::{AvailableDependencies, DependencyInfo},
    options::{BuildType, OpenGl, Options},
    platform::{CompilerFamily, Os, PlatformDescriptor, Settings},
    submodule::{Catalog, Submodule, SubmoduleSet, SubmoduleStatus},
};

pub use builder::configure::{ConfigureArgs, FlagSynthesizer};
pub use builder::propagate::{propagate, BuildModulePlan};
pub use builder::xplatform::{resolve_platform, PlatformIdentifier};
pub use ops::{synthesize, SynthesisReport, SynthesisRequest};
