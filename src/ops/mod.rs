//! High-level operations.
//!
//! This module wires the synthesis stages together for the `qtforge`
//! commands and handles the filesystem at the boundary.

pub mod install;
pub mod synthesize;

pub use install::{discover_layout, emit_snippets};
pub use synthesize::{synthesize, SynthesisReport, SynthesisRequest};
