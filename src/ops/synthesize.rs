//! The one-shot synthesis pipeline.
//!
//! Validation, manifest expansion, platform resolution, flag synthesis,
//! graph construction and build-module propagation run in that order. The
//! first failure aborts the pass; nothing partial is returned.

use anyhow::Result;
use indexmap::IndexSet;
use serde::Serialize;

use crate::builder::configure::{CompilerOverrides, ConfigureArgs, FlagSynthesizer};
use crate::builder::graph::{ComponentGraphBuilder, InstallLayout};
use crate::builder::invocation;
use crate::builder::propagate::{propagate, BuildModulePlan};
use crate::builder::validate::validate;
use crate::builder::xplatform::{resolve_platform, PlatformIdentifier};
use crate::core::component::ComponentGraph;
use crate::core::dependency::AvailableDependencies;
use crate::core::errors::ConfigurationError;
use crate::core::options::Options;
use crate::core::platform::Settings;
use crate::core::submodule::{Catalog, SubmoduleSet};
use crate::util::diagnostic::Diagnostic;

/// Inputs of one synthesis pass.
pub struct SynthesisRequest<'a> {
    pub settings: &'a Settings,
    pub options: &'a Options,
    pub deps: &'a AvailableDependencies,
    pub catalog: &'a Catalog,
    /// Parsed submodule manifest; without one, enabled modules pull in no
    /// transitive dependencies
    pub manifest: Option<&'a SubmoduleSet>,
    /// Install layout to enrich the graph with
    pub layout: Option<&'a InstallLayout>,
    pub compilers: CompilerOverrides,
}

/// Everything a pass produces.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisReport {
    pub platform: Option<PlatformIdentifier>,
    pub enabled: Vec<String>,
    pub skipped: Vec<String>,
    pub configure: ConfigureArgs,
    pub make_program: &'static str,
    pub build_requirements: Vec<&'static str>,
    /// Content of the package's relocatable `qt.conf`
    pub qt_conf: String,
    pub identity: String,
    pub components: ComponentGraph,
    pub build_modules: BuildModulePlan,
}

impl SynthesisReport {
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.configure.warnings
    }
}

/// Run the whole pipeline.
pub fn synthesize(request: &SynthesisRequest<'_>) -> Result<SynthesisReport> {
    let settings = request.settings;
    let options = request.options;

    validate(settings, options)?;

    let empty = SubmoduleSet::default();
    let manifest = request.manifest.unwrap_or(&empty);
    let enabled: IndexSet<String> = manifest.enabled_closure(&options.modules, request.catalog)?;
    let skipped = manifest.skipped(&enabled, request.catalog);
    tracing::debug!(
        "{} optional submodule(s) enabled, {} skipped",
        enabled.len(),
        skipped.len()
    );

    let platform = resolve_platform(&settings.descriptor());
    if platform.is_none() && options.device.is_none() && settings.is_cross_building_skip_x64_x86() {
        return Err(ConfigurationError::UnresolvedCrossPlatform {
            host: format!("{} {} {}", settings.os, settings.compiler, settings.arch),
        }
        .into());
    }

    let configure = FlagSynthesizer::new(settings, options, request.deps)
        .platform(platform.as_ref())
        .skip(&skipped)
        .compilers(request.compilers.clone())
        .synthesize();

    let mut builder = ComponentGraphBuilder::new(settings, options);
    if let Some(layout) = request.layout {
        builder = builder.install_layout(layout);
    }
    let components = builder.build()?;
    let build_modules = propagate(&components)?;

    tracing::info!(
        "synthesized {} configure arguments and {} components",
        configure.args.len(),
        components.len()
    );

    Ok(SynthesisReport {
        platform,
        enabled: enabled.into_iter().collect(),
        skipped,
        configure,
        make_program: invocation::make_program(settings),
        build_requirements: invocation::build_requirements(settings),
        qt_conf: invocation::qt_conf(),
        identity: invocation::binary_identity(settings, options),
        components,
        build_modules,
    })
}
