//! Command implementations

pub mod check;
pub mod completions;
pub mod components;
pub mod configure;
pub mod identity;
pub mod xplatform;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::cli::{InputArgs, OptionArgs, SettingsArgs};
use qtforge::builder::configure::CompilerOverrides;
use qtforge::core::dependency::AvailableDependencies;
use qtforge::core::options::{Options, OptionsConfig};
use qtforge::core::platform::{BuildMachine, Settings};
use qtforge::core::submodule::{Catalog, SubmoduleSet};
use qtforge::ops::SynthesisRequest;
use qtforge::util::config::{
    global_config_path, load_config, project_config_path, Profile, ToolchainConfig,
};
use qtforge::util::diagnostic::{suggestions, ManifestSourceError};
use qtforge::util::fs;

/// Fully resolved inputs of a synthesis pass.
pub struct Inputs {
    pub settings: Settings,
    pub options: Options,
    pub deps: AvailableDependencies,
    pub catalog: Catalog,
    pub manifest: Option<SubmoduleSet>,
    pub compilers: CompilerOverrides,
}

impl Inputs {
    /// Layer config files, profile and flags into one set of inputs.
    pub fn load(args: &InputArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let global = global_config_path().unwrap_or_else(|| PathBuf::from(".qtforge-global"));
        let config = load_config(&global, &project_config_path(&cwd))?;

        let profile = args
            .settings
            .profile
            .as_deref()
            .map(Profile::load)
            .transpose()?;

        let mut settings = settings_from(&args.settings, profile.as_ref().map(|p| &p.settings))?;

        let mut options_cfg = config.options;
        let mut toolchain = config.toolchain;
        if let Some(profile) = profile {
            options_cfg.merge(profile.options);
            toolchain.merge(profile.toolchain);
        }
        options_cfg.merge(options_from(&args.options));
        toolchain.merge(ToolchainConfig {
            cc: args.options.cc.clone(),
            cxx: args.options.cxx.clone(),
        });

        let options = options_cfg.resolve(settings.os)?;
        if options.multiconfiguration && settings.build_type.take().is_some() {
            tracing::debug!("multiconfiguration build, ignoring build_type");
        }

        let deps = match &args.deps {
            Some(path) => AvailableDependencies::load(path)?,
            None => AvailableDependencies::new(),
        };

        let catalog = Catalog::qt5();
        let manifest = match &args.manifest {
            Some(path) => Some(load_manifest(path, &catalog)?),
            None => None,
        };

        Ok(Inputs {
            settings,
            options,
            deps,
            catalog,
            manifest,
            compilers: toolchain.overrides(),
        })
    }

    pub fn request(&self) -> SynthesisRequest<'_> {
        SynthesisRequest {
            settings: &self.settings,
            options: &self.options,
            deps: &self.deps,
            catalog: &self.catalog,
            manifest: self.manifest.as_ref(),
            layout: None,
            compilers: self.compilers.clone(),
        }
    }
}

/// Parse a manifest, rendering parse errors against its source text.
pub fn load_manifest(path: &std::path::Path, catalog: &Catalog) -> Result<SubmoduleSet> {
    let text = fs::read_to_string(path)?;
    SubmoduleSet::parse(&text, catalog).map_err(|err| {
        ManifestSourceError::new(&path.display().to_string(), &text, &err).into()
    })
}

fn settings_from(args: &SettingsArgs, profile: Option<&Settings>) -> Result<Settings> {
    let mut settings = match (profile, args.os, &args.arch, args.compiler) {
        (Some(settings), _, _, _) => settings.clone(),
        (None, Some(os), Some(arch), Some(compiler)) => Settings::new(os, arch.clone(), compiler),
        _ => bail!(
            "no host settings given\n\
             help: {}",
            suggestions::NO_SETTINGS
        ),
    };

    if let Some(os) = args.os {
        settings.os = os;
    }
    if let Some(arch) = &args.arch {
        settings.arch = arch.clone();
    }
    if let Some(compiler) = args.compiler {
        settings.compiler = compiler;
    }
    if args.compiler_version.is_some() {
        settings.compiler_version = args.compiler_version.clone();
    }
    if args.libcxx.is_some() {
        settings.libcxx = args.libcxx.clone();
    }
    if args.runtime.is_some() {
        settings.runtime = args.runtime.clone();
    }
    if args.cppstd.is_some() {
        settings.cppstd = args.cppstd.clone();
    }
    if args.build_type.is_some() {
        settings.build_type = args.build_type;
    }
    if args.api_level.is_some() {
        settings.os_api_level = args.api_level;
    }

    if args.build_os.is_some() || args.build_arch.is_some() {
        let current = settings.build_machine();
        settings.build = Some(BuildMachine {
            os: args.build_os.unwrap_or(current.os),
            arch: args.build_arch.clone().unwrap_or(current.arch),
        });
    }

    Ok(settings)
}

fn options_from(args: &OptionArgs) -> OptionsConfig {
    let shared = if args.shared {
        Some(true)
    } else if args.static_ {
        Some(false)
    } else {
        None
    };

    OptionsConfig {
        shared,
        opengl: args.opengl,
        device: args.device.clone(),
        cross_compile: args.cross_compile.clone(),
        sysroot: args.sysroot.clone(),
        multiconfiguration: args.multiconfiguration.then_some(true),
        modules: (!args.modules.is_empty()).then(|| args.modules.clone()),
        prefix: args.prefix.clone(),
        qt_version: args.qt_version.clone(),
    }
}

/// Whether stderr output may use ANSI colors.
pub fn use_color(no_color: bool) -> bool {
    use std::io::IsTerminal;
    !no_color && std::io::stderr().is_terminal()
}
