//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use qtforge::core::options::{BuildType, OpenGl};
use qtforge::core::platform::{CompilerFamily, Os};

/// qtforge - configure arguments and component graphs for Qt 5 builds
#[derive(Parser)]
#[command(name = "qtforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the argument list for Qt's configure script
    Configure(ConfigureArgs),

    /// Print the component graph and the build modules of each component
    Components(ComponentsArgs),

    /// Resolve the qmake platform for an OS, compiler and architecture
    Xplatform(XplatformArgs),

    /// Parse and validate a submodule manifest
    Check(CheckArgs),

    /// Print the binary identity of a configuration
    Identity(IdentityArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Host settings, from a profile and/or individual flags.
#[derive(Args, Clone, Default)]
pub struct SettingsArgs {
    /// Profile with [settings], [options] and [toolchain] tables
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Host operating system
    #[arg(long)]
    pub os: Option<Os>,

    /// Host architecture (x86, x86_64, armv7, armv8, ...)
    #[arg(long)]
    pub arch: Option<String>,

    /// Compiler family
    #[arg(long)]
    pub compiler: Option<CompilerFamily>,

    #[arg(long)]
    pub compiler_version: Option<String>,

    /// C++ standard library (libstdc++, libstdc++11, libc++)
    #[arg(long)]
    pub libcxx: Option<String>,

    /// MSVC runtime (MD, MDd, MT, MTd)
    #[arg(long)]
    pub runtime: Option<String>,

    #[arg(long)]
    pub cppstd: Option<String>,

    #[arg(long)]
    pub build_type: Option<BuildType>,

    /// Android API level
    #[arg(long)]
    pub api_level: Option<u32>,

    /// OS of the build machine, when cross-building
    #[arg(long)]
    pub build_os: Option<Os>,

    /// Architecture of the build machine, when cross-building
    #[arg(long)]
    pub build_arch: Option<String>,
}

/// User options. Unset flags fall back to profile, config and defaults.
#[derive(Args, Clone, Default)]
pub struct OptionArgs {
    /// Build shared libraries
    #[arg(long, conflicts_with = "static_")]
    pub shared: bool,

    /// Build static libraries
    #[arg(long = "static", id = "static_")]
    pub static_: bool,

    /// OpenGL mode (no, es2, desktop, dynamic)
    #[arg(long)]
    pub opengl: Option<OpenGl>,

    /// Explicit qmake device mkspec
    #[arg(long)]
    pub device: Option<String>,

    /// Cross-compiler prefix (e.g. aarch64-linux-gnu-)
    #[arg(long)]
    pub cross_compile: Option<String>,

    #[arg(long)]
    pub sysroot: Option<PathBuf>,

    /// Build debug and release in one tree
    #[arg(long)]
    pub multiconfiguration: bool,

    /// Enable an optional submodule (repeatable)
    #[arg(long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Install prefix passed to configure
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// Qt version
    #[arg(long)]
    pub qt_version: Option<String>,

    /// C compiler
    #[arg(long, env = "CC")]
    pub cc: Option<String>,

    /// C++ compiler
    #[arg(long, env = "CXX")]
    pub cxx: Option<String>,
}

/// Everything a synthesis pass reads.
#[derive(Args, Clone, Default)]
pub struct InputArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Submodule manifest (.gitmodules-style)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// TOML file describing the available dependencies
    #[arg(long)]
    pub deps: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ComponentsArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Installed package to enrich the graph from
    #[arg(long)]
    pub installed: Option<PathBuf>,

    /// Write generated build-module snippets below this directory
    #[arg(long, value_name = "DIR")]
    pub emit_snippets: Option<PathBuf>,

    /// Output the requires graph in Graphviz format
    #[arg(long, conflicts_with = "json")]
    pub dot: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct XplatformArgs {
    #[arg(long)]
    pub os: Os,

    #[arg(long)]
    pub compiler: CompilerFamily,

    #[arg(long)]
    pub arch: String,

    #[arg(long)]
    pub compiler_version: Option<String>,

    #[arg(long)]
    pub libcxx: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Submodule manifest to check
    pub manifest: PathBuf,

    /// Show the closure of these optional submodules
    #[arg(long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct IdentityArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
