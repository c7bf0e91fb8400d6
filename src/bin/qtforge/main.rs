//! qtforge CLI - configure arguments and component graphs for Qt 5 builds

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use qtforge::core::errors::{ConfigurationError, GraphError};
use qtforge::util::diagnostic::{emit, ManifestSourceError};

fn main() {
    let cli = Cli::parse();
    let no_color = cli.no_color;

    if let Err(e) = run(cli) {
        report(e, commands::use_color(no_color));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("qtforge=debug")
    } else {
        EnvFilter::new("qtforge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let no_color = cli.no_color;
    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, no_color),
        Commands::Components(args) => commands::components::execute(args, no_color),
        Commands::Xplatform(args) => commands::xplatform::execute(args, no_color),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Identity(args) => commands::identity::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print known error kinds with their diagnostics, anything else plainly.
fn report(e: anyhow::Error, color: bool) {
    if let Some(err) = e.downcast_ref::<ConfigurationError>() {
        emit(&err.to_diagnostic(), color);
        return;
    }
    if let Some(err) = e.downcast_ref::<GraphError>() {
        emit(&err.to_diagnostic(), color);
        return;
    }
    match e.downcast::<ManifestSourceError>() {
        Ok(err) => eprintln!("{:?}", miette::Report::new(err)),
        Err(e) => eprintln!("error: {:#}", e),
    }
}
