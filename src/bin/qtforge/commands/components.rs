//! `qtforge components` command

use anyhow::Result;

use super::{use_color, Inputs};
use crate::cli::ComponentsArgs;
use qtforge::ops::{discover_layout, emit_snippets, synthesize};
use qtforge::util::diagnostic::emit;

pub fn execute(args: ComponentsArgs, no_color: bool) -> Result<()> {
    let inputs = Inputs::load(&args.inputs)?;

    let layout = args.installed.as_deref().map(discover_layout).transpose()?;
    let mut request = inputs.request();
    request.layout = layout.as_ref();
    let report = synthesize(&request)?;

    let color = use_color(no_color);
    for warning in report.warnings() {
        emit(warning, color);
    }

    if let Some(dir) = &args.emit_snippets {
        let written = emit_snippets(&report.components, &report.qt_conf, dir)?;
        tracing::info!("wrote {} file(s) to {}", written.len(), dir.display());
    }

    if args.dot {
        print!("{}", report.components.to_dot()?);
        return Ok(());
    }

    if args.json {
        let json = serde_json::json!({
            "components": report.components,
            "build_modules": report.build_modules,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for component in report.components.components() {
        println!(
            "{} ({}, {})",
            component.name, component.target_name, component.kind
        );
        if !component.libs.is_empty() {
            println!("  libs: {}", component.libs.join(" "));
        }
        if !component.system_libs.is_empty() {
            println!("  system libs: {}", component.system_libs.join(" "));
        }
        if !component.frameworks.is_empty() {
            println!("  frameworks: {}", component.frameworks.join(" "));
        }
        if !component.requires.is_empty() {
            println!("  requires: {}", component.requires.join(" "));
        }
        for id in report.build_modules.for_component(&component.name) {
            println!("  build module: {}", id);
        }
    }

    Ok(())
}
