//! `qtforge check` command

use anyhow::Result;

use super::load_manifest;
use crate::cli::CheckArgs;
use qtforge::core::submodule::Catalog;

pub fn execute(args: CheckArgs) -> Result<()> {
    let catalog = Catalog::qt5();
    let manifest = load_manifest(&args.manifest, &catalog)?;
    let enabled = manifest.enabled_closure(&args.modules, &catalog)?;

    if args.json {
        let json = serde_json::json!({
            "submodules": manifest,
            "enabled": enabled,
            "skipped": manifest.skipped(&enabled, &catalog),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for submodule in manifest.iter() {
        if submodule.depends.is_empty() {
            println!("{} ({})", submodule.name, submodule.status);
        } else {
            println!(
                "{} ({}) -> {}",
                submodule.name,
                submodule.status,
                submodule.depends.join(" ")
            );
        }
    }
    if !args.modules.is_empty() {
        let enabled: Vec<&str> = enabled.iter().map(String::as_str).collect();
        println!("enabled: {}", enabled.join(" "));
    }

    tracing::info!("{} submodule(s) ok", manifest.len());
    Ok(())
}
