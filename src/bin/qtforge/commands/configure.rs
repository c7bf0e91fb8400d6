//! `qtforge configure` command

use anyhow::Result;

use super::{use_color, Inputs};
use crate::cli::ConfigureArgs;
use qtforge::ops::synthesize;
use qtforge::util::diagnostic::emit;

pub fn execute(args: ConfigureArgs, no_color: bool) -> Result<()> {
    let inputs = Inputs::load(&args.inputs)?;
    let report = synthesize(&inputs.request())?;

    let color = use_color(no_color);
    for warning in report.warnings() {
        emit(warning, color);
    }

    if args.json {
        let json = serde_json::json!({
            "platform": report.platform,
            "args": report.configure.args,
            "make_program": report.make_program,
            "build_requirements": report.build_requirements,
            "skipped": report.skipped,
            "warnings": report.warnings(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for arg in &report.configure.args {
        println!("{}", arg);
    }

    Ok(())
}
