//! `qtforge identity` command

use anyhow::Result;

use super::Inputs;
use crate::cli::IdentityArgs;
use qtforge::builder::invocation::binary_identity;

pub fn execute(args: IdentityArgs) -> Result<()> {
    let inputs = Inputs::load(&args.inputs)?;
    println!("{}", binary_identity(&inputs.settings, &inputs.options));
    Ok(())
}
