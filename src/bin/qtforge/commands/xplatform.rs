//! `qtforge xplatform` command

use anyhow::Result;

use super::use_color;
use crate::cli::XplatformArgs;
use qtforge::core::platform::PlatformDescriptor;
use qtforge::resolve_platform;
use qtforge::util::diagnostic::{emit, suggestions, Diagnostic};

pub fn execute(args: XplatformArgs, no_color: bool) -> Result<()> {
    let mut descriptor = PlatformDescriptor::new(args.os, args.compiler, args.arch);
    descriptor.compiler_version = args.compiler_version;
    descriptor.libcxx = args.libcxx;

    match resolve_platform(&descriptor) {
        Some(platform) => println!("{}", platform),
        None => emit(
            &Diagnostic::warning(format!("host not supported: {}", descriptor))
                .with_suggestion(suggestions::PLATFORM_UNRESOLVED),
            use_color(no_color),
        ),
    }

    Ok(())
}
