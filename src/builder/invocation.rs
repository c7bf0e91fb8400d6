//! Helpers around the external build invocation.

use crate::core::options::Options;
use crate::core::platform::{CompilerFamily, Os, Settings};
use crate::util::hash::Fingerprint;

/// Location of the relocatable `qt.conf` inside the package.
pub const QT_CONF_PATH: &str = "bin/qt.conf";

/// Version of jom pulled in for MSVC builds on Windows.
pub const JOM_REQUIREMENT: &str = "jom/1.1.3";

/// Make tool that drives the configured build tree.
pub fn make_program(settings: &Settings) -> &'static str {
    if settings.is_msvc() {
        "jom"
    } else if settings.build_machine().os == Os::Windows {
        "mingw32-make"
    } else {
        "make"
    }
}

/// Tools that must be available on the build machine.
pub fn build_requirements(settings: &Settings) -> Vec<&'static str> {
    if settings.build_machine().os == Os::Windows && settings.is_msvc() {
        vec![JOM_REQUIREMENT]
    } else {
        Vec::new()
    }
}

/// `qt.conf` installed next to the Qt tools, making the package relocatable.
pub fn qt_conf() -> String {
    "[Paths]\nPrefix = ..\n".to_string()
}

/// Fingerprint identifying binary-compatible builds.
///
/// `cross_compile` and `sysroot` do not affect the produced binaries. A
/// multiconfiguration MSVC build carries both runtimes, so the runtime is
/// collapsed to the pair.
pub fn binary_identity(settings: &Settings, options: &Options) -> String {
    let mut runtime = settings.runtime.clone();
    let mut runtime_type = None;
    let mut build_type = settings.build_type.map(|b| b.as_str());

    if options.multiconfiguration {
        build_type = None;
        if settings.is_msvc() {
            if settings.compiler == CompilerFamily::VisualStudio {
                let md = runtime.as_deref().is_some_and(|r| r.contains("MD"));
                runtime = Some(if md { "MD/MDd" } else { "MT/MTd" }.to_string());
            } else {
                runtime_type = Some("Release/Debug");
            }
        }
    }

    let build = settings.build_machine();
    let modules = options.modules.join(" ");
    let version = options.version.to_string();

    let mut fp = Fingerprint::new();
    fp.update_field("os", Some(settings.os.as_str()))
        .update_field("arch", Some(&settings.arch))
        .update_field("compiler", Some(settings.compiler.as_str()))
        .update_field("compiler.version", settings.compiler_version.as_deref())
        .update_field("compiler.libcxx", settings.libcxx.as_deref())
        .update_field("compiler.runtime", runtime.as_deref())
        .update_field("compiler.runtime_type", runtime_type)
        .update_field("compiler.cppstd", settings.cppstd.as_deref())
        .update_field("build_type", build_type)
        .update_field("build.os", Some(build.os.as_str()))
        .update_field("build.arch", Some(&build.arch))
        .update_bool("shared", options.shared)
        .update_field("opengl", Some(options.opengl.as_str()))
        .update_field("device", options.device.as_deref())
        .update_bool("multiconfiguration", options.multiconfiguration)
        .update_field("modules", Some(&modules))
        .update_field("version", Some(&version));
    fp.finish()
}
