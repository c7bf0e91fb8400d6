//! Flag synthesis for Qt's `configure` script.
//!
//! The argument list is emitted in a fixed order, because later arguments
//! override earlier ones when `configure` resolves them:
//!
//! 1. link mode (`-static` / `-shared`)
//! 2. build type
//! 3. fixed invocation basics (license, prefix, verbosity)
//! 4. one `-skip` per disabled optional submodule
//! 5. feature toggles (bundled vs. system libraries, disabled subsystems)
//! 6. per-dependency library variables, include paths and defines
//! 7. platform and cross-compilation arguments
//! 8. compiler overrides

use std::path::Path;

use serde::Serialize;

use crate::builder::gather::LibraryGatherer;
use crate::builder::xplatform::PlatformIdentifier;
use crate::core::dependency::AvailableDependencies;
use crate::core::options::{BuildConfiguration, BuildType, OpenGl, Options};
use crate::core::platform::{CompilerFamily, Os, Settings};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Dependencies `configure` knows a `<VAR>_LIBS` variable for.
pub const LIBRARY_VARIABLES: &[(&str, &str)] = &[
    ("zlib", "ZLIB"),
    ("openssl", "OPENSSL"),
    ("pcre2", "PCRE2"),
    ("glib", "GLIB"),
    ("double-conversion", "DOUBLECONVERSION"),
    ("freetype", "FREETYPE"),
    ("fontconfig", "FONTCONFIG"),
    ("icu", "ICU"),
    ("harfbuzz", "HARFBUZZ"),
    ("libjpeg", "LIBJPEG"),
    ("libjpeg-turbo", "LIBJPEG"),
    ("libpng", "LIBPNG"),
    ("libmysqlclient", "MYSQL"),
    ("libpq", "PSQL"),
    ("odbc", "ODBC"),
    ("sdl2", "SDL2"),
    ("openal", "OPENAL"),
    ("zstd", "ZSTD"),
    ("libalsa", "ALSA"),
    ("xkbcommon", "XKBCOMMON"),
    ("md4c", "LIBMD4C"),
];

/// Subsystems that are always disabled or always bundled.
const FEATURE_TOGGLES: &[&str] = &[
    "-no-openssl",
    "-no-glib",
    "-qt-pcre",
    "-no-fontconfig",
    "-no-icu",
    "-no-zstd",
    "-no-dbus",
    "-no-feature-gssapi",
    "-qt-doubleconversion",
    "-qt-freetype",
    "-qt-harfbuzz",
    "-qt-libjpeg",
    "-qt-libpng",
    "-qt-sqlite",
    "-sql-sqlite",
    "-qt-libmd4c",
];

/// C and C++ compiler paths for non-MSVC toolchains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOverrides {
    pub cc: Option<String>,
    pub cxx: Option<String>,
}

/// The synthesized argument list plus any non-fatal findings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigureArgs {
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Diagnostic>,
}

impl ConfigureArgs {
    pub fn contains(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    pub fn position(&self, arg: &str) -> Option<usize> {
        self.args.iter().position(|a| a == arg)
    }
}

/// Builds the `configure` argument list.
pub struct FlagSynthesizer<'a> {
    settings: &'a Settings,
    options: &'a Options,
    deps: &'a AvailableDependencies,
    platform: Option<&'a PlatformIdentifier>,
    skip: &'a [String],
    compilers: CompilerOverrides,
}

impl<'a> FlagSynthesizer<'a> {
    pub fn new(
        settings: &'a Settings,
        options: &'a Options,
        deps: &'a AvailableDependencies,
    ) -> Self {
        FlagSynthesizer {
            settings,
            options,
            deps,
            platform: None,
            skip: &[],
            compilers: CompilerOverrides::default(),
        }
    }

    /// Resolved platform identifier, if any.
    pub fn platform(mut self, platform: Option<&'a PlatformIdentifier>) -> Self {
        self.platform = platform;
        self
    }

    /// Optional submodules to skip.
    pub fn skip(mut self, skip: &'a [String]) -> Self {
        self.skip = skip;
        self
    }

    pub fn compilers(mut self, compilers: CompilerOverrides) -> Self {
        self.compilers = compilers;
        self
    }

    /// Produce the argument list.
    pub fn synthesize(&self) -> ConfigureArgs {
        let mut out = ConfigureArgs::default();

        self.link_mode(&mut out.args);
        self.build_type(&mut out.args);
        self.basics(&mut out.args);
        for module in self.skip {
            out.args.push(format!("-skip {}", module));
        }
        self.features(&mut out.args);
        self.libraries(&mut out.args);
        self.platform_args(&mut out);
        self.compiler_overrides(&mut out.args);

        tracing::debug!("synthesized {} configure arguments", out.args.len());
        out
    }

    fn link_mode(&self, args: &mut Vec<String>) {
        if self.options.shared {
            args.push("-shared".to_string());
        } else {
            args.push("-static".to_string());
        }
    }

    fn build_type(&self, args: &mut Vec<String>) {
        match self.options.build_configuration(self.settings) {
            Some(BuildConfiguration::Multi) => args.push("-debug-and-release".to_string()),
            Some(BuildConfiguration::Single(BuildType::Debug)) => args.push("-debug".to_string()),
            Some(BuildConfiguration::Single(BuildType::Release)) => {
                args.push("-release".to_string())
            }
            Some(BuildConfiguration::Single(BuildType::RelWithDebInfo)) => {
                args.push("-release".to_string());
                args.push("-force-debug-info".to_string());
            }
            Some(BuildConfiguration::Single(BuildType::MinSizeRel)) => {
                args.push("-release".to_string());
                args.push("-optimize-size".to_string());
            }
            None => {}
        }
    }

    fn basics(&self, args: &mut Vec<String>) {
        if !self.options.shared && self.settings.is_msvc() && self.settings.has_static_runtime() {
            args.push("-static-runtime".to_string());
        }

        args.extend(
            ["-confirm-license", "-silent", "-nomake examples", "-nomake tests"]
                .map(String::from),
        );
        if let Some(prefix) = &self.options.prefix {
            args.push(format!("-prefix {}", prefix.display()));
        }
        args.push("-v".to_string());
        args.push("-opensource".to_string());
        if self.settings.os == Os::Windows {
            args.push("-mp".to_string());
        }
    }

    fn features(&self, args: &mut Vec<String>) {
        args.push("-qt-zlib".to_string());
        args.push(match self.options.opengl {
            OpenGl::No => "-no-opengl".to_string(),
            mode => format!("-opengl {}", mode),
        });
        args.extend(FEATURE_TOGGLES.iter().map(|f| f.to_string()));
    }

    fn libraries(&self, args: &mut Vec<String>) {
        let gatherer = LibraryGatherer::new(self.deps, self.settings.is_apple());

        for (package, var) in LIBRARY_VARIABLES {
            let Some(info) = self.deps.get(package) else {
                continue;
            };
            if *package == "freetype" {
                if let Some(include) = info.include_paths.last() {
                    args.push(format!("\"{}_INCDIR={}\"", var, include.display()));
                }
            }
            args.push(format!(
                "\"{}_LIBS={}\"",
                var,
                gatherer.gather(package).join(" ")
            ));
        }

        for (_, info) in self.deps.iter() {
            args.extend(
                info.include_paths
                    .iter()
                    .map(|p| format!("-I \"{}\"", p.display())),
            );
            args.extend(info.defines.iter().map(|d| format!("-D {}", d)));
        }

        let lib_paths: Vec<String> = self
            .deps
            .iter()
            .flat_map(|(_, info)| info.lib_paths.iter())
            .map(|p| p.display().to_string())
            .collect();
        args.push(format!("QMAKE_LIBDIR+=\"{}\"", lib_paths.join(" ")));
        if !self.settings.is_msvc() {
            args.push(format!("QMAKE_RPATHLINKDIR+=\"{}\"", lib_paths.join(":")));
        }

        if let Some(root) = self.root_path("libmysqlclient") {
            args.push(format!(
                "-mysql_config \"{}\"",
                root.join("bin").join("mysql_config").display()
            ));
        }
        if let Some(root) = self.root_path("libpq") {
            args.push(format!(
                "-psql_config \"{}\"",
                root.join("bin").join("pg_config").display()
            ));
        }
    }

    fn root_path(&self, package: &str) -> Option<&'a Path> {
        let info = self.deps.get(package)?;
        match &info.root_path {
            Some(root) => Some(root.as_path()),
            None => {
                tracing::warn!("`{}` has no root path, skipping its config tool", package);
                None
            }
        }
    }

    fn platform_args(&self, out: &mut ConfigureArgs) {
        let settings = self.settings;
        let args = &mut out.args;

        match settings.os {
            Os::Macos => {
                args.push("-no-framework".to_string());
                if settings.arch == "armv8" {
                    args.push("QMAKE_APPLE_DEVICE_ARCHS=\"arm64\"".to_string());
                }
            }
            Os::Android => {
                match settings.os_api_level {
                    Some(level) => args.push(format!("-android-ndk-platform android-{}", level)),
                    None => tracing::warn!("no Android API level set, using the NDK default"),
                }
                match android_abi(&settings.arch) {
                    Some(abi) => args.push(format!("-android-abis {}", abi)),
                    None => tracing::warn!("no Android ABI for architecture `{}`", settings.arch),
                }
            }
            _ => {}
        }

        match settings.libcxx.as_deref() {
            Some("libstdc++") => args.push("-D_GLIBCXX_USE_CXX11_ABI=0".to_string()),
            Some("libstdc++11") => args.push("-D_GLIBCXX_USE_CXX11_ABI=1".to_string()),
            _ => {}
        }

        if let Some(sysroot) = &self.options.sysroot {
            args.push(format!("-sysroot {}", sysroot.display()));
        }

        if let Some(device) = &self.options.device {
            args.push(format!("-device {}", device));
        } else if let Some(platform) = self.platform {
            if settings.is_cross_building_skip_x64_x86() {
                args.push(format!("-xplatform {}", platform));
            } else {
                args.push(format!("-platform {}", platform));
            }
        } else {
            let descriptor = settings.descriptor();
            tracing::warn!("host not supported: {}", descriptor);
            out.warnings.push(
                Diagnostic::warning(format!("host not supported: {}", descriptor))
                    .with_context("no -platform argument was emitted".to_string())
                    .with_suggestion(suggestions::PLATFORM_UNRESOLVED),
            );
        }

        if let Some(prefix) = &self.options.cross_compile {
            args.push(format!("-device-option CROSS_COMPILE={}", prefix));
        }
    }

    fn compiler_overrides(&self, args: &mut Vec<String>) {
        let settings = self.settings;
        let build = settings.build_machine();

        if !settings.is_msvc() {
            let normalize = |path: &str| {
                if build.os == Os::Windows {
                    path.replace('\\', "/")
                } else {
                    path.to_string()
                }
            };

            if let Some(cc) = &self.compilers.cc {
                let cc = normalize(cc);
                for var in ["QMAKE_CC", "QMAKE_LINK_C", "QMAKE_LINK_C_SHLIB"] {
                    args.push(format!("{}=\"{}\"", var, cc));
                }
            }
            if let Some(cxx) = &self.compilers.cxx {
                let cxx = normalize(cxx);
                for var in ["QMAKE_CXX", "QMAKE_LINK", "QMAKE_LINK_SHLIB"] {
                    args.push(format!("{}=\"{}\"", var, cxx));
                }
            }
        }

        if build.os == Os::Linux && settings.compiler == CompilerFamily::Clang {
            args.push("QMAKE_CXXFLAGS+=\"-ftemplate-depth=1024\"".to_string());
        }
    }
}

fn android_abi(arch: &str) -> Option<&'static str> {
    match arch {
        "armv7" => Some("armeabi-v7a"),
        "armv8" => Some("arm64-v8a"),
        "x86" => Some("x86"),
        "x86_64" => Some("x86_64"),
        _ => None,
    }
}
