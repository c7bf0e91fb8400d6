//! Configuration validation.
//!
//! Runs before any synthesis; the first incompatible combination aborts the
//! pass.

use semver::Version;

use crate::core::errors::ConfigurationError;
use crate::core::options::{OpenGl, Options};
use crate::core::platform::{CompilerFamily, Os, Settings};

/// Check settings and options for combinations Qt cannot build.
pub fn validate(settings: &Settings, options: &Options) -> Result<(), ConfigurationError> {
    if let Some(cppstd) = &settings.cppstd {
        check_min_cppstd(cppstd, 11)?;
    }

    if settings.os == Os::Android && options.opengl == OpenGl::Desktop {
        return Err(ConfigurationError::DesktopOpenGlOnAndroid);
    }

    if settings.os != Os::Windows && options.opengl == OpenGl::Dynamic {
        return Err(ConfigurationError::DynamicOpenGlOutsideWindows {
            os: settings.os.to_string(),
        });
    }

    if options.shared && settings.has_static_runtime() {
        return Err(ConfigurationError::SharedWithStaticRuntime {
            runtime: settings.runtime.clone().unwrap_or_default(),
        });
    }

    match settings.compiler {
        CompilerFamily::AppleClang => check_min_compiler(settings, Version::new(10, 0, 0))?,
        CompilerFamily::Gcc | CompilerFamily::Clang => {
            check_min_compiler(settings, Version::new(5, 0, 0))?
        }
        _ => {}
    }

    if settings.is_cross_building() && options.cross_compile.is_none() {
        return Err(ConfigurationError::MissingCrossCompilePrefix {
            host: format!("{} {}", settings.os, settings.arch),
        });
    }

    tracing::debug!("configuration is valid");
    Ok(())
}

fn check_min_compiler(settings: &Settings, minimum: Version) -> Result<(), ConfigurationError> {
    // Without a version there is nothing to compare.
    let Some(raw) = &settings.compiler_version else {
        return Ok(());
    };

    let version = parse_lenient(raw).ok_or_else(|| ConfigurationError::InvalidCompilerVersion {
        version: raw.clone(),
    })?;

    if version < minimum {
        return Err(ConfigurationError::CompilerTooOld {
            compiler: settings.compiler.to_string(),
            version: raw.clone(),
            minimum: format!("{}.{}", minimum.major, minimum.minor),
        });
    }
    Ok(())
}

/// Parse `9`, `10.0` or `11.2.1` into a semver version.
pub fn parse_lenient(raw: &str) -> Option<Version> {
    let mut parts = raw.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map(str::parse).transpose().ok()?.unwrap_or(0);
    let patch = parts.next().map(str::parse).transpose().ok()?.unwrap_or(0);
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, patch))
}

/// Rank a `cppstd` setting (`98`, `gnu11`, `17`, ...) by year, with `98`
/// and `03` ordered before every later standard.
fn cppstd_rank(cppstd: &str) -> Option<u32> {
    let digits = cppstd.strip_prefix("gnu").unwrap_or(cppstd);
    match digits {
        "98" => Some(1998),
        "03" => Some(2003),
        _ => digits.parse::<u32>().ok().filter(|y| *y < 98).map(|y| 2000 + y),
    }
}

fn check_min_cppstd(cppstd: &str, minimum: u32) -> Result<(), ConfigurationError> {
    let rank = cppstd_rank(cppstd).ok_or_else(|| ConfigurationError::InvalidCppStd {
        cppstd: cppstd.to_string(),
    })?;
    if rank < 2000 + minimum {
        return Err(ConfigurationError::CppStdTooOld {
            cppstd: cppstd.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> (Settings, Options) {
        (
            Settings::new(Os::Linux, "x86_64", CompilerFamily::Gcc).with_compiler_version("9"),
            Options::for_os(Os::Linux),
        )
    }

    #[test]
    fn test_valid_native_build() {
        let (settings, options) = linux();
        validate(&settings, &options).unwrap();
    }

    #[test]
    fn test_old_gcc_rejected() {
        let (settings, options) = linux();
        let settings = settings.with_compiler_version("4.9");
        assert!(matches!(
            validate(&settings, &options),
            Err(ConfigurationError::CompilerTooOld { .. })
        ));
    }

    #[test]
    fn test_old_apple_clang_rejected() {
        let settings = Settings::new(Os::Macos, "x86_64", CompilerFamily::AppleClang)
            .with_compiler_version("9.1");
        let options = Options::for_os(Os::Macos);
        assert!(validate(&settings, &options).is_err());

        let settings = settings.with_compiler_version("10.0");
        validate(&settings, &options).unwrap();
    }

    #[test]
    fn test_garbage_compiler_version() {
        let (settings, options) = linux();
        let settings = settings.with_compiler_version("latest");
        assert!(matches!(
            validate(&settings, &options),
            Err(ConfigurationError::InvalidCompilerVersion { .. })
        ));
    }

    #[test]
    fn test_cppstd() {
        let (mut settings, options) = linux();
        for ok in ["11", "gnu14", "17", "20"] {
            settings.cppstd = Some(ok.to_string());
            validate(&settings, &options).unwrap();
        }
        for old in ["98", "gnu98", "03"] {
            settings.cppstd = Some(old.to_string());
            assert!(matches!(
                validate(&settings, &options),
                Err(ConfigurationError::CppStdTooOld { .. })
            ));
        }
        settings.cppstd = Some("c++17".to_string());
        assert!(matches!(
            validate(&settings, &options),
            Err(ConfigurationError::InvalidCppStd { .. })
        ));
    }

    #[test]
    fn test_opengl_restrictions() {
        let settings = Settings::new(Os::Android, "armv8", CompilerFamily::Clang)
            .with_build_machine(Os::Linux, "x86_64");
        let mut options = Options::for_os(Os::Android);
        options.cross_compile = Some("aarch64-linux-android-".to_string());
        options.opengl = OpenGl::Desktop;
        assert_eq!(
            validate(&settings, &options),
            Err(ConfigurationError::DesktopOpenGlOnAndroid)
        );

        let (settings, mut options) = linux();
        options.opengl = OpenGl::Dynamic;
        assert!(matches!(
            validate(&settings, &options),
            Err(ConfigurationError::DynamicOpenGlOutsideWindows { .. })
        ));
    }

    #[test]
    fn test_shared_with_static_runtime() {
        let mut settings = Settings::new(Os::Windows, "x86_64", CompilerFamily::Msvc);
        settings.runtime = Some("MT".to_string());
        let mut options = Options::for_os(Os::Windows);
        validate(&settings, &options).unwrap();

        options.shared = true;
        assert!(matches!(
            validate(&settings, &options),
            Err(ConfigurationError::SharedWithStaticRuntime { .. })
        ));
    }

    #[test]
    fn test_cross_build_needs_prefix() {
        let settings = Settings::new(Os::Linux, "armv8", CompilerFamily::Gcc)
            .with_compiler_version("10")
            .with_build_machine(Os::Linux, "x86_64");
        let mut options = Options::for_os(Os::Linux);
        assert!(matches!(
            validate(&settings, &options),
            Err(ConfigurationError::MissingCrossCompilePrefix { .. })
        ));

        options.cross_compile = Some("aarch64-linux-gnu-".to_string());
        validate(&settings, &options).unwrap();
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("9"), Some(Version::new(9, 0, 0)));
        assert_eq!(parse_lenient("10.0"), Some(Version::new(10, 0, 0)));
        assert_eq!(parse_lenient("11.2.1"), Some(Version::new(11, 2, 1)));
        assert_eq!(parse_lenient("1.2.3.4"), None);
        assert_eq!(parse_lenient("x"), None);
    }
}
