//! Build settings: target OS, architecture and compiler.
//!
//! `Settings` describes the host the Qt build is produced for. The optional
//! `build` machine describes where the build runs; when it differs from the
//! host the build is a cross build.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigurationError;
use crate::core::options::BuildType;

/// Operating system of a build or host machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
    Windows,
    WindowsStore,
    Linux,
    FreeBsd,
    Macos,
    Ios,
    WatchOs,
    TvOs,
    Android,
    Emscripten,
    SunOs,
    Neutrino,
}

impl Os {
    pub const ALL: &'static [Os] = &[
        Os::Windows,
        Os::WindowsStore,
        Os::Linux,
        Os::FreeBsd,
        Os::Macos,
        Os::Ios,
        Os::WatchOs,
        Os::TvOs,
        Os::Android,
        Os::Emscripten,
        Os::SunOs,
        Os::Neutrino,
    ];

    /// Get the canonical settings name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::WindowsStore => "WindowsStore",
            Os::Linux => "Linux",
            Os::FreeBsd => "FreeBSD",
            Os::Macos => "Macos",
            Os::Ios => "iOS",
            Os::WatchOs => "watchOS",
            Os::TvOs => "tvOS",
            Os::Android => "Android",
            Os::Emscripten => "Emscripten",
            Os::SunOs => "SunOS",
            Os::Neutrino => "Neutrino",
        }
    }

    /// Any of the Apple operating systems.
    pub fn is_apple(&self) -> bool {
        matches!(self, Os::Macos | Os::Ios | Os::WatchOs | Os::TvOs)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Os::ALL
            .iter()
            .copied()
            .find(|os| os.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigurationError::InvalidSetting {
                setting: "os".to_string(),
                value: s.to_string(),
                expected: Os::ALL.iter().map(|os| os.as_str().to_string()).collect(),
            })
    }
}

impl TryFrom<String> for Os {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Os> for String {
    fn from(os: Os) -> Self {
        os.as_str().to_string()
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
    /// Legacy Visual Studio setting, versioned by IDE major (14, 15, 16).
    VisualStudio,
    SunCc,
    Qcc,
}

impl CompilerFamily {
    pub const ALL: &'static [CompilerFamily] = &[
        CompilerFamily::Gcc,
        CompilerFamily::Clang,
        CompilerFamily::AppleClang,
        CompilerFamily::Msvc,
        CompilerFamily::VisualStudio,
        CompilerFamily::SunCc,
        CompilerFamily::Qcc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::VisualStudio => "Visual Studio",
            CompilerFamily::SunCc => "sun-cc",
            CompilerFamily::Qcc => "qcc",
        }
    }

    /// Both MSVC spellings.
    pub fn is_msvc(&self) -> bool {
        matches!(self, CompilerFamily::Msvc | CompilerFamily::VisualStudio)
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompilerFamily::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigurationError::InvalidSetting {
                setting: "compiler".to_string(),
                value: s.to_string(),
                expected: CompilerFamily::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

impl TryFrom<String> for CompilerFamily {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompilerFamily> for String {
    fn from(compiler: CompilerFamily) -> Self {
        compiler.as_str().to_string()
    }
}

/// The machine a build runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMachine {
    pub os: Os,
    pub arch: String,
}

/// Settings of the host the Qt build is produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub arch: String,
    pub compiler: CompilerFamily,

    #[serde(default)]
    pub compiler_version: Option<String>,

    /// C++ standard library flavour (libstdc++, libstdc++11, libc++, libstlport)
    #[serde(default)]
    pub libcxx: Option<String>,

    /// MSVC runtime (MD, MDd, MT, MTd)
    #[serde(default)]
    pub runtime: Option<String>,

    #[serde(default)]
    pub cppstd: Option<String>,

    #[serde(default)]
    pub build_type: Option<BuildType>,

    /// Android API level
    #[serde(default)]
    pub os_api_level: Option<u32>,

    /// Build machine; defaults to the host itself
    #[serde(default)]
    pub build: Option<BuildMachine>,
}

impl Settings {
    /// Create native settings with no optional fields.
    pub fn new(os: Os, arch: impl Into<String>, compiler: CompilerFamily) -> Self {
        Settings {
            os,
            arch: arch.into(),
            compiler,
            compiler_version: None,
            libcxx: None,
            runtime: None,
            cppstd: None,
            build_type: None,
            os_api_level: None,
            build: None,
        }
    }

    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = Some(build_type);
        self
    }

    pub fn with_libcxx(mut self, libcxx: impl Into<String>) -> Self {
        self.libcxx = Some(libcxx.into());
        self
    }

    pub fn with_build_machine(mut self, os: Os, arch: impl Into<String>) -> Self {
        self.build = Some(BuildMachine {
            os,
            arch: arch.into(),
        });
        self
    }

    /// The machine the build runs on.
    pub fn build_machine(&self) -> BuildMachine {
        self.build.clone().unwrap_or_else(|| BuildMachine {
            os: self.os,
            arch: self.arch.clone(),
        })
    }

    /// Whether build and host machines differ.
    pub fn is_cross_building(&self) -> bool {
        let build = self.build_machine();
        build.os != self.os || build.arch != self.arch
    }

    /// Like [`Settings::is_cross_building`], but an x86_64 machine building
    /// for x86 on the same OS counts as native.
    pub fn is_cross_building_skip_x64_x86(&self) -> bool {
        let build = self.build_machine();
        if build.os == self.os && build.arch == "x86_64" && self.arch == "x86" {
            return false;
        }
        self.is_cross_building()
    }

    pub fn is_msvc(&self) -> bool {
        self.compiler.is_msvc()
    }

    pub fn is_apple(&self) -> bool {
        self.os.is_apple()
    }

    /// MSVC static runtime (`/MT`, `/MTd`).
    pub fn has_static_runtime(&self) -> bool {
        self.runtime.as_deref().is_some_and(|r| r.contains("MT"))
    }

    /// The subset of settings used to resolve a platform identifier.
    pub fn descriptor(&self) -> PlatformDescriptor {
        PlatformDescriptor {
            os: self.os,
            compiler: self.compiler,
            compiler_version: self.compiler_version.clone(),
            arch: self.arch.clone(),
            libcxx: self.libcxx.clone(),
        }
    }
}

/// Inputs of platform-identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: Os,
    pub compiler: CompilerFamily,
    pub compiler_version: Option<String>,
    pub arch: String,
    pub libcxx: Option<String>,
}

impl PlatformDescriptor {
    pub fn new(os: Os, compiler: CompilerFamily, arch: impl Into<String>) -> Self {
        PlatformDescriptor {
            os,
            compiler,
            compiler_version: None,
            arch: arch.into(),
            libcxx: None,
        }
    }

    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }

    pub fn with_libcxx(mut self, libcxx: impl Into<String>) -> Self {
        self.libcxx = Some(libcxx.into());
        self
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.os,
            self.compiler,
            self.compiler_version.as_deref().unwrap_or("(any version)"),
            self.arch
        )
    }
}
