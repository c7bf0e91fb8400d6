//! Platform identifier resolution.
//!
//! Maps a [`PlatformDescriptor`] to the mkspec name Qt's `configure`
//! understands (`linux-g++`, `win32-msvc`, ...). The mapping is a static
//! table keyed by OS and compiler family; each entry carries a rule that
//! looks at the architecture, the C++ library or the compiler version.

use std::fmt;

use serde::Serialize;

use crate::core::platform::{CompilerFamily, Os, PlatformDescriptor};

/// An mkspec name understood by Qt's `configure`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlatformIdentifier(String);

impl PlatformIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        PlatformIdentifier(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type ArchTable = &'static [(&'static str, &'static str)];

/// How an entry picks its identifier.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Fixed(&'static str),
    ByArch(ArchTable),
    /// `(arch, libcxx, identifier)`; a `None` libcxx matches any library
    ByArchAndLibcxx(&'static [(&'static str, Option<&'static str>, &'static str)]),
    /// Compiler version is mapped to a short code, which selects an
    /// architecture table.
    ByVersionThenArch {
        versions: &'static [(&'static str, &'static str)],
        archs: &'static [(&'static str, ArchTable)],
    },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    os: Os,
    /// `None` matches every compiler
    compiler: Option<CompilerFamily>,
    rule: Rule,
}

const fn entry(os: Os, compiler: CompilerFamily, rule: Rule) -> Entry {
    Entry {
        os,
        compiler: Some(compiler),
        rule,
    }
}

const LINUX_GCC: ArchTable = &[
    ("x86", "linux-g++-32"),
    ("x86_64", "linux-g++"),
    ("armv6", "linux-arm-gnueabi-g++"),
    ("armv7", "linux-arm-gnueabi-g++"),
    ("armv7hf", "linux-arm-gnueabi-g++"),
    ("armv8", "linux-aarch64-gnu-g++"),
];

const WINRT_2015: ArchTable = &[
    ("armv7", "winrt-arm-msvc2015"),
    ("x86", "winrt-x86-msvc2015"),
    ("x86_64", "winrt-x64-msvc2015"),
];

const WINRT_2017: ArchTable = &[
    ("armv7", "winrt-arm-msvc2017"),
    ("x86", "winrt-x86-msvc2017"),
    ("x86_64", "winrt-x64-msvc2017"),
];

const WINRT_2019: ArchTable = &[
    ("armv7", "winrt-arm-msvc2019"),
    ("x86", "winrt-x86-msvc2019"),
    ("x86_64", "winrt-x64-msvc2019"),
];

const WINRT_ARCHS: &[(&str, ArchTable)] =
    &[("14", WINRT_2015), ("15", WINRT_2017), ("16", WINRT_2019)];

const QNX_QCC: ArchTable = &[
    ("armv8", "qnx-aarch64le-qcc"),
    ("armv8.3", "qnx-aarch64le-qcc"),
    ("armv7", "qnx-armle-v7-qcc"),
    ("armv7hf", "qnx-armle-v7-qcc"),
    ("armv7s", "qnx-armle-v7-qcc"),
    ("armv7k", "qnx-armle-v7-qcc"),
    ("x86", "qnx-x86-qcc"),
    ("x86_64", "qnx-x86-64-qcc"),
];

static TABLE: &[Entry] = &[
    entry(Os::Linux, CompilerFamily::Gcc, Rule::ByArch(LINUX_GCC)),
    entry(
        Os::Linux,
        CompilerFamily::Clang,
        Rule::ByArchAndLibcxx(&[
            ("x86", Some("libc++"), "linux-clang-libc++-32"),
            ("x86", None, "linux-clang-32"),
            ("x86_64", Some("libc++"), "linux-clang-libc++"),
            ("x86_64", None, "linux-clang"),
        ]),
    ),
    entry(Os::Macos, CompilerFamily::Clang, Rule::Fixed("macx-clang")),
    entry(Os::Macos, CompilerFamily::AppleClang, Rule::Fixed("macx-clang")),
    entry(Os::Macos, CompilerFamily::Gcc, Rule::Fixed("macx-g++")),
    entry(Os::Ios, CompilerFamily::AppleClang, Rule::Fixed("macx-ios-clang")),
    entry(Os::WatchOs, CompilerFamily::AppleClang, Rule::Fixed("macx-watchos-clang")),
    entry(Os::TvOs, CompilerFamily::AppleClang, Rule::Fixed("macx-tvos-clang")),
    entry(Os::Android, CompilerFamily::Clang, Rule::Fixed("android-clang")),
    entry(Os::Windows, CompilerFamily::VisualStudio, Rule::Fixed("win32-msvc")),
    entry(Os::Windows, CompilerFamily::Msvc, Rule::Fixed("win32-msvc")),
    entry(Os::Windows, CompilerFamily::Gcc, Rule::Fixed("win32-g++")),
    entry(Os::Windows, CompilerFamily::Clang, Rule::Fixed("win32-clang-g++")),
    entry(
        Os::WindowsStore,
        CompilerFamily::VisualStudio,
        Rule::ByVersionThenArch {
            versions: &[("14", "14"), ("15", "15"), ("16", "16")],
            archs: WINRT_ARCHS,
        },
    ),
    entry(
        Os::WindowsStore,
        CompilerFamily::Msvc,
        Rule::ByVersionThenArch {
            versions: &[("190", "14"), ("191", "15"), ("192", "16")],
            archs: WINRT_ARCHS,
        },
    ),
    entry(Os::FreeBsd, CompilerFamily::Clang, Rule::Fixed("freebsd-clang")),
    entry(Os::FreeBsd, CompilerFamily::Gcc, Rule::Fixed("freebsd-g++")),
    entry(
        Os::SunOs,
        CompilerFamily::SunCc,
        Rule::ByArchAndLibcxx(&[
            ("sparc", Some("libstlport"), "solaris-cc-stlport"),
            ("sparc", None, "solaris-cc"),
            ("sparcv9", Some("libstlport"), "solaris-cc64-stlport"),
            ("sparcv9", None, "solaris-cc64"),
        ]),
    ),
    entry(
        Os::SunOs,
        CompilerFamily::Gcc,
        Rule::ByArch(&[("sparc", "solaris-g++"), ("sparcv9", "solaris-g++-64")]),
    ),
    entry(Os::Neutrino, CompilerFamily::Qcc, Rule::ByArch(QNX_QCC)),
    Entry {
        os: Os::Emscripten,
        compiler: None,
        rule: Rule::ByArch(&[("wasm", "wasm-emscripten")]),
    },
];

fn lookup(table: ArchTable, key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

impl Rule {
    fn apply(&self, desc: &PlatformDescriptor) -> Option<&'static str> {
        match *self {
            Rule::Fixed(id) => Some(id),
            Rule::ByArch(table) => lookup(table, &desc.arch),
            Rule::ByArchAndLibcxx(table) => table
                .iter()
                .find(|(arch, libcxx, _)| {
                    *arch == desc.arch
                        && libcxx.map_or(true, |l| desc.libcxx.as_deref() == Some(l))
                })
                .map(|(_, _, id)| *id),
            Rule::ByVersionThenArch { versions, archs } => {
                let version = desc.compiler_version.as_deref()?;
                let code = lookup(versions, version)?;
                let table = archs.iter().find(|(c, _)| *c == code).map(|(_, t)| *t)?;
                lookup(table, &desc.arch)
            }
        }
    }
}

/// Resolve the platform identifier for a descriptor.
///
/// Returns `None` when the table has no entry; the caller decides whether
/// that is fatal.
pub fn resolve_platform(desc: &PlatformDescriptor) -> Option<PlatformIdentifier> {
    let id = TABLE
        .iter()
        .filter(|e| e.os == desc.os)
        .filter(|e| e.compiler.map_or(true, |c| c == desc.compiler))
        .find_map(|e| e.rule.apply(desc))
        .map(PlatformIdentifier::new);

    match &id {
        Some(id) => tracing::debug!("resolved platform `{}` for {}", id, desc),
        None => tracing::debug!("no platform identifier for {}", desc),
    }
    id
}
