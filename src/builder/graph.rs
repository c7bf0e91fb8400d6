//! Component graph construction.
//!
//! Creates the consumer-facing components of a Qt 5 package: the always
//! present libraries, the support libraries and integration plugins of the
//! host's platform family, and the Qt tools libraries. Requirements are
//! declared by module name (`Gui`) and stored as component names (`qtGui`);
//! every component built through [`ComponentGraphBuilder`] except Core gets
//! a Core requirement.

use serde::Serialize;

use crate::builder::snippets;
use crate::core::component::{Component, ComponentGraph, ComponentKind, PluginKind, Snippet, SnippetKind};
use crate::core::errors::GraphError;
use crate::core::options::{BuildType, OpenGl, Options};
use crate::core::platform::{Os, Settings};

/// Windowing platform family of the host OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    Android,
    Macos,
    /// iOS and tvOS
    UiKit,
    WatchOs,
    Wasm,
    /// Linux and FreeBSD (xcb)
    Unix,
}

impl PlatformFamily {
    /// Family of `os`, or `None` for hosts without an integration plugin.
    pub fn for_os(os: Os) -> Option<Self> {
        match os {
            Os::Windows => Some(PlatformFamily::Windows),
            Os::Android => Some(PlatformFamily::Android),
            Os::Macos => Some(PlatformFamily::Macos),
            Os::Ios | Os::TvOs => Some(PlatformFamily::UiKit),
            Os::WatchOs => Some(PlatformFamily::WatchOs),
            Os::Emscripten => Some(PlatformFamily::Wasm),
            Os::Linux | Os::FreeBsd => Some(PlatformFamily::Unix),
            Os::WindowsStore | Os::SunOs | Os::Neutrino => None,
        }
    }

    fn spec(&self) -> &'static FamilySpec {
        match self {
            PlatformFamily::Windows => &WINDOWS,
            PlatformFamily::Android => &ANDROID,
            PlatformFamily::Macos => &MACOS,
            PlatformFamily::UiKit => &UIKIT,
            PlatformFamily::WatchOs => &WATCHOS,
            PlatformFamily::Wasm => &WASM,
            PlatformFamily::Unix => &UNIX,
        }
    }
}

struct SupportSpec {
    module: &'static str,
    requires: &'static [&'static str],
    frameworks: &'static [&'static str],
    has_include_dir: bool,
}

struct PluginSpec {
    name: &'static str,
    lib: &'static str,
    kind: PluginKind,
    requires: &'static [&'static str],
    system_libs: &'static [&'static str],
    frameworks: &'static [&'static str],
}

/// Support libraries and plugins of one platform family.
struct FamilySpec {
    supports: &'static [SupportSpec],
    plugins: &'static [PluginSpec],
}

const fn support(module: &'static str) -> SupportSpec {
    SupportSpec {
        module,
        requires: &["Core", "Gui"],
        frameworks: &[],
        has_include_dir: true,
    }
}

const WINDOWS_PLUGIN_REQS: &[&str] = &[
    "Core",
    "Gui",
    "EventDispatcherSupport",
    "FontDatabaseSupport",
    "ThemeSupport",
    "AccessibilitySupport",
    "WindowsUIAutomationSupport",
];

static WINDOWS: FamilySpec = FamilySpec {
    supports: &[support("WindowsUIAutomationSupport")],
    plugins: &[
        PluginSpec {
            name: "QWindowsIntegrationPlugin",
            lib: "qwindows",
            kind: PluginKind::Platforms,
            requires: WINDOWS_PLUGIN_REQS,
            system_libs: &[
                "advapi32", "dwmapi", "gdi32", "imm32", "ole32", "oleaut32", "shell32", "shlwapi",
                "user32", "winmm", "winspool", "wtsapi32",
            ],
            frameworks: &[],
        },
        PluginSpec {
            name: "QWindowsVistaStylePlugin",
            lib: "qwindowsvistastyle",
            kind: PluginKind::Styles,
            requires: WINDOWS_PLUGIN_REQS,
            system_libs: &[],
            frameworks: &[],
        },
    ],
};

static ANDROID: FamilySpec = FamilySpec {
    supports: &[support("EglSupport")],
    plugins: &[PluginSpec {
        name: "QAndroidIntegrationPlugin",
        lib: "qtforandroid",
        kind: PluginKind::Platforms,
        requires: &[
            "Core",
            "Gui",
            "EventDispatcherSupport",
            "AccessibilitySupport",
            "FontDatabaseSupport",
            "EglSupport",
        ],
        system_libs: &["android", "jnigraphics"],
        frameworks: &[],
    }],
};

const COCOA_REQS: &[&str] = &[
    "Core",
    "Gui",
    "ClipboardSupport",
    "ThemeSupport",
    "FontDatabaseSupport",
    "GraphicsSupport",
    "AccessibilitySupport",
    "PrintSupport",
];

static MACOS: FamilySpec = FamilySpec {
    supports: &[
        SupportSpec {
            module: "ClipboardSupport",
            requires: &["Core", "Gui"],
            frameworks: &["ImageIO", "AppKit"],
            has_include_dir: true,
        },
        support("GraphicsSupport"),
    ],
    plugins: &[
        PluginSpec {
            name: "QCocoaIntegrationPlugin",
            lib: "qcocoa",
            kind: PluginKind::Platforms,
            requires: COCOA_REQS,
            system_libs: &[],
            frameworks: &[
                "AppKit", "Carbon", "CoreServices", "CoreVideo", "IOKit", "IOSurface", "Metal",
                "QuartzCore",
            ],
        },
        PluginSpec {
            name: "QMacStylePlugin",
            lib: "qmacstyle",
            kind: PluginKind::Styles,
            requires: COCOA_REQS,
            system_libs: &[],
            frameworks: &[],
        },
    ],
};

const APPLE_MOBILE_SUPPORTS: &[SupportSpec] = &[
    SupportSpec {
        module: "ClipboardSupport",
        requires: &["Core", "Gui"],
        frameworks: &["ImageIO"],
        has_include_dir: true,
    },
    support("GraphicsSupport"),
];

static UIKIT: FamilySpec = FamilySpec {
    supports: APPLE_MOBILE_SUPPORTS,
    plugins: &[PluginSpec {
        name: "QIOSIntegrationPlugin",
        lib: "qios",
        kind: PluginKind::Platforms,
        requires: &["ClipboardSupport", "FontDatabaseSupport", "GraphicsSupport"],
        system_libs: &[],
        frameworks: &[
            "AudioToolbox",
            "Foundation",
            "Metal",
            "MobileCoreServices",
            "OpenGLES",
            "QuartzCore",
            "UIKit",
        ],
    }],
};

static WATCHOS: FamilySpec = FamilySpec {
    supports: APPLE_MOBILE_SUPPORTS,
    plugins: &[PluginSpec {
        name: "QMinimalIntegrationPlugin",
        lib: "qminimal",
        kind: PluginKind::Platforms,
        requires: &["EventDispatcherSupport", "FontDatabaseSupport"],
        system_libs: &[],
        frameworks: &[],
    }],
};

static WASM: FamilySpec = FamilySpec {
    supports: &[support("EglSupport")],
    plugins: &[PluginSpec {
        name: "QWasmIntegrationPlugin",
        lib: "qwasm",
        kind: PluginKind::Platforms,
        requires: &[
            "Core",
            "Gui",
            "EventDispatcherSupport",
            "FontDatabaseSupport",
            "EglSupport",
        ],
        system_libs: &[],
        frameworks: &[],
    }],
};

static UNIX: FamilySpec = FamilySpec {
    supports: &[
        support("ServiceSupport"),
        SupportSpec {
            module: "EdidSupport",
            requires: &[],
            frameworks: &[],
            has_include_dir: true,
        },
        support("XkbCommonSupport"),
        SupportSpec {
            module: "XcbQpa",
            requires: &[
                "Core",
                "Gui",
                "ServiceSupport",
                "ThemeSupport",
                "FontDatabaseSupport",
                "EdidSupport",
                "XkbCommonSupport",
            ],
            frameworks: &[],
            has_include_dir: false,
        },
    ],
    plugins: &[PluginSpec {
        name: "QXcbIntegrationPlugin",
        lib: "qxcb",
        kind: PluginKind::Platforms,
        requires: &["Core", "Gui", "XcbQpa"],
        system_libs: &[],
        frameworks: &[],
    }],
};

/// An installed `lib/cmake/<dir>` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmakeModuleDir {
    /// Directory name, e.g. `Qt5Core`
    pub name: String,
    /// Whether `<dir>Macros.cmake` exists
    pub has_macros: bool,
}

/// What a finished install put under the package prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallLayout {
    pub cmake_dirs: Vec<CmakeModuleDir>,
    /// Contents of `lib/cmake/Qt5Core/Qt5CoreConfigExtrasMkspecDir.cmake`
    pub mkspec_config: Option<String>,
    /// Object files per module, from `lib/objects-*/<Module>_*/`
    pub object_files: Vec<(String, Vec<String>)>,
}

/// Library file-name suffix for the build type and toolchain.
pub fn library_suffix(settings: &Settings, options: &Options) -> &'static str {
    if options.multiconfiguration || settings.build_type != Some(BuildType::Debug) {
        return "";
    }
    if settings.os == Os::Windows && settings.is_msvc() {
        "d"
    } else if settings.is_apple() {
        "_debug"
    } else {
        ""
    }
}

/// Turn module names into component names; `pkg::target` stays as is.
fn corrected_requires(requires: &[&str]) -> Vec<String> {
    requires
        .iter()
        .map(|r| {
            if r.contains("::") {
                r.to_string()
            } else {
                format!("qt{}", r)
            }
        })
        .collect()
}

/// Builds the [`ComponentGraph`] for a configuration.
pub struct ComponentGraphBuilder<'a> {
    settings: &'a Settings,
    options: &'a Options,
    layout: Option<&'a InstallLayout>,
    suffix: &'static str,
}

impl<'a> ComponentGraphBuilder<'a> {
    pub fn new(settings: &'a Settings, options: &'a Options) -> Self {
        ComponentGraphBuilder {
            settings,
            options,
            layout: None,
            suffix: library_suffix(settings, options),
        }
    }

    /// Enrich the graph from an install prefix.
    pub fn install_layout(mut self, layout: &'a InstallLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    fn module(&self, module: &str, requires: &[&str]) -> Component {
        self.module_with(module, requires, true)
    }

    fn module_with(&self, module: &str, requires: &[&str], has_include_dir: bool) -> Component {
        let mut component = Component::new(module, ComponentKind::Library);

        let libname = module.strip_suffix("Private").unwrap_or(module);
        component.libs = vec![format!("Qt5{}{}", libname, self.suffix)];
        if has_include_dir {
            component.include_dirs = vec!["include".to_string(), format!("include/Qt{}", module)];
        }
        component.defines = vec![format!("QT_{}_LIB", module.to_uppercase())];

        let mut requires = requires.to_vec();
        if module != "Core" && !requires.contains(&"Core") {
            requires.push("Core");
        }
        component.requires = corrected_requires(&requires);
        component
    }

    fn plugin(&self, spec: &PluginSpec) -> Component {
        let mut component = Component::new(spec.name, ComponentKind::Plugin(spec.kind));

        if !self.options.shared {
            component.libs = vec![format!("{}{}", spec.lib, self.suffix)];
        }
        component.lib_dirs = vec![format!("plugins/{}", spec.kind.dir_name())];
        component.system_libs = spec.system_libs.iter().map(|s| s.to_string()).collect();
        component.frameworks = spec.frameworks.iter().map(|s| s.to_string()).collect();

        let mut requires = spec.requires.to_vec();
        if !requires.contains(&"Core") {
            requires.push("Core");
        }
        component.requires = corrected_requires(&requires);
        component
    }

    /// Create every component and attach its snippets.
    pub fn build(&self) -> Result<ComponentGraph, GraphError> {
        let settings = self.settings;
        let os = settings.os;
        let version = &self.options.version;
        let mut graph = ComponentGraph::new();

        graph.insert(self.module("Core", &[]))?;

        if os == Os::Windows {
            let mut winmain = Component::new("WinMain", ComponentKind::Library);
            winmain.libs = vec![format!("qtmain{}", self.suffix)];
            graph.insert(winmain)?;
        }

        graph.insert(self.module("Gui", &[]))?;
        graph.attach_snippet(
            "qtGui",
            snippets::private_module("Gui", version, &["CorePrivate", "Gui"]),
        );

        graph.insert(self.module("EventDispatcherSupport", &["Core", "Gui"]))?;

        let mut font_db = self.module("FontDatabaseSupport", &["Core", "Gui"]);
        if os == Os::Windows {
            font_db.system_libs = strings(&["advapi32", "ole32", "user32", "gdi32"]);
        } else if os.is_apple() {
            font_db.frameworks = strings(&["CoreFoundation", "CoreGraphics", "CoreText", "Foundation"]);
            font_db
                .frameworks
                .push(if os == Os::Macos { "AppKit" } else { "UIKit" }.to_string());
        }
        graph.insert(font_db)?;

        graph.insert(self.module("ThemeSupport", &["Core", "Gui"]))?;
        graph.insert(self.module("AccessibilitySupport", &["Core", "Gui"]))?;

        match PlatformFamily::for_os(os) {
            Some(family) => {
                let spec = family.spec();
                for s in spec.supports {
                    let mut c = self.module_with(s.module, s.requires, s.has_include_dir);
                    c.frameworks = strings(s.frameworks);
                    graph.insert(c)?;
                }
                for p in spec.plugins {
                    graph.insert(self.plugin(p))?;
                }
            }
            None => tracing::debug!("no integration plugin for {}", os),
        }

        graph.insert(self.module("Network", &[]))?;
        graph.insert(self.module("Sql", &[]))?;
        graph.insert(self.module("Test", &[]))?;

        graph.insert(self.module("Widgets", &["Gui"]))?;
        graph.attach_snippet(
            "qtWidgets",
            snippets::private_module("Widgets", version, &["CorePrivate", "Gui", "GuiPrivate"]),
        );

        if !matches!(os, Os::Ios | Os::WatchOs | Os::TvOs) {
            let mut print = self.module("PrintSupport", &["Gui", "Widgets"]);
            if os == Os::Macos && !self.options.shared {
                print.system_libs.push("cups".to_string());
            }
            graph.insert(print)?;
        }

        if self.options.opengl != OpenGl::No {
            graph.insert(self.module("OpenGL", &["Gui"]))?;
            graph.insert(self.module("OpenGLExtensions", &["Gui"]))?;
        }
        graph.insert(self.module("Concurrent", &[]))?;
        graph.insert(self.module("Xml", &[]))?;

        graph.insert(Component::new("LinguistTools", ComponentKind::Library))?;

        // Abstract interfaces only.
        let mut ui_plugin = self.module("UiPlugin", &["Gui", "Widgets"]);
        ui_plugin.libs.clear();
        ui_plugin.lib_dirs.clear();
        graph.insert(ui_plugin)?;

        graph.insert(self.module("UiTools", &["UiPlugin", "Gui", "Widgets"]))?;
        if !settings.is_cross_building() {
            graph.insert(self.module("Designer", &["Gui", "UiPlugin", "Widgets", "Xml"]))?;
        }
        graph.insert(self.module("Help", &["Gui", "Sql", "Widgets"]))?;

        self.add_platform_libraries(&mut graph);

        let build_os = settings.build_machine().os;
        let exe_suffix = if build_os == Os::Windows { ".exe" } else { "" };
        graph.attach_snippet(
            "qtCore",
            snippets::core_extras(version, exe_suffix, os == Os::Windows),
        );
        graph.attach_snippet("qtCore", snippets::private_module("Core", version, &[]));

        if let Some(layout) = self.layout {
            apply_install_layout(&mut graph, layout);
        }

        tracing::debug!("built component graph with {} components", graph.len());
        Ok(graph)
    }

    fn add_platform_libraries(&self, graph: &mut ComponentGraph) {
        let os = self.settings.os;

        if os != Os::Windows {
            extend(graph, "qtCore", |c| c.cxxflags.push("-fPIC".to_string()));
        }

        if self.options.shared {
            return;
        }

        if os == Os::Windows {
            extend(graph, "qtCore", |c| {
                c.system_libs
                    .extend(strings(&["version", "winmm", "netapi32", "userenv", "ws2_32"]))
            });
            extend(graph, "qtNetwork", |c| {
                c.system_libs.extend(strings(&["dnsapi", "iphlpapi"]))
            });
            extend(graph, "qtWidgets", |c| {
                c.system_libs.extend(strings(&["UxTheme", "dwmapi"]))
            });
        }

        if os.is_apple() {
            let services = if os == Os::Macos {
                "CoreServices"
            } else {
                "MobileCoreServices"
            };
            extend(graph, "qtCore", |c| c.frameworks.push(services.to_string()));
            extend(graph, "qtNetwork", |c| {
                c.frameworks.extend(strings(&["SystemConfiguration", "Security"]))
            });
        }

        if os == Os::Macos {
            extend(graph, "qtCore", |c| {
                c.frameworks.extend(strings(&["IOKit", "Cocoa", "Security"]))
            });
        }
    }
}

fn apply_install_layout(graph: &mut ComponentGraph, layout: &InstallLayout) {
    for dir in &layout.cmake_dirs {
        let component = dir.name.replacen("Qt5", "qt", 1);
        if !graph.contains(&component) {
            tracing::debug!("no component for installed {}", dir.name);
            continue;
        }
        if dir.has_macros {
            graph.attach_snippet(
                &component,
                Snippet::installed(snippets::macros_path(&dir.name), SnippetKind::Macros),
            );
        }
        let build_dir = format!("lib/cmake/{}", dir.name);
        extend(graph, &component, |c| c.build_dirs.push(build_dir));
    }

    match layout
        .mkspec_config
        .as_deref()
        .and_then(snippets::mkspecs_dir_from_config_extras)
    {
        Some(mkspecs) => extend(graph, "qtCore", |c| c.include_dirs.push(mkspecs)),
        None => tracing::warn!("mkspecs directory not found in install layout"),
    }

    for (module, files) in &layout.object_files {
        let component = format!("qt{}", module);
        extend(graph, &component, |c| c.object_files.extend(files.iter().cloned()));
    }
}

fn extend(graph: &mut ComponentGraph, name: &str, f: impl FnOnce(&mut Component)) {
    if let Some(component) = graph.get_mut(name) {
        f(component);
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::CompilerFamily;

    fn build(settings: &Settings, options: &Options) -> ComponentGraph {
        ComponentGraphBuilder::new(settings, options).build().unwrap()
    }

    fn names(graph: &ComponentGraph) -> Vec<&str> {
        graph.components().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_linux_graph() {
        let settings = Settings::new(Os::Linux, "x86_64", CompilerFamily::Gcc)
            .with_build_type(BuildType::Release);
        let options = Options::for_os(Os::Linux);
        let graph = build(&settings, &options);

        assert_eq!(
            names(&graph),
            [
                "qtCore",
                "qtGui",
                "qtEventDispatcherSupport",
                "qtFontDatabaseSupport",
                "qtThemeSupport",
                "qtAccessibilitySupport",
                "qtServiceSupport",
                "qtEdidSupport",
                "qtXkbCommonSupport",
                "qtXcbQpa",
                "qtQXcbIntegrationPlugin",
                "qtNetwork",
                "qtSql",
                "qtTest",
                "qtWidgets",
                "qtPrintSupport",
                "qtConcurrent",
                "qtXml",
                "qtLinguistTools",
                "qtUiPlugin",
                "qtUiTools",
                "qtDesigner",
                "qtHelp",
            ]
        );
        graph.check_requirements().unwrap();

        let core = graph.get("qtCore").unwrap();
        assert_eq!(core.libs, ["Qt5Core"]);
        assert_eq!(core.include_dirs, ["include", "include/QtCore"]);
        assert_eq!(core.defines, ["QT_CORE_LIB"]);
        assert!(core.requires.is_empty());
        assert_eq!(core.cxxflags, ["-fPIC"]);
        assert_eq!(
            core.build_modules,
            [
                "lib/cmake/Qt5Core/conan_qt_core_extras.cmake",
                "lib/cmake/Qt5Core/conan_qt_qt5_coreprivate.cmake"
            ]
        );

        let xcb = graph.get("qtXcbQpa").unwrap();
        assert!(xcb.include_dirs.is_empty());
        assert_eq!(xcb.libs, ["Qt5XcbQpa"]);
    }

    #[test]
    fn test_core_is_injected() {
        let settings = Settings::new(Os::Linux, "x86_64", CompilerFamily::Gcc);
        let options = Options::for_os(Os::Linux);
        let graph = build(&settings, &options);

        for c in graph.components() {
            if c.name == "qtCore" || c.name == "qtLinguistTools" {
                continue;
            }
            assert_eq!(
                c.requires.iter().filter(|r| *r == "qtCore").count(),
                1,
                "{} should require qtCore once",
                c.name
            );
        }
        assert_eq!(
            graph.get("qtWidgets").unwrap().requires,
            ["qtGui", "qtCore"]
        );
    }

    #[test]
    fn test_static_plugin_libs() {
        let settings = Settings::new(Os::Linux, "x86_64", CompilerFamily::Gcc);
        let mut options = Options::for_os(Os::Linux);

        let plugin = build(&settings, &options)
            .get("qtQXcbIntegrationPlugin")
            .cloned()
            .unwrap();
        assert_eq!(plugin.kind, ComponentKind::Plugin(PluginKind::Platforms));
        assert_eq!(plugin.libs, ["qxcb"]);
        assert_eq!(plugin.lib_dirs, ["plugins/platforms"]);
        assert!(plugin.include_dirs.is_empty());
        assert_eq!(plugin.requires, ["qtCore", "qtGui", "qtXcbQpa"]);

        options.shared = true;
        let plugin = build(&settings, &options)
            .get("qtQXcbIntegrationPlugin")
            .cloned()
            .unwrap();
        assert!(plugin.libs.is_empty());
    }

    #[test]
    fn test_windows_debug_graph() {
        let settings = Settings::new(Os::Windows, "x86_64", CompilerFamily::Msvc)
            .with_build_type(BuildType::Debug);
        let options = Options::for_os(Os::Windows);
        let graph = build(&settings, &options);

        assert_eq!(graph.get("qtCore").unwrap().libs, ["Qt5Cored"]);
        assert_eq!(graph.get("qtWinMain").unwrap().libs, ["qtmaind"]);
        assert!(graph.get("qtWinMain").unwrap().requires.is_empty());
        assert!(graph.get("qtCore").unwrap().cxxflags.is_empty());
        assert!(graph.contains("qtOpenGL"));
        assert!(graph.contains("qtOpenGLExtensions"));

        let style = graph.get("qtQWindowsVistaStylePlugin").unwrap();
        assert_eq!(style.kind, ComponentKind::Plugin(PluginKind::Styles));
        assert_eq!(style.lib_dirs, ["plugins/styles"]);
        assert_eq!(style.libs, ["qwindowsvistastyled"]);

        let core = graph.get("qtCore").unwrap();
        assert!(core.system_libs.contains(&"ws2_32".to_string()));
        assert_eq!(
            graph.get("qtWidgets").unwrap().system_libs,
            ["UxTheme", "dwmapi"]
        );
        let extras = graph.snippet(snippets::CORE_EXTRAS_PATH).unwrap();
        assert!(extras.content.as_deref().unwrap().contains("Qt5::WinMain"));
        graph.check_requirements().unwrap();
    }

    #[test]
    fn test_multiconfiguration_has_no_suffix() {
        let settings = Settings::new(Os::Windows, "x86_64", CompilerFamily::Msvc)
            .with_build_type(BuildType::Debug);
        let mut options = Options::for_os(Os::Windows);
        options.multiconfiguration = true;
        assert_eq!(library_suffix(&settings, &options), "");

        let mac = Settings::new(Os::Macos, "armv8", CompilerFamily::AppleClang)
            .with_build_type(BuildType::Debug);
        assert_eq!(library_suffix(&mac, &Options::for_os(Os::Macos)), "_debug");
    }

    #[test]
    fn test_macos_graph() {
        let settings = Settings::new(Os::Macos, "armv8", CompilerFamily::AppleClang);
        let options = Options::for_os(Os::Macos);
        let graph = build(&settings, &options);
        graph.check_requirements().unwrap();

        let cocoa = graph.get("qtQCocoaIntegrationPlugin").unwrap();
        assert!(cocoa.requires.contains(&"qtPrintSupport".to_string()));
        assert!(cocoa.frameworks.contains(&"IOSurface".to_string()));

        assert_eq!(
            graph.get("qtClipboardSupport").unwrap().frameworks,
            ["ImageIO", "AppKit"]
        );
        assert!(graph
            .get("qtFontDatabaseSupport")
            .unwrap()
            .frameworks
            .contains(&"AppKit".to_string()));
        assert_eq!(graph.get("qtPrintSupport").unwrap().system_libs, ["cups"]);
        assert_eq!(
            graph.get("qtCore").unwrap().frameworks,
            ["CoreServices", "IOKit", "Cocoa", "Security"]
        );
    }

    #[test]
    fn test_ios_has_no_print_support() {
        let settings = Settings::new(Os::Ios, "armv8", CompilerFamily::AppleClang)
            .with_build_machine(Os::Macos, "x86_64");
        let options = Options::for_os(Os::Ios);
        let graph = build(&settings, &options);

        assert!(!graph.contains("qtPrintSupport"));
        assert!(!graph.contains("qtDesigner"));
        assert_eq!(
            graph.get("qtQIOSIntegrationPlugin").unwrap().requires,
            [
                "qtClipboardSupport",
                "qtFontDatabaseSupport",
                "qtGraphicsSupport",
                "qtCore"
            ]
        );
        assert_eq!(
            graph.get("qtCore").unwrap().frameworks,
            ["MobileCoreServices"]
        );
    }

    #[test]
    fn test_families_without_plugins() {
        let settings = Settings::new(Os::Neutrino, "armv8", CompilerFamily::Qcc);
        let options = Options::for_os(Os::Neutrino);
        let graph = build(&settings, &options);
        assert!(!graph.components().any(|c| c.kind.is_plugin()));
        graph.check_requirements().unwrap();
    }

    #[test]
    fn test_android_and_wasm() {
        let android = Settings::new(Os::Android, "armv8", CompilerFamily::Clang);
        let graph = build(&android, &Options::for_os(Os::Android));
        assert!(graph.contains("qtEglSupport"));
        assert_eq!(
            graph.get("qtQAndroidIntegrationPlugin").unwrap().system_libs,
            ["android", "jnigraphics"]
        );

        let wasm = Settings::new(Os::Emscripten, "wasm", CompilerFamily::Clang);
        let graph = build(&wasm, &Options::for_os(Os::Emscripten));
        assert!(graph.contains("qtQWasmIntegrationPlugin"));
        graph.check_requirements().unwrap();
    }

    #[test]
    fn test_install_layout() {
        let settings = Settings::new(Os::Linux, "x86_64", CompilerFamily::Gcc);
        let options = Options::for_os(Os::Linux);
        let layout = InstallLayout {
            cmake_dirs: vec![
                CmakeModuleDir {
                    name: "Qt5Core".to_string(),
                    has_macros: true,
                },
                CmakeModuleDir {
                    name: "Qt5Gui".to_string(),
                    has_macros: false,
                },
                CmakeModuleDir {
                    name: "Qt5Bluetooth".to_string(),
                    has_macros: true,
                },
            ],
            mkspec_config: Some(
                "set(_qt5_corelib_extra_includes \"${_qt5Core_install_prefix}/mkspecs/linux-g++\")"
                    .to_string(),
            ),
            object_files: vec![(
                "Gui".to_string(),
                vec!["lib/objects-Release/Gui_resources_1/.rcc/qrc_qpdf.cpp.o".to_string()],
            )],
        };

        let graph = ComponentGraphBuilder::new(&settings, &options)
            .install_layout(&layout)
            .build()
            .unwrap();

        let core = graph.get("qtCore").unwrap();
        assert_eq!(
            core.build_modules.last().unwrap(),
            "lib/cmake/Qt5Core/Qt5CoreMacros.cmake"
        );
        assert_eq!(core.build_dirs, ["lib/cmake/Qt5Core"]);
        assert_eq!(core.include_dirs.last().unwrap(), "mkspecs/linux-g++");

        let gui = graph.get("qtGui").unwrap();
        assert_eq!(gui.build_modules.len(), 1);
        assert_eq!(gui.build_dirs, ["lib/cmake/Qt5Gui"]);
        assert_eq!(gui.object_files.len(), 1);

        assert!(!graph.contains("qtBluetooth"));
    }
}
