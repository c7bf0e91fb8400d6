//! CMake build-module snippets shipped with the package.
//!
//! Two kinds are generated: the Core extras file, which imports the Qt tool
//! executables and sets global Qt variables, and one private-module file
//! per module that exposes `Qt5::<Module>Private` alias targets.

use std::fmt::Write as _;

use semver::Version;

use crate::core::component::{Snippet, SnippetKind};

/// Path of the Core extras snippet, relative to the package root.
pub const CORE_EXTRAS_PATH: &str = "lib/cmake/Qt5Core/conan_qt_core_extras.cmake";

/// Tool executables imported by the Core extras file, by variable namespace.
const TOOL_EXECUTABLES: &[(&str, &[&str])] = &[
    ("Core", &["moc", "rcc", "qmake"]),
    ("DBus", &["qdbuscpp2xml", "qdbusxml2cpp"]),
    ("Widgets", &["uic"]),
    (
        "Tools",
        &["qhelpgenerator", "qcollectiongenerator", "qdoc", "qtattributionsscanner"],
    ),
    ("", &["lconvert", "lrelease", "lupdate"]),
];

const WINMAIN_LINKAGE: &str = r#"set(Qt5Core_QTMAIN_LIBRARIES Qt5::WinMain)
if (NOT Qt5_NO_LINK_QTMAIN)
    set(_isExe $<STREQUAL:$<TARGET_PROPERTY:TYPE>,EXECUTABLE>)
    set(_isWin32 $<BOOL:$<TARGET_PROPERTY:WIN32_EXECUTABLE>>)
    set(_isNotExcluded $<NOT:$<BOOL:$<TARGET_PROPERTY:Qt5_NO_LINK_QTMAIN>>>)
    set(_isPolicyNEW $<TARGET_POLICY:CMP0020>)
    set_property(TARGET Qt5::Core APPEND PROPERTY
        INTERFACE_LINK_LIBRARIES
            $<$<AND:${_isExe},${_isWin32},${_isNotExcluded},${_isPolicyNEW}>:Qt5::WinMain>
    )
    unset(_isExe)
    unset(_isWin32)
    unset(_isNotExcluded)
    unset(_isPolicyNEW)
endif()
"#;

const AUTOMOC_MACROS: &str = "set(CMAKE_AUTOMOC_MACRO_NAMES \"Q_OBJECT\" \"Q_GADGET\" \
\"Q_GADGET_EXPORT\" \"Q_NAMESPACE\" \"Q_NAMESPACE_EXPORT\")\n";

/// Path of a private-module snippet, relative to the package root.
pub fn private_module_path(module: &str) -> String {
    format!(
        "lib/cmake/Qt5{}/conan_qt_qt5_{}private.cmake",
        module,
        module.to_lowercase()
    )
}

/// Generate the Core extras snippet.
///
/// `exe_suffix` is appended to tool paths (`.exe` when the build machine
/// runs Windows); `winmain` adds the `Qt5::WinMain` linkage for Windows
/// hosts.
pub fn core_extras(version: &Version, exe_suffix: &str, winmain: bool) -> Snippet {
    let mut content = String::new();

    let _ = writeln!(content, "set(QT_CMAKE_EXPORT_NAMESPACE Qt5)");
    let _ = writeln!(content, "set(QT_VERSION_MAJOR {})", version.major);
    let _ = writeln!(content, "set(QT_VERSION_MINOR {})", version.minor);
    let _ = writeln!(content, "set(QT_VERSION_PATCH {})", version.patch);

    for (namespace, tools) in TOOL_EXECUTABLES {
        for tool in *tools {
            let _ = write!(
                content,
                "if(NOT TARGET ${{QT_CMAKE_EXPORT_NAMESPACE}}::{tool})\n\
                 \x20   add_executable(${{QT_CMAKE_EXPORT_NAMESPACE}}::{tool} IMPORTED)\n\
                 \x20   set_target_properties(${{QT_CMAKE_EXPORT_NAMESPACE}}::{tool} PROPERTIES \
                 IMPORTED_LOCATION ${{CMAKE_CURRENT_LIST_DIR}}/../../../bin/{tool}{ext})\n\
                 \x20   set(Qt5{namespace}_{upper}_EXECUTABLE ${{QT_CMAKE_EXPORT_NAMESPACE}}::{tool})\n\
                 endif()\n",
                tool = tool,
                ext = exe_suffix,
                namespace = namespace,
                upper = tool.to_uppercase(),
            );
        }
    }

    if winmain {
        content.push_str(WINMAIN_LINKAGE);
    }

    let _ = write!(
        content,
        "if(NOT DEFINED QT_DEFAULT_MAJOR_VERSION)\n\
         \x20   set(QT_DEFAULT_MAJOR_VERSION {})\n\
         endif()\n",
        version.major
    );
    content.push_str(AUTOMOC_MACROS);

    Snippet::generated(CORE_EXTRAS_PATH, SnippetKind::CoreExtras, content)
}

/// Generate the private-module snippet for `module`. `Core` is always
/// appended to the link dependencies.
pub fn private_module(module: &str, version: &Version, dependencies: &[&str]) -> Snippet {
    let mut deps: Vec<&str> = dependencies.to_vec();
    if !deps.contains(&"Core") {
        deps.push("Core");
    }
    let link = deps
        .iter()
        .map(|d| format!("Qt5::{}", d))
        .collect::<Vec<_>>()
        .join(";");

    let content = format!(
        "if(NOT TARGET Qt5::{m}Private)\n\
         \x20   add_library(Qt5::{m}Private INTERFACE IMPORTED)\n\
         \x20   set_target_properties(Qt5::{m}Private PROPERTIES\n\
         \x20       INTERFACE_INCLUDE_DIRECTORIES \"${{CMAKE_CURRENT_LIST_DIR}}/../../../include/Qt{m}/{v};\
         ${{CMAKE_CURRENT_LIST_DIR}}/../../../include/Qt{m}/{v}/Qt{m}\"\n\
         \x20       INTERFACE_LINK_LIBRARIES \"{link}\"\n\
         \x20   )\n\
         \n\
         \x20   add_library(Qt::{m}Private INTERFACE IMPORTED)\n\
         \x20   set_target_properties(Qt::{m}Private PROPERTIES\n\
         \x20       INTERFACE_LINK_LIBRARIES \"Qt5::{m}Private\"\n\
         \x20       _qt_is_versionless_target \"TRUE\"\n\
         \x20   )\n\
         endif()",
        m = module,
        v = version,
        link = link,
    );

    Snippet::generated(private_module_path(module), SnippetKind::PrivateModule, content)
}

/// Path of an installed `Qt5XMacros.cmake` file.
pub fn macros_path(cmake_dir: &str) -> String {
    format!("lib/cmake/{0}/{0}Macros.cmake", cmake_dir)
}

/// Extract the mkspecs directory (`mkspecs/linux-g++`) from the contents of
/// `Qt5CoreConfigExtrasMkspecDir.cmake`.
pub fn mkspecs_dir_from_config_extras(content: &str) -> Option<String> {
    let start = content.find("mkspecs/")?;
    let rest = &content[start..];
    let end = rest.find('"')?;
    let dir = rest[..end].trim_end_matches('/');
    if dir == "mkspecs" {
        None
    } else {
        Some(dir.to_string())
    }
}
