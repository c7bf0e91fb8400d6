//! The package tree at the boundary: reading an install prefix and writing
//! generated snippets.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::graph::{CmakeModuleDir, InstallLayout};
use crate::builder::invocation::QT_CONF_PATH;
use crate::core::component::ComponentGraph;
use crate::util::fs;

const MKSPEC_CONFIG: &str = "lib/cmake/Qt5Core/Qt5CoreConfigExtrasMkspecDir.cmake";

/// Inspect an installed Qt package under `prefix`.
pub fn discover_layout(prefix: &Path) -> Result<InstallLayout> {
    let mut layout = InstallLayout::default();

    for dir in fs::subdirs_sorted(&prefix.join("lib").join("cmake"))? {
        let Some(name) = dir.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let has_macros = dir.join(format!("{}Macros.cmake", name)).is_file();
        layout.cmake_dirs.push(CmakeModuleDir { name, has_macros });
    }

    let mkspec = prefix.join(MKSPEC_CONFIG);
    if mkspec.is_file() {
        layout.mkspec_config = Some(fs::read_to_string(&mkspec)?);
    }

    // lib/objects-<config>/<Module>_<target>/<dir>/<file>
    for objects in fs::glob_dirs(prefix, "lib/objects-*")? {
        for module_dir in fs::subdirs_sorted(&objects)? {
            let dir_name = module_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let module = dir_name.split('_').next().unwrap_or_default().to_string();
            if module.is_empty() {
                continue;
            }
            let files: Vec<String> = fs::files_at_depth(&module_dir, 2)?
                .iter()
                .map(|f| fs::relative_slash(f, prefix))
                .collect();
            if !files.is_empty() {
                layout.object_files.push((module, files));
            }
        }
    }

    tracing::debug!(
        "found {} cmake module dir(s) under {}",
        layout.cmake_dirs.len(),
        prefix.display()
    );
    Ok(layout)
}

/// Write every generated snippet of `graph` and the package `qt.conf`
/// below `dir`.
pub fn emit_snippets(graph: &ComponentGraph, qt_conf: &str, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for snippet in graph.snippets() {
        let Some(content) = &snippet.content else {
            continue;
        };
        let path = dir.join(&snippet.id);
        fs::write_string(&path, content)?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }

    let path = dir.join(QT_CONF_PATH);
    fs::write_string(&path, qt_conf)?;
    written.push(path);

    Ok(written)
}
