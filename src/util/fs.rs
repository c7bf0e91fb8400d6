//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Subdirectories of `dir`, sorted by name. A missing `dir` has none.
pub fn subdirs_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Directories matching a glob pattern relative to `base`, sorted.
pub fn glob_dirs(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let mut results = Vec::new();
    for entry in glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) if path.is_dir() => results.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("glob error: {}", e),
        }
    }
    results.sort();
    Ok(results)
}

/// Files exactly `depth` levels below `dir`, sorted by path.
pub fn files_at_depth(dir: &Path, depth: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(depth)
        .max_depth(depth)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `path` relative to `base`, with forward slashes.
pub fn relative_slash(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lib/cmake/Qt5Core/extras.cmake");
        write_string(&path, "set(X 1)\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "set(X 1)\n");
    }

    #[test]
    fn test_subdirs_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("Qt5Widgets")).unwrap();
        fs::create_dir_all(tmp.path().join("Qt5Core")).unwrap();
        fs::write(tmp.path().join("file.txt"), "").unwrap();

        let dirs = subdirs_sorted(tmp.path()).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["Qt5Core", "Qt5Widgets"]);
        assert!(subdirs_sorted(&tmp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_glob_dirs_and_depth() {
        let tmp = TempDir::new().unwrap();
        let objects = tmp.path().join("lib/objects-Release/Gui_resources_1/.rcc");
        fs::create_dir_all(&objects).unwrap();
        fs::write(objects.join("qrc_qpdf.cpp.o"), "").unwrap();
        fs::write(tmp.path().join("lib/objects-Release/stray.o"), "").unwrap();

        let dirs = glob_dirs(tmp.path(), "lib/objects-*").unwrap();
        assert_eq!(dirs.len(), 1);

        let files = files_at_depth(&dirs[0], 3).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(
            relative_slash(&files[0], tmp.path()),
            "lib/objects-Release/Gui_resources_1/.rcc/qrc_qpdf.cpp.o"
        );
    }
}
