//! Input tree traversal and output tree mirroring shared by every tool.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::error::{ToolError, ToolResult};

/// A regular file found under an input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Directory of the file relative to the input root (empty for the root).
    pub relative_dir: PathBuf,
    pub file_name: String,
}

impl SourceFile {
    /// `/`-separated path relative to the input root, for display.
    pub fn display_relative(&self) -> String {
        self.relative_dir
            .join(&self.file_name)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

pub fn ensure_input_dir(path: &Path) -> ToolResult<()> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ToolError::InvalidInput(format!(
            "input path is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Collect regular files under `root` accepted by `filter`, in a stable
/// depth-first order sorted by file name. Symlinks to files are included;
/// symlinked directories are not descended into.
pub fn collect_files<F>(root: &Path, mut filter: F) -> ToolResult<Vec<SourceFile>>
where
    F: FnMut(&str) -> bool,
{
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() && !entry.path().is_file() {
            tracing::warn!(
                "Skipping symlink that does not point to a file: {}",
                entry.path().display()
            );
            continue;
        }
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if !filter(&file_name) {
            continue;
        }

        let relative_dir = entry
            .path()
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            relative_dir,
            file_name,
        });
    }
    Ok(files)
}

pub fn mirror_path(output_root: &Path, relative_dir: &Path, file_name: &str) -> PathBuf {
    output_root.join(relative_dir).join(file_name)
}

pub fn ensure_dir(path: &Path) -> ToolResult<()> {
    fs::create_dir_all(path).map_err(|error| ToolError::io(path, error))
}

pub fn ensure_parent(path: &Path) -> ToolResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Copy `src` to `dst`, creating parent directories and carrying over the
/// source modification time.
pub fn copy_preserving(src: &Path, dst: &Path) -> ToolResult<()> {
    ensure_parent(dst)?;
    fs::copy(src, dst).map_err(|error| ToolError::io(src, error))?;

    let metadata = fs::metadata(src).map_err(|error| ToolError::io(src, error))?;
    let modified = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dst, modified).map_err(|error| ToolError::io(dst, error))?;
    Ok(())
}
