pub mod resources;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

pub use resources::{FsResources, RESOURCES_DIR};

/// Read a markdown file and return its content
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(ConvertError::io(path))
}

/// Write `value` as pretty-printed JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ConvertError::io(parent))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(ConvertError::io(path))
}

/// Find the `*.md` files directly inside `input_dir`, sorted by path
pub fn scan_markdown_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    validate_input_dir(input_dir)?;

    let pattern = format!(
        "{}/*.md",
        glob::Pattern::escape(&input_dir.to_string_lossy())
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| ConvertError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn validate_input_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(ConvertError::InvalidInputDir(path.to_path_buf()));
    }
    Ok(())
}
