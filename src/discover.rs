// Finds image files for directory-scan mode, and the file-name splitting
// shared by everything that looks at extensions.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Extensions picked up by a directory scan. Matching is case-sensitive.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Split a file name into stem and extension.
///
/// The extension is whatever follows the last `.`, so `.jpg` is an empty
/// stem with extension `jpg`, unlike [`Path::extension`].
pub fn split_file_name(name: &OsStr) -> (OsString, Option<OsString>) {
    let path = Path::new(name);
    if let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) {
        return (stem.to_os_string(), Some(ext.to_os_string()));
    }

    // Only a leading dot is left to consider; put something in front of it.
    let mut prefixed = OsString::from("_");
    prefixed.push(name);
    match Path::new(&prefixed).extension() {
        Some(ext) => (OsString::new(), Some(ext.to_os_string())),
        None => (name.to_os_string(), None),
    }
}

/// Extension of the last path component, per [`split_file_name`].
pub fn extension_of(path: &Path) -> Option<OsString> {
    path.file_name().and_then(|name| split_file_name(name).1)
}

/// Returns true if the path ends in one of [`IMAGE_EXTENSIONS`].
pub fn has_image_extension(path: &Path) -> bool {
    extension_of(path)
        .as_deref()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}

/// List the regular image files directly inside `dir`.
///
/// Returned paths are entry names relative to `dir`, in the order the
/// directory listing yields them. Directories, symlinks and special files are
/// skipped.
///
/// # Errors
///
/// Fails if the directory or one of its entries cannot be read.
pub fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("can't read directory \"{}\"", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("can't read entry in \"{}\"", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("can't stat \"{}\"", entry.path().display()))?;

        let name = PathBuf::from(entry.file_name());
        if file_type.is_file() && has_image_extension(&name) {
            paths.push(name);
        } else {
            debug!("Skipping {}", entry.path().display());
        }
    }

    Ok(paths)
}
