// Optional backup of an image before it is replaced.

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::discover::split_file_name;

/// Suffix inserted between a file's stem and its extension.
const BACKUP_SUFFIX: &str = "_original";

/// Sibling path for the backup: `dir/cat.jpg` -> `dir/cat_original.jpg`.
///
/// A path without an extension simply gets the suffix appended, and a name
/// like `.png` becomes `_original.png`.
pub fn backup_path(path: &Path) -> PathBuf {
    let Some(name) = path.file_name() else {
        let mut whole = path.as_os_str().to_os_string();
        whole.push(BACKUP_SUFFIX);
        return PathBuf::from(whole);
    };

    let (stem, ext) = split_file_name(name);
    let mut backup: OsString = stem;
    backup.push(BACKUP_SUFFIX);
    if let Some(ext) = ext {
        backup.push(".");
        backup.push(ext);
    }
    path.with_file_name(backup)
}

/// Copy `path` to [`backup_path`], overwriting an older backup.
///
/// Returns the path of the backup.
pub fn make_backup(path: &Path) -> Result<PathBuf> {
    let mut source =
        File::open(path).with_context(|| format!("can't open \"{}\"", path.display()))?;

    let target = backup_path(path);
    let mut backup = File::create(&target)
        .with_context(|| format!("can't create backup \"{}\"", target.display()))?;

    io::copy(&mut source, &mut backup).with_context(|| {
        format!(
            "can't back up \"{}\" to \"{}\"",
            path.display(),
            target.display()
        )
    })?;

    Ok(target)
}
