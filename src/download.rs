// Fetching a compressed result and swapping it in for the original file.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;

/// Opens a remote resource for reading.
pub trait Downloader {
    fn fetch(&self, url: &str) -> Result<Box<dyn Read + '_>>;
}

/// Download `url` and atomically replace `dest` with it.
///
/// Returns the number of bytes written.
pub fn download_to(downloader: &dyn Downloader, url: &str, dest: &Path) -> Result<u64> {
    let mut body = downloader.fetch(url)?;
    replace_file(dest, &mut body)
}

/// Stream `reader` into a temporary sibling of `dest`, then rename it over
/// `dest`. On any error `dest` keeps its previous contents.
pub fn replace_file(dest: &Path, reader: &mut dyn Read) -> Result<u64> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("can't create temporary file in \"{}\"", dir.display()))?;

    let written = io::copy(reader, &mut tmp).context("can't write downloaded data")?;
    tmp.as_file()
        .sync_all()
        .context("can't flush downloaded data")?;

    // Temp files are created 0600; keep whatever mode the original had.
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("can't copy permissions of \"{}\"", dest.display()))?;
    }

    tmp.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("can't replace \"{}\"", dest.display()))?;

    debug!("Wrote {written} bytes to {}", dest.display());
    Ok(written)
}
