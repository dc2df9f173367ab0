// Per-file orchestration: backup, pace, shrink, download, report.
//
// Files are handled strictly one after another. A failure at any stage is
// reported on the file's line and the loop moves on to the next file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::backup::make_backup;
use crate::download::{download_to, Downloader};
use crate::pace::Pacer;
use crate::provider::{content_type_for, CompressionProvider, ShrinkResult};
use crate::ui::{Reporter, Stage};

/// Tally of one run. Only logged, never printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub struct Pipeline<'a> {
    provider: &'a dyn CompressionProvider,
    downloader: &'a dyn Downloader,
    pacer: Box<dyn Pacer>,
    backup: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        provider: &'a dyn CompressionProvider,
        downloader: &'a dyn Downloader,
        pacer: Box<dyn Pacer>,
        backup: bool,
    ) -> Self {
        Self {
            provider,
            downloader,
            pacer,
            backup,
        }
    }

    /// Process every path in order.
    ///
    /// # Errors
    ///
    /// Only a failure to write to the console stops the run; per-file
    /// failures are counted in the summary instead.
    pub fn run<W: Write>(
        &mut self,
        paths: &[PathBuf],
        reporter: &mut Reporter<W>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for path in paths {
            if self.process(path, reporter).context("writing to console")? {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }

        info!("Done: {} shrunk, {} failed", summary.succeeded, summary.failed);
        Ok(summary)
    }

    /// Returns whether the file was replaced with its shrunk version.
    fn process<W: Write>(
        &mut self,
        path: &Path,
        reporter: &mut Reporter<W>,
    ) -> std::io::Result<bool> {
        reporter.start(path)?;

        if self.backup {
            reporter.stage(Stage::BackingUp);
            match make_backup(path) {
                Ok(target) => info!("Backed up {} to {}", path.display(), target.display()),
                Err(e) => {
                    debug!("Backup of {} failed: {e:#}", path.display());
                    reporter.backup_failed(&e)?;
                    return Ok(false);
                }
            }
        }

        reporter.stage(Stage::Waiting);
        self.pacer.pause();

        reporter.stage(Stage::Uploading);
        let shrunk = match self.shrink_file(path) {
            Ok(result) => result,
            Err(e) => {
                debug!("Shrinking {} failed: {e:#}", path.display());
                reporter.shrink_failed(&e)?;
                return Ok(false);
            }
        };

        reporter.stage(Stage::Downloading);
        if let Err(e) = download_to(self.downloader, &shrunk.output_url, path) {
            debug!("Download of {} failed: {e:#}", shrunk.output_url);
            reporter.download_failed(&shrunk.output_url, &e)?;
            return Ok(false);
        }

        reporter.saved(shrunk.percent_saved())?;
        Ok(true)
    }

    fn shrink_file(&self, path: &Path) -> Result<ShrinkResult> {
        let body = fs::read(path).with_context(|| format!("can't open \"{}\"", path.display()))?;
        self.provider.shrink(body, content_type_for(path))
    }
}
