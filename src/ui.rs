// UI layer: one console line per file. The line is opened with
// `Shrinking "<path>"... ` and closed with either the saving or the stage
// that failed. With progress enabled an indicatif spinner on stderr shows
// the current stage and the finished line is printed in one go.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Where a file currently is in the pipeline; shown on the spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BackingUp,
    Waiting,
    Uploading,
    Downloading,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::BackingUp => "backing up",
            Stage::Waiting => "waiting",
            Stage::Uploading => "uploading",
            Stage::Downloading => "downloading",
        }
    }
}

pub struct Reporter<W: Write> {
    out: W,
    spinner: Option<ProgressBar>,
    pending: String,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, show_progress: bool) -> Self {
        let spinner = show_progress.then(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {prefix}{msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });
        Reporter {
            out,
            spinner,
            pending: String::new(),
        }
    }

    /// Open the line for `path`.
    pub fn start(&mut self, path: &Path) -> io::Result<()> {
        self.pending = format!("Shrinking \"{}\"... ", path.display());
        match &self.spinner {
            Some(spinner) => {
                spinner.set_prefix(self.pending.clone());
                Ok(())
            }
            None => {
                write!(self.out, "{}", self.pending)?;
                self.out.flush()
            }
        }
    }

    pub fn stage(&self, stage: Stage) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(stage.label());
        }
    }

    pub fn saved(&mut self, percent: i64) -> io::Result<()> {
        self.finish(format_args!("OK, saved {percent}%!"))
    }

    pub fn backup_failed(&mut self, err: &anyhow::Error) -> io::Result<()> {
        self.finish(format_args!("Failed to back up: {err:#}. Skipping."))
    }

    pub fn shrink_failed(&mut self, err: &anyhow::Error) -> io::Result<()> {
        self.finish(format_args!("Failed to shrink: {err:#}"))
    }

    pub fn download_failed(&mut self, url: &str, err: &anyhow::Error) -> io::Result<()> {
        self.finish(format_args!("Failed to download {url}: {err:#}"))
    }

    /// Close the current line with `outcome`.
    fn finish(&mut self, outcome: impl Display) -> io::Result<()> {
        let pending = std::mem::take(&mut self.pending);
        match &self.spinner {
            Some(spinner) => {
                let out = &mut self.out;
                let result = spinner.suspend(|| {
                    writeln!(out, "{pending}{outcome}")?;
                    out.flush()
                });
                spinner.set_prefix("");
                spinner.set_message("");
                result
            }
            None => {
                writeln!(self.out, "{outcome}")?;
                self.out.flush()
            }
        }
    }

    /// Clear the spinner, if any, and hand back the writer.
    pub fn into_inner(self) -> W {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn success_line() {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter.start(Path::new("cat.jpg")).unwrap();
        reporter.saved(20).unwrap();
        assert_eq!(output(reporter), "Shrinking \"cat.jpg\"... OK, saved 20%!\n");
    }

    #[test]
    fn failure_lines_name_the_stage() {
        let mut reporter = Reporter::new(Vec::new(), false);
        let err = anyhow!("disk full").context("can't create backup \"a_original.jpg\"");

        reporter.start(Path::new("a.jpg")).unwrap();
        reporter.backup_failed(&err).unwrap();
        reporter.start(Path::new("b.png")).unwrap();
        reporter.shrink_failed(&anyhow!("Parsing shrink response json")).unwrap();
        reporter.start(Path::new("c.jpg")).unwrap();
        reporter
            .download_failed("https://x/y", &anyhow!("Download failed: 404 Not Found"))
            .unwrap();

        assert_eq!(
            output(reporter),
            "Shrinking \"a.jpg\"... Failed to back up: can't create backup \"a_original.jpg\": disk full. Skipping.\n\
             Shrinking \"b.png\"... Failed to shrink: Parsing shrink response json\n\
             Shrinking \"c.jpg\"... Failed to download https://x/y: Download failed: 404 Not Found\n"
        );
    }

    #[test]
    fn spinner_mode_prints_whole_line_at_the_end() {
        let mut reporter = Reporter::new(Vec::new(), true);
        reporter.start(Path::new("cat.jpg")).unwrap();
        reporter.stage(Stage::Uploading);
        reporter.saved(35).unwrap();
        assert_eq!(output(reporter), "Shrinking \"cat.jpg\"... OK, saved 35%!\n");
    }
}
