// One invocation of the CLI, from parsed arguments to the last report line.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::TinyClient;
use crate::cli::{resolve, Cli, Mode, USAGE};
use crate::config::Settings;
use crate::discover::find_image_files;
use crate::pace::pacer_for;
use crate::pipeline::Pipeline;
use crate::ui::Reporter;

/// Run the CLI.
///
/// # Errors
///
/// Returns an error for fatal problems only: bad settings, an HTTP client
/// that can't be built, or a current directory that can't be listed.
/// Per-file failures are printed and do not surface here.
pub fn run(cli: &Cli) -> Result<()> {
    let paths = match resolve(&cli.paths) {
        Mode::Usage => {
            println!("{USAGE}");
            return Ok(());
        }
        Mode::ScanCurrentDir => scan_current_dir()?,
        Mode::Explicit(paths) => paths,
    };

    let settings = Settings::from_cli(cli)?;
    debug!("Settings: {settings:?}");

    let client = TinyClient::new(settings.endpoint.clone(), settings.timeout)?;
    let mut pipeline = Pipeline::new(
        &client,
        &client,
        pacer_for(settings.min_delay, settings.max_delay),
        settings.backup,
    );

    let mut reporter = Reporter::new(io::stdout().lock(), settings.progress);
    pipeline.run(&paths, &mut reporter)?;
    reporter.into_inner();
    Ok(())
}

fn scan_current_dir() -> Result<Vec<PathBuf>> {
    let paths = find_image_files(Path::new(".")).context("Couldn't find image files")?;
    info!("Found {} image files", paths.len());
    Ok(paths)
}
