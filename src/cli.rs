// Command-line arguments and the decision between usage, directory scan and
// explicit paths.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Printed when the arguments do not describe any work.
pub const USAGE: &str = "\
USAGE
\ttiny cat.jpg dog.png
\ttiny .
\ttiny -- -cat.jpg";

/// Shrink images with a remote compression service, replacing them in place.
#[derive(Parser, Debug, Default)]
#[command(name = "tiny")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image files to shrink, or `.` to shrink every image in the current directory
    pub paths: Vec<PathBuf>,

    /// Keep a `<name>_original<ext>` copy of each file before shrinking it
    #[arg(long, conflicts_with = "no_backup")]
    pub backup: bool,

    /// Do not keep backups (the default)
    #[arg(long)]
    pub no_backup: bool,

    /// Shrink endpoint to POST images to
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Lower bound of the pause before each upload, in milliseconds
    #[arg(long, value_name = "MS")]
    pub min_delay_ms: Option<u64>,

    /// Upper bound of the pause before each upload, in milliseconds
    #[arg(long, value_name = "MS")]
    pub max_delay_ms: Option<u64>,

    /// Give up on a single HTTP request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show a spinner on stderr while a file is being processed
    #[arg(long)]
    pub progress: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The backup choice made on the command line, if any.
    pub fn backup_override(&self) -> Option<bool> {
        match (self.backup, self.no_backup) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// What an invocation has been asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print [`USAGE`] and exit successfully.
    Usage,
    /// Shrink every image in the current directory.
    ScanCurrentDir,
    /// Shrink exactly these paths, in this order.
    Explicit(Vec<PathBuf>),
}

fn is_scan_token(path: &Path) -> bool {
    path.as_os_str() == "."
}

/// Decide the mode from the positional arguments.
///
/// `.` only means "scan" when it is the sole argument; combined with other
/// paths it is treated as a usage error.
pub fn resolve(paths: &[PathBuf]) -> Mode {
    match paths {
        [] => Mode::Usage,
        [only] if is_scan_token(only) => Mode::ScanCurrentDir,
        [first, _, ..] if is_scan_token(first) => Mode::Usage,
        _ => Mode::Explicit(paths.to_vec()),
    }
}
