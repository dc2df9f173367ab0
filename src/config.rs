// Runtime settings for tiny.
//
// Command-line flags are the only source; no environment variables or
// configuration files are consulted.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;

use crate::cli::Cli;

/// Endpoint used unless `--endpoint` says otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://tinyjpg.com/backend/opt/shrink";

mod defaults {
    pub const MIN_DELAY_MS: u64 = 500;
    pub const MAX_DELAY_MS: u64 = 1000;
}

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub backup: bool,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub timeout: Option<Duration>,
    pub progress: bool,
}

impl Settings {
    /// Apply defaults to whatever the command line left out and validate the
    /// result.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let endpoint = cli
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let url = Url::parse(&endpoint).with_context(|| format!("invalid endpoint '{endpoint}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("endpoint must be an http(s) URL, got '{endpoint}'");
        }

        let min_ms = cli.min_delay_ms.unwrap_or(defaults::MIN_DELAY_MS);
        let max_ms = cli.max_delay_ms.unwrap_or(defaults::MAX_DELAY_MS);
        if min_ms > max_ms {
            bail!("minimum delay ({min_ms} ms) is greater than maximum delay ({max_ms} ms)");
        }

        Ok(Self {
            endpoint,
            backup: cli.backup_override().unwrap_or(false),
            min_delay: Duration::from_millis(min_ms),
            max_delay: Duration::from_millis(max_ms),
            timeout: cli.timeout.map(Duration::from_secs),
            progress: cli.progress,
        })
    }
}
