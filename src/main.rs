// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging and hand over to
//   `app::run`.
// - Only fatal errors (bad flags, client setup, directory scan) reach here;
//   per-file failures are reported inline and never change the exit code.

use std::process::ExitCode;

use clap::Parser;
use tiny_cli::{app, cli::Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
