// Library root
// -----------
// This crate exposes the pieces of the `tiny` CLI as a library. The binary
// (`main.rs`) only parses arguments, sets up logging and calls `app::run`.
//
// Module responsibilities:
// - `cli`: clap argument definitions and the usage / scan / explicit-paths
//   decision.
// - `config`: turns command-line flags into the resolved `Settings`.
// - `discover`: finds image files in a directory.
// - `backup`: optional `<stem>_original<ext>` copies.
// - `provider`: the compression provider seam and its result type.
// - `api`: the reqwest client that talks to the remote shrink service.
// - `download`: fetches a result and atomically replaces the local file.
// - `pace`: delay policies applied before each remote call.
// - `ui`: console output for each file.
// - `pipeline`: runs every file through backup, pace, shrink and download.
// - `app`: glues the above together for one invocation.
pub mod api;
pub mod app;
pub mod backup;
pub mod cli;
pub mod config;
pub mod discover;
pub mod download;
pub mod pace;
pub mod pipeline;
pub mod provider;
pub mod ui;
