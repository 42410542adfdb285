//! Command line client for the TickTick Open API.
//!
//! # Usage
//!
//! Obtain an access token once through the OAuth flow:
//!
//! ```bash
//! export TICKTICK_CLIENT_ID=... TICKTICK_CLIENT_SECRET=... TICKTICK_REDIRECT_URI=...
//! ticktick auth-url --state random-state
//! ticktick exchange <code-from-redirect>
//! ```
//!
//! Then use it for project and task commands:
//!
//! ```bash
//! export TICKTICK_ACCESS_TOKEN="your-access-token"
//! ticktick projects list
//! ticktick tasks create <project-id> "Buy milk" --due 2024-03-01T12:00:00Z
//! ```
//!
//! Set `RUST_LOG=ticktick=debug` to log requests to stderr.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
