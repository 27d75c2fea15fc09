//! Binary crate for the `skycast` terminal weather app.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city prompt loop
//! - The view model and its terminal rendering

use clap::Parser;

mod app;
mod cli;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
