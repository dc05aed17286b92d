// SPDX-License-Identifier: MIT OR Apache-2.0
//! nodeforge entry point.

use clap::Parser;
use nodeforge_cli::Args;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    // RUST_LOG wins over --log-level
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| {
            eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
            EnvFilter::new("warn")
        })
    });

    // Logs go to stderr so exported graphs can be piped from stdout
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting nodeforge");
    tracing::debug!(?args, "Parsed arguments");

    if let Err(err) = nodeforge_cli::run(&args) {
        tracing::error!("{err}");
        process::exit(1);
    }

    tracing::info!("Completed successfully");
}
