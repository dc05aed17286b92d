// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Bundled demo trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Points instanced with a nested jitter group
    Instances,
    /// Position offset built from arithmetic operators
    Math,
    /// Placeholders feeding several inputs and explicit socket access
    MultiSocket,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Rusty Object Notation
    #[default]
    Ron,
    /// JSON
    Json,
}

/// Command-line arguments for the nodeforge builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Demo tree to build
    #[arg(value_enum, default_value = "instances")]
    pub demo: Demo,

    /// Node catalog to load instead of the bundled one (RON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Builder settings file (RON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ron")]
    pub format: Format,

    /// Output file, standard output when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the catalog as RON and exit
    #[arg(long)]
    pub dump_catalog: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
