// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line front end for the nodeforge graph builder.
//!
//! Builds one of the bundled demo trees with the configured catalog and
//! settings, then writes every graph it produced (the tree and its groups)
//! as RON or JSON.

mod args;
pub mod demos;

pub use args::{Args, Demo, Format};

use nodeforge_graph::export::{library_to_json, library_to_ron};
use nodeforge_graph::{
    create_geometry_catalog, BuildError, BuilderSettings, Catalog, ConfigError, ExportError, Graph,
    GraphStats, TreeBuilder,
};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog or settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Demo tree failed to build
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Graphs could not be serialized
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Output could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the nodeforge CLI.
///
/// # Errors
///
/// Returns [`CliError`] when the catalog or settings fail to load, the demo
/// tree fails to build, or the output cannot be serialized or written.
pub fn run(args: &Args) -> Result<(), CliError> {
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => create_geometry_catalog(),
    };

    if args.dump_catalog {
        write_output(args.output.as_deref(), &catalog.to_ron()?)?;
        tracing::info!(node_types = catalog.registry.len(), "Catalog written");
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => BuilderSettings::load(path)?,
        None => BuilderSettings::default(),
    };

    let mut builder = TreeBuilder::with_settings(catalog, settings);
    let tree = demos::build(&mut builder, args.demo)?;
    if let Some(graph) = builder.graph(tree) {
        let stats = GraphStats::collect(graph);
        tracing::info!(
            tree = %graph.name,
            nodes = stats.nodes(),
            links = stats.links,
            terminals = stats.terminals,
            "Built demo tree"
        );
    }

    let graphs: Vec<&Graph> = builder.graphs().collect();
    let text = match args.format {
        Format::Ron => library_to_ron(&graphs)?,
        Format::Json => library_to_json(&graphs)?,
    };
    write_output(args.output.as_deref(), &text)?;
    Ok(())
}

fn write_output(path: Option<&Path>, text: &str) -> std::io::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(path = %path.display(), "Output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
