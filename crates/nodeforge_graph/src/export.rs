// SPDX-License-Identifier: MIT OR Apache-2.0
//! Traversal and serialization of finalized graphs.

use crate::graph::Graph;
use crate::interface::Terminal;
use crate::link::Link;
use crate::node::Node;
use indexmap::IndexMap;
use thiserror::Error;

/// Error exporting a graph
#[derive(Debug, Error)]
pub enum ExportError {
    /// The graph's scope has not been exited yet
    #[error("Graph '{0}' is still being built")]
    NotFinalized(String),
    /// RON serialization failed
    #[error("RON serialization failed: {0}")]
    Ron(#[from] ron::Error),
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Visitor over the structure of a graph.
///
/// Every method has an empty default, so visitors implement only what they
/// need.
pub trait GraphVisitor {
    /// Called once before anything else
    fn visit_graph(&mut self, _graph: &Graph) {}

    /// Called for each interface terminal, inputs first
    fn visit_terminal(&mut self, _terminal: &Terminal) {}

    /// Called for each node in creation order
    fn visit_node(&mut self, _node: &Node) {}

    /// Called for each link in creation order
    fn visit_link(&mut self, _link: &Link) {}
}

impl Graph {
    /// Walk the graph: interface, then nodes, then links
    pub fn walk(&self, visitor: &mut impl GraphVisitor) {
        visitor.visit_graph(self);
        for terminal in self.inputs().iter().chain(self.outputs()) {
            visitor.visit_terminal(terminal);
        }
        for node in self.nodes() {
            visitor.visit_node(node);
        }
        for link in self.links() {
            visitor.visit_link(link);
        }
    }
}

/// Node and link counts of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Nodes per type tag
    pub node_types: IndexMap<String, usize>,
    /// Number of links
    pub links: usize,
    /// Number of interface terminals
    pub terminals: usize,
}

impl GraphStats {
    /// Collect statistics for a graph
    pub fn collect(graph: &Graph) -> Self {
        let mut stats = Self::default();
        graph.walk(&mut stats);
        stats
    }

    /// Total number of nodes
    pub fn nodes(&self) -> usize {
        self.node_types.values().sum()
    }
}

impl GraphVisitor for GraphStats {
    fn visit_terminal(&mut self, _terminal: &Terminal) {
        self.terminals += 1;
    }

    fn visit_node(&mut self, node: &Node) {
        *self.node_types.entry(node.node_type.clone()).or_insert(0) += 1;
    }

    fn visit_link(&mut self, _link: &Link) {
        self.links += 1;
    }
}

fn finalized(graphs: &[&Graph]) -> Result<(), ExportError> {
    match graphs.iter().find(|g| !g.is_finalized()) {
        Some(graph) => Err(ExportError::NotFinalized(graph.name.clone())),
        None => Ok(()),
    }
}

/// Serialize a finalized graph to RON
pub fn to_ron(graph: &Graph) -> Result<String, ExportError> {
    finalized(&[graph])?;
    Ok(ron::ser::to_string_pretty(graph, ron::ser::PrettyConfig::default())?)
}

/// Serialize a finalized graph to JSON
pub fn to_json(graph: &Graph) -> Result<String, ExportError> {
    finalized(&[graph])?;
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Serialize several finalized graphs (a tree and its groups) to RON
pub fn library_to_ron(graphs: &[&Graph]) -> Result<String, ExportError> {
    finalized(graphs)?;
    Ok(ron::ser::to_string_pretty(graphs, ron::ser::PrettyConfig::default())?)
}

/// Serialize several finalized graphs (a tree and its groups) to JSON
pub fn library_to_json(graphs: &[&Graph]) -> Result<String, ExportError> {
    finalized(graphs)?;
    Ok(serde_json::to_string_pretty(graphs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::call::{ChainTarget, NodeCall};
    use crate::catalog::geometry::create_geometry_catalog;
    use crate::interface::TerminalSpec;
    use crate::scope::{GraphHandle, ScopeOptions};

    fn build(builder: &mut TreeBuilder) -> GraphHandle {
        let (handle, ()) = builder
            .scope("Export", ScopeOptions::without_arrange(), |b| {
                let geometry = {
                    let mut inputs = b.interface_inputs()?;
                    inputs.declare(TerminalSpec::geometry("Geometry"))?
                };
                let output = {
                    let mut outputs = b.interface_outputs()?;
                    outputs.declare(TerminalSpec::geometry("Geometry"))?
                };
                let set_position = b.node(
                    NodeCall::new("GeometryNodeSetPosition").input("offset", (0.0, 0.0, 1.0)),
                )?;
                b.chain_all(geometry, [ChainTarget::from(set_position), ChainTarget::from(output)])?;
                Ok(())
            })
            .unwrap();
        handle
    }

    #[test]
    fn test_stats_visitor() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let handle = build(&mut builder);
        let stats = GraphStats::collect(builder.graph(handle).unwrap());
        assert_eq!(stats.nodes(), 1);
        assert_eq!(stats.node_types["GeometryNodeSetPosition"], 1);
        assert_eq!(stats.links, 2);
        assert_eq!(stats.terminals, 2);
    }

    #[test]
    fn test_export_requires_finalized() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let handle = builder.enter("Open", ScopeOptions::default());
        let graph = builder.graph(handle).unwrap();
        assert!(matches!(to_json(graph), Err(ExportError::NotFinalized(_))));
        builder.exit(handle).unwrap();
        assert!(to_json(builder.graph(handle).unwrap()).is_ok());
    }

    #[test]
    fn test_ron_export_reloads() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let handle = build(&mut builder);
        let graph = builder.graph(handle).unwrap();

        let text = to_ron(graph).unwrap();
        let loaded: Graph = ron::from_str(&text).unwrap();
        assert_eq!(loaded.node_count(), 1);
        assert_eq!(loaded.link_count(), 2);
        assert_eq!(loaded.inputs()[0].name, "Geometry");
        assert!(loaded.is_finalized());

        let json = library_to_json(&[graph]).unwrap();
        assert!(json.contains("GeometryNodeSetPosition"));
    }
}
