// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node placement run when a node tree is finalized.

use crate::graph::Graph;
use crate::node::NodeId;
use crate::settings::ArrangeSettings;
use std::collections::HashMap;

/// Positions the nodes of a finalized graph
pub trait ArrangeHook {
    /// Adjust node positions; nothing else of the graph may change
    fn arrange(&mut self, graph: &mut Graph);
}

/// Leaves every node where it is
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArrange;

impl ArrangeHook for NoArrange {
    fn arrange(&mut self, _graph: &mut Graph) {}
}

/// Column layout by longest link distance from a root node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredArrange {
    /// Distance between columns
    pub horizontal_spacing: f32,
    /// Distance between nodes in a column
    pub vertical_spacing: f32,
}

impl LayeredArrange {
    /// Build from settings
    pub fn from_settings(settings: &ArrangeSettings) -> Self {
        Self {
            horizontal_spacing: settings.horizontal_spacing,
            vertical_spacing: settings.vertical_spacing,
        }
    }

    /// Column index of every node
    pub fn layers(graph: &Graph) -> Option<HashMap<NodeId, usize>> {
        let order = graph.topological_order().ok()?;
        let mut layers: HashMap<NodeId, usize> = HashMap::with_capacity(order.len());
        for node in order {
            let layer = graph
                .links_for_node(node)
                .filter(|link| link.to.node() == Some(node))
                .filter_map(|link| link.from.node())
                .filter_map(|source| layers.get(&source))
                .map(|layer| layer + 1)
                .max()
                .unwrap_or(0);
            layers.insert(node, layer);
        }
        Some(layers)
    }
}

impl Default for LayeredArrange {
    fn default() -> Self {
        Self::from_settings(&ArrangeSettings::default())
    }
}

impl ArrangeHook for LayeredArrange {
    fn arrange(&mut self, graph: &mut Graph) {
        let Some(layers) = Self::layers(graph) else {
            tracing::warn!(graph = %graph.name, "Graph contains a cycle, skipping arrangement");
            return;
        };

        let mut rows: HashMap<usize, usize> = HashMap::new();
        for node in graph.nodes_mut() {
            let layer = layers.get(&node.id).copied().unwrap_or(0);
            let row = rows.entry(layer).or_insert(0);
            node.position = [
                layer as f32 * self.horizontal_spacing,
                -(*row as f32) * self.vertical_spacing,
            ];
            *row += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::Endpoint;
    use crate::node::{Node, NodeCategory, NodeType};
    use crate::socket::{Socket, SocketDirection, SocketKind};

    fn passthrough() -> NodeType {
        NodeType::new("Pass", "Pass", NodeCategory::Utility)
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .output(Socket::output("Geometry", SocketKind::Geometry))
    }

    fn link(graph: &mut Graph, from: NodeId, to: NodeId) {
        graph.connect(
            Endpoint::Socket {
                node: from,
                direction: SocketDirection::Output,
                index: 0,
            },
            Endpoint::Socket {
                node: to,
                direction: SocketDirection::Input,
                index: 0,
            },
        );
    }

    #[test]
    fn test_layers_follow_longest_path() {
        let mut graph = Graph::new("Layers");
        let ty = passthrough();
        let a = graph.add_node(Node::new(&ty, "A"));
        let b = graph.add_node(Node::new(&ty, "B"));
        let c = graph.add_node(Node::new(&ty, "C"));
        let d = graph.add_node(Node::new(&ty, "D"));
        link(&mut graph, a, b);
        link(&mut graph, b, c);
        link(&mut graph, a, d);

        LayeredArrange::default().arrange(&mut graph);
        let x = |id| graph.node(id).unwrap().position[0];
        assert_eq!(x(a), 0.0);
        assert_eq!(x(b), 200.0);
        assert_eq!(x(c), 400.0);
        assert_eq!(x(d), 200.0);
        assert_eq!(graph.node(d).unwrap().position[1], -200.0);
    }

    #[test]
    fn test_cycle_leaves_positions() {
        let mut graph = Graph::new("Cycle");
        let ty = passthrough();
        let a = graph.add_node(Node::new(&ty, "A"));
        let b = graph.add_node(Node::new(&ty, "B"));
        link(&mut graph, a, b);
        link(&mut graph, b, a);

        LayeredArrange::default().arrange(&mut graph);
        assert_eq!(graph.node(b).unwrap().position, [0.0, 0.0]);
    }
}
