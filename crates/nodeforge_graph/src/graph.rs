// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes, links and the interface.

use crate::interface::{Interface, Terminal};
use crate::link::{Endpoint, Link, LinkId, LinkRegistry};
use crate::node::{Node, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphId(pub Uuid);

impl GraphId {
    /// Create a new random graph ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Unique graph ID
    pub id: GraphId,
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Links between sockets and terminals
    links: LinkRegistry,
    /// Declared inputs and outputs
    interface: Interface,
    /// Set once the graph's scope has been exited
    finalized: bool,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GraphId::new(),
            name: name.into(),
            nodes: IndexMap::new(),
            links: LinkRegistry::new(),
            interface: Interface::default(),
            finalized: false,
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Find a node by display name
    pub fn node_named(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Get all nodes, in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all nodes mutably
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Pick a display name not used by any node yet (`Math`, `Math.001`, ...)
    pub fn unique_node_name(&self, base: &str) -> String {
        let taken: HashSet<&str> = self.nodes.values().map(|n| n.name.as_str()).collect();
        if !taken.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}.{i:03}"))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    /// Link two endpoints, returning the new link and the one it replaced
    pub fn connect(&mut self, from: Endpoint, to: Endpoint) -> (LinkId, Option<Link>) {
        self.links.insert(from, to)
    }

    /// Remove a link
    pub fn disconnect(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.remove(link_id)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(link_id)
    }

    /// Get all links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Get the link feeding a destination
    pub fn link_to(&self, destination: Endpoint) -> Option<&Link> {
        self.links.link_to(destination)
    }

    /// Whether a destination already receives a link
    pub fn is_linked(&self, destination: Endpoint) -> bool {
        self.links.is_linked(destination)
    }

    /// Get links leaving a source
    pub fn links_from(&self, source: Endpoint) -> impl Iterator<Item = &Link> {
        self.links.links_from(source)
    }

    /// Get links involving a node
    pub fn links_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.involves_node(node_id))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Get the declared interface
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub(crate) fn interface_mut(&mut self) -> &mut Interface {
        &mut self.interface
    }

    /// Get the declared graph inputs
    pub fn inputs(&self) -> &[Terminal] {
        &self.interface.inputs
    }

    /// Get the declared graph outputs
    pub fn outputs(&self) -> &[Terminal] {
        &self.interface.outputs
    }

    /// Whether the graph's scope has been exited
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Get nodes in topological order (sources first)
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut visited = HashSet::new();
        let mut temp_mark = HashSet::new();
        let mut order = Vec::new();

        for node_id in self.nodes.keys() {
            if !visited.contains(node_id) {
                self.visit(*node_id, &mut visited, &mut temp_mark, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(
        &self,
        node_id: NodeId,
        visited: &mut HashSet<NodeId>,
        temp_mark: &mut HashSet<NodeId>,
        order: &mut Vec<NodeId>,
    ) -> Result<(), CycleError> {
        if temp_mark.contains(&node_id) {
            return Err(CycleError);
        }
        if visited.contains(&node_id) {
            return Ok(());
        }

        temp_mark.insert(node_id);

        // Visit all nodes feeding this node first
        for link in self.links_for_node(node_id) {
            if link.to.node() == Some(node_id) {
                if let Some(source) = link.from.node() {
                    self.visit(source, visited, temp_mark, order)?;
                }
            }
        }

        temp_mark.remove(&node_id);
        visited.insert(node_id);
        order.push(node_id);

        Ok(())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Geometry Nodes")
    }
}

/// Error when graph contains a cycle
#[derive(Debug, thiserror::Error)]
#[error("Graph contains a cycle")]
pub struct CycleError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeCategory, NodeType};
    use crate::socket::{Socket, SocketDirection, SocketKind};

    fn passthrough() -> NodeType {
        NodeType::new("Pass", "Pass", NodeCategory::Utility)
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .output(Socket::output("Geometry", SocketKind::Geometry))
    }

    fn out(node: NodeId) -> Endpoint {
        Endpoint::Socket {
            node,
            direction: SocketDirection::Output,
            index: 0,
        }
    }

    fn inp(node: NodeId) -> Endpoint {
        Endpoint::Socket {
            node,
            direction: SocketDirection::Input,
            index: 0,
        }
    }

    #[test]
    fn test_unique_node_names() {
        let mut graph = Graph::new("Names");
        let ty = passthrough();
        assert_eq!(graph.unique_node_name("Pass"), "Pass");
        graph.add_node(Node::new(&ty, "Pass"));
        assert_eq!(graph.unique_node_name("Pass"), "Pass.001");
        graph.add_node(Node::new(&ty, "Pass.001"));
        assert_eq!(graph.unique_node_name("Pass"), "Pass.002");
    }

    #[test]
    fn test_topological_order() {
        let mut graph = Graph::new("Order");
        let ty = passthrough();
        let c = graph.add_node(Node::new(&ty, "C"));
        let a = graph.add_node(Node::new(&ty, "A"));
        let b = graph.add_node(Node::new(&ty, "B"));
        graph.connect(out(a), inp(b));
        graph.connect(out(b), inp(c));

        let order = graph.topological_order().unwrap();
        let pos = |id| order.iter().position(|n| *n == id).unwrap();
        assert!(pos(a) < pos(b));
        assert!(pos(b) < pos(c));
    }

    #[test]
    fn test_lookup_and_disconnect() {
        let mut graph = Graph::new("Lookup");
        let ty = passthrough();
        let a = graph.add_node(Node::new(&ty, "A"));
        let b = graph.add_node(Node::new(&ty, "B"));
        let (link, _) = graph.connect(out(a), inp(b));

        assert_eq!(graph.node_named("B").map(|n| n.id), Some(b));
        assert!(graph.node_named("C").is_none());

        let removed = graph.disconnect(link).unwrap();
        assert!(removed.involves(inp(b)));
        assert!(!graph.is_linked(inp(b)));
        assert!(graph.disconnect(link).is_none());
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph = Graph::new("Cycle");
        let ty = passthrough();
        let a = graph.add_node(Node::new(&ty, "A"));
        let b = graph.add_node(Node::new(&ty, "B"));
        graph.connect(out(a), inp(b));
        graph.connect(out(b), inp(a));
        assert!(graph.topological_order().is_err());
    }
}
