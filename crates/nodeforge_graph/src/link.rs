// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::interface::TerminalId;
use crate::node::NodeId;
use crate::socket::SocketDirection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Uuid);

impl LinkId {
    /// Create a new random link ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

/// One end of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// A socket on a node of the graph
    Socket {
        /// Owning node
        node: NodeId,
        /// Which socket list `index` refers to
        direction: SocketDirection,
        /// Position in that list
        index: usize,
    },
    /// A declared input or output of the graph itself
    Terminal(TerminalId),
}

impl Endpoint {
    /// Get the node this endpoint belongs to, if any
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Socket { node, .. } => Some(*node),
            Self::Terminal(_) => None,
        }
    }
}

/// A directed link from a source endpoint to a destination endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique link ID
    pub id: LinkId,
    /// Output socket or input terminal
    pub from: Endpoint,
    /// Input socket or output terminal
    pub to: Endpoint,
}

impl Link {
    /// Create a new link
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            id: LinkId::new(),
            from,
            to,
        }
    }

    /// Check if this link involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from.node() == Some(node_id) || self.to.node() == Some(node_id)
    }

    /// Check if this link involves a specific endpoint
    pub fn involves(&self, endpoint: Endpoint) -> bool {
        self.from == endpoint || self.to == endpoint
    }
}

/// Active links of a graph.
///
/// Each destination holds at most one link. Inserting a link into an
/// occupied destination retires the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Link>", into = "Vec<Link>")]
pub struct LinkRegistry {
    links: IndexMap<LinkId, Link>,
    by_destination: HashMap<Endpoint, LinkId>,
}

impl LinkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link, returning its ID and the link it replaced
    pub fn insert(&mut self, from: Endpoint, to: Endpoint) -> (LinkId, Option<Link>) {
        let retired = self
            .by_destination
            .remove(&to)
            .and_then(|id| self.links.shift_remove(&id));

        let link = Link::new(from, to);
        let id = link.id;
        self.by_destination.insert(to, id);
        self.links.insert(id, link);
        (id, retired)
    }

    /// Remove a link
    pub fn remove(&mut self, link_id: LinkId) -> Option<Link> {
        let link = self.links.shift_remove(&link_id)?;
        self.by_destination.remove(&link.to);
        Some(link)
    }

    /// Get a link by ID
    pub fn get(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get the link feeding a destination
    pub fn link_to(&self, destination: Endpoint) -> Option<&Link> {
        self.by_destination
            .get(&destination)
            .and_then(|id| self.links.get(id))
    }

    /// Whether a destination already receives a link
    pub fn is_linked(&self, destination: Endpoint) -> bool {
        self.by_destination.contains_key(&destination)
    }

    /// Get links leaving a source
    pub fn links_from(&self, source: Endpoint) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.from == source)
    }

    /// Get all links, in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Number of active links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether there are no links
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl From<Vec<Link>> for LinkRegistry {
    fn from(links: Vec<Link>) -> Self {
        let mut registry = Self::new();
        for link in links {
            if let Some(previous) = registry.by_destination.insert(link.to, link.id) {
                registry.links.shift_remove(&previous);
            }
            registry.links.insert(link.id, link);
        }
        registry
    }
}

impl From<LinkRegistry> for Vec<Link> {
    fn from(registry: LinkRegistry) -> Self {
        registry.links.into_values().collect()
    }
}
