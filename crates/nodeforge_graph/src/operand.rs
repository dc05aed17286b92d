// SPDX-License-Identifier: MIT OR Apache-2.0
//! Handles to linkable things: nodes, sockets and interface terminals.

use crate::graph::GraphId;
use crate::interface::TerminalId;
use crate::link::Endpoint;
use crate::node::NodeId;
use crate::socket::SocketDirection;
use serde::{Deserialize, Serialize};

/// Handle to a node of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    /// Owning graph
    pub graph: GraphId,
    /// Node ID
    pub node: NodeId,
}

/// Handle to one socket of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    /// Owning graph
    pub graph: GraphId,
    /// Owning node
    pub node: NodeId,
    /// Input or output
    pub direction: SocketDirection,
    /// Position in the node's socket list
    pub index: usize,
}

impl SocketRef {
    /// Get the link endpoint for this socket
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::Socket {
            node: self.node,
            direction: self.direction,
            index: self.index,
        }
    }

    /// Get the owning node
    pub fn node_ref(&self) -> NodeRef {
        NodeRef {
            graph: self.graph,
            node: self.node,
        }
    }
}

/// Handle to a declared interface terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalRef {
    /// Owning graph
    pub graph: GraphId,
    /// Terminal ID
    pub id: TerminalId,
    /// Graph input or graph output
    pub direction: SocketDirection,
}

impl TerminalRef {
    /// Get the link endpoint for this terminal
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::Terminal(self.id)
    }
}

/// Something that can take part in a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// A node; its sockets are candidates
    Node(NodeRef),
    /// An exact socket
    Socket(SocketRef),
    /// An exact interface terminal
    Terminal(TerminalRef),
}

impl Operand {
    /// Get the graph the operand belongs to
    pub fn graph(&self) -> GraphId {
        match self {
            Self::Node(n) => n.graph,
            Self::Socket(s) => s.graph,
            Self::Terminal(t) => t.graph,
        }
    }

    /// Get the node behind the operand, if any
    pub fn node(&self) -> Option<NodeRef> {
        match self {
            Self::Node(n) => Some(*n),
            Self::Socket(s) => Some(s.node_ref()),
            Self::Terminal(_) => None,
        }
    }
}

impl From<NodeRef> for Operand {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}

impl From<SocketRef> for Operand {
    fn from(socket: SocketRef) -> Self {
        Self::Socket(socket)
    }
}

impl From<TerminalRef> for Operand {
    fn from(terminal: TerminalRef) -> Self {
        Self::Terminal(terminal)
    }
}
