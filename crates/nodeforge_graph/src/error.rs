// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised while building a graph.

use crate::graph::GraphId;
use crate::socket::{SocketDirection, SocketKind, SocketValue};
use thiserror::Error;

/// Result type for builder operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Error raised by a construction step.
///
/// Every variant is reported at the point of misuse; the failing step leaves
/// no node or link behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// No builder scope is active
    #[error("No active graph: nodes, terminals and links must be created inside a builder scope")]
    NoActiveGraph,

    /// Operation not allowed in the current interface mode
    #[error("Invalid interface context: {reason}")]
    InvalidInterfaceContext {
        /// What went wrong
        reason: &'static str,
    },

    /// Terminal name already declared in the same direction
    #[error("Interface {} '{name}' is already declared", .direction.label())]
    DuplicateInterfaceName {
        /// Graph input or output
        direction: SocketDirection,
        /// Offending name
        name: String,
    },

    /// No socket pair between the operands is compatible
    #[error(
        "Cannot link any output of {source_label} {source_kinds:?} to any input of {target_label} {target_kinds:?}; pick a socket explicitly"
    )]
    NoCompatibleSocket {
        /// Left operand
        source_label: String,
        /// Kinds of its candidate outputs
        source_kinds: Vec<SocketKind>,
        /// Right operand
        target_label: String,
        /// Kinds of its candidate inputs
        target_kinds: Vec<SocketKind>,
    },

    /// Scope exit does not match the innermost scope
    #[error("Scope mismatch: tried to exit {expected:?} but {found:?} is the innermost scope")]
    ScopeMismatch {
        /// Graph the caller tried to exit
        expected: GraphId,
        /// Graph on top of the stack
        found: GraphId,
    },

    /// Operand belongs to a graph other than the active one
    #[error("Operand belongs to graph {operand:?}, but {active:?} is being built")]
    GraphMismatch {
        /// Graph of the operand
        operand: GraphId,
        /// Graph on top of the stack
        active: GraphId,
    },

    /// Type tag missing from the catalog
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Variant missing from a node type
    #[error("Node type {node_type} has no variant '{variant}'")]
    UnknownVariant {
        /// Type tag
        node_type: String,
        /// Requested variant
        variant: String,
    },

    /// Socket name missing from a node
    #[error("Node type {node_type} has no {} socket '{name}'", .direction.label())]
    UnknownSocket {
        /// Type tag
        node_type: String,
        /// Socket direction
        direction: SocketDirection,
        /// Requested name
        name: String,
    },

    /// Property missing from a node type
    #[error("Node type {node_type} has no property '{property}'")]
    UnknownProperty {
        /// Type tag
        node_type: String,
        /// Requested property
        property: String,
    },

    /// Value cannot be stored where it was assigned
    #[error("Invalid value for {target}: expected {expected}, got {value:?}")]
    InvalidValue {
        /// What the value was assigned to
        target: String,
        /// Expected kind
        expected: SocketKind,
        /// Offending value
        value: SocketValue,
    },

    /// Operand used in a position it cannot take
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Socket is inactive under the node's current properties
    #[error("Socket '{socket}' of {node_type} is inactive; a link to it would be ignored")]
    InactiveSocket {
        /// Type tag
        node_type: String,
        /// Socket identifier
        socket: String,
    },

    /// More positional arguments than the node accepts
    #[error("{node_type} accepts {accepted} positional arguments, got {given}")]
    TooManyArguments {
        /// Type tag
        node_type: String,
        /// Number accepted
        accepted: usize,
        /// Number given
        given: usize,
    },

    /// Link from a node into itself
    #[error("Cannot link {0} to itself")]
    SelfLink(String),

    /// Group node requested for a graph that is still being built
    #[error("Graph {0:?} is still being built and cannot be used as a group")]
    GroupNotFinalized(GraphId),
}
