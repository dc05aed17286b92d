// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node construction calls.
//!
//! A [`NodeCall`] names what to instantiate and how to fill its inputs:
//!
//! ```
//! use nodeforge_graph::{NodeCall, Placeholder};
//!
//! let call = NodeCall::variant("ShaderNodeMath", "add")
//!     .positional(Placeholder)
//!     .positional(0.1);
//! assert!(call.has_placeholder());
//! ```

use crate::operand::{NodeRef, Operand, SocketRef, TerminalRef};
use crate::scope::GraphHandle;
use crate::socket::SocketValue;
use indexmap::IndexMap;

/// Token marking the input that receives the left side of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placeholder;

/// Value assigned to a node input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Literal default value
    Value(SocketValue),
    /// Link from a node, socket or terminal
    Link(Operand),
    /// Receive the left operand of the enclosing chain
    Placeholder,
}

impl From<Placeholder> for Input {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}

impl From<SocketValue> for Input {
    fn from(value: SocketValue) -> Self {
        Self::Value(value)
    }
}

impl From<Operand> for Input {
    fn from(operand: Operand) -> Self {
        Self::Link(operand)
    }
}

impl From<NodeRef> for Input {
    fn from(node: NodeRef) -> Self {
        Self::Link(node.into())
    }
}

impl From<SocketRef> for Input {
    fn from(socket: SocketRef) -> Self {
        Self::Link(socket.into())
    }
}

impl From<TerminalRef> for Input {
    fn from(terminal: TerminalRef) -> Self {
        Self::Link(terminal.into())
    }
}

macro_rules! input_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Self::Value(SocketValue::from(value))
                }
            }
        )*
    };
}

input_from_literal!(
    f32,
    i32,
    bool,
    [f32; 3],
    (f32, f32, f32),
    [f32; 4],
    (f32, f32, f32, f32),
    &str,
    String,
);

/// What a call instantiates
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// Catalog node type, optionally through a named variant
    Catalog {
        /// Type tag
        node_type: String,
        /// Variant name
        variant: Option<String>,
    },
    /// Finalized graph used as a group node
    Group(GraphHandle),
}

/// A request to instantiate one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCall {
    pub(crate) callee: Callee,
    pub(crate) positional: Vec<Input>,
    pub(crate) keyword: IndexMap<String, Input>,
    pub(crate) properties: IndexMap<String, SocketValue>,
}

impl NodeCall {
    fn with_callee(callee: Callee) -> Self {
        Self {
            callee,
            positional: Vec::new(),
            keyword: IndexMap::new(),
            properties: IndexMap::new(),
        }
    }

    /// Instantiate a catalog node type
    pub fn new(node_type: impl Into<String>) -> Self {
        Self::with_callee(Callee::Catalog {
            node_type: node_type.into(),
            variant: None,
        })
    }

    /// Instantiate a catalog node type through a named variant
    pub fn variant(node_type: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::with_callee(Callee::Catalog {
            node_type: node_type.into(),
            variant: Some(variant.into()),
        })
    }

    /// Instantiate a finalized graph as a group node
    pub fn group(graph: GraphHandle) -> Self {
        Self::with_callee(Callee::Group(graph))
    }

    /// Append a positional argument
    pub fn positional(mut self, value: impl Into<Input>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Assign an input by identifier, name or normalized name
    pub fn input(mut self, name: impl Into<String>, value: impl Into<Input>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// Set a node property
    pub fn property(mut self, name: impl Into<String>, value: impl Into<SocketValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Get the callee
    pub fn callee(&self) -> &Callee {
        &self.callee
    }

    /// Whether any argument is the placeholder
    pub fn has_placeholder(&self) -> bool {
        self.positional
            .iter()
            .chain(self.keyword.values())
            .any(|input| matches!(input, Input::Placeholder))
    }
}

/// Right-hand side of a chain
#[derive(Debug, Clone, PartialEq)]
pub enum ChainTarget {
    /// An existing node, socket or terminal
    Operand(Operand),
    /// A node to construct as part of the chain
    Call(NodeCall),
}

impl From<NodeCall> for ChainTarget {
    fn from(call: NodeCall) -> Self {
        Self::Call(call)
    }
}

impl From<Operand> for ChainTarget {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

impl From<NodeRef> for ChainTarget {
    fn from(node: NodeRef) -> Self {
        Self::Operand(node.into())
    }
}

impl From<SocketRef> for ChainTarget {
    fn from(socket: SocketRef) -> Self {
        Self::Operand(socket.into())
    }
}

impl From<TerminalRef> for ChainTarget {
    fn from(terminal: TerminalRef) -> Self {
        Self::Operand(terminal.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        let plain = NodeCall::new("GeometryNodeSetPosition").input("offset", (0.0, 0.0, 0.1));
        assert!(!plain.has_placeholder());

        let marked = plain.clone().input("geometry", Placeholder);
        assert!(marked.has_placeholder());
        assert_eq!(marked.keyword.len(), 2);
    }

    #[test]
    fn test_literal_inputs() {
        assert_eq!(Input::from(2.0), Input::Value(SocketValue::Float(2.0)));
        assert_eq!(
            Input::from((0.0, 0.2, 0.3)),
            Input::Value(SocketValue::Vector([0.0, 0.2, 0.3]))
        );
        assert_eq!(Input::from("LOCAL"), Input::Value(SocketValue::from("LOCAL")));
    }
}
