// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arithmetic on operands, desugared into math nodes.
//!
//! Each operation inserts one node into the active graph and returns its
//! primary output, so results compose:
//!
//! ```
//! use nodeforge_graph::{create_geometry_catalog, NodeCall, ScopeOptions, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new(create_geometry_catalog());
//! let mut tree = builder.open("Offset", ScopeOptions::default());
//! let position = tree.node(NodeCall::new("GeometryNodeInputPosition")).unwrap();
//! let scaled = tree.multiply(position, 2.0).unwrap();
//! let offset = tree.add(scaled, (0.0, 0.2, 0.3)).unwrap();
//! assert!(offset.node().is_some());
//! ```

use crate::builder::TreeBuilder;
use crate::call::{Input, NodeCall};
use crate::error::{BuildError, Result};
use crate::operand::{NodeRef, Operand, SocketRef, TerminalRef};
use crate::socket::{SocketDirection, SocketKind, SocketValue};

/// Scalar math node
pub const MATH_NODE: &str = "ShaderNodeMath";
/// Vector math node
pub const VECTOR_MATH_NODE: &str = "ShaderNodeVectorMath";
/// Integer math node
pub const INTEGER_MATH_NODE: &str = "FunctionNodeIntegerMath";

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathOp {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
}

impl MathOp {
    /// Catalog variant implementing the operation
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

/// One side of an arithmetic operation
#[derive(Debug, Clone, PartialEq)]
pub enum MathArg {
    /// Output of a node, socket or graph input
    Operand(Operand),
    /// Literal
    Value(SocketValue),
}

impl MathArg {
    fn is_scalar_literal(&self) -> bool {
        matches!(self, Self::Value(value) if value.as_scalar().is_some())
    }
}

impl From<MathArg> for Input {
    fn from(arg: MathArg) -> Self {
        match arg {
            MathArg::Operand(operand) => Input::Link(operand),
            MathArg::Value(value) => Input::Value(value),
        }
    }
}

impl From<Operand> for MathArg {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

impl From<NodeRef> for MathArg {
    fn from(node: NodeRef) -> Self {
        Self::Operand(node.into())
    }
}

impl From<SocketRef> for MathArg {
    fn from(socket: SocketRef) -> Self {
        Self::Operand(socket.into())
    }
}

impl From<TerminalRef> for MathArg {
    fn from(terminal: TerminalRef) -> Self {
        Self::Operand(terminal.into())
    }
}

impl From<SocketValue> for MathArg {
    fn from(value: SocketValue) -> Self {
        Self::Value(value)
    }
}

impl From<f32> for MathArg {
    fn from(value: f32) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for MathArg {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<[f32; 3]> for MathArg {
    fn from(value: [f32; 3]) -> Self {
        Self::Value(value.into())
    }
}

impl From<(f32, f32, f32)> for MathArg {
    fn from(value: (f32, f32, f32)) -> Self {
        Self::Value(value.into())
    }
}

impl TreeBuilder {
    /// Insert `a + b`
    pub fn add(&mut self, a: impl Into<MathArg>, b: impl Into<MathArg>) -> Result<Operand> {
        self.math(MathOp::Add, a.into(), b.into())
    }

    /// Insert `a - b`
    pub fn subtract(&mut self, a: impl Into<MathArg>, b: impl Into<MathArg>) -> Result<Operand> {
        self.math(MathOp::Subtract, a.into(), b.into())
    }

    /// Insert `a * b`
    pub fn multiply(&mut self, a: impl Into<MathArg>, b: impl Into<MathArg>) -> Result<Operand> {
        self.math(MathOp::Multiply, a.into(), b.into())
    }

    /// Insert `a / b`
    pub fn divide(&mut self, a: impl Into<MathArg>, b: impl Into<MathArg>) -> Result<Operand> {
        self.math(MathOp::Divide, a.into(), b.into())
    }

    /// Insert the math node for `a op b` and return its primary output.
    ///
    /// Vector operands select vector math, where a scalar literal factor
    /// becomes a scale and any other scalar literal is broadcast. Two
    /// integer operands select integer math; everything else uses scalar
    /// math.
    pub fn math(&mut self, op: MathOp, a: MathArg, b: MathArg) -> Result<Operand> {
        let kind_a = self.arg_kind(&a)?;
        let kind_b = self.arg_kind(&b)?;
        let is_vector = |kind: &Option<SocketKind>| matches!(kind, Some(SocketKind::Vector));

        let (node_type, variant, first, second) = if is_vector(&kind_a) || is_vector(&kind_b) {
            if op == MathOp::Multiply && a.is_scalar_literal() {
                (VECTOR_MATH_NODE, "scale", b, a)
            } else if op == MathOp::Multiply && b.is_scalar_literal() {
                (VECTOR_MATH_NODE, "scale", a, b)
            } else {
                (VECTOR_MATH_NODE, op.variant(), a, b)
            }
        } else if kind_a == Some(SocketKind::Int) && kind_b == Some(SocketKind::Int) {
            (INTEGER_MATH_NODE, op.variant(), a, b)
        } else {
            (MATH_NODE, op.variant(), a, b)
        };

        let call = NodeCall::variant(node_type, variant)
            .positional(first)
            .positional(second);
        let node = self.node(call)?;
        self.primary_output(node).map(Operand::Socket)
    }

    /// Get the first active output of a node
    pub fn primary_output(&self, node: NodeRef) -> Result<SocketRef> {
        let instance = self
            .graph_ref(node.graph)?
            .node(node.node)
            .ok_or_else(|| BuildError::InvalidOperand(format!("{node:?} is not a node of this builder")))?;
        let index = instance.primary_output().ok_or_else(|| {
            BuildError::InvalidOperand(format!("{} has no active output", instance.name))
        })?;
        Ok(SocketRef {
            graph: node.graph,
            node: node.node,
            direction: SocketDirection::Output,
            index,
        })
    }

    fn arg_kind(&self, arg: &MathArg) -> Result<Option<SocketKind>> {
        match arg {
            MathArg::Operand(operand) => self.source_kind(*operand),
            MathArg::Value(value) => Ok(Some(value.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::geometry::create_geometry_catalog;
    use crate::interface::TerminalSpec;
    use crate::scope::ScopeOptions;

    fn node_type(builder: &TreeBuilder, operand: Operand) -> String {
        let node = operand.node().unwrap();
        builder
            .graph_ref(node.graph)
            .unwrap()
            .node(node.node)
            .unwrap()
            .node_type
            .clone()
    }

    #[test]
    fn test_scalar_operands_use_math() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let mut tree = builder.open("Scalar", ScopeOptions::default());
        let value = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
        let sum = tree.add(value, 1.0).unwrap();
        assert_eq!(node_type(&tree, sum), MATH_NODE);

        let index = tree.node(NodeCall::new("GeometryNodeInputIndex")).unwrap();
        let product = tree.multiply(index, 2.0).unwrap();
        assert_eq!(node_type(&tree, product), MATH_NODE);
    }

    #[test]
    fn test_integer_operands_use_integer_math() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let mut tree = builder.open("Integer", ScopeOptions::default());
        let count = {
            let mut inputs = tree.interface_inputs().unwrap();
            inputs.declare(TerminalSpec::int("Count")).unwrap()
        };
        let index = tree.node(NodeCall::new("GeometryNodeInputIndex")).unwrap();
        let result = tree.subtract(count, index).unwrap();
        assert_eq!(node_type(&tree, result), INTEGER_MATH_NODE);

        let halved = tree.divide(result, 2).unwrap();
        assert_eq!(node_type(&tree, halved), INTEGER_MATH_NODE);
    }

    #[test]
    fn test_reversed_scalar_scales_vector() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let mut tree = builder.open("Reversed", ScopeOptions::default());
        let position = tree.node(NodeCall::new("GeometryNodeInputPosition")).unwrap();
        let scaled = tree.multiply(3.0, position).unwrap();
        let Operand::Socket(output) = scaled else {
            panic!("expected a socket");
        };

        let graph = tree.graph_ref(output.graph).unwrap();
        let node = graph.node(output.node).unwrap();
        assert_eq!(node.node_type, VECTOR_MATH_NODE);
        assert_eq!(node.properties["operation"], SocketValue::from("SCALE"));
        let scale = node.find_socket(SocketDirection::Input, "Scale").unwrap();
        assert_eq!(node.inputs[scale].default_value, Some(SocketValue::Float(3.0)));
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_vector_literal_broadcasts() {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let mut tree = builder.open("Broadcast", ScopeOptions::default());
        let position = tree.node(NodeCall::new("GeometryNodeInputPosition")).unwrap();
        let moved = tree.subtract(position, 0.5).unwrap();
        let Operand::Socket(output) = moved else {
            panic!("expected a socket");
        };

        let node = tree.graph_ref(output.graph).unwrap().node(output.node).unwrap();
        assert_eq!(node.node_type, VECTOR_MATH_NODE);
        assert_eq!(node.inputs[1].default_value, Some(SocketValue::Vector([0.5; 3])));
    }
}
