// SPDX-License-Identifier: MIT OR Apache-2.0
//! Declarative builder for procedural node graphs.
//!
//! This crate builds geometry-node style graphs from code:
//! - Scoped graph construction with nested graphs
//! - Chaining resolved into socket links by compatibility ranking
//! - Explicit socket accessors and placeholder targeting
//! - Interface declaration for graph inputs and outputs
//! - Arithmetic desugared into math nodes
//!
//! ## Architecture
//!
//! A [`TreeBuilder`] owns a stack of scopes. The graph on top of the stack
//! is the only one that can change; exiting its scope finalizes it. Node
//! types come from a [`Catalog`], which pairs a [`NodeRegistry`] with the
//! [`CompatibilityTable`] consulted whenever two operands are chained.
//!
//! ```
//! use nodeforge_graph::{
//!     create_geometry_catalog, NodeCall, Placeholder, ScopeOptions, TerminalSpec, TreeBuilder,
//! };
//!
//! let mut builder = TreeBuilder::new(create_geometry_catalog());
//! let mut tree = builder.open("Scatter", ScopeOptions::default());
//! let count = {
//!     let mut inputs = tree.interface_inputs().unwrap();
//!     inputs.declare(TerminalSpec::int("Count").with_default(10)).unwrap()
//! };
//! let points = tree
//!     .chain(count, NodeCall::new("GeometryNodePoints").input("count", Placeholder))
//!     .unwrap();
//! assert!(points.node().is_some());
//! ```

pub mod arithmetic;
pub mod arrange;
pub mod builder;
pub mod call;
pub mod catalog;
pub mod compat;
pub mod error;
pub mod export;
pub mod graph;
pub mod interface;
pub mod link;
pub mod node;
pub mod operand;
mod resolve;
pub mod scope;
pub mod settings;
pub mod socket;

pub use arithmetic::{MathArg, MathOp};
pub use arrange::{ArrangeHook, LayeredArrange, NoArrange};
pub use builder::{InterfaceScope, Scope, TreeBuilder, GROUP_NODE_TYPE};
pub use call::{Callee, ChainTarget, Input, NodeCall, Placeholder};
pub use catalog::geometry::create_geometry_catalog;
pub use catalog::Catalog;
pub use compat::CompatibilityTable;
pub use error::{BuildError, Result};
pub use export::{ExportError, GraphStats, GraphVisitor};
pub use graph::{Graph, GraphId};
pub use interface::{Interface, Terminal, TerminalId, TerminalSpec};
pub use link::{Endpoint, Link, LinkId};
pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeType, Variant};
pub use operand::{NodeRef, Operand, SocketRef, TerminalRef};
pub use scope::{GraphHandle, ScopeOptions};
pub use settings::{ArrangeSettings, BuilderSettings, ConfigError};
pub use socket::{Socket, SocketDirection, SocketKind, SocketValue};
