// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::graph::GraphId;
use crate::socket::{Socket, SocketDirection, SocketValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Field and constant inputs
    Input,
    /// Geometry operations
    Geometry,
    /// Mesh primitives
    Mesh,
    /// Curve operations
    Curve,
    /// Instance operations
    Instances,
    /// Point operations
    Point,
    /// Math and conversion
    Converter,
    /// Utility nodes
    Utility,
    /// Node groups
    Group,
}

/// Scalar property declared by a node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Default value, also fixes the property's value kind
    pub default: SocketValue,
    /// Allowed values for enum-like string properties (empty means any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl PropertyDef {
    /// Check that `value` is acceptable for this property
    pub fn accepts(&self, value: &SocketValue) -> bool {
        if value.kind() != self.default.kind() {
            return false;
        }
        match value.as_str() {
            Some(s) if !self.options.is_empty() => self.options.iter().any(|o| o == s),
            _ => true,
        }
    }
}

/// Named constructor preset of a node type (`Math.add`, `RandomValue.vector`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variant {
    /// Properties fixed by the variant
    pub properties: IndexMap<String, SocketValue>,
    /// Input identifiers filled by positional arguments, in order
    pub positional: Vec<String>,
}

impl Variant {
    /// Create a variant setting one property
    pub fn new(property: impl Into<String>, value: impl Into<SocketValue>) -> Self {
        let mut properties = IndexMap::new();
        properties.insert(property.into(), value.into());
        Self {
            properties,
            positional: Vec::new(),
        }
    }

    /// Set the positional argument order
    pub fn with_positional(mut self, inputs: &[&str]) -> Self {
        self.positional = inputs.iter().map(|i| (*i).to_string()).collect();
        self
    }
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique type tag
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
    /// Scalar properties
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDef>,
    /// Named constructor variants
    #[serde(default)]
    pub variants: IndexMap<String, Variant>,
}

impl NodeType {
    /// Create a node type without sockets
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: IndexMap::new(),
            variants: IndexMap::new(),
        }
    }

    /// Set the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an input socket
    pub fn input(mut self, socket: Socket) -> Self {
        self.inputs.push(Socket {
            direction: SocketDirection::Input,
            ..socket
        });
        self
    }

    /// Append an output socket
    pub fn output(mut self, socket: Socket) -> Self {
        self.outputs.push(Socket {
            direction: SocketDirection::Output,
            ..socket
        });
        self
    }

    /// Declare a scalar property
    pub fn property(mut self, name: impl Into<String>, default: impl Into<SocketValue>) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDef {
                default: default.into(),
                options: Vec::new(),
            },
        );
        self
    }

    /// Declare an enum-like string property
    pub fn enum_property(mut self, name: impl Into<String>, default: &str, options: &[&str]) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDef {
                default: SocketValue::from(default),
                options: options.iter().map(|o| (*o).to_string()).collect(),
            },
        );
        self
    }

    /// Declare a named variant
    pub fn variant(mut self, name: impl Into<String>, variant: Variant) -> Self {
        self.variants.insert(name.into(), variant);
        self
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node type tag
    pub node_type: String,
    /// Display name, unique within the graph
    pub name: String,
    /// Position set by the arrangement hook
    pub position: [f32; 2],
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
    /// Scalar property values
    pub properties: IndexMap<String, SocketValue>,
    /// Graph instantiated by a group node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GraphId>,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            node_type: node_type.id.clone(),
            name: name.into(),
            position: [0.0, 0.0],
            inputs: node_type.inputs.clone(),
            outputs: node_type.outputs.clone(),
            properties: node_type
                .properties
                .iter()
                .map(|(name, def)| (name.clone(), def.default.clone()))
                .collect(),
            group: None,
        }
    }

    /// Get an input socket by index
    pub fn input(&self, index: usize) -> Option<&Socket> {
        self.inputs.get(index)
    }

    /// Get an output socket by index
    pub fn output(&self, index: usize) -> Option<&Socket> {
        self.outputs.get(index)
    }

    /// Get the sockets of one direction
    pub fn sockets(&self, direction: SocketDirection) -> &[Socket] {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }

    /// Get a socket by direction and index
    pub fn socket(&self, direction: SocketDirection, index: usize) -> Option<&Socket> {
        self.sockets(direction).get(index)
    }

    /// Find a socket by identifier or name.
    ///
    /// When several sockets answer to the same name the first available one
    /// wins, falling back to the first match.
    pub fn find_socket(&self, direction: SocketDirection, key: &str) -> Option<usize> {
        let mut matching = self
            .sockets(direction)
            .iter()
            .enumerate()
            .filter(|(_, s)| s.matches(key))
            .peekable();
        let first = matching.peek().map(|(index, _)| *index);
        matching
            .find(|(_, s)| s.is_available(&self.properties))
            .map(|(index, _)| index)
            .or(first)
    }

    /// Whether a socket is active under the node's current properties
    pub fn is_available(&self, direction: SocketDirection, index: usize) -> bool {
        self.socket(direction, index)
            .is_some_and(|s| s.is_available(&self.properties))
    }

    /// Indices of the active sockets of one direction, in declaration order
    pub fn available(&self, direction: SocketDirection) -> impl Iterator<Item = usize> + '_ {
        self.sockets(direction)
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_available(&self.properties))
            .map(|(index, _)| index)
    }

    /// Index of the primary output: the first active one
    pub fn primary_output(&self) -> Option<usize> {
        self.available(SocketDirection::Output).next()
    }
}

/// Registry of available node types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRegistry {
    /// Registered node types by type tag
    types: IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by tag
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
