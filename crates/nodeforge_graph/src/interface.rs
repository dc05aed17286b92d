// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph interface: the declared inputs and outputs of a graph.
//!
//! Terminals are declared while the builder is in interface mode
//! ([`TreeBuilder::interface_inputs`] / [`TreeBuilder::interface_outputs`]).
//! Inside the graph body an input terminal acts as a link source and an
//! output terminal as a link destination. Outside, they become the sockets
//! of a group node instantiating the graph.

use crate::builder::TreeBuilder;
use crate::error::{BuildError, Result};
use crate::operand::TerminalRef;
use crate::socket::{SocketDirection, SocketKind, SocketValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an interface terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalId(pub Uuid);

impl TerminalId {
    /// Create a new random terminal ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TerminalId {
    fn default() -> Self {
        Self::new()
    }
}

/// A declared input or output of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    /// Unique terminal ID
    pub id: TerminalId,
    /// Name, unique per direction
    pub name: String,
    /// Graph input or graph output
    pub direction: SocketDirection,
    /// Data kind
    pub kind: SocketKind,
    /// Default value used when the group input is left unlinked
    pub default_value: Option<SocketValue>,
    /// Tooltip text
    #[serde(default)]
    pub description: String,
    /// Soft minimum for numeric terminals
    pub min_value: Option<f32>,
    /// Soft maximum for numeric terminals
    pub max_value: Option<f32>,
    /// Hide the value field on the group node
    #[serde(default)]
    pub hide_value: bool,
}

/// Ordered inputs and outputs of a graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interface {
    /// Graph inputs, in declaration order
    pub inputs: Vec<Terminal>,
    /// Graph outputs, in declaration order
    pub outputs: Vec<Terminal>,
}

impl Interface {
    /// Get the terminals of one direction
    pub fn terminals(&self, direction: SocketDirection) -> &[Terminal] {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }

    /// Find a terminal by ID
    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .find(|t| t.id == id)
    }

    /// Find a terminal by name
    pub fn find(&self, direction: SocketDirection, name: &str) -> Option<&Terminal> {
        self.terminals(direction).iter().find(|t| t.name == name)
    }

    /// Append a terminal, rejecting duplicate names in the same direction
    pub fn push(&mut self, terminal: Terminal) -> Result<TerminalId> {
        if self.find(terminal.direction, &terminal.name).is_some() {
            return Err(BuildError::DuplicateInterfaceName {
                direction: terminal.direction,
                name: terminal.name,
            });
        }
        let id = terminal.id;
        match terminal.direction {
            SocketDirection::Input => self.inputs.push(terminal),
            SocketDirection::Output => self.outputs.push(terminal),
        }
        Ok(id)
    }
}

/// Description of a terminal to declare
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSpec {
    name: String,
    kind: SocketKind,
    default_value: Option<SocketValue>,
    description: String,
    min_value: Option<f32>,
    max_value: Option<f32>,
    hide_value: bool,
}

impl TerminalSpec {
    /// Describe a terminal of any kind
    pub fn new(name: impl Into<String>, kind: SocketKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
            description: String::new(),
            min_value: None,
            max_value: None,
            hide_value: false,
        }
    }

    /// Float terminal
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Float).with_default(0.0)
    }

    /// Integer terminal
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Int).with_default(0)
    }

    /// Boolean terminal
    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Bool).with_default(false)
    }

    /// Vector terminal
    pub fn vector(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Vector).with_default([0.0, 0.0, 0.0])
    }

    /// Color terminal
    pub fn color(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Color).with_default([1.0, 1.0, 1.0, 1.0])
    }

    /// Rotation terminal
    pub fn rotation(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Rotation).with_default(SocketValue::Rotation([0.0; 3]))
    }

    /// Matrix terminal
    pub fn matrix(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Matrix)
    }

    /// String terminal
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::String).with_default("")
    }

    /// Menu terminal
    pub fn menu(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Menu)
    }

    /// Object terminal
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Object)
    }

    /// Geometry terminal
    pub fn geometry(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Geometry)
    }

    /// Collection terminal
    pub fn collection(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Collection)
    }

    /// Image terminal
    pub fn image(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Image)
    }

    /// Material terminal
    pub fn material(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Material)
    }

    /// Bundle terminal
    pub fn bundle(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Bundle)
    }

    /// Closure terminal
    pub fn closure(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Closure)
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<SocketValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the tooltip
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the soft value range
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    /// Hide the value field on group nodes
    pub fn hide_value(mut self) -> Self {
        self.hide_value = true;
        self
    }

    /// Name of the terminal
    pub fn name(&self) -> &str {
        &self.name
    }

    fn into_terminal(self, direction: SocketDirection) -> Result<Terminal> {
        let default_value = match self.default_value {
            Some(value) => Some(value.coerce_to(&self.kind).ok_or_else(|| {
                BuildError::InvalidValue {
                    target: format!("interface {} '{}'", direction.label(), self.name),
                    expected: self.kind.clone(),
                    value: value.clone(),
                }
            })?),
            None => None,
        };

        Ok(Terminal {
            id: TerminalId::new(),
            name: self.name,
            direction,
            kind: self.kind,
            default_value,
            description: self.description,
            min_value: self.min_value,
            max_value: self.max_value,
            hide_value: self.hide_value,
        })
    }
}

impl TreeBuilder {
    /// Declare a terminal on the active graph.
    ///
    /// Only legal in interface mode; the direction comes from the innermost
    /// open interface scope.
    pub fn declare(&mut self, spec: TerminalSpec) -> Result<TerminalRef> {
        let frame = self.stack.top().ok_or(BuildError::NoActiveGraph)?;
        let graph_id = frame.graph;
        let direction = frame
            .interface_direction()
            .ok_or(BuildError::InvalidInterfaceContext {
                reason: "terminals can only be declared inside an inputs or outputs scope",
            })?;

        let terminal = spec.into_terminal(direction)?;
        let graph = self.graph_mut(graph_id)?;
        tracing::debug!(
            graph = %graph.name,
            terminal = %terminal.name,
            kind = %terminal.kind,
            direction = direction.label(),
            "Declared interface terminal"
        );
        let id = graph.interface_mut().push(terminal)?;

        Ok(TerminalRef {
            graph: graph_id,
            id,
            direction,
        })
    }
}
