// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

impl SocketDirection {
    /// Lowercase label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// Data kind that can flow through sockets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketKind {
    /// Floating point value
    Float,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// 3D vector
    Vector,
    /// Color (RGBA)
    Color,
    /// Rotation (Euler or quaternion)
    Rotation,
    /// Matrix 4x4
    Matrix,
    /// String value
    String,
    /// Menu selection
    Menu,
    /// Object reference
    Object,
    /// Mesh, curve, point cloud, instances or volume data
    Geometry,
    /// Collection reference
    Collection,
    /// Image reference
    Image,
    /// Material reference
    Material,
    /// Bundle of several values
    Bundle,
    /// Closure
    Closure,
    /// Kind defined by an external catalog
    Custom(String),
}

impl SocketKind {
    /// Get the catalog name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Float => "FLOAT",
            Self::Int => "INT",
            Self::Bool => "BOOLEAN",
            Self::Vector => "VECTOR",
            Self::Color => "RGBA",
            Self::Rotation => "ROTATION",
            Self::Matrix => "MATRIX",
            Self::String => "STRING",
            Self::Menu => "MENU",
            Self::Object => "OBJECT",
            Self::Geometry => "GEOMETRY",
            Self::Collection => "COLLECTION",
            Self::Image => "IMAGE",
            Self::Material => "MATERIAL",
            Self::Bundle => "BUNDLE",
            Self::Closure => "CLOSURE",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value that can be stored in a socket or a node property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// 3D vector
    Vector([f32; 3]),
    /// Color
    Color([f32; 4]),
    /// Euler rotation
    Rotation([f32; 3]),
    /// String, also used for enum-like properties and menus
    String(String),
}

impl SocketValue {
    /// Get the socket kind for this value
    pub fn kind(&self) -> SocketKind {
        match self {
            Self::Bool(_) => SocketKind::Bool,
            Self::Int(_) => SocketKind::Int,
            Self::Float(_) => SocketKind::Float,
            Self::Vector(_) => SocketKind::Vector,
            Self::Color(_) => SocketKind::Color,
            Self::Rotation(_) => SocketKind::Rotation,
            Self::String(_) => SocketKind::String,
        }
    }

    /// Convert this value so it can be stored in a socket of `kind`.
    ///
    /// Scalars broadcast into vectors and colors, 3-tuples become rotations
    /// or opaque colors, strings fill menus. Returns `None` when no
    /// conversion exists.
    pub fn coerce_to(&self, kind: &SocketKind) -> Option<SocketValue> {
        if self.kind() == *kind {
            return Some(self.clone());
        }

        match (self, kind) {
            (Self::Int(v), SocketKind::Float) => Some(Self::Float(*v as f32)),
            (Self::Bool(v), SocketKind::Int) => Some(Self::Int(i32::from(*v))),
            (Self::Bool(v), SocketKind::Float) => Some(Self::Float(if *v { 1.0 } else { 0.0 })),
            (Self::Float(_) | Self::Int(_), SocketKind::Vector) => {
                self.as_scalar().map(|s| Self::Vector([s; 3]))
            }
            (Self::Float(_) | Self::Int(_), SocketKind::Rotation) => {
                self.as_scalar().map(|s| Self::Rotation([s; 3]))
            }
            (Self::Float(_) | Self::Int(_), SocketKind::Color) => {
                self.as_scalar().map(|s| Self::Color([s, s, s, 1.0]))
            }
            (Self::Vector(v), SocketKind::Rotation) => Some(Self::Rotation(*v)),
            (Self::Rotation(v), SocketKind::Vector) => Some(Self::Vector(*v)),
            (Self::Vector(v), SocketKind::Color) => Some(Self::Color([v[0], v[1], v[2], 1.0])),
            (Self::String(s), SocketKind::Menu) => Some(Self::String(s.clone())),
            _ => None,
        }
    }

    /// Scalar view of an int or float value
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// String view of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f32> for SocketValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for SocketValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for SocketValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<[f32; 3]> for SocketValue {
    fn from(value: [f32; 3]) -> Self {
        Self::Vector(value)
    }
}

impl From<(f32, f32, f32)> for SocketValue {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::Vector([x, y, z])
    }
}

impl From<[f32; 4]> for SocketValue {
    fn from(value: [f32; 4]) -> Self {
        Self::Color(value)
    }
}

impl From<(f32, f32, f32, f32)> for SocketValue {
    fn from((r, g, b, a): (f32, f32, f32, f32)) -> Self {
        Self::Color([r, g, b, a])
    }
}

impl From<&str> for SocketValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SocketValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Condition under which a socket is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// Property the socket depends on
    pub property: String,
    /// Property values for which the socket is active
    pub values: Vec<String>,
}

impl Availability {
    /// Check the condition against a node's properties
    pub fn is_met(&self, properties: &IndexMap<String, SocketValue>) -> bool {
        properties
            .get(&self.property)
            .and_then(SocketValue::as_str)
            .is_some_and(|current| self.values.iter().any(|v| v == current))
    }
}

/// A socket on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    /// Identifier, unique per direction on a node
    pub identifier: String,
    /// Display name (may repeat, e.g. the two "Value" inputs of Math)
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data kind
    pub kind: SocketKind,
    /// Default value (for unlinked inputs)
    pub default_value: Option<SocketValue>,
    /// Activation condition, `None` means always active
    pub available_when: Option<Availability>,
}

impl Socket {
    /// Create a new socket
    pub fn new(name: impl Into<String>, kind: SocketKind, direction: SocketDirection) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            name,
            direction,
            kind,
            default_value: None,
            available_when: None,
        }
    }

    /// Create a new input socket
    pub fn input(name: impl Into<String>, kind: SocketKind) -> Self {
        Self::new(name, kind, SocketDirection::Input)
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, kind: SocketKind) -> Self {
        Self::new(name, kind, SocketDirection::Output)
    }

    /// Override the identifier (used when display names repeat)
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<SocketValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Only activate the socket while `property` is one of `values`
    pub fn available_when(mut self, property: impl Into<String>, values: &[&str]) -> Self {
        self.available_when = Some(Availability {
            property: property.into(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
        });
        self
    }

    /// Whether the socket is active for the given node properties
    pub fn is_available(&self, properties: &IndexMap<String, SocketValue>) -> bool {
        self.available_when
            .as_ref()
            .map_or(true, |condition| condition.is_met(properties))
    }

    /// Check whether `key` addresses this socket.
    ///
    /// Matches the identifier, the display name, or the normalized form of
    /// either (`"Rotate By"` answers to `"rotate_by"`).
    pub fn matches(&self, key: &str) -> bool {
        self.identifier == key
            || self.name == key
            || normalize_name(&self.name) == key
            || normalize_name(&self.identifier) == key
    }
}

/// Convert `"Geometry"` or `"My Socket"` to `"geometry"` or `"my_socket"`.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
