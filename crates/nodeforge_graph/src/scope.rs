// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scope stack tracking the graph under construction.

use crate::error::{BuildError, Result};
use crate::graph::GraphId;
use crate::socket::SocketDirection;
use serde::{Deserialize, Serialize};

/// Handle to a graph created by [`crate::TreeBuilder::enter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphHandle(pub(crate) GraphId);

impl GraphHandle {
    /// Get the graph ID
    pub fn id(&self) -> GraphId {
        self.0
    }
}

/// Options for entering a builder scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeOptions {
    /// Run the arrangement hook when this scope is the outermost one to exit
    pub arrange: bool,
}

impl ScopeOptions {
    /// Options with arrangement disabled
    pub fn without_arrange() -> Self {
        Self { arrange: false }
    }
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self { arrange: true }
    }
}

/// One entry of the scope stack
#[derive(Debug, Clone)]
pub struct Frame {
    /// Graph being built
    pub graph: GraphId,
    /// Options the scope was entered with
    pub options: ScopeOptions,
    /// Open interface scopes, innermost last
    interface: Vec<SocketDirection>,
}

impl Frame {
    fn new(graph: GraphId, options: ScopeOptions) -> Self {
        Self {
            graph,
            options,
            interface: Vec::new(),
        }
    }

    /// Direction of the innermost open interface scope
    pub fn interface_direction(&self) -> Option<SocketDirection> {
        self.interface.last().copied()
    }

    /// Number of open interface scopes
    pub fn interface_depth(&self) -> usize {
        self.interface.len()
    }
}

/// Stack of active builder scopes
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new frame for `graph`
    pub fn push(&mut self, graph: GraphId, options: ScopeOptions) {
        self.frames.push(Frame::new(graph, options));
    }

    /// Pop the top frame, which must belong to `expected`
    pub fn pop(&mut self, expected: GraphId) -> Result<Frame> {
        let top = self.frames.last().ok_or(BuildError::NoActiveGraph)?;
        if top.graph != expected {
            return Err(BuildError::ScopeMismatch {
                expected,
                found: top.graph,
            });
        }
        self.frames.pop().ok_or(BuildError::NoActiveGraph)
    }

    /// Get the top frame
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Get the graph of the top frame
    pub fn active(&self) -> Option<GraphId> {
        self.frames.last().map(|f| f.graph)
    }

    /// Whether `graph` has a frame anywhere on the stack
    pub fn contains(&self, graph: GraphId) -> bool {
        self.frames.iter().any(|f| f.graph == graph)
    }

    /// Number of frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether no scope is active
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Open an interface scope on the top frame
    pub fn enter_interface(&mut self, direction: SocketDirection) -> Result<()> {
        let top = self.frames.last_mut().ok_or(BuildError::NoActiveGraph)?;
        top.interface.push(direction);
        Ok(())
    }

    /// Close the innermost interface scope of the top frame
    pub fn exit_interface(&mut self) -> Result<SocketDirection> {
        let top = self.frames.last_mut().ok_or(BuildError::NoActiveGraph)?;
        top.interface.pop().ok_or(BuildError::InvalidInterfaceContext {
            reason: "no inputs or outputs scope is open",
        })
    }

    /// Whether the top frame is in interface mode
    pub fn in_interface_mode(&self) -> bool {
        self.top().is_some_and(|f| f.interface_depth() > 0)
    }
}
