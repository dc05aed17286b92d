// SPDX-License-Identifier: MIT OR Apache-2.0
//! The tree builder: scope stack, node instantiation and chaining.
//!
//! A [`TreeBuilder`] owns every graph it creates together with the stack of
//! graphs under construction. All mutation happens against the top of the
//! stack:
//!
//! ```
//! use nodeforge_graph::{create_geometry_catalog, NodeCall, ScopeOptions, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new(create_geometry_catalog());
//! let (tree, _) = builder
//!     .scope("Points", ScopeOptions::default(), |b| {
//!         let points = b.node(NodeCall::new("GeometryNodePoints").input("count", 10))?;
//!         let position = b.node(NodeCall::new("GeometryNodeInputPosition"))?;
//!         let target = b.input(points, "position")?;
//!         b.chain(position, target)?;
//!         Ok(points)
//!     })
//!     .unwrap();
//! assert_eq!(builder.graph(tree).unwrap().link_count(), 1);
//! ```

use crate::arrange::{ArrangeHook, LayeredArrange, NoArrange};
use crate::call::{Callee, ChainTarget, Input, NodeCall};
use crate::catalog::Catalog;
use crate::error::{BuildError, Result};
use crate::graph::{Graph, GraphId};
use crate::interface::Terminal;
use crate::link::{Endpoint, LinkId};
use crate::node::{Node, NodeCategory, NodeType};
use crate::operand::{NodeRef, Operand, SocketRef};
use crate::resolve::{best_pair, best_placeholder_source, Candidate, Side};
use crate::scope::{GraphHandle, ScopeOptions, ScopeStack};
use crate::settings::BuilderSettings;
use crate::socket::{Socket, SocketDirection, SocketKind, SocketValue};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Type tag of nodes instantiating another graph
pub const GROUP_NODE_TYPE: &str = "GeometryNodeGroup";

/// A node that passed validation but is not in the graph yet
struct PendingNode {
    node: Node,
    links: Vec<(Endpoint, Endpoint)>,
    placeholders: Vec<usize>,
}

/// Builds node graphs against a stack of active scopes
pub struct TreeBuilder {
    catalog: Catalog,
    settings: BuilderSettings,
    graphs: IndexMap<GraphId, Graph>,
    pub(crate) stack: ScopeStack,
    arrange: Box<dyn ArrangeHook>,
}

impl fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("node_types", &self.catalog.registry.len())
            .field("graphs", &self.graphs.len())
            .field("depth", &self.stack.depth())
            .finish_non_exhaustive()
    }
}

impl TreeBuilder {
    /// Create a builder with default settings
    pub fn new(catalog: Catalog) -> Self {
        Self::with_settings(catalog, BuilderSettings::default())
    }

    /// Create a builder configured from settings
    pub fn with_settings(catalog: Catalog, settings: BuilderSettings) -> Self {
        let arrange: Box<dyn ArrangeHook> = if settings.arrange.enabled {
            Box::new(LayeredArrange::from_settings(&settings.arrange))
        } else {
            Box::new(NoArrange)
        };
        Self {
            catalog,
            settings,
            graphs: IndexMap::new(),
            stack: ScopeStack::new(),
            arrange,
        }
    }

    /// Replace the arrangement hook
    pub fn set_arrange_hook(&mut self, hook: impl ArrangeHook + 'static) {
        self.arrange = Box::new(hook);
    }

    /// Get the node catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the settings the builder was created with
    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Get a graph created by this builder
    pub fn graph(&self, handle: GraphHandle) -> Option<&Graph> {
        self.graphs.get(&handle.0)
    }

    /// Get all graphs, in creation order
    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graphs.values()
    }

    /// Consume the builder, returning its graphs
    pub fn into_graphs(self) -> IndexMap<GraphId, Graph> {
        self.graphs
    }

    /// Handle of the graph on top of the stack
    pub fn active_graph(&self) -> Option<GraphHandle> {
        self.stack.active().map(GraphHandle)
    }

    /// Number of open scopes
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn active(&self) -> Result<GraphId> {
        self.stack.active().ok_or(BuildError::NoActiveGraph)
    }

    pub(crate) fn graph_ref(&self, id: GraphId) -> Result<&Graph> {
        self.graphs.get(&id).ok_or(BuildError::NoActiveGraph)
    }

    pub(crate) fn graph_mut(&mut self, id: GraphId) -> Result<&mut Graph> {
        self.graphs.get_mut(&id).ok_or(BuildError::NoActiveGraph)
    }

    fn check_operand(&self, active: GraphId, operand: Operand) -> Result<()> {
        if operand.graph() == active {
            Ok(())
        } else {
            Err(BuildError::GraphMismatch {
                operand: operand.graph(),
                active,
            })
        }
    }

    // ------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------

    /// Create a graph and make it the active one
    pub fn enter(&mut self, name: impl Into<String>, options: ScopeOptions) -> GraphHandle {
        let graph = Graph::new(name);
        let id = graph.id;
        tracing::debug!(graph = %graph.name, depth = self.stack.depth() + 1, "Entered scope");
        self.graphs.insert(id, graph);
        self.stack.push(id, options);
        GraphHandle(id)
    }

    /// Create a graph named after the configured default
    pub fn enter_default(&mut self, options: ScopeOptions) -> GraphHandle {
        let name = self.settings.default_tree_name.clone();
        self.enter(name, options)
    }

    /// Leave the scope of `handle`, finalizing its graph.
    ///
    /// The arrangement hook runs when this was the outermost scope and its
    /// options ask for arrangement.
    pub fn exit(&mut self, handle: GraphHandle) -> Result<()> {
        let frame = self.stack.pop(handle.0)?;
        let outermost = self.stack.is_empty();
        let graph = self
            .graphs
            .get_mut(&handle.0)
            .ok_or(BuildError::NoActiveGraph)?;
        graph.finalize();

        if outermost {
            if frame.options.arrange {
                self.arrange.arrange(graph);
            }
            tracing::info!(
                graph = %graph.name,
                nodes = graph.node_count(),
                links = graph.link_count(),
                "Finalized node tree"
            );
        } else {
            tracing::debug!(graph = %graph.name, "Finalized nested graph");
        }
        Ok(())
    }

    /// Enter a scope released when the returned guard drops
    pub fn open(&mut self, name: impl Into<String>, options: ScopeOptions) -> Scope<'_> {
        let handle = self.enter(name, options);
        Scope {
            builder: self,
            handle,
            closed: false,
        }
    }

    /// Build a graph inside a closure, exiting its scope on every path
    pub fn scope<T>(
        &mut self,
        name: impl Into<String>,
        options: ScopeOptions,
        build: impl FnOnce(&mut TreeBuilder) -> Result<T>,
    ) -> Result<(GraphHandle, T)> {
        let mut scope = self.open(name, options);
        let value = build(&mut *scope)?;
        let handle = scope.close()?;
        Ok((handle, value))
    }

    /// Switch the active graph into interface mode for `direction`
    pub fn enter_interface_mode(&mut self, direction: SocketDirection) -> Result<()> {
        self.stack.enter_interface(direction)
    }

    /// Leave the innermost interface mode
    pub fn exit_interface_mode(&mut self) -> Result<SocketDirection> {
        self.stack.exit_interface()
    }

    /// Declare graph inputs until the guard drops
    pub fn interface_inputs(&mut self) -> Result<InterfaceScope<'_>> {
        self.enter_interface_mode(SocketDirection::Input)?;
        Ok(InterfaceScope { builder: self })
    }

    /// Declare graph outputs until the guard drops
    pub fn interface_outputs(&mut self) -> Result<InterfaceScope<'_>> {
        self.enter_interface_mode(SocketDirection::Output)?;
        Ok(InterfaceScope { builder: self })
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Instantiate a node in the active graph.
    ///
    /// Placeholder arguments keep their defaults outside a chain.
    pub fn node(&mut self, call: NodeCall) -> Result<NodeRef> {
        let graph_id = self.active()?;
        let pending = self.prepare(graph_id, call)?;
        self.commit(graph_id, pending, Vec::new())
    }

    /// Get an input socket of a node by identifier or name
    pub fn input(&self, node: NodeRef, name: &str) -> Result<SocketRef> {
        self.socket(node, SocketDirection::Input, name)
    }

    /// Get an output socket of a node by identifier or name
    pub fn output(&self, node: NodeRef, name: &str) -> Result<SocketRef> {
        self.socket(node, SocketDirection::Output, name)
    }

    fn socket(&self, node: NodeRef, direction: SocketDirection, name: &str) -> Result<SocketRef> {
        let instance = self
            .graphs
            .get(&node.graph)
            .and_then(|g| g.node(node.node))
            .ok_or_else(|| BuildError::InvalidOperand(format!("{node:?} is not a node of this builder")))?;
        let index = instance
            .find_socket(direction, name)
            .ok_or_else(|| BuildError::UnknownSocket {
                node_type: instance.node_type.clone(),
                direction,
                name: name.to_string(),
            })?;
        Ok(SocketRef {
            graph: node.graph,
            node: node.node,
            direction,
            index,
        })
    }

    fn group_type(&self, handle: GraphHandle) -> Result<NodeType> {
        if self.stack.contains(handle.0) {
            return Err(BuildError::GroupNotFinalized(handle.0));
        }
        let group = self
            .graphs
            .get(&handle.0)
            .ok_or_else(|| BuildError::InvalidOperand(format!("{handle:?} is not a graph of this builder")))?;
        if !group.is_finalized() {
            return Err(BuildError::GroupNotFinalized(handle.0));
        }

        let ty = group
            .inputs()
            .iter()
            .fold(
                NodeType::new(GROUP_NODE_TYPE, group.name.clone(), NodeCategory::Group),
                |ty, terminal| ty.input(terminal_socket(terminal)),
            );
        Ok(group
            .outputs()
            .iter()
            .fold(ty, |ty, terminal| ty.output(terminal_socket(terminal))))
    }

    fn prepare(&self, graph_id: GraphId, call: NodeCall) -> Result<PendingNode> {
        if self.stack.in_interface_mode() {
            return Err(BuildError::InvalidInterfaceContext {
                reason: "nodes cannot be created while declaring inputs or outputs",
            });
        }
        let graph = self.graph_ref(graph_id)?;
        let NodeCall {
            callee,
            positional,
            keyword,
            properties,
        } = call;

        let (ty, variant_name, group) = match callee {
            Callee::Catalog { node_type, variant } => {
                let ty = self
                    .catalog
                    .registry
                    .get(&node_type)
                    .ok_or(BuildError::UnknownNodeType(node_type))?;
                (Cow::Borrowed(ty), variant, None)
            }
            Callee::Group(handle) => (Cow::Owned(self.group_type(handle)?), None, Some(handle.0)),
        };
        let variant = match &variant_name {
            Some(name) => Some(ty.variants.get(name).ok_or_else(|| BuildError::UnknownVariant {
                node_type: ty.id.clone(),
                variant: name.clone(),
            })?),
            None => None,
        };

        let mut node = Node::new(&ty, graph.unique_node_name(&ty.name));
        node.group = group;
        if let Some(variant) = variant {
            for (name, value) in &variant.properties {
                apply_property(&ty, &mut node, name, value.clone())?;
            }
        }
        for (name, value) in properties {
            apply_property(&ty, &mut node, &name, value)?;
        }

        let slots: Vec<usize> = match variant {
            Some(variant) if !variant.positional.is_empty() => variant
                .positional
                .iter()
                .map(|key| {
                    node.find_socket(SocketDirection::Input, key)
                        .ok_or_else(|| unknown_input(&node, key))
                })
                .collect::<Result<_>>()?,
            _ => node.available(SocketDirection::Input).collect(),
        };
        if positional.len() > slots.len() {
            return Err(BuildError::TooManyArguments {
                node_type: node.node_type.clone(),
                accepted: slots.len(),
                given: positional.len(),
            });
        }

        let mut assignments: Vec<(usize, Input)> = slots.into_iter().zip(positional).collect();
        for (key, input) in keyword {
            let index = node
                .find_socket(SocketDirection::Input, &key)
                .ok_or_else(|| unknown_input(&node, &key))?;
            assignments.push((index, input));
        }

        let mut pending = PendingNode {
            node,
            links: Vec::new(),
            placeholders: Vec::new(),
        };
        for (index, input) in assignments {
            match input {
                Input::Value(value) => {
                    let socket = &mut pending.node.inputs[index];
                    let coerced = value.coerce_to(&socket.kind).ok_or_else(|| {
                        BuildError::InvalidValue {
                            target: format!("input '{}' of {}", socket.identifier, ty.id),
                            expected: socket.kind.clone(),
                            value: value.clone(),
                        }
                    })?;
                    socket.default_value = Some(coerced);
                }
                Input::Link(operand) => {
                    self.check_operand(graph_id, operand)?;
                    let socket = &pending.node.inputs[index];
                    if !socket.is_available(&pending.node.properties) {
                        return Err(BuildError::InactiveSocket {
                            node_type: ty.id.clone(),
                            socket: socket.identifier.clone(),
                        });
                    }
                    let to = Endpoint::Socket {
                        node: pending.node.id,
                        direction: SocketDirection::Input,
                        index,
                    };
                    let destination = Side::exact(
                        format!("{}.{}", pending.node.name, socket.name),
                        Candidate::new(to, socket.kind.clone()),
                    );
                    let sources = source_side(graph, operand)?;
                    let (si, _) = best_pair(&self.catalog.compatibility, &sources, &destination)
                        .ok_or_else(|| no_compatible(&sources, &destination))?;
                    // A later assignment to the same input replaces the earlier one
                    pending.links.retain(|(_, existing)| *existing != to);
                    pending.links.push((sources.candidates[si].endpoint, to));
                }
                Input::Placeholder => {
                    if !pending.placeholders.contains(&index) {
                        pending.placeholders.push(index);
                    }
                }
            }
        }

        Ok(pending)
    }

    fn commit(
        &mut self,
        graph_id: GraphId,
        pending: PendingNode,
        extra: Vec<(Endpoint, Endpoint)>,
    ) -> Result<NodeRef> {
        let graph = self.graph_mut(graph_id)?;
        tracing::debug!(
            graph = %graph.name,
            node = %pending.node.name,
            node_type = %pending.node.node_type,
            "Created node"
        );
        let node = graph.add_node(pending.node);
        for (from, to) in pending.links.into_iter().chain(extra) {
            connect(graph, from, to);
        }
        Ok(NodeRef {
            graph: graph_id,
            node,
        })
    }

    // ------------------------------------------------------------------
    // Chaining
    // ------------------------------------------------------------------

    /// Link `left` into `right` through the best compatible socket pair.
    ///
    /// Returns the right operand, or the new node when `right` is a call,
    /// so chains can continue from it.
    pub fn chain(
        &mut self,
        left: impl Into<Operand>,
        right: impl Into<ChainTarget>,
    ) -> Result<Operand> {
        let graph_id = self.active()?;
        let left = left.into();
        self.check_operand(graph_id, left)?;
        let graph = self.graph_ref(graph_id)?;
        let sources = source_side(graph, left)?;

        match right.into() {
            ChainTarget::Operand(right) => {
                self.check_operand(graph_id, right)?;
                let destinations = destination_side(graph, right)?;
                if let (Some(a), Some(b)) = (left.node(), right.node()) {
                    if a == b {
                        return Err(BuildError::SelfLink(sources.label));
                    }
                }
                let (si, di) = best_pair(&self.catalog.compatibility, &sources, &destinations)
                    .ok_or_else(|| no_compatible(&sources, &destinations))?;
                let from = sources.candidates[si].endpoint;
                let to = destinations.candidates[di].endpoint;
                connect(self.graph_mut(graph_id)?, from, to);
                Ok(right)
            }
            ChainTarget::Call(call) => {
                let pending = self.prepare(graph_id, call)?;
                let endpoint = |index| Endpoint::Socket {
                    node: pending.node.id,
                    direction: SocketDirection::Input,
                    index,
                };

                let links = if pending.placeholders.is_empty() {
                    let linked: HashSet<Endpoint> = pending.links.iter().map(|(_, to)| *to).collect();
                    let candidates = pending
                        .node
                        .available(SocketDirection::Input)
                        .filter(|index| !linked.contains(&endpoint(*index)))
                        .map(|index| Candidate::new(endpoint(index), pending.node.inputs[index].kind.clone()))
                        .collect();
                    let destinations = Side::open(pending.node.name.clone(), candidates);
                    let (si, di) = best_pair(&self.catalog.compatibility, &sources, &destinations)
                        .ok_or_else(|| no_compatible(&sources, &destinations))?;
                    vec![(sources.candidates[si].endpoint, destinations.candidates[di].endpoint)]
                } else {
                    let placeholders: Vec<Candidate> = pending
                        .placeholders
                        .iter()
                        .map(|&index| Candidate::new(endpoint(index), pending.node.inputs[index].kind.clone()))
                        .collect();
                    let si = best_placeholder_source(&self.catalog.compatibility, &sources, &placeholders)
                        .ok_or_else(|| {
                            no_compatible(&sources, &Side::open(pending.node.name.clone(), placeholders.clone()))
                        })?;
                    let from = sources.candidates[si].endpoint;
                    placeholders.iter().map(|p| (from, p.endpoint)).collect()
                };

                let node = self.commit(graph_id, pending, links)?;
                Ok(Operand::Node(node))
            }
        }
    }

    /// Chain `left` through every target in turn
    pub fn chain_all<T: Into<ChainTarget>>(
        &mut self,
        left: impl Into<Operand>,
        targets: impl IntoIterator<Item = T>,
    ) -> Result<Operand> {
        targets
            .into_iter()
            .try_fold(left.into(), |current, target| self.chain(current, target))
    }

    /// Link two exact endpoints (sockets or terminals)
    pub fn link(&mut self, from: impl Into<Operand>, to: impl Into<Operand>) -> Result<LinkId> {
        let graph_id = self.active()?;
        let (from, to) = (from.into(), to.into());
        self.check_operand(graph_id, from)?;
        self.check_operand(graph_id, to)?;
        if matches!(from, Operand::Node(_)) || matches!(to, Operand::Node(_)) {
            return Err(BuildError::InvalidOperand(
                "link needs a socket or terminal on both ends; use chain for nodes".into(),
            ));
        }

        let graph = self.graph_ref(graph_id)?;
        let sources = source_side(graph, from)?;
        let destinations = destination_side(graph, to)?;
        if let (Some(a), Some(b)) = (from.node(), to.node()) {
            if a == b {
                return Err(BuildError::SelfLink(sources.label));
            }
        }
        let (si, di) = best_pair(&self.catalog.compatibility, &sources, &destinations)
            .ok_or_else(|| no_compatible(&sources, &destinations))?;
        let (from, to) = (sources.candidates[si].endpoint, destinations.candidates[di].endpoint);
        Ok(connect(self.graph_mut(graph_id)?, from, to))
    }

    /// Kind of value an operand produces when used as a link source
    pub(crate) fn source_kind(&self, operand: Operand) -> Result<Option<SocketKind>> {
        let graph = self.graph_ref(operand.graph())?;
        let side = source_side(graph, operand)?;
        Ok(side.candidates.into_iter().next().map(|c| c.kind))
    }
}

/// Guard for an open builder scope.
///
/// Dereferences to the builder; the scope exits when the guard drops.
pub struct Scope<'b> {
    builder: &'b mut TreeBuilder,
    handle: GraphHandle,
    closed: bool,
}

impl Scope<'_> {
    /// Handle of the graph this scope builds
    pub fn handle(&self) -> GraphHandle {
        self.handle
    }

    /// Exit the scope, reporting failure instead of logging it
    ///
    /// On failure the frame stays open and the guard tries again when it
    /// drops.
    pub fn close(mut self) -> Result<GraphHandle> {
        self.builder.exit(self.handle)?;
        self.closed = true;
        Ok(self.handle)
    }
}

impl Deref for Scope<'_> {
    type Target = TreeBuilder;

    fn deref(&self) -> &TreeBuilder {
        self.builder
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut TreeBuilder {
        self.builder
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.builder.exit(self.handle) {
            tracing::warn!(graph = ?self.handle.id(), %err, "Failed to exit builder scope");
        }
    }
}

/// Guard for an open interface mode; declares terminals until dropped
pub struct InterfaceScope<'b> {
    builder: &'b mut TreeBuilder,
}

impl Deref for InterfaceScope<'_> {
    type Target = TreeBuilder;

    fn deref(&self) -> &TreeBuilder {
        self.builder
    }
}

impl DerefMut for InterfaceScope<'_> {
    fn deref_mut(&mut self) -> &mut TreeBuilder {
        self.builder
    }
}

impl Drop for InterfaceScope<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.builder.exit_interface_mode() {
            tracing::warn!(%err, "Failed to exit interface mode");
        }
    }
}

fn terminal_socket(terminal: &Terminal) -> Socket {
    let mut socket = Socket::new(terminal.name.clone(), terminal.kind.clone(), terminal.direction);
    socket.default_value = terminal.default_value.clone();
    socket
}

fn connect(graph: &mut Graph, from: Endpoint, to: Endpoint) -> LinkId {
    let (id, retired) = graph.connect(from, to);
    if let Some(retired) = retired {
        tracing::debug!(graph = %graph.name, link = ?retired.id, "Replaced existing link");
    }
    tracing::debug!(graph = %graph.name, ?from, ?to, "Linked sockets");
    id
}

fn apply_property(ty: &NodeType, node: &mut Node, name: &str, value: SocketValue) -> Result<()> {
    let def = ty
        .properties
        .get(name)
        .ok_or_else(|| BuildError::UnknownProperty {
            node_type: ty.id.clone(),
            property: name.to_string(),
        })?;
    let coerced = value
        .coerce_to(&def.default.kind())
        .filter(|v| def.accepts(v))
        .ok_or_else(|| BuildError::InvalidValue {
            target: format!("property '{name}' of {}", ty.id),
            expected: def.default.kind(),
            value,
        })?;
    node.properties.insert(name.to_string(), coerced);
    Ok(())
}

fn unknown_input(node: &Node, key: &str) -> BuildError {
    BuildError::UnknownSocket {
        node_type: node.node_type.clone(),
        direction: SocketDirection::Input,
        name: key.to_string(),
    }
}

fn no_compatible(sources: &Side, destinations: &Side) -> BuildError {
    BuildError::NoCompatibleSocket {
        source_label: sources.label.clone(),
        source_kinds: sources.kinds(),
        target_label: destinations.label.clone(),
        target_kinds: destinations.kinds(),
    }
}

fn find_node(graph: &Graph, node: NodeRef) -> Result<&Node> {
    graph
        .node(node.node)
        .ok_or_else(|| BuildError::InvalidOperand(format!("{node:?} is not a node of {}", graph.name)))
}

fn socket_candidate(graph: &Graph, socket: SocketRef) -> Result<(String, Candidate)> {
    let node = find_node(graph, socket.node_ref())?;
    let def = node.socket(socket.direction, socket.index).ok_or_else(|| {
        BuildError::InvalidOperand(format!("{} has no socket #{}", node.name, socket.index))
    })?;
    if !def.is_available(&node.properties) {
        return Err(BuildError::InactiveSocket {
            node_type: node.node_type.clone(),
            socket: def.identifier.clone(),
        });
    }
    Ok((
        format!("{}.{}", node.name, def.name),
        Candidate::new(socket.endpoint(), def.kind.clone()),
    ))
}

fn terminal_candidate(graph: &Graph, operand: Operand) -> Result<(String, Candidate, SocketDirection)> {
    let Operand::Terminal(terminal) = operand else {
        return Err(BuildError::InvalidOperand(format!("{operand:?} is not a terminal")));
    };
    let def = graph.interface().terminal(terminal.id).ok_or_else(|| {
        BuildError::InvalidOperand(format!("terminal {:?} is not declared on {}", terminal.id, graph.name))
    })?;
    Ok((
        format!("graph {} '{}'", def.direction.label(), def.name),
        Candidate::new(terminal.endpoint(), def.kind.clone()),
        def.direction,
    ))
}

/// Candidate outputs of an operand used on the left of a link
fn source_side(graph: &Graph, operand: Operand) -> Result<Side> {
    match operand {
        Operand::Node(node) => {
            let instance = find_node(graph, node)?;
            let candidates = instance
                .available(SocketDirection::Output)
                .map(|index| {
                    Candidate::new(
                        Endpoint::Socket {
                            node: node.node,
                            direction: SocketDirection::Output,
                            index,
                        },
                        instance.outputs[index].kind.clone(),
                    )
                })
                .collect();
            Ok(Side::open(instance.name.clone(), candidates))
        }
        Operand::Socket(socket) => {
            if socket.direction != SocketDirection::Output {
                return Err(BuildError::InvalidOperand(
                    "an input socket cannot be the source of a link".into(),
                ));
            }
            let (label, candidate) = socket_candidate(graph, socket)?;
            Ok(Side::exact(label, candidate))
        }
        Operand::Terminal(_) => {
            let (label, candidate, direction) = terminal_candidate(graph, operand)?;
            if direction != SocketDirection::Input {
                return Err(BuildError::InvalidOperand(format!(
                    "{label} cannot be the source of a link"
                )));
            }
            Ok(Side::exact(label, candidate))
        }
    }
}

/// Candidate inputs of an operand used on the right of a link
fn destination_side(graph: &Graph, operand: Operand) -> Result<Side> {
    match operand {
        Operand::Node(node) => {
            let instance = find_node(graph, node)?;
            let candidates = instance
                .available(SocketDirection::Input)
                .map(|index| {
                    (
                        Endpoint::Socket {
                            node: node.node,
                            direction: SocketDirection::Input,
                            index,
                        },
                        index,
                    )
                })
                .filter(|(endpoint, _)| !graph.is_linked(*endpoint))
                .map(|(endpoint, index)| Candidate::new(endpoint, instance.inputs[index].kind.clone()))
                .collect();
            Ok(Side::open(instance.name.clone(), candidates))
        }
        Operand::Socket(socket) => {
            if socket.direction != SocketDirection::Input {
                return Err(BuildError::InvalidOperand(
                    "an output socket cannot be the destination of a link".into(),
                ));
            }
            let (label, candidate) = socket_candidate(graph, socket)?;
            Ok(Side::exact(label, candidate))
        }
        Operand::Terminal(_) => {
            let (label, candidate, direction) = terminal_candidate(graph, operand)?;
            if direction != SocketDirection::Output {
                return Err(BuildError::InvalidOperand(format!(
                    "{label} cannot be the destination of a link"
                )));
            }
            Ok(Side::exact(label, candidate))
        }
    }
}
