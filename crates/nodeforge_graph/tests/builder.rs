// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the tree builder API.

use nodeforge_graph::{
    create_geometry_catalog, ArrangeHook, BuildError, Endpoint, Graph, NodeCall, NodeRef, Operand,
    Placeholder, ScopeOptions, SocketDirection, SocketValue, TerminalSpec, TreeBuilder,
    GROUP_NODE_TYPE,
};
use std::cell::Cell;
use std::rc::Rc;

fn builder() -> TreeBuilder {
    TreeBuilder::new(create_geometry_catalog())
}

fn input(node: NodeRef, index: usize) -> Endpoint {
    Endpoint::Socket {
        node: node.node,
        direction: SocketDirection::Input,
        index,
    }
}

fn node_of(operand: Operand) -> NodeRef {
    operand.node().expect("operand is a node")
}

/// Counts arrangement passes
struct CountingArrange(Rc<Cell<usize>>);

impl ArrangeHook for CountingArrange {
    fn arrange(&mut self, _graph: &mut Graph) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn test_terminal_chains_into_count() {
    let mut b = builder();
    let mut tree = b.open("Scatter", ScopeOptions::default());
    let count = {
        let mut inputs = tree.interface_inputs().unwrap();
        inputs.declare(TerminalSpec::int("Count").with_default(10)).unwrap()
    };
    let position = tree.node(NodeCall::new("GeometryNodeInputPosition")).unwrap();
    let points = tree
        .chain(count, NodeCall::new("GeometryNodePoints").input("position", position))
        .unwrap();
    let points = node_of(points);

    let graph = tree.graph(tree.handle()).unwrap();
    let link = graph.link_to(input(points, 0)).expect("Count is linked");
    assert_eq!(link.from, Endpoint::Terminal(count.id));
    assert!(graph.is_linked(input(points, 1)));
    assert_eq!(graph.link_count(), 2);
}

#[test]
fn test_chain_picks_first_exact_match() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let position = tree.node(NodeCall::new("GeometryNodeInputPosition")).unwrap();
    let set = node_of(tree.chain(position, NodeCall::new("GeometryNodeSetPosition")).unwrap());

    // Position and Offset are both vectors; declaration order decides
    let graph = tree.graph(tree.handle()).unwrap();
    assert!(graph.is_linked(input(set, 2)));
    assert!(!graph.is_linked(input(set, 3)));
}

#[test]
fn test_chain_is_deterministic() {
    let endpoints = || {
        let mut b = builder();
        let mut tree = b.open("Tree", ScopeOptions::default());
        let index = tree.node(NodeCall::new("GeometryNodeInputIndex")).unwrap();
        let set = node_of(tree.chain(index, NodeCall::new("GeometryNodeSetPosition")).unwrap());
        let graph = tree.graph(tree.handle()).unwrap();
        (0..4)
            .filter(|i| graph.is_linked(input(set, *i)))
            .collect::<Vec<_>>()
    };
    let first = endpoints();
    assert_eq!(first, vec![1]);
    for _ in 0..5 {
        assert_eq!(endpoints(), first);
    }
}

#[test]
fn test_placeholder_receives_link() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let index = tree.node(NodeCall::new("GeometryNodeInputIndex")).unwrap();
    let math = node_of(
        tree.chain(
            index,
            NodeCall::new("ShaderNodeMath")
                .positional(0.25)
                .positional(Placeholder),
        )
        .unwrap(),
    );

    let graph = tree.graph(tree.handle()).unwrap();
    assert!(!graph.is_linked(input(math, 0)));
    assert!(graph.is_linked(input(math, 1)));
    let node = graph.node(math.node).unwrap();
    assert_eq!(node.inputs[0].default_value, Some(SocketValue::Float(0.25)));
}

#[test]
fn test_placeholder_outside_chain_keeps_default() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let math = tree
        .node(NodeCall::new("ShaderNodeMath").positional(Placeholder))
        .unwrap();

    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.link_count(), 0);
    let node = graph.node(math.node).unwrap();
    assert_eq!(node.inputs[0].default_value, Some(SocketValue::Float(0.5)));
}

#[test]
fn test_keyword_link_replaces_positional() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let first = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let second = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let math = tree
        .node(
            NodeCall::new("ShaderNodeMath")
                .positional(first)
                .input("value", second),
        )
        .unwrap();

    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.link_count(), 1);
    let link = graph.link_to(input(math, 0)).unwrap();
    assert_eq!(link.from.node(), Some(second.node));
}

#[test]
fn test_relinking_input_retires_old_link() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let first = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let second = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let math = tree.node(NodeCall::new("ShaderNodeMath")).unwrap();
    let target = tree.input(math, "Value").unwrap();

    let value = tree.output(first, "Value").unwrap();
    tree.link(value, target).unwrap();
    let value = tree.output(second, "Value").unwrap();
    tree.link(value, target).unwrap();

    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.link_count(), 1);
    assert_eq!(graph.link_to(target.endpoint()).unwrap().from.node(), Some(second.node));
}

#[test]
fn test_incompatible_chain_leaves_graph_untouched() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let cube = tree.node(NodeCall::new("GeometryNodeMeshCube")).unwrap();
    let mesh = tree.output(cube, "Mesh").unwrap();
    let before = tree.graph(tree.handle()).unwrap().node_count();

    let err = tree
        .chain(mesh, NodeCall::new("FunctionNodeBooleanMath"))
        .unwrap_err();
    assert!(matches!(err, BuildError::NoCompatibleSocket { .. }));

    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.node_count(), before);
    assert_eq!(graph.link_count(), 0);
}

#[test]
fn test_inactive_output_is_rejected() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let circle = tree
        .node(NodeCall::variant("GeometryNodeCurvePrimitiveCircle", "radius"))
        .unwrap();
    let center = tree.output(circle, "Center").unwrap();

    let err = tree
        .chain(center, NodeCall::new("GeometryNodeSetPosition"))
        .unwrap_err();
    assert!(matches!(err, BuildError::InactiveSocket { .. }));
}

#[test]
fn test_unknown_names_are_reported() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    assert!(matches!(
        tree.node(NodeCall::new("GeometryNodeTeapot")),
        Err(BuildError::UnknownNodeType(_))
    ));
    assert!(matches!(
        tree.node(NodeCall::variant("ShaderNodeMath", "teapot")),
        Err(BuildError::UnknownVariant { .. })
    ));
    assert!(matches!(
        tree.node(NodeCall::new("ShaderNodeMath").input("teapot", 1.0)),
        Err(BuildError::UnknownSocket { .. })
    ));
    assert!(matches!(
        tree.node(NodeCall::new("ShaderNodeValue").positional(1.0)),
        Err(BuildError::TooManyArguments { .. })
    ));
    assert_eq!(tree.graph(tree.handle()).unwrap().node_count(), 0);
}

#[test]
fn test_node_outside_scope_fails() {
    let mut b = builder();
    assert_eq!(
        b.node(NodeCall::new("ShaderNodeValue")).unwrap_err(),
        BuildError::NoActiveGraph
    );
}

#[test]
fn test_nodes_blocked_in_interface_mode() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let mut inputs = tree.interface_inputs().unwrap();
    inputs.declare(TerminalSpec::float("Scale")).unwrap();
    assert!(matches!(
        inputs.node(NodeCall::new("ShaderNodeValue")),
        Err(BuildError::InvalidInterfaceContext { .. })
    ));
    assert!(matches!(
        inputs.declare(TerminalSpec::float("Scale")),
        Err(BuildError::DuplicateInterfaceName { .. })
    ));
}

#[test]
fn test_exit_order_is_enforced() {
    let mut b = builder();
    let outer = b.enter("Outer", ScopeOptions::default());
    let inner = b.enter("Inner", ScopeOptions::default());

    assert!(matches!(b.exit(outer), Err(BuildError::ScopeMismatch { .. })));
    assert_eq!(b.depth(), 2);

    b.exit(inner).unwrap();
    b.exit(outer).unwrap();
    assert_eq!(b.exit(outer).unwrap_err(), BuildError::NoActiveGraph);
}

#[test]
fn test_operand_from_outer_graph_is_rejected() {
    let mut b = builder();
    let outer = b.enter("Outer", ScopeOptions::default());
    let value = b.node(NodeCall::new("ShaderNodeValue")).unwrap();

    let inner = b.enter("Inner", ScopeOptions::default());
    let err = b.chain(value, NodeCall::new("ShaderNodeMath")).unwrap_err();
    assert!(matches!(err, BuildError::GraphMismatch { .. }));

    b.exit(inner).unwrap();
    b.exit(outer).unwrap();
}

#[test]
fn test_group_requires_finalized_graph() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let mut group = tree.open("Group", ScopeOptions::default());
    let handle = group.handle();
    assert_eq!(
        group.node(NodeCall::group(handle)).unwrap_err(),
        BuildError::GroupNotFinalized(handle.id())
    );
}

#[test]
fn test_group_node_mirrors_interface() {
    let mut b = builder();
    let (_, group_node) = b
        .scope("Tree", ScopeOptions::default(), |b| {
            let (group, ()) = b.scope("Offset", ScopeOptions::default(), |b| {
                let (geometry, offset) = {
                    let mut inputs = b.interface_inputs()?;
                    (
                        inputs.declare(TerminalSpec::geometry("Geometry"))?,
                        inputs.declare(TerminalSpec::vector("Offset"))?,
                    )
                };
                let output = {
                    let mut outputs = b.interface_outputs()?;
                    outputs.declare(TerminalSpec::geometry("Geometry"))?
                };
                let set = b.chain(
                    geometry,
                    NodeCall::new("GeometryNodeSetPosition").input("offset", offset),
                )?;
                b.chain(set, output)?;
                Ok(())
            })?;
            b.node(NodeCall::group(group).input("offset", (0.0, 0.0, 1.0)))
        })
        .unwrap();

    let graph = b.graphs().find(|g| g.name == "Tree").unwrap();
    let node = graph.node(group_node.node).unwrap();
    assert_eq!(node.node_type, GROUP_NODE_TYPE);
    assert_eq!(node.inputs.len(), 2);
    assert_eq!(node.outputs.len(), 1);
    assert_eq!(node.inputs[1].default_value, Some(SocketValue::Vector([0.0, 0.0, 1.0])));
}

#[test]
fn test_arrange_runs_once_on_outermost_exit() {
    let passes = Rc::new(Cell::new(0));
    let mut b = builder();
    b.set_arrange_hook(CountingArrange(Rc::clone(&passes)));

    b.scope("Tree", ScopeOptions::default(), |b| {
        b.scope("Group", ScopeOptions::default(), |_| Ok(()))?;
        assert_eq!(passes.get(), 0);
        Ok(())
    })
    .unwrap();
    assert_eq!(passes.get(), 1);

    b.scope("Plain", ScopeOptions::without_arrange(), |_| Ok(()))
        .unwrap();
    assert_eq!(passes.get(), 1);
}

#[test]
fn test_dropped_scope_finalizes_graph() {
    let mut b = builder();
    let handle = {
        let tree = b.open("Tree", ScopeOptions::default());
        tree.handle()
    };
    assert_eq!(b.depth(), 0);
    assert!(b.graph(handle).unwrap().is_finalized());
}

#[test]
fn test_arithmetic_builds_math_nodes() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let value = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let product = tree.multiply(value, 2.0).unwrap();
    let sum = tree.add(product, 1.0).unwrap();

    let graph = tree.graph(tree.handle()).unwrap();
    let node = graph.node(node_of(sum).node).unwrap();
    assert_eq!(node.node_type, "ShaderNodeMath");
    assert_eq!(node.properties["operation"], SocketValue::from("ADD"));
    assert_eq!(graph.link_count(), 2);
}

#[test]
fn test_vector_expression_wiring() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let position = tree.node(NodeCall::new("GeometryNodeInputPosition")).unwrap();
    let scaled = tree.multiply(position, 2.0).unwrap();
    let offset = tree.add(scaled, (0.0, 0.2, 0.3)).unwrap();
    let (multiply, add) = (node_of(scaled), node_of(offset));
    let position_out = tree.primary_output(position).unwrap().endpoint();
    let scaled_out = tree.primary_output(multiply).unwrap().endpoint();

    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.link_count(), 2);

    let node = graph.node(multiply.node).unwrap();
    assert_eq!(node.node_type, "ShaderNodeVectorMath");
    assert_eq!(node.properties["operation"], SocketValue::from("SCALE"));
    assert_eq!(graph.link_to(input(multiply, 0)).unwrap().from, position_out);
    assert_eq!(node.inputs[3].identifier, "Scale");
    assert_eq!(node.inputs[3].default_value, Some(SocketValue::Float(2.0)));

    let node = graph.node(add.node).unwrap();
    assert_eq!(node.properties["operation"], SocketValue::from("ADD"));
    assert_eq!(graph.link_to(input(add, 0)).unwrap().from, scaled_out);
    assert_eq!(node.inputs[1].identifier, "Vector_001");
    assert_eq!(
        node.inputs[1].default_value,
        Some(SocketValue::Vector([0.0, 0.2, 0.3]))
    );
}

#[test]
fn test_placeholder_keeps_keyword_links() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let a = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let other = tree.node(NodeCall::new("ShaderNodeValue")).unwrap();
    let math = node_of(
        tree.chain(
            a,
            NodeCall::new("ShaderNodeMath")
                .input("Value", Placeholder)
                .input("Value_001", other),
        )
        .unwrap(),
    );

    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.link_count(), 2);
    assert_eq!(graph.link_to(input(math, 0)).unwrap().from.node(), Some(a.node));
    assert_eq!(graph.link_to(input(math, 1)).unwrap().from.node(), Some(other.node));
}

#[test]
fn test_placeholders_share_one_source() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let random = tree
        .node(NodeCall::variant("FunctionNodeRandomValue", "float"))
        .unwrap();
    let fma = node_of(
        tree.chain(
            random,
            NodeCall::variant("ShaderNodeMath", "multiply_add")
                .positional(Placeholder)
                .positional(0.5)
                .positional(Placeholder),
        )
        .unwrap(),
    );

    let graph = tree.graph(tree.handle()).unwrap();
    let first = graph.link_to(input(fma, 0)).unwrap().from;
    let third = graph.link_to(input(fma, 2)).unwrap().from;
    assert_eq!(first, third);
    assert_eq!(first.node(), Some(random.node));
    assert!(!graph.is_linked(input(fma, 1)));
    assert_eq!(graph.link_count(), 2);
}

#[test]
fn test_explicit_sockets_link_as_written() {
    let mut b = builder();
    let mut tree = b.open("Tree", ScopeOptions::default());
    let cube = tree.node(NodeCall::new("GeometryNodeMeshCube")).unwrap();
    let mesh = tree.output(cube, "Mesh").unwrap();
    let math = tree
        .node(NodeCall::new("ShaderNodeMath").input("value", mesh))
        .unwrap();

    // Geometry has no conversion to Float; explicit endpoints are trusted
    let graph = tree.graph(tree.handle()).unwrap();
    assert_eq!(graph.link_to(input(math, 0)).unwrap().from, mesh.endpoint());
}

#[test]
fn test_failed_close_keeps_frame_open() {
    let mut b = builder();
    let mut tree = b.open("Outer", ScopeOptions::default());
    let outer = tree.handle();
    let inner = tree.enter("Inner", ScopeOptions::default());

    assert!(matches!(tree.close(), Err(BuildError::ScopeMismatch { .. })));
    assert_eq!(b.depth(), 2);
    assert!(!b.graph(outer).unwrap().is_finalized());

    b.exit(inner).unwrap();
    b.exit(outer).unwrap();
    assert_eq!(b.depth(), 0);
    assert!(b.graph(outer).unwrap().is_finalized());
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scopes_nest_and_unwind(depth in 1usize..8) {
            let mut b = builder();
            let handles: Vec<_> = (0..depth)
                .map(|i| b.enter(format!("Graph {i}"), ScopeOptions::default()))
                .collect();
            prop_assert_eq!(b.depth(), depth);
            prop_assert_eq!(b.active_graph(), handles.last().copied());

            for (i, handle) in handles.iter().enumerate().rev() {
                prop_assert_eq!(b.active_graph(), Some(*handle));
                b.exit(*handle).unwrap();
                prop_assert_eq!(b.depth(), i);
                prop_assert!(b.graph(*handle).unwrap().is_finalized());
            }
            prop_assert_eq!(b.active_graph(), None);
        }

        #[test]
        fn each_input_has_one_source(
            links in proptest::collection::vec((0usize..4, 0usize..2), 1..20)
        ) {
            let mut b = builder();
            let mut tree = b.open("Tree", ScopeOptions::default());
            let values: Vec<_> = (0..4)
                .map(|_| tree.node(NodeCall::new("ShaderNodeValue")).unwrap())
                .collect();
            let math = tree.node(NodeCall::new("ShaderNodeMath")).unwrap();

            let mut last = [None; 2];
            for (source, slot) in &links {
                let from = tree.output(values[*source], "Value").unwrap();
                let key = ["Value", "Value_001"][*slot];
                let to = tree.input(math, key).unwrap();
                tree.link(from, to).unwrap();
                last[*slot] = Some(values[*source].node);
            }

            let graph = tree.graph(tree.handle()).unwrap();
            let expected = last.iter().filter(|s| s.is_some()).count();
            prop_assert_eq!(graph.link_count(), expected);
            for (slot, source) in last.iter().enumerate() {
                prop_assert_eq!(graph.link_to(input(math, slot)).and_then(|l| l.from.node()), *source);
            }
        }
    }
}
