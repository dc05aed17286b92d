// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bundled demo trees.

use crate::args::Demo;
use nodeforge_graph::{
    ChainTarget, GraphHandle, NodeCall, Placeholder, Result, ScopeOptions, TerminalRef, TerminalSpec,
    TreeBuilder,
};

/// Build a demo tree, returning the outermost graph
pub fn build(builder: &mut TreeBuilder, demo: Demo) -> Result<GraphHandle> {
    tracing::debug!(?demo, "Building demo tree");
    let (tree, ()) = match demo {
        Demo::Instances => builder.scope("Instances", ScopeOptions::default(), instances)?,
        Demo::Math => builder.scope("Math", ScopeOptions::default(), math)?,
        Demo::MultiSocket => builder.scope("Multi Socket", ScopeOptions::default(), multi_socket)?,
    };
    Ok(tree)
}

/// Declare a geometry input and a geometry output
fn geometry_io(b: &mut TreeBuilder) -> Result<(TerminalRef, TerminalRef)> {
    let input = {
        let mut inputs = b.interface_inputs()?;
        inputs.declare(TerminalSpec::geometry("Geometry"))?
    };
    let output = {
        let mut outputs = b.interface_outputs()?;
        outputs.declare(TerminalSpec::geometry("Geometry"))?
    };
    Ok((input, output))
}

/// Group moving each instance by a small random offset
fn jitter(b: &mut TreeBuilder) -> Result<()> {
    let (geometry, seed) = {
        let mut inputs = b.interface_inputs()?;
        (
            inputs.declare(TerminalSpec::geometry("Geometry"))?,
            inputs.declare(TerminalSpec::int("Seed").with_description("Random seed"))?,
        )
    };
    let output = {
        let mut outputs = b.interface_outputs()?;
        outputs.declare(TerminalSpec::geometry("Geometry"))?
    };

    let offset = b.node(
        NodeCall::variant("FunctionNodeRandomValue", "vector")
            .input("min", (-0.1, -0.1, -0.1))
            .input("max", (0.1, 0.1, 0.1))
            .input("seed", seed),
    )?;
    b.chain_all(
        geometry,
        [
            ChainTarget::from(
                NodeCall::new("GeometryNodeTranslateInstances").input("translation", offset),
            ),
            output.into(),
        ],
    )?;
    Ok(())
}

fn instances(b: &mut TreeBuilder) -> Result<()> {
    let count = {
        let mut inputs = b.interface_inputs()?;
        inputs.declare(
            TerminalSpec::int("Count")
                .with_default(10)
                .with_range(1.0, 1000.0),
        )?
    };
    let output = {
        let mut outputs = b.interface_outputs()?;
        outputs.declare(TerminalSpec::geometry("Geometry"))?
    };

    let (jitter, ()) = b.scope("Jitter", ScopeOptions::default(), jitter)?;

    let scatter = b.node(
        NodeCall::variant("FunctionNodeRandomValue", "vector")
            .input("min", (-1.0, -1.0, 0.0))
            .input("max", (1.0, 1.0, 0.0)),
    )?;
    let points = b.chain(count, NodeCall::new("GeometryNodePoints").input("position", scatter))?;
    let cube = b.node(NodeCall::new("GeometryNodeMeshCube").input("size", 0.2))?;
    let instances = b.chain(
        points,
        NodeCall::new("GeometryNodeInstanceOnPoints")
            .input("points", Placeholder)
            .input("instance", cube),
    )?;
    b.chain_all(
        instances,
        [
            ChainTarget::from(NodeCall::group(jitter).input("seed", 7)),
            NodeCall::new("GeometryNodeRealizeInstances").into(),
            output.into(),
        ],
    )?;
    Ok(())
}

fn math(b: &mut TreeBuilder) -> Result<()> {
    let (geometry, output) = geometry_io(b)?;

    let position = b.node(NodeCall::new("GeometryNodeInputPosition"))?;
    let scaled = b.multiply(position, 2.0)?;
    let offset = b.add(scaled, (0.0, 0.2, 0.3))?;

    let index = b.node(NodeCall::new("GeometryNodeInputIndex"))?;
    let odd = b.node(
        NodeCall::variant("FunctionNodeIntegerMath", "modulo")
            .positional(index)
            .positional(2),
    )?;

    b.chain_all(
        geometry,
        [
            ChainTarget::from(
                NodeCall::new("GeometryNodeSetPosition")
                    .input("selection", odd)
                    .input("offset", offset),
            ),
            output.into(),
        ],
    )?;
    Ok(())
}

fn multi_socket(b: &mut TreeBuilder) -> Result<()> {
    let (geometry, output) = geometry_io(b)?;

    let profile = b.node(
        NodeCall::variant("GeometryNodeCurvePrimitiveCircle", "radius")
            .input("resolution", 8)
            .input("radius", 0.05),
    )?;
    let path = b.node(NodeCall::variant("GeometryNodeCurvePrimitiveCircle", "points"))?;
    let mesh = b.chain(
        path,
        NodeCall::new("GeometryNodeCurveToMesh").input("profile_curve", profile),
    )?;

    let bounds = b.node(NodeCall::new("GeometryNodeBoundBox"))?;
    b.chain(mesh, bounds)?;
    let (max, min) = (b.output(bounds, "Max")?, b.output(bounds, "Min")?);
    let extent = b.subtract(max, min)?;
    let size = b.node(NodeCall::variant("ShaderNodeVectorMath", "length").positional(extent))?;

    // Both placeholders receive the same random value
    let random = b.node(NodeCall::variant("FunctionNodeRandomValue", "float").input("seed", 3))?;
    let wobble = b.chain(
        random,
        NodeCall::variant("ShaderNodeMath", "multiply_add")
            .positional(Placeholder)
            .positional(0.5)
            .positional(Placeholder),
    )?;
    let center = b.output(path, "Center")?;
    let shift = b.multiply(center, wobble)?;

    b.chain_all(
        geometry,
        [
            ChainTarget::from(
                NodeCall::new("GeometryNodeTransform")
                    .input("translation", shift)
                    .input("scale", size),
            ),
            output.into(),
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeforge_graph::{create_geometry_catalog, GraphStats, GROUP_NODE_TYPE};

    fn stats(demo: Demo) -> (GraphStats, usize) {
        let mut builder = TreeBuilder::new(create_geometry_catalog());
        let tree = build(&mut builder, demo).unwrap();
        assert_eq!(builder.depth(), 0);
        let graph = builder.graph(tree).unwrap();
        assert!(graph.is_finalized());
        (GraphStats::collect(graph), builder.graphs().count())
    }

    #[test]
    fn test_instances_demo() {
        let (stats, graphs) = stats(Demo::Instances);
        assert_eq!(graphs, 2);
        assert_eq!(stats.node_types[GROUP_NODE_TYPE], 1);
        assert_eq!(stats.node_types["GeometryNodeInstanceOnPoints"], 1);
        assert_eq!(stats.terminals, 2);
    }

    #[test]
    fn test_math_demo() {
        let (stats, graphs) = stats(Demo::Math);
        assert_eq!(graphs, 1);
        assert_eq!(stats.node_types["ShaderNodeVectorMath"], 2);
        assert_eq!(stats.node_types["FunctionNodeIntegerMath"], 1);
    }

    #[test]
    fn test_multi_socket_demo() {
        let (stats, _) = stats(Demo::MultiSocket);
        assert_eq!(stats.node_types["ShaderNodeMath"], 1);
        assert_eq!(stats.node_types["GeometryNodeCurvePrimitiveCircle"], 2);
    }
}
