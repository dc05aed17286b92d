// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bundled geometry node catalog.
//!
//! A representative subset of the geometry node editor: primitives, point
//! and instance operations, field inputs, rotation utilities and the math
//! nodes used for arithmetic. Larger catalogs are loaded from RON with
//! [`Catalog::load`].

use super::Catalog;
use crate::compat::CompatibilityTable;
use crate::node::{NodeCategory, NodeRegistry, NodeType, Variant};
use crate::socket::{Socket, SocketKind, SocketValue};

/// Math operations taking two operands
const MATH_BINARY: &[&str] = &[
    "ADD",
    "SUBTRACT",
    "MULTIPLY",
    "DIVIDE",
    "MULTIPLY_ADD",
    "POWER",
    "MINIMUM",
    "MAXIMUM",
    "MODULO",
    "COMPARE",
    "SMOOTH_MIN",
    "SMOOTH_MAX",
    "WRAP",
];

/// Math operations taking a third operand
const MATH_TERNARY: &[&str] = &["MULTIPLY_ADD", "COMPARE", "SMOOTH_MIN", "SMOOTH_MAX", "WRAP"];

/// Create the bundled geometry node catalog
pub fn create_geometry_catalog() -> Catalog {
    Catalog::new(create_geometry_registry(), CompatibilityTable::geometry_nodes())
}

/// Create the geometry node registry with all bundled node types
pub fn create_geometry_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Geometry
    // ========================================================================

    registry.register(
        NodeType::new("GeometryNodeSetPosition", "Set Position", NodeCategory::Geometry)
            .describe("Set the location of each point")
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .input(Socket::input("Selection", SocketKind::Bool).with_default(true))
            .input(Socket::input("Position", SocketKind::Vector))
            .input(Socket::input("Offset", SocketKind::Vector).with_default([0.0, 0.0, 0.0]))
            .output(Socket::output("Geometry", SocketKind::Geometry)),
    );

    registry.register(
        NodeType::new("GeometryNodeTransform", "Transform Geometry", NodeCategory::Geometry)
            .describe("Translate, rotate or scale the geometry")
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .input(Socket::input("Translation", SocketKind::Vector).with_default([0.0, 0.0, 0.0]))
            .input(
                Socket::input("Rotation", SocketKind::Rotation)
                    .with_default(SocketValue::Rotation([0.0; 3])),
            )
            .input(Socket::input("Scale", SocketKind::Vector).with_default([1.0, 1.0, 1.0]))
            .output(Socket::output("Geometry", SocketKind::Geometry)),
    );

    registry.register(
        NodeType::new("GeometryNodeAttributeDomainSize", "Domain Size", NodeCategory::Geometry)
            .describe("Number of elements in each domain of a geometry component")
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .output(Socket::output("Point Count", SocketKind::Int))
            .output(Socket::output("Edge Count", SocketKind::Int).available_when("component", &["MESH"]))
            .output(Socket::output("Face Count", SocketKind::Int).available_when("component", &["MESH"]))
            .output(
                Socket::output("Spline Count", SocketKind::Int).available_when("component", &["CURVE"]),
            )
            .output(
                Socket::output("Instance Count", SocketKind::Int)
                    .available_when("component", &["INSTANCES"]),
            )
            .enum_property("component", "MESH", &["MESH", "POINTCLOUD", "CURVE", "INSTANCES"]),
    );

    registry.register(
        NodeType::new("GeometryNodeBoundBox", "Bounding Box", NodeCategory::Geometry)
            .describe("Box enclosing the geometry")
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .output(Socket::output("Bounding Box", SocketKind::Geometry))
            .output(Socket::output("Min", SocketKind::Vector))
            .output(Socket::output("Max", SocketKind::Vector)),
    );

    // ========================================================================
    // Mesh and Curve Primitives
    // ========================================================================

    registry.register(
        NodeType::new("GeometryNodeMeshCube", "Cube", NodeCategory::Mesh)
            .describe("Cuboid mesh with subdivided faces")
            .input(Socket::input("Size", SocketKind::Vector).with_default([1.0, 1.0, 1.0]))
            .input(Socket::input("Vertices X", SocketKind::Int).with_default(2))
            .input(Socket::input("Vertices Y", SocketKind::Int).with_default(2))
            .input(Socket::input("Vertices Z", SocketKind::Int).with_default(2))
            .output(Socket::output("Mesh", SocketKind::Geometry))
            .output(Socket::output("UV Map", SocketKind::Vector)),
    );

    registry.register(
        NodeType::new("GeometryNodeMeshToPoints", "Mesh to Points", NodeCategory::Mesh)
            .describe("Point cloud from the elements of a mesh")
            .input(Socket::input("Mesh", SocketKind::Geometry))
            .input(Socket::input("Selection", SocketKind::Bool).with_default(true))
            .input(Socket::input("Position", SocketKind::Vector))
            .input(Socket::input("Radius", SocketKind::Float).with_default(0.05))
            .output(Socket::output("Points", SocketKind::Geometry))
            .enum_property("mode", "VERTICES", &["VERTICES", "EDGES", "FACES", "CORNERS"]),
    );

    registry.register(
        NodeType::new("GeometryNodeCurvePrimitiveCircle", "Curve Circle", NodeCategory::Curve)
            .describe("Circle curve from a radius or three points")
            .input(Socket::input("Resolution", SocketKind::Int).with_default(32))
            .input(
                Socket::input("Point 1", SocketKind::Vector)
                    .with_default([-1.0, 0.0, 0.0])
                    .available_when("mode", &["POINTS"]),
            )
            .input(
                Socket::input("Point 2", SocketKind::Vector)
                    .with_default([0.0, 1.0, 0.0])
                    .available_when("mode", &["POINTS"]),
            )
            .input(
                Socket::input("Point 3", SocketKind::Vector)
                    .with_default([1.0, 0.0, 0.0])
                    .available_when("mode", &["POINTS"]),
            )
            .input(
                Socket::input("Radius", SocketKind::Float)
                    .with_default(1.0)
                    .available_when("mode", &["RADIUS"]),
            )
            .output(Socket::output("Curve", SocketKind::Geometry))
            .output(Socket::output("Center", SocketKind::Vector).available_when("mode", &["POINTS"]))
            .enum_property("mode", "RADIUS", &["RADIUS", "POINTS"])
            .variant("radius", Variant::new("mode", "RADIUS"))
            .variant("points", Variant::new("mode", "POINTS")),
    );

    registry.register(
        NodeType::new("GeometryNodeCurveToMesh", "Curve to Mesh", NodeCategory::Curve)
            .describe("Sweep a profile along curves")
            .input(Socket::input("Curve", SocketKind::Geometry))
            .input(Socket::input("Profile Curve", SocketKind::Geometry))
            .input(Socket::input("Fill Caps", SocketKind::Bool).with_default(false))
            .output(Socket::output("Mesh", SocketKind::Geometry)),
    );

    registry.register(
        NodeType::new("GeometryNodePointsToCurves", "Points to Curves", NodeCategory::Curve)
            .describe("Join points into curves by group")
            .input(Socket::input("Points", SocketKind::Geometry))
            .input(Socket::input("Curve Group ID", SocketKind::Int).with_default(0))
            .input(Socket::input("Weight", SocketKind::Float).with_default(0.0))
            .output(Socket::output("Curves", SocketKind::Geometry)),
    );

    // ========================================================================
    // Points and Instances
    // ========================================================================

    registry.register(
        NodeType::new("GeometryNodePoints", "Points", NodeCategory::Point)
            .describe("Point cloud with a given number of points")
            .input(Socket::input("Count", SocketKind::Int).with_default(1))
            .input(Socket::input("Position", SocketKind::Vector).with_default([0.0, 0.0, 0.0]))
            .input(Socket::input("Radius", SocketKind::Float).with_default(0.1))
            .output(Socket::output("Points", SocketKind::Geometry)),
    );

    registry.register(
        NodeType::new("GeometryNodeInstanceOnPoints", "Instance on Points", NodeCategory::Instances)
            .describe("Place an instance of a geometry on each point")
            .input(Socket::input("Points", SocketKind::Geometry))
            .input(Socket::input("Selection", SocketKind::Bool).with_default(true))
            .input(Socket::input("Instance", SocketKind::Geometry))
            .input(Socket::input("Pick Instance", SocketKind::Bool).with_default(false))
            .input(Socket::input("Instance Index", SocketKind::Int))
            .input(
                Socket::input("Rotation", SocketKind::Rotation)
                    .with_default(SocketValue::Rotation([0.0; 3])),
            )
            .input(Socket::input("Scale", SocketKind::Vector).with_default([1.0, 1.0, 1.0]))
            .output(Socket::output("Instances", SocketKind::Geometry)),
    );

    registry.register(
        NodeType::new("GeometryNodeRealizeInstances", "Realize Instances", NodeCategory::Instances)
            .describe("Convert instances into real geometry")
            .input(Socket::input("Geometry", SocketKind::Geometry))
            .input(Socket::input("Selection", SocketKind::Bool).with_default(true))
            .input(Socket::input("Realize All", SocketKind::Bool).with_default(true))
            .input(Socket::input("Depth", SocketKind::Int).with_default(0))
            .output(Socket::output("Geometry", SocketKind::Geometry)),
    );

    registry.register(
        NodeType::new("GeometryNodeTranslateInstances", "Translate Instances", NodeCategory::Instances)
            .describe("Move top-level instances")
            .input(Socket::input("Instances", SocketKind::Geometry))
            .input(Socket::input("Selection", SocketKind::Bool).with_default(true))
            .input(Socket::input("Translation", SocketKind::Vector).with_default([0.0, 0.0, 0.0]))
            .input(Socket::input("Local Space", SocketKind::Bool).with_default(true))
            .output(Socket::output("Instances", SocketKind::Geometry)),
    );

    // ========================================================================
    // Inputs
    // ========================================================================

    registry.register(
        NodeType::new("GeometryNodeInputPosition", "Position", NodeCategory::Input)
            .describe("Position of each element")
            .output(Socket::output("Position", SocketKind::Vector)),
    );

    registry.register(
        NodeType::new("GeometryNodeInputIndex", "Index", NodeCategory::Input)
            .describe("Index of each element")
            .output(Socket::output("Index", SocketKind::Int)),
    );

    registry.register(
        NodeType::new("FunctionNodeInputInt", "Integer", NodeCategory::Input)
            .describe("Constant integer")
            .output(Socket::output("Integer", SocketKind::Int))
            .property("integer", 0),
    );

    registry.register(
        NodeType::new("ShaderNodeValue", "Value", NodeCategory::Input)
            .describe("Constant float")
            .output(Socket::output("Value", SocketKind::Float))
            .property("value", 0.0),
    );

    registry.register(
        NodeType::new("FunctionNodeInputVector", "Vector", NodeCategory::Input)
            .describe("Constant vector")
            .output(Socket::output("Vector", SocketKind::Vector))
            .property("vector", [0.0, 0.0, 0.0]),
    );

    // ========================================================================
    // Utilities
    // ========================================================================

    registry.register(
        NodeType::new("FunctionNodeRandomValue", "Random Value", NodeCategory::Utility)
            .describe("Random values of the selected type")
            .input(
                Socket::input("Min", SocketKind::Vector)
                    .with_default([0.0, 0.0, 0.0])
                    .available_when("data_type", &["FLOAT_VECTOR"]),
            )
            .input(
                Socket::input("Max", SocketKind::Vector)
                    .with_default([1.0, 1.0, 1.0])
                    .available_when("data_type", &["FLOAT_VECTOR"]),
            )
            .input(
                Socket::input("Min", SocketKind::Float)
                    .with_identifier("Min_001")
                    .with_default(0.0)
                    .available_when("data_type", &["FLOAT"]),
            )
            .input(
                Socket::input("Max", SocketKind::Float)
                    .with_identifier("Max_001")
                    .with_default(1.0)
                    .available_when("data_type", &["FLOAT"]),
            )
            .input(
                Socket::input("Min", SocketKind::Int)
                    .with_identifier("Min_002")
                    .with_default(0)
                    .available_when("data_type", &["INT"]),
            )
            .input(
                Socket::input("Max", SocketKind::Int)
                    .with_identifier("Max_002")
                    .with_default(100)
                    .available_when("data_type", &["INT"]),
            )
            .input(
                Socket::input("Probability", SocketKind::Float)
                    .with_default(0.5)
                    .available_when("data_type", &["BOOLEAN"]),
            )
            .input(Socket::input("ID", SocketKind::Int))
            .input(Socket::input("Seed", SocketKind::Int).with_default(0))
            .output(
                Socket::output("Value", SocketKind::Vector).available_when("data_type", &["FLOAT_VECTOR"]),
            )
            .output(
                Socket::output("Value", SocketKind::Float)
                    .with_identifier("Value_001")
                    .available_when("data_type", &["FLOAT"]),
            )
            .output(
                Socket::output("Value", SocketKind::Int)
                    .with_identifier("Value_002")
                    .available_when("data_type", &["INT"]),
            )
            .output(
                Socket::output("Value", SocketKind::Bool)
                    .with_identifier("Value_003")
                    .available_when("data_type", &["BOOLEAN"]),
            )
            .enum_property("data_type", "FLOAT", &["FLOAT", "INT", "FLOAT_VECTOR", "BOOLEAN"])
            .variant(
                "vector",
                Variant::new("data_type", "FLOAT_VECTOR").with_positional(&["Min", "Max", "ID", "Seed"]),
            )
            .variant(
                "float",
                Variant::new("data_type", "FLOAT").with_positional(&["Min_001", "Max_001", "ID", "Seed"]),
            )
            .variant(
                "integer",
                Variant::new("data_type", "INT").with_positional(&["Min_002", "Max_002", "ID", "Seed"]),
            )
            .variant(
                "boolean",
                Variant::new("data_type", "BOOLEAN").with_positional(&["Probability", "ID", "Seed"]),
            ),
    );

    registry.register(
        NodeType::new("FunctionNodeAlignRotationToVector", "Align Rotation to Vector", NodeCategory::Utility)
            .describe("Rotate so an axis points along a vector")
            .input(
                Socket::input("Rotation", SocketKind::Rotation)
                    .with_default(SocketValue::Rotation([0.0; 3])),
            )
            .input(Socket::input("Factor", SocketKind::Float).with_default(1.0))
            .input(Socket::input("Vector", SocketKind::Vector).with_default([0.0, 0.0, 1.0]))
            .output(Socket::output("Rotation", SocketKind::Rotation))
            .enum_property("axis", "Z", &["X", "Y", "Z"])
            .enum_property("pivot_axis", "AUTO", &["AUTO", "X", "Y", "Z"]),
    );

    registry.register(
        NodeType::new("FunctionNodeRotateRotation", "Rotate Rotation", NodeCategory::Utility)
            .describe("Apply a second rotation")
            .input(
                Socket::input("Rotation", SocketKind::Rotation)
                    .with_default(SocketValue::Rotation([0.0; 3])),
            )
            .input(
                Socket::input("Rotate By", SocketKind::Rotation)
                    .with_default(SocketValue::Rotation([0.0; 3])),
            )
            .output(Socket::output("Rotation", SocketKind::Rotation))
            .enum_property("rotation_space", "GLOBAL", &["GLOBAL", "LOCAL"]),
    );

    registry.register(
        NodeType::new("FunctionNodeAxisAngleToRotation", "Axis Angle to Rotation", NodeCategory::Utility)
            .describe("Rotation around an axis")
            .input(Socket::input("Axis", SocketKind::Vector).with_default([0.0, 0.0, 1.0]))
            .input(Socket::input("Angle", SocketKind::Float).with_default(0.0))
            .output(Socket::output("Rotation", SocketKind::Rotation)),
    );

    // ========================================================================
    // Math
    // ========================================================================

    registry.register(math_node());
    registry.register(vector_math_node());

    registry.register(
        NodeType::new("FunctionNodeIntegerMath", "Integer Math", NodeCategory::Converter)
            .describe("Integer arithmetic")
            .input(Socket::input("Value", SocketKind::Int).with_default(0))
            .input(
                Socket::input("Value", SocketKind::Int)
                    .with_identifier("Value_001")
                    .with_default(0)
                    .available_when("operation", MATH_BINARY),
            )
            .input(
                Socket::input("Value", SocketKind::Int)
                    .with_identifier("Value_002")
                    .with_default(0)
                    .available_when("operation", &["MULTIPLY_ADD"]),
            )
            .output(Socket::output("Value", SocketKind::Int))
            .enum_property(
                "operation",
                "ADD",
                &["ADD", "SUBTRACT", "MULTIPLY", "DIVIDE", "MULTIPLY_ADD", "POWER", "MINIMUM", "MAXIMUM", "MODULO", "ABSOLUTE", "NEGATE"],
            )
            .variant("add", binary("ADD"))
            .variant("subtract", binary("SUBTRACT"))
            .variant("multiply", binary("MULTIPLY"))
            .variant("divide", binary("DIVIDE"))
            .variant("modulo", binary("MODULO")),
    );

    registry.register(
        NodeType::new("FunctionNodeBooleanMath", "Boolean Math", NodeCategory::Converter)
            .describe("Logic operations on booleans")
            .input(Socket::input("Boolean", SocketKind::Bool).with_default(false))
            .input(
                Socket::input("Boolean", SocketKind::Bool)
                    .with_identifier("Boolean_001")
                    .with_default(false)
                    .available_when("operation", &["AND", "OR", "NAND", "NOR", "XNOR", "XOR", "IMPLY", "NIMPLY"]),
            )
            .output(Socket::output("Boolean", SocketKind::Bool))
            .enum_property(
                "operation",
                "AND",
                &["AND", "OR", "NOT", "NAND", "NOR", "XNOR", "XOR", "IMPLY", "NIMPLY"],
            )
            .variant("l_and", Variant::new("operation", "AND").with_positional(&["Boolean", "Boolean_001"]))
            .variant("l_or", Variant::new("operation", "OR").with_positional(&["Boolean", "Boolean_001"]))
            .variant("l_not", Variant::new("operation", "NOT").with_positional(&["Boolean"]))
            .variant("equal", Variant::new("operation", "XNOR").with_positional(&["Boolean", "Boolean_001"])),
    );

    registry
}

fn binary(operation: &str) -> Variant {
    Variant::new("operation", operation).with_positional(&["Value", "Value_001"])
}

fn math_node() -> NodeType {
    let mut operations = MATH_BINARY.to_vec();
    operations.extend(["SQRT", "ABSOLUTE", "SINE", "COSINE", "FLOOR", "CEIL"]);

    NodeType::new("ShaderNodeMath", "Math", NodeCategory::Converter)
        .describe("Scalar arithmetic")
        .input(Socket::input("Value", SocketKind::Float).with_default(0.5))
        .input(
            Socket::input("Value", SocketKind::Float)
                .with_identifier("Value_001")
                .with_default(0.5)
                .available_when("operation", MATH_BINARY),
        )
        .input(
            Socket::input("Value", SocketKind::Float)
                .with_identifier("Value_002")
                .with_default(0.5)
                .available_when("operation", MATH_TERNARY),
        )
        .output(Socket::output("Value", SocketKind::Float))
        .enum_property("operation", "ADD", &operations)
        .property("use_clamp", false)
        .variant("add", binary("ADD"))
        .variant("subtract", binary("SUBTRACT"))
        .variant("multiply", binary("MULTIPLY"))
        .variant("divide", binary("DIVIDE"))
        .variant("power", binary("POWER"))
        .variant("minimum", binary("MINIMUM"))
        .variant("maximum", binary("MAXIMUM"))
        .variant(
            "multiply_add",
            Variant::new("operation", "MULTIPLY_ADD").with_positional(&["Value", "Value_001", "Value_002"]),
        )
        .variant("sqrt", Variant::new("operation", "SQRT").with_positional(&["Value"]))
        .variant("sine", Variant::new("operation", "SINE").with_positional(&["Value"]))
        .variant("cosine", Variant::new("operation", "COSINE").with_positional(&["Value"]))
}

fn vector_math_node() -> NodeType {
    let two_vectors = &[
        "ADD",
        "SUBTRACT",
        "MULTIPLY",
        "DIVIDE",
        "MULTIPLY_ADD",
        "CROSS_PRODUCT",
        "DOT_PRODUCT",
        "DISTANCE",
    ];
    let scalar_result = &["DOT_PRODUCT", "DISTANCE", "LENGTH"];
    let vector_result = &[
        "ADD",
        "SUBTRACT",
        "MULTIPLY",
        "DIVIDE",
        "MULTIPLY_ADD",
        "CROSS_PRODUCT",
        "SCALE",
        "NORMALIZE",
    ];
    let pair = |operation: &str| {
        Variant::new("operation", operation).with_positional(&["Vector", "Vector_001"])
    };

    NodeType::new("ShaderNodeVectorMath", "Vector Math", NodeCategory::Converter)
        .describe("Vector arithmetic")
        .input(Socket::input("Vector", SocketKind::Vector).with_default([0.0, 0.0, 0.0]))
        .input(
            Socket::input("Vector", SocketKind::Vector)
                .with_identifier("Vector_001")
                .with_default([0.0, 0.0, 0.0])
                .available_when("operation", two_vectors),
        )
        .input(
            Socket::input("Vector", SocketKind::Vector)
                .with_identifier("Vector_002")
                .with_default([0.0, 0.0, 0.0])
                .available_when("operation", &["MULTIPLY_ADD"]),
        )
        .input(
            Socket::input("Scale", SocketKind::Float)
                .with_default(1.0)
                .available_when("operation", &["SCALE"]),
        )
        .output(Socket::output("Vector", SocketKind::Vector).available_when("operation", vector_result))
        .output(Socket::output("Value", SocketKind::Float).available_when("operation", scalar_result))
        .enum_property(
            "operation",
            "ADD",
            &[
                "ADD",
                "SUBTRACT",
                "MULTIPLY",
                "DIVIDE",
                "MULTIPLY_ADD",
                "CROSS_PRODUCT",
                "DOT_PRODUCT",
                "DISTANCE",
                "LENGTH",
                "SCALE",
                "NORMALIZE",
            ],
        )
        .variant("add", pair("ADD"))
        .variant("subtract", pair("SUBTRACT"))
        .variant("multiply", pair("MULTIPLY"))
        .variant("divide", pair("DIVIDE"))
        .variant("cross_product", pair("CROSS_PRODUCT"))
        .variant("dot_product", pair("DOT_PRODUCT"))
        .variant("distance", pair("DISTANCE"))
        .variant("scale", Variant::new("operation", "SCALE").with_positional(&["Vector", "Scale"]))
        .variant("length", Variant::new("operation", "LENGTH").with_positional(&["Vector"]))
        .variant("normalize", Variant::new("operation", "NORMALIZE").with_positional(&["Vector"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::socket::SocketDirection;

    #[test]
    fn test_registry_contents() {
        let registry = create_geometry_registry();
        assert!(registry.get("GeometryNodePoints").is_some());
        assert!(registry.get("ShaderNodeMath").is_some());
        assert!(registry.get("ShaderNodeVectorMath").is_some());
        assert!(registry.get("FunctionNodeIntegerMath").is_some());
        assert_eq!(registry.types_in_category(NodeCategory::Input).count(), 5);
    }

    #[test]
    fn test_variant_defaults_are_valid() {
        let registry = create_geometry_registry();
        for ty in registry.types() {
            for (name, def) in &ty.properties {
                assert!(def.accepts(&def.default), "{}.{name} default rejected", ty.id);
            }
            for (variant_name, variant) in &ty.variants {
                for (property, value) in &variant.properties {
                    let def = &ty.properties[property];
                    assert!(def.accepts(value), "{}.{variant_name} sets invalid {property}", ty.id);
                }
                let mut node = Node::new(ty, &ty.name);
                node.properties.extend(variant.properties.clone());
                for key in &variant.positional {
                    let index = node.find_socket(SocketDirection::Input, key);
                    assert!(
                        index.is_some_and(|i| node.is_available(SocketDirection::Input, i)),
                        "{}.{variant_name} positional {key} is not an active input",
                        ty.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_math_availability() {
        let registry = create_geometry_registry();
        let ty = registry.get("ShaderNodeMath").unwrap();
        let mut node = Node::new(ty, "Math");
        assert_eq!(node.available(SocketDirection::Input).count(), 2);

        node.properties.insert("operation".into(), SocketValue::from("SQRT"));
        assert_eq!(node.available(SocketDirection::Input).count(), 1);

        node.properties
            .insert("operation".into(), SocketValue::from("MULTIPLY_ADD"));
        assert_eq!(node.available(SocketDirection::Input).count(), 3);
    }

    #[test]
    fn test_random_value_outputs_follow_data_type() {
        let registry = create_geometry_registry();
        let ty = registry.get("FunctionNodeRandomValue").unwrap();
        let mut node = Node::new(ty, "Random Value");
        let primary = node.primary_output().unwrap();
        assert_eq!(node.outputs[primary].kind, SocketKind::Float);

        node.properties
            .insert("data_type".into(), SocketValue::from("FLOAT_VECTOR"));
        let primary = node.primary_output().unwrap();
        assert_eq!(node.outputs[primary].kind, SocketKind::Vector);
    }
}
