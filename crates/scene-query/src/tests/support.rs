//! Shared fixtures for scene-query tests.

use rstest::fixture;
use scene_graph::{LayerTable, NodeRef, SceneGraph, SceneNode};

/// Layer index named `MyTestLayer` in [`sample_scene`].
pub(super) const TEST_LAYER: u32 = 8;

/// Builds the scene used across query tests:
///
/// ```text
/// Parent
/// ├── Sphere1                  layer MyTestLayer
/// ├── Sphere2                  tag MyTestTag
/// ├── Sphere3
/// │   └── Cube                 layer MyTestLayer
/// └── Cube
/// Other
/// ├── MySphere
/// └── Something with a space
/// ```
#[fixture]
pub(super) fn sample_scene() -> SceneGraph {
    let mut layers = LayerTable::default();
    layers
        .set_name(TEST_LAYER, "MyTestLayer")
        .expect("layer in range");
    let mut graph = SceneGraph::with_layers(layers);

    let parent = graph.add_root("Parent");
    let sphere1 = graph.add_child(parent, "Sphere1").expect("add Sphere1");
    graph.set_layer(sphere1, TEST_LAYER).expect("set layer");
    let sphere2 = graph.add_child(parent, "Sphere2").expect("add Sphere2");
    graph.set_tag(sphere2, "MyTestTag").expect("set tag");
    let sphere3 = graph.add_child(parent, "Sphere3").expect("add Sphere3");
    let nested = graph.add_child(sphere3, "Cube").expect("add nested Cube");
    graph.set_layer(nested, TEST_LAYER).expect("set layer");
    graph.add_child(parent, "Cube").expect("add Cube");

    let other = graph.add_root("Other");
    graph.add_child(other, "MySphere").expect("add MySphere");
    graph
        .add_child(other, "Something with a space")
        .expect("add spaced node");
    graph
}

/// Finds the first node with the given name in pre-order.
pub(super) fn find<'g>(graph: &'g SceneGraph, name: &str) -> NodeRef<'g> {
    use scene_graph::Scene;
    graph
        .pre_order()
        .find(|node| node.name() == name)
        .unwrap_or_else(|| panic!("no node named {name}"))
}

/// Renders each node as `name#identity`.
pub(super) fn labels<'g>(nodes: impl Iterator<Item = NodeRef<'g>>) -> Vec<String> {
    nodes
        .map(|node| format!("{}#{}", node.name(), node.identity()))
        .collect()
}
