//! Shared scene fixtures for scene-graph tests.

use crate::{NodeId, SceneGraph};

/// Ids of the nodes in [`sample_scene`].
pub(super) struct SampleIds {
    pub(super) parent: NodeId,
    pub(super) sphere1: NodeId,
    pub(super) sphere3: NodeId,
    pub(super) nested_cube: NodeId,
    pub(super) cube: NodeId,
    pub(super) other: NodeId,
}

/// Builds the scene used across traversal tests:
///
/// ```text
/// Parent
/// ├── Sphere1
/// ├── Sphere3
/// │   └── Cube
/// └── Cube
/// Other
/// ```
pub(super) fn sample_scene() -> (SceneGraph, SampleIds) {
    let mut graph = SceneGraph::new();
    let parent = graph.add_root("Parent");
    let sphere1 = graph.add_child(parent, "Sphere1").expect("add Sphere1");
    let sphere3 = graph.add_child(parent, "Sphere3").expect("add Sphere3");
    let nested_cube = graph.add_child(sphere3, "Cube").expect("add nested Cube");
    let cube = graph.add_child(parent, "Cube").expect("add Cube");
    let other = graph.add_root("Other");
    (
        graph,
        SampleIds {
            parent,
            sphere1,
            sphere3,
            nested_cube,
            cube,
            other,
        },
    )
}

/// Collects node names from a walk.
pub(super) fn names<'g>(nodes: impl Iterator<Item = crate::NodeRef<'g>>) -> Vec<String> {
    use crate::SceneNode;
    nodes.map(|node| node.name().to_owned()).collect()
}
