//! Tests for the lazy tree walks.

use rstest::rstest;

use super::support::{names, sample_scene};
use crate::{NodeId, NodeRef, Scene, SceneGraph, SceneNode};

fn id_list<'g>(nodes: impl Iterator<Item = NodeRef<'g>>) -> Vec<NodeId> {
    nodes.map(|node| node.id()).collect()
}

#[test]
fn ancestors_walk_nearest_first() {
    let (graph, ids) = sample_scene();
    let cube = graph.node(ids.nested_cube).expect("nested cube");
    assert_eq!(names(cube.ancestors()), ["Sphere3", "Parent"]);
}

#[test]
fn root_has_no_ancestors() {
    let (graph, ids) = sample_scene();
    let parent = graph.node(ids.parent).expect("parent");
    assert!(parent.is_root());
    assert_eq!(parent.ancestors().count(), 0);
    assert_eq!(parent.root(), parent);
}

#[test]
fn root_of_nested_node_is_tree_root() {
    let (graph, ids) = sample_scene();
    let cube = graph.node(ids.nested_cube).expect("nested cube");
    assert_eq!(cube.root().id(), ids.parent);
}

#[test]
fn descendants_exclude_start_node() {
    let (graph, ids) = sample_scene();
    let parent = graph.node(ids.parent).expect("parent");
    assert_eq!(
        id_list(parent.descendants()),
        [ids.sphere1, ids.sphere3, ids.nested_cube, ids.cube]
    );
}

#[test]
fn pre_order_includes_start_node() {
    let (graph, ids) = sample_scene();
    let sphere3 = graph.node(ids.sphere3).expect("sphere3");
    assert_eq!(names(sphere3.pre_order()), ["Sphere3", "Cube"]);
}

#[test]
fn post_order_visits_children_first() {
    let (graph, ids) = sample_scene();
    let parent = graph.node(ids.parent).expect("parent");
    assert_eq!(
        id_list(parent.post_order()),
        [ids.sphere1, ids.nested_cube, ids.sphere3, ids.cube, ids.parent]
    );
}

#[test]
fn breadth_first_is_level_order() {
    let (graph, ids) = sample_scene();
    let parent = graph.node(ids.parent).expect("parent");
    assert_eq!(
        id_list(parent.breadth_first()),
        [ids.sphere1, ids.sphere3, ids.cube, ids.nested_cube]
    );
}

/// `A` with children `B` (holding `D`, which holds `F`) and `C` (holding `E`).
fn staggered_tree() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let a = graph.add_root("A");
    let b = graph.add_child(a, "B").expect("b");
    let c = graph.add_child(a, "C").expect("c");
    let d = graph.add_child(b, "D").expect("d");
    graph.add_child(c, "E").expect("e");
    graph.add_child(d, "F").expect("f");
    graph
}

#[test]
fn breadth_first_finishes_a_level_before_descending() {
    let graph = staggered_tree();
    let a = graph.roots().next().expect("root");
    assert_eq!(names(a.breadth_first()), ["B", "C", "D", "E", "F"]);
    assert_eq!(names(graph.breadth_first()), ["A", "B", "C", "D", "E", "F"]);
}

#[test]
fn leaves_are_childless_nodes_in_pre_order() {
    let (graph, ids) = sample_scene();
    let parent = graph.node(ids.parent).expect("parent");
    assert_eq!(
        id_list(parent.leaves()),
        [ids.sphere1, ids.nested_cube, ids.cube]
    );
}

#[test]
fn leaf_node_is_its_own_leaf() {
    let (graph, ids) = sample_scene();
    let sphere1 = graph.node(ids.sphere1).expect("sphere1");
    assert!(sphere1.is_leaf());
    assert_eq!(id_list(sphere1.leaves()), [ids.sphere1]);
    assert_eq!(sphere1.descendants().count(), 0);
    assert_eq!(sphere1.breadth_first().count(), 0);
}

#[rstest]
#[case::pre_order(&["Parent", "Sphere1", "Sphere3", "Cube", "Cube", "Other"], Walk::PreOrder)]
#[case::post_order(&["Sphere1", "Cube", "Sphere3", "Cube", "Parent", "Other"], Walk::PostOrder)]
#[case::breadth_first(&["Parent", "Other", "Sphere1", "Sphere3", "Cube", "Cube"], Walk::BreadthFirst)]
#[case::leaves(&["Sphere1", "Cube", "Cube", "Other"], Walk::Leaves)]
fn scene_walks_cover_every_root(#[case] expected: &[&str], #[case] walk: Walk) {
    let (graph, _) = sample_scene();
    let walked = match walk {
        Walk::PreOrder => names(graph.pre_order()),
        Walk::PostOrder => names(graph.post_order()),
        Walk::BreadthFirst => names(graph.breadth_first()),
        Walk::Leaves => names(graph.leaves()),
    };
    assert_eq!(walked, expected);
}

#[derive(Debug, Clone, Copy)]
enum Walk {
    PreOrder,
    PostOrder,
    BreadthFirst,
    Leaves,
}

#[test]
fn walks_restart_from_scratch() {
    let (graph, _) = sample_scene();
    let first = names(graph.pre_order());
    let second = names(graph.pre_order());
    assert_eq!(first, second);
}

#[test]
fn walks_observe_edits_made_between_runs() {
    let (mut graph, ids) = sample_scene();
    let before = graph.pre_order().count();
    graph.add_child(ids.other, "Late").expect("add child");
    assert_eq!(graph.pre_order().count(), before + 1);
    assert_eq!(
        names(graph.node(ids.other).expect("other").descendants()),
        ["Late"]
    );
}

#[test]
fn child_nodes_can_be_iterated_twice() {
    let (graph, ids) = sample_scene();
    let parent = graph.node(ids.parent).expect("parent");
    let children = parent.child_nodes();
    assert_eq!(children.clone().count(), 3);
    assert_eq!(names(children), ["Sphere1", "Sphere3", "Cube"]);
}

#[test]
fn empty_scene_walks_yield_nothing() {
    let graph = SceneGraph::new();
    assert_eq!(graph.pre_order().count(), 0);
    assert_eq!(graph.post_order().count(), 0);
    assert_eq!(graph.breadth_first().count(), 0);
    assert_eq!(graph.leaves().count(), 0);
    assert_eq!(graph.root_nodes().len(), 0);
}
