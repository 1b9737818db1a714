//! Ordered, rooted scene trees and the walks defined over them.
//!
//! This crate provides the tree side of the scene query toolchain:
//!
//! - **Node contract** via [`SceneNode`] and [`Scene`], the only view of a
//!   host hierarchy that selector evaluation relies on
//! - **Traversals** via [`Ancestors`], [`PreOrder`], [`PostOrder`],
//!   [`BreadthFirst`] and [`Leaves`], all lazy and restartable
//! - **A bundled host tree** via [`SceneGraph`], an arena of named nodes with
//!   layers, tags and stable instance ids
//!
//! # Example
//!
//! ```
//! use scene_graph::{Scene, SceneGraph, SceneNode};
//!
//! let mut graph = SceneGraph::new();
//! let parent = graph.add_root("Parent");
//! let sphere = graph.add_child(parent, "Sphere")?;
//! graph.add_child(sphere, "Cube")?;
//!
//! let names: Vec<_> = graph.pre_order().map(|n| n.name().to_owned()).collect();
//! assert_eq!(names, ["Parent", "Sphere", "Cube"]);
//! # Ok::<(), scene_graph::GraphError>(())
//! ```

mod error;
mod graph;
mod layer;
mod node;
mod traversal;

pub use error::GraphError;
pub use graph::{NodeId, NodeRef, SceneGraph};
pub use layer::{DEFAULT_LAYER_NAME, LAYER_COUNT, LayerTable};
pub use node::{Scene, SceneNode};
pub use traversal::{Ancestors, BreadthFirst, Leaves, PostOrder, PreOrder};

#[cfg(test)]
mod tests;
