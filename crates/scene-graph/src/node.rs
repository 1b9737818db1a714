//! The host-side node contract consumed by traversals and selectors.
//!
//! Query code never sees a concrete tree. It works against [`SceneNode`], a
//! cheap copyable handle, and [`Scene`], which enumerates the parentless
//! nodes. [`crate::SceneGraph`] is the bundled implementation; hosts with
//! their own hierarchy implement these two traits instead.

use crate::traversal::{Ancestors, BreadthFirst, Leaves, PostOrder, PreOrder};

/// A handle to one node of an ordered, rooted tree.
///
/// Handles are `Copy` and compare equal when they refer to the same node.
/// Parent links are back-references only: holding a child handle never keeps
/// its parent alive on its own.
pub trait SceneNode: Copy + Eq {
    /// Returns the node's name.
    fn name(&self) -> &str;

    /// Returns the node's stable identity.
    fn identity(&self) -> i64;

    /// Returns the node's layer index.
    fn layer(&self) -> u32;

    /// Returns the name of the node's layer, if the host has named it.
    fn layer_name(&self) -> Option<&str>;

    /// Returns the node's tag, or an empty string when untagged.
    fn tag(&self) -> &str;

    /// Returns the node's parent, or `None` for a root.
    fn parent(&self) -> Option<Self>;

    /// Returns the node's direct children in stored order.
    fn children(&self) -> impl Iterator<Item = Self>;

    /// Returns whether the node has no parent.
    fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Returns whether the node has no children.
    fn is_leaf(&self) -> bool {
        self.children().next().is_none()
    }

    /// Returns the root of the tree containing this node.
    #[must_use]
    fn root(&self) -> Self {
        self.ancestors().last().unwrap_or(*self)
    }

    /// Returns the direct children collected into a restartable sequence.
    fn child_nodes(&self) -> std::vec::IntoIter<Self> {
        self.children().collect::<Vec<_>>().into_iter()
    }

    /// Walks proper ancestors, nearest first, ending at the root.
    fn ancestors(&self) -> Ancestors<Self> {
        Ancestors::new(*self)
    }

    /// Walks every node strictly below this one in pre-order.
    fn descendants(&self) -> PreOrder<Self> {
        PreOrder::descendants_of(*self)
    }

    /// Walks this node and then each child's subtree in pre-order.
    fn pre_order(&self) -> PreOrder<Self> {
        PreOrder::new(*self)
    }

    /// Walks each child's subtree in post-order and then this node.
    fn post_order(&self) -> PostOrder<Self> {
        PostOrder::new(*self)
    }

    /// Walks the nodes below this one level by level.
    fn breadth_first(&self) -> BreadthFirst<Self> {
        BreadthFirst::new(*self)
    }

    /// Walks the childless nodes of this subtree in pre-order.
    ///
    /// A childless node yields itself.
    fn leaves(&self) -> Leaves<Self> {
        Leaves::new(*self)
    }
}

/// A forest of [`SceneNode`]s that can enumerate its roots.
pub trait Scene {
    /// The node handle type of this scene, borrowing the scene for `'a`.
    type Node<'a>: SceneNode
    where
        Self: 'a;

    /// Returns every node without a parent, in root enumeration order.
    fn roots(&self) -> impl Iterator<Item = Self::Node<'_>>;

    /// Returns the roots collected into a restartable sequence.
    fn root_nodes(&self) -> std::vec::IntoIter<Self::Node<'_>> {
        self.roots().collect::<Vec<_>>().into_iter()
    }

    /// Walks every tree in pre-order, one root after another.
    fn pre_order(&self) -> PreOrder<Self::Node<'_>> {
        PreOrder::from_roots(self.roots())
    }

    /// Walks every tree in post-order, one root after another.
    fn post_order(&self) -> PostOrder<Self::Node<'_>> {
        PostOrder::from_roots(self.roots())
    }

    /// Yields every root, then each root's breadth-first walk in root order.
    fn breadth_first(&self) -> impl Iterator<Item = Self::Node<'_>> {
        let roots: Vec<_> = self.roots().collect();
        let walks: Vec<_> = roots.iter().map(SceneNode::breadth_first).collect();
        roots.into_iter().chain(walks.into_iter().flatten())
    }

    /// Walks the childless nodes of every tree, one root after another.
    fn leaves(&self) -> Leaves<Self::Node<'_>> {
        Leaves::from_roots(self.roots())
    }
}
