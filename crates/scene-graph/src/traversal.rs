//! Lazy tree walks over [`SceneNode`] handles.
//!
//! Every walk is an ordinary iterator that expands nodes only as it is
//! pulled, so it observes the tree as it is while iterating. Nothing is
//! cached: calling the constructing method again walks the tree afresh.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::SceneNode;

/// Pushes the children of `node` so that the first child is popped first.
fn push_children_reversed<N: SceneNode>(stack: &mut Vec<N>, node: N) {
    let children: Vec<N> = node.children().collect();
    stack.extend(children.into_iter().rev());
}

/// Proper ancestors of a node, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<N: SceneNode> {
    next: Option<N>,
}

impl<N: SceneNode> Ancestors<N> {
    /// Starts a walk at the parent of `node`.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self {
            next: node.parent(),
        }
    }
}

impl<N: SceneNode> Iterator for Ancestors<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl<N: SceneNode> FusedIterator for Ancestors<N> {}

/// Depth-first walk yielding each node before its children.
#[derive(Debug, Clone)]
pub struct PreOrder<N: SceneNode> {
    stack: Vec<N>,
}

impl<N: SceneNode> PreOrder<N> {
    /// Walks `node` and its whole subtree.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self { stack: vec![node] }
    }

    /// Walks the subtree below `node`, excluding `node` itself.
    #[must_use]
    pub fn descendants_of(node: N) -> Self {
        let mut stack = Vec::new();
        push_children_reversed(&mut stack, node);
        Self { stack }
    }

    /// Walks each root's subtree in turn, in the order given.
    #[must_use]
    pub fn from_roots(roots: impl IntoIterator<Item = N>) -> Self {
        let mut stack: Vec<N> = roots.into_iter().collect();
        stack.reverse();
        Self { stack }
    }
}

impl<N: SceneNode> Iterator for PreOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        push_children_reversed(&mut self.stack, node);
        Some(node)
    }
}

impl<N: SceneNode> FusedIterator for PreOrder<N> {}

/// Depth-first walk yielding each node after its children.
#[derive(Debug, Clone)]
pub struct PostOrder<N: SceneNode> {
    /// Pending nodes paired with whether their children were expanded.
    stack: Vec<(N, bool)>,
}

impl<N: SceneNode> PostOrder<N> {
    /// Walks `node` and its whole subtree.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self {
            stack: vec![(node, false)],
        }
    }

    /// Walks each root's subtree in turn, in the order given.
    #[must_use]
    pub fn from_roots(roots: impl IntoIterator<Item = N>) -> Self {
        let mut stack: Vec<(N, bool)> = roots.into_iter().map(|root| (root, false)).collect();
        stack.reverse();
        Self { stack }
    }
}

impl<N: SceneNode> Iterator for PostOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            let children: Vec<N> = node.children().collect();
            self.stack
                .extend(children.into_iter().rev().map(|child| (child, false)));
        }
    }
}

impl<N: SceneNode> FusedIterator for PostOrder<N> {}

/// Level-order walk of the nodes below a starting node.
#[derive(Debug, Clone)]
pub struct BreadthFirst<N: SceneNode> {
    queue: VecDeque<N>,
}

impl<N: SceneNode> BreadthFirst<N> {
    /// Walks the children of `node`, then its grandchildren, and so on.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self {
            queue: node.children().collect(),
        }
    }
}

impl<N: SceneNode> Iterator for BreadthFirst<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children());
        Some(node)
    }
}

impl<N: SceneNode> FusedIterator for BreadthFirst<N> {}

/// Childless nodes of a subtree in pre-order.
#[derive(Debug, Clone)]
pub struct Leaves<N: SceneNode> {
    inner: PreOrder<N>,
}

impl<N: SceneNode> Leaves<N> {
    /// Walks the leaves of `node`'s subtree, including `node` if childless.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self {
            inner: PreOrder::new(node),
        }
    }

    /// Walks the leaves of each root's subtree in turn.
    #[must_use]
    pub fn from_roots(roots: impl IntoIterator<Item = N>) -> Self {
        Self {
            inner: PreOrder::from_roots(roots),
        }
    }
}

impl<N: SceneNode> Iterator for Leaves<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.inner.by_ref().find(SceneNode::is_leaf)
    }
}

impl<N: SceneNode> FusedIterator for Leaves<N> {}
