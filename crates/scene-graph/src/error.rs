//! Error types for scene graph operations.

use thiserror::Error;

use crate::graph::NodeId;
use crate::layer::LAYER_COUNT;

/// Errors returned by scene graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// The requested node does not exist in this graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A layer index outside the fixed layer range was supplied.
    #[error("layer index {index} is out of range (expected 0..{LAYER_COUNT})")]
    LayerOutOfRange {
        /// The rejected layer index.
        index: u32,
    },
}

impl GraphError {
    /// Creates a new `NodeNotFound` error.
    #[must_use]
    pub const fn node_not_found(id: NodeId) -> Self {
        Self::NodeNotFound(id)
    }

    /// Creates a new `LayerOutOfRange` error.
    #[must_use]
    pub const fn layer_out_of_range(index: u32) -> Self {
        Self::LayerOutOfRange { index }
    }
}
