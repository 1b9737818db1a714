//! Arena-backed scene graph.
//!
//! The graph owns every node. Parents hold their children's ids in
//! insertion order and children point back at their parent by id, so there
//! is no ownership cycle and handles are plain indices.

use std::fmt;

use crate::error::GraphError;
use crate::layer::{LAYER_COUNT, LayerTable};
use crate::node::{Scene, SceneNode};

/// Opaque index of a node within one [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    instance_id: i64,
    layer: u32,
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An ordered forest of named nodes with layers and tags.
///
/// # Example
///
/// ```
/// use scene_graph::{SceneGraph, SceneNode};
///
/// let mut graph = SceneGraph::new();
/// let parent = graph.add_root("Parent");
/// let cube = graph.add_child(parent, "Cube")?;
///
/// let node = graph.node(cube)?;
/// assert_eq!(node.parent().map(|p| p.name().to_owned()), Some("Parent".to_owned()));
/// # Ok::<(), scene_graph::GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
    layers: LayerTable,
    last_instance_id: i64,
}

impl SceneGraph {
    /// Creates an empty graph with the default layer table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph using the given layer names.
    #[must_use]
    pub fn with_layers(layers: LayerTable) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }

    /// Adds a parentless node and returns its id.
    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.allocate(name.into(), None);
        self.roots.push(id);
        id
    }

    /// Appends a new last child under `parent` and returns its id.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `parent` is not in this graph.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, GraphError> {
        self.data(parent)?;
        let id = self.allocate(name.into(), Some(parent));
        self.data_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Renames a node.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `id` is not in this graph.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), GraphError> {
        self.data_mut(id)?.name = name.into();
        Ok(())
    }

    /// Moves a node onto another layer.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `id` is not in this graph, or
    /// [`GraphError::LayerOutOfRange`] if `layer` is not a valid layer index.
    pub fn set_layer(&mut self, id: NodeId, layer: u32) -> Result<(), GraphError> {
        if layer >= LAYER_COUNT {
            return Err(GraphError::layer_out_of_range(layer));
        }
        self.data_mut(id)?.layer = layer;
        Ok(())
    }

    /// Replaces a node's tag. An empty tag marks the node untagged.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `id` is not in this graph.
    pub fn set_tag(&mut self, id: NodeId, tag: impl Into<String>) -> Result<(), GraphError> {
        self.data_mut(id)?.tag = tag.into();
        Ok(())
    }

    /// Returns a handle to the node, or `None` if it is not in this graph.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.get(id.0).map(|_| NodeRef { graph: self, id })
    }

    /// Returns a handle to the node, or an error if it is not in this graph.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `id` is not in this graph.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_>, GraphError> {
        self.get(id).ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Returns the layer name table.
    #[must_use]
    pub const fn layers(&self) -> &LayerTable {
        &self.layers
    }

    /// Returns the layer name table for editing.
    pub const fn layers_mut(&mut self) -> &mut LayerTable {
        &mut self.layers
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, name: String, parent: Option<NodeId>) -> NodeId {
        self.last_instance_id += 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name,
            instance_id: self.last_instance_id,
            layer: 0,
            tag: String::new(),
            parent,
            children: Vec::new(),
        });
        id
    }

    fn data(&self, id: NodeId) -> Result<&NodeData, GraphError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, GraphError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| GraphError::node_not_found(id))
    }
}

impl Scene for SceneGraph {
    type Node<'g> = NodeRef<'g>;

    fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.roots.iter().map(|&id| NodeRef { graph: self, id })
    }
}

/// A borrowed handle to one node of a [`SceneGraph`].
#[derive(Clone, Copy)]
pub struct NodeRef<'g> {
    graph: &'g SceneGraph,
    id: NodeId,
}

impl<'g> NodeRef<'g> {
    /// Returns the node's arena id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the graph this node belongs to.
    #[must_use]
    pub const fn graph(&self) -> &'g SceneGraph {
        self.graph
    }

    fn data(&self) -> Option<&'g NodeData> {
        self.graph.nodes.get(self.id.0)
    }

    const fn at(&self, id: NodeId) -> Self {
        Self {
            graph: self.graph,
            id,
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl SceneNode for NodeRef<'_> {
    fn name(&self) -> &str {
        self.data().map_or("", |data| data.name.as_str())
    }

    fn identity(&self) -> i64 {
        self.data().map_or(0, |data| data.instance_id)
    }

    fn layer(&self) -> u32 {
        self.data().map_or(0, |data| data.layer)
    }

    fn layer_name(&self) -> Option<&str> {
        self.graph.layers.name_of(self.layer())
    }

    fn tag(&self) -> &str {
        self.data().map_or("", |data| data.tag.as_str())
    }

    fn parent(&self) -> Option<Self> {
        self.data()?.parent.map(|id| self.at(id))
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        let graph = self.graph;
        self.data()
            .into_iter()
            .flat_map(|data| data.children.iter())
            .map(move |&id| Self { graph, id })
    }
}
