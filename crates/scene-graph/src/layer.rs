//! Layer name table.
//!
//! Nodes carry an integer layer. Selectors refer to layers by name, so the
//! host keeps a fixed table mapping each layer index to an optional name.

use crate::error::GraphError;

/// Number of layer slots available to a scene.
pub const LAYER_COUNT: u32 = 32;

/// Name given to layer 0 by [`LayerTable::default`].
pub const DEFAULT_LAYER_NAME: &str = "Default";

/// Maps layer indices to human-readable layer names.
///
/// # Example
///
/// ```
/// use scene_graph::LayerTable;
///
/// let mut layers = LayerTable::default();
/// layers.set_name(8, "MyLayer")?;
/// assert_eq!(layers.name_of(8), Some("MyLayer"));
/// assert_eq!(layers.index_of("mylayer"), Some(8));
/// # Ok::<(), scene_graph::GraphError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTable {
    names: Vec<Option<String>>,
}

impl LayerTable {
    /// Creates a table with no named layers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: vec![None; LAYER_COUNT as usize],
        }
    }

    /// Returns the name assigned to `index`, if any.
    #[must_use]
    pub fn name_of(&self, index: u32) -> Option<&str> {
        let slot = usize::try_from(index).ok()?;
        self.names.get(slot)?.as_deref()
    }

    /// Assigns a name to the layer at `index`.
    ///
    /// An empty name clears the slot.
    ///
    /// # Errors
    /// Returns [`GraphError::LayerOutOfRange`] when `index` is not below
    /// [`LAYER_COUNT`].
    pub fn set_name(&mut self, index: u32, name: impl Into<String>) -> Result<(), GraphError> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|slot| self.names.get_mut(slot))
            .ok_or_else(|| GraphError::layer_out_of_range(index))?;
        let text = name.into();
        *slot = if text.is_empty() { None } else { Some(text) };
        Ok(())
    }

    /// Finds the index of the layer with the given name, ignoring case.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<u32> {
        let wanted = name.to_lowercase();
        self.iter()
            .find(|(_, candidate)| candidate.to_lowercase() == wanted)
            .map(|(index, _)| index)
    }

    /// Iterates over the named layers in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        (0..LAYER_COUNT)
            .zip(self.names.iter())
            .filter_map(|(index, name)| name.as_deref().map(|n| (index, n)))
    }
}

impl Default for LayerTable {
    fn default() -> Self {
        let mut names = vec![None; LAYER_COUNT as usize];
        if let Some(first) = names.first_mut() {
            *first = Some(DEFAULT_LAYER_NAME.to_owned());
        }
        Self { names }
    }
}
