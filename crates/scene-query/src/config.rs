//! Query engine configuration for input and pattern limits.

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Limits applied when compiling selectors.
///
/// # Defaults
///
/// - `max_selector_len`: 4 096 bytes
/// - `regex_size_limit`: 1 048 576 (1 MiB)
/// - `max_nesting_depth`: 64 nested `!` negations
///
/// Missing fields take their default when deserialized, so a host can embed
/// a partial `QueryConfig` in its own configuration file.
///
/// # Example
///
/// ```
/// use scene_query::QueryConfig;
///
/// let config = QueryConfig::default();
/// assert_eq!(config.max_selector_len(), 4_096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Longest selector text accepted, in bytes.
    max_selector_len: usize,
    /// Compiled size limit for partial-match regular expressions.
    regex_size_limit: usize,
    /// Deepest chain of `!` negations accepted in one atom.
    max_nesting_depth: usize,
}

impl QueryConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(max_selector_len: usize, regex_size_limit: usize) -> Self {
        Self {
            max_selector_len,
            regex_size_limit,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Replaces the negation nesting limit.
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Returns the longest selector text accepted, in bytes.
    #[must_use]
    pub const fn max_selector_len(&self) -> usize {
        self.max_selector_len
    }

    /// Returns the compiled size limit for regular expressions.
    #[must_use]
    pub const fn regex_size_limit(&self) -> usize {
        self.regex_size_limit
    }

    /// Returns the deepest chain of `!` negations accepted in one atom.
    #[must_use]
    pub const fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new(4_096, 1_048_576)
    }
}
