//! Compiled node predicates.
//!
//! A [`Query`] is an immutable expression tree built once per selector and
//! evaluated against many nodes. Evaluation is a pure function of the node
//! and the tree around it.

use std::fmt;

use regex::{Regex, RegexBuilder};
use scene_graph::SceneNode;

use crate::config::QueryConfig;
use crate::error::SelectorError;

/// Text compared case-insensitively for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactText(String);

impl ExactText {
    /// Lower-cases `text` for comparison.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `text` is empty.
    pub fn new(text: &str) -> Result<Self, SelectorError> {
        if text.is_empty() {
            return Err(SelectorError::invalid_selector("match text is empty"));
        }
        Ok(Self(text.to_lowercase()))
    }

    /// Returns the lower-cased text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether `candidate` equals this text, ignoring case.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        !candidate.is_empty() && candidate.to_lowercase() == self.0
    }
}

/// A case-insensitive regular expression matched anywhere in the text.
#[derive(Debug, Clone)]
pub struct TextPattern(Regex);

impl TextPattern {
    /// Compiles `pattern` with the default size limit.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `pattern` is empty, or
    /// [`SelectorError::InvalidPattern`] if it does not compile.
    pub fn new(pattern: &str) -> Result<Self, SelectorError> {
        Self::with_size_limit(pattern, QueryConfig::default().regex_size_limit())
    }

    /// Compiles `pattern`, rejecting programs larger than `size_limit` bytes.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `pattern` is empty, or
    /// [`SelectorError::InvalidPattern`] if it does not compile within the
    /// limit.
    pub fn with_size_limit(pattern: &str, size_limit: usize) -> Result<Self, SelectorError> {
        if pattern.is_empty() {
            return Err(SelectorError::invalid_selector("match pattern is empty"));
        }
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
            .map(Self)
            .map_err(|err| SelectorError::invalid_pattern(pattern, err.to_string()))
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the pattern matches anywhere in `candidate`.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        self.0.is_match(candidate)
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextPattern {}

/// A node predicate.
///
/// # Example
///
/// ```
/// use scene_graph::{SceneGraph, SceneNode};
/// use scene_query::Query;
///
/// let mut graph = SceneGraph::new();
/// let parent = graph.add_root("Parent");
/// let cube = graph.add_child(parent, "Cube")?;
///
/// let query = Query::and(
///     Query::name("cube")?,
///     Query::parent(Query::name("PARENT")?),
/// );
/// assert!(query.matches(graph.node(cube)?));
/// assert_eq!(query.to_string(), r#"and(name("cube"), parent(name("parent")))"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// The node's name equals the text, ignoring case.
    Name(ExactText),
    /// The node's name matches the pattern.
    RegexName(TextPattern),
    /// The node's layer name or tag equals the text, ignoring case.
    Layer(ExactText),
    /// The node's layer name or tag matches the pattern.
    RegexLayer(TextPattern),
    /// The node's identity equals the id.
    UniqueId(i64),
    /// The inner predicate does not match.
    Not(Box<Query>),
    /// Both predicates match.
    And(Box<Query>, Box<Query>),
    /// The node has no parent.
    Root,
    /// The node's parent matches the inner predicate.
    Parent(Box<Query>),
    /// Some proper ancestor of the node matches the inner predicate.
    Ancestor(Box<Query>),
}

impl Query {
    /// Builds an exact name predicate.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `name` is empty.
    pub fn name(name: &str) -> Result<Self, SelectorError> {
        ExactText::new(name).map(Self::Name)
    }

    /// Builds a partial name predicate.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `pattern` is empty, or
    /// [`SelectorError::InvalidPattern`] if it does not compile.
    pub fn regex_name(pattern: &str) -> Result<Self, SelectorError> {
        TextPattern::new(pattern).map(Self::RegexName)
    }

    /// Builds an exact layer-or-tag predicate.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `layer` is empty.
    pub fn layer(layer: &str) -> Result<Self, SelectorError> {
        ExactText::new(layer).map(Self::Layer)
    }

    /// Builds a partial layer-or-tag predicate.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if `pattern` is empty, or
    /// [`SelectorError::InvalidPattern`] if it does not compile.
    pub fn regex_layer(pattern: &str) -> Result<Self, SelectorError> {
        TextPattern::new(pattern).map(Self::RegexLayer)
    }

    /// Builds an identity predicate.
    #[must_use]
    pub const fn unique_id(id: i64) -> Self {
        Self::UniqueId(id)
    }

    /// Negates a predicate.
    #[must_use]
    pub fn negate(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Conjoins two predicates.
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Builds a root predicate.
    #[must_use]
    pub const fn root() -> Self {
        Self::Root
    }

    /// Requires the immediate parent to match `inner`.
    #[must_use]
    pub fn parent(inner: Self) -> Self {
        Self::Parent(Box::new(inner))
    }

    /// Requires some proper ancestor to match `inner`.
    #[must_use]
    pub fn ancestor(inner: Self) -> Self {
        Self::Ancestor(Box::new(inner))
    }

    /// Returns whether `node` satisfies this predicate.
    #[must_use]
    pub fn matches<N: SceneNode>(&self, node: N) -> bool {
        match self {
            Self::Name(text) => text.matches(node.name()),
            Self::RegexName(pattern) => pattern.is_match(node.name()),
            Self::Layer(text) => {
                node.layer_name().is_some_and(|layer| text.matches(layer)) || text.matches(node.tag())
            }
            Self::RegexLayer(pattern) => {
                pattern.is_match(node.layer_name().unwrap_or_default())
                    || pattern.is_match(node.tag())
            }
            Self::UniqueId(id) => node.identity() == *id,
            Self::Not(inner) => !inner.matches(node),
            Self::And(left, right) => left.matches(node) && right.matches(node),
            Self::Root => node.is_root(),
            Self::Parent(inner) => node.parent().is_some_and(|parent| inner.matches(parent)),
            Self::Ancestor(inner) => node.ancestors().any(|ancestor| inner.matches(ancestor)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(text) => write!(f, "name({:?})", text.as_str()),
            Self::RegexName(pattern) => write!(f, "regex_name({:?})", pattern.as_str()),
            Self::Layer(text) => write!(f, "layer({:?})", text.as_str()),
            Self::RegexLayer(pattern) => write!(f, "regex_layer({:?})", pattern.as_str()),
            Self::UniqueId(id) => write!(f, "unique_id({id})"),
            Self::Not(inner) => write!(f, "not({inner})"),
            Self::And(left, right) => write!(f, "and({left}, {right})"),
            Self::Root => f.write_str("root()"),
            Self::Parent(inner) => write!(f, "parent({inner})"),
            Self::Ancestor(inner) => write!(f, "ancestor({inner})"),
        }
    }
}
