//! The selector facade over a [`Scene`].
//!
//! [`SceneQuery`] compiles selector text through a [`SelectorCompiler`] and
//! filters a pre-order walk of the scene (or of one subtree) with the
//! resulting [`Query`]. Compilation and evaluation are separate, so a
//! compiled query can be evaluated many times.

use std::borrow::Cow;
use std::iter::FusedIterator;

use scene_graph::{PreOrder, Scene, SceneNode};
use tracing::{debug, trace};

use crate::config::QueryConfig;
use crate::error::{QueryError, SelectorError};
use crate::parser::Parser;
use crate::query::Query;
use crate::tokenizer::Tokenizer;

const ENGINE_TARGET: &str = "scene_query::engine";

/// Turns selector text into a [`Query`].
pub trait SelectorCompiler {
    /// Compiles `selector`.
    ///
    /// # Errors
    /// Returns a [`SelectorError`] describing why the selector is invalid.
    fn compile(&self, selector: &str) -> Result<Query, SelectorError>;
}

/// Compiles selectors with [`Tokenizer`] and [`Parser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultCompiler {
    config: QueryConfig,
}

impl DefaultCompiler {
    /// Creates a compiler with the given configuration.
    #[must_use]
    pub const fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Returns the compiler configuration.
    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }
}

impl SelectorCompiler for DefaultCompiler {
    fn compile(&self, selector: &str) -> Result<Query, SelectorError> {
        let limit = self.config.max_selector_len();
        if selector.len() > limit {
            return Err(SelectorError::invalid_selector(format!(
                "selector is {} bytes, longer than the {limit} byte limit",
                selector.len()
            )));
        }
        let tokens = Tokenizer::start(selector)?;
        Parser::with_config(tokens, &self.config).parse()
    }
}

/// Nodes matching a query, in pre-order.
///
/// The walk is lazy: nodes are tested as the iterator is pulled.
#[derive(Debug, Clone)]
pub struct Matches<'q, N: SceneNode> {
    query: Cow<'q, Query>,
    walk: PreOrder<N>,
}

impl<'q, N: SceneNode> Matches<'q, N> {
    /// Filters `walk` by `query`.
    #[must_use]
    pub const fn new(query: Cow<'q, Query>, walk: PreOrder<N>) -> Self {
        Self { query, walk }
    }

    /// Returns the query being evaluated.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl<N: SceneNode> Iterator for Matches<'_, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let query = &self.query;
        self.walk.by_ref().find(|&node| query.matches(node))
    }
}

impl<N: SceneNode> FusedIterator for Matches<'_, N> {}

/// Selects nodes of a scene with selector text.
///
/// # Example
///
/// ```
/// use scene_graph::{SceneGraph, SceneNode};
/// use scene_query::SceneQuery;
///
/// let mut graph = SceneGraph::new();
/// let parent = graph.add_root("Parent");
/// let sphere = graph.add_child(parent, "Sphere3")?;
/// graph.add_child(sphere, "Cube")?;
///
/// let query = SceneQuery::new(&graph);
/// let cube = query.expect_one("/Parent/Sphere3/Cube")?;
/// assert_eq!(cube.name(), "Cube");
/// assert_eq!(query.select_all("?sphere")?.count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SceneQuery<'s, S, C = DefaultCompiler> {
    scene: &'s S,
    compiler: C,
}

impl<'s, S: Scene> SceneQuery<'s, S> {
    /// Queries `scene` with the default compiler.
    #[must_use]
    pub fn new(scene: &'s S) -> Self {
        Self::with_compiler(scene, DefaultCompiler::default())
    }

    /// Queries `scene` with the default compiler using `config`.
    #[must_use]
    pub const fn with_config(scene: &'s S, config: QueryConfig) -> Self {
        Self::with_compiler(scene, DefaultCompiler::new(config))
    }
}

impl<'s, S: Scene, C: SelectorCompiler> SceneQuery<'s, S, C> {
    /// Queries `scene` with a custom selector compiler.
    #[must_use]
    pub const fn with_compiler(scene: &'s S, compiler: C) -> Self {
        Self { scene, compiler }
    }

    /// Returns the scene being queried.
    #[must_use]
    pub const fn scene(&self) -> &'s S {
        self.scene
    }

    /// Returns the selector compiler.
    #[must_use]
    pub const fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Compiles `selector` for later evaluation.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] wrapping the compilation failure.
    pub fn compile(&self, selector: &str) -> Result<Query, QueryError> {
        match self.compiler.compile(selector) {
            Ok(query) => {
                debug!(target: ENGINE_TARGET, selector, "compiled selector");
                trace!(target: ENGINE_TARGET, selector, query = %query, "compiled predicate");
                Ok(query)
            }
            Err(error) => {
                debug!(target: ENGINE_TARGET, selector, %error, "selector failed to compile");
                Err(QueryError::query_failed(selector, error))
            }
        }
    }

    /// Evaluates a compiled query over every tree of the scene.
    #[must_use]
    pub fn evaluate<'q>(&self, query: &'q Query) -> Matches<'q, S::Node<'s>> {
        Matches::new(Cow::Borrowed(query), self.scene.pre_order())
    }

    /// Evaluates a compiled query over `scope` and its subtree.
    #[must_use]
    pub fn evaluate_in<'q>(&self, scope: S::Node<'s>, query: &'q Query) -> Matches<'q, S::Node<'s>> {
        Matches::new(Cow::Borrowed(query), scope.pre_order())
    }

    /// Selects every node of the scene matching `selector`, in pre-order.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] if the selector does not compile.
    pub fn select_all(&self, selector: &str) -> Result<Matches<'static, S::Node<'s>>, QueryError> {
        let query = self.compile(selector)?;
        Ok(Matches::new(Cow::Owned(query), self.scene.pre_order()))
    }

    /// Selects every node of `scope`'s subtree matching `selector`,
    /// including `scope` itself, in pre-order.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] if the selector does not compile.
    pub fn select_all_in(
        &self,
        scope: S::Node<'s>,
        selector: &str,
    ) -> Result<Matches<'static, S::Node<'s>>, QueryError> {
        let query = self.compile(selector)?;
        Ok(Matches::new(Cow::Owned(query), scope.pre_order()))
    }

    /// Returns the first node of the scene matching `selector`, if any.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] if the selector does not compile.
    pub fn select_one(&self, selector: &str) -> Result<Option<S::Node<'s>>, QueryError> {
        Ok(self.select_all(selector)?.next())
    }

    /// Returns the first node of `scope`'s subtree matching `selector`.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] if the selector does not compile.
    pub fn select_one_in(
        &self,
        scope: S::Node<'s>,
        selector: &str,
    ) -> Result<Option<S::Node<'s>>, QueryError> {
        Ok(self.select_all_in(scope, selector)?.next())
    }

    /// Returns the only node of the scene matching `selector`.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] if the selector does not compile,
    /// [`QueryError::NotFound`] if nothing matches, or
    /// [`QueryError::AmbiguousMatch`] if more than one node matches.
    pub fn expect_one(&self, selector: &str) -> Result<S::Node<'s>, QueryError> {
        let matches = self.select_all(selector)?;
        Self::single(selector, None, matches)
    }

    /// Returns the only node of `scope`'s subtree matching `selector`.
    ///
    /// # Errors
    /// Returns [`QueryError::QueryFailed`] if the selector does not compile,
    /// [`QueryError::NotFound`] if nothing matches, or
    /// [`QueryError::AmbiguousMatch`] if more than one node matches.
    pub fn expect_one_in(
        &self,
        scope: S::Node<'s>,
        selector: &str,
    ) -> Result<S::Node<'s>, QueryError> {
        let matches = self.select_all_in(scope, selector)?;
        Self::single(selector, Some(scope), matches)
    }

    fn single(
        selector: &str,
        scope: Option<S::Node<'s>>,
        mut matches: Matches<'_, S::Node<'s>>,
    ) -> Result<S::Node<'s>, QueryError> {
        let Some(first) = matches.next() else {
            let scope_name = scope.map(|node| node.name().to_owned());
            debug!(
                target: ENGINE_TARGET,
                selector,
                scope = scope_name.as_deref(),
                "no node matched"
            );
            return Err(QueryError::not_found(selector, scope_name));
        };
        if matches.next().is_some() {
            debug!(target: ENGINE_TARGET, selector, "more than one node matched");
            return Err(QueryError::ambiguous_match(selector));
        }
        Ok(first)
    }
}
