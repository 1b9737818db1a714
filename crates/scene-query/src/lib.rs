//! Selector queries over scene graphs.
//!
//! This crate compiles a small CSS-like selector language into node
//! predicates and evaluates them against any [`Scene`]:
//!
//! - **Tokenizing** via [`Tokenizer`], a cursor implementing [`TokenStream`]
//! - **Parsing** via [`Parser`], a recursive-descent parser producing a
//!   [`Query`]
//! - **Evaluation** via [`SceneQuery`], which filters pre-order walks with a
//!   compiled query and offers select-all, select-one and expect-one lookups
//!
//! # Selector syntax
//!
//! | Selector            | Matches                                          |
//! |---------------------|--------------------------------------------------|
//! | `Cube`              | nodes named `cube`, ignoring case                |
//! | `"Big Cube"`        | nodes named `big cube`                           |
//! | `?sphere`           | nodes whose name matches the regex `sphere`      |
//! | `#42`               | the node with identity 42 (`#-3` for negatives)  |
//! | `.Water`            | nodes on layer `Water` or tagged `Water`         |
//! | `.?wat`             | nodes whose layer name or tag matches `wat`      |
//! | `!Cube`             | nodes not named `cube`                           |
//! | `Cube.Water`        | nodes named `cube` on layer or tag `Water`       |
//! | `Parent/Cube`       | `Cube` nodes whose parent is `Parent`            |
//! | `Parent>Cube`       | `Cube` nodes with some ancestor `Parent`         |
//! | `Parent Cube`       | same as `Parent>Cube`                            |
//! | `/Parent/Cube`      | as `Parent/Cube`, with `Parent` a root           |
//!
//! Commas are not part of the language; use a quoted name for a node whose
//! name contains one.
//!
//! # Example
//!
//! ```
//! use scene_graph::{SceneGraph, SceneNode};
//! use scene_query::SceneQuery;
//!
//! let mut graph = SceneGraph::new();
//! let parent = graph.add_root("Parent");
//! graph.add_child(parent, "Cube")?;
//!
//! let query = SceneQuery::new(&graph);
//! let names: Vec<_> = query.select_all("Parent>cube")?.map(|n| n.name().to_owned()).collect();
//! assert_eq!(names, ["Cube"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod engine;
mod error;
mod parser;
mod query;
mod tokenizer;

pub use config::QueryConfig;
pub use engine::{DefaultCompiler, Matches, SceneQuery, SelectorCompiler};
pub use error::{QueryError, SelectorError};
pub use parser::{Matcher, Parser};
pub use query::{ExactText, Query, TextPattern};
pub use scene_graph::{Scene, SceneNode};
pub use tokenizer::{Token, TokenKind, TokenStream, Tokenizer};

#[cfg(test)]
mod tests;
