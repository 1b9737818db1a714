//! Error types for selector compilation and query evaluation.
//!
//! [`SelectorError`] covers everything that can go wrong while turning
//! selector text into a [`crate::Query`]. [`QueryError`] is what the
//! [`crate::SceneQuery`] facade returns: compile failures wrapped with the
//! offending selector, plus the cardinality failures of `expect_one`.

use thiserror::Error;

use crate::tokenizer::TokenKind;

/// Errors raised while tokenizing, parsing or building predicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectorError {
    /// The selector text is malformed.
    #[error("invalid selector: {message}")]
    InvalidSelector {
        /// Description of the problem.
        message: String,
    },

    /// A quoted string has no closing quote.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote within the trimmed selector.
        offset: usize,
    },

    /// The parser met a token the grammar does not allow at this point.
    #[error("expected {expected}, found {found} '{text}'")]
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// The kind of token actually present.
        found: TokenKind,
        /// The text of the token actually present.
        text: String,
    },

    /// The token stream was driven incorrectly.
    #[error("tokenizer protocol error: {message}")]
    ProtocolError {
        /// Description of the misuse.
        message: String,
    },

    /// A partial-match pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Description of the regex failure.
        message: String,
    },
}

impl SelectorError {
    /// Creates an invalid selector error.
    #[must_use]
    pub fn invalid_selector(message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            message: message.into(),
        }
    }

    /// Creates an unterminated string error.
    #[must_use]
    pub const fn unterminated_string(offset: usize) -> Self {
        Self::UnterminatedString { offset }
    }

    /// Creates an unexpected token error.
    #[must_use]
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: TokenKind,
        text: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found,
            text: text.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by [`crate::SceneQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The selector could not be compiled.
    #[error("query '{selector}' failed: {source}")]
    QueryFailed {
        /// The selector text as supplied.
        selector: String,
        /// The compilation failure.
        #[source]
        source: SelectorError,
    },

    /// `expect_one` found no matching node.
    #[error("no node matches '{selector}'{}", scope_suffix(.scope.as_deref()))]
    NotFound {
        /// The selector text as supplied.
        selector: String,
        /// Name of the scope node, for scoped queries.
        scope: Option<String>,
    },

    /// `expect_one` found more than one matching node.
    #[error("more than one node matches '{selector}'")]
    AmbiguousMatch {
        /// The selector text as supplied.
        selector: String,
    },
}

fn scope_suffix(scope: Option<&str>) -> String {
    scope.map_or_else(String::new, |name| format!(" under '{name}'"))
}

impl QueryError {
    /// Wraps a compilation failure with its selector.
    #[must_use]
    pub fn query_failed(selector: impl Into<String>, source: SelectorError) -> Self {
        Self::QueryFailed {
            selector: selector.into(),
            source,
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(selector: impl Into<String>, scope: Option<String>) -> Self {
        Self::NotFound {
            selector: selector.into(),
            scope,
        }
    }

    /// Creates an ambiguous match error.
    #[must_use]
    pub fn ambiguous_match(selector: impl Into<String>) -> Self {
        Self::AmbiguousMatch {
            selector: selector.into(),
        }
    }

    /// Returns the selector text the error refers to.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::QueryFailed { selector, .. }
            | Self::NotFound { selector, .. }
            | Self::AmbiguousMatch { selector } => selector,
        }
    }
}
