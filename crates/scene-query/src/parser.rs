//! Recursive-descent parser from tokens to [`Query`] trees.
//!
//! Grammar:
//!
//! ```text
//! selector    := descendants
//! name        := QuotedString | Name
//! matcher     := [ "?" ] name
//! atom        := "." matcher | "!" atom | UniqueId | matcher
//! compound    := atom { atom }
//! combinator  := "/" | ">" | Separator
//! descendants := [ "/" ] compound { combinator compound }
//! ```
//!
//! Whitespace next to an explicit `/` or `>`, and after `!`, `.` or `?`, is
//! insignificant. Whitespace between two compounds is the ancestor
//! combinator.

use tracing::trace;

use crate::config::QueryConfig;
use crate::error::SelectorError;
use crate::query::{ExactText, Query, TextPattern};
use crate::tokenizer::{TokenKind, TokenStream};

const PARSER_TARGET: &str = "scene_query::parser";

/// A name, and whether it should be matched partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher<'s> {
    /// The name or pattern text.
    pub text: &'s str,
    /// Whether the text is a regular expression.
    pub partial: bool,
}

/// The relation a combinator imposes between two compounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Parent,
    Ancestor,
}

const fn is_combinator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Slash | TokenKind::GreaterThan | TokenKind::Separator
    )
}

/// Builds a [`Query`] from a [`TokenStream`].
///
/// # Example
///
/// ```
/// use scene_query::{Parser, Tokenizer};
///
/// let query = Parser::new(Tokenizer::start("/Parent/Cube")?).parse()?;
/// assert_eq!(
///     query.to_string(),
///     r#"and(name("cube"), parent(and(name("parent"), root())))"#,
/// );
/// # Ok::<(), scene_query::SelectorError>(())
/// ```
#[derive(Debug)]
pub struct Parser<T> {
    tokens: T,
    regex_size_limit: usize,
    max_nesting_depth: usize,
    nesting_depth: usize,
}

impl<'s, T: TokenStream<'s>> Parser<T> {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new(tokens: T) -> Self {
        Self::with_config(tokens, &QueryConfig::default())
    }

    /// Creates a parser honouring `config`'s pattern limits.
    #[must_use]
    pub const fn with_config(tokens: T, config: &QueryConfig) -> Self {
        Self {
            tokens,
            regex_size_limit: config.regex_size_limit(),
            max_nesting_depth: config.max_nesting_depth(),
            nesting_depth: 0,
        }
    }

    /// Returns the underlying token stream.
    #[must_use]
    pub const fn tokens(&self) -> &T {
        &self.tokens
    }

    /// Parses a whole selector.
    ///
    /// # Errors
    /// Returns the first tokenizing or grammar error encountered.
    pub fn parse(mut self) -> Result<Query, SelectorError> {
        let query = self.descendants()?;
        if !self.tokens.at_end() {
            return Err(self.unexpected("end of selector"));
        }
        trace!(target: PARSER_TARGET, query = %query, "parsed selector");
        Ok(query)
    }

    /// Parses a quoted or bare name.
    ///
    /// # Errors
    /// Returns [`SelectorError::UnexpectedToken`] if the current token is
    /// neither, or [`SelectorError::InvalidSelector`] if the name is empty.
    pub fn name(&mut self) -> Result<&'s str, SelectorError> {
        let text = if self.tokens.token() == TokenKind::QuotedString {
            let quoted = self.tokens.text();
            self.tokens.advance()?;
            quoted
        } else {
            self.tokens.expect(TokenKind::Name)?
        };
        if text.is_empty() {
            return Err(SelectorError::invalid_selector("name is empty"));
        }
        Ok(text)
    }

    /// Parses a name with an optional `?` prefix.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] for a `?` with nothing after
    /// it, or any error from [`Parser::name`].
    pub fn matcher(&mut self) -> Result<Matcher<'s>, SelectorError> {
        let partial = self.tokens.token() == TokenKind::QuestionMark;
        if partial {
            self.tokens.advance()?;
            self.skip_separators()?;
            if self.tokens.at_end() {
                return Err(SelectorError::invalid_selector("question mark by itself"));
            }
        }
        let text = self.name()?;
        Ok(Matcher { text, partial })
    }

    /// Parses one same-node constraint.
    ///
    /// `names_allowed` is cleared once a name or unique id atom is parsed, and
    /// a further one is then rejected. Layer atoms and negations leave it
    /// untouched. Negations nest at most
    /// [`QueryConfig::max_nesting_depth`] deep.
    pub(crate) fn atom(&mut self, names_allowed: &mut bool) -> Result<Query, SelectorError> {
        match self.tokens.token() {
            TokenKind::Dot => {
                self.tokens.advance()?;
                self.skip_separators()?;
                let matcher = self.matcher()?;
                self.layer_query(matcher)
            }
            TokenKind::ExclamationMark => {
                if self.nesting_depth >= self.max_nesting_depth {
                    self.tokens.halt();
                    return Err(SelectorError::invalid_selector(format!(
                        "negations nested deeper than {}",
                        self.max_nesting_depth
                    )));
                }
                self.tokens.advance()?;
                self.skip_separators()?;
                self.nesting_depth += 1;
                let mut inner_allowed = true;
                let inner = self.atom(&mut inner_allowed);
                self.nesting_depth -= 1;
                Ok(Query::negate(inner?))
            }
            TokenKind::UniqueId
            | TokenKind::Name
            | TokenKind::QuotedString
            | TokenKind::QuestionMark => {
                if !*names_allowed {
                    self.tokens.halt();
                    return Err(SelectorError::invalid_selector(
                        "multiple names or ids in a single compound selector",
                    ));
                }
                *names_allowed = false;
                if self.tokens.token() == TokenKind::UniqueId {
                    return self.unique_id();
                }
                let matcher = self.matcher()?;
                self.name_query(matcher)
            }
            _ => Err(self.unexpected("a selector")),
        }
    }

    /// Parses atoms up to the next combinator, ANDing each new atom onto
    /// those before it.
    ///
    /// # Errors
    /// Returns any error from the atoms, including a second name or id.
    pub fn compound(&mut self) -> Result<Query, SelectorError> {
        let mut names_allowed = true;
        let mut query = self.atom(&mut names_allowed)?;
        while !self.tokens.at_end() && !is_combinator(self.tokens.token()) {
            let next = self.atom(&mut names_allowed)?;
            query = Query::and(next, query);
        }
        Ok(query)
    }

    /// Parses an optionally rooted chain of compounds.
    ///
    /// # Errors
    /// Returns any error from the compounds or combinators.
    pub fn descendants(&mut self) -> Result<Query, SelectorError> {
        let rooted = self.tokens.token() == TokenKind::Slash;
        if rooted {
            self.tokens.advance()?;
            self.skip_separators()?;
        }

        let mut query = self.compound()?;
        if rooted {
            query = Query::and(query, Query::root());
        }

        while !self.tokens.at_end() {
            let left = match self.combinator()? {
                Combinator::Parent => Query::parent(query),
                Combinator::Ancestor => Query::ancestor(query),
            };
            let right = self.compound()?;
            query = Query::and(right, left);
        }
        Ok(query)
    }

    fn combinator(&mut self) -> Result<Combinator, SelectorError> {
        let spaced = self.tokens.token() == TokenKind::Separator;
        if spaced {
            self.tokens.advance()?;
        }
        let combinator = match self.tokens.token() {
            TokenKind::Slash => Combinator::Parent,
            TokenKind::GreaterThan => Combinator::Ancestor,
            _ if spaced => return Ok(Combinator::Ancestor),
            _ => return Err(self.unexpected("'/', '>' or whitespace")),
        };
        self.tokens.advance()?;
        self.skip_separators()?;
        Ok(combinator)
    }

    fn unique_id(&mut self) -> Result<Query, SelectorError> {
        let text = self.tokens.expect(TokenKind::UniqueId)?;
        let not_integer =
            || SelectorError::invalid_selector(format!("unique id '{text}' is not an integer"));
        if text.starts_with('+') {
            return Err(not_integer());
        }
        let id = text.parse::<i64>().map_err(|_| not_integer())?;
        Ok(Query::unique_id(id))
    }

    fn name_query(&self, matcher: Matcher<'_>) -> Result<Query, SelectorError> {
        if matcher.partial {
            TextPattern::with_size_limit(matcher.text, self.regex_size_limit).map(Query::RegexName)
        } else {
            ExactText::new(matcher.text).map(Query::Name)
        }
    }

    fn layer_query(&self, matcher: Matcher<'_>) -> Result<Query, SelectorError> {
        if matcher.partial {
            TextPattern::with_size_limit(matcher.text, self.regex_size_limit)
                .map(Query::RegexLayer)
        } else {
            ExactText::new(matcher.text).map(Query::Layer)
        }
    }

    fn skip_separators(&mut self) -> Result<(), SelectorError> {
        while self.tokens.token() == TokenKind::Separator {
            self.tokens.advance()?;
        }
        Ok(())
    }

    fn unexpected(&mut self, expected: &str) -> SelectorError {
        let error =
            SelectorError::unexpected_token(expected, self.tokens.token(), self.tokens.text());
        self.tokens.halt();
        error
    }
}
