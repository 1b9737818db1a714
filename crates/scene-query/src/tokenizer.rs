//! Lexer for selector text.
//!
//! The tokenizer is a cursor: it always holds exactly one current token and
//! [`TokenStream::advance`] moves it forward. Whitespace between two tokens is
//! surfaced as an explicit [`TokenKind::Separator`] so the parser can treat it
//! as a combinator.

use std::fmt;

use tracing::trace;

use crate::error::SelectorError;

const TOKENIZER_TARGET: &str = "scene_query::tokenizer";

/// The only character treated as whitespace inside a selector.
const SPACE: char = ' ';

/// Characters that end a name or unique id.
const NAME_TERMINATORS: [char; 12] = [SPACE, '#', '?', '!', '.', '/', '>', ',', ':', ';', '"', '\''];

fn is_name_terminator(ch: char) -> bool {
    NAME_TERMINATORS.contains(&ch)
}

/// The kind of a selector token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No more input.
    End,
    /// A bare name.
    Name,
    /// `?`, marking a partial match.
    QuestionMark,
    /// `!`, negating the following atom.
    ExclamationMark,
    /// `.`, introducing a layer or tag.
    Dot,
    /// `#` followed by an id; the token text excludes the `#`.
    UniqueId,
    /// A single- or double-quoted string; the token text excludes the quotes.
    QuotedString,
    /// `>`, the ancestor combinator.
    GreaterThan,
    /// `/`, the parent combinator or root anchor.
    Slash,
    /// `:` (reserved).
    Colon,
    /// `;` (reserved).
    SemiColon,
    /// Whitespace between two tokens.
    Separator,
}

impl TokenKind {
    const fn punctuation(ch: char) -> Option<Self> {
        match ch {
            '?' => Some(Self::QuestionMark),
            '>' => Some(Self::GreaterThan),
            '!' => Some(Self::ExclamationMark),
            '/' => Some(Self::Slash),
            '.' => Some(Self::Dot),
            ':' => Some(Self::Colon),
            ';' => Some(Self::SemiColon),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::End => "end of selector",
            Self::Name => "name",
            Self::QuestionMark => "'?'",
            Self::ExclamationMark => "'!'",
            Self::Dot => "'.'",
            Self::UniqueId => "unique id",
            Self::QuotedString => "quoted string",
            Self::GreaterThan => "'>'",
            Self::Slash => "'/'",
            Self::Colon => "':'",
            Self::SemiColon => "';'",
            Self::Separator => "whitespace",
        };
        f.write_str(label)
    }
}

/// A token and the text it was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    /// The token's kind.
    pub kind: TokenKind,
    /// The token's text, borrowed from the selector.
    pub text: &'s str,
}

impl<'s> Token<'s> {
    /// Creates a token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'s str) -> Self {
        Self { kind, text }
    }
}

/// A cursor over selector tokens, consumed by [`crate::Parser`].
pub trait TokenStream<'s> {
    /// Returns the kind of the current token.
    fn token(&self) -> TokenKind;

    /// Returns the text of the current token.
    fn text(&self) -> &'s str;

    /// Moves to the next token.
    ///
    /// # Errors
    /// Returns [`SelectorError::ProtocolError`] when already at
    /// [`TokenKind::End`], or a lexing error for malformed input.
    fn advance(&mut self) -> Result<(), SelectorError>;

    /// Abandons the remaining input, leaving the stream at
    /// [`TokenKind::End`].
    fn halt(&mut self);

    /// Returns whether the stream has reached [`TokenKind::End`].
    fn at_end(&self) -> bool {
        self.token() == TokenKind::End
    }

    /// Consumes the current token if it has the given kind.
    ///
    /// On a mismatch the stream is halted.
    ///
    /// # Errors
    /// Returns [`SelectorError::UnexpectedToken`] when the current token is
    /// not `kind`, or any error from [`TokenStream::advance`].
    fn expect(&mut self, kind: TokenKind) -> Result<&'s str, SelectorError> {
        let found = self.token();
        let text = self.text();
        if found == kind {
            self.advance()?;
            return Ok(text);
        }
        self.halt();
        Err(SelectorError::unexpected_token(kind.to_string(), found, text))
    }
}

/// Lexes a selector one token at a time.
///
/// # Example
///
/// ```
/// use scene_query::{TokenKind, TokenStream, Tokenizer};
///
/// let mut tokens = Tokenizer::start("Parent/Cube")?;
/// assert_eq!(tokens.expect(TokenKind::Name)?, "Parent");
/// assert_eq!(tokens.token(), TokenKind::Slash);
/// # Ok::<(), scene_query::SelectorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'s> {
    input: &'s str,
    position: usize,
    kind: TokenKind,
    text: &'s str,
}

impl<'s> Tokenizer<'s> {
    /// Trims `selector` and lexes its first token.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidSelector`] if the trimmed text is
    /// empty, or any lexing error raised by the first token.
    pub fn start(selector: &'s str) -> Result<Self, SelectorError> {
        let input = selector.trim();
        if input.is_empty() {
            return Err(SelectorError::invalid_selector(
                "selector is empty or whitespace",
            ));
        }
        let mut tokenizer = Self {
            input,
            position: 0,
            kind: TokenKind::End,
            text: "",
        };
        tokenizer.lex()?;
        Ok(tokenizer)
    }

    /// Lexes the whole selector, including the trailing [`TokenKind::End`].
    ///
    /// # Errors
    /// Returns the first error raised by [`Tokenizer::start`] or
    /// [`TokenStream::advance`].
    pub fn tokenize(selector: &'s str) -> Result<Vec<Token<'s>>, SelectorError> {
        let mut tokenizer = Self::start(selector)?;
        let mut tokens = vec![tokenizer.current()];
        while !tokenizer.at_end() {
            tokenizer.advance()?;
            tokens.push(tokenizer.current());
        }
        Ok(tokens)
    }

    /// Returns the current token.
    #[must_use]
    pub const fn current(&self) -> Token<'s> {
        Token::new(self.kind, self.text)
    }

    fn rest(&self) -> &'s str {
        self.input.get(self.position..).unwrap_or_default()
    }

    const fn set(&mut self, kind: TokenKind, text: &'s str) {
        self.kind = kind;
        self.text = text;
    }

    fn lex(&mut self) -> Result<(), SelectorError> {
        let result = self.lex_token();
        if result.is_err() {
            self.halt();
        }
        trace!(target: TOKENIZER_TARGET, kind = %self.kind, text = self.text, "lexed token");
        result
    }

    fn lex_token(&mut self) -> Result<(), SelectorError> {
        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            self.set(TokenKind::End, "");
            return Ok(());
        };

        if first == SPACE {
            let remaining = rest.trim_start_matches(SPACE);
            self.position += rest.len() - remaining.len();
            let kind = if remaining.is_empty() {
                TokenKind::End
            } else {
                TokenKind::Separator
            };
            self.set(kind, "");
            return Ok(());
        }

        if let Some(kind) = TokenKind::punctuation(first) {
            let (text, _) = rest.split_at(first.len_utf8());
            self.position += text.len();
            self.set(kind, text);
            return Ok(());
        }

        match first {
            '"' | '\'' => self.lex_quoted(first, rest),
            '#' => self.lex_unique_id(rest),
            ',' => Err(SelectorError::invalid_selector(format!(
                "unexpected ',' at byte {}",
                self.position
            ))),
            _ => {
                let text = Self::leading_name(rest, first.len_utf8());
                self.position += text.len();
                self.set(TokenKind::Name, text);
                Ok(())
            }
        }
    }

    fn lex_quoted(&mut self, quote: char, rest: &'s str) -> Result<(), SelectorError> {
        let (_, body) = rest.split_at(quote.len_utf8());
        let Some(close) = body.find(quote) else {
            return Err(SelectorError::unterminated_string(self.position));
        };
        let (text, _) = body.split_at(close);
        self.position += 2 * quote.len_utf8() + text.len();
        self.set(TokenKind::QuotedString, text);
        Ok(())
    }

    fn lex_unique_id(&mut self, rest: &'s str) -> Result<(), SelectorError> {
        let (_, body) = rest.split_at('#'.len_utf8());
        match body.chars().next() {
            Some(ch) if !is_name_terminator(ch) => {
                let text = Self::leading_name(body, ch.len_utf8());
                self.position += '#'.len_utf8() + text.len();
                self.set(TokenKind::UniqueId, text);
                Ok(())
            }
            _ => Err(SelectorError::invalid_selector(
                "'#' must be followed by a unique id",
            )),
        }
    }

    /// Returns the prefix of `text` up to the next name terminator, always
    /// including the first `skip` bytes.
    fn leading_name(text: &'s str, skip: usize) -> &'s str {
        let (head, tail) = text.split_at(skip);
        let len = head.len() + tail.find(is_name_terminator).unwrap_or(tail.len());
        let (name, _) = text.split_at(len);
        name
    }
}

impl<'s> TokenStream<'s> for Tokenizer<'s> {
    fn token(&self) -> TokenKind {
        self.kind
    }

    fn text(&self) -> &'s str {
        self.text
    }

    fn advance(&mut self) -> Result<(), SelectorError> {
        if self.at_end() {
            return Err(SelectorError::protocol(
                "advanced past the end of the selector",
            ));
        }
        self.lex()
    }

    fn halt(&mut self) {
        self.position = self.input.len();
        self.set(TokenKind::End, "");
    }
}
