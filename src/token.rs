//! Defines the `Token` and `TokenKind` types and the finished
//! [`TokenSequence`] handed from the tokenizer to the parser.
//!
//! A token never carries nesting; brackets are flat tokens and structure is
//! resolved by the parser.

use std::fmt::{self, Write};

/// The specific kind of a `Token`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// The `true` literal
    True,
    /// The `false` literal
    False,
    /// The `null` literal
    Null,
    /// A 32-bit signed integer, e.g. `-42`
    Integer(i32),
    /// A string with its escapes already resolved
    String(String),
}

impl TokenKind {
    /// Writes the compact source form of this token.
    pub(crate) fn write_source<W: Write>(&self, w: &mut W) -> fmt::Result {
        match self {
            TokenKind::LBrace => w.write_char('{'),
            TokenKind::RBrace => w.write_char('}'),
            TokenKind::LBracket => w.write_char('['),
            TokenKind::RBracket => w.write_char(']'),
            TokenKind::Comma => w.write_char(','),
            TokenKind::Colon => w.write_char(':'),
            TokenKind::True => w.write_str("true"),
            TokenKind::False => w.write_str("false"),
            TokenKind::Null => w.write_str("null"),
            TokenKind::Integer(n) => write!(w, "{}", n),
            TokenKind::String(s) => write_escaped(s, w),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_source(f)
    }
}

/// A single token produced by the tokenizer, with where it starts.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    /// The kind of the token.
    pub kind: TokenKind,
    /// Byte offset of the token's first character.
    pub position: usize,
    /// The 1-indexed line number where the token starts.
    pub line: usize,
    /// The 1-indexed column number where the token starts.
    pub column: usize,
}

/// The complete, immutable token stream for one source buffer.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct TokenSequence {
    tokens: Vec<Token>,
    /// Where the stream ends: byte offset, line, column.
    end: (usize, usize, usize),
}

impl TokenSequence {
    pub(crate) fn new(tokens: Vec<Token>, end: (usize, usize, usize)) -> Self {
        TokenSequence { tokens, end }
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the source held only whitespace.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterates over the tokens in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Iterates over the token kinds, dropping positions.
    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> + '_ {
        self.tokens.iter().map(|token| &token.kind)
    }

    /// The tokens as a slice.
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Byte offset just past the last scanned byte. For a complete
    /// tokenization this is the source length.
    pub fn end_position(&self) -> usize {
        self.end.0
    }

    /// Offset, line and column where the stream ends.
    pub(crate) fn end_location(&self) -> (usize, usize, usize) {
        self.end
    }

    /// Rebuilds compact source text from the tokens.
    ///
    /// Whitespace is dropped, except that two consecutive integers are
    /// separated by one space so the output re-tokenizes to the same kinds.
    pub fn reconstruct(&self) -> String {
        let mut output = String::new();
        let mut previous_integer = false;
        for token in &self.tokens {
            let is_integer = matches!(token.kind, TokenKind::Integer(_));
            if previous_integer && is_integer {
                output.push(' ');
            }
            // Writing into a `String` cannot fail.
            let _ = token.kind.write_source(&mut output);
            previous_integer = is_integer;
        }
        output
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Writes `s` as a quoted string using the five supported escapes.
pub(crate) fn write_escaped<W: Write>(s: &str, w: &mut W) -> fmt::Result {
    w.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => w.write_str("\\\""),
            '\\' => w.write_str("\\\\"),
            '\n' => w.write_str("\\n"),
            '\r' => w.write_str("\\r"),
            '\t' => w.write_str("\\t"),
            _ => w.write_char(c),
        }?;
    }
    w.write_char('"')
}
