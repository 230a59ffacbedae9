//! Contains the error types for tokenizing and parsing.
//!
//! There are two structurally distinct failures: a [`LexError`] produced
//! while scanning raw text, and a [`SyntaxError`] produced while matching the
//! token stream against the grammar. [`ParseError`] wraps either one and is
//! what [`crate::parse`] returns.
//!
//! Every error carries the zero-based byte offset where it was detected,
//! along with the 1-indexed line and column of that offset for display.
use thiserror::Error;

/// A failure while scanning raw text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error: {message} at line {line}, column {column}.")]
pub struct LexError {
    /// A description of what went wrong.
    pub message: String,
    /// The byte offset where scanning failed.
    pub position: usize,
    /// The line number (1-indexed) of `position`.
    pub line: usize,
    /// The column number (1-indexed, in bytes) of `position`.
    pub column: usize,
}

/// A failure while matching tokens against the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error: {message} at line {line}, column {column}.")]
pub struct SyntaxError {
    /// A description of what went wrong.
    pub message: String,
    /// Index of the offending token. Equals the token count when the
    /// stream ended while more input was expected.
    pub token_index: usize,
    /// Byte offset of the offending token, or the source length at the
    /// end of the stream.
    pub position: usize,
    /// The line number (1-indexed) of `position`.
    pub line: usize,
    /// The column number (1-indexed, in bytes) of `position`.
    pub column: usize,
}

/// The error type returned by [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Lexical(#[from] LexError),
    /// The token stream did not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ParseError::Lexical(e) => &e.message,
            ParseError::Syntax(e) => &e.message,
        }
    }

    /// The byte offset where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.position,
            ParseError::Syntax(e) => e.position,
        }
    }

    /// The 1-indexed line of [`ParseError::position`].
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.line,
            ParseError::Syntax(e) => e.line,
        }
    }

    /// The 1-indexed column of [`ParseError::position`].
    pub fn column(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.column,
            ParseError::Syntax(e) => e.column,
        }
    }

    /// Returns `true` if the tokenizer produced this error.
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical(_))
    }

    /// Returns `true` if the parser produced this error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }
}
