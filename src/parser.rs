//! Contains the recursive-descent `Parser`.
//!
//! The parser reads a finished `TokenSequence` by index and never mutates
//! it. Every production is a function of `(position)` returning the parsed
//! piece together with the index of the first token it did not consume:
//!
//! ```text
//! value   := object | array | String | Integer | True | False | Null
//! object  := '{' '}' | '{' members '}'
//! members := member (',' member)*
//! member  := String ':' value
//! array   := '[' ']' | '[' values ']'
//! values  := value (',' value)*
//! ```
//!
//! The first error aborts the parse and is returned unchanged.

use crate::error::SyntaxError;
use crate::limits::Limits;
use crate::token::{Token, TokenKind, TokenSequence};
use crate::value::{Member, ParseNode};

/// A parsed piece and the index of the next unconsumed token.
pub type Step<T> = Result<(T, usize), SyntaxError>;

/// One token of lookahead. Reading past the last token yields
/// `EndOfTokens` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Lookahead<'t> {
    Token(&'t Token),
    EndOfTokens,
}

/// An element parser used by the shared comma-list production.
type Element<'t, T> = fn(&Parser<'t>, usize, usize) -> Step<T>;

/// The recursive-descent parser over one token sequence.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    tokens: &'t TokenSequence,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    /// Creates a parser over `tokens`. Only the depth limit applies here,
    /// capped at `MAX_SUPPORTED_DEPTH`.
    pub fn new(tokens: &'t TokenSequence, limits: Limits) -> Self {
        Parser {
            tokens,
            max_depth: limits.effective_depth(),
        }
    }

    /// Parses one value starting at token `position`.
    ///
    /// Returns the value and the index just past it. Tokens after the value
    /// are left alone; see [`Parser::parse_document`] for the full check.
    pub fn parse_value(&self, position: usize) -> Step<ParseNode> {
        self.value(position, 0)
    }

    /// Parses the whole sequence as exactly one value.
    ///
    /// # Errors
    /// Fails with `expects end of string` if tokens remain after the value.
    pub fn parse_document(&self) -> Result<ParseNode, SyntaxError> {
        let (node, next) = self.parse_value(0)?;
        if next != self.tokens.len() {
            return Err(self.error("expects end of string", next));
        }
        log::debug!("parsed {} tokens into {}", self.tokens.len(), node.type_name());
        Ok(node)
    }

    /// Builds a `SyntaxError` located at token `index`, or at the end of
    /// the stream if `index` is past the last token.
    pub(crate) fn error(&self, message: &str, index: usize) -> SyntaxError {
        let (position, line, column) = match self.tokens.get(index) {
            Some(token) => (token.position, token.line, token.column),
            None => self.tokens.end_location(),
        };
        SyntaxError {
            message: message.to_string(),
            token_index: index,
            position,
            line,
            column,
        }
    }

    fn peek(&self, index: usize) -> Lookahead<'t> {
        match self.tokens.get(index) {
            Some(token) => Lookahead::Token(token),
            None => Lookahead::EndOfTokens,
        }
    }

    fn is_kind(&self, index: usize, kind: &TokenKind) -> bool {
        matches!(self.peek(index), Lookahead::Token(token) if token.kind == *kind)
    }

    /// `value` at nesting `depth`.
    fn value(&self, position: usize, depth: usize) -> Step<ParseNode> {
        let token = match self.peek(position) {
            Lookahead::Token(token) => token,
            Lookahead::EndOfTokens => return Err(self.error("expects Value", position)),
        };
        let node = match &token.kind {
            TokenKind::LBrace => return self.object(position, depth),
            TokenKind::LBracket => return self.array(position, depth),
            TokenKind::String(s) => ParseNode::String(s.clone()),
            TokenKind::Integer(n) => ParseNode::Integer(*n),
            TokenKind::True => ParseNode::True,
            TokenKind::False => ParseNode::False,
            TokenKind::Null => ParseNode::Null,
            TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Colon => return Err(self.error("expects Value", position)),
        };
        Ok((node, position + 1))
    }

    fn object(&self, open: usize, depth: usize) -> Step<ParseNode> {
        self.delimited(
            open,
            depth,
            &TokenKind::RBrace,
            "expects '}'",
            Self::member,
            ParseNode::Object,
        )
    }

    fn array(&self, open: usize, depth: usize) -> Step<ParseNode> {
        self.delimited(
            open,
            depth,
            &TokenKind::RBracket,
            "expects ']'",
            Self::value,
            ParseNode::Array,
        )
    }

    /// `member := String ':' value`
    fn member(&self, position: usize, depth: usize) -> Step<Member> {
        let key = match self.peek(position) {
            Lookahead::Token(Token {
                kind: TokenKind::String(key),
                ..
            }) => key.clone(),
            _ => return Err(self.error("expects String", position)),
        };
        if !self.is_kind(position + 1, &TokenKind::Colon) {
            return Err(self.error("expects ':'", position + 1));
        }
        let (value, next) = self.value(position + 2, depth)?;
        Ok((Member { key, value }, next))
    }

    /// A bracketed, possibly empty, comma-separated list.
    ///
    /// `open` is the index of the opening bracket. An immediately following
    /// `close` yields an empty container without entering the list parser.
    fn delimited<T>(
        &self,
        open: usize,
        depth: usize,
        close: &TokenKind,
        missing_close: &str,
        element: Element<'t, T>,
        build: fn(Vec<T>) -> ParseNode,
    ) -> Step<ParseNode> {
        if depth >= self.max_depth {
            return Err(self.error("maximum nesting depth exceeded", open));
        }
        let first = open + 1;
        if self.is_kind(first, close) {
            return Ok((build(Vec::new()), first + 1));
        }
        let (items, end) = self.comma_list(first, depth + 1, element)?;
        if !self.is_kind(end, close) {
            return Err(self.error(missing_close, end));
        }
        Ok((build(items), end + 1))
    }

    /// `element (',' element)*`. Stops at the first non-comma lookahead and
    /// returns its index for the caller to check.
    fn comma_list<T>(&self, start: usize, depth: usize, element: Element<'t, T>) -> Step<Vec<T>> {
        let mut items = Vec::new();
        let mut position = start;
        loop {
            let (item, next) = element(self, position, depth)?;
            items.push(item);
            if !self.is_kind(next, &TokenKind::Comma) {
                return Ok((items, next));
            }
            position = next + 1;
        }
    }
}

/// Parses an already tokenized sequence as one complete document.
///
/// # Errors
/// Returns the first `SyntaxError`.
pub fn parse_tokens(tokens: &TokenSequence, limits: Limits) -> Result<ParseNode, SyntaxError> {
    Parser::new(tokens, limits).parse_document()
}
