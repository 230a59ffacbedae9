//! The byte-based tokenizer (lexer).
//!
//! It consumes the input `&str` (as `&[u8]`) left to right and produces
//! `Token`s. Scanning stops at the first lexical error; after that the
//! iterator is exhausted.

use crate::error::LexError;
use crate::limits::Limits;
use crate::token::{Token, TokenKind, TokenSequence};
use memchr::{memchr2, memchr_iter, memrchr};

// --- The Lookup Table (LUT) ---
// A 256-entry array classifying every byte that may start a token.
pub(crate) const W: u8 = 1; // Whitespace
pub(crate) const S: u8 = 2; // Structural
pub(crate) const L: u8 = 3; // Literal keyword
pub(crate) const D: u8 = 4; // Digit or '-'
pub(crate) const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: anything else cannot start a token
    table
};

/// An integer may have at most this many digits, sign excluded.
pub const MAX_INTEGER_DIGITS: usize = 10;

const UNRECOGNIZED: &str = "Unrecognized token";
const INVALID_STRING: &str = "invalid string";
const INTEGER_OVERFLOW: &str = "integer value exceeding the range of 32-bit signed integers";

/// The tokenizer.
///
/// Tracks the byte cursor plus the line and column of that cursor so every
/// token and error can be located.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    cursor: usize,
    line: usize,
    column: usize,
    /// Set once an error has been yielded.
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` over an input string.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// The current byte offset.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn location(&self) -> (usize, usize, usize) {
        (self.cursor, self.line, self.column)
    }

    /// Creates a `LexError` at the current cursor.
    fn error(&self, message: &str) -> LexError {
        Self::error_at(message, self.location())
    }

    fn error_at(message: &str, (position, line, column): (usize, usize, usize)) -> LexError {
        LexError {
            message: message.to_string(),
            position,
            line,
            column,
        }
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        let skipped = self.bytes[self.cursor..]
            .iter()
            .take_while(|&&byte| BYTE_PROPERTIES[usize::from(byte)] == W)
            .count();
        self.advance_to(self.cursor + skipped);
    }

    /// Moves the cursor forward to `target`, updating line and column.
    /// `target` must not be past the end of the input.
    #[inline]
    fn advance_to(&mut self, target: usize) {
        let segment = &self.bytes[self.cursor..target];
        match memrchr(b'\n', segment) {
            Some(last_newline) => {
                self.line += memchr_iter(b'\n', segment).count();
                self.column = segment.len() - last_newline;
            }
            None => self.column += segment.len(),
        }
        self.cursor = target;
    }

    fn lex_structural(&mut self, byte: u8) -> Result<TokenKind, LexError> {
        let kind = match byte {
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            _ => return Err(self.error(UNRECOGNIZED)),
        };
        self.advance_to(self.cursor + 1);
        Ok(kind)
    }

    /// Matches one of `true`, `false` or `null` exactly.
    fn lex_literal(&mut self, byte: u8) -> Result<TokenKind, LexError> {
        let (expected, kind) = match byte {
            b't' => ("true", TokenKind::True),
            b'f' => ("false", TokenKind::False),
            b'n' => ("null", TokenKind::Null),
            _ => return Err(self.error(UNRECOGNIZED)),
        };
        let end = self.cursor + expected.len();
        if self.bytes.get(self.cursor..end) == Some(expected.as_bytes()) {
            self.advance_to(end);
            Ok(kind)
        } else {
            Err(self.error(&format!("expects '{}'", expected)))
        }
    }

    /// Scans a string, resolving the escapes `\\ \n \r \t \"`.
    ///
    /// Runs between escapes are copied whole; `memchr2` finds the next quote
    /// or backslash.
    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.location();
        let mut content = String::new();
        let mut scan = self.cursor + 1;

        loop {
            let special = match memchr2(b'"', b'\\', &self.bytes[scan..]) {
                Some(offset) => scan + offset,
                None => return Err(Self::error_at(INVALID_STRING, start)),
            };
            // Both ends sit next to ASCII bytes, so they are char boundaries.
            content.push_str(&self.input[scan..special]);

            if self.bytes[special] == b'"' {
                self.advance_to(special + 1);
                return Ok(TokenKind::String(content));
            }

            let escaped = match self.bytes.get(special + 1) {
                Some(b'\\') => '\\',
                Some(b'"') => '"',
                Some(b'n') => '\n',
                Some(b'r') => '\r',
                Some(b't') => '\t',
                Some(_) => {
                    self.advance_to(special + 1);
                    return Err(self.error("unsupported escape"));
                }
                None => return Err(Self::error_at(INVALID_STRING, start)),
            };
            content.push(escaped);
            scan = special + 2;
        }
    }

    /// Scans `-?[0-9]+` and validates it as a 32-bit signed integer.
    fn lex_integer(&mut self) -> Result<TokenKind, LexError> {
        let negative = self.bytes[self.cursor] == b'-';
        let digits_start = self.cursor + usize::from(negative);
        let digit_count = self.bytes[digits_start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        let digits = &self.bytes[digits_start..digits_start + digit_count];

        if digits.is_empty() {
            return Err(self.error("expects integer"));
        }
        if digits.len() > MAX_INTEGER_DIGITS {
            return Err(self.error("integer too long"));
        }
        if digits.len() > 1 && digits[0] == b'0' {
            return Err(self.error("too many leading zeros"));
        }

        // Ten digits always fit in an i64.
        let magnitude = digits
            .iter()
            .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));
        let signed = if negative { -magnitude } else { magnitude };
        let value = i32::try_from(signed).map_err(|_| self.error(INTEGER_OVERFLOW))?;

        self.advance_to(digits_start + digit_count);
        Ok(TokenKind::Integer(value))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, LexError>;

    /// Gets the next `Token`, or `None` once the input or an error is reached.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();

        let byte = *self.bytes.get(self.cursor)?;
        let (position, line, column) = self.location();

        let kind = match BYTE_PROPERTIES[usize::from(byte)] {
            S => self.lex_structural(byte),
            L => self.lex_literal(byte),
            D => self.lex_integer(),
            Q => self.lex_string(),
            _ => Err(self.error(UNRECOGNIZED)),
        };

        if kind.is_err() {
            self.failed = true;
        }
        Some(kind.map(|kind| Token {
            kind,
            position,
            line,
            column,
        }))
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Tokenizes as far as possible, returning the valid prefix and the error
/// that stopped the scan, if any.
///
/// When an error occurs the prefix ends at the error's location.
pub(crate) fn tokenize_prefix(source: &str) -> (TokenSequence, Option<LexError>) {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    for result in tokenizer.by_ref() {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => {
                log::trace!("tokenizer stopped at byte {}: {}", error.position, error.message);
                let end = (error.position, error.line, error.column);
                return (TokenSequence::new(tokens, end), Some(error));
            }
        }
    }
    log::debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    (TokenSequence::new(tokens, tokenizer.location()), None)
}

/// Converts `source` into its token sequence.
///
/// # Errors
/// Returns the first `LexError`; no tokens are returned in that case.
///
/// # Examples
/// ```
/// use ctjson::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"{"id": 7}"#).unwrap();
/// let kinds: Vec<_> = tokens.kinds().cloned().collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::LBrace,
///         TokenKind::String("id".to_string()),
///         TokenKind::Colon,
///         TokenKind::Integer(7),
///         TokenKind::RBrace,
///     ]
/// );
/// ```
pub fn tokenize(source: &str) -> Result<TokenSequence, LexError> {
    match tokenize_prefix(source) {
        (_, Some(error)) => Err(error),
        (tokens, None) => Ok(tokens),
    }
}

/// Like [`tokenize`], rejecting inputs larger than `limits.max_input_size`.
pub fn tokenize_with_limits(source: &str, limits: Limits) -> Result<TokenSequence, LexError> {
    limits.check_input(source)?;
    tokenize(source)
}
