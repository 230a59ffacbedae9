//! # ctjson
//!
//! `ctjson` is a small JSON tokenizer and recursive-descent parser for an
//! integer-only JSON subset, built from scratch in safe Rust.
//!
//! ## Key Features
//!
//! * **Two clean stages:** [`tokenize`] turns text into a flat
//!   [`TokenSequence`]; the [`Parser`] walks it by index and builds a
//!   [`ParseNode`] tree.
//! * **Positioned errors:** every failure carries a message plus the byte
//!   offset, line and column where it was detected.
//! * **Strict integers:** numbers are `-?(0|[1-9][0-9]*)` and must fit in an
//!   `i32`. There are no floats.
//! * **Round trips:** [`reconstruct`] rebuilds compact text from tokens, and
//!   [`ParseNode::to_json_string`] writes a tree back as JSON.
//! * **Bounded:** input size and nesting depth are capped by [`Limits`].
//!
//! ## Quick Start
//!
//! ```
//! use ctjson::{parse, pretty_print, ParseNode};
//!
//! let node = parse(r#"{"a": [1, 2, {"b": true}]}"#).unwrap();
//! let a = node.get("a").unwrap();
//! assert_eq!(a.get_index(0), Some(&ParseNode::Integer(1)));
//! assert_eq!(a.get_index(2).and_then(|b| b.get("b")), Some(&ParseNode::True));
//!
//! println!("{}", pretty_print(&node, 2));
//! ```
//!
//! Errors report what was expected and where:
//!
//! ```
//! let err = ctjson::parse(r#"{"a": 1"#).unwrap_err();
//! assert_eq!(err.message(), "expects '}'");
//! assert_eq!(err.position(), 7);
//! ```

/// Contains the `LexError`, `SyntaxError` and `ParseError` types.
pub mod error;
/// Contains the `Limits` applied to untrusted input.
pub mod limits;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// Contains the `Token`, `TokenKind` and `TokenSequence` types.
pub mod token;
/// Contains the byte-based `Tokenizer`.
pub mod tokenizer;
/// Contains the `ParseNode` tree and its serialization.
pub mod value;

pub use error::{LexError, ParseError, SyntaxError};
pub use limits::{Limits, DEFAULT_MAX_DEPTH, MAX_JSON_SIZE_BYTES, MAX_SUPPORTED_DEPTH};
pub use parser::{parse_tokens, Parser};
pub use token::{Token, TokenKind, TokenSequence};
pub use tokenizer::{tokenize, tokenize_with_limits, Tokenizer};
pub use value::{pretty_print, Member, ParseNode};

/// Rebuilds compact JSON text from a token sequence.
///
/// The result re-tokenizes to the same sequence of token kinds.
pub fn reconstruct(tokens: &TokenSequence) -> String {
    tokens.reconstruct()
}

/// Parses `source` into a `ParseNode` using the default [`Limits`].
///
/// # Errors
/// Returns a `ParseError` for the first lexical or syntax error in the
/// input.
pub fn parse(source: &str) -> Result<ParseNode, ParseError> {
    parse_with_limits(source, Limits::default())
}

/// Parses `source` into a `ParseNode` under the given limits.
///
/// The input is tokenized first. If the tokenizer stops early, the parser
/// still runs over the tokens before the failure, and whichever problem
/// comes first in the source is reported:
///
/// * a grammar error inside the valid prefix is returned as is;
/// * if the parser ran out of tokens, the lexical error is returned;
/// * if a complete value ends right where scanning failed, the rest of the
///   input is trailing content and `expects end of string` is returned.
///
/// # Errors
/// Returns the `ParseError` chosen as above.
pub fn parse_with_limits(source: &str, limits: Limits) -> Result<ParseNode, ParseError> {
    limits.check_input(source)?;
    let (tokens, lex_error) = tokenizer::tokenize_prefix(source);
    let parser = Parser::new(&tokens, limits);

    match (parser.parse_value(0), lex_error) {
        (Err(syntax), Some(lexical)) if syntax.token_index == tokens.len() => {
            Err(lexical.into())
        }
        (Err(syntax), _) => Err(syntax.into()),
        (Ok((node, next)), lex_error) => {
            if next == tokens.len() && lex_error.is_none() {
                log::debug!("parsed {} tokens into {}", tokens.len(), node.type_name());
                Ok(node)
            } else {
                Err(parser.error("expects end of string", next).into())
            }
        }
    }
}

// --- Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as SerdeValue;

    const OVERFLOW: &str = "integer value exceeding the range of 32-bit signed integers";

    const CPPCONFIG: &str = r#"
  {
  "configuration": {
    "name": "Linux",
    "intelliSenseMode": "linux-clang-x64",
    "compilerPath": "/usr/bin/clang++-16",
    "cStandard": "c17",
    "cppStandard": "c++20",
    "includePath": [
      "/usr/local/boost_1_80_0/",
      "/home/gkxx/exercises/small_exercises/"
    ],
    "compilerArgs": [
      "-Wall",
      "-Wpedantic",
      "-Wextra"
    ]
  },
  "version": 4
}
"#;

    fn error_of(input: &str) -> (String, usize) {
        let err = parse(input).unwrap_err();
        (err.message().to_string(), err.position())
    }

    #[test]
    fn test_integer_boundaries() {
        assert_eq!(parse("2147483647").unwrap(), ParseNode::Integer(2147483647));
        assert_eq!(parse("-2147483648").unwrap(), ParseNode::Integer(-2147483648));
        assert_eq!(error_of("2147483648"), (OVERFLOW.to_string(), 0));
        assert_eq!(error_of("-2147483649"), (OVERFLOW.to_string(), 0));
        assert!(parse("2147483648").unwrap_err().is_lexical());
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(parse("0").unwrap(), ParseNode::Integer(0));
        assert_eq!(error_of("01"), ("too many leading zeros".to_string(), 0));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(parse("\"a\\nb\"").unwrap(), ParseNode::from("a\nb"));
        assert_eq!(error_of("\"a\\xb\"").0, "unsupported escape");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("{}").unwrap(), ParseNode::Object(vec![]));
        assert_eq!(parse("[]").unwrap(), ParseNode::Array(vec![]));
    }

    #[test]
    fn test_nested_structure() {
        let node = parse(r#"{"a":[1,2,{"b":true}]}"#).unwrap();
        let expected = ParseNode::Object(vec![Member::new(
            "a",
            ParseNode::Array(vec![
                ParseNode::Integer(1),
                ParseNode::Integer(2),
                ParseNode::Object(vec![Member::new("b", ParseNode::True)]),
            ]),
        )]);
        assert_eq!(node, expected);
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse("{} x").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.message(), "expects end of string");
        assert_eq!(err.position(), 3);

        assert_eq!(error_of("{} {}"), ("expects end of string".to_string(), 3));
        assert_eq!(error_of("1 2"), ("expects end of string".to_string(), 2));
    }

    #[test]
    fn test_unterminated_structure() {
        assert_eq!(error_of(r#"{"a":1"#), ("expects '}'".to_string(), 6));
        assert_eq!(error_of("[1, 2"), ("expects ']'".to_string(), 5));
    }

    #[test]
    fn test_earliest_error_wins() {
        // The grammar error comes before the bad character.
        let err = parse("[1 2 @]").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.message(), "expects ']'");
        assert_eq!(err.position(), 3);

        // The parser runs out of tokens at the bad character.
        let err = parse("[1, 2, @]").unwrap_err();
        assert!(err.is_lexical());
        assert_eq!(err.message(), "Unrecognized token");
        assert_eq!(err.position(), 7);

        let err = parse(r#"{"a": tru}"#).unwrap_err();
        assert!(err.is_lexical());
        assert_eq!(err.message(), "expects 'true'");
        assert_eq!(err.position(), 6);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(error_of(""), ("expects Value".to_string(), 0));
        assert_eq!(error_of("   "), ("expects Value".to_string(), 3));
    }

    #[test]
    fn test_size_limit() {
        let limits = Limits {
            max_input_size: 8,
            ..Limits::default()
        };
        assert!(parse_with_limits("[1,2,3]", limits).is_ok());
        let err = parse_with_limits("[1,2,3,4]", limits).unwrap_err();
        assert!(err.is_lexical());
        assert_eq!(err.message(), "input exceeds maximum size limit");
    }

    #[test]
    fn test_unlimited_depth() {
        let input = "[".repeat(150) + &"]".repeat(150);
        assert!(parse(&input).is_err());
        assert!(parse_with_limits(&input, Limits::unlimited()).is_ok());
    }

    #[test]
    fn test_huge_depth_is_rejected_not_overflowed() {
        let input = "[".repeat(100_000) + &"]".repeat(100_000);
        for limits in [
            Limits::unlimited(),
            Limits {
                max_depth: usize::MAX,
                ..Limits::default()
            },
        ] {
            let err = parse_with_limits(&input, limits).unwrap_err();
            assert!(err.is_syntax());
            assert_eq!(err.message(), "maximum nesting depth exceeded");
            assert_eq!(err.position(), MAX_SUPPORTED_DEPTH);
        }
    }

    #[test]
    fn test_unlexable_tail_after_value() {
        assert_eq!(error_of("1.5"), ("expects end of string".to_string(), 1));
        assert_eq!(error_of("1 01"), ("expects end of string".to_string(), 2));
        // Alone, the same text is a lexical error.
        assert_eq!(error_of(".5"), ("Unrecognized token".to_string(), 0));
        assert_eq!(error_of("01"), ("too many leading zeros".to_string(), 0));
    }

    #[test]
    fn test_determinism() {
        for input in [CPPCONFIG, "[1, {\"a\": }]", "{} x", "\"\\q\""] {
            assert_eq!(parse(input), parse(input));
        }
    }

    #[test]
    fn test_token_round_trip() {
        let inputs = [
            CPPCONFIG,
            r#"[1, -2, "a\"b\\c\n", true, false, null, {}, []]"#,
            "  {  }  ",
            "1 2 3",
        ];
        for input in inputs {
            let tokens = tokenize(input).unwrap();
            let rebuilt = reconstruct(&tokens);
            let again = tokenize(&rebuilt).unwrap();
            assert!(
                tokens.kinds().eq(again.kinds()),
                "round trip changed tokens for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_reconstruct_is_compact_json() {
        let tokens = tokenize(CPPCONFIG).unwrap();
        let rebuilt = reconstruct(&tokens);
        assert!(!rebuilt.contains('\n'));
        let ours: SerdeValue = serde_json::from_str(&rebuilt).unwrap();
        let theirs: SerdeValue = serde_json::from_str(CPPCONFIG).unwrap();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_tree_round_trip() {
        let node = parse(CPPCONFIG).unwrap();
        let serialized = node.to_json_string();
        assert_eq!(parse(&serialized).unwrap(), node);

        let ours: SerdeValue = serde_json::from_str(&serialized).unwrap();
        let theirs: SerdeValue = serde_json::from_str(CPPCONFIG).unwrap();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_object_lookup() {
        let node = parse(CPPCONFIG).unwrap();
        let config = node.get("configuration").unwrap();
        assert_eq!(
            config.get("intelliSenseMode").and_then(ParseNode::as_str),
            Some("linux-clang-x64")
        );
        assert_eq!(
            config.get("includePath"),
            Some(&ParseNode::array_of_strings([
                "/usr/local/boost_1_80_0/",
                "/home/gkxx/exercises/small_exercises/",
            ]))
        );
        assert_eq!(node.get("version").and_then(ParseNode::as_i32), Some(4));
        assert_eq!(node.get("hello"), None);
    }

    #[test]
    fn test_duplicate_keys_are_preserved() {
        let node = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(node.len(), Some(3));
        assert_eq!(node.get("a"), Some(&ParseNode::Integer(3)));
    }

    #[test]
    fn test_pretty_print_document() {
        let node = parse(r#"{"version": 4, "tags": ["a"], "none": {}}"#).unwrap();
        let expected = "\
Object<
    Member<\"version\", Integer<4>>,
    Member<\"tags\", Array<
        String<\"a\">
    >>,
    Member<\"none\", Object<>>
>";
        assert_eq!(pretty_print(&node, 4), expected);
    }

    #[test]
    fn test_error_display() {
        let err = parse("[\n  1,\n  ?\n]").unwrap_err();
        assert_eq!(err.to_string(), "Error: Unrecognized token at line 3, column 3.");
    }
}
