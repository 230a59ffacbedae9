//! Contains the `ParseNode` tree produced by the parser, its accessors, and
//! the two ways of writing a tree back out: compact JSON and the structural
//! dump produced by [`pretty_print`].
use crate::token::write_escaped;
use std::fmt;

/// A node in the parsed document tree.
///
/// Objects keep their members in source order, duplicates included.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseNode {
    /// `null`
    Null,
    /// `true`
    True,
    /// `false`
    False,
    /// A 32-bit signed integer.
    Integer(i32),
    /// A string, escapes resolved.
    String(String),
    /// An ordered list of values.
    Array(Vec<ParseNode>),
    /// An ordered list of key/value members.
    Object(Vec<Member>),
}

/// A single `"key": value` pair inside an object.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Member {
    /// The member's key.
    pub key: String,
    /// The member's value.
    pub value: ParseNode,
}

impl Member {
    /// Creates a member.
    pub fn new(key: impl Into<String>, value: ParseNode) -> Self {
        Member {
            key: key.into(),
            value,
        }
    }
}

impl From<bool> for ParseNode {
    fn from(value: bool) -> Self {
        if value {
            ParseNode::True
        } else {
            ParseNode::False
        }
    }
}

impl From<i32> for ParseNode {
    fn from(value: i32) -> Self {
        ParseNode::Integer(value)
    }
}

impl From<&str> for ParseNode {
    fn from(value: &str) -> Self {
        ParseNode::String(value.to_string())
    }
}

impl From<String> for ParseNode {
    fn from(value: String) -> Self {
        ParseNode::String(value)
    }
}

impl ParseNode {
    /// Builds an array of strings.
    pub fn array_of_strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParseNode::Array(
            items
                .into_iter()
                .map(|s| ParseNode::String(s.into()))
                .collect(),
        )
    }

    /// Returns true if this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ParseNode::Null)
    }

    /// Returns true if this is `true` or `false`.
    pub fn is_bool(&self) -> bool {
        matches!(self, ParseNode::True | ParseNode::False)
    }

    /// Returns true if this is an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, ParseNode::Integer(_))
    }

    /// Returns true if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, ParseNode::String(_))
    }

    /// Returns true if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, ParseNode::Array(_))
    }

    /// Returns true if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, ParseNode::Object(_))
    }

    /// Returns the boolean if this is `true` or `false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParseNode::True => Some(true),
            ParseNode::False => Some(false),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParseNode::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string contents if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParseNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    pub fn as_array(&self) -> Option<&[ParseNode]> {
        match self {
            ParseNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the members if this is an object.
    pub fn as_object(&self) -> Option<&[Member]> {
        match self {
            ParseNode::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Looks up a member's value by key.
    ///
    /// Keys are not deduplicated at parse time; when a key repeats, the last
    /// occurrence wins. Use [`ParseNode::get_all`] to see every occurrence.
    pub fn get(&self, key: &str) -> Option<&ParseNode> {
        self.as_object()?
            .iter()
            .rev()
            .find(|member| member.key == key)
            .map(|member| &member.value)
    }

    /// Every value stored under `key`, in source order. Empty for
    /// non-objects.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ParseNode> + 'a {
        self.as_object()
            .unwrap_or_default()
            .iter()
            .filter(move |member| member.key == key)
            .map(|member| &member.value)
    }

    /// Returns the element at `index` if this is an array.
    pub fn get_index(&self, index: usize) -> Option<&ParseNode> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Number of elements or members; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            ParseNode::Array(items) => Some(items.len()),
            ParseNode::Object(members) => Some(members.len()),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParseNode::Null => "null",
            ParseNode::True | ParseNode::False => "boolean",
            ParseNode::Integer(_) => "integer",
            ParseNode::String(_) => "string",
            ParseNode::Array(_) => "array",
            ParseNode::Object(_) => "object",
        }
    }

    /// Serializes the tree into compact JSON.
    ///
    /// The output re-parses to an equal tree. Only `\"`, `\\`, `\n`, `\r`
    /// and `\t` are escaped, since those are the only escapes the tokenizer
    /// reads back; other control characters are written raw, so strings
    /// holding them do not produce standard JSON.
    pub fn to_json_string(&self) -> String {
        self.to_string()
    }

    /// Recursive helper to write any `ParseNode` compactly.
    fn write_value<W: fmt::Write>(value: &ParseNode, w: &mut W) -> fmt::Result {
        match value {
            ParseNode::Null => w.write_str("null"),
            ParseNode::True => w.write_str("true"),
            ParseNode::False => w.write_str("false"),
            ParseNode::Integer(n) => write!(w, "{}", n),
            ParseNode::String(s) => write_escaped(s, w),
            ParseNode::Array(items) => {
                w.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.write_char(',')?;
                    }
                    Self::write_value(item, w)?;
                }
                w.write_char(']')
            }
            ParseNode::Object(members) => {
                w.write_char('{')?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        w.write_char(',')?;
                    }
                    write_escaped(&member.key, w)?;
                    w.write_char(':')?;
                    Self::write_value(&member.value, w)?;
                }
                w.write_char('}')
            }
        }
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_value(self, f)
    }
}

// --- Structural dump ---

/// Renders a debug-oriented structural dump of `node`.
///
/// Each node is written by its kind, with `indent` spaces per nesting level:
///
/// ```
/// use ctjson::{parse, pretty_print};
///
/// let node = parse(r#"{"name": "Linux", "tags": [1, true]}"#).unwrap();
/// assert_eq!(
///     pretty_print(&node, 2),
///     "Object<\n  Member<\"name\", String<\"Linux\">>,\n  Member<\"tags\", Array<\n    Integer<1>,\n    True\n  >>\n>"
/// );
/// ```
pub fn pretty_print(node: &ParseNode, indent: usize) -> String {
    let mut output = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_dump(node, &mut output, indent, 0);
    output
}

fn write_dump<W: fmt::Write>(
    node: &ParseNode,
    w: &mut W,
    indent: usize,
    depth: usize,
) -> fmt::Result {
    match node {
        ParseNode::Null => w.write_str("Null"),
        ParseNode::True => w.write_str("True"),
        ParseNode::False => w.write_str("False"),
        ParseNode::Integer(n) => write!(w, "Integer<{}>", n),
        ParseNode::String(s) => {
            w.write_str("String<")?;
            write_escaped(s, w)?;
            w.write_char('>')
        }
        ParseNode::Array(items) if items.is_empty() => w.write_str("Array<>"),
        ParseNode::Array(items) => {
            w.write_str("Array<\n")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.write_str(",\n")?;
                }
                write_indent(w, indent * (depth + 1))?;
                write_dump(item, w, indent, depth + 1)?;
            }
            w.write_char('\n')?;
            write_indent(w, indent * depth)?;
            w.write_char('>')
        }
        ParseNode::Object(members) if members.is_empty() => w.write_str("Object<>"),
        ParseNode::Object(members) => {
            w.write_str("Object<\n")?;
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    w.write_str(",\n")?;
                }
                write_indent(w, indent * (depth + 1))?;
                w.write_str("Member<")?;
                write_escaped(&member.key, w)?;
                w.write_str(", ")?;
                write_dump(&member.value, w, indent, depth + 1)?;
                w.write_char('>')?;
            }
            w.write_char('\n')?;
            write_indent(w, indent * depth)?;
            w.write_char('>')
        }
    }
}

fn write_indent<W: fmt::Write>(w: &mut W, width: usize) -> fmt::Result {
    write!(w, "{:width$}", "", width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParseNode {
        ParseNode::Object(vec![
            Member::new(
                "configuration",
                ParseNode::Object(vec![
                    Member::new("name", "Linux".into()),
                    Member::new(
                        "compilerArgs",
                        ParseNode::array_of_strings(["-Wall", "-Wextra"]),
                    ),
                ]),
            ),
            Member::new("version", 4.into()),
        ])
    }

    #[test]
    fn test_node_predicates() {
        assert!(ParseNode::Null.is_null());
        assert!(ParseNode::True.is_bool());
        assert!(ParseNode::from(false).is_bool());
        assert!(ParseNode::Integer(3).is_integer());
        assert!(ParseNode::from("x").is_string());
        assert!(ParseNode::Array(vec![]).is_array());
        assert!(ParseNode::Object(vec![]).is_object());
        assert_eq!(ParseNode::True.type_name(), "boolean");
        assert_eq!(ParseNode::Object(vec![]).type_name(), "object");
    }

    #[test]
    fn test_node_accessors() {
        let node = sample();
        let config = node.get("configuration").unwrap();
        assert_eq!(config.get("name").and_then(ParseNode::as_str), Some("Linux"));
        let args = config.get("compilerArgs").unwrap();
        assert_eq!(args.get_index(1).and_then(ParseNode::as_str), Some("-Wextra"));
        assert_eq!(args.get_index(2), None);
        assert_eq!(args.len(), Some(2));
        assert_eq!(node.get("version").and_then(ParseNode::as_i32), Some(4));
        assert_eq!(node.get("missing"), None);
        assert_eq!(ParseNode::Integer(1).get("a"), None);
        assert_eq!(ParseNode::Integer(1).len(), None);
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(ParseNode::True.as_bool(), Some(true));
        assert_eq!(ParseNode::False.as_bool(), Some(false));
        assert_eq!(ParseNode::Null.as_bool(), None);
        assert_eq!(ParseNode::from("7").as_i32(), None);
        let array = ParseNode::array_of_strings(["x"]);
        assert_eq!(array.as_array(), Some(&[ParseNode::from("x")][..]));
        assert_eq!(array.as_object(), None);
        let object = ParseNode::Object(vec![Member::new("k", ParseNode::Null)]);
        assert_eq!(object.as_object().map(|members| members.len()), Some(1));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let node = ParseNode::Object(vec![
            Member::new("a", 1.into()),
            Member::new("b", 2.into()),
            Member::new("a", 3.into()),
        ]);
        assert_eq!(node.get("a"), Some(&ParseNode::Integer(3)));
        let all: Vec<_> = node.get_all("a").collect();
        assert_eq!(all, vec![&ParseNode::Integer(1), &ParseNode::Integer(3)]);
    }

    #[test]
    fn test_control_characters_round_trip_raw() {
        let node = crate::parse("\"a\u{1}b\tc\"").unwrap();
        assert_eq!(node, ParseNode::from("a\u{1}b\tc"));
        let serialized = node.to_json_string();
        assert_eq!(serialized, "\"a\u{1}b\\tc\"");
        assert_eq!(crate::parse(&serialized).unwrap(), node);
    }

    #[test]
    fn test_to_json_string() {
        assert_eq!(ParseNode::Null.to_json_string(), "null");
        assert_eq!(ParseNode::Array(vec![]).to_json_string(), "[]");
        assert_eq!(ParseNode::Object(vec![]).to_json_string(), "{}");
        assert_eq!(
            sample().to_json_string(),
            r#"{"configuration":{"name":"Linux","compilerArgs":["-Wall","-Wextra"]},"version":4}"#
        );
        assert_eq!(
            ParseNode::from("a \"quoted\" \\ string\n").to_json_string(),
            r#""a \"quoted\" \\ string\n""#
        );
    }

    #[test]
    fn test_to_json_string_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(&sample().to_json_string())
            .expect("compact output should be valid JSON");
        let expected = serde_json::json!({
            "configuration": {"name": "Linux", "compilerArgs": ["-Wall", "-Wextra"]},
            "version": 4
        });
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_pretty_print_scalars() {
        assert_eq!(pretty_print(&ParseNode::Null, 2), "Null");
        assert_eq!(pretty_print(&ParseNode::False, 2), "False");
        assert_eq!(pretty_print(&ParseNode::Integer(-5), 2), "Integer<-5>");
        assert_eq!(pretty_print(&"a\tb".into(), 2), "String<\"a\\tb\">");
        assert_eq!(pretty_print(&ParseNode::Array(vec![]), 2), "Array<>");
        assert_eq!(pretty_print(&ParseNode::Object(vec![]), 2), "Object<>");
    }

    #[test]
    fn test_pretty_print_nested() {
        let expected = "\
Object<
  Member<\"configuration\", Object<
    Member<\"name\", String<\"Linux\">>,
    Member<\"compilerArgs\", Array<
      String<\"-Wall\">,
      String<\"-Wextra\">
    >>
  >>,
  Member<\"version\", Integer<4>>
>";
        assert_eq!(pretty_print(&sample(), 2), expected);
    }

    #[test]
    fn test_pretty_print_zero_indent() {
        let node = ParseNode::Array(vec![ParseNode::Integer(1), ParseNode::Array(vec![])]);
        assert_eq!(pretty_print(&node, 0), "Array<\nInteger<1>,\nArray<>\n>");
    }
}
