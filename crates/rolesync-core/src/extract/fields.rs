//! Typed field extraction inside one located block.

use super::scanner::{collapse_whitespace, matching_close, unescape, Lexer, Token};
use serde::{Deserialize, Serialize};

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
    /// Any other JSON value carried through from a catalog unchanged
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a JSON value, keeping the four typed shapes typed.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Other(value.clone()),
            },
            Value::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                match strings {
                    Some(list) => FieldValue::List(list),
                    None => FieldValue::Other(value.clone()),
                }
            }
            _ => FieldValue::Other(value.clone()),
        }
    }
}

/// What a field resolves to when the block does not provide it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// A fixed value
    Value(FieldValue),
    /// The identifier the block was located by
    Identifier,
    /// Leave the field out; an empty list value is left out as well
    Omit,
}

/// One entry of a field specification.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: String,
    pub default: FieldDefault,
}

/// Ordered list of fields to pull out of a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSpec {
    rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field with a fixed default.
    pub fn field(mut self, name: impl Into<String>, default: FieldValue) -> Self {
        self.rules.push(FieldRule {
            name: name.into(),
            default: FieldDefault::Value(default),
        });
        self
    }

    /// Append a field defaulting to the block identifier.
    pub fn field_or_identifier(mut self, name: impl Into<String>) -> Self {
        self.rules.push(FieldRule {
            name: name.into(),
            default: FieldDefault::Identifier,
        });
        self
    }

    /// Append a field emitted only when present and non-empty.
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.rules.push(FieldRule {
            name: name.into(),
            default: FieldDefault::Omit,
        });
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Field specification for role definitions.
    pub fn role() -> Self {
        Self::new()
            .field_or_identifier("name")
            .field("edition", FieldValue::Text("custom".into()))
            .field("team", FieldValue::Text("townsfolk".into()))
            .field("firstNight", FieldValue::Integer(0))
            .field("firstNightReminder", FieldValue::Text(String::new()))
            .field("otherNight", FieldValue::Integer(0))
            .field("otherNightReminder", FieldValue::Text(String::new()))
            .field("reminders", FieldValue::List(Vec::new()))
            .optional("remindersGlobal")
            .field("setup", FieldValue::Boolean(false))
            .field("ability", FieldValue::Text(String::new()))
    }
}

/// Split a block body into its top-level `key: value` pairs.
///
/// Keys are decoded; values are the trimmed raw text up to the next
/// top-level comma. Nested objects and arrays stay inside their value.
/// Entries without a key (spreads, shorthand properties) are skipped.
pub fn top_level_fields(body: &str) -> Vec<(String, &str)> {
    let mut fields = Vec::new();
    let tokens: Vec<_> = Lexer::new(body).collect();

    let mut depth: usize = 0;
    let mut entry_start = 0;
    let mut value_start: Option<(String, usize)> = None;

    for (idx, spanned) in tokens.iter().enumerate() {
        match spanned.token {
            Token::Open(_) => depth += 1,
            Token::Close(_) => depth = depth.saturating_sub(1),
            Token::Colon if depth == 0 && value_start.is_none() => {
                // Key is the single token between the entry start and this colon
                let key = (idx == entry_start + 1)
                    .then(|| tokens[entry_start].token.key_text())
                    .flatten();
                if let Some(key) = key {
                    value_start = Some((unescape(key), spanned.end));
                }
            }
            Token::Comma if depth == 0 => {
                if let Some((key, start)) = value_start.take() {
                    fields.push((key, body[start..spanned.start].trim()));
                }
                entry_start = idx + 1;
            }
            _ => {}
        }
    }
    if let Some((key, start)) = value_start {
        fields.push((key, body[start..].trim()));
    }
    fields
}

/// Apply the typed rules to a raw value in priority order: quoted string,
/// integer literal, boolean literal, bracketed list of quoted strings.
pub fn parse_value(raw: &str) -> Option<FieldValue> {
    parse_string(raw)
        .or_else(|| parse_integer(raw))
        .or_else(|| parse_bool(raw))
        .or_else(|| parse_list(raw))
}

fn parse_string(raw: &str) -> Option<FieldValue> {
    let mut lexer = Lexer::new(raw);
    let first = lexer.next()?;
    match first.token {
        Token::Str(body) if first.end == raw.len() => {
            Some(FieldValue::Text(collapse_if_multiline(body)))
        }
        _ => None,
    }
}

fn parse_integer(raw: &str) -> Option<FieldValue> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().map(FieldValue::Integer)
}

fn parse_bool(raw: &str) -> Option<FieldValue> {
    match raw {
        "true" => Some(FieldValue::Boolean(true)),
        "false" => Some(FieldValue::Boolean(false)),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Option<FieldValue> {
    if !raw.starts_with('[') || matching_close(raw, 0)? != raw.len() - 1 {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];
    let mut items = Vec::new();
    let mut expect_item = true;
    for spanned in Lexer::new(inner) {
        match (spanned.token, expect_item) {
            (Token::Str(body), true) => {
                items.push(collapse_if_multiline(body));
                expect_item = false;
            }
            (Token::Comma, false) => expect_item = true,
            _ => return None,
        }
    }
    Some(FieldValue::List(items))
}

/// Decode a literal; text that spans lines once decoded becomes one line.
fn collapse_if_multiline(body: &str) -> String {
    let text = unescape(body);
    if text.contains('\n') || text.contains('\r') {
        collapse_whitespace(&text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_fields_skip_nested() {
        let body = r#" id: "x", meta: { name: "inner" }, name: "Y" "#;
        let fields = top_level_fields(body);
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "meta", "name"]);
        assert_eq!(fields[2].1, r#""Y""#);
    }

    #[test]
    fn test_top_level_fields_comma_inside_string() {
        let fields = top_level_fields(r#""ability": "Each night, choose", "setup": true,"#);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, r#""Each night, choose""#);
        assert_eq!(fields[1].1, "true");
    }

    #[test]
    fn test_spread_entries_are_skipped() {
        let fields = top_level_fields("...base, team: 'demon'");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "team");
    }

    #[test]
    fn test_parse_value_priority() {
        assert_eq!(parse_value(r#""3""#), Some(FieldValue::Text("3".into())));
        assert_eq!(parse_value("3"), Some(FieldValue::Integer(3)));
        assert_eq!(parse_value("-12"), Some(FieldValue::Integer(-12)));
        assert_eq!(parse_value("true"), Some(FieldValue::Boolean(true)));
        assert_eq!(
            parse_value(r#"["a", 'b',]"#),
            Some(FieldValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(parse_value("[]"), Some(FieldValue::List(vec![])));
    }

    #[test]
    fn test_parse_value_rejects_other_shapes() {
        assert_eq!(parse_value("3.5"), None);
        assert_eq!(parse_value("SOME_CONST"), None);
        assert_eq!(parse_value("[1, 2]"), None);
        assert_eq!(parse_value(r#""a" + "b""#), None);
        assert_eq!(parse_value("-"), None);
    }

    #[test]
    fn test_multiline_string_collapses() {
        let raw = "\"Each night,\n      choose a player.\n\"";
        assert_eq!(
            parse_value(raw),
            Some(FieldValue::Text("Each night, choose a player.".into()))
        );
    }

    #[test]
    fn test_escaped_newline_collapses() {
        assert_eq!(
            parse_value(r#""First night:\n  learn a player.""#),
            Some(FieldValue::Text("First night: learn a player.".into()))
        );
        assert_eq!(
            parse_value(r#"["line one\nline two"]"#),
            Some(FieldValue::List(vec!["line one line two".into()]))
        );
        assert_eq!(
            parse_value(r#""tab\tkept""#),
            Some(FieldValue::Text("tab\tkept".into()))
        );
    }

    #[test]
    fn test_role_spec_order() {
        let spec = FieldSpec::role();
        let names: Vec<&str> = spec
            .rules()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names.first(), Some(&"name"));
        assert_eq!(names.last(), Some(&"ability"));
        assert!(names.contains(&"remindersGlobal"));
    }

    #[test]
    fn test_from_json_shapes() {
        let v = serde_json::json!(["a", "b"]);
        assert_eq!(
            FieldValue::from_json(&v),
            FieldValue::List(vec!["a".into(), "b".into()])
        );
        let mixed = serde_json::json!([1, "b"]);
        assert!(matches!(FieldValue::from_json(&mixed), FieldValue::Other(_)));
    }
}
