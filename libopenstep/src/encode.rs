//! Encode decoded values as JSON.
//!
//! Dictionaries keep their source order. YAML, TOML and CBOR output is
//! produced by the command-line tool with dedicated libraries.

use crate::value::{Literal, Value};

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON, literals as plain strings.
    Json,
    /// JSON, literals as `{"content", "quoted", "comment"}` objects.
    AnnotatedJson,
}

/// Encode a value to a string in the specified format.
pub fn encode(value: &Value, format: Format) -> String {
    match format {
        Format::Json => encode_json(value, 0, false),
        Format::AnnotatedJson => encode_json(value, 0, true),
    }
}

fn encode_json(value: &Value, indent: usize, annotated: bool) -> String {
    match value {
        Value::Literal(lit) if annotated => encode_annotated_literal(lit, indent),
        Value::Literal(lit) => encode_json_string(&lit.content),
        Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else {
                let items: Vec<String> = arr
                    .iter()
                    .map(|v| encode_json(v, indent + 1, annotated))
                    .collect();
                wrap_items('[', ']', &items, indent)
            }
        }
        Value::Dictionary(dict) => {
            if dict.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = dict
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            encode_json_string(k),
                            encode_json(v, indent + 1, annotated)
                        )
                    })
                    .collect();
                wrap_items('{', '}', &items, indent)
            }
        }
    }
}

fn encode_annotated_literal(lit: &Literal, indent: usize) -> String {
    let comment = match &lit.comment {
        Some(c) => encode_json_string(c),
        None => "null".to_string(),
    };
    let items = [
        format!("\"content\": {}", encode_json_string(&lit.content)),
        format!("\"quoted\": {}", lit.quoted),
        format!("\"comment\": {}", comment),
    ];
    wrap_items('{', '}', &items, indent)
}

/// One item per line, indented two spaces per level.
fn wrap_items(open: char, close: char, items: &[String], indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let pad1 = "  ".repeat(indent + 1);
    format!(
        "{}\n{}\n{}{}",
        open,
        items
            .iter()
            .map(|i| format!("{}{}", pad1, i))
            .collect::<Vec<_>>()
            .join(",\n"),
        pad,
        close
    )
}

fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0c' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Dictionary;

    #[test]
    fn test_json_keeps_order() {
        let dict: Dictionary = [("z", Value::from("1")), ("a", Value::from("2"))]
            .into_iter()
            .collect();
        assert_eq!(
            encode(&Value::from(dict), Format::Json),
            "{\n  \"z\": \"1\",\n  \"a\": \"2\"\n}"
        );
    }

    #[test]
    fn test_json_nested() {
        let inner: Dictionary = [("k", Value::from("v"))].into_iter().collect();
        let dict: Dictionary = [(
            "list",
            Value::from(vec![Value::from("x"), Value::from(inner)]),
        )]
        .into_iter()
        .collect();
        assert_eq!(
            encode(&Value::from(dict), Format::Json),
            "{\n  \"list\": [\n    \"x\",\n    {\n      \"k\": \"v\"\n    }\n  ]\n}"
        );
    }

    #[test]
    fn test_json_empty_containers() {
        assert_eq!(encode(&Value::from(Dictionary::new()), Format::Json), "{}");
        assert_eq!(encode(&Value::from(Vec::new()), Format::Json), "[]");
    }

    #[test]
    fn test_json_string_escapes() {
        assert_eq!(
            encode(&Value::from("a\"b\\c\nd\0"), Format::Json),
            "\"a\\\"b\\\\c\\nd\\u0000\""
        );
    }

    #[test]
    fn test_annotated_literal() {
        let lit = Literal::quoted("x").with_comment("/* c */");
        assert_eq!(
            encode(&Value::from(lit), Format::AnnotatedJson),
            "{\n  \"content\": \"x\",\n  \"quoted\": true,\n  \"comment\": \"/* c */\"\n}"
        );
        assert_eq!(
            encode(&Value::from("y"), Format::AnnotatedJson),
            "{\n  \"content\": \"y\",\n  \"quoted\": false,\n  \"comment\": null\n}"
        );
    }
}
