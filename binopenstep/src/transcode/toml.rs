//! TOML transcoding: convert OpenStep values to TOML text.
//!
//! Mapping:
//!   - Value::Literal    -> TOML string
//!   - Value::Array      -> TOML array (dictionaries inside become inline tables)
//!   - Value::Dictionary -> TOML table at the top level or under another table,
//!                          inline table anywhere inside an array
//!
//! The root of a decoded document is always a dictionary, so every document
//! has a TOML form. Comments and the quoting flag are dropped.

use libopenstep::{Dictionary, Value};
use toml_edit::DocumentMut;

/// Encode a Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    match value {
        Value::Dictionary(dict) => {
            let mut doc = DocumentMut::new();
            for (key, item) in dictionary_to_table(dict).iter() {
                doc[key] = item.clone();
            }
            Ok(doc.to_string())
        }
        _ => Err("TOML requires the top-level value to be a dictionary".to_string()),
    }
}

fn dictionary_to_table(dict: &Dictionary) -> toml_edit::Table {
    let mut table = toml_edit::Table::new();
    for (k, v) in dict.iter() {
        table.insert(k, value_to_item(v));
    }
    table
}

fn value_to_item(value: &Value) -> toml_edit::Item {
    match value {
        Value::Dictionary(dict) => toml_edit::Item::Table(dictionary_to_table(dict)),
        _ => toml_edit::Item::Value(value_to_inline(value)),
    }
}

fn value_to_inline(value: &Value) -> toml_edit::Value {
    match value {
        Value::Literal(lit) => {
            toml_edit::Value::String(toml_edit::Formatted::new(lit.content.clone()))
        }
        Value::Array(arr) => {
            let mut toml_arr = toml_edit::Array::new();
            for v in arr {
                toml_arr.push(value_to_inline(v));
            }
            toml_edit::Value::Array(toml_arr)
        }
        Value::Dictionary(dict) => {
            let mut inline = toml_edit::InlineTable::new();
            for (k, v) in dict.iter() {
                inline.insert(k, value_to_inline(v));
            }
            toml_edit::Value::InlineTable(inline)
        }
    }
}
