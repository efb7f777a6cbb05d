//! CBOR transcoding: convert OpenStep values to CBOR binary data.
//!
//! Mapping:
//!   - Value::Literal    -> CBOR text string (determinate length)
//!   - Value::Array      -> CBOR array (determinate length)
//!   - Value::Dictionary -> CBOR map (determinate length, text string keys,
//!                          source order kept)
//!
//! Comments and the quoting flag are dropped.

use ciborium::value::Value as CborValue;
use libopenstep::Value;
use std::fmt::Write as FmtWrite;

// ---------------------------------------------------------------------------
// Encode (OpenStep -> CBOR)
// ---------------------------------------------------------------------------

/// Encode a Value as CBOR bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(&value_to_cbor(value), &mut buf)
        .map_err(|e| format!("CBOR encode error: {}", e))?;
    Ok(buf)
}

fn value_to_cbor(value: &Value) -> CborValue {
    match value {
        Value::Literal(lit) => CborValue::Text(lit.content.clone()),
        Value::Array(arr) => CborValue::Array(arr.iter().map(value_to_cbor).collect()),
        Value::Dictionary(dict) => CborValue::Map(
            dict.iter()
                .map(|(k, v)| (CborValue::Text(k.to_string()), value_to_cbor(v)))
                .collect(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Diagnostic Notation (CBOR -> human-readable text, RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes as diagnostic notation (RFC 8949 §8).
///
/// Rendering starts from the encoded bytes rather than the decoded tree, so
/// the output shows what is actually on the wire.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    diag_value(&mut out, &cbor_value, 0)?;
    out.push('\n');
    Ok(out)
}

fn diag_value(out: &mut String, val: &CborValue, indent: usize) -> Result<(), String> {
    match val {
        CborValue::Text(s) => diag_text(out, s),
        CborValue::Array(arr) => diag_array(out, arr, indent)?,
        CborValue::Map(pairs) => diag_map(out, pairs, indent)?,
        _ => return Err(format!("unexpected CBOR value {:?}", val)),
    }
    Ok(())
}

fn diag_text(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push(' ');
    }
}

fn diag_array(out: &mut String, arr: &[CborValue], indent: usize) -> Result<(), String> {
    if arr.is_empty() {
        out.push_str("[]");
        return Ok(());
    }
    // Use compact form for small arrays of strings
    if arr.len() <= 5 && arr.iter().all(CborValue::is_text) {
        out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            diag_value(out, item, indent)?;
        }
        out.push(']');
        return Ok(());
    }
    out.push_str("[\n");
    let child_indent = indent + 2;
    for (i, item) in arr.iter().enumerate() {
        push_indent(out, child_indent);
        diag_value(out, item, child_indent)?;
        if i < arr.len() - 1 {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push(']');
    Ok(())
}

fn diag_map(
    out: &mut String,
    pairs: &[(CborValue, CborValue)],
    indent: usize,
) -> Result<(), String> {
    if pairs.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    let child_indent = indent + 2;
    for (i, (k, v)) in pairs.iter().enumerate() {
        push_indent(out, child_indent);
        diag_value(out, k, child_indent)?;
        out.push_str(": ");
        diag_value(out, v, child_indent)?;
        if i < pairs.len() - 1 {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push('}');
    Ok(())
}
