//! Decoder for the OpenStep (NeXTSTEP) text property-list format.
//!
//! The format is what `.pbxproj` and legacy `.plist`/`.strings` files are
//! written in:
//!
//! ```text
//! // !$*UTF8*$!
//! {
//!     name = "Hello World";     /* quoted literal */
//!     files = ( main.c, util.c, );
//!     settings = { DEBUG = YES; };
//! }
//! ```
//!
//! # Parsing Pipeline
//!
//! Decoding is a single recursive descent over the source buffer with an
//! explicit cursor:
//!
//! 1. **Scanner**: skips padding (whitespace and at most one `/* */` comment
//!    per call) and hands back any comment it consumed.
//!
//! 2. **Lexer**: reads one dictionary key or one value literal, quoted or
//!    bare, and attaches the comment that trails it.
//!
//! 3. **Parser**: dispatches on `{`, `(` or anything else and recursively
//!    builds dictionaries and arrays into a [`Value`] tree.

mod encode;
mod error;
mod lexer;
mod parser;
mod scanner;
mod value;

use std::fs;
use std::path::Path;

pub use encode::{encode, Format};
pub use error::{Found, Location, ParseError, Result};
pub use parser::MAX_DEPTH;
pub use value::{Dictionary, Key, Literal, Value};

/// Parse an OpenStep document from a string. The root is always a
/// [`Value::Dictionary`].
///
/// # Example
///
/// ```
/// use libopenstep::parse;
///
/// let value = parse("{ greeting = \"hello world\"; }").unwrap();
/// assert_eq!(value.get("greeting").and_then(|v| v.as_str()), Some("hello world"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_filename(input, None)
}

/// Parse an OpenStep document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Value> {
    let ctx = error::ParseContext::new(input, filename);
    parser::parse_root(&ctx).map(|(value, _)| value)
}

/// Parse the root dictionary and report the byte offset where parsing
/// stopped: just past the closing `}` and the padding after it. Anything
/// from that offset on is ignored by [`parse`].
pub fn parse_prefix(input: &str) -> Result<(Value, usize)> {
    let ctx = error::ParseContext::new(input, None);
    parser::parse_root(&ctx)
}

/// Read a whole file and parse it. Error messages name the file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    parse_with_filename(&input, Some(&filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_deterministic() {
        let src = "{ b = (x, \"y z\", { c = d; },); a = e; }";
        assert_eq!(parse(src).unwrap(), parse(src).unwrap());
        assert_eq!(
            format!("{:?}", parse(src).unwrap()),
            format!("{:?}", parse(src).unwrap())
        );
    }

    #[test]
    fn test_quoted_escapes_end_to_end() {
        let value = parse("{a=\"x\\\"y\\n\";}").unwrap();
        let lit = value.get("a").and_then(Value::as_literal).unwrap();
        assert_eq!(lit.content, "x\"y\n");
        assert!(lit.quoted);
        assert_eq!(lit.comment, None);
    }

    #[test]
    fn test_build_setting_syntax() {
        let value =
            parse("{ \"CODE_SIGN_IDENTITY[sdk=iphoneos*]\" = \"iPhone Developer\"; }").unwrap();
        assert_eq!(
            value
                .get("CODE_SIGN_IDENTITY[sdk=iphoneos*]")
                .and_then(Value::as_str),
            Some("iPhone Developer")
        );

        let value = parse("{ path = $(SRCROOT)/include; }").unwrap();
        assert_eq!(
            value.get("path").and_then(Value::as_str),
            Some("$(SRCROOT)/include")
        );
    }

    #[test]
    fn test_parse_prefix_reports_end() {
        let (_, end) = parse_prefix("{a=b;}\n\nrest").unwrap();
        assert_eq!(end, 8);
    }

    #[test]
    fn test_filename_in_message() {
        let err = parse_with_filename("{a=b}", Some("x.plist")).unwrap_err();
        assert!(err.to_string().contains("of <x.plist>"));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/dir/file.plist").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn test_parse_file() {
        let path = std::env::temp_dir().join(format!(
            "libopenstep-parse-file-{}.plist",
            std::process::id()
        ));
        fs::write(&path, "{ list = (a, b,); }").unwrap();
        let value = parse_file(&path);
        fs::remove_file(&path).unwrap();
        let value = value.unwrap();
        assert_eq!(value.get("list").and_then(Value::as_array).map(Vec::len), Some(2));
    }
}
