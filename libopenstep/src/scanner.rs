//! Padding: the whitespace and `/* ... */` comments between tokens.
//!
//! A single call skips whitespace, at most one comment block, then
//! whitespace again. Runs of several comments are consumed only because the
//! container parsers call back in at every entry boundary.

use crate::error::{ParseContext, Result};

/// Whitespace recognized between tokens.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Whether a `/*` comment opens at `offset`.
pub fn starts_comment(ctx: &ParseContext, offset: usize) -> bool {
    ctx.rest(offset).starts_with("/*")
}

/// Advance past a run of whitespace.
pub fn skip_whitespace(ctx: &ParseContext, mut i: usize) -> usize {
    while ctx.byte(i).is_some_and(is_whitespace) {
        i += 1;
    }
    i
}

/// Skip one comment block if one opens at `i`, returning it verbatim.
/// Comments do not nest; the first `*/` closes the block.
pub fn skip_comment(ctx: &ParseContext, i: usize) -> Result<(usize, Option<String>)> {
    if !starts_comment(ctx, i) {
        return Ok((i, None));
    }
    match ctx.rest(i + 2).find("*/") {
        Some(len) => {
            let end = i + 2 + len + 2;
            Ok((end, Some(ctx.source[i..end].to_string())))
        }
        None => Err(ctx.end_of_input()),
    }
}

/// Skip whitespace, one optional comment, and whitespace again.
pub fn skip_padding(ctx: &ParseContext, i: usize) -> Result<(usize, Option<String>)> {
    let i = skip_whitespace(ctx, i);
    let (i, comment) = skip_comment(ctx, i)?;
    Ok((skip_whitespace(ctx, i), comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn padding(src: &str, i: usize) -> (usize, Option<String>) {
        skip_padding(&ParseContext::new(src, None), i).unwrap()
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(padding(" \t\r\n x", 0), (5, None));
        assert_eq!(padding("x", 0), (0, None));
        assert_eq!(padding("", 0), (0, None));
    }

    #[test]
    fn test_comment_is_captured_verbatim() {
        assert_eq!(
            padding("  /* hello */  x", 0),
            (15, Some("/* hello */".to_string()))
        );
    }

    #[test]
    fn test_comments_do_not_nest() {
        let src = "/* a /* b */ c */";
        assert_eq!(padding(src, 0), (13, Some("/* a /* b */".to_string())));
    }

    #[test]
    fn test_only_one_comment_per_call() {
        let src = "/* one */ /* two */x";
        let (i, first) = padding(src, 0);
        assert_eq!(first.as_deref(), Some("/* one */"));
        assert_eq!(i, 10);
        let (i, second) = padding(src, i);
        assert_eq!(second.as_deref(), Some("/* two */"));
        assert_eq!(&src[i..], "x");
    }

    #[test]
    fn test_slash_without_star_is_not_a_comment() {
        assert_eq!(padding("/x", 0), (0, None));
        assert_eq!(padding("/", 0), (0, None));
    }

    #[test]
    fn test_empty_comment() {
        assert_eq!(padding("/**/", 0), (4, Some("/**/".to_string())));
    }

    #[test]
    fn test_unterminated_comment() {
        let ctx = ParseContext::new("/* open", None);
        let err = skip_padding(&ctx, 0).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput(_)));
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn test_star_slash_must_follow_opener() {
        // "/*/" does not close itself.
        let ctx = ParseContext::new("/*/", None);
        assert!(skip_padding(&ctx, 0).is_err());
    }
}
