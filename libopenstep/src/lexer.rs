//! Scalar lexing: dictionary keys and value literals.
//!
//! The two lexers are separate. Keys are raw runs of characters with one
//! surrounding `"` trimmed from each end; value literals understand real
//! quoting and a small escape table.

use crate::error::{Found, ParseContext, ParseError, Result};
use crate::scanner::{is_whitespace, skip_padding, starts_comment};
use crate::value::{Key, Literal};

/// Lex a dictionary key starting at `i` (padding before it is skipped).
/// Returns the key and the cursor after its trailing padding.
pub fn lex_key(ctx: &ParseContext, i: usize) -> Result<(Key, usize)> {
    let (start, _) = skip_padding(ctx, i)?;

    // A quoted key runs to whitespace or `;` like any key, so `=` and `/*`
    // inside the quotes belong to it.
    let quoted = ctx.byte(start) == Some(b'"');
    let mut end = start;
    while let Some(b) = ctx.byte(end) {
        if is_whitespace(b) || b == b';' {
            break;
        }
        if !quoted && (b == b'=' || starts_comment(ctx, end)) {
            break;
        }
        end += 1;
    }
    let raw = &ctx.source[start..end];

    let (next, comment) = skip_padding(ctx, end)?;

    let content = raw.strip_prefix('"').unwrap_or(raw);
    let content = content.strip_suffix('"').unwrap_or(content);

    Ok((
        Key {
            content: content.to_string(),
            comment,
        },
        next,
    ))
}

/// Lex a value literal starting at `i` (padding before it is skipped).
/// Returns the literal and the cursor after its trailing padding.
pub fn lex_literal(ctx: &ParseContext, i: usize) -> Result<(Literal, usize)> {
    let (start, _) = skip_padding(ctx, i)?;

    let (content, quoted, end) = if ctx.byte(start) == Some(b'"') {
        let (content, end) = lex_quoted(ctx, start + 1)?;
        (content, true, end)
    } else {
        let end = bare_end(ctx, start);
        (ctx.source[start..end].to_string(), false, end)
    };

    let (next, comment) = skip_padding(ctx, end)?;

    Ok((
        Literal {
            content,
            quoted,
            comment,
        },
        next,
    ))
}

/// End of a bare literal: whitespace, an entry terminator or separator, a
/// closing bracket, or the start of a comment. A `)` that closes a `(` opened
/// inside the token, as in `$(SRCROOT)`, is part of it.
fn bare_end(ctx: &ParseContext, mut i: usize) -> usize {
    let mut open_parens = 0usize;
    while let Some(b) = ctx.byte(i) {
        match b {
            b';' | b',' | b'}' => break,
            b'(' => open_parens += 1,
            b')' if open_parens == 0 => break,
            b')' => open_parens -= 1,
            _ if is_whitespace(b) || starts_comment(ctx, i) => break,
            _ => {}
        }
        i += 1;
    }
    i
}

/// Decode the body of a quoted literal. `i` points just past the opening
/// quote; the returned cursor points just past the closing quote.
fn lex_quoted(ctx: &ParseContext, i: usize) -> Result<(String, usize)> {
    let mut content = String::new();
    let mut chars = ctx.rest(i).char_indices();

    while let Some((at, c)) = chars.next() {
        match c {
            '"' => return Ok((content, i + at + 1)),
            '\\' => match chars.next() {
                Some((esc_at, esc)) => match unescape(esc) {
                    Some(decoded) => content.push(decoded),
                    None => {
                        return Err(ParseError::UnknownEscapeSequence(
                            Found::Char(esc),
                            ctx.locate(i + esc_at),
                        ))
                    }
                },
                None => break,
            },
            c => content.push(c),
        }
    }

    Err(ctx.end_of_input())
}

/// The fixed escape table for quoted literals.
fn unescape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\'' => Some('\''),
        '0' => Some('\0'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(src: &str) -> (Key, usize) {
        lex_key(&ParseContext::new(src, None), 0).unwrap()
    }

    fn literal(src: &str) -> (Literal, usize) {
        lex_literal(&ParseContext::new(src, None), 0).unwrap()
    }

    #[test]
    fn test_bare_literal() {
        let (lit, next) = literal("abc;");
        assert_eq!(lit, Literal::bare("abc"));
        assert_eq!(next, 3);
    }

    #[test]
    fn test_bare_literal_stops() {
        assert_eq!(literal("a b").0.content, "a");
        assert_eq!(literal("a,b").0.content, "a");
        assert_eq!(literal("a;b").0.content, "a");
        assert_eq!(literal("a}").0.content, "a");
        assert_eq!(literal("a)").0.content, "a");
        assert_eq!(literal("a/* c */;").0.content, "a");
        assert_eq!(literal("a\tb").0.content, "a");
    }

    #[test]
    fn test_bare_literal_keeps_everything_else() {
        let (lit, _) = literal("$(SRCROOT)/path=x\"y\\n;");
        assert_eq!(lit.content, "$(SRCROOT)/path=x\"y\\n");
        let (lit, _) = literal("a=b\\n\"c;");
        assert_eq!(lit.content, "a=b\\n\"c");
        assert!(!lit.quoted);
    }

    #[test]
    fn test_bare_literal_keeps_balanced_parens() {
        let (lit, next) = literal("$(SRCROOT)/include;");
        assert_eq!(lit.content, "$(SRCROOT)/include");
        assert_eq!(next, 18);

        assert_eq!(literal("$(A)$(B))").0.content, "$(A)$(B)");
        assert_eq!(literal("$(inherited),").0.content, "$(inherited)");
    }

    #[test]
    fn test_bare_literal_at_end_of_input() {
        let (lit, next) = literal("tail");
        assert_eq!(lit.content, "tail");
        assert_eq!(next, 4);
    }

    #[test]
    fn test_quoted_literal() {
        let (lit, next) = literal("\"a b; c,d\" ;");
        assert_eq!(lit, Literal::quoted("a b; c,d"));
        assert_eq!(next, 11);
    }

    #[test]
    fn test_quoted_escapes() {
        let (lit, _) = literal(r#""q\" s\' z\0 b\\ n\n";"#);
        assert_eq!(lit.content, "q\" s' z\0 b\\ n\n");
    }

    #[test]
    fn test_quoted_non_ascii() {
        let (lit, next) = literal("\"héllo\";");
        assert_eq!(lit.content, "héllo");
        assert_eq!(next, 8);
    }

    #[test]
    fn test_unknown_escape() {
        let ctx = ParseContext::new(r#""a\tb";"#, None);
        let err = lex_literal(&ctx, 0).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownEscapeSequence(Found::Char('t'), _)
        ));
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_unterminated_quote() {
        let ctx = ParseContext::new("\"abc", None);
        let err = lex_literal(&ctx, 0).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput(_)));
        assert_eq!(err.offset(), Some(4));

        let ctx = ParseContext::new("\"abc\\", None);
        assert!(matches!(
            lex_literal(&ctx, 0),
            Err(ParseError::UnexpectedEndOfInput(_))
        ));
    }

    #[test]
    fn test_literal_comment() {
        let (lit, next) = literal("x /* note */ ;");
        assert_eq!(lit, Literal::bare("x").with_comment("/* note */"));
        assert_eq!(next, 13);
    }

    #[test]
    fn test_empty_bare_literal() {
        let (lit, next) = literal(";");
        assert_eq!(lit.content, "");
        assert_eq!(next, 0);
    }

    #[test]
    fn test_key() {
        let (k, next) = key("name = value;");
        assert_eq!(k, Key::new("name"));
        assert_eq!(next, 5);
    }

    #[test]
    fn test_key_stops_at_equals_and_comment() {
        let (k, next) = key("a=b;");
        assert_eq!(k.content, "a");
        assert_eq!(next, 1);

        let (k, next) = key("a/* c */=b;");
        assert_eq!(k.content, "a");
        assert_eq!(k.comment.as_deref(), Some("/* c */"));
        assert_eq!(next, 8);
    }

    #[test]
    fn test_quoted_key_keeps_equals_and_comment_opener() {
        let (k, next) = key("\"CODE_SIGN_IDENTITY[sdk=iphoneos*]\" = x;");
        assert_eq!(k.content, "CODE_SIGN_IDENTITY[sdk=iphoneos*]");
        assert_eq!(next, 36);

        let (k, _) = key("\"a/*b\" = x;");
        assert_eq!(k.content, "a/*b");
    }

    #[test]
    fn test_key_does_not_stop_at_comma() {
        let (k, _) = key("a,b = c;");
        assert_eq!(k.content, "a,b");
    }

    #[test]
    fn test_key_trims_one_quote_each_side() {
        assert_eq!(key("\"quoted\" = x;").0.content, "quoted");
        assert_eq!(key("\"\"twice\"\" = x;").0.content, "\"twice\"");
        assert_eq!(key("\"open = x;").0.content, "open");
        assert_eq!(key("close\" = x;").0.content, "close");
    }

    #[test]
    fn test_key_has_no_escapes() {
        assert_eq!(key("a\\n = x;").0.content, "a\\n");
    }

    #[test]
    fn test_key_with_space_inside_quotes_splits() {
        let (k, next) = key("\"a b\" = x;");
        assert_eq!(k.content, "a");
        assert_eq!(next, 3);
    }
}
