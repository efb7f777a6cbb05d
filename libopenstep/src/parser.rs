//! Recursive-descent parsing of dictionaries, arrays and the document root.
//!
//! Every routine takes the context and a cursor and returns the parsed item
//! together with the cursor after it. Nothing is stored between calls.

use crate::error::{ParseContext, ParseError, Result};
use crate::lexer::{lex_key, lex_literal};
use crate::scanner::skip_padding;
use crate::value::{Dictionary, Value};

/// Maximum container nesting accepted before decoding fails.
pub const MAX_DEPTH: usize = 256;

/// Parse the document root, returning it with the cursor where parsing
/// stopped. Characters after the root dictionary are ignored.
pub fn parse_root(ctx: &ParseContext) -> Result<(Value, usize)> {
    // A leading `//` line comment is skipped by scanning for the first `{`,
    // even one that appears inside the comment itself.
    let start = if ctx.source.starts_with("//") {
        ctx.source.find('{').ok_or_else(|| ctx.end_of_input())?
    } else {
        0
    };

    let (dict, end) = parse_dictionary(ctx, start, 1)?;
    Ok((Value::Dictionary(dict), end))
}

/// Dispatch on the next character: dictionary, array, or literal.
fn parse_value(ctx: &ParseContext, i: usize, depth: usize) -> Result<(Value, usize)> {
    match ctx.byte(i) {
        Some(b'{') => {
            let (dict, next) = parse_dictionary(ctx, i, depth + 1)?;
            Ok((Value::Dictionary(dict), next))
        }
        Some(b'(') => {
            let (arr, next) = parse_array(ctx, i, depth + 1)?;
            Ok((Value::Array(arr), next))
        }
        Some(_) => {
            let (lit, next) = lex_literal(ctx, i)?;
            Ok((Value::Literal(lit), next))
        }
        None => Err(ctx.end_of_input()),
    }
}

fn check_depth(ctx: &ParseContext, i: usize, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(ParseError::NestingTooDeep(MAX_DEPTH, ctx.locate(i)));
    }
    Ok(())
}

/// Parse `{ key = value; ... }`.
fn parse_dictionary(ctx: &ParseContext, i: usize, depth: usize) -> Result<(Dictionary, usize)> {
    if ctx.byte(i) != Some(b'{') {
        return Err(ctx.unexpected(i, ParseError::MissingDictionaryOpen));
    }
    check_depth(ctx, i, depth)?;

    let mut dict = Dictionary::new();
    let (mut i, _) = skip_padding(ctx, i + 1)?;

    loop {
        match ctx.byte(i) {
            Some(b'}') => break,
            Some(_) => {}
            None => return Err(ctx.end_of_input()),
        }

        let (key, next) = lex_key(ctx, i)?;
        if ctx.byte(next) != Some(b'=') {
            return Err(ctx.unexpected(next, ParseError::MissingKeyValueSeparator));
        }

        let (next, _) = skip_padding(ctx, next + 1)?;
        let (value, next) = parse_value(ctx, next, depth)?;
        if ctx.byte(next) != Some(b';') {
            return Err(ctx.unexpected(next, ParseError::MissingEntryTerminator));
        }

        dict.insert(key, value);
        (i, _) = skip_padding(ctx, next + 1)?;
    }

    let (end, _) = skip_padding(ctx, i + 1)?;
    Ok((dict, end))
}

/// Parse `( value, ... )`. Every element, the last included, must be
/// followed by a comma.
fn parse_array(ctx: &ParseContext, i: usize, depth: usize) -> Result<(Vec<Value>, usize)> {
    if ctx.byte(i) != Some(b'(') {
        return Err(ctx.unexpected(i, ParseError::MissingArrayOpen));
    }
    check_depth(ctx, i, depth)?;

    let mut arr = Vec::new();
    let (mut i, _) = skip_padding(ctx, i + 1)?;

    loop {
        match ctx.byte(i) {
            Some(b')') => break,
            Some(_) => {}
            None => return Err(ctx.end_of_input()),
        }

        let (value, next) = parse_value(ctx, i, depth)?;
        if ctx.byte(next) != Some(b',') {
            return Err(ctx.unexpected(next, ParseError::MissingArrayEntrySeparator));
        }

        arr.push(value);
        (i, _) = skip_padding(ctx, next + 1)?;
    }

    let (end, _) = skip_padding(ctx, i + 1)?;
    Ok((arr, end))
}
