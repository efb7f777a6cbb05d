//! Error types for OpenStep property-list decoding.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// What the decoder found at the offending cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Found {
    /// A character that was not the one expected.
    Char(char),
    /// The cursor ran past the end of the buffer.
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "{:?}", c),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Position of an error in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Byte offset of the cursor.
    pub offset: usize,
    /// One-based line number.
    pub line: usize,
    /// One-based column, counted in characters.
    pub column: usize,
    /// Name of the file being parsed, when known.
    pub filename: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(name) => write!(
                f,
                "{}:{} of <{}> (offset {})",
                self.line, self.column, name, self.offset
            ),
            None => write!(f, "{}:{} (offset {})", self.line, self.column, self.offset),
        }
    }
}

/// Parse context: the borrowed source buffer and an optional filename for
/// error reporting. The cursor itself is never stored here.
#[derive(Clone, Copy, Debug)]
pub struct ParseContext<'a> {
    pub source: &'a str,
    pub filename: Option<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context.
    pub fn new(source: &'a str, filename: Option<&'a str>) -> Self {
        Self { source, filename }
    }

    /// The byte at `offset`, or `None` past the end.
    pub fn byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(offset).copied()
    }

    /// The unconsumed remainder of the source starting at `offset`.
    pub fn rest(&self, offset: usize) -> &'a str {
        self.source.get(offset..).unwrap_or("")
    }

    /// The character at `offset`.
    pub fn found(&self, offset: usize) -> Found {
        self.rest(offset)
            .chars()
            .next()
            .map_or(Found::EndOfInput, Found::Char)
    }

    /// Resolve a byte offset to a line/column location.
    pub fn locate(&self, offset: usize) -> Location {
        let before = self.source.get(..offset).unwrap_or(self.source);
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        Location {
            offset,
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            filename: self.filename.map(String::from),
        }
    }

    /// Error for end of input at the end of the buffer.
    pub fn end_of_input(&self) -> ParseError {
        ParseError::UnexpectedEndOfInput(self.locate(self.source.len()))
    }

    /// Build the error for an unexpected character at `offset`. Running off
    /// the end of the buffer is always reported as `UnexpectedEndOfInput`.
    pub fn unexpected(
        &self,
        offset: usize,
        variant: fn(Found, Location) -> ParseError,
    ) -> ParseError {
        match self.found(offset) {
            Found::EndOfInput => self.end_of_input(),
            found => variant(found, self.locate(offset)),
        }
    }
}

/// Error type for OpenStep decoding. Every variant except `Io` carries the
/// location of the cursor when decoding stopped.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The root, or a value that must be a dictionary, does not start with `{`.
    #[error("Expected \"{{\" to open a dictionary, found {0} at {1}")]
    MissingDictionaryOpen(Found, Location),

    /// An array does not start with `(`.
    #[error("Expected \"(\" to open an array, found {0} at {1}")]
    MissingArrayOpen(Found, Location),

    /// A dictionary key is not followed by `=`.
    #[error("Expected \"=\" after key, found {0} at {1}")]
    MissingKeyValueSeparator(Found, Location),

    /// A dictionary value is not followed by `;`.
    #[error("Expected \";\" after value, found {0} at {1}")]
    MissingEntryTerminator(Found, Location),

    /// An array element is not followed by `,`.
    #[error("Expected \",\" after array element, found {0} at {1}")]
    MissingArrayEntrySeparator(Found, Location),

    /// A backslash in a quoted string is followed by a character outside
    /// the escape table.
    #[error("Unknown escape sequence: backslash followed by {0} at {1}")]
    UnknownEscapeSequence(Found, Location),

    /// More input was required.
    #[error("Unexpected end of input at {0}")]
    UnexpectedEndOfInput(Location),

    /// Containers are nested deeper than the decoder allows.
    #[error("Nesting deeper than {0} levels at {1}")]
    NestingTooDeep(usize, Location),

    /// The input file could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Location of the error, if it came from decoding.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ParseError::MissingDictionaryOpen(_, loc)
            | ParseError::MissingArrayOpen(_, loc)
            | ParseError::MissingKeyValueSeparator(_, loc)
            | ParseError::MissingEntryTerminator(_, loc)
            | ParseError::MissingArrayEntrySeparator(_, loc)
            | ParseError::UnknownEscapeSequence(_, loc)
            | ParseError::UnexpectedEndOfInput(loc)
            | ParseError::NestingTooDeep(_, loc) => Some(loc),
            ParseError::Io { .. } => None,
        }
    }

    /// Byte offset of the cursor when decoding failed.
    pub fn offset(&self) -> Option<usize> {
        self.location().map(|loc| loc.offset)
    }

    /// The character found at the failing position.
    pub fn found(&self) -> Option<Found> {
        match self {
            ParseError::MissingDictionaryOpen(found, _)
            | ParseError::MissingArrayOpen(found, _)
            | ParseError::MissingKeyValueSeparator(found, _)
            | ParseError::MissingEntryTerminator(found, _)
            | ParseError::MissingArrayEntrySeparator(found, _)
            | ParseError::UnknownEscapeSequence(found, _) => Some(*found),
            ParseError::UnexpectedEndOfInput(_) => Some(Found::EndOfInput),
            ParseError::NestingTooDeep(..) | ParseError::Io { .. } => None,
        }
    }
}
