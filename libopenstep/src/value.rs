//! OpenStep value representation.

use indexmap::IndexMap;
use std::fmt;

/// A decoded property-list value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// `{ key = value; ... }`
    Dictionary(Dictionary),
    /// `( value, ... )`
    Array(Vec<Value>),
    /// A quoted or bare scalar token.
    Literal(Literal),
}

/// A scalar token together with its source metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Literal {
    /// Decoded text. Escapes are resolved for quoted tokens only.
    pub content: String,
    /// Whether the token was written between double quotes.
    pub quoted: bool,
    /// Comment captured right after the token, verbatim with `/*` and `*/`.
    pub comment: Option<String>,
}

impl Literal {
    /// A bare literal with no comment.
    pub fn bare(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            quoted: false,
            comment: None,
        }
    }

    /// A quoted literal with no comment.
    pub fn quoted(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            quoted: true,
            comment: None,
        }
    }

    /// Attach a trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A dictionary key. Keys never decode escapes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Key {
    /// Key text with one surrounding quote trimmed from each end.
    pub content: String,
    /// Comment that followed the key, delimiters included.
    pub comment: Option<String>,
}

impl Key {
    /// A key without a comment.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            comment: None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::new(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::new(s)
    }
}

/// Ordered key/value mapping. Re-inserting an existing key replaces its value
/// in place; the key keeps its position and the metadata of its first
/// occurrence.
#[derive(Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, (Key, Value)>,
}

impl Dictionary {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry, returning the replaced value.
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.get_mut(&key.content) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(key.content.clone(), (key, value));
                None
            }
        }
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|(_, v)| v)
    }

    /// The stored key, including its comment.
    pub fn key(&self, key: &str) -> Option<&Key> {
        self.entries.get(key).map(|(k, _)| k)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, (_, v))| (k.as_str(), v))
    }

    /// Entries in insertion order, with full key metadata.
    pub fn entries(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|(_, v)| v)
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Key>> FromIterator<(K, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

impl Value {
    /// Returns a reference to the dictionary if this is a `Dictionary`.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns a reference to the elements if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a reference to the literal if this is a `Literal`.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Returns the decoded text if this is a `Literal`.
    pub fn as_str(&self) -> Option<&str> {
        self.as_literal().map(|lit| lit.content.as_str())
    }

    /// Looks up `key` if this is a `Dictionary`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dictionary().and_then(|dict| dict.get(key))
    }

    /// Trailing comment of a literal.
    pub fn comment(&self) -> Option<&str> {
        self.as_literal().and_then(|lit| lit.comment.as_deref())
    }

    /// Returns `true` if this is a quoted literal.
    pub fn is_quoted(&self) -> bool {
        matches!(self, Value::Literal(lit) if lit.quoted)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Dictionary(dict) => dict.fmt(f),
            Value::Array(arr) => f.debug_list().entries(arr).finish(),
            Value::Literal(lit) => {
                write!(f, "{:?}", lit.content)?;
                if let Some(comment) = &lit.comment {
                    write!(f, " {}", comment)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Value::Literal(lit)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(Literal::bare(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Literal(Literal::bare(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}
