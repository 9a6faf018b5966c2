//! Segment types for slash-separated document paths.

use crate::document::node::{ChildRef, DocKey, DocNode, DocValue};
use std::fmt;

/// A segment in a document path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal mapping key
    Key(String),
    /// Integer token: a sequence position or an integer mapping key
    Index(i64),
    /// `*` - every mapping child, one level down
    Wildcard,
    /// `**` - the current mapping and every nested mapping below it
    DeepWildcard,
}

impl Segment {
    /// Classifies a raw path token.
    ///
    /// Wildcards are recognized purely by value; there is no escape for a
    /// literal `*` or `**` key.
    pub fn from_token(token: &str) -> Self {
        match token {
            "*" => Segment::Wildcard,
            "**" => Segment::DeepWildcard,
            _ => match token.parse::<i64>() {
                Ok(idx) => Segment::Index(idx),
                Err(_) => Segment::Key(token.to_string()),
            },
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard | Segment::DeepWildcard)
    }

    pub fn is_deep(&self) -> bool {
        matches!(self, Segment::DeepWildcard)
    }

    /// Returns true if this literal segment selects the mapping key `key`.
    ///
    /// `Key` compares against the key's textual form. `Index` matches an
    /// integer key with the same value or a string key spelling it.
    /// Wildcards never match a key directly.
    pub fn matches_key(&self, key: &DocKey) -> bool {
        match (self, key) {
            (Segment::Index(idx), DocKey::Integer(k)) => idx == k,
            (Segment::Index(idx), DocKey::String(k)) => *k == idx.to_string(),
            (Segment::Index(_), _) => false,
            (Segment::Key(name), DocKey::String(k)) => k == name,
            (Segment::Key(name), other) => other.to_string() == *name,
            (Segment::Wildcard | Segment::DeepWildcard, _) => false,
        }
    }

    /// Resolves this literal segment to a concrete child of `node`.
    ///
    /// Mappings are searched by key, sequences by non-negative index.
    /// Scalars, out-of-range indices and string keys on sequences resolve
    /// to `None`.
    pub fn resolve(&self, node: &DocNode) -> Option<ChildRef> {
        match (node.value(), self) {
            (DocValue::Mapping(entries), Segment::Key(name)) => {
                let exact = DocKey::String(name.clone());
                if entries.contains_key(&exact) {
                    return Some(ChildRef::Key(exact));
                }
                entries
                    .keys()
                    .find(|key| self.matches_key(key))
                    .cloned()
                    .map(ChildRef::Key)
            }
            (DocValue::Mapping(entries), Segment::Index(_)) => entries
                .keys()
                .find(|key| self.matches_key(key))
                .cloned()
                .map(ChildRef::Key),
            (DocValue::Sequence(items), Segment::Index(idx)) => usize::try_from(*idx)
                .ok()
                .filter(|idx| *idx < items.len())
                .map(ChildRef::Index),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(name) => write!(f, "{}", name),
            Segment::Index(idx) => write!(f, "{}", idx),
            Segment::Wildcard => write!(f, "*"),
            Segment::DeepWildcard => write!(f, "**"),
        }
    }
}

/// A validated document path.
///
/// Always non-empty, never ends in a wildcard and never holds two wildcards
/// next to each other. Built by [`Parser::parse`](super::Parser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<Segment>,
}

impl DocPath {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcards(&self) -> bool {
        self.segments.iter().any(Segment::is_wildcard)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
