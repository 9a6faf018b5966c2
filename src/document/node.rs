//! Document node representation.
//!
//! This module provides the core data structures for representing loaded
//! documents in docpath. Every value is wrapped in a `DocNode` that records
//! whether it has been modified since loading, so callers can tell whether a
//! transform actually changed anything.
//!
//! Mappings keep insertion order (`IndexMap`) and accept any hashable YAML
//! key, not only strings.
//!
//! # Example
//!
//! ```
//! use docpath::document::node::{DocKey, DocNode, DocNumber, DocValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert(DocKey::from("name"), DocNode::new(DocValue::String("docpath".to_string())));
//! map.insert(DocKey::Integer(200), DocNode::new(DocValue::Number(DocNumber::Integer(1))));
//! let mapping = DocNode::new(DocValue::Mapping(map));
//!
//! assert!(mapping.value().is_mapping());
//! assert_eq!(mapping.value().len(), Some(2));
//! ```

use indexmap::IndexMap;
use std::fmt;

/// A mapping key.
///
/// YAML allows scalar keys of any type. Floats are kept in their textual form
/// so keys stay hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocKey {
    String(String),
    Integer(i64),
    Real(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKey::String(s) | DocKey::Real(s) => write!(f, "{}", s),
            DocKey::Integer(i) => write!(f, "{}", i),
            DocKey::Boolean(b) => write!(f, "{}", b),
            DocKey::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for DocKey {
    fn from(value: &str) -> Self {
        DocKey::String(value.to_string())
    }
}

impl From<String> for DocKey {
    fn from(value: String) -> Self {
        DocKey::String(value)
    }
}

impl From<i64> for DocKey {
    fn from(value: i64) -> Self {
        DocKey::Integer(value)
    }
}

/// A document number (integer or float).
#[derive(Debug, Clone, PartialEq)]
pub enum DocNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for DocNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocNumber::Integer(i) => write!(f, "{}", i),
            DocNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl DocNumber {
    pub fn is_zero(&self) -> bool {
        match self {
            DocNumber::Integer(i) => *i == 0,
            DocNumber::Float(f) => *f == 0.0,
        }
    }
}

/// A document value without metadata.
///
/// Mappings and sequences contain `DocNode` instances so the modification
/// flag is tracked throughout the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Ordered key-value pairs with unique keys
    Mapping(IndexMap<DocKey, DocNode>),
    /// Ordered values, indexable by position
    Sequence(Vec<DocNode>),
    String(String),
    Number(DocNumber),
    Boolean(bool),
    Null,
}

impl DocValue {
    /// Returns true if this value is a mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::node::{DocNumber, DocValue};
    /// use indexmap::IndexMap;
    ///
    /// assert!(DocValue::Mapping(IndexMap::new()).is_mapping());
    /// assert!(!DocValue::Number(DocNumber::Integer(42)).is_mapping());
    /// ```
    pub fn is_mapping(&self) -> bool {
        matches!(self, DocValue::Mapping(_))
    }

    /// Returns the number of children of a container, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            DocValue::Mapping(entries) => Some(entries.len()),
            DocValue::Sequence(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Returns true if the value counts as empty for `remove_empty`.
    ///
    /// Empty containers, the empty string, zero, null and `false` are
    /// falsy; everything else is not.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::node::{DocNode, DocNumber, DocValue};
    ///
    /// assert!(DocValue::Sequence(vec![]).is_falsy());
    /// assert!(DocValue::Number(DocNumber::Float(0.0)).is_falsy());
    /// assert!(!DocValue::Sequence(vec![DocNode::new(DocValue::Null)]).is_falsy());
    /// assert!(!DocValue::String("0".to_string()).is_falsy());
    /// ```
    pub fn is_falsy(&self) -> bool {
        match self {
            DocValue::Mapping(entries) => entries.is_empty(),
            DocValue::Sequence(items) => items.is_empty(),
            DocValue::String(s) => s.is_empty(),
            DocValue::Number(n) => n.is_zero(),
            DocValue::Boolean(b) => !b,
            DocValue::Null => true,
        }
    }
}

/// Address of a direct child inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChildRef {
    /// Key of a mapping entry
    Key(DocKey),
    /// Position in a sequence
    Index(usize),
}

impl fmt::Display for ChildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildRef::Key(key) => write!(f, "{}", key),
            ChildRef::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A document value wrapped with a modification flag.
///
/// Equality compares values only; two trees with the same content are equal
/// whether or not either has been modified.
#[derive(Debug, Clone)]
pub struct DocNode {
    pub(crate) value: DocValue,
    pub(crate) modified: bool,
}

impl PartialEq for DocNode {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl DocNode {
    /// Creates a new `DocNode` with the given value.
    ///
    /// The node is marked as modified since it did not come from a loader.
    pub fn new(value: DocValue) -> Self {
        Self {
            value,
            modified: true,
        }
    }

    /// Creates a node as produced by a loader, not marked as modified.
    pub fn loaded(value: DocValue) -> Self {
        Self {
            value,
            modified: false,
        }
    }

    /// Returns an immutable reference to the node's value.
    pub fn value(&self) -> &DocValue {
        &self.value
    }

    /// Returns whether this node or any of its descendants has been modified.
    pub fn is_modified(&self) -> bool {
        if self.modified {
            return true;
        }
        match &self.value {
            DocValue::Mapping(entries) => entries.values().any(DocNode::is_modified),
            DocValue::Sequence(items) => items.iter().any(DocNode::is_modified),
            _ => false,
        }
    }

    /// Returns the child at `child`, if present.
    pub fn get(&self, child: &ChildRef) -> Option<&DocNode> {
        match (&self.value, child) {
            (DocValue::Mapping(entries), ChildRef::Key(key)) => entries.get(key),
            (DocValue::Sequence(items), ChildRef::Index(idx)) => items.get(*idx),
            _ => None,
        }
    }

    /// Returns the child at `child` mutably, without marking this node.
    pub fn get_mut(&mut self, child: &ChildRef) -> Option<&mut DocNode> {
        match (&mut self.value, child) {
            (DocValue::Mapping(entries), ChildRef::Key(key)) => entries.get_mut(key),
            (DocValue::Sequence(items), ChildRef::Index(idx)) => items.get_mut(*idx),
            _ => None,
        }
    }

    /// Removes and returns the child at `child`.
    ///
    /// Mapping entries keep the relative order of the remaining keys;
    /// sequence elements after `idx` shift down by one. The node is marked
    /// as modified only if something was removed.
    pub fn remove(&mut self, child: &ChildRef) -> Option<DocNode> {
        let removed = match (&mut self.value, child) {
            (DocValue::Mapping(entries), ChildRef::Key(key)) => entries.shift_remove(key),
            (DocValue::Sequence(items), ChildRef::Index(idx)) if *idx < items.len() => {
                Some(items.remove(*idx))
            }
            _ => None,
        };
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Resolves a JSON Pointer (RFC 6901) against this node.
    ///
    /// The empty pointer refers to the node itself. `~1` decodes to `/` and
    /// `~0` to `~`. Sequence tokens must be plain decimal indices.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::parser::parse_document;
    ///
    /// let doc = parse_document("definitions:\n  a/b:\n    - 1\n    - 2\n").unwrap();
    /// let node = doc.pointer("/definitions/a~1b/1").unwrap();
    /// assert_eq!(node.value(), &docpath::document::node::DocValue::Number(
    ///     docpath::document::node::DocNumber::Integer(2)
    /// ));
    /// ```
    pub fn pointer(&self, pointer: &str) -> Option<&DocNode> {
        if pointer.is_empty() {
            return Some(self);
        }
        let tokens = pointer.strip_prefix('/')?;

        let mut node = self;
        for raw in tokens.split('/') {
            let token = raw.replace("~1", "/").replace("~0", "~");
            node = match &node.value {
                DocValue::Mapping(entries) => entries
                    .iter()
                    .find(|(key, _)| key.to_string() == token)
                    .map(|(_, child)| child)?,
                DocValue::Sequence(items) => {
                    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    items.get(token.parse::<usize>().ok()?)?
                }
                _ => return None,
            };
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, DocValue)>) -> DocNode {
        DocNode::loaded(DocValue::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (DocKey::from(k), DocNode::loaded(v)))
                .collect(),
        ))
    }

    #[test]
    fn test_doc_key_display() {
        assert_eq!(DocKey::from("name").to_string(), "name");
        assert_eq!(DocKey::Integer(200).to_string(), "200");
        assert_eq!(DocKey::Boolean(true).to_string(), "true");
        assert_eq!(DocKey::Null.to_string(), "null");
        assert_eq!(DocKey::Real("1.5".to_string()).to_string(), "1.5");
    }

    #[test]
    fn test_falsy_values() {
        assert!(DocValue::Mapping(IndexMap::new()).is_falsy());
        assert!(DocValue::Sequence(vec![]).is_falsy());
        assert!(DocValue::String(String::new()).is_falsy());
        assert!(DocValue::Number(DocNumber::Integer(0)).is_falsy());
        assert!(DocValue::Boolean(false).is_falsy());
        assert!(DocValue::Null.is_falsy());

        assert!(!DocValue::String(" ".to_string()).is_falsy());
        assert!(!DocValue::Number(DocNumber::Integer(-1)).is_falsy());
        assert!(!DocValue::Boolean(true).is_falsy());
    }

    #[test]
    fn test_loaded_node_is_not_modified() {
        let node = mapping(vec![("a", DocValue::Null)]);
        assert!(!node.is_modified());
    }

    #[test]
    fn test_remove_preserves_order_and_marks_modified() {
        let mut node = mapping(vec![
            ("a", DocValue::Null),
            ("b", DocValue::Null),
            ("c", DocValue::Null),
        ]);

        assert!(node.remove(&ChildRef::Key(DocKey::from("b"))).is_some());
        assert!(node.is_modified());

        let DocValue::Mapping(entries) = node.value() else {
            panic!("expected mapping");
        };
        let keys: Vec<String> = entries.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_missing_does_not_mark_modified() {
        let mut node = mapping(vec![("a", DocValue::Null)]);
        assert!(node.remove(&ChildRef::Key(DocKey::from("zzz"))).is_none());
        assert!(node.remove(&ChildRef::Index(0)).is_none());
        assert!(!node.is_modified());
    }

    #[test]
    fn test_remove_sequence_element() {
        let mut node = DocNode::loaded(DocValue::Sequence(vec![
            DocNode::loaded(DocValue::Boolean(true)),
            DocNode::loaded(DocValue::Boolean(false)),
        ]));
        let removed = node.remove(&ChildRef::Index(0)).unwrap();
        assert_eq!(removed.value(), &DocValue::Boolean(true));
        assert_eq!(node.value().len(), Some(1));
        assert!(node.remove(&ChildRef::Index(5)).is_none());
    }

    #[test]
    fn test_pointer_root_and_missing() {
        let node = mapping(vec![("a", DocValue::Boolean(true))]);
        assert_eq!(node.pointer(""), Some(&node));
        assert!(node.pointer("/b").is_none());
        assert!(node.pointer("a").is_none());
        assert!(node.pointer("/a/0").is_none());
    }

    #[test]
    fn test_pointer_escapes() {
        let node = mapping(vec![("m~n", DocValue::Boolean(true))]);
        assert_eq!(
            node.pointer("/m~0n").map(|n| n.value()),
            Some(&DocValue::Boolean(true))
        );
    }
}
