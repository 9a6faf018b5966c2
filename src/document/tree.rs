//! A loaded document together with where it came from.
//!
//! `DocTree` pairs the root `DocNode` with a human-readable source label
//! (file path, `<stdin>` or `<inline>`) and the JSON Pointer that selected
//! it, if any. Transforms always run against `root_mut()`.
//!
//! # Example
//!
//! ```
//! use docpath::document::parser::parse_document;
//! use docpath::document::tree::DocTree;
//!
//! let root = parse_document("definitions:\n  user:\n    type: object\n").unwrap();
//! let tree = DocTree::with_source(root, "schema.yaml")
//!     .select("/definitions/user")
//!     .unwrap();
//!
//! assert_eq!(tree.pointer(), Some("/definitions/user"));
//! assert!(tree.root().value().is_mapping());
//! ```

use super::node::DocNode;
use anyhow::{anyhow, Result};

/// A document tree with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTree {
    root: DocNode,
    source: String,
    pointer: Option<String>,
}

impl DocTree {
    /// Creates a tree for a document that was supplied inline.
    pub fn new(root: DocNode) -> Self {
        Self::with_source(root, "<inline>")
    }

    /// Creates a tree with an explicit source label.
    pub fn with_source(root: DocNode, source: impl Into<String>) -> Self {
        Self {
            root,
            source: source.into(),
            pointer: None,
        }
    }

    pub fn root(&self) -> &DocNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut DocNode {
        &mut self.root
    }

    /// Returns the label of the source this tree was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the pointer used to select this tree, if any.
    pub fn pointer(&self) -> Option<&str> {
        self.pointer.as_deref()
    }

    /// Replaces the root with the sub-document at `pointer`.
    ///
    /// An empty pointer keeps the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the pointer does not resolve in this document.
    pub fn select(self, pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Ok(self);
        }

        let root = self.root.pointer(pointer).cloned().ok_or_else(|| {
            anyhow!(
                "Failed to resolve pointer '{}' in {}",
                pointer,
                self.source
            )
        })?;

        Ok(Self {
            root,
            source: self.source,
            pointer: Some(pointer.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_document;

    #[test]
    fn test_new_tree_is_inline() {
        let tree = DocTree::new(parse_document("a: 1").unwrap());
        assert_eq!(tree.source(), "<inline>");
        assert_eq!(tree.pointer(), None);
    }

    #[test]
    fn test_select_empty_pointer_keeps_document() {
        let root = parse_document("a: 1").unwrap();
        let tree = DocTree::new(root.clone()).select("").unwrap();
        assert_eq!(tree.root(), &root);
        assert_eq!(tree.pointer(), None);
    }

    #[test]
    fn test_select_missing_pointer_fails() {
        let tree = DocTree::with_source(parse_document("a: 1").unwrap(), "x.yaml");
        let err = tree.select("/b").unwrap_err().to_string();
        assert!(err.contains("/b"));
        assert!(err.contains("x.yaml"));
    }
}
