//! Named transforms applied to path matches.
//!
//! The set of behaviours is closed: callers select one by name (`remove`,
//! `remove_empty`) rather than supplying arbitrary code, which keeps what a
//! configuration can do to a document easy to audit. The path engine itself
//! still accepts any closure for library use.

use crate::document::node::{ChildRef, DocNode};
use crate::path::{DocPath, PathError, Parser, Walker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named in-place transformation of a matched (parent, key) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Delete the matched key unconditionally.
    Remove,
    /// Delete the matched key only if its value is empty or falsy.
    RemoveEmpty,
}

/// Error returned when a transform name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transform `{0}`, expected one of: remove, remove_empty")]
pub struct UnknownTransform(pub String);

impl Transform {
    /// Every registered transform.
    pub const ALL: [Transform; 2] = [Transform::Remove, Transform::RemoveEmpty];

    pub fn name(self) -> &'static str {
        match self {
            Transform::Remove => "remove",
            Transform::RemoveEmpty => "remove_empty",
        }
    }

    /// Applies the transform to `parent[child]`.
    ///
    /// A child that no longer exists is left alone.
    pub fn apply(self, parent: &mut DocNode, child: &ChildRef) {
        match self {
            Transform::Remove => {
                parent.remove(child);
            }
            Transform::RemoveEmpty => {
                let empty = parent
                    .get(child)
                    .is_some_and(|node| node.value().is_falsy());
                if empty {
                    parent.remove(child);
                }
            }
        }
    }

    /// Applies the transform to every match of an already parsed path.
    pub fn run(self, walker: &Walker, document: &mut DocNode, path: &DocPath) -> usize {
        walker.transform(document, path, |parent, child| self.apply(parent, child))
    }

    /// Parses `path` and applies the transform to every match.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::parser::parse_document;
    /// use docpath::transform::Transform;
    ///
    /// let mut doc = parse_document("a: []\nb: [1]").unwrap();
    /// Transform::RemoveEmpty.apply_at(&mut doc, "/a").unwrap();
    /// Transform::RemoveEmpty.apply_at(&mut doc, "/b").unwrap();
    /// assert_eq!(doc, parse_document("b: [1]").unwrap());
    /// ```
    pub fn apply_at(self, document: &mut DocNode, path: &str) -> Result<usize, PathError> {
        let parsed = Parser::parse(path)?;
        Ok(self.run(&Walker::default(), document, &parsed))
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Transform {
    type Err = UnknownTransform;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Transform::ALL
            .into_iter()
            .find(|transform| transform.name() == name)
            .ok_or_else(|| UnknownTransform(name.to_string()))
    }
}
