//! Binds a parsed path against a document and applies a transform to every
//! match.
//!
//! Literal segments descend one child at a time. A wildcard hands the rest
//! of the path to fan-out, which expands it over the keys of the current
//! mapping:
//!
//! - `*` binds the remaining segments against every mapping-valued child.
//! - `**` matches the next segment against the keys of the current mapping
//!   and of every mapping nested below it.
//!
//! Anything that does not resolve (missing key, index out of range, scalar
//! where a container was expected) is a silent miss.

use super::ast::{DocPath, Segment};
use crate::document::node::{ChildRef, DocNode, DocValue};
use tracing::{debug, warn};

/// Default nesting limit for a single walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Walks documents with a fixed nesting limit.
///
/// Branches nested deeper than `max_depth` are skipped with a warning
/// instead of growing the stack further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walker {
    max_depth: usize,
}

impl Default for Walker {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Invokes `transform(parent, key)` once for every node `path` matches
    /// and returns the number of invocations.
    ///
    /// Deletions found during fan-out are deferred until iteration over the
    /// affected mapping has finished, so a transform may remove the key it
    /// is handed.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::parser::parse_document;
    /// use docpath::path::{Parser, Walker};
    ///
    /// let mut doc = parse_document("a: {x: 1}\nb: {x: 2}\n").unwrap();
    /// let path = Parser::parse("/*/x").unwrap();
    /// let matches = Walker::new().transform(&mut doc, &path, |parent, key| {
    ///     parent.remove(key);
    /// });
    /// assert_eq!(matches, 2);
    /// ```
    pub fn transform<F>(&self, document: &mut DocNode, path: &DocPath, mut transform: F) -> usize
    where
        F: FnMut(&mut DocNode, &ChildRef),
    {
        let mut walk = Walk {
            max_depth: self.max_depth,
            transform: &mut transform,
            matches: 0,
        };
        walk.bind(document, path.segments(), 0);
        walk.matches
    }
}

struct Walk<'f, F> {
    max_depth: usize,
    transform: &'f mut F,
    matches: usize,
}

impl<F> Walk<'_, F>
where
    F: FnMut(&mut DocNode, &ChildRef),
{
    fn apply(&mut self, parent: &mut DocNode, child: &ChildRef) {
        debug!(key = %child, "path matched");
        (self.transform)(parent, child);
        self.matches += 1;
    }

    fn within_limit(&self, depth: usize) -> bool {
        if depth >= self.max_depth {
            warn!(
                max_depth = self.max_depth,
                "document nesting exceeds walk limit, skipping branch"
            );
            return false;
        }
        true
    }

    // `depth` counts recursive calls only; literal segments are followed
    // in a loop.
    fn bind(&mut self, node: &mut DocNode, segments: &[Segment], depth: usize) {
        let mut cursor = node;

        for (idx, segment) in segments.iter().enumerate() {
            if segment.is_wildcard() {
                self.fan_out(cursor, &segments[idx + 1..], segment.is_deep(), depth);
                return;
            }

            let Some(child) = segment.resolve(cursor) else {
                return;
            };

            if idx + 1 == segments.len() {
                self.apply(cursor, &child);
                return;
            }

            let Some(next) = cursor.get_mut(&child) else {
                return;
            };
            cursor = next;
        }
    }

    fn fan_out(&mut self, node: &mut DocNode, rest: &[Segment], deep: bool, depth: usize) {
        let Some(head) = rest.first() else {
            return;
        };
        if !self.within_limit(depth) {
            return;
        }
        let DocValue::Mapping(entries) = &mut node.value else {
            return;
        };

        let mut targets = Vec::new();

        for (key, child) in entries.iter_mut() {
            if !deep {
                if child.value.is_mapping() {
                    self.bind(child, rest, depth + 1);
                }
                continue;
            }

            let matched = head.matches_key(key);
            if matched {
                targets.push(ChildRef::Key(key.clone()));
            }
            // A single-segment match is about to be handed to the
            // transform; only longer suffixes keep searching inside it.
            if child.value.is_mapping() && (!matched || rest.len() > 1) {
                self.fan_out(child, rest, true, depth + 1);
            }
        }

        for target in targets {
            if rest.len() == 1 {
                self.apply(node, &target);
            } else if let Some(child) = node.get_mut(&target) {
                self.bind(child, &rest[1..], depth + 1);
            }
        }
    }
}
