//! Slash-separated document paths with wildcards.
//!
//! A path selects nodes in a document by key or index, one level per
//! segment, and may fan out with wildcards.
//!
//! # Supported Syntax
//!
//! - `/key` - Mapping key
//! - `/0` - Sequence index, or integer mapping key
//! - `/*/key` - `key` in every child mapping, one level down
//! - `/**/key` - `key` in this mapping and every nested mapping
//!
//! A path may not end in a wildcard, and two wildcards may not follow
//! each other.
//!
//! # Examples
//!
//! ```
//! // /definitions/*/title - the title of every definition
//! // /**/description - every description anywhere
//! // /items/0/examples - examples of the first item
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod walker;

pub use ast::{DocPath, Segment};
pub use error::PathError;
pub use parser::Parser;
pub use walker::{Walker, DEFAULT_MAX_DEPTH};

use crate::document::node::{ChildRef, DocNode};
use tracing::debug;

/// Parses `path` and applies `transform` to every match in `document`.
///
/// Returns the number of matches. The path is validated before the
/// document is touched, so an invalid path never mutates anything.
///
/// # Example
///
/// ```
/// use docpath::document::parser::parse_document;
/// use docpath::path::transform_at;
///
/// let mut doc = parse_document("a: {b: 1}").unwrap();
/// let matches = transform_at(&mut doc, "/a/b", |parent, key| {
///     parent.remove(key);
/// })
/// .unwrap();
/// assert_eq!(matches, 1);
/// assert_eq!(doc, parse_document("a: {}").unwrap());
/// ```
pub fn transform_at<F>(document: &mut DocNode, path: &str, transform: F) -> Result<usize, PathError>
where
    F: FnMut(&mut DocNode, &ChildRef),
{
    let parsed = Parser::parse(path)?;
    let matches = Walker::default().transform(document, &parsed, transform);
    debug!(path = %parsed, matches, "transformed document");
    Ok(matches)
}
