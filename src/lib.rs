//! docpath - wildcard path transforms for YAML and JSON documents.
//!
//! Load a document, select nodes with slash-separated paths such as
//! `/**/examples` or `/definitions/*/title`, and remove them in place.
//!
//! ```
//! use docpath::document::parser::parse_document;
//! use docpath::transform::Transform;
//!
//! let mut doc = parse_document("p: {q: {x: 1}}\nx: 2\n").unwrap();
//! Transform::Remove.apply_at(&mut doc, "/**/x").unwrap();
//! assert_eq!(doc, parse_document("p: {q: {}}").unwrap());
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod options;
pub mod path;
pub mod transform;
