//! Document model and loading.
//!
//! `node` holds the ordered tree the path engine walks, `parser` turns YAML
//! or JSON text into that tree, and `tree` carries a loaded document with
//! its source label.

pub mod node;
pub mod parser;
pub mod tree;
