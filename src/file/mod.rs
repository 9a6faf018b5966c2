//! File I/O for documents.
//!
//! `loader` reads YAML/JSON from files or stdin (gzip aware) and `saver`
//! writes transformed documents back out as YAML or JSON.

pub mod loader;
pub mod saver;
