//! Document loading.
//!
//! This module reads YAML or JSON documents from files (optionally
//! gzip-compressed) or stdin and parses them into `DocTree` structures the
//! path engine can transform.

use crate::document::node::DocNode;
use crate::document::parser::parse_document;
use crate::document::tree::DocTree;
use crate::options::split_pointer;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads and parses a YAML or JSON file from the filesystem.
///
/// Files ending in `.gz` are decompressed first.
///
/// # Examples
///
/// ```no_run
/// use docpath::file::loader::load_document_file;
///
/// let tree = load_document_file("schema.yaml").unwrap();
/// assert_eq!(tree.source(), "schema.yaml");
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzip-named but not valid gzip data
/// - The file contents are neither valid YAML nor valid JSON
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<DocTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file: {}", path_ref.display()))?
    };

    debug!(path = %path_ref.display(), bytes = content.len(), "loaded document");

    let root = parse_document(&content)
        .with_context(|| format!("Failed to parse {}", path_ref.display()))?;
    Ok(DocTree::with_source(root, path_ref.display().to_string()))
}

/// Loads and parses a document from standard input.
///
/// Gzip input is detected by its magic bytes.
///
/// # Errors
///
/// This function will return an error if reading stdin fails or the input
/// is neither valid YAML nor valid JSON.
pub fn load_document_from_stdin() -> Result<DocTree> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let root = parse_bytes(buffer).context("Failed to parse document from stdin")?;
    Ok(DocTree::with_source(root, "<stdin>"))
}

/// Loads a document from a `source#pointer` reference.
///
/// A source of `-` or an empty source reads stdin. A non-empty pointer
/// selects the sub-document it names; transforms then apply relative to it.
///
/// # Examples
///
/// ```no_run
/// use docpath::file::loader::load_reference;
///
/// let tree = load_reference("api.yaml#/components/schemas/User").unwrap();
/// assert_eq!(tree.pointer(), Some("/components/schemas/User"));
/// ```
pub fn load_reference(reference: &str) -> Result<DocTree> {
    let (source, pointer) = split_pointer(reference);

    let tree = if source.is_empty() || source == "-" {
        load_document_from_stdin()?
    } else {
        load_document_file(source)?
    };

    tree.select(pointer)
}

fn parse_bytes(buffer: Vec<u8>) -> Result<DocNode> {
    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };
    parse_document(&content)
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    read_gzip(GzDecoder::new(file))
        .context("Failed to decompress gzipped file - file may be corrupted")
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    read_gzip(GzDecoder::new(bytes)).context("Failed to decompress gzipped input")
}

fn read_gzip<R: std::io::Read>(mut decoder: R) -> std::io::Result<String> {
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    Ok(content)
}
