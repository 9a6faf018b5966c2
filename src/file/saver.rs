//! Document output.
//!
//! This module serializes a `DocNode` back to YAML (via `serde_yaml`) or JSON
//! (via `serde_json`), keeping mapping order, and writes it to stdout or to a
//! file with an atomic rename.

use crate::document::node::{DocKey, DocNode, DocNumber, DocValue};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialization format for output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Serializes a node in the requested format.
///
/// # Example
///
/// ```
/// use docpath::document::parser::parse_document;
/// use docpath::file::saver::{render, OutputFormat};
///
/// let doc = parse_document("b: 1\na: [true]\n").unwrap();
/// assert_eq!(render(&doc, OutputFormat::Json).unwrap(), "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n");
/// ```
pub fn render(node: &DocNode, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml_string(node),
        OutputFormat::Json => to_json_string(node),
    }
}

/// Serializes a node as YAML.
pub fn to_yaml_string(node: &DocNode) -> Result<String> {
    serde_yaml::to_string(&to_yaml_value(node)).context("Failed to serialize YAML")
}

/// Serializes a node as pretty-printed JSON with a trailing newline.
pub fn to_json_string(node: &DocNode) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(&to_json_value(node)).context("Failed to serialize JSON")?;
    json.push('\n');
    Ok(json)
}

/// Writes a node to `path`, gzip-compressing when the name ends in `.gz`.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_document<P: AsRef<Path>>(path: P, node: &DocNode, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");
    let text = render(node, format)?;
    write_file_atomic(path, text.as_bytes(), should_compress)
}

fn to_yaml_value(node: &DocNode) -> serde_yaml::Value {
    match node.value() {
        DocValue::Mapping(entries) => serde_yaml::Value::Mapping(
            entries
                .iter()
                .map(|(key, child)| (yaml_key(key), to_yaml_value(child)))
                .collect(),
        ),
        DocValue::Sequence(items) => {
            serde_yaml::Value::Sequence(items.iter().map(to_yaml_value).collect())
        }
        DocValue::String(s) => serde_yaml::Value::String(s.clone()),
        DocValue::Number(DocNumber::Integer(i)) => {
            serde_yaml::Value::Number(serde_yaml::Number::from(*i))
        }
        DocValue::Number(DocNumber::Float(f)) => {
            serde_yaml::Value::Number(serde_yaml::Number::from(*f))
        }
        DocValue::Boolean(b) => serde_yaml::Value::Bool(*b),
        DocValue::Null => serde_yaml::Value::Null,
    }
}

fn yaml_key(key: &DocKey) -> serde_yaml::Value {
    match key {
        DocKey::String(s) => serde_yaml::Value::String(s.clone()),
        DocKey::Integer(i) => serde_yaml::Value::Number(serde_yaml::Number::from(*i)),
        // Written as text so the key keeps its spelling
        DocKey::Real(s) => serde_yaml::Value::String(s.clone()),
        DocKey::Boolean(b) => serde_yaml::Value::Bool(*b),
        DocKey::Null => serde_yaml::Value::Null,
    }
}

// JSON object keys are always strings; non-string keys use their text.
fn to_json_value(node: &DocNode) -> serde_json::Value {
    match node.value() {
        DocValue::Mapping(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, child)| (key.to_string(), to_json_value(child)))
                .collect(),
        ),
        DocValue::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(to_json_value).collect())
        }
        DocValue::String(s) => serde_json::Value::String(s.clone()),
        DocValue::Number(DocNumber::Integer(i)) => serde_json::Value::from(*i),
        DocValue::Number(DocNumber::Float(f)) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        DocValue::Boolean(b) => serde_json::Value::Bool(*b),
        DocValue::Null => serde_json::Value::Null,
    }
}

/// Writes data to a file atomically, optionally compressing with gzip.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
