//! Order-preserving document parsing.
//!
//! YAML is parsed with `yaml-rust2`, whose mappings keep source order and
//! whose loader expands aliases into copies of their anchors, so the result
//! is always a finite tree. Text that does not scan as YAML is retried as
//! JSON through `serde_json` (built with `preserve_order`).
//!
//! # Example
//!
//! ```
//! use docpath::document::parser::parse_document;
//!
//! let doc = parse_document("b: 1\na: 2\n").unwrap();
//! assert!(doc.value().is_mapping());
//! ```

use super::node::{DocKey, DocNode, DocNumber, DocValue};
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use yaml_rust2::{Yaml, YamlLoader};

/// Parses YAML or JSON text into a `DocNode`.
///
/// YAML is tried first; if the YAML scanner rejects the input it is parsed
/// as JSON. An empty input yields a null document.
///
/// # Errors
///
/// Returns an error if the text is neither valid YAML nor valid JSON, or if
/// a YAML mapping uses a non-scalar key.
pub fn parse_document(text: &str) -> Result<DocNode> {
    match parse_yaml(text) {
        Ok(node) => Ok(node),
        Err(yaml_err) => parse_json(text).map_err(|json_err| {
            anyhow!(
                "Failed to parse document as YAML ({:#}) or JSON ({:#})",
                yaml_err,
                json_err
            )
        }),
    }
}

/// Parses YAML text, keeping only the first document of a stream.
pub fn parse_yaml(text: &str) -> Result<DocNode> {
    let docs = YamlLoader::load_from_str(text).context("Failed to scan YAML")?;
    match docs.into_iter().next() {
        Some(first) => convert_yaml(&first),
        None => Ok(DocNode::loaded(DocValue::Null)),
    }
}

/// Parses JSON text.
pub fn parse_json(text: &str) -> Result<DocNode> {
    let value: JsonValue = serde_json::from_str(text).context("Failed to parse JSON")?;
    Ok(convert_json(&value))
}

const MERGE_KEY: &str = "<<";

fn convert_yaml(yaml: &Yaml) -> Result<DocNode> {
    let value = match yaml {
        Yaml::Hash(hash) => {
            let mut merged = IndexMap::new();
            let mut entries = IndexMap::with_capacity(hash.len());
            for (key, child) in hash.iter() {
                if matches!(key, Yaml::String(name) if name == MERGE_KEY) {
                    merge_into(&mut merged, child)?;
                } else {
                    entries.insert(yaml_key(key)?, convert_yaml(child)?);
                }
            }

            // Explicit keys override merged ones
            merged.extend(entries);
            DocValue::Mapping(merged)
        }
        Yaml::Array(items) => DocValue::Sequence(
            items
                .iter()
                .map(convert_yaml)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::String(s) => DocValue::String(s.clone()),
        Yaml::Integer(i) => DocValue::Number(DocNumber::Integer(*i)),
        Yaml::Real(repr) => match yaml.as_f64() {
            Some(f) => DocValue::Number(DocNumber::Float(f)),
            None => DocValue::String(repr.clone()),
        },
        Yaml::Boolean(b) => DocValue::Boolean(*b),
        Yaml::Null => DocValue::Null,
        Yaml::Alias(_) => bail!("Unresolved YAML alias"),
        Yaml::BadValue => bail!("Invalid YAML value"),
    };
    Ok(DocNode::loaded(value))
}

/// Lifts the entries of a `<<` value into `target`.
///
/// The value is a mapping or a sequence of mappings. Keys already in
/// `target` are kept, so earlier sources win over later ones.
fn merge_into(target: &mut IndexMap<DocKey, DocNode>, source: &Yaml) -> Result<()> {
    match source {
        Yaml::Hash(_) => {
            if let DocValue::Mapping(entries) = convert_yaml(source)?.value {
                for (key, child) in entries {
                    target.entry(key).or_insert(child);
                }
            }
        }
        Yaml::Array(items) => {
            for item in items {
                if !matches!(item, Yaml::Hash(_)) {
                    bail!("Merge key `<<` expects mappings, found {:?}", item);
                }
                merge_into(target, item)?;
            }
        }
        other => bail!(
            "Merge key `<<` expects a mapping or a sequence of mappings, found {:?}",
            other
        ),
    }
    Ok(())
}

fn yaml_key(key: &Yaml) -> Result<DocKey> {
    match key {
        Yaml::String(s) => Ok(DocKey::String(s.clone())),
        Yaml::Integer(i) => Ok(DocKey::Integer(*i)),
        Yaml::Real(s) => Ok(DocKey::Real(s.clone())),
        Yaml::Boolean(b) => Ok(DocKey::Boolean(*b)),
        Yaml::Null => Ok(DocKey::Null),
        other => bail!("Unsupported mapping key: {:?}", other),
    }
}

fn convert_json(value: &JsonValue) -> DocNode {
    let value = match value {
        JsonValue::Object(map) => DocValue::Mapping(
            map.iter()
                .map(|(k, v)| (DocKey::String(k.clone()), convert_json(v)))
                .collect(),
        ),
        JsonValue::Array(items) => DocValue::Sequence(items.iter().map(convert_json).collect()),
        JsonValue::String(s) => DocValue::String(s.clone()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => DocValue::Number(DocNumber::Integer(i)),
            None => DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::Bool(b) => DocValue::Boolean(*b),
        JsonValue::Null => DocValue::Null,
    };
    DocNode::loaded(value)
}
