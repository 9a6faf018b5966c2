//! User-facing hide options.
//!
//! Options arrive as comma-separated lists of paths, with CSV quoting for
//! paths that themselves contain commas:
//!
//! ```text
//! --hide-key '/**/examples,"/definitions/*/a,b"'
//! ```
//!
//! `hide_key` paths are applied with [`Transform::Remove`] and
//! `hide_key_if_empty` paths with [`Transform::RemoveEmpty`], in that order.

use crate::document::node::DocNode;
use crate::path::{DocPath, PathError, Parser, Walker};
use crate::transform::Transform;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading hide options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid path list: list is empty")]
    EmptyPathList,
    #[error("invalid path list `{list}`: {source}")]
    MalformedPathList {
        list: String,
        #[source]
        source: csv::Error,
    },
    #[error("invalid flag value `{0}`, expected on, true, off or false")]
    InvalidFlag(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Splits one comma-separated, CSV-quoted option value into paths.
///
/// Surrounding whitespace is trimmed from each entry and empty entries are
/// dropped.
///
/// # Example
///
/// ```
/// use docpath::options::parse_path_list;
///
/// let paths = parse_path_list(r#"/a/b,"/c,d/e""#).unwrap();
/// assert_eq!(paths, vec!["/a/b", "/c,d/e"]);
/// ```
pub fn parse_path_list(list: &str) -> Result<Vec<String>, OptionsError> {
    if list.trim().is_empty() {
        return Err(OptionsError::EmptyPathList);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(list.as_bytes());

    let mut paths = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| OptionsError::MalformedPathList {
            list: list.to_string(),
            source,
        })?;
        paths.extend(
            record
                .iter()
                .filter(|field| !field.is_empty())
                .map(str::to_string),
        );
    }

    if paths.is_empty() {
        return Err(OptionsError::EmptyPathList);
    }
    Ok(paths)
}

/// Splits `source#pointer` into its source and JSON Pointer parts.
///
/// Only the last `#` separates; a reference without one has an empty
/// pointer.
///
/// # Example
///
/// ```
/// use docpath::options::split_pointer;
///
/// assert_eq!(split_pointer("schema.yaml#/definitions/user"), ("schema.yaml", "/definitions/user"));
/// assert_eq!(split_pointer("schema.yaml"), ("schema.yaml", ""));
/// ```
pub fn split_pointer(reference: &str) -> (&str, &str) {
    reference.rsplit_once('#').unwrap_or((reference, ""))
}

/// Reads an on/off option value.
///
/// A flag given without a value is on. Values are matched case-insensitively
/// after trimming.
///
/// # Example
///
/// ```
/// use docpath::options::parse_flag;
///
/// assert!(parse_flag(None).unwrap());
/// assert!(!parse_flag(Some(" Off ")).unwrap());
/// assert!(parse_flag(Some("maybe")).is_err());
/// ```
pub fn parse_flag(value: Option<&str>) -> Result<bool, OptionsError> {
    let Some(raw) = value else {
        return Ok(true);
    };
    match raw.trim().to_lowercase().as_str() {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(OptionsError::InvalidFlag(raw.to_string())),
    }
}

fn parse_checked(list: &str) -> Result<Vec<String>, OptionsError> {
    let paths = parse_path_list(list)?;
    for path in &paths {
        Parser::parse(path)?;
    }
    Ok(paths)
}

/// Paths to hide, grouped by transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HideOptions {
    pub hide_key: Vec<String>,
    pub hide_key_if_empty: Vec<String>,
}

impl HideOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hide_key.is_empty() && self.hide_key_if_empty.is_empty()
    }

    /// Adds the paths of one `hide_key` option value.
    pub fn add_hide_key(&mut self, list: &str) -> Result<(), OptionsError> {
        self.hide_key.extend(parse_checked(list)?);
        Ok(())
    }

    /// Adds the paths of one `hide_key_if_empty` option value.
    pub fn add_hide_key_if_empty(&mut self, list: &str) -> Result<(), OptionsError> {
        self.hide_key_if_empty.extend(parse_checked(list)?);
        Ok(())
    }

    /// Parses every path up front, paired with the transform it runs with.
    pub fn compile(&self) -> Result<Vec<(Transform, DocPath)>, PathError> {
        let removes = self
            .hide_key
            .iter()
            .map(|path| (Transform::Remove, path));
        let empties = self
            .hide_key_if_empty
            .iter()
            .map(|path| (Transform::RemoveEmpty, path));

        removes
            .chain(empties)
            .map(|(transform, path)| Parser::parse(path).map(|parsed| (transform, parsed)))
            .collect()
    }

    /// Applies every hide path to `document` and returns the total number
    /// of matches.
    ///
    /// All paths are validated before the first transform runs, so one
    /// invalid path leaves the document untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::parser::parse_document;
    /// use docpath::options::HideOptions;
    /// use docpath::path::Walker;
    ///
    /// let mut options = HideOptions::new();
    /// options.add_hide_key("/**/examples").unwrap();
    /// options.add_hide_key_if_empty("/required").unwrap();
    ///
    /// let mut doc = parse_document("required: []\nproperties:\n  a: {examples: [1]}\n").unwrap();
    /// options.apply(&Walker::default(), &mut doc).unwrap();
    /// assert_eq!(doc, parse_document("properties:\n  a: {}\n").unwrap());
    /// ```
    pub fn apply(&self, walker: &Walker, document: &mut DocNode) -> Result<usize, PathError> {
        let compiled = self.compile()?;

        let mut total = 0;
        for (transform, path) in &compiled {
            let matches = transform.run(walker, document, path);
            debug!(%transform, %path, matches, "applied hide path");
            total += matches;
        }
        Ok(total)
    }
}
