//! Document path string parser.

use super::ast::{DocPath, Segment};
use super::error::PathError;

/// Parser for slash-separated path strings such as `/**/properties/name`.
pub struct Parser;

impl Parser {
    /// Parses and validates a path string.
    ///
    /// The path is split on `/`. A leading `/` is optional; every other
    /// token, including an empty one, becomes a segment.
    ///
    /// # Errors
    ///
    /// - [`PathError::Empty`] if there are no segments
    /// - [`PathError::TrailingWildcard`] if the last segment is `*` or `**`
    /// - [`PathError::AdjacentWildcards`] if two wildcards are neighbours
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::path::{Parser, Segment};
    ///
    /// let path = Parser::parse("/**/items/0").unwrap();
    /// assert_eq!(path.segments()[2], Segment::Index(0));
    /// assert!(Parser::parse("/a/*").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<DocPath, PathError> {
        let segments = Self::tokenize(path);
        Self::validate(path, &segments)?;
        Ok(DocPath::new(segments))
    }

    /// Splits a path string into segments without validating them.
    pub fn tokenize(path: &str) -> Vec<Segment> {
        if path.is_empty() {
            return Vec::new();
        }
        let body = path.strip_prefix('/').unwrap_or(path);
        body.split('/').map(Segment::from_token).collect()
    }

    fn validate(path: &str, segments: &[Segment]) -> Result<(), PathError> {
        let last = segments.last().ok_or(PathError::Empty)?;

        if last.is_wildcard() {
            return Err(PathError::TrailingWildcard {
                path: path.to_string(),
            });
        }

        let adjacent = segments
            .windows(2)
            .position(|pair| pair[0].is_wildcard() && pair[1].is_wildcard());
        if let Some(position) = adjacent {
            return Err(PathError::AdjacentWildcards {
                path: path.to_string(),
                first: segments[position].to_string(),
                second: segments[position + 1].to_string(),
                position,
            });
        }

        Ok(())
    }
}
