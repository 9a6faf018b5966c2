use docpath::path::{Parser, PathError, Segment};
use rstest::rstest;

#[rstest]
#[case("/*")]
#[case("/**")]
#[case("/a/*")]
#[case("/a/b/**")]
#[case("*")]
fn test_trailing_wildcard_rejected(#[case] path: &str) {
    assert!(matches!(
        Parser::parse(path),
        Err(PathError::TrailingWildcard { .. })
    ));
}

#[rstest]
#[case("/*/*/a")]
#[case("/*/**/a")]
#[case("/**/*/a")]
#[case("/**/**/a")]
#[case("/x/**/*/a")]
fn test_adjacent_wildcards_rejected(#[case] path: &str) {
    assert!(matches!(
        Parser::parse(path),
        Err(PathError::AdjacentWildcards { .. })
    ));
}

#[rstest]
#[case("/a")]
#[case("/a/b/c")]
#[case("a/b")]
#[case("/items/0/name")]
#[case("/*/a/*/b")]
#[case("/**/properties/*/title")]
fn test_valid_paths_accepted(#[case] path: &str) {
    assert!(Parser::parse(path).is_ok());
}

#[test]
fn test_empty_path_rejected() {
    assert_eq!(Parser::parse(""), Err(PathError::Empty));
}

#[test]
fn test_root_slash_is_empty_key() {
    let path = Parser::parse("/").unwrap();
    assert_eq!(path.segments(), &[Segment::Key(String::new())]);
}

#[test]
fn test_error_message_prefix() {
    let err = Parser::parse("/a/**").unwrap_err();
    assert!(err.to_string().starts_with("supplied path is invalid:"));
    assert!(err.to_string().contains("/a/**"));
}

#[test]
fn test_display_round_trips() {
    let path = Parser::parse("/**/items/0/*/name").unwrap();
    assert_eq!(path.to_string(), "/**/items/0/*/name");
    assert!(path.has_wildcards());
}
