use docpath::document::node::DocNode;
use docpath::document::parser::parse_document;
use docpath::path::{transform_at, Parser, Walker};
use docpath::transform::Transform;

fn doc(text: &str) -> DocNode {
    parse_document(text).unwrap()
}

#[test]
fn test_literal_path_removes_key() {
    let mut document = doc(r#"{"a": {"b": 1}}"#);
    let matches = Transform::Remove.apply_at(&mut document, "/a/b").unwrap();
    assert_eq!(matches, 1);
    assert_eq!(document, doc(r#"{"a": {}}"#));
}

#[test]
fn test_missing_path_is_noop() {
    let mut document = doc(r#"{"a": 1}"#);
    let matches = Transform::Remove.apply_at(&mut document, "/x/y").unwrap();
    assert_eq!(matches, 0);
    assert_eq!(document, doc(r#"{"a": 1}"#));
    assert!(!document.is_modified());
}

#[test]
fn test_single_wildcard_fan_out() {
    let mut document = doc(r#"{"a": {"x": 1}, "b": {"x": 2}, "c": {"y": 3}}"#);
    let matches = Transform::Remove.apply_at(&mut document, "/*/x").unwrap();
    assert_eq!(matches, 2);
    assert_eq!(document, doc(r#"{"a": {}, "b": {}, "c": {"y": 3}}"#));
}

#[test]
fn test_deep_wildcard_fan_out_includes_root() {
    let mut document = doc(r#"{"p": {"q": {"x": 1}}, "x": 2}"#);
    let matches = Transform::Remove.apply_at(&mut document, "/**/x").unwrap();
    assert_eq!(matches, 2);
    assert_eq!(document, doc(r#"{"p": {"q": {}}}"#));
}

#[test]
fn test_remove_empty_semantics() {
    let mut empty = doc(r#"{"a": []}"#);
    Transform::RemoveEmpty.apply_at(&mut empty, "/a").unwrap();
    assert_eq!(empty, doc("{}"));

    let mut full = doc(r#"{"a": [1]}"#);
    Transform::RemoveEmpty.apply_at(&mut full, "/a").unwrap();
    assert_eq!(full, doc(r#"{"a": [1]}"#));
    assert!(!full.is_modified());
}

#[test]
fn test_wildcard_removes_every_matching_sibling() {
    let mut document = doc(
        r#"{"keep": 0, "one": {"drop": 1, "stay": 1}, "two": {"drop": 2}, "three": {"drop": 3, "stay": 3}}"#,
    );
    let matches = Transform::Remove.apply_at(&mut document, "/*/drop").unwrap();
    assert_eq!(matches, 3);
    assert_eq!(
        document,
        doc(r#"{"keep": 0, "one": {"stay": 1}, "two": {}, "three": {"stay": 3}}"#)
    );
}

#[test]
fn test_deep_wildcard_removes_matching_siblings_in_one_mapping() {
    let mut document = doc("a: 1\nb: 2\nc: {a: 3}\n");
    let path = Parser::parse("/**/a").unwrap();
    let matches = Walker::new().transform(&mut document, &path, |parent, key| {
        parent.remove(key);
    });
    assert_eq!(matches, 2);
    assert_eq!(document, doc("b: 2\nc: {}\n"));
}

#[test]
fn test_remove_is_idempotent() {
    let mut once = doc("a: {b: 1}\nc: {b: 2}\n");
    Transform::Remove.apply_at(&mut once, "/**/b").unwrap();

    let mut twice = once.clone();
    let second = Transform::Remove.apply_at(&mut twice, "/**/b").unwrap();
    assert_eq!(second, 0);
    assert_eq!(twice, once);
}

#[test]
fn test_invalid_path_leaves_document_untouched() {
    let mut document = doc("a: {b: 1}");
    assert!(Transform::Remove.apply_at(&mut document, "/a/*").is_err());
    assert!(Transform::Remove.apply_at(&mut document, "/*/**/b").is_err());
    assert_eq!(document, doc("a: {b: 1}"));
    assert!(!document.is_modified());
}

#[test]
fn test_custom_transform_sees_parent_and_key() {
    let mut document = doc("definitions:\n  user: {title: User}\n  pet: {title: Pet}\n");
    let mut titles = Vec::new();
    let matches = transform_at(&mut document, "/definitions/*/title", |parent, key| {
        if let Some(title) = parent.get(key) {
            titles.push(format!("{:?}", title.value()));
        }
    })
    .unwrap();
    assert_eq!(matches, 2);
    assert_eq!(titles.len(), 2);
    assert!(!document.is_modified());
}

#[test]
fn test_schema_style_hiding() {
    let schema = r#"
title: Pet
properties:
  name:
    type: string
    examples: [Rex]
  owner:
    type: object
    properties:
      id:
        type: integer
        examples: [1]
required: []
"#;
    let mut document = doc(schema);
    Transform::Remove.apply_at(&mut document, "/**/examples").unwrap();
    Transform::RemoveEmpty.apply_at(&mut document, "/required").unwrap();

    let expected = r#"
title: Pet
properties:
  name:
    type: string
  owner:
    type: object
    properties:
      id:
        type: integer
"#;
    assert_eq!(document, doc(expected));
}
