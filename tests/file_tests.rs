use docpath::file::loader::{load_document_file, load_reference};
use docpath::file::saver::{render, save_document, OutputFormat};
use docpath::transform::Transform;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_yaml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.yaml");
    fs::write(&path, "title: Pet\nproperties:\n  name: {type: string}\n").unwrap();

    let tree = load_document_file(&path).unwrap();
    assert_eq!(tree.source(), path.display().to_string());
    assert_eq!(tree.pointer(), None);
    assert!(tree.root().pointer("/properties/name/type").is_some());
}

#[test]
fn test_load_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, r#"{"b": 1, "a": {"c": [true]}}"#).unwrap();

    let tree = load_document_file(&path).unwrap();
    assert_eq!(
        render(tree.root(), OutputFormat::Json).unwrap(),
        "{\n  \"b\": 1,\n  \"a\": {\n    \"c\": [\n      true\n    ]\n  }\n}\n"
    );
}

#[test]
fn test_load_yaml_merge_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.yaml");
    fs::write(&path, "base: &b\n  x: 1\nother:\n  <<: *b\n  y: 2\n").unwrap();

    let mut tree = load_document_file(&path).unwrap();
    let matches = Transform::Remove
        .apply_at(tree.root_mut(), "/other/x")
        .unwrap();
    assert_eq!(matches, 1);
    assert_eq!(
        render(tree.root(), OutputFormat::Yaml).unwrap(),
        "base:\n  x: 1\nother:\n  y: 2\n"
    );
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_document_file(dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_load_reference_missing_pointer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.yaml");
    fs::write(&path, "definitions: {}\n").unwrap();

    let reference = format!("{}#/definitions/user", path.display());
    let err = format!("{:#}", load_reference(&reference).unwrap_err());
    assert!(err.contains("/definitions/user"));
}

#[test]
fn test_transform_and_save_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schema.yaml");
    let output = dir.path().join("out.yaml");
    fs::write(&input, "title: Pet\nexamples: [1]\nproperties:\n  a: {examples: [2]}\n").unwrap();

    let mut tree = load_document_file(&input).unwrap();
    Transform::Remove
        .apply_at(tree.root_mut(), "/**/examples")
        .unwrap();
    assert!(tree.root().is_modified());
    save_document(&output, tree.root(), OutputFormat::Yaml).unwrap();

    let saved = fs::read_to_string(&output).unwrap();
    assert_eq!(saved, "title: Pet\nproperties:\n  a: {}\n");
    assert!(!dir.path().join("out.tmp").exists());
}
