use cfg_fs::{ConfigDocument, Mapping, Value, read_yaml};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"
project:
  name: widgets
  owner: acme
  settings:
    debug: false
    level: null
paths:
  - src
  - tests
version: 3
"#;

fn sample() -> ConfigDocument {
    ConfigDocument::parse(SAMPLE, "sample.yaml").unwrap()
}

#[rstest]
#[case("project", true)]
#[case("project.name", true)]
#[case("project.settings.debug", true)]
#[case("project.settings.level", true)]
#[case("project.missing", false)]
#[case("version.major", false)]
#[case("paths.0", false)]
#[case("", false)]
fn test_exists_key(#[case] key: &str, #[case] expected: bool) {
    assert_eq!(sample().exists_key(key), expected);
}

#[test]
fn test_get_returns_nested_values() {
    let document = sample();
    assert_eq!(document.get("project.name"), Some(&Value::from("widgets")));
    assert_eq!(document.get("version"), Some(&Value::from(3)));
    assert_eq!(document.get("project.settings.level"), Some(&Value::Null));
    assert_eq!(document.get("nope"), None);
}

#[test]
fn test_get_or_uses_default_only_when_unreachable() {
    let document = sample();
    let default = Value::from("default");
    assert_eq!(document.get_or("project.owner", &default), &Value::from("acme"));
    assert_eq!(document.get_or("project.name.first", &default), &default);
    // present-but-null is not replaced by the default
    assert_eq!(document.get_or("project.settings.level", &default), &Value::Null);
}

#[test]
fn test_get_as_typed() {
    let document = sample();
    let paths: Vec<String> = document.get_as("paths").unwrap();
    assert_eq!(paths, vec!["src", "tests"]);
    assert_eq!(document.get_as::<bool>("project.settings.debug"), Some(false));
    assert_eq!(document.get_as::<u32>("project.name"), None);
}

#[test]
fn test_set_creates_intermediate_mappings() {
    let mut document = ConfigDocument::default();
    document.set("a.b.c", "deep");
    document.set("top", true);

    assert_eq!(document.get("a.b.c"), Some(&Value::from("deep")));
    assert!(document.get("a.b").unwrap().is_mapping());
    assert_eq!(document.get("top"), Some(&Value::from(true)));
}

#[test]
fn test_set_overwrites_scalar_intermediate() {
    let mut document = sample();
    document.set("version.major", 4);

    assert_eq!(document.get("version.major"), Some(&Value::from(4)));
    assert!(document.get("version").unwrap().is_mapping());
}

#[test]
fn test_set_overwrites_sequence_intermediate() {
    let mut document = sample();
    document.set("paths.first", "src");

    let mut expected = Mapping::new();
    expected.insert("first".into(), "src".into());
    assert_eq!(document.get("paths"), Some(&Value::Mapping(expected)));
}

#[test]
fn test_has_required_keys_ignores_nullity() {
    let document = sample();
    assert!(document.has_required_keys(&["project.name", "project.settings.level"]));
    assert!(!document.has_required_keys(&["project.name", "project.license"]));
    assert!(document.has_required_keys::<&str>(&[]));
}

#[rstest]
#[case("a:\n  b: null\n", false)]
#[case("a:\n  b: 0\n", true)]
#[case("a:\n  b: ''\n", true)]
#[case("a: {}\n", false)]
fn test_validate_structure_requires_non_null(#[case] yaml: &str, #[case] expected: bool) {
    let document = ConfigDocument::parse(yaml, "v.yaml").unwrap();
    assert_eq!(document.validate_structure(&["a.b"]), expected);
}

#[test]
fn test_missing_keys_lists_absent_only() {
    let document = sample();
    let missing = document.missing_keys(&["project.name", "project.license", "owner"]);
    assert_eq!(missing, vec!["project.license", "owner"]);
}

#[test]
fn test_merge_is_right_biased_at_leaves() {
    let base = sample();
    let overrides = ConfigDocument::parse(
        "project:\n  name: gadgets\n  settings:\n    debug: true\nversion:\n  major: 4\n",
        "override.yaml",
    )
    .unwrap();

    let merged = base.merge(overrides.data());

    assert_eq!(merged.get("project.name"), Some(&Value::from("gadgets")));
    assert_eq!(merged.get("project.owner"), Some(&Value::from("acme")));
    assert_eq!(merged.get("project.settings.debug"), Some(&Value::from(true)));
    assert!(merged.exists_key("project.settings.level"));
    // scalar replaced wholesale by a mapping
    assert_eq!(merged.get("version.major"), Some(&Value::from(4)));
    assert_eq!(merged.origin(), Some("sample.yaml"));
}

#[test]
fn test_merge_does_not_concatenate_sequences() {
    let base = sample();
    let overrides = ConfigDocument::parse("paths:\n  - docs\n", "o.yaml").unwrap();

    let merged = base.merge(overrides.data());
    assert_eq!(merged.get_as::<Vec<String>>("paths").unwrap(), vec!["docs"]);
    assert_eq!(base.get_as::<Vec<String>>("paths").unwrap(), vec!["src", "tests"]);
}

#[test]
fn test_load_save_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("init.yaml");
    fs::write(&source, SAMPLE).unwrap();

    let first = read_yaml(&source).unwrap();
    let copy = temp.path().join("nested").join("copy.yaml");
    assert!(first.save(Some(copy.as_path())));

    let second = read_yaml(&copy).unwrap();
    assert_eq!(first.data(), second.data());
}

#[test]
fn test_save_defaults_to_origin() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("init.yaml");
    fs::write(&path, "name: before\n").unwrap();

    let mut document = read_yaml(&path).unwrap();
    document.set("name", "after");
    assert!(document.save(None));

    let reloaded = read_yaml(&path).unwrap();
    assert_eq!(reloaded.get("name"), Some(&Value::from("after")));
}

#[test]
fn test_save_preserves_key_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ordered.yaml");

    let mut document = ConfigDocument::default();
    document.set("zeta", 1);
    document.set("alpha", 2);
    assert!(document.save(Some(path.as_path())));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.find("zeta").unwrap() < content.find("alpha").unwrap());
}
