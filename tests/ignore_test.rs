use bogie::error::Error;
use bogie::ignore::{Rules, HELPERS_FILE, IGNORE_FILE};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_init_ignores_control_files() {
    let rules = Rules::init();
    assert!(rules.ignore(IGNORE_FILE, false));
    assert!(rules.ignore(HELPERS_FILE, false));
    assert!(!rules.ignore("deployment.yaml", false));
}

#[test]
fn test_last_matching_rule_wins() {
    let mut rules = Rules::new();
    rules.add("*.txt").unwrap();
    assert!(rules.ignore("notes.txt", false));

    rules.add("!notes.txt").unwrap();
    assert!(!rules.ignore("notes.txt", false));
    assert!(rules.ignore("other.txt", false));

    rules.add("notes.*").unwrap();
    assert!(rules.ignore("notes.txt", false));
}

#[test]
fn test_directory_only_rules() {
    let mut rules = Rules::new();
    rules.add("build/").unwrap();

    assert!(rules.ignore("build", true));
    assert!(!rules.ignore("build", false));
}

#[test]
fn test_patterns_match_base_name_only() {
    let mut rules = Rules::new();
    rules.add("*.bak").unwrap();

    assert!(rules.ignore("config.bak", false));
    assert!(!rules.ignore("config.bak.yaml", false));
}

#[test]
fn test_clone_is_independent() {
    let mut parent = Rules::new();
    parent.add("*.txt").unwrap();
    let names = ["a.txt", "keep.txt", "b.yaml"];
    let before: Vec<bool> = names.iter().map(|n| parent.ignore(n, false)).collect();

    let mut child = parent.clone();
    child.add("!keep.txt").unwrap();
    child.add("*.yaml").unwrap();

    let after: Vec<bool> = names.iter().map(|n| parent.ignore(n, false)).collect();
    assert_eq!(before, after);
    assert_eq!(parent.len(), 1);
    assert!(!child.ignore("keep.txt", false));
    assert!(child.ignore("b.yaml", false));
}

#[test]
fn test_parse_file() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);

    // Missing file leaves the set unchanged
    let mut rules = Rules::new();
    rules.parse_file(&ignore_path).unwrap();
    assert!(rules.is_empty());

    fs::write(&ignore_path, "# scratch files\n*.swp\n\n!important.swp\n").unwrap();
    rules.parse_file(&ignore_path).unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules.ignore("a.swp", false));
    assert!(!rules.ignore("important.swp", false));
}

#[test]
fn test_parse_file_invalid_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    fs::write(&ignore_path, "a[\n").unwrap();

    match Rules::new().parse_file(&ignore_path) {
        Err(Error::IgnoreError(msg)) => assert!(msg.contains(IGNORE_FILE)),
        other => panic!("Expected IgnoreError, got {other:?}"),
    }
}
