//! Minimal Substitution Map Tests
//!
//! Shortest-name generation, blacklists and seeding.

use css_renamer::{
    create_skip_predicate, Exception, Initializable, MinimalSubstitutionMap, RenameError,
    RenamingMap, ShortNameGenerator, SubstitutionMap,
};

fn seed(entries: &[(&str, &str)]) -> RenamingMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn should_issue_names_in_order() {
    let mut map = MinimalSubstitutionMap::new();
    assert_eq!(map.get("container").unwrap(), "a");
    assert_eq!(map.get("full-height").unwrap(), "b");
    assert_eq!(map.get("image").unwrap(), "c");
}

#[test]
fn should_memoize_lookups() {
    let mut map = MinimalSubstitutionMap::new();
    assert_eq!(map.get("x").unwrap(), "a");
    assert_eq!(map.get("x").unwrap(), "a");
    assert_eq!(map.next_index(), 1);
    assert_eq!(map.get("y").unwrap(), "b");
}

#[test]
fn should_never_return_a_blacklisted_name() {
    let mut map = MinimalSubstitutionMap::new().with_blacklist(["b"]);
    assert_eq!(map.get("one").unwrap(), "a");
    assert_eq!(map.get("two").unwrap(), "c");
    assert_eq!(map.next_index(), 3);
}

#[test]
fn should_never_return_an_excluded_name() {
    let skip = create_skip_predicate(vec![Exception::pattern("^a|b$").unwrap()]);
    let mut map = MinimalSubstitutionMap::new().with_excluded(skip);
    assert_eq!(map.get("container").unwrap(), "c");
    assert_eq!(map.get("full").unwrap(), "d");
}

#[test]
fn should_seed_memo_and_blacklist() {
    let mut map = MinimalSubstitutionMap::new();
    map.initialize_with_mappings(&seed(&[("container", "b"), ("image", "a")]))
        .unwrap();
    assert_eq!(map.get("image").unwrap(), "a");
    assert_eq!(map.get("container").unwrap(), "b");
    // Seeded values are never issued again.
    assert_eq!(map.get("full").unwrap(), "c");
}

#[test]
fn should_reject_seeding_after_use() {
    let mut map = MinimalSubstitutionMap::new();
    map.get("container").unwrap();
    let result = map.initialize_with_mappings(&seed(&[("image", "b")]));
    assert!(matches!(result, Err(RenameError::InvalidState(_))));
}

#[test]
fn should_be_seedable_through_the_capability_accessor() {
    let mut map = MinimalSubstitutionMap::new();
    assert!(map.as_initializable().is_some());
    assert!(map.as_multiple_mapping().is_none());
}

#[test]
fn should_use_a_custom_generator() {
    let generator = ShortNameGenerator::new("xy", "z").unwrap();
    let mut map = MinimalSubstitutionMap::new().with_generator(generator);
    let names: Vec<String> = ["p", "q", "r", "s"]
        .iter()
        .map(|key| map.get(key).unwrap())
        .collect();
    assert_eq!(names, vec!["x", "y", "xz", "yz"]);
}
