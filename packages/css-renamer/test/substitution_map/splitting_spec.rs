//! Splitting Substitution Map Tests
//!
//! Part-wise renaming of hyphenated names and the part mappings reported.

use css_renamer::{
    create_skip_predicate, FunctionSubstitutionMap, Initializable, MinimalSubstitutionMap,
    MultipleMappingSubstitutionMap, RenameError, RenamingMap, SimpleSubstitutionMap,
    SplittingSubstitutionMap, SubstitutionMap,
};

fn entries(map: &RenamingMap) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

fn minimal_splitter() -> SplittingSubstitutionMap {
    SplittingSubstitutionMap::new(Box::new(MinimalSubstitutionMap::new()))
}

#[test]
fn should_rename_each_part() {
    let mut map = SplittingSubstitutionMap::new(Box::new(SimpleSubstitutionMap::new()));
    assert_eq!(map.get("goog-component").unwrap(), "goog_-component_");
}

#[test]
fn should_report_exactly_the_part_mappings() {
    let mut map = minimal_splitter();
    let result = map.get_value_with_mappings("a-b-c").unwrap();
    assert_eq!(result.value, "a-b-c");
    assert_eq!(entries(&result.mappings), vec![("a", "a"), ("b", "b"), ("c", "c")]);

    let result = map.get_value_with_mappings("full-height").unwrap();
    assert_eq!(result.value, "d-e");
    assert_eq!(entries(&result.mappings), vec![("full", "d"), ("height", "e")]);
}

#[test]
fn should_reuse_parts_across_keys() {
    let mut map = minimal_splitter();
    assert_eq!(map.get("full-height").unwrap(), "a-b");
    assert_eq!(map.get("full-width").unwrap(), "a-c");
}

#[test]
fn should_report_a_single_mapping_without_hyphens() {
    let mut map = minimal_splitter();
    let result = map.get_value_with_mappings("container").unwrap();
    assert_eq!(result.value, "a");
    assert_eq!(entries(&result.mappings), vec![("container", "a")]);
}

#[test]
fn should_reject_an_empty_key() {
    let mut map = minimal_splitter();
    assert!(matches!(
        map.get_value_with_mappings(""),
        Err(RenameError::InvalidArgument(_))
    ));
}

#[test]
fn should_map_a_repeated_part_once() {
    let mut map = minimal_splitter();
    let result = map.get_value_with_mappings("x-y-x").unwrap();
    assert_eq!(result.value, "a-b-a");
    assert_eq!(entries(&result.mappings), vec![("x", "a"), ("y", "b")]);
}

#[test]
fn should_keep_empty_parts_verbatim() {
    let mut map = minimal_splitter();
    let result = map.get_value_with_mappings("-a--b-").unwrap();
    assert_eq!(result.value, "-a--b-");
    assert_eq!(entries(&result.mappings), vec![("a", "a"), ("b", "b")]);
}

#[test]
fn should_flag_an_inconsistent_delegate() {
    let mut counter = 0;
    let flaky = FunctionSubstitutionMap::new(Box::new(move |_: &str| {
        counter += 1;
        counter.to_string()
    }));
    let mut map = SplittingSubstitutionMap::new(Box::new(flaky));
    match map.get_value_with_mappings("x-x") {
        Err(RenameError::Inconsistent {
            key,
            existing,
            conflicting,
        }) => {
            assert_eq!(key, "x");
            assert_eq!(existing, "1");
            assert_eq!(conflicting, "2");
        }
        other => panic!("expected an inconsistency, got {:?}", other),
    }
}

#[test]
fn should_pass_excluded_parts_through() {
    let mut map = SplittingSubstitutionMap::new(Box::new(SimpleSubstitutionMap::new()))
        .with_excluded_parts(create_skip_predicate(["full"]));
    let result = map.get_value_with_mappings("full-height").unwrap();
    assert_eq!(result.value, "full-height_");
    assert_eq!(entries(&result.mappings), vec![("height", "height_")]);

    let result = map.get_value_with_mappings("full").unwrap();
    assert_eq!(result.value, "full");
    assert!(result.mappings.is_empty());
}

#[test]
fn should_forward_seeding_to_the_delegate() {
    let mut map = minimal_splitter();
    let seed: RenamingMap = [("full", "x"), ("height", "a")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    map.initialize_with_mappings(&seed).unwrap();
    assert_eq!(map.get("full-height").unwrap(), "x-a");
    assert_eq!(map.get("width").unwrap(), "b");
}
