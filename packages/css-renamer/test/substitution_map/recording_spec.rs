//! Recording Substitution Map Tests
//!
//! Recorded table order, skip predicates and seeding.

use css_renamer::{
    Initializable, MinimalSubstitutionMap, PrefixingSubstitutionMap, RecordingSubstitutionMap,
    RenameError, RenamingMap, SimpleSubstitutionMap, SplittingSubstitutionMap, SubstitutionMap,
};

fn entries(map: &RenamingMap) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[test]
fn should_default_to_identity() {
    let mut map = RecordingSubstitutionMap::builder().build().unwrap();
    assert_eq!(map.get("container").unwrap(), "container");
    assert_eq!(entries(map.mappings()), vec![("container", "container")]);
}

#[test]
fn should_record_in_first_encounter_order() {
    let mut map = RecordingSubstitutionMap::builder()
        .with_substitution_map(Box::new(MinimalSubstitutionMap::new()))
        .build()
        .unwrap();
    for key in ["container", "full-height", "container", "image"] {
        map.get(key).unwrap();
    }
    assert_eq!(
        entries(map.mappings()),
        vec![("container", "a"), ("full-height", "b"), ("image", "c")]
    );
}

#[test]
fn should_pass_unrecorded_keys_through() {
    let mut map = RecordingSubstitutionMap::builder()
        .with_substitution_map(Box::new(SimpleSubstitutionMap::new()))
        .should_record_mapping_for_code_generation(|key| key != "keep")
        .build()
        .unwrap();
    assert_eq!(map.get("keep").unwrap(), "keep");
    assert_eq!(map.get("drop").unwrap(), "drop_");
    assert_eq!(entries(map.mappings()), vec![("drop", "drop_")]);
}

#[test]
fn should_and_multiple_predicates() {
    let mut map = RecordingSubstitutionMap::builder()
        .with_substitution_map(Box::new(SimpleSubstitutionMap::new()))
        .should_record_mapping_for_code_generation(|key| !key.starts_with('a'))
        .should_record_mapping_for_code_generation(|key| !key.ends_with('b'))
        .build()
        .unwrap();
    assert_eq!(map.get("ax").unwrap(), "ax");
    assert_eq!(map.get("xb").unwrap(), "xb");
    assert_eq!(map.get("xy").unwrap(), "xy_");
}

#[test]
fn should_merge_part_mappings_from_multi_mapping_delegates() {
    let splitting = SplittingSubstitutionMap::new(Box::new(MinimalSubstitutionMap::new()));
    let mut map = RecordingSubstitutionMap::builder()
        .with_substitution_map(Box::new(PrefixingSubstitutionMap::new(
            Box::new(splitting),
            "pf-",
        )))
        .build()
        .unwrap();
    assert_eq!(map.get("container").unwrap(), "pf-a");
    assert_eq!(map.get("full-height").unwrap(), "pf-b-c");
    assert_eq!(map.get("full-width").unwrap(), "pf-b-d");
    assert_eq!(
        entries(map.mappings()),
        vec![("container", "a"), ("full", "b"), ("height", "c"), ("width", "d")]
    );
}

#[test]
fn should_seed_table_and_delegate() {
    let mut map = RecordingSubstitutionMap::builder()
        .with_substitution_map(Box::new(MinimalSubstitutionMap::new()))
        .with_mappings([("image", "a")])
        .build()
        .unwrap();
    assert_eq!(map.get("container").unwrap(), "b");
    assert_eq!(map.get("image").unwrap(), "a");
    assert_eq!(
        entries(&map.into_mappings()),
        vec![("image", "a"), ("container", "b")]
    );
}

#[test]
fn should_reject_seeding_after_use() {
    let mut map = RecordingSubstitutionMap::builder().build().unwrap();
    map.get("container").unwrap();
    let seed: RenamingMap = [("image".to_string(), "a".to_string())].into_iter().collect();
    assert!(matches!(
        map.initialize_with_mappings(&seed),
        Err(RenameError::InvalidState(_))
    ));
}

#[test]
fn should_skip_seeding_a_stateless_delegate() {
    let mut map = RecordingSubstitutionMap::builder()
        .with_substitution_map(Box::new(SimpleSubstitutionMap::new()))
        .with_mappings([("image", "i")])
        .build()
        .unwrap();
    assert_eq!(map.get("image").unwrap(), "i");
    assert_eq!(map.get("menu").unwrap(), "menu_");
}
