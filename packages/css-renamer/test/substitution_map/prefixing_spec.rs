//! Prefixing Substitution Map Tests

use css_renamer::{
    Initializable, MinimalSubstitutionMap, MultipleMappingSubstitutionMap,
    PrefixingSubstitutionMap, RenamingMap, SimpleSubstitutionMap, SplittingSubstitutionMap,
    SubstitutionMap,
};

fn entries(map: &RenamingMap) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[test]
fn should_prefix_the_delegate_value() {
    let mut map = PrefixingSubstitutionMap::new(Box::new(SimpleSubstitutionMap::new()), "x-");
    assert_eq!(map.prefix(), "x-");
    assert_eq!(map.get("menu").unwrap(), "x-menu_");
    assert_eq!(map.get("menu-bar").unwrap(), "x-menu-bar_");
}

#[test]
fn should_leave_part_mappings_unprefixed() {
    let splitting = SplittingSubstitutionMap::new(Box::new(MinimalSubstitutionMap::new()));
    let mut map = PrefixingSubstitutionMap::new(Box::new(splitting), "pf-");
    let result = map.get_value_with_mappings("full-height").unwrap();
    assert_eq!(result.value, "pf-a-b");
    assert_eq!(entries(&result.mappings), vec![("full", "a"), ("height", "b")]);
}

#[test]
fn should_synthesize_a_single_mapping_for_simple_delegates() {
    let mut map = PrefixingSubstitutionMap::new(Box::new(MinimalSubstitutionMap::new()), "pf-");
    let result = map.get_value_with_mappings("full-height").unwrap();
    assert_eq!(result.value, "pf-a");
    assert_eq!(entries(&result.mappings), vec![("full-height", "pf-a")]);
}

#[test]
fn should_forward_part_seeds_unmodified() {
    let splitting = SplittingSubstitutionMap::new(Box::new(MinimalSubstitutionMap::new()));
    let mut map = PrefixingSubstitutionMap::new(Box::new(splitting), "pf-");
    let seed: RenamingMap = [("full".to_string(), "c".to_string())].into_iter().collect();
    map.initialize_with_mappings(&seed).unwrap();
    assert_eq!(map.get("full-height").unwrap(), "pf-c-a");
}

#[test]
fn should_strip_the_prefix_from_whole_name_seeds() {
    let mut map = PrefixingSubstitutionMap::new(Box::new(MinimalSubstitutionMap::new()), "pf-");
    let seed: RenamingMap = [("container".to_string(), "pf-a".to_string())]
        .into_iter()
        .collect();
    map.initialize_with_mappings(&seed).unwrap();
    assert_eq!(map.get("container").unwrap(), "pf-a");
    assert_eq!(map.get("image").unwrap(), "pf-b");
}
