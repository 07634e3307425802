//! Resolver configuration tests.

use std::collections::HashMap;

use protoscope::base::constants::{
    DESCRIPTOR_PATH_PREFERENCE, DIRECTORY_PATHS_PREFERENCE,
    FILES_IN_MULTIPLE_DIRECTORIES_PREFERENCE,
};
use protoscope::project::{ImportPaths, ResolverConfig};
use rstest::rstest;

fn from_map(values: &[(&str, &str)]) -> ResolverConfig {
    let map: HashMap<String, String> = values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ResolverConfig::from_preferences(|key| map.get(key).cloned())
}

#[test]
fn test_empty_preferences_give_defaults() {
    assert_eq!(from_map(&[]), ResolverConfig::default());
}

#[test]
fn test_preferences_select_multiple_directories() {
    let config = from_map(&[
        (FILES_IN_MULTIPLE_DIRECTORIES_PREFERENCE, "true"),
        (DIRECTORY_PATHS_PREFERENCE, "protos, ./third_party/ ,,"),
        (DESCRIPTOR_PATH_PREFERENCE, "vendor/google/protobuf/descriptor.proto"),
    ]);

    assert_eq!(
        config.import_paths,
        ImportPaths::MultipleDirectories(vec!["protos".into(), "third_party".into()])
    );
    assert!(config.is_descriptor_path("vendor/google/protobuf/descriptor.proto"));
    assert!(!config.is_descriptor_path("google/protobuf/descriptor.proto"));
}

#[rstest]
#[case("false")]
#[case("")]
#[case("yes")]
fn test_directories_ignored_unless_enabled(#[case] flag: &str) {
    let config = from_map(&[
        (FILES_IN_MULTIPLE_DIRECTORIES_PREFERENCE, flag),
        (DIRECTORY_PATHS_PREFERENCE, "protos"),
    ]);
    assert_eq!(config.import_paths, ImportPaths::OneDirectoryOnly);
}

#[test]
fn test_blank_descriptor_preference_keeps_default() {
    let config = from_map(&[(DESCRIPTOR_PATH_PREFERENCE, "  ")]);
    assert!(config.is_descriptor_path("google/protobuf/descriptor.proto"));
}
