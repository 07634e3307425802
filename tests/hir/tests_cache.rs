//! Lookup cache tests.
//!
//! These tests verify that cached contributions give the same answers as
//! fresh ones, follow edits, and can be shared between threads.

use rayon::prelude::*;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;
use protoscope::hir::{
    ComplexTypeFilter, ComplexTypePolicy, DocumentStore, EntrySet, Finder, LookupCache,
    PathImportResolver,
};
use protoscope::project::{ImportPaths, ProtoDescriptor, ResolverConfig};

fn reexport_chain() -> protoscope::AnalysisHost {
    analysis_from_sources(&[
        ("c.proto", REEXPORT_CONSUMER),
        ("a.proto", PUBLIC_REEXPORTER),
        ("b.proto", REEXPORTED),
    ])
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn test_repeated_queries_are_equal() {
    let host = reexport_chain();
    let first = all_types_in(&host, "c.proto");
    let second = all_types_in(&host, "c.proto");
    assert_eq!(first, second);
}

#[test]
fn test_miss_then_hit_are_equal() {
    let host = analysis_from_sources(&[
        ("a.proto", UNRELATED_IMPORTER),
        ("b.proto", UNRELATED_IMPORTED),
    ]);
    host.cache().clear();
    let miss = all_types_in(&host, "a.proto");
    assert!(!host.cache().is_empty());
    let hit = all_types_in(&host, "a.proto");
    assert_eq!(miss, hit);
}

#[test]
fn test_import_order_does_not_change_the_result() {
    let forward = analysis_from_sources(&[
        ("a.proto", "package p; import \"b.proto\"; import \"c.proto\";"),
        ("b.proto", "package p; message B {}"),
        ("c.proto", "package q; message C {}"),
    ]);
    let backward = analysis_from_sources(&[
        ("a.proto", "package p; import \"c.proto\"; import \"b.proto\";"),
        ("b.proto", "package p; message B {}"),
        ("c.proto", "package q; message C {}"),
    ]);
    assert_eq!(
        sorted_names(&all_types_in(&forward, "a.proto")),
        sorted_names(&all_types_in(&backward, "a.proto"))
    );
}

#[test]
fn test_reference_sites_share_cached_contributions() {
    let host = analysis_from_sources(&[
        ("a.proto", "package x; import \"b.proto\"; message A { optional int32 f = 1; }"),
        ("b.proto", "package y; message Foo {}"),
    ]);
    let from_root = all_types_in(&host, "a.proto");
    let cached = host.cache().len();
    let from_field = types_visible_at(&host, "a.proto", "A.f");

    assert_eq!(host.cache().len(), cached);
    assert_has_name(&from_root, "y.Foo");
    assert_has_name(&from_field, "y.Foo");
}

#[test]
fn test_criteria_are_cached_separately() {
    let host = analysis_from_sources(&[
        ("a.proto", "package p; import \"b.proto\";"),
        ("b.proto", "package p; message M {} enum E { X = 0; }"),
    ]);
    let analysis = host.analysis();
    let messages = analysis.resolve_all_in("a.proto", &ComplexTypePolicy, ComplexTypeFilter::Message);
    let enums = analysis.resolve_all_in("a.proto", &ComplexTypePolicy, ComplexTypeFilter::Enum);

    assert_has_name(&messages, "M");
    assert_lacks_name(&messages, "E");
    assert_has_name(&enums, "E");
    assert_lacks_name(&enums, "M");
    assert_eq!(host.cache().len(), 2);
}

// =============================================================================
// INVALIDATION
// =============================================================================

#[test]
fn test_edit_of_imported_document_is_seen() {
    let mut host = analysis_from_sources(&[
        ("a.proto", UNRELATED_IMPORTER),
        ("b.proto", UNRELATED_IMPORTED),
    ]);
    assert_has_name(&all_types_in(&host, "a.proto"), "y.Foo");

    host.set_file_content("b.proto", "syntax = \"proto3\"; package y; message Bar {}");
    let entries = all_types_in(&host, "a.proto");
    assert_has_name(&entries, "y.Bar");
    assert_lacks_name(&entries, "y.Foo");
}

#[test]
fn test_edit_of_reexported_document_is_seen() {
    let mut host = reexport_chain();
    assert_has_name(&all_types_in(&host, "c.proto"), "FromB");

    host.set_file_content("b.proto", "package p; message Renamed {}");
    let entries = all_types_in(&host, "c.proto");
    assert_has_name(&entries, "Renamed");
    assert_lacks_name(&entries, "FromB");
    assert_has_name(&entries, "FromA");
}

#[test]
fn test_removed_import_stops_contributing() {
    let mut host = reexport_chain();
    assert_has_name(&all_types_in(&host, "c.proto"), "FromB");

    assert!(host.remove_file("b.proto"));
    let entries = all_types_in(&host, "c.proto");
    assert_lacks_name(&entries, "FromB");
    assert_has_name(&entries, "FromA");
}

#[test]
fn test_late_loaded_reexport_is_picked_up() {
    let mut host = analysis_from_sources(&[
        ("c.proto", REEXPORT_CONSUMER),
        ("a.proto", PUBLIC_REEXPORTER),
    ]);
    assert_lacks_name(&all_types_in(&host, "c.proto"), "FromB");

    host.set_file_content("b.proto", REEXPORTED);
    assert_has_name(&all_types_in(&host, "c.proto"), "FromB");
}

#[test]
fn test_reexported_document_turning_unparsable_is_seen() {
    let mut host = reexport_chain();
    assert_has_name(&all_types_in(&host, "c.proto"), "FromB");

    host.set_file_content("b.proto", "message {");
    let entries = all_types_in(&host, "c.proto");
    assert_lacks_name(&entries, "FromB");
    assert_has_name(&entries, "FromA");
}

fn search_path_host(files: &[(&str, &str)]) -> protoscope::AnalysisHost {
    let config = ResolverConfig::default().with_import_paths(ImportPaths::MultipleDirectories(vec![
        "first".into(),
        "second".into(),
    ]));
    analysis_with_config(config, files)
}

const SEARCH_PATH_MAIN: &str = "package p; import \"reexport.proto\";";
const SEARCH_PATH_REEXPORT: &str = "package p; import public \"dep.proto\"; message R {}";

#[test]
fn test_late_loaded_file_in_search_directory_is_picked_up() {
    let mut host = search_path_host(&[
        ("first/main.proto", SEARCH_PATH_MAIN),
        ("first/reexport.proto", SEARCH_PATH_REEXPORT),
    ]);
    assert_lacks_name(&all_types_in(&host, "first/main.proto"), "Dep");

    host.set_file_content("second/dep.proto", "package p; message Dep {}");
    let warm = all_types_in(&host, "first/main.proto");
    assert_has_name(&warm, "Dep");

    let fresh = search_path_host(&[
        ("first/main.proto", SEARCH_PATH_MAIN),
        ("first/reexport.proto", SEARCH_PATH_REEXPORT),
        ("second/dep.proto", "package p; message Dep {}"),
    ]);
    assert_eq!(sorted_names(&warm), sorted_names(&all_types_in(&fresh, "first/main.proto")));
}

#[test]
fn test_earlier_search_directory_shadows_once_loaded() {
    let mut host = search_path_host(&[
        ("first/main.proto", SEARCH_PATH_MAIN),
        ("first/reexport.proto", SEARCH_PATH_REEXPORT),
        ("second/dep.proto", "package p; message Second {}"),
    ]);
    assert_has_name(&all_types_in(&host, "first/main.proto"), "Second");

    host.set_file_content("first/dep.proto", "package p; message First {}");
    let entries = all_types_in(&host, "first/main.proto");
    assert_has_name(&entries, "First");
    assert_lacks_name(&entries, "Second");
}

#[test]
fn test_unchanged_content_keeps_generation() {
    let mut host = reexport_chain();
    let before = host.generation("b.proto");
    host.set_file_content("b.proto", REEXPORTED);
    assert_eq!(host.generation("b.proto"), before);
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_concurrent_queries_share_one_cache() {
    let store = StaticStore::from_sources(&[
        ("c.proto", REEXPORT_CONSUMER),
        ("a.proto", PUBLIC_REEXPORTER),
        ("b.proto", REEXPORTED),
    ]);
    let resolver = PathImportResolver::default();
    let descriptor = ProtoDescriptor::shared();
    let cache = LookupCache::new();

    let query = |uri: &str| -> EntrySet {
        let finder = Finder::new(&store, &resolver, descriptor.as_ref(), &cache);
        let doc = store
            .document(uri)
            .unwrap_or_else(|| panic!("'{}' missing", uri));
        finder.find_from_document_root(&doc, &ComplexTypePolicy, ComplexTypeFilter::Any)
    };

    let expected = query("c.proto");
    cache.clear();

    let results: Vec<EntrySet> = (0..64)
        .into_par_iter()
        .map(|i| if i % 2 == 0 { query("c.proto") } else { query("a.proto") })
        .collect();

    let expected_a = query("a.proto");
    for (i, result) in results.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(result, &expected);
        } else {
            assert_eq!(result, &expected_a);
        }
    }
    assert_has_name(&expected, "FromB");
}
