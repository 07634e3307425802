//! Scope walking tests for the HIR layer.
//!
//! These tests verify which names a document's own declarations are
//! visible under, from the document root and from reference sites.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;
use protoscope::hir::{ComplexTypeFilter, ComplexTypePolicy};
use rstest::rstest;

// =============================================================================
// DOCUMENT ROOT
// =============================================================================

#[test]
fn test_nested_message_scenario_from_document_root() {
    let host = analysis_from_sources(&[("root.proto", NESTED_ROOT)]);
    let entries = all_types_in(&host, "root.proto");

    assert_eq!(
        sorted_names(&entries),
        vec![".p.M", ".p.M.N", "M", "M.N", "p.M", "p.M.N"]
    );
    assert_name_targets(&entries, "M", def_id(&host, "root.proto", "M"));
    assert_name_targets(&entries, "M.N", def_id(&host, "root.proto", "M.N"));
}

#[test]
fn test_nested_name_is_not_bare_at_document_root() {
    let host = analysis_from_sources(&[("root.proto", NESTED_ROOT)]);
    let entries = all_types_in(&host, "root.proto");
    assert_lacks_name(&entries, "N");
}

#[test]
fn test_document_without_package() {
    let host = analysis_from_sources(&[("plain.proto", "message A { enum E { X = 0; } }")]);
    assert_eq!(
        sorted_names(&all_types_in(&host, "plain.proto")),
        vec![".A", ".A.E", "A", "A.E"]
    );
}

// =============================================================================
// REFERENCE SITES
// =============================================================================

#[test]
fn test_bare_nested_name_is_visible_inside_enclosing_message() {
    let host = analysis_from_sources(&[("root.proto", NESTED_ROOT)]);
    let entries = types_visible_at(&host, "root.proto", "M.n");

    assert_name_targets(&entries, "N", def_id(&host, "root.proto", "M.N"));
    assert_has_name(&entries, "M");
    assert_has_name(&entries, "p.M.N");
}

#[test]
fn test_nested_types_of_other_messages_need_their_container() {
    let source = r#"
        package p;
        message M { optional Other.Hidden h = 1; }
        message Other { message Hidden {} }
    "#;
    let host = analysis_from_sources(&[("a.proto", source)]);
    let entries = types_visible_at(&host, "a.proto", "M.h");

    assert_has_name(&entries, "Other.Hidden");
    assert_lacks_name(&entries, "Hidden");
}

#[test]
fn test_deeply_nested_site_sees_every_enclosing_level() {
    let source = r#"
        package p;
        message A {
          message B {
            message C {
              optional int32 leaf = 1;
            }
            enum InB { X = 0; }
          }
          enum InA { Y = 0; }
        }
    "#;
    let host = analysis_from_sources(&[("a.proto", source)]);
    let entries = types_visible_at(&host, "a.proto", "A.B.C.leaf");

    assert_has_name(&entries, "InB"); // declared in B
    assert_has_name(&entries, "InA"); // declared in A
    assert_has_name(&entries, "C");
    assert_has_name(&entries, "B.InB");
    assert_lacks_name(&entries, "leaf");
}

#[test]
fn test_oneof_member_sees_enclosing_message_scope() {
    let source = r#"
        message M {
          oneof choice {
            N n = 1;
          }
          message N {}
        }
    "#;
    let host = analysis_from_sources(&[("a.proto", source)]);
    let entries = types_visible_at(&host, "a.proto", "M.n");
    assert_name_targets(&entries, "N", def_id(&host, "a.proto", "M.N"));
}

#[test]
fn test_groups_open_a_scope() {
    let source = r#"
        message M {
          optional group G = 1 {
            message Inside {}
            optional Inside i = 2;
          }
        }
    "#;
    let host = analysis_from_sources(&[("a.proto", source)]);
    let entries = types_visible_at(&host, "a.proto", "M.G.i");

    assert_name_targets(&entries, "Inside", def_id(&host, "a.proto", "M.G.Inside"));
    assert_has_name(&entries, "G");
    assert_has_name(&entries, "M.G.Inside");
}

// =============================================================================
// CRITERIA
// =============================================================================

#[rstest]
#[case(ComplexTypeFilter::Any, &["E", "G", "M"])]
#[case(ComplexTypeFilter::Message, &["M"])]
#[case(ComplexTypeFilter::Enum, &["E"])]
#[case(ComplexTypeFilter::Group, &["G"])]
fn test_filter_selects_kinds(#[case] filter: ComplexTypeFilter, #[case] expected: &[&str]) {
    let source = "message M { optional group G = 1 {} } enum E { X = 0; }";
    let host = analysis_from_sources(&[("a.proto", source)]);
    let entries = host
        .analysis()
        .resolve_all_in("a.proto", &ComplexTypePolicy, filter);

    let mut bare: Vec<String> = entries
        .iter()
        .map(|e| e.name.as_str().rsplit('.').next().unwrap_or_default().to_string())
        .collect();
    bare.sort();
    bare.dedup();
    assert_eq!(bare, expected);
}

#[test]
fn test_every_entry_is_distinct() {
    let host = analysis_from_sources(&[("root.proto", NESTED_ROOT)]);
    let entries = all_types_in(&host, "root.proto");
    let mut pairs: Vec<_> = entries.iter().map(|e| (e.name.clone(), e.target)).collect();
    let total = pairs.len();
    pairs.sort();
    pairs.dedup();
    assert_eq!(pairs.len(), total);
}
