//! Workspace loading tests over real directories.

use std::fs;
use std::path::Path;

use protoscope::ide::AnalysisHost;
use protoscope::project::workspace_loader::uri_for;
use protoscope::project::{ImportPaths, ResolverConfig, WorkspaceError, WorkspaceLoader};
use tempfile::TempDir;

use crate::helpers::hir_helpers::all_types_in;
use crate::helpers::symbol_assertions::*;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_loaded_files_resolve_imports_relative_to_importer() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api/service.proto", "package api; import \"types.proto\";");
    write(dir.path(), "api/types.proto", "package api; message Request {}");

    let mut host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();
    assert_eq!(loaded, 2);

    let service = uri_for(&dir.path().join("api/service.proto"));
    assert_has_name(&all_types_in(&host, &service), "Request");
}

#[test]
fn test_loaded_files_resolve_through_import_directories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/app.proto", "package app; import \"shared/ids.proto\";");
    write(dir.path(), "third_party/shared/ids.proto", "package shared; message Id {}");

    let third_party = uri_for(&dir.path().join("third_party"));
    let config = ResolverConfig::default()
        .with_import_paths(ImportPaths::MultipleDirectories(vec![third_party]));
    let mut host = AnalysisHost::with_config(config);
    WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();

    let app = uri_for(&dir.path().join("src/app.proto"));
    let entries = all_types_in(&host, &app);
    assert_has_name(&entries, "shared.Id");
    assert_lacks_name(&entries, "Id");
}

#[test]
fn test_broken_file_is_registered_but_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.proto", "package p; import \"b.proto\"; message A {}");
    write(dir.path(), "b.proto", "message {");

    let mut host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();
    assert_eq!(loaded, 2);

    let a = uri_for(&dir.path().join("a.proto"));
    let entries = all_types_in(&host, &a);
    assert_has_name(&entries, "A");
    assert_eq!(entries.len(), 3);
}

#[test]
fn test_single_file_parse_error_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.proto", "message {");

    let mut host = AnalysisHost::new();
    let result = WorkspaceLoader::new().load_file_into_host(dir.path().join("bad.proto"), &mut host);
    assert!(matches!(result, Err(WorkspaceError::Parse { .. })));
    assert_eq!(host.file_count(), 1);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let mut host = AnalysisHost::new();
    let result = WorkspaceLoader::new().load_file_into_host(dir.path().join("nope.proto"), &mut host);
    assert!(matches!(result, Err(WorkspaceError::Io { .. })));
    assert_eq!(host.file_count(), 0);
}
