//! HIR test helpers for setting up analysis hosts and document stores.

use std::collections::HashMap;
use std::sync::Arc;

use protoscope::base::{FileId, paths};
use protoscope::hir::{
    ComplexTypeFilter, ComplexTypePolicy, DefId, DocumentStore, EntrySet, LoadedDocument,
};
use protoscope::ide::AnalysisHost;
use protoscope::parser;
use protoscope::project::ResolverConfig;

/// Creates an AnalysisHost with multiple files, asserting they all parse.
pub fn analysis_from_sources(files: &[(&str, &str)]) -> AnalysisHost {
    analysis_with_config(ResolverConfig::default(), files)
}

/// Creates an AnalysisHost with a custom configuration.
pub fn analysis_with_config(config: ResolverConfig, files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::with_config(config);
    for (path, content) in files {
        let errors = host.set_file_content(path, content);
        assert!(
            errors.is_empty(),
            "Parse errors in '{}': {:?}",
            path,
            errors
        );
    }
    host
}

/// All complex types declared in or imported into `path`.
pub fn all_types_in(host: &AnalysisHost, path: &str) -> EntrySet {
    host.analysis()
        .resolve_all_in(path, &ComplexTypePolicy, ComplexTypeFilter::Any)
}

/// Complex types visible from the node at dotted `node_path` in `path`.
pub fn types_visible_at(host: &AnalysisHost, path: &str, node_path: &str) -> EntrySet {
    let analysis = host.analysis();
    let doc = analysis
        .document(path)
        .unwrap_or_else(|| panic!("'{}' is not loaded", path));
    let node = doc
        .document
        .find_by_path(node_path)
        .unwrap_or_else(|| panic!("'{}' not found in '{}'", node_path, path));
    analysis.resolve_at(path, node, &ComplexTypePolicy, ComplexTypeFilter::Any)
}

/// The definition at dotted `node_path` in `path`.
pub fn def_id(host: &AnalysisHost, path: &str, node_path: &str) -> DefId {
    let doc = host
        .analysis()
        .document(path)
        .unwrap_or_else(|| panic!("'{}' is not loaded", path));
    let node = doc
        .document
        .find_by_path(node_path)
        .unwrap_or_else(|| panic!("'{}' not found in '{}'", node_path, path));
    DefId::new(doc.file, node)
}

/// Entry names, sorted.
pub fn sorted_names(entries: &EntrySet) -> Vec<String> {
    let mut names: Vec<String> = entries.iter().map(|e| e.name.to_string()).collect();
    names.sort();
    names
}

/// A fixed, thread-safe document set for driving the finder directly.
pub struct StaticStore {
    docs: HashMap<Arc<str>, LoadedDocument>,
}

impl StaticStore {
    pub fn from_sources(files: &[(&str, &str)]) -> Self {
        let docs = files
            .iter()
            .enumerate()
            .map(|(i, (path, source))| {
                let uri: Arc<str> = paths::normalize(path).into();
                let document = parser::parse(source)
                    .unwrap_or_else(|e| panic!("'{}' failed to parse: {}", path, e));
                let loaded = LoadedDocument {
                    file: FileId::new(i as u32),
                    uri: uri.clone(),
                    generation: 1,
                    document: Arc::new(document),
                };
                (uri, loaded)
            })
            .collect();
        Self { docs }
    }
}

impl DocumentStore for StaticStore {
    fn document(&self, uri: &str) -> Option<LoadedDocument> {
        self.docs.get(uri).cloned()
    }
}
