//! AnalysisHost and Analysis: state management for symbol lookups.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```
//! use protoscope::hir::{ComplexTypeFilter, ComplexTypePolicy};
//! use protoscope::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//!
//! // Apply file changes
//! host.set_file_content("protos/a.proto", "package a; import \"b.proto\"; message A {}");
//! host.set_file_content("protos/b.proto", "package a; message B {}");
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let entries = analysis.resolve_all_in("protos/a.proto", &ComplexTypePolicy, ComplexTypeFilter::Any);
//! assert!(entries.iter().any(|e| e.name == "B"));
//! ```

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use salsa::Setter;
use std::sync::Arc;

use crate::base::{FileId, TextSize, paths};
use crate::hir::{
    DefId, DocumentStore, EntrySet, FileText, Finder, LoadedDocument, LookupCache, LookupPolicy,
    PathImportResolver, RootDatabase, parse_file,
};
use crate::parser::ParseError;
use crate::project::{DescriptorSource, ProtoDescriptor, ResolverConfig};
use crate::syntax::{NodeId, NodeRef};

struct SourceFile {
    file: FileId,
    input: FileText,
    generation: u64,
}

/// Owns all mutable state for the lookup layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    db: RootDatabase,
    /// Registered files by normalized path, in registration order
    files: IndexMap<Arc<str>, SourceFile>,
    paths_by_file: FxHashMap<FileId, Arc<str>>,
    next_file_id: u32,
    /// Source of generations; never reused, so a re-added file never
    /// matches entries cached for its previous incarnation
    next_generation: u64,
    import_resolver: PathImportResolver,
    descriptor: Arc<dyn DescriptorSource>,
    cache: LookupCache,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            db: RootDatabase::new(),
            files: IndexMap::new(),
            paths_by_file: FxHashMap::default(),
            next_file_id: 0,
            next_generation: 0,
            import_resolver: PathImportResolver::new(Arc::new(config)),
            descriptor: ProtoDescriptor::shared(),
            cache: LookupCache::new(),
        }
    }

    /// Replace the document served for descriptor imports.
    pub fn with_descriptor(mut self, descriptor: Arc<dyn DescriptorSource>) -> Self {
        self.descriptor = descriptor;
        self.cache.clear();
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        self.import_resolver.config()
    }

    /// Change how imports resolve. Drops every cached contribution.
    pub fn set_config(&mut self, config: ResolverConfig) {
        self.import_resolver = PathImportResolver::new(Arc::new(config));
        self.cache.clear();
    }

    /// Set the content of a file, registering it if new.
    ///
    /// The file's generation moves only when the text differs from what is
    /// stored. Returns parse errors if any.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Vec<ParseError> {
        let uri: Arc<str> = paths::normalize(path).into();

        let input = match self.files.get_mut(&uri) {
            Some(source) => {
                if source.input.text(&self.db) != content {
                    source.input.set_text(&mut self.db).to(content.to_string());
                    self.next_generation += 1;
                    source.generation = self.next_generation;
                    self.cache.invalidate(&uri);
                }
                source.input
            }
            None => {
                let file = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                self.next_generation += 1;
                let input = FileText::new(&self.db, file, content.to_string());
                self.paths_by_file.insert(file, uri.clone());
                self.files.insert(
                    uri,
                    SourceFile {
                        file,
                        input,
                        generation: self.next_generation,
                    },
                );
                input
            }
        };

        parse_file(&self.db, input).errors
    }

    /// Remove a file. Returns whether it was registered.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let uri = paths::normalize(path);
        let removed = self.files.shift_remove(uri.as_str());
        if let Some(source) = &removed {
            self.paths_by_file.remove(&source.file);
            self.cache.invalidate(&uri);
        }
        removed.is_some()
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(paths::normalize(path).as_str())
    }

    /// Get the number of files registered, including unparsable ones.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Get the FileId for a path, if it exists.
    pub fn get_file_id(&self, path: &str) -> Option<FileId> {
        self.files
            .get(paths::normalize(path).as_str())
            .map(|source| source.file)
    }

    /// Get the path for a FileId, if it exists.
    pub fn get_file_path(&self, file_id: FileId) -> Option<&str> {
        self.paths_by_file.get(&file_id).map(|uri| uri.as_ref())
    }

    /// Current generation of a file.
    pub fn generation(&self, path: &str) -> Option<u64> {
        self.files
            .get(paths::normalize(path).as_str())
            .map(|source| source.generation)
    }

    /// Registered paths in registration order.
    pub fn files(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.keys().map(|uri| uri.as_ref())
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { host: self }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All lookups go through this struct to ensure consistent results.
pub struct Analysis<'a> {
    host: &'a AnalysisHost,
}

impl<'a> Analysis<'a> {
    /// The parsed document at `path`; `None` if missing or unparsable.
    pub fn document(&self, path: &str) -> Option<LoadedDocument> {
        self.loaded(&paths::normalize(path))
    }

    /// Errors from the last parse of `path`.
    pub fn parse_errors(&self, path: &str) -> Vec<ParseError> {
        self.host
            .files
            .get(paths::normalize(path).as_str())
            .map(|source| parse_file(&self.host.db, source.input).errors)
            .unwrap_or_default()
    }

    /// Run `f` on the node a [`DefId`] points at, if it still exists.
    pub fn with_definition<R>(&self, def: DefId, f: impl FnOnce(NodeRef<'_>) -> R) -> Option<R> {
        if def.file.is_descriptor() {
            let document = self.host.descriptor.descriptor();
            return (def.node.index() < document.len()).then(|| f(document.node(def.node)));
        }
        let path = self.host.get_file_path(def.file)?;
        let loaded = self.loaded(path)?;
        let document = loaded.document.as_ref();
        (def.node.index() < document.len()).then(|| f(document.node(def.node)))
    }

    /// A finder over this snapshot.
    pub fn finder(&self) -> Finder<'_> {
        Finder::new(
            self,
            &self.host.import_resolver,
            self.host.descriptor.as_ref(),
            &self.host.cache,
        )
    }

    /// Entries visible from `node` of the document at `path`.
    pub fn resolve_at<P: LookupPolicy>(
        &self,
        path: &str,
        node: NodeId,
        policy: &P,
        criteria: P::Criteria,
    ) -> EntrySet {
        match self.document(path) {
            Some(site) => self
                .finder()
                .find_from_reference_site(&site, node, policy, criteria),
            None => EntrySet::default(),
        }
    }

    /// Entries visible from the innermost node at `offset`.
    pub fn resolve_at_offset<P: LookupPolicy>(
        &self,
        path: &str,
        offset: TextSize,
        policy: &P,
        criteria: P::Criteria,
    ) -> EntrySet {
        match self.document(path) {
            Some(site) => {
                let node = site.document.node_at(offset);
                self.finder()
                    .find_from_reference_site(&site, node, policy, criteria)
            }
            None => EntrySet::default(),
        }
    }

    /// Entries declared in or imported into the document at `path`.
    pub fn resolve_all_in<P: LookupPolicy>(
        &self,
        path: &str,
        policy: &P,
        criteria: P::Criteria,
    ) -> EntrySet {
        match self.document(path) {
            Some(doc) => self
                .finder()
                .find_from_document_root(&doc, policy, criteria),
            None => EntrySet::default(),
        }
    }

    fn loaded(&self, uri: &str) -> Option<LoadedDocument> {
        let (key, source) = self.host.files.get_key_value(uri)?;
        let document = parse_file(&self.host.db, source.input).document?;
        Some(LoadedDocument {
            file: source.file,
            uri: key.clone(),
            generation: source.generation,
            document,
        })
    }
}

impl DocumentStore for Analysis<'_> {
    fn document(&self, uri: &str) -> Option<LoadedDocument> {
        self.loaded(uri)
    }
}
