//! The resolution engine.
//!
//! A lookup has two parts. The scope part walks up from the reference site
//! and, at each enclosing node, collects everything declared below it. The
//! import part follows the import graph of the document, reusing cached
//! per-document contributions.

use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::project::DescriptorSource;
use crate::syntax::{ImportDecl, NodeId, NodeRef, Package, are_related};

use super::cache::{Contribution, Dependency, LookupCache, SlotKey};
use super::entry::EntrySet;
use super::imports::{ImportResolver, ResolvedImport};
use super::policy::{Candidate, CriteriaKey, DescriptorImport, LookupPolicy, PolicyKind};
use super::store::{DocumentStore, LoadedDocument};

/// Finds the symbols visible at a point of a document.
///
/// Borrows its collaborators; construct one per query batch.
pub struct Finder<'a> {
    store: &'a dyn DocumentStore,
    imports: &'a dyn ImportResolver,
    descriptor: &'a dyn DescriptorSource,
    cache: &'a LookupCache,
}

impl<'a> Finder<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        imports: &'a dyn ImportResolver,
        descriptor: &'a dyn DescriptorSource,
        cache: &'a LookupCache,
    ) -> Self {
        Self {
            store,
            imports,
            descriptor,
            cache,
        }
    }

    /// Everything visible from `node`: the subtrees of each of its
    /// ancestors, then the document's imports.
    pub fn find_from_reference_site<P: LookupPolicy>(
        &self,
        site: &LoadedDocument,
        node: NodeId,
        policy: &P,
        criteria: P::Criteria,
    ) -> EntrySet {
        let mut search = Search::new(self, policy, criteria);
        let mut entries = EntrySet::default();
        for ancestor in site.document.node(node).ancestors() {
            search.descendants(site, ancestor, 0, &mut entries);
        }
        search.all_imports(site, &mut entries);
        entries
    }

    /// Everything declared in `doc` plus everything its imports provide.
    pub fn find_from_document_root<P: LookupPolicy>(
        &self,
        doc: &LoadedDocument,
        policy: &P,
        criteria: P::Criteria,
    ) -> EntrySet {
        let mut search = Search::new(self, policy, criteria);
        let mut entries = EntrySet::default();
        search.descendants(doc, doc.document.root(), 0, &mut entries);
        search.all_imports(doc, &mut entries);
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResolutionKey {
    uri: Arc<str>,
    policy: PolicyKind,
    criteria: CriteriaKey,
}

/// State of one top-level query.
struct Search<'f, P: LookupPolicy> {
    finder: &'f Finder<'f>,
    policy: &'f P,
    criteria: P::Criteria,
    /// Documents whose contribution is being computed further up the stack.
    resolving: FxHashSet<ResolutionKey>,
    /// Times an import was cut short because it was already being resolved.
    reentries: usize,
    /// Documents followed so far; frames slice off what they added.
    dependencies: Vec<Dependency>,
}

impl<'f, P: LookupPolicy> Search<'f, P> {
    fn new(finder: &'f Finder<'f>, policy: &'f P, criteria: P::Criteria) -> Self {
        Self {
            finder,
            policy,
            criteria,
            resolving: FxHashSet::default(),
            reentries: 0,
            dependencies: Vec::new(),
        }
    }

    fn key(&self, uri: &Arc<str>) -> ResolutionKey {
        ResolutionKey {
            uri: uri.clone(),
            policy: self.policy.kind(),
            criteria: self.criteria.into(),
        }
    }

    /// Whether every document a cached contribution was built from is
    /// still at the generation it was seen at.
    fn is_current(&self, dependencies: &[Dependency]) -> bool {
        dependencies.iter().all(|dependency| {
            let generation = self
                .finder
                .store
                .document(&dependency.uri)
                .map(|doc| doc.generation);
            generation == dependency.generation
        })
    }

    /// Local entries for every node below `start`, descending into scopes.
    fn descendants(&self, doc: &LoadedDocument, start: NodeRef<'_>, level: usize, out: &mut EntrySet) {
        for child in start.children() {
            out.extend(
                self.policy
                    .local(Candidate::new(doc.file, child), self.criteria, level),
            );
            if child.kind().is_scope() {
                self.descendants(doc, child, level + 1, out);
            }
        }
    }

    fn all_imports(&mut self, doc: &LoadedDocument, out: &mut EntrySet) {
        let imports: Vec<&ImportDecl> = doc.document.imports().collect();
        let package = doc.document.package();
        self.from_imports(doc, &imports, package.as_ref(), out);
    }

    fn public_imports(&mut self, doc: &LoadedDocument, out: &mut EntrySet) {
        let imports: Vec<&ImportDecl> = doc.document.public_imports().collect();
        let package = doc.document.package();
        self.from_imports(doc, &imports, package.as_ref(), out);
    }

    fn from_imports(
        &mut self,
        importer: &LoadedDocument,
        imports: &[&ImportDecl],
        from_importer: Option<&Package>,
        out: &mut EntrySet,
    ) {
        for &import in imports {
            let resolution = self
                .finder
                .imports
                .resolve(&importer.uri, import, self.finder.store);
            self.dependencies.extend(
                resolution
                    .missed
                    .into_iter()
                    .map(|uri| Dependency { uri, generation: None }),
            );
            let uri = match resolution.target {
                ResolvedImport::BootstrapDescriptor => {
                    tracing::trace!("[FINDER] {} imports the descriptor", importer.uri);
                    let descriptor = DescriptorImport {
                        import,
                        document: self.finder.descriptor.descriptor(),
                    };
                    out.extend(self.policy.in_descriptor(descriptor, self.criteria));
                    continue;
                }
                ResolvedImport::Unresolved => {
                    tracing::debug!(
                        "[FINDER] {}: import \"{}\" is unresolved",
                        importer.uri,
                        import.path
                    );
                    continue;
                }
                ResolvedImport::Concrete(uri) => uri,
            };

            let Some(imported) = self.finder.store.document(&uri) else {
                tracing::debug!(
                    "[FINDER] {}: import \"{}\" is not loaded ({})",
                    importer.uri,
                    import.path,
                    uri
                );
                self.dependencies.push(Dependency {
                    uri,
                    generation: None,
                });
                continue;
            };
            self.dependencies.push(Dependency {
                uri: imported.uri.clone(),
                generation: Some(imported.generation),
            });
            if !imported.document.has_recognized_syntax() {
                tracing::debug!(
                    "[FINDER] {}: skipping {} with syntax {:?}",
                    importer.uri,
                    uri,
                    imported.document.syntax()
                );
                continue;
            }

            let contribution = self.from_imported(&imported, from_importer);
            out.extend(contribution.iter().cloned());
        }
    }

    /// What `imported` contributes to an importer with package `from_importer`.
    fn from_imported(&mut self, imported: &LoadedDocument, from_importer: Option<&Package>) -> Arc<EntrySet> {
        let slot = SlotKey::new(self.policy.kind(), self.criteria.into(), from_importer);
        if let Some(hit) = self
            .finder
            .cache
            .get(&imported.uri, imported.generation, &slot)
        {
            if self.is_current(&hit.dependencies) {
                tracing::trace!("[CACHE] hit {} {:?}", imported.uri, slot);
                self.dependencies.extend(hit.dependencies.iter().cloned());
                return hit.entries;
            }
            tracing::trace!("[CACHE] {} re-exports changed documents", imported.uri);
        }

        let key = self.key(&imported.uri);
        if !self.resolving.insert(key.clone()) {
            tracing::debug!("[FINDER] import cycle through {}, cut short", imported.uri);
            self.reentries += 1;
            return Arc::new(EntrySet::default());
        }
        tracing::trace!("[CACHE] miss {} {:?}", imported.uri, slot);
        let reentries_before = self.reentries;
        let dependencies_start = self.dependencies.len();

        let mut entries = EntrySet::default();
        self.public_imports(imported, &mut entries);

        let from_imported = imported.document.package();
        if are_related(from_importer, from_imported.as_ref()) {
            self.descendants(imported, imported.document.root(), 0, &mut entries);
        } else {
            for id in imported.document.preorder() {
                let target = Candidate::new(imported.file, imported.document.node(id));
                entries.extend(self.policy.imported(
                    from_importer,
                    from_imported.as_ref(),
                    target,
                    self.criteria,
                ));
            }
        }

        self.resolving.remove(&key);
        let entries = Arc::new(entries);
        if self.reentries == reentries_before {
            let mut dependencies = self.dependencies[dependencies_start..].to_vec();
            dependencies.sort();
            dependencies.dedup();
            let contribution = Contribution {
                entries: entries.clone(),
                dependencies: dependencies.into(),
            };
            self.finder
                .cache
                .put(&imported.uri, imported.generation, slot, contribution);
        } else {
            tracing::trace!("[CACHE] not storing cycle-truncated {}", imported.uri);
        }
        entries
    }
}
