//! Lookup policies.
//!
//! The finder walks scopes and imports; a policy decides which nodes it
//! meets are candidates and under which names they are visible.

mod complex_type;
mod extension;

pub use complex_type::{ComplexTypeFilter, ComplexTypePolicy};
pub use extension::{ExtensionFilter, ExtensionPolicy};

use std::fmt;
use std::hash::Hash;

use crate::base::FileId;
use crate::syntax::{Document, ImportDecl, NodeRef, Package};

use super::entry::{EntrySet, SymbolEntry};
use super::ids::DefId;
use super::names::QualifiedName;

/// A node together with the file it was found in.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub file: FileId,
    pub node: NodeRef<'a>,
}

impl<'a> Candidate<'a> {
    pub fn new(file: FileId, node: NodeRef<'a>) -> Self {
        Self { file, node }
    }

    pub fn def_id(&self) -> DefId {
        DefId::new(self.file, self.node.id())
    }

    /// The package of the document this candidate lives in.
    pub fn package(&self) -> Option<Package> {
        self.node.document().package()
    }

    /// Same candidate, different node of the same document.
    pub fn with_node(&self, node: NodeRef<'a>) -> Self {
        Self {
            file: self.file,
            node,
        }
    }

    pub(crate) fn entries(
        self,
        names: impl IntoIterator<Item = QualifiedName>,
    ) -> impl Iterator<Item = SymbolEntry> {
        let target = self.def_id();
        names
            .into_iter()
            .map(move |name| SymbolEntry::new(name, target))
    }
}

/// An import that resolved to the bootstrap descriptor.
#[derive(Clone, Copy, Debug)]
pub struct DescriptorImport<'a> {
    pub import: &'a ImportDecl,
    pub document: &'a Document,
}

impl<'a> DescriptorImport<'a> {
    /// Every node of the descriptor, in document order.
    pub fn candidates(self) -> impl Iterator<Item = Candidate<'a>> + 'a {
        let document = self.document;
        document
            .preorder()
            .into_iter()
            .map(move |id| Candidate::new(FileId::DESCRIPTOR, document.node(id)))
    }
}

/// Identifies a policy for caching and cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    ComplexType,
    Extension,
}

/// Policy criteria as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriteriaKey {
    ComplexType(ComplexTypeFilter),
    Extension(ExtensionFilter),
}

/// Decides which nodes are candidates and under which names.
///
/// Implementations must be deterministic: the finder caches their output
/// per `(document, kind, criteria)`.
pub trait LookupPolicy {
    type Criteria: Copy + Eq + Hash + fmt::Debug + Into<CriteriaKey>;

    fn kind(&self) -> PolicyKind;

    /// Entries for a node found `level` scopes below the search origin in
    /// the same package.
    fn local(&self, target: Candidate<'_>, criteria: Self::Criteria, level: usize) -> EntrySet;

    /// Entries for a node of an imported document whose package is not
    /// related to the importer's.
    fn imported(
        &self,
        from_importer: Option<&Package>,
        from_imported: Option<&Package>,
        target: Candidate<'_>,
        criteria: Self::Criteria,
    ) -> EntrySet;

    /// Entries contributed by an import of the bootstrap descriptor.
    fn in_descriptor(&self, descriptor: DescriptorImport<'_>, criteria: Self::Criteria) -> EntrySet;
}
