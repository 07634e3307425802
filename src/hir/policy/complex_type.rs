//! Lookup of messages, enums and groups.

use crate::hir::entry::EntrySet;
use crate::hir::names::{intersection_names, local_names, qualified_names};
use crate::syntax::{NodeKind, Package};

use super::{Candidate, CriteriaKey, DescriptorImport, LookupPolicy, PolicyKind};

/// Which complex types a lookup accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComplexTypeFilter {
    #[default]
    Any,
    Message,
    Enum,
    Group,
}

impl ComplexTypeFilter {
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            Self::Any => kind.is_complex_type(),
            Self::Message => kind == NodeKind::Message,
            Self::Enum => kind == NodeKind::Enum,
            Self::Group => kind == NodeKind::Group,
        }
    }
}

impl From<ComplexTypeFilter> for CriteriaKey {
    fn from(filter: ComplexTypeFilter) -> Self {
        CriteriaKey::ComplexType(filter)
    }
}

/// Resolves type references of fields, map values and rpc signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexTypePolicy;

impl LookupPolicy for ComplexTypePolicy {
    type Criteria = ComplexTypeFilter;

    fn kind(&self) -> PolicyKind {
        PolicyKind::ComplexType
    }

    fn local(&self, target: Candidate<'_>, criteria: ComplexTypeFilter, level: usize) -> EntrySet {
        if !criteria.matches(target.node.kind()) {
            return EntrySet::default();
        }
        let package = target.package();
        let mut names: Vec<_> = local_names(target.node, package.as_ref())
            .into_iter()
            .skip(level)
            .collect();
        names.extend(qualified_names(target.node, package.as_ref()));
        target.entries(names).collect()
    }

    fn imported(
        &self,
        from_importer: Option<&Package>,
        from_imported: Option<&Package>,
        target: Candidate<'_>,
        criteria: ComplexTypeFilter,
    ) -> EntrySet {
        if !criteria.matches(target.node.kind()) {
            return EntrySet::default();
        }
        let mut names = qualified_names(target.node, from_imported);
        names.extend(intersection_names(from_importer, from_imported, target.node));
        target.entries(names).collect()
    }

    fn in_descriptor(&self, descriptor: DescriptorImport<'_>, criteria: ComplexTypeFilter) -> EntrySet {
        let package = descriptor.document.package();
        descriptor
            .candidates()
            .filter(|candidate| criteria.matches(candidate.node.kind()))
            .flat_map(|candidate| candidate.entries(qualified_names(candidate.node, package.as_ref())))
            .collect()
    }
}
