//! Lookup of extension fields, as named by custom options.
//!
//! Extension fields are declared inside `extend` blocks. The finder only
//! visits the block itself, so the block is the candidate and each field or
//! group declared directly inside it yields entries.

use crate::hir::entry::EntrySet;
use crate::hir::names::{intersection_names, local_names, qualified_names};
use crate::syntax::{NodeKind, Package};

use super::{Candidate, CriteriaKey, DescriptorImport, LookupPolicy, PolicyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtensionFilter {
    #[default]
    Any,
    Field,
    Group,
}

impl ExtensionFilter {
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            Self::Any => matches!(kind, NodeKind::Field | NodeKind::Group),
            Self::Field => kind == NodeKind::Field,
            Self::Group => kind == NodeKind::Group,
        }
    }
}

impl From<ExtensionFilter> for CriteriaKey {
    fn from(filter: ExtensionFilter) -> Self {
        CriteriaKey::Extension(filter)
    }
}

/// Resolves the names used in custom options, e.g. `(my.ext).value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionPolicy;

impl ExtensionPolicy {
    fn members<'a>(
        target: Candidate<'a>,
        filter: ExtensionFilter,
    ) -> impl Iterator<Item = Candidate<'a>> + 'a {
        let block = (target.node.kind() == NodeKind::Extend).then_some(target.node);
        block
            .into_iter()
            .flat_map(|extend| extend.children())
            .filter(move |member| filter.matches(member.kind()))
            .map(move |member| target.with_node(member))
    }
}

impl LookupPolicy for ExtensionPolicy {
    type Criteria = ExtensionFilter;

    fn kind(&self) -> PolicyKind {
        PolicyKind::Extension
    }

    fn local(&self, target: Candidate<'_>, criteria: ExtensionFilter, level: usize) -> EntrySet {
        let package = target.package();
        let mut entries = EntrySet::default();
        for member in Self::members(target, criteria) {
            let mut names: Vec<_> = local_names(member.node, package.as_ref())
                .into_iter()
                .skip(level)
                .collect();
            names.extend(qualified_names(member.node, package.as_ref()));
            entries.extend(member.entries(names));
        }
        entries
    }

    fn imported(
        &self,
        from_importer: Option<&Package>,
        from_imported: Option<&Package>,
        target: Candidate<'_>,
        criteria: ExtensionFilter,
    ) -> EntrySet {
        let mut entries = EntrySet::default();
        for member in Self::members(target, criteria) {
            let mut names = qualified_names(member.node, from_imported);
            names.extend(intersection_names(from_importer, from_imported, member.node));
            entries.extend(member.entries(names));
        }
        entries
    }

    fn in_descriptor(&self, descriptor: DescriptorImport<'_>, criteria: ExtensionFilter) -> EntrySet {
        let package = descriptor.document.package();
        descriptor
            .candidates()
            .flat_map(|candidate| Self::members(candidate, criteria))
            .flat_map(|member| member.entries(qualified_names(member.node, package.as_ref())))
            .collect()
    }
}
