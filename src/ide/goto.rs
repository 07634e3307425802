//! Go-to-definition for type references.

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{ComplexTypeFilter, ComplexTypePolicy, DefId, QualifiedName};
use crate::syntax::{NodeId, NodeKind};

use super::Analysis;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to, ordered by definition.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file containing the target; [`FileId::DESCRIPTOR`] for
    /// descriptor types.
    pub file: FileId,
    pub node: NodeId,
    pub kind: NodeKind,
    /// The name the reference matched.
    pub name: QualifiedName,
    pub range: TextRange,
}

/// Resolve the type reference of the field, map field, extend or rpc at
/// `offset` to the definitions it names.
///
/// More than one target means the reference is ambiguous.
pub fn goto_type_definition(analysis: &Analysis<'_>, path: &str, offset: TextSize) -> GotoResult {
    let Some(site) = analysis.document(path) else {
        return GotoResult::empty();
    };
    let node = site.document.node(site.document.node_at(offset));
    let Some(reference) = node.type_ref() else {
        return GotoResult::empty();
    };
    let filter = match node.kind() {
        NodeKind::Extend => ComplexTypeFilter::Message,
        _ => ComplexTypeFilter::Any,
    };

    let entries = analysis
        .finder()
        .find_from_reference_site(&site, node.id(), &ComplexTypePolicy, filter);
    let mut matches: Vec<(DefId, QualifiedName)> = entries
        .into_iter()
        .filter(|entry| entry.name == reference)
        .map(|entry| (entry.target, entry.name))
        .collect();
    matches.sort();

    let targets = matches
        .into_iter()
        .filter_map(|(def, name)| {
            analysis.with_definition(def, |target| GotoTarget {
                file: def.file,
                node: def.node,
                kind: target.kind(),
                name,
                range: target.data().range,
            })
        })
        .collect();
    GotoResult { targets }
}
