//! Semantic identifiers for definitions.

use std::fmt;

use crate::base::FileId;
use crate::syntax::NodeId;

/// A globally unique identifier for a defining node.
///
/// Combines the document the node lives in with its index in that
/// document's arena. A `DefId` is only meaningful for the parse generation
/// it was produced from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DefId {
    /// The document containing this definition
    pub file: FileId,
    /// The node within the document
    pub node: NodeId,
}

impl DefId {
    #[inline]
    pub const fn new(file: FileId, node: NodeId) -> Self {
        Self { file, node }
    }
}

impl fmt::Debug for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefId({:?}:{})", self.file, self.node.0)
    }
}
