//! Symbol table entries produced by a lookup.

use rustc_hash::FxHashSet;
use std::fmt;

use super::ids::DefId;
use super::names::QualifiedName;

/// A name paired with the node it refers to.
///
/// Equality is on both parts, so the same node reachable under two names
/// yields two entries.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolEntry {
    pub name: QualifiedName,
    pub target: DefId,
}

impl SymbolEntry {
    pub fn new(name: QualifiedName, target: DefId) -> Self {
        Self { name, target }
    }
}

impl fmt::Debug for SymbolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {:?}", self.name, self.target)
    }
}

/// The result of a lookup; a set, so duplicates never appear.
pub type EntrySet = FxHashSet<SymbolEntry>;
