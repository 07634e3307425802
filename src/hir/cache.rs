//! Per-document memo of lookup contributions.
//!
//! Keyed by document, then by [`SlotKey`]: policy kind, criteria and the
//! package of the importing document. Every document records the
//! generation its slots were computed for; a lookup with a newer
//! generation misses and the next store replaces the slots. Stores for an
//! older generation than the recorded one are ignored.
//!
//! A contribution also depends on the documents reached through public
//! imports. Those are listed as [`Dependency`] values and checked by the
//! finder on every hit.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::Arc;

use crate::syntax::Package;

use super::entry::EntrySet;
use super::policy::{CriteriaKey, PolicyKind};

/// Identifies one contribution of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub policy: PolicyKind,
    pub criteria: CriteriaKey,
    /// Intersection names depend on the importer's package.
    pub importer_package: Option<SmolStr>,
}

impl SlotKey {
    pub fn new(policy: PolicyKind, criteria: CriteriaKey, importer: Option<&Package>) -> Self {
        Self {
            policy,
            criteria,
            importer_package: importer.map(|p| SmolStr::new(p.name())),
        }
    }
}

/// A document a contribution was computed from, at the generation seen.
/// `None` means the document was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dependency {
    pub uri: Arc<str>,
    pub generation: Option<u64>,
}

/// What one imported document contributes to a lookup.
#[derive(Debug, Clone, Default)]
pub struct Contribution {
    pub entries: Arc<EntrySet>,
    /// Documents reached through public imports while computing `entries`.
    pub dependencies: Arc<[Dependency]>,
}

#[derive(Default)]
struct ResourceEntries {
    generation: u64,
    slots: FxHashMap<SlotKey, Contribution>,
}

/// Shared memo of what each imported document contributes to a lookup.
///
/// Safe to share between threads; readers never block each other.
#[derive(Default)]
pub struct LookupCache {
    resources: RwLock<FxHashMap<Arc<str>, ResourceEntries>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &str, generation: u64, key: &SlotKey) -> Option<Contribution> {
        let resources = self.resources.read();
        let resource = resources.get(uri)?;
        if resource.generation != generation {
            return None;
        }
        resource.slots.get(key).cloned()
    }

    pub fn put(&self, uri: &Arc<str>, generation: u64, key: SlotKey, contribution: Contribution) {
        let mut resources = self.resources.write();
        let resource = resources.entry(uri.clone()).or_default();
        if generation < resource.generation {
            tracing::trace!(
                "[CACHE] {} already at generation {}, dropping write for {}",
                uri,
                resource.generation,
                generation
            );
            return;
        }
        if resource.generation != generation {
            tracing::trace!(
                "[CACHE] {} generation {} -> {}, dropping stale entries",
                uri,
                resource.generation,
                generation
            );
            resource.generation = generation;
            resource.slots.clear();
        }
        resource.slots.insert(key, contribution);
    }

    /// Drop everything cached for `uri`.
    pub fn invalidate(&self, uri: &str) {
        if self.resources.write().remove(uri).is_some() {
            tracing::debug!("[CACHE] invalidated {}", uri);
        }
    }

    pub fn clear(&self) {
        self.resources.write().clear();
    }

    /// Number of cached contributions across all documents.
    pub fn len(&self) -> usize {
        self.resources.read().values().map(|r| r.slots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
