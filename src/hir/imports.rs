//! Mapping import declarations to documents.

use std::sync::Arc;

use crate::base::paths;
use crate::project::{ImportPaths, ResolverConfig};
use crate::syntax::ImportDecl;

use super::store::DocumentStore;

/// Where an import declaration points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImport {
    /// A document URI; the document may still be missing from the store.
    Concrete(Arc<str>),
    /// The configured descriptor path.
    BootstrapDescriptor,
    /// No location could be determined.
    Unresolved,
}

/// The outcome of resolving one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResolution {
    pub target: ResolvedImport,
    /// Candidate locations probed and found absent before `target` was
    /// settled. Loading any of them can change the outcome.
    pub missed: Vec<Arc<str>>,
}

impl From<ResolvedImport> for ImportResolution {
    fn from(target: ResolvedImport) -> Self {
        Self {
            target,
            missed: Vec::new(),
        }
    }
}

/// Resolves the path of an import relative to its importer.
pub trait ImportResolver: Send + Sync {
    fn resolve(&self, importer: &str, import: &ImportDecl, store: &dyn DocumentStore) -> ImportResolution;
}

/// Resolution driven by [`ResolverConfig`].
///
/// The descriptor path wins over any real file at the same location.
#[derive(Debug, Clone, Default)]
pub struct PathImportResolver {
    config: Arc<ResolverConfig>,
}

impl PathImportResolver {
    pub fn new(config: Arc<ResolverConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl ImportResolver for PathImportResolver {
    fn resolve(&self, importer: &str, import: &ImportDecl, store: &dyn DocumentStore) -> ImportResolution {
        let path = paths::normalize(&import.path);
        if path.is_empty() {
            return ResolvedImport::Unresolved.into();
        }
        if self.config.is_descriptor_path(&path) {
            return ResolvedImport::BootstrapDescriptor.into();
        }
        if path.starts_with('/') {
            return ResolvedImport::Concrete(path.into()).into();
        }
        match &self.config.import_paths {
            ImportPaths::OneDirectoryOnly => {
                ResolvedImport::Concrete(paths::join(paths::parent_dir(importer), &path).into()).into()
            }
            ImportPaths::MultipleDirectories(directories) => {
                let mut missed = Vec::new();
                for dir in directories {
                    let candidate: Arc<str> = paths::join(dir, &path).into();
                    if store.contains(&candidate) {
                        return ImportResolution {
                            target: ResolvedImport::Concrete(candidate),
                            missed,
                        };
                    }
                    missed.push(candidate);
                }
                ImportResolution {
                    target: ResolvedImport::Unresolved,
                    missed,
                }
            }
        }
    }
}
