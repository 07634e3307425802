//! Resolver configuration.

use std::sync::Arc;

use crate::base::constants::{
    DEFAULT_DESCRIPTOR_PATH, DESCRIPTOR_PATH_PREFERENCE, DIRECTORY_PATHS_PREFERENCE,
    FILES_IN_MULTIPLE_DIRECTORIES_PREFERENCE,
};
use crate::base::paths;

/// How import paths are mapped to documents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportPaths {
    /// Imports are relative to the importing document's directory.
    #[default]
    OneDirectoryOnly,
    /// Imports are looked up in each directory in order; the first
    /// directory holding the file wins.
    MultipleDirectories(Vec<String>),
}

impl ImportPaths {
    /// Build from the two import preferences. `directories` is a
    /// comma-separated list; blank items are ignored.
    pub fn from_preferences(multiple_directories: bool, directories: &str) -> Self {
        if !multiple_directories {
            return Self::OneDirectoryOnly;
        }
        Self::MultipleDirectories(split_directories(directories))
    }
}

fn split_directories(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map(paths::normalize)
        .collect()
}

/// Settings the finder consults when following imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Import path that means the bootstrap descriptor.
    pub descriptor_path: String,
    pub import_paths: ImportPaths,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            descriptor_path: DEFAULT_DESCRIPTOR_PATH.to_string(),
            import_paths: ImportPaths::default(),
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor_path(mut self, path: impl Into<String>) -> Self {
        self.descriptor_path = paths::normalize(&path.into());
        self
    }

    pub fn with_import_paths(mut self, import_paths: ImportPaths) -> Self {
        self.import_paths = import_paths;
        self
    }

    /// Build from string preferences, keyed by the names in
    /// [`crate::base::constants`]. Missing keys keep their defaults.
    pub fn from_preferences<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(DESCRIPTOR_PATH_PREFERENCE).filter(|p| !p.trim().is_empty()) {
            config = config.with_descriptor_path(path.trim());
        }
        let multiple = lookup(FILES_IN_MULTIPLE_DIRECTORIES_PREFERENCE)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        let directories = lookup(DIRECTORY_PATHS_PREFERENCE).unwrap_or_default();
        config.with_import_paths(ImportPaths::from_preferences(multiple, &directories))
    }

    /// Whether the already normalized `import_path` names the descriptor.
    pub fn is_descriptor_path(&self, import_path: &str) -> bool {
        paths::normalize(&self.descriptor_path) == import_path
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
