use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::base::paths;
use crate::ide::AnalysisHost;

use super::error::WorkspaceError;

/// Loads proto files from disk into an [`AnalysisHost`].
///
/// Documents are registered under their normalized path, so imports resolve
/// against the same strings the loader used.
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads every `.proto` file below `path`.
    ///
    /// Files that fail to parse are still registered and logged. Returns the
    /// number of files registered.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<usize, WorkspaceError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(WorkspaceError::DirectoryNotFound(path));
        }

        let mut file_paths = Vec::new();
        collect_proto_paths(&path, &mut file_paths)?;
        file_paths.sort();

        let sources = file_paths
            .par_iter()
            .map(|file| {
                fs::read_to_string(file)
                    .map(|text| (file.clone(), text))
                    .map_err(|source| WorkspaceError::Io {
                        path: file.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut failed = 0usize;
        for (file, text) in &sources {
            let errors = host.set_file_content(&uri_for(file), text);
            if let Some(error) = errors.first() {
                failed += 1;
                tracing::warn!("[LOADER] {}: {}", file.display(), error);
            }
        }
        tracing::debug!(
            "[LOADER] loaded {} file(s) from {} ({} with parse errors)",
            sources.len(),
            path.display(),
            failed
        );
        Ok(sources.len())
    }

    /// Loads a single file. A parse failure is reported after the file has
    /// been registered.
    pub fn load_file_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), WorkspaceError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| WorkspaceError::Io {
            path: path.clone(),
            source,
        })?;
        let mut errors = host.set_file_content(&uri_for(&path), &text);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(WorkspaceError::Parse {
                path,
                error: errors.swap_remove(0),
            })
        }
    }
}

/// The URI a file on disk is registered under.
pub fn uri_for(path: &Path) -> String {
    paths::normalize(&path.to_string_lossy())
}

fn collect_proto_paths(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), WorkspaceError> {
    let io_error = |source| WorkspaceError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_proto_paths(&path, out)?;
        } else if paths::is_proto_file(&path.to_string_lossy()) {
            out.push(path);
        }
    }
    Ok(())
}
