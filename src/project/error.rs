use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors raised while loading documents from disk.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was registered but contributes nothing until it parses.
    #[error("{}: {error}", path.display())]
    Parse { path: PathBuf, error: ParseError },
}
