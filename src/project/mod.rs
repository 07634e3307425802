//! Workspace collaborators: configuration, the bootstrap descriptor and
//! loading documents from disk.

pub mod config;
pub mod descriptor;
mod error;
pub mod workspace_loader;

pub use config::{ImportPaths, ResolverConfig};
pub use descriptor::{DescriptorSource, ProtoDescriptor};
pub use error::WorkspaceError;
pub use workspace_loader::WorkspaceLoader;
