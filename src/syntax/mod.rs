//! Syntax: the proto document model consumed by the resolver.
//!
//! - [`Document`]: immutable node arena for one file
//! - [`NodeRef`]: borrowed node handle with ancestor/child queries
//! - [`DocumentBuilder`]: used by the parser and by synthetic documents
//! - [`Package`], [`are_related`]: package declarations and their relation

mod accessors;
mod builder;
mod document;
mod package;

pub use accessors::NodeRef;
pub use builder::DocumentBuilder;
pub use document::{
    Document, ImportDecl, ImportModifier, NodeData, NodeDetail, NodeId, NodeKind, Syntax,
};
pub use package::{Package, are_related, common_prefix_len};
