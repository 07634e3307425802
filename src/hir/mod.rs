//! High-level IR (HIR): parsing queries and symbol resolution.
//!
//! Parsing is memoized with Salsa; symbol lookups run over the parsed
//! documents and memoize per-document contributions in a [`LookupCache`].
//!
//! ## Key Types
//!
//! - [`RootDatabase`]: Salsa database holding [`FileText`] inputs
//! - [`DefId`]: Identifier for a defining node
//! - [`SymbolEntry`]: A name paired with the node it resolves to
//! - [`LookupPolicy`]: Decides candidates and naming per symbol kind
//! - [`Finder`]: Scope and import-graph traversal
//!
//! ## Lookup Layers
//!
//! ```text
//! file_text(file)             ← INPUT: raw source text
//!     │
//!     ▼
//! parse_file(file)            ← Document arena (per-file)
//!     │
//!     ▼
//! Finder                      ← scopes, then imports
//!     │   └─ LookupCache      ← per-document contribution
//!     ▼
//! LookupPolicy                ← candidates and names
//! ```

mod cache;
mod db;
mod entry;
mod finder;
mod ids;
mod imports;
mod names;
mod policy;
mod store;

pub use cache::{Contribution, Dependency, LookupCache, SlotKey};
pub use db::{FileText, ParseResult, RootDatabase, parse_file};
pub use entry::{EntrySet, SymbolEntry};
pub use finder::Finder;
pub use ids::DefId;
pub use imports::{ImportResolution, ImportResolver, PathImportResolver, ResolvedImport};
pub use names::{
    QualifiedName, fully_qualified_name, intersection_names, local_names, qualified_names,
};
pub use policy::{
    Candidate, ComplexTypeFilter, ComplexTypePolicy, CriteriaKey, DescriptorImport,
    ExtensionFilter, ExtensionPolicy, LookupPolicy, PolicyKind,
};
pub use store::{DocumentStore, LoadedDocument};
