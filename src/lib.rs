//! # protoscope-base
//!
//! Cross-document symbol resolution for proto schemas: which messages,
//! enums, groups and extensions are visible at a point of a document, and
//! under which names.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project::workspace_loader → fills an AnalysisHost from disk
//!   ↓
//! ide       → AnalysisHost/Analysis snapshots, go-to-definition
//!   ↓
//! hir       → Salsa parse queries, lookup policies, finder, cache
//!   ↓
//! project   → Resolver configuration, bootstrap descriptor
//!   ↓
//! syntax    → Document arena, accessors, packages
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! base      → Primitives (FileId, TextRange, paths)
//! ```
//!
//! `project` is split across the stack: its configuration and descriptor
//! sit below `hir`, while its workspace loader drives `ide`.

// ============================================================================
// MODULES (base → parser → syntax → project config → hir → ide → workspace loader)
// ============================================================================

/// Foundation types: FileId, TextRange, path utilities
pub mod base;

/// Parser: Logos lexer and recursive-descent parser
pub mod parser;

/// Syntax: document arena, node accessors, packages
pub mod syntax;

/// High-level IR: Salsa queries and symbol resolution
pub mod hir;

/// IDE-facing snapshots and go-to-definition
pub mod ide;

/// Project management: configuration, descriptor, workspace loading
pub mod project;

// Re-export foundation types
pub use base::{FileId, TextRange, TextSize};

// Re-export the lookup surface
pub use hir::{
    ComplexTypeFilter, ComplexTypePolicy, DefId, EntrySet, ExtensionFilter, ExtensionPolicy,
    LookupPolicy, QualifiedName, SymbolEntry,
};
pub use ide::{Analysis, AnalysisHost};
pub use project::ResolverConfig;
