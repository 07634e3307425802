//! HIR layer tests
//!
//! Tests for symbol lookup over documents and their imports:
//! - Scope walking and nesting levels
//! - Import traversal, package relations and public re-exports
//! - The bootstrap descriptor
//! - Cache reuse and invalidation

pub mod tests_cache;
pub mod tests_scoping;
