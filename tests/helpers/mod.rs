//! Shared helpers for integration tests.

pub mod hir_helpers;
pub mod source_fixtures;
