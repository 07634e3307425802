//! Foundation types for protoscope.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned document identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`paths`] - URI normalization and joining
//! - Domain constants (descriptor path, preference names)
//!
//! This module has NO dependencies on other protoscope modules.

pub mod constants;
mod file_id;
pub mod paths;

pub use file_id::FileId;

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
