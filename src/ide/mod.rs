//! IDE-facing entry points.
//!
//! The `AnalysisHost` owns the workspace; each `Analysis` snapshot answers
//! lookups through the resolution engine in [`crate::hir`].
//!
//! ## Usage
//!
//! ```
//! use protoscope::base::TextSize;
//! use protoscope::ide::{AnalysisHost, goto_type_definition};
//!
//! let source = "message M { message N {} optional N n = 1; }";
//! let mut host = AnalysisHost::new();
//! host.set_file_content("test.proto", source);
//!
//! let offset = TextSize::from(source.find("optional").unwrap() as u32);
//! let result = goto_type_definition(&host.analysis(), "test.proto", offset);
//! assert_eq!(result.targets.len(), 1);
//! ```

mod analysis;
mod goto;

pub use analysis::{Analysis, AnalysisHost};
pub use goto::{GotoResult, GotoTarget, goto_type_definition};
