//! Salsa database definition and queries.

use std::sync::Arc;

use crate::base::FileId;
use crate::parser::{self, ParseError};
use crate::syntax::Document;

// ============================================================================
// INPUTS
// ============================================================================

/// Input: The raw text content of a proto file.
///
/// Set this explicitly when a file is opened or changed.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    #[return_ref]
    pub text: String,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database.
///
/// Memoizes parsing per file. Queries are invalidated when their
/// `FileText` input changes.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {
        // Default no-op implementation
    }
}

impl RootDatabase {
    /// Create a new, empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Parse result with the document or the error that stopped the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    /// The parsed document; `None` when parsing failed.
    pub document: Option<Arc<Document>>,
    /// Errors reported by the parser.
    pub errors: Vec<ParseError>,
}

// Manual Eq impl for Salsa tracking
impl Eq for ParseResult {}

impl ParseResult {
    pub fn ok(document: Document) -> Self {
        Self {
            document: Some(Arc::new(document)),
            errors: Vec::new(),
        }
    }

    pub fn err(error: ParseError) -> Self {
        Self {
            document: None,
            errors: vec![error],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.document.is_some()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a file into a [`Document`].
///
/// This is a tracked Salsa query - results are memoized and automatically
/// invalidated when the input `FileText` changes.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> ParseResult {
    let text = file_text.text(db);
    match parser::parse(text) {
        Ok(document) => ParseResult::ok(document),
        Err(error) => {
            tracing::debug!(
                "[PARSE] {:?} failed to parse: {}",
                file_text.file(db),
                error
            );
            ParseResult::err(error)
        }
    }
}
