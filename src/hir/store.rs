//! Access to the set of loaded documents.

use std::sync::Arc;

use crate::base::FileId;
use crate::syntax::Document;

/// A parsed document as seen by the resolver.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
    pub file: FileId,
    /// Normalized path the document was registered under.
    pub uri: Arc<str>,
    /// Bumped every time the document text changes.
    pub generation: u64,
    pub document: Arc<Document>,
}

/// The document set a lookup runs against.
///
/// Only documents that parsed are returned; a registered but malformed
/// document behaves as absent.
pub trait DocumentStore {
    fn document(&self, uri: &str) -> Option<LoadedDocument>;

    fn contains(&self, uri: &str) -> bool {
        self.document(uri).is_some()
    }
}
