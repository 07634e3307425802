//! File identifiers for tracking loaded proto documents.

use std::fmt;

/// An interned identifier for a proto document.
///
/// `FileId` is a lightweight handle (just a u32) that identifies a document
/// loaded into the workspace. The document's URI is stored by the host.
/// `FileId::DESCRIPTOR` is reserved for the bootstrap descriptor, which is
/// never a workspace file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// The synthetic `google/protobuf/descriptor.proto` document.
    pub const DESCRIPTOR: FileId = FileId(u32::MAX);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_descriptor(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_descriptor() {
            write!(f, "FileId(descriptor)")
        } else {
            write!(f, "FileId({})", self.0)
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_descriptor() {
            write!(f, "file#descriptor")
        } else {
            write!(f, "file#{}", self.0)
        }
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
