//! Read-only queries over a parsed document.
//!
//! [`NodeRef`] is a borrowed handle to one node; the `Document` methods here
//! answer the document-level questions the resolver asks (imports, package,
//! syntax level). Nothing in this module mutates a document.

use super::document::{Document, ImportDecl, NodeData, NodeDetail, NodeId, NodeKind};
use super::package::Package;

impl Document {
    /// Handle to the root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::ROOT)
    }

    /// Handle to an arbitrary node.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef::new(self, id)
    }

    /// All import statements, in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> + '_ {
        self.data(NodeId::ROOT)
            .children
            .iter()
            .filter_map(|&id| match &self.data(id).detail {
                NodeDetail::Import(decl) => Some(decl),
                _ => None,
            })
    }

    /// Import statements marked `public`, in declaration order.
    pub fn public_imports(&self) -> impl Iterator<Item = &ImportDecl> + '_ {
        self.imports().filter(|decl| decl.is_public())
    }

    /// The first `package` declaration, if any.
    pub fn package(&self) -> Option<Package> {
        self.data(NodeId::ROOT)
            .children
            .iter()
            .map(|&id| self.data(id))
            .find(|data| data.kind == NodeKind::Package)
            .and_then(|data| data.name.clone())
            .map(Package::new)
    }

    /// False for documents whose `syntax` level is not supported.
    pub fn has_recognized_syntax(&self) -> bool {
        self.syntax().is_recognized()
    }
}

/// A borrowed handle to a node inside a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn data(self) -> &'a NodeData {
        self.doc.data(self.id)
    }

    pub fn kind(self) -> NodeKind {
        self.data().kind
    }

    pub fn name(self) -> Option<&'a str> {
        self.data().name.as_deref()
    }

    pub fn type_ref(self) -> Option<&'a str> {
        match &self.data().detail {
            NodeDetail::TypeRef(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| NodeRef::new(self.doc, id))
    }

    /// Direct children in declaration order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef::new(doc, id))
    }

    /// Proper ancestors, innermost first, ending with the document root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Names of the enclosing messages and groups, outermost first.
    pub fn container_names(self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self
            .ancestors()
            .filter(|n| n.kind().is_scope())
            .filter_map(|n| n.name())
            .collect();
        names.reverse();
        names
    }

    /// The node this one is declared directly inside, skipping `oneof` wrappers.
    pub fn declaring_parent(self) -> Option<NodeRef<'a>> {
        self.ancestors().find(|n| n.kind() != NodeKind::Oneof)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} {:?}", self.kind().as_str(), self.name(), self.id)
    }
}
