//! Incremental construction of a [`Document`].
//!
//! The parser drives the builder with `start_at`/`finish_at` pairs; tests and
//! synthetic documents use the offset-free shorthands.

use smol_str::SmolStr;

use super::document::{
    Document, ImportDecl, ImportModifier, NodeData, NodeDetail, NodeId, NodeKind, Syntax,
};
use crate::base::{TextRange, TextSize};

/// Builds a document tree node by node.
#[derive(Debug)]
pub struct DocumentBuilder {
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    syntax: Syntax,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let root = NodeData {
            kind: NodeKind::File,
            name: None,
            parent: None,
            children: Vec::new(),
            range: TextRange::empty(TextSize::from(0)),
            detail: NodeDetail::None,
        };
        Self {
            nodes: vec![root],
            open: vec![NodeId::ROOT],
            syntax: Syntax::default(),
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn push(
        &mut self,
        kind: NodeKind,
        name: Option<&str>,
        detail: NodeDetail,
        start: TextSize,
    ) -> NodeId {
        let parent = self.current();
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            name: name.map(SmolStr::new),
            parent: Some(parent),
            children: Vec::new(),
            range: TextRange::empty(start),
            detail,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Open a node at `start`; children are added until [`finish_at`](Self::finish_at).
    pub fn start_at(
        &mut self,
        kind: NodeKind,
        name: Option<&str>,
        detail: NodeDetail,
        start: TextSize,
    ) -> NodeId {
        let id = self.push(kind, name, detail, start);
        self.open.push(id);
        id
    }

    /// Close the innermost open node, ending its range at `end`.
    pub fn finish_at(&mut self, end: TextSize) {
        if self.open.len() <= 1 {
            return;
        }
        if let Some(id) = self.open.pop() {
            let data = &mut self.nodes[id.index()];
            data.range = TextRange::new(data.range.start(), end.max(data.range.start()));
        }
    }

    /// Add a childless node spanning `range`.
    pub fn leaf_at(
        &mut self,
        kind: NodeKind,
        name: Option<&str>,
        detail: NodeDetail,
        range: TextRange,
    ) -> NodeId {
        let id = self.push(kind, name, detail, range.start());
        self.nodes[id.index()].range = range;
        id
    }

    pub fn start(&mut self, kind: NodeKind, name: Option<&str>) -> NodeId {
        self.start_at(kind, name, NodeDetail::None, TextSize::from(0))
    }

    pub fn finish(&mut self) {
        self.finish_at(TextSize::from(0));
    }

    pub fn leaf(&mut self, kind: NodeKind, name: Option<&str>, detail: NodeDetail) -> NodeId {
        self.leaf_at(kind, name, detail, TextRange::empty(TextSize::from(0)))
    }

    pub fn package(&mut self, name: &str) -> NodeId {
        self.leaf(NodeKind::Package, Some(name), NodeDetail::None)
    }

    pub fn import(&mut self, path: &str, modifier: ImportModifier) -> NodeId {
        self.leaf(
            NodeKind::Import,
            None,
            NodeDetail::Import(ImportDecl::new(path, modifier)),
        )
    }

    pub fn set_syntax(&mut self, syntax: Syntax) {
        self.syntax = syntax;
    }

    /// Close any nodes still open and produce the document.
    pub fn build(mut self) -> Document {
        let end = self
            .nodes
            .iter()
            .map(|n| n.range.end())
            .max()
            .unwrap_or_default();
        while self.open.len() > 1 {
            self.finish_at(end);
        }
        self.nodes[NodeId::ROOT.index()].range = TextRange::new(TextSize::from(0), end);
        Document::from_parts(self.nodes, self.syntax)
    }
}
