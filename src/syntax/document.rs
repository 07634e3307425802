//! The parsed document arena.
//!
//! A [`Document`] owns every node of one proto file in a flat vector; nodes
//! refer to each other by [`NodeId`]. Documents are immutable once built:
//! an edit produces a new document, never a mutation.

use smol_str::SmolStr;
use std::fmt;

use crate::base::{TextRange, TextSize};

/// Index of a node inside its [`Document`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// The syntactic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Syntax,
    Package,
    Import,
    Option,
    Message,
    Group,
    Enum,
    EnumValue,
    Field,
    MapField,
    Oneof,
    Extend,
    Extensions,
    Reserved,
    Service,
    Rpc,
}

impl NodeKind {
    /// Kinds that open a nested lexical scope for named definitions.
    pub fn is_scope(self) -> bool {
        matches!(self, Self::Message | Self::Group)
    }

    /// Kinds that can be referenced as a type (message, enum, group).
    pub fn is_complex_type(self) -> bool {
        matches!(self, Self::Message | Self::Enum | Self::Group)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Syntax => "syntax",
            Self::Package => "package",
            Self::Import => "import",
            Self::Option => "option",
            Self::Message => "message",
            Self::Group => "group",
            Self::Enum => "enum",
            Self::EnumValue => "enum value",
            Self::Field => "field",
            Self::MapField => "map field",
            Self::Oneof => "oneof",
            Self::Extend => "extend",
            Self::Extensions => "extensions",
            Self::Reserved => "reserved",
            Self::Service => "service",
            Self::Rpc => "rpc",
        }
    }
}

/// The language level declared by a document's `syntax` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Syntax {
    /// `proto2`, also assumed when no `syntax` statement is present.
    #[default]
    Proto2,
    Proto3,
    /// Any other value; such documents contribute no symbols.
    Unrecognized(SmolStr),
}

impl Syntax {
    pub fn from_literal(value: &str) -> Self {
        match value {
            "proto2" => Self::Proto2,
            "proto3" => Self::Proto3,
            other => Self::Unrecognized(SmolStr::new(other)),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// How an import re-exposes its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportModifier {
    #[default]
    None,
    /// `import public`: the target's symbols are visible to our importers.
    Public,
    /// `import weak`: behaves like a plain import for resolution.
    Weak,
}

/// An import statement: `import [public|weak] "path";`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportDecl {
    pub path: SmolStr,
    pub modifier: ImportModifier,
}

impl ImportDecl {
    pub fn new(path: impl Into<SmolStr>, modifier: ImportModifier) -> Self {
        Self {
            path: path.into(),
            modifier,
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifier == ImportModifier::Public
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeDetail {
    #[default]
    None,
    Import(ImportDecl),
    /// Textual type reference of a field, map value, extend target or rpc input.
    TypeRef(SmolStr),
    /// A value literal (syntax level, option value).
    Value(SmolStr),
}

/// One node of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub name: Option<SmolStr>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub range: TextRange,
    pub detail: NodeDetail,
}

/// An immutable parsed proto document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<NodeData>,
    syntax: Syntax,
}

impl Document {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, syntax: Syntax) -> Self {
        debug_assert!(
            nodes.first().is_some_and(|n| n.kind == NodeKind::File),
            "document arena must start with the file root"
        );
        Self { nodes, syntax }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Access a node's data.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this document.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All node ids in pre-order (root first, children in declaration order).
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.data(id).children.iter().rev().copied());
        }
        out
    }

    /// The innermost node whose range contains `offset`.
    pub fn node_at(&self, offset: TextSize) -> NodeId {
        let mut current = NodeId::ROOT;
        'descend: loop {
            for &child in &self.data(current).children {
                let range = self.data(child).range;
                if range.contains(offset) || range.end() == offset {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    /// Find a named node by its dotted path of names below the root
    /// (`"Outer.Inner"`), ignoring nodes that do not contribute a name.
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for segment in path.split('.') {
            current = self.find_named_below(current, segment)?;
        }
        Some(current)
    }

    fn find_named_below(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        for &child in &self.data(parent).children {
            let data = self.data(child);
            if data.name.as_deref() == Some(name) && data.kind != NodeKind::Package {
                return Some(child);
            }
            // oneof and extend members are addressed through their parent
            if matches!(data.kind, NodeKind::Oneof | NodeKind::Extend) {
                if let Some(found) = self.find_named_below(child, name) {
                    return Some(found);
                }
            }
        }
        None
    }
}
