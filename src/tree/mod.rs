//! Document tree.
//!
//! Nodes live in one arena owned by [`Document`] and refer to each other by
//! [`NodeId`]. The root is always node 0.

mod assemble;

pub use assemble::{place, ChildShape, ListView, Placement, TreeAssembler};

use std::fmt::Write as _;

use crate::inline::Inline;

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node is, with its children where it has any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document { children: Vec<NodeId> },
    SectionHeader { level: u32, text: String },
    List { level: u32, ordered: bool, children: Vec<NodeId> },
    Paragraph { children: Vec<NodeId> },
    Inline(Inline),
}

impl NodeKind {
    fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Self::Document { children } | Self::List { children, .. } | Self::Paragraph { children } => {
                Some(children)
            }
            Self::SectionHeader { .. } | Self::Inline(_) => None,
        }
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    /// Parent node; `None` only for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Child ids in document order. Leaves have none.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Document { children }
            | NodeKind::List { children, .. }
            | NodeKind::Paragraph { children } => children,
            NodeKind::SectionHeader { .. } | NodeKind::Inline(_) => &[],
        }
    }
}

/// A parsed wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    nodes: Vec<Node>,
}

impl Document {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Document {
                    children: Vec::new(),
                },
            }],
        }
    }

    /// Page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Node by id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this document.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Node by id, or `None` for a foreign id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no content besides the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Every node id in creation order, root first.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Children of the root.
    pub fn top_level(&self) -> &[NodeId] {
        self.children(NodeId::ROOT)
    }

    /// Ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Inline content of a paragraph, in order.
    pub fn inlines(&self, paragraph: NodeId) -> impl Iterator<Item = &Inline> + '_ {
        self.children(paragraph)
            .iter()
            .filter_map(|&id| match &self.node(id).kind {
                NodeKind::Inline(inline) => Some(inline),
                _ => None,
            })
    }

    /// Append a node under `parent`.
    pub(crate) fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: Some(parent),
            kind,
        });
        if let Some(children) = self.nodes[parent.index()].kind.children_mut() {
            children.push(id);
        }
        id
    }

    /// Indented text outline of the tree, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(NodeId::ROOT, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        // Writing to a String cannot fail
        let _ = match &self.node(id).kind {
            NodeKind::Document { .. } => writeln!(out, "Document {:?}", self.title),
            NodeKind::SectionHeader { level, text } => {
                writeln!(out, "SectionHeader level={level} {text:?}")
            }
            NodeKind::List { level, ordered, .. } => {
                writeln!(out, "List level={level} ordered={ordered}")
            }
            NodeKind::Paragraph { .. } => writeln!(out, "Paragraph"),
            NodeKind::Inline(inline) => dump_inline(inline, out),
        };
        for &child in self.children(id) {
            self.dump_node(child, depth + 1, out);
        }
    }
}

fn dump_inline(inline: &Inline, out: &mut String) -> std::fmt::Result {
    match inline {
        Inline::StyledText { effects, text } => writeln!(out, "Text [{effects:?}] {text:?}"),
        Inline::Link {
            target,
            text,
            internal,
        } => writeln!(out, "Link {target:?} {text:?} internal={internal}"),
        Inline::Media {
            resource,
            width,
            height,
            align,
            title,
            kind,
        } => writeln!(
            out,
            "Media {kind:?} {resource:?} {width:?}x{height:?} {align:?} title={title:?}"
        ),
        Inline::Literal {
            kind, text, language, ..
        } => writeln!(out, "Literal {} lang={language:?} {text:?}", kind.tag()),
    }
}

/// Iterator over a node's ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.parent(id);
        Some(id)
    }
}
