//! Block sequence to document tree.

use crate::block::{BlockKind, ListItem, RawBlock};
use crate::error::ParseError;
use crate::inline::{fixup_links, Inline, InlineParser};
use crate::Options;

use super::{Document, NodeId, NodeKind};

/// Where a list item goes relative to the list currently being examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Move into the list's last child (a deeper list) and decide again.
    Descend,
    /// New paragraph child of this list.
    AttachSibling,
    /// New list at the item's level inside this list.
    AttachNested,
    /// New list at the top level of the document.
    CreateNewTopLevelList,
}

/// Shape of a list's last child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildShape {
    List,
    Paragraph,
}

/// What [`place`] needs to know about a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListView {
    pub level: u32,
    pub ordered: bool,
    pub last_child: Option<ChildShape>,
}

/// Decide where `item` attaches, given the list under consideration
/// (`None` when the document's last top-level node is not a list).
pub fn place(list: Option<ListView>, item: &ListItem) -> Result<Placement, ParseError> {
    let Some(list) = list else {
        return Ok(Placement::CreateNewTopLevelList);
    };
    if item.force_new_list {
        return Ok(Placement::CreateNewTopLevelList);
    }

    if list.level < item.level {
        return match list.last_child {
            Some(ChildShape::List) => Ok(Placement::Descend),
            Some(ChildShape::Paragraph) => Ok(Placement::AttachNested),
            None => Err(ParseError::MalformedListState { level: list.level }),
        };
    }
    if list.level == item.level && list.ordered == item.ordered {
        return Ok(Placement::AttachSibling);
    }
    Ok(Placement::CreateNewTopLevelList)
}

/// Builds a [`Document`] from raw blocks.
///
/// Paragraph text is kept aside until [`finish`](Self::finish), which runs
/// the inline stages over every paragraph in creation order.
pub struct TreeAssembler {
    doc: Document,
    pending: Vec<(NodeId, Vec<u8>)>,
}

impl TreeAssembler {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            doc: Document::new(title),
            pending: Vec::new(),
        }
    }

    /// Add one block to the tree.
    pub fn push_block(&mut self, block: RawBlock) -> Result<(), ParseError> {
        match block.kind {
            BlockKind::Header { level } => {
                let text = String::from_utf8_lossy(&block.text).into_owned();
                self.doc.push(NodeId::ROOT, NodeKind::SectionHeader { level, text });
            }
            BlockKind::Paragraph => self.paragraph(NodeId::ROOT, block.text),
            BlockKind::ListItem(item) => self.list_item(&item, block.text)?,
        }
        Ok(())
    }

    fn list_item(&mut self, item: &ListItem, text: Vec<u8>) -> Result<(), ParseError> {
        let mut current = self.tail_list();
        loop {
            let view = current.map(|id| self.view(id));
            match place(view, item)? {
                Placement::Descend => {
                    current = current.and_then(|id| self.doc.children(id).last().copied());
                }
                Placement::AttachSibling => {
                    if let Some(list) = current {
                        self.paragraph(list, text);
                        return Ok(());
                    }
                    return Err(ParseError::MalformedListState { level: item.level });
                }
                Placement::AttachNested => {
                    let parent = current.unwrap_or(NodeId::ROOT);
                    self.new_list(parent, item, text);
                    return Ok(());
                }
                Placement::CreateNewTopLevelList => {
                    self.new_list(NodeId::ROOT, item, text);
                    return Ok(());
                }
            }
        }
    }

    /// Last top-level node, if it is a list.
    fn tail_list(&self) -> Option<NodeId> {
        let &last = self.doc.top_level().last()?;
        matches!(self.doc.node(last).kind(), NodeKind::List { .. }).then_some(last)
    }

    fn view(&self, id: NodeId) -> ListView {
        let (level, ordered) = match self.doc.node(id).kind() {
            NodeKind::List { level, ordered, .. } => (*level, *ordered),
            _ => (0, false),
        };
        let last_child = self.doc.children(id).last().map(|&child| {
            match self.doc.node(child).kind() {
                NodeKind::List { .. } => ChildShape::List,
                _ => ChildShape::Paragraph,
            }
        });
        ListView {
            level,
            ordered,
            last_child,
        }
    }

    fn new_list(&mut self, parent: NodeId, item: &ListItem, text: Vec<u8>) {
        let list = self.doc.push(
            parent,
            NodeKind::List {
                level: item.level,
                ordered: item.ordered,
                children: Vec::new(),
            },
        );
        self.paragraph(list, text);
    }

    fn paragraph(&mut self, parent: NodeId, text: Vec<u8>) {
        let id = self.doc.push(parent, NodeKind::Paragraph { children: Vec::new() });
        self.pending.push((id, text));
    }

    /// Parse inline content of every paragraph and return the document.
    pub fn finish(mut self, options: &Options) -> Result<Document, ParseError> {
        let pending = std::mem::take(&mut self.pending);
        tracing::debug!(paragraphs = pending.len(), "parsing paragraph inlines");

        let mut parser = InlineParser::new();
        let mut inlines: Vec<Inline> = Vec::new();
        let mut links = 0;
        for (paragraph, text) in pending {
            inlines.clear();
            parser.parse(&text, &mut inlines)?;
            if options.fixup_links {
                links += fixup_links(&mut inlines);
            }
            for inline in inlines.drain(..) {
                self.doc.push(paragraph, NodeKind::Inline(inline));
            }
        }

        tracing::debug!(nodes = self.doc.len(), links, "document assembled");
        Ok(self.doc)
    }
}
