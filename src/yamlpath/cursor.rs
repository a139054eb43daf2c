//! Cursors that let traversals walk a parsed [`YamlFile`].
//!
//! [`NodeCursor`] moves between nodes of one document. [`YamlCursor`] adds
//! the file root above the documents, so a whole-file path such as
//! `[0].spec.containers[*]` first picks a document by index and then keeps
//! going inside it.

use super::navigable::{Endpoints, Navigable};
use super::segment::Segment;
use crate::document::node::{TextSpan, YamlNode, YamlValue};
use crate::document::tree::YamlFile;

/// A position on one node of a document.
#[derive(Debug, Clone, Copy)]
pub struct NodeCursor<'a> {
    node: &'a YamlNode,
}

impl<'a> NodeCursor<'a> {
    pub fn new(node: &'a YamlNode) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a YamlNode {
        self.node
    }

    fn children(&self, segment: &Segment) -> Endpoints<'a, &'a YamlNode> {
        let node = self.node;
        match segment {
            Segment::ValAtKey(key) => Box::new(node.entry(key).map(|entry| &entry.value).into_iter()),
            Segment::KeyAtKey(key) => Box::new(node.entry(key).map(|entry| &entry.key).into_iter()),
            Segment::AtIndex(index) => Box::new(
                usize::try_from(*index)
                    .ok()
                    .and_then(|i| node.items()?.get(i))
                    .into_iter(),
            ),
            Segment::AnyChild => match node.value() {
                YamlValue::Mapping(entries) => Box::new(entries.iter().map(|entry| &entry.value)),
                YamlValue::Sequence(items) => Box::new(items.iter()),
                YamlValue::Scalar(_) => Box::new(std::iter::empty()),
            },
        }
    }
}

impl<'a> Navigable for NodeCursor<'a> {
    fn step_ambiguously<'s>(&self, segment: &Segment) -> Endpoints<'s, Self>
    where
        Self: 's,
    {
        Box::new(self.children(segment).map(NodeCursor::new))
    }
}

/// The position above every document of a file.
///
/// Only index-like steps make sense here: `[n]` selects the n-th document
/// and `[*]` selects all of them. Keyed steps never match.
#[derive(Debug, Clone, Copy)]
pub struct RootCursor<'a> {
    file: &'a YamlFile,
}

impl<'a> RootCursor<'a> {
    pub fn new(file: &'a YamlFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &'a YamlFile {
        self.file
    }

    fn documents(&self, segment: &Segment) -> Endpoints<'a, &'a YamlNode> {
        let documents = self.file.documents();
        match segment {
            Segment::AtIndex(index) => Box::new(
                usize::try_from(*index)
                    .ok()
                    .and_then(|i| documents.get(i))
                    .into_iter(),
            ),
            Segment::AnyChild => Box::new(documents.iter()),
            Segment::ValAtKey(_) | Segment::KeyAtKey(_) => Box::new(std::iter::empty()),
        }
    }
}

/// A position anywhere in a file: its root or one of its nodes.
#[derive(Debug, Clone, Copy)]
pub enum YamlCursor<'a> {
    Root(RootCursor<'a>),
    Node(NodeCursor<'a>),
}

impl<'a> YamlCursor<'a> {
    pub fn root(file: &'a YamlFile) -> Self {
        YamlCursor::Root(RootCursor::new(file))
    }

    pub fn is_root(&self) -> bool {
        matches!(self, YamlCursor::Root(_))
    }

    /// The node under the cursor; `None` at the file root.
    pub fn node(&self) -> Option<&'a YamlNode> {
        match self {
            YamlCursor::Root(_) => None,
            YamlCursor::Node(cursor) => Some(cursor.node()),
        }
    }

    /// Source range of the node, or of the whole source at the root.
    pub fn span(&self) -> TextSpan {
        match self {
            YamlCursor::Root(root) => TextSpan::new(0, root.file().source().chars().count()),
            YamlCursor::Node(cursor) => cursor.node().span(),
        }
    }
}

impl<'a> From<NodeCursor<'a>> for YamlCursor<'a> {
    fn from(cursor: NodeCursor<'a>) -> Self {
        YamlCursor::Node(cursor)
    }
}

impl<'a> Navigable for YamlCursor<'a> {
    fn step_ambiguously<'s>(&self, segment: &Segment) -> Endpoints<'s, Self>
    where
        Self: 's,
    {
        let children = match self {
            YamlCursor::Root(root) => root.documents(segment),
            YamlCursor::Node(cursor) => cursor.children(segment),
        };
        Box::new(children.map(|node| YamlCursor::Node(NodeCursor::new(node))))
    }
}
