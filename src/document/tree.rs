//! Whole-file view of a parsed YAML stream.
//!
//! A [`YamlFile`] owns every document of a YAML stream plus the source text
//! it was parsed from. Besides being the start point of whole-file traversals
//! (see [`crate::yamlpath::cursor::RootCursor`]), it can describe where a
//! character offset sits in the tree as a list of [`NodeRef`]s, which is what
//! [`crate::yamlpath::YamlPath::from_ast_path`] converts into a path.
//!
//! # Example
//!
//! ```
//! use yamlnav::document::parser::parse_yaml;
//! use yamlnav::document::tree::NodeRef;
//!
//! let file = parse_yaml("a:\n  b: value\n").unwrap();
//! let refs = file.ast_path_at(10);
//! assert!(matches!(refs[0], NodeRef::Root(0)));
//! ```

use super::node::{YamlNode, YamlValue};
use crate::yamlpath::cursor::YamlCursor;
use crate::yamlpath::traversal::Traversal;

/// One step of a path through the parsed tree, from a parent to a child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    /// The n-th document of the file
    Root(usize),
    /// A mapping key; holds the key node itself
    Key(&'a YamlNode),
    /// A mapping value; holds the key node of its entry
    Value(&'a YamlNode),
    /// The n-th element of a sequence
    Seq(usize),
}

/// A parsed YAML file: zero or more documents plus the original source.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlFile {
    documents: Vec<YamlNode>,
    source: String,
    filename: Option<String>,
}

impl YamlFile {
    pub fn new(documents: Vec<YamlNode>, source: String, filename: Option<String>) -> Self {
        Self {
            documents,
            source,
            filename,
        }
    }

    pub fn documents(&self) -> &[YamlNode] {
        &self.documents
    }

    pub fn document(&self, index: usize) -> Option<&YamlNode> {
        self.documents.get(index)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Cursor positioned at the file root, the start of whole-file paths.
    pub fn root_cursor(&self) -> YamlCursor<'_> {
        YamlCursor::root(self)
    }

    /// Applies `traversal` from the file root and returns the node of the
    /// first endpoint, if any.
    pub fn traverse_to_node<P: Traversal>(&self, traversal: &P) -> Option<&YamlNode> {
        traversal
            .traverse(self.root_cursor())
            .and_then(|cursor| cursor.node())
    }

    /// Describes the innermost node covering `offset` (a character index)
    /// as a list of references starting at the document.
    ///
    /// Returns an empty list when no document covers the offset.
    pub fn ast_path_at(&self, offset: usize) -> Vec<NodeRef<'_>> {
        let mut path = Vec::new();
        // Later documents win on a shared boundary.
        let hit = self
            .documents
            .iter()
            .enumerate()
            .rev()
            .find(|(_, doc)| doc.span().contains(offset));
        if let Some((index, doc)) = hit {
            path.push(NodeRef::Root(index));
            descend(doc, offset, &mut path);
        }
        path
    }
}

/// Siblings are checked last to first. Span ends are inclusive, so the later
/// node wins where one sibling ends and the next begins.
fn descend<'a>(node: &'a YamlNode, offset: usize, path: &mut Vec<NodeRef<'a>>) {
    match node.value() {
        YamlValue::Mapping(entries) => {
            for entry in entries.iter().rev() {
                if entry.value.span().contains(offset) {
                    path.push(NodeRef::Value(&entry.key));
                    descend(&entry.value, offset, path);
                    return;
                }
                if entry.key.span().contains(offset) {
                    path.push(NodeRef::Key(&entry.key));
                    descend(&entry.key, offset, path);
                    return;
                }
            }
        }
        YamlValue::Sequence(items) => {
            if let Some(index) = items.iter().rposition(|item| item.span().contains(offset)) {
                path.push(NodeRef::Seq(index));
                descend(&items[index], offset, path);
            }
        }
        YamlValue::Scalar(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;
    use crate::yamlpath::YamlPath;

    #[test]
    fn test_ast_path_into_value() {
        let yaml = "a:\n  b: value\n";
        let file = parse_yaml(yaml).unwrap();
        // offset of 'v' in "value"
        let offset = yaml.find("value").unwrap();
        let refs = file.ast_path_at(offset);
        assert_eq!(refs.len(), 3);
        assert!(matches!(refs[0], NodeRef::Root(0)));
        assert!(matches!(refs[1], NodeRef::Value(k) if k.as_scalar() == Some("a")));
        assert!(matches!(refs[2], NodeRef::Value(k) if k.as_scalar() == Some("b")));
    }

    #[test]
    fn test_ast_path_onto_key() {
        let yaml = "a:\n  b: value\n";
        let file = parse_yaml(yaml).unwrap();
        let offset = yaml.find("b:").unwrap();
        let refs = file.ast_path_at(offset);
        assert!(matches!(refs.last(), Some(NodeRef::Key(k)) if k.as_scalar() == Some("b")));
    }

    #[test]
    fn test_ast_path_through_sequence() {
        let yaml = "items:\n  - one\n  - two\n";
        let file = parse_yaml(yaml).unwrap();
        let refs = file.ast_path_at(yaml.find("two").unwrap());
        assert!(matches!(refs.last(), Some(NodeRef::Seq(1))));
    }

    #[test]
    fn test_ast_path_selects_document() {
        let yaml = "a: 1\n---\nb: 2\n";
        let file = parse_yaml(yaml).unwrap();
        let refs = file.ast_path_at(yaml.find("b:").unwrap());
        assert!(matches!(refs[0], NodeRef::Root(1)));
    }

    #[test]
    fn test_document_span_covers_first_key() {
        let yaml = "a: 1\n---\nb: 2\n";
        let file = parse_yaml(yaml).unwrap();
        assert_eq!(file.document(0).unwrap().span().start, 0);
        assert_eq!(file.document(1).unwrap().span().start, 9);

        let refs = file.ast_path_at(9);
        assert!(matches!(refs[..], [NodeRef::Root(1), NodeRef::Key(k)] if k.as_scalar() == Some("b")));
        let refs = file.ast_path_at(0);
        assert!(matches!(refs[..], [NodeRef::Root(0), NodeRef::Key(k)] if k.as_scalar() == Some("a")));
    }

    #[test]
    fn test_ast_path_onto_first_key_of_nested_mapping() {
        let yaml = "a:\n  b: value\n";
        let file = parse_yaml(yaml).unwrap();
        let refs = file.ast_path_at(yaml.find("b:").unwrap());
        let path = YamlPath::from_ast_path(&refs).unwrap();
        assert_eq!(path.encode(), vec!["[0", ".a", "&b"]);
    }

    #[test]
    fn test_ast_path_onto_first_key_of_sequence_item() {
        let yaml = "s:\n- name: x\n";
        let file = parse_yaml(yaml).unwrap();
        let refs = file.ast_path_at(yaml.find("name").unwrap());
        let path = YamlPath::from_ast_path(&refs).unwrap();
        assert_eq!(path.encode(), vec!["[0", ".s", "[0", "&name"]);
    }

    #[test]
    fn test_traverse_to_node() {
        let file = parse_yaml("a:\n  b: [x, y, z]\n").unwrap();
        let path = YamlPath::from_property("a.b").prepend(crate::yamlpath::Segment::at_index(0));
        let node = file.traverse_to_node(&path).unwrap();
        assert_eq!(node.len(), 3);

        let missing = YamlPath::from_property("a.nope");
        assert!(file.traverse_to_node(&missing).is_none());
    }
}
