//! Immutable sequences of segments.

use super::error::YamlPathError;
use super::navigable::{Endpoints, Navigable};
use super::segment::Segment;
use super::traversal::Traversal;
use crate::document::tree::NodeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered list of [`Segment`]s, the most common kind of traversal.
///
/// Paths are values: every structural operation returns a new path and
/// leaves the receiver untouched. Two paths are equal when their segments
/// are.
///
/// # Example
///
/// ```
/// use yamlnav::yamlpath::{Segment, YamlPath};
///
/// let path = YamlPath::from_property("server.port");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_prop_string(), "server.port");
///
/// let first_doc = path.prepend(Segment::at_index(0));
/// assert_eq!(first_doc.to_string(), "YamlPath([0], .server, .port)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YamlPath {
    segments: Vec<Segment>,
}

impl YamlPath {
    /// The path with no segments; traversing it returns the start node.
    pub const EMPTY: YamlPath = YamlPath {
        segments: Vec::new(),
    };

    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Splits a dotted property name at every `.`, each piece becoming a
    /// value-at-key segment.
    pub fn from_property(property: &str) -> Self {
        property.split('.').map(Segment::value_at).collect()
    }

    /// A single value-at-key segment; dots in `name` are part of the key.
    pub fn from_simple_property(name: &str) -> Self {
        Self::new(vec![Segment::value_at(name)])
    }

    /// Converts a list of tree references into a path.
    ///
    /// Returns `None` when some reference has no path equivalent, which
    /// happens for mapping keys that are not scalars.
    pub fn from_ast_path(refs: &[NodeRef<'_>]) -> Option<Self> {
        refs.iter()
            .map(|node_ref| match *node_ref {
                NodeRef::Root(index) | NodeRef::Seq(index) => {
                    isize::try_from(index).ok().map(Segment::AtIndex)
                }
                NodeRef::Key(key) => key.as_scalar().map(Segment::key_at),
                NodeRef::Value(key) => key.as_scalar().map(Segment::value_at),
            })
            .collect()
    }

    /// Decodes a list of segment codes (see [`Segment::encode`]).
    pub fn decode<I, S>(codes: I) -> Result<Self, YamlPathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .map(|code| Segment::decode(code.as_ref()))
            .collect()
    }

    /// Encodes every segment; [`YamlPath::decode`] reverses this exactly.
    pub fn encode(&self) -> Vec<String> {
        self.segments.iter().map(Segment::encode).collect()
    }

    /// All segment codes run together in one string.
    pub fn encode_joined(&self) -> String {
        self.segments.iter().map(Segment::encode).collect()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn prepend(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment);
        segments.extend(self.segments.iter().cloned());
        Self::new(segments)
    }

    pub fn append(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self::new(segments)
    }

    /// This path followed by every segment of `other`.
    pub fn concat(&self, other: &YamlPath) -> Self {
        self.segments
            .iter()
            .chain(other.segments.iter())
            .cloned()
            .collect()
    }

    pub fn drop_first(&self, count: usize) -> Self {
        Self::new(self.segments.get(count..).unwrap_or_default().to_vec())
    }

    pub fn drop_last(&self, count: usize) -> Self {
        let keep = self.segments.len().saturating_sub(count);
        Self::new(self.segments[..keep].to_vec())
    }

    pub fn drop_last_one(&self) -> Self {
        self.drop_last(1)
    }

    /// Everything but the first segment.
    pub fn tail(&self) -> Self {
        self.drop_first(1)
    }

    /// The longest shared leading run of segments.
    pub fn common_prefix(&self, other: &YamlPath) -> Self {
        self.segments
            .iter()
            .zip(other.segments.iter())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.clone())
            .collect()
    }

    pub fn starts_with(&self, prefix: &YamlPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// The key of a trailing keyed segment, in property form.
    pub fn bean_property_name(&self) -> Option<String> {
        match self.last_segment()? {
            segment @ Segment::ValAtKey(_) => Some(segment.to_prop_string()),
            Segment::KeyAtKey(key) => Some(key.clone()),
            _ => None,
        }
    }

    pub fn points_at_key(&self) -> bool {
        matches!(self.last_segment(), Some(Segment::KeyAtKey(_)))
    }

    pub fn points_at_value(&self) -> bool {
        matches!(
            self.last_segment(),
            Some(Segment::ValAtKey(_) | Segment::AtIndex(_))
        )
    }

    /// `a.b[2].c`: the first segment in property form, the rest in
    /// navigation form.
    pub fn to_prop_string(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i == 0 {
                out.push_str(&segment.to_prop_string());
            } else {
                out.push_str(&segment.to_nav_string());
            }
        }
        out
    }

    /// `.a.b[2].c`: every segment in navigation form.
    pub fn to_nav_string(&self) -> String {
        self.segments.iter().map(Segment::to_nav_string).collect()
    }
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YamlPath(")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", segment)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<Segment>> for YamlPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl From<Segment> for YamlPath {
    fn from(segment: Segment) -> Self {
        Self::new(vec![segment])
    }
}

impl FromIterator<Segment> for YamlPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Traversal for YamlPath {
    /// Threads `start` through each segment in turn, feeding every endpoint
    /// of one step into the next.
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        let mut result: Endpoints<'s, T> = Box::new(std::iter::once(start));
        for segment in &self.segments {
            result = Box::new(result.flat_map(move |node| node.step_ambiguously(segment)));
        }
        result
    }

    /// Every segment moves the cursor, so only the empty path stays put.
    fn can_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
