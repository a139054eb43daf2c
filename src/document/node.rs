//! YAML node representation with source position tracking.
//!
//! Every node produced by the parser remembers where it came from in the
//! original text, so that a traversal endpoint can be turned back into a
//! location for highlighting or completion anchoring.
//!
//! # Example
//!
//! ```
//! use yamlnav::document::node::{Scalar, YamlNode, YamlValue};
//!
//! let node = YamlNode::new(YamlValue::Scalar(Scalar::plain("hello")));
//! assert_eq!(node.as_scalar(), Some("hello"));
//! assert!(!node.is_mapping());
//! ```

/// A range of character indices in the original YAML source.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
pub struct TextSpan {
    /// Start character index
    pub start: usize,
    /// End character index (exclusive)
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if `offset` falls inside this span. The end is inclusive
    /// so that a caret placed right after a scalar still hits it.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A scalar value, kept as its (unescaped) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub text: String,
    pub style: ScalarStyle,
}

impl Scalar {
    pub fn new(text: impl Into<String>, style: ScalarStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, ScalarStyle::Plain)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// One `key: value` pair of a mapping.
///
/// Keys are full nodes: YAML allows sequences and mappings as keys, and a
/// key-at-key traversal hands the key node itself back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub key: YamlNode,
    pub value: YamlNode,
}

impl MappingEntry {
    pub fn new(key: YamlNode, value: YamlNode) -> Self {
        Self { key, value }
    }

    /// The key's scalar text, if the key is a scalar.
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_scalar()
    }
}

/// The shape of a YAML node.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// A mapping, entries in source order
    Mapping(Vec<MappingEntry>),
    /// A sequence, elements in source order
    Sequence(Vec<YamlNode>),
    /// Any scalar (strings, numbers, booleans and null alike)
    Scalar(Scalar),
}

impl YamlValue {
    pub fn is_mapping(&self) -> bool {
        matches!(self, YamlValue::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, YamlValue::Sequence(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, YamlValue::Scalar(_))
    }

    /// Short human readable name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            YamlValue::Mapping(_) => "mapping",
            YamlValue::Sequence(_) => "sequence",
            YamlValue::Scalar(_) => "scalar",
        }
    }
}

/// A YAML value together with the place it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) span: TextSpan,
    /// 1-based line of the node start
    pub(crate) line: usize,
    /// 1-based column of the node start
    pub(crate) col: usize,
}

impl YamlNode {
    /// Creates a node that has no source position (line and column 0).
    pub fn new(value: YamlValue) -> Self {
        Self {
            value,
            span: TextSpan::default(),
            line: 0,
            col: 0,
        }
    }

    pub fn with_position(value: YamlValue, span: TextSpan, line: usize, col: usize) -> Self {
        Self {
            value,
            span,
            line,
            col,
        }
    }

    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    pub fn span(&self) -> TextSpan {
        self.span
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_mapping(&self) -> bool {
        self.value.is_mapping()
    }

    pub fn is_sequence(&self) -> bool {
        self.value.is_sequence()
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            YamlValue::Scalar(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn entries(&self) -> Option<&[MappingEntry]> {
        match &self.value {
            YamlValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[YamlNode]> {
        match &self.value {
            YamlValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Finds the entry whose key scalar equals `key` exactly.
    pub fn entry(&self, key: &str) -> Option<&MappingEntry> {
        self.entries()?
            .iter()
            .find(|entry| entry.key_str() == Some(key))
    }

    /// Shortcut for the scalar text at `key` in a mapping node.
    pub fn scalar_property(&self, key: &str) -> Option<&str> {
        self.entry(key)?.value.as_scalar()
    }

    /// Number of direct children (map entries or sequence items).
    pub fn len(&self) -> usize {
        match &self.value {
            YamlValue::Mapping(entries) => entries.len(),
            YamlValue::Sequence(items) => items.len(),
            YamlValue::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&YamlNode> for serde_yaml::Value {
    fn from(node: &YamlNode) -> Self {
        match &node.value {
            YamlValue::Mapping(entries) => serde_yaml::Value::Mapping(
                entries
                    .iter()
                    .map(|entry| ((&entry.key).into(), (&entry.value).into()))
                    .collect(),
            ),
            YamlValue::Sequence(items) => {
                serde_yaml::Value::Sequence(items.iter().map(Into::into).collect())
            }
            YamlValue::Scalar(scalar) => scalar_to_serde(scalar),
        }
    }
}

/// Plain scalars get YAML's core-schema typing, quoted and block scalars
/// always stay strings.
fn scalar_to_serde(scalar: &Scalar) -> serde_yaml::Value {
    if scalar.style != ScalarStyle::Plain {
        return serde_yaml::Value::String(scalar.text.clone());
    }
    let text = scalar.text.as_str();
    if let Ok(i) = text.parse::<i64>() {
        return serde_yaml::Value::Number(i.into());
    }
    if text.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = text.parse::<f64>() {
            return serde_yaml::Value::Number(f.into());
        }
    }
    match text {
        "true" | "True" | "TRUE" => serde_yaml::Value::Bool(true),
        "false" | "False" | "FALSE" => serde_yaml::Value::Bool(false),
        "null" | "Null" | "NULL" | "~" | "" => serde_yaml::Value::Null,
        _ => serde_yaml::Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(text: &str) -> YamlNode {
        YamlNode::new(YamlValue::Scalar(Scalar::plain(text)))
    }

    fn mapping(pairs: &[(&str, YamlNode)]) -> YamlNode {
        YamlNode::new(YamlValue::Mapping(
            pairs
                .iter()
                .map(|(k, v)| MappingEntry::new(scalar(k), v.clone()))
                .collect(),
        ))
    }

    #[test]
    fn test_text_span_contains() {
        let span = TextSpan::new(5, 10);
        assert!(span.contains(5));
        assert!(span.contains(10));
        assert!(!span.contains(4));
        assert!(!span.contains(11));
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_entry_lookup_is_exact() {
        let node = mapping(&[("name", scalar("a")), ("Name", scalar("b"))]);
        assert_eq!(node.scalar_property("name"), Some("a"));
        assert_eq!(node.scalar_property("Name"), Some("b"));
        assert_eq!(node.scalar_property("NAME"), None);
    }

    #[test]
    fn test_entry_skips_non_scalar_keys() {
        let complex_key = YamlNode::new(YamlValue::Sequence(vec![scalar("x")]));
        let node = YamlNode::new(YamlValue::Mapping(vec![MappingEntry::new(
            complex_key,
            scalar("v"),
        )]));
        assert!(node.entry("x").is_none());
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_len_by_kind() {
        assert_eq!(scalar("x").len(), 0);
        let seq = YamlNode::new(YamlValue::Sequence(vec![scalar("a"), scalar("b")]));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.value().kind(), "sequence");
    }

    #[test]
    fn test_to_serde_value_types_plain_scalars() {
        let node = mapping(&[
            ("count", scalar("42")),
            ("on", scalar("true")),
            ("nothing", scalar("~")),
            (
                "quoted",
                YamlNode::new(YamlValue::Scalar(Scalar::new("42", ScalarStyle::DoubleQuoted))),
            ),
        ]);
        let value: serde_yaml::Value = (&node).into();
        assert_eq!(value["count"], serde_yaml::Value::Number(42.into()));
        assert_eq!(value["on"], serde_yaml::Value::Bool(true));
        assert_eq!(value["nothing"], serde_yaml::Value::Null);
        assert_eq!(value["quoted"], serde_yaml::Value::String("42".into()));
    }
}
