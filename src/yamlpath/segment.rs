//! Atomic traversal steps.

use super::error::YamlPathError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One indivisible step of a path.
///
/// Every variant except [`Segment::AnyChild`] moves along exactly one edge
/// of the tree or fails; `AnyChild` fans out to every child, still exactly
/// one edge deeper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The value mapped to a key
    ValAtKey(String),
    /// The key node itself
    KeyAtKey(String),
    /// An element of a sequence (or a document of a file)
    AtIndex(isize),
    /// Every immediate child
    AnyChild,
}

const VAL_AT_KEY: char = '.';
const KEY_AT_KEY: char = '&';
const AT_INDEX: char = '[';
const ANY_CHILD: char = '*';

impl Segment {
    pub fn value_at(key: impl Into<String>) -> Self {
        Segment::ValAtKey(key.into())
    }

    pub fn key_at(key: impl Into<String>) -> Self {
        Segment::KeyAtKey(key.into())
    }

    pub fn at_index(index: isize) -> Self {
        Segment::AtIndex(index)
    }

    pub fn any_child() -> Self {
        Segment::AnyChild
    }

    /// Only the wildcard can reach more than one node.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Segment::AnyChild)
    }

    /// The key this segment looks up, for the keyed variants.
    pub fn key(&self) -> Option<&str> {
        match self {
            Segment::ValAtKey(key) | Segment::KeyAtKey(key) => Some(key),
            _ => None,
        }
    }

    /// Compact form: a type character followed by the value.
    ///
    /// ```
    /// use yamlnav::yamlpath::Segment;
    ///
    /// assert_eq!(Segment::value_at("a.b").encode(), ".a.b");
    /// assert_eq!(Segment::at_index(3).encode(), "[3");
    /// assert_eq!(Segment::any_child().encode(), "*");
    /// ```
    pub fn encode(&self) -> String {
        match self {
            Segment::ValAtKey(key) => format!("{}{}", VAL_AT_KEY, key),
            Segment::KeyAtKey(key) => format!("{}{}", KEY_AT_KEY, key),
            Segment::AtIndex(index) => format!("{}{}", AT_INDEX, index),
            Segment::AnyChild => ANY_CHILD.to_string(),
        }
    }

    /// Inverse of [`encode`](Segment::encode).
    ///
    /// # Errors
    ///
    /// Fails on an empty code, an unknown type character, a non-decimal
    /// index or a value following `*`.
    pub fn decode(code: &str) -> Result<Self, YamlPathError> {
        let mut chars = code.chars();
        let type_char = chars.next().ok_or(YamlPathError::EmptyCode)?;
        let value = chars.as_str();
        match type_char {
            VAL_AT_KEY => Ok(Segment::ValAtKey(value.to_string())),
            KEY_AT_KEY => Ok(Segment::KeyAtKey(value.to_string())),
            AT_INDEX => value
                .parse::<isize>()
                .map(Segment::AtIndex)
                .map_err(|_| YamlPathError::InvalidIndex {
                    code: code.to_string(),
                    value: value.to_string(),
                }),
            ANY_CHILD if value.is_empty() => Ok(Segment::AnyChild),
            ANY_CHILD => Err(YamlPathError::UnexpectedValue {
                code: code.to_string(),
            }),
            found => Err(YamlPathError::UnknownSegmentType {
                code: code.to_string(),
                found,
            }),
        }
    }

    /// Navigation form, used for every segment after the first one of a
    /// printed path: `.key`, `&key`, `[3]`, `[*]`. Keys containing a dot are
    /// bracketed so the printed path does not split them.
    pub fn to_nav_string(&self) -> String {
        match self {
            Segment::ValAtKey(key) if key.contains('.') => format!("[{}]", key),
            Segment::ValAtKey(key) => format!(".{}", key),
            Segment::KeyAtKey(key) if key.contains('.') => format!("&[{}]", key),
            Segment::KeyAtKey(key) => format!("&{}", key),
            Segment::AtIndex(index) => format!("[{}]", index),
            Segment::AnyChild => "[*]".to_string(),
        }
    }

    /// Property form, used for the first segment of a printed path. Differs
    /// from the navigation form only in dropping the leading dot of a
    /// value-at-key step.
    pub fn to_prop_string(&self) -> String {
        match self {
            Segment::ValAtKey(key) if !key.contains('.') => key.clone(),
            _ => self.to_nav_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_nav_string())
    }
}

impl From<Segment> for String {
    fn from(segment: Segment) -> Self {
        segment.encode()
    }
}

impl TryFrom<String> for Segment {
    type Error = YamlPathError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Segment::decode(&code)
    }
}

// Serialized as the encoded code, e.g. `".name"` or `"[3"`.
impl Serialize for Segment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.encode().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Segment::decode(&code).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for Segment {
    type Err = YamlPathError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Segment::decode(code)
    }
}
