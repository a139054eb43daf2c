//! Alternate spellings for mapping keys.
//!
//! Segment lookups are exact. A caller that wants `spring.application-name`
//! to also match `spring.applicationName` asks [`KeyAliases`] for a
//! traversal that tries every spelling.

use super::error::YamlPathError;
use super::segment::Segment;
use super::traversal::{Traversal, YamlTraversal};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maps a canonical key to the other spellings it may appear under.
///
/// # Example
///
/// ```
/// use yamlnav::yamlpath::KeyAliases;
///
/// let mut aliases = KeyAliases::new();
/// aliases.insert("application-name", ["applicationName", "application_name"]);
///
/// let keys: Vec<_> = aliases.keys_for("application-name").collect();
/// assert_eq!(keys, vec!["application-name", "applicationName", "application_name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyAliases {
    aliases: IndexMap<String, Vec<String>>,
}

impl KeyAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds spellings for `key`, after any it already has. Duplicates and
    /// the key itself are skipped.
    pub fn insert<I, S>(&mut self, key: impl Into<String>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        let entry = self.aliases.entry(key.clone()).or_default();
        for alias in aliases {
            let alias = alias.into();
            if alias != key && !entry.contains(&alias) {
                entry.push(alias);
            }
        }
    }

    /// The other spellings of `key`, in insertion order.
    pub fn aliases_of(&self, key: &str) -> &[String] {
        self.aliases.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// `key` itself followed by its aliases.
    pub fn keys_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(key).chain(self.aliases_of(key).iter().map(String::as_str))
    }

    /// A traversal to the value at `key` under any of its spellings.
    ///
    /// Without aliases this is the plain value-at-key segment; otherwise it
    /// is an alternative over every spelling, the canonical one first.
    ///
    /// # Errors
    ///
    /// Propagates [`YamlPathError`] from building the alternative.
    pub fn value_at(&self, key: &str) -> Result<YamlTraversal, YamlPathError> {
        self.aliases_of(key).iter().try_fold(
            YamlTraversal::from(Segment::value_at(key)),
            |traversal, alias| traversal.or(Segment::value_at(alias.as_str())),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }
}

impl<K, V, S> FromIterator<(K, V)> for KeyAliases
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut aliases = KeyAliases::new();
        for (key, spellings) in iter {
            aliases.insert(key, spellings);
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;
    use crate::yamlpath::cursor::NodeCursor;

    fn sample() -> KeyAliases {
        [("image-name", vec!["imageName"])].into_iter().collect()
    }

    #[test]
    fn test_value_at_without_aliases_is_a_segment() {
        let aliases = KeyAliases::new();
        assert_eq!(
            aliases.value_at("name").unwrap(),
            YamlTraversal::from(Segment::value_at("name"))
        );
        assert_eq!(aliases.keys_for("name").collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_value_at_tries_every_spelling() {
        let file = parse_yaml("imageName: nginx\n").unwrap();
        let doc = NodeCursor::new(file.document(0).unwrap());
        let traversal = sample().value_at("image-name").unwrap();
        assert!(matches!(traversal, YamlTraversal::Alternative(_)));

        let found: Vec<_> = traversal
            .traverse_ambiguously(doc)
            .filter_map(|c| c.node().as_scalar())
            .collect();
        assert_eq!(found, vec!["nginx"]);
    }

    #[test]
    fn test_value_at_folds_spellings_in_order() {
        let aliases: KeyAliases = [("env", vec!["environment", "stage"])].into_iter().collect();
        let traversal = aliases.value_at("env").unwrap();
        assert_eq!(
            traversal.to_string(),
            "((YamlPath(.env) or YamlPath(.environment)) or YamlPath(.stage))"
        );

        let file = parse_yaml("stage: prod
environment: dev
").unwrap();
        let doc = NodeCursor::new(file.document(0).unwrap());
        let found: Vec<_> = traversal
            .traverse_ambiguously(doc)
            .filter_map(|c| c.node().as_scalar())
            .collect();
        assert_eq!(found, vec!["dev", "prod"]);
    }

    #[test]
    fn test_canonical_spelling_comes_first() {
        let file = parse_yaml("imageName: b\nimage-name: a\n").unwrap();
        let doc = NodeCursor::new(file.document(0).unwrap());
        let first = sample().value_at("image-name").unwrap().traverse(doc).unwrap();
        assert_eq!(first.node().as_scalar(), Some("a"));
    }

    #[test]
    fn test_insert_skips_duplicates_and_self() {
        let mut aliases = KeyAliases::new();
        aliases.insert("a", ["b", "a", "b"]);
        aliases.insert("a", ["c"]);
        assert_eq!(aliases.aliases_of("a"), &["b".to_string(), "c".to_string()]);
        assert!(aliases.aliases_of("zzz").is_empty());
        assert_eq!(aliases.len(), 1);
    }

    #[test]
    fn test_deserializes_from_table() {
        let aliases: KeyAliases =
            serde_json::from_str(r#"{"image-name": ["imageName"], "env": ["environment"]}"#)
                .unwrap();
        assert_eq!(aliases.aliases_of("env"), &["environment".to_string()]);
        assert_eq!(aliases.len(), 2);
    }
}
