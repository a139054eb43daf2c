//! Parsed YAML documents.
//!
//! [`parser`] turns YAML text into a [`tree::YamlFile`] whose nodes
//! ([`node::YamlNode`]) carry their character span, line and column.

pub mod node;
pub mod parser;
pub mod tree;
