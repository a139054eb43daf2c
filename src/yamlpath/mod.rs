//! Path traversal over YAML trees.
//!
//! A [`YamlPath`] is a list of [`Segment`]s such as `.spec`, `&name`, `[0]`
//! or `[*]`. Paths compose with the combinators of [`combinators`] into a
//! [`YamlTraversal`], and any traversal can be run from any [`Navigable`]
//! start point. The [`cursor`] module provides the start points for parsed
//! files.
//!
//! Traversals are lazy and may be ambiguous: [`Traversal::traverse_ambiguously`]
//! yields every endpoint in order, [`Traversal::traverse`] only the first.
//!
//! # Examples
//!
//! ```
//! use yamlnav::document::parser::parse_yaml;
//! use yamlnav::yamlpath::{Segment, Traversal, YamlPath};
//!
//! let file = parse_yaml("jobs:\n  build: {image: rust}\n  test: {image: alpine}\n").unwrap();
//!
//! let images = YamlPath::from_property("jobs")
//!     .prepend(Segment::at_index(0))
//!     .then(Segment::any_child())
//!     .then(Segment::value_at("image"));
//!
//! let found: Vec<_> = images
//!     .traverse_ambiguously(file.root_cursor())
//!     .filter_map(|c| c.node()?.as_scalar())
//!     .collect();
//! assert_eq!(found, vec!["rust", "alpine"]);
//! ```

pub mod aliases;
pub mod combinators;
pub mod cursor;
pub mod error;
pub mod navigable;
pub mod path;
pub mod segment;
pub mod traversal;

pub use aliases::KeyAliases;
pub use combinators::{Alternative, Filtering, Repeating, Sequencing};
pub use cursor::{NodeCursor, RootCursor, YamlCursor};
pub use error::YamlPathError;
pub use navigable::{Endpoints, Navigable};
pub use path::YamlPath;
pub use segment::Segment;
pub use traversal::{Traversal, YamlTraversal};
