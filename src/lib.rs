//! yamlnav - path traversal over position-tracked YAML documents.
//!
//! The crate is split in three layers:
//!
//! - [`document`] parses YAML text into a tree of nodes that remember their
//!   source positions.
//! - [`yamlpath`] defines segments, paths and traversal combinators, and the
//!   cursors that walk a parsed file.
//! - [`file`] and [`config`] support the `yamlnav` command line tool.

pub mod config;
pub mod document;
pub mod file;
pub mod yamlpath;
