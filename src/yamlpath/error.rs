//! Error types for building paths and traversals.
//!
//! These only cover contract violations detected while a path or combinator
//! is being constructed. A traversal that finds nothing is not an error: it
//! simply yields no endpoints.

use thiserror::Error;

/// Errors raised when a segment code or a combinator is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YamlPathError {
    /// A segment code with no type character at all.
    #[error("Empty segment code")]
    EmptyCode,

    /// The leading character is not one of `.`, `&`, `[` or `*`.
    #[error("Unrecognized segment type '{found}' in code '{code}'")]
    UnknownSegmentType { code: String, found: char },

    /// An index segment whose value is not a decimal integer.
    #[error("Invalid index '{value}' in segment code '{code}'")]
    InvalidIndex { code: String, value: String },

    /// The any-child code carries no value.
    #[error("Unexpected value after '*' in segment code '{code}'")]
    UnexpectedValue { code: String },

    /// One side of an alternative is the empty traversal.
    #[error("Alternative operand is the empty path: {operand}")]
    EmptyAlternative { operand: String },

    /// A repeated step that can match without moving would never terminate.
    #[error("Repeated step can be empty: {step}")]
    EmptyRepeatStep { step: String },
}
