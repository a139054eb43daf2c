//! The traversal contract and the composite traversal value.

use super::combinators::{Alternative, Filtering, Repeating, Sequencing};
use super::error::YamlPathError;
use super::navigable::{Endpoints, Navigable};
use super::path::YamlPath;
use super::segment::Segment;
use std::fmt;

/// Something that, given a start node, produces the nodes it leads to.
///
/// Implemented by [`Segment`], [`YamlPath`], the combinators and
/// [`YamlTraversal`]. Evaluation is lazy: endpoints are computed as the
/// returned iterator is pulled.
pub trait Traversal {
    /// Every endpoint reachable from `start`, in stream order.
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T>;

    /// True if some endpoint may be the start node itself.
    fn can_empty(&self) -> bool;

    /// True only for the traversal that never moves (the empty path).
    fn is_empty(&self) -> bool {
        false
    }

    /// The first endpoint, silently ignoring any others.
    fn traverse<T: Navigable>(&self, start: T) -> Option<T> {
        self.traverse_ambiguously(start).next()
    }

    /// `self` followed by `other`.
    fn then(self, other: impl Into<YamlTraversal>) -> YamlTraversal
    where
        Self: Sized + Into<YamlTraversal>,
    {
        YamlTraversal::sequence(self.into(), other.into())
    }

    /// Endpoints of `self` followed by those of `other`.
    ///
    /// # Errors
    ///
    /// Fails if either side is the empty traversal.
    fn or(self, other: impl Into<YamlTraversal>) -> Result<YamlTraversal, YamlPathError>
    where
        Self: Sized + Into<YamlTraversal>,
    {
        Alternative::new(self.into(), other.into()).map(YamlTraversal::Alternative)
    }

    /// Zero or more repetitions of `self`.
    ///
    /// # Errors
    ///
    /// Fails if `self` can match without moving.
    fn repeat(self) -> Result<YamlTraversal, YamlPathError>
    where
        Self: Sized + Into<YamlTraversal>,
    {
        match self.into() {
            repeat @ YamlTraversal::Repeat(_) => Ok(repeat),
            step => Repeating::new(step).map(YamlTraversal::Repeat),
        }
    }

    /// `min` or more repetitions of `self`.
    fn repeat_at_least(self, min: usize) -> Result<YamlTraversal, YamlPathError>
    where
        Self: Sized + Into<YamlTraversal>,
    {
        let step = self.into();
        let repeated = step.clone().repeat()?;
        let mut result = YamlTraversal::empty();
        for _ in 0..min {
            result = result.then(step.clone());
        }
        Ok(result.then(repeated))
    }

    /// Endpoints of `self` from which `check` reaches something.
    fn has(self, check: impl Into<YamlTraversal>) -> YamlTraversal
    where
        Self: Sized + Into<YamlTraversal>,
    {
        YamlTraversal::Filter(Filtering::new(self.into(), check.into()))
    }
}

/// Any traversal: a plain path or a combinator tree.
///
/// Built through the [`Traversal`] builder methods, which keep the tree
/// normalized: empty operands of `then` disappear and adjacent segments and
/// paths merge into one [`YamlPath`]. Two traversals built from the same
/// pieces therefore compare equal.
///
/// # Example
///
/// ```
/// use yamlnav::yamlpath::{Segment, Traversal, YamlPath, YamlTraversal};
///
/// let jobs = YamlPath::from_property("jobs").then(Segment::any_child());
/// assert_eq!(
///     jobs,
///     YamlTraversal::Path(YamlPath::new(vec![Segment::value_at("jobs"), Segment::any_child()]))
/// );
///
/// let steps = YamlPath::from_property("plan")
///     .then(Segment::any_child().repeat_at_least(1).unwrap())
///     .has(Segment::key_at("get").or(Segment::key_at("put")).unwrap());
/// assert!(!steps.can_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum YamlTraversal {
    Path(YamlPath),
    Sequence(Sequencing),
    Alternative(Alternative),
    Repeat(Repeating),
    Filter(Filtering),
}

impl YamlTraversal {
    /// The traversal that stays where it starts.
    pub fn empty() -> Self {
        YamlTraversal::Path(YamlPath::EMPTY)
    }

    /// Normalizing sequence constructor behind [`Traversal::then`].
    pub fn sequence(first: YamlTraversal, second: YamlTraversal) -> Self {
        if first.is_empty() {
            return second;
        }
        if second.is_empty() {
            return first;
        }
        match (first, second) {
            (YamlTraversal::Path(a), YamlTraversal::Path(b)) => {
                log::trace!("merging {} and {} into one path", a, b);
                YamlTraversal::Path(a.concat(&b))
            }
            (first, second) => YamlTraversal::Sequence(Sequencing::new(first, second)),
        }
    }

    /// The underlying path, if this traversal is one.
    pub fn as_path(&self) -> Option<&YamlPath> {
        match self {
            YamlTraversal::Path(path) => Some(path),
            _ => None,
        }
    }
}

impl Traversal for YamlTraversal {
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        match self {
            YamlTraversal::Path(path) => path.traverse_ambiguously(start),
            YamlTraversal::Sequence(seq) => seq.traverse_ambiguously(start),
            YamlTraversal::Alternative(alt) => alt.traverse_ambiguously(start),
            YamlTraversal::Repeat(rep) => rep.traverse_ambiguously(start),
            YamlTraversal::Filter(filter) => filter.traverse_ambiguously(start),
        }
    }

    fn can_empty(&self) -> bool {
        match self {
            YamlTraversal::Path(path) => path.can_empty(),
            YamlTraversal::Sequence(seq) => seq.can_empty(),
            YamlTraversal::Alternative(alt) => alt.can_empty(),
            YamlTraversal::Repeat(rep) => rep.can_empty(),
            YamlTraversal::Filter(filter) => filter.can_empty(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, YamlTraversal::Path(path) if path.is_empty())
    }
}

impl fmt::Display for YamlTraversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YamlTraversal::Path(path) => write!(f, "{}", path),
            YamlTraversal::Sequence(seq) => write!(f, "({} then {})", seq.first(), seq.second()),
            YamlTraversal::Alternative(alt) => write!(f, "({} or {})", alt.left(), alt.right()),
            YamlTraversal::Repeat(rep) => write!(f, "({})*", rep.step()),
            YamlTraversal::Filter(filter) => {
                write!(f, "({} has {})", filter.target(), filter.check())
            }
        }
    }
}

impl From<YamlPath> for YamlTraversal {
    fn from(path: YamlPath) -> Self {
        YamlTraversal::Path(path)
    }
}

impl From<Segment> for YamlTraversal {
    fn from(segment: Segment) -> Self {
        YamlTraversal::Path(segment.into())
    }
}

impl From<Sequencing> for YamlTraversal {
    fn from(seq: Sequencing) -> Self {
        YamlTraversal::Sequence(seq)
    }
}

impl From<Alternative> for YamlTraversal {
    fn from(alt: Alternative) -> Self {
        YamlTraversal::Alternative(alt)
    }
}

impl From<Repeating> for YamlTraversal {
    fn from(rep: Repeating) -> Self {
        YamlTraversal::Repeat(rep)
    }
}

impl From<Filtering> for YamlTraversal {
    fn from(filter: Filtering) -> Self {
        YamlTraversal::Filter(filter)
    }
}

impl Traversal for Segment {
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        start.step_ambiguously(self)
    }

    fn can_empty(&self) -> bool {
        false
    }
}
