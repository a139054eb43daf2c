//! Generic composition operators over traversals.
//!
//! None of these know anything about YAML: each one only asks its operands
//! for their endpoints and rearranges the resulting streams. Build them
//! through the [`Traversal`] builder methods (`then`, `or`, `repeat`, `has`)
//! rather than directly, so trivial operands get normalized away.

use super::error::YamlPathError;
use super::navigable::{Endpoints, Navigable};
use super::traversal::{Traversal, YamlTraversal};

/// `first` followed by `second`: every endpoint of `first` is fed to `second`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequencing {
    first: Box<YamlTraversal>,
    second: Box<YamlTraversal>,
}

impl Sequencing {
    pub fn new(first: YamlTraversal, second: YamlTraversal) -> Self {
        Self {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn first(&self) -> &YamlTraversal {
        &self.first
    }

    pub fn second(&self) -> &YamlTraversal {
        &self.second
    }
}

impl Traversal for Sequencing {
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        Box::new(
            self.first
                .traverse_ambiguously(start)
                .flat_map(move |node| self.second.traverse_ambiguously(node)),
        )
    }

    fn can_empty(&self) -> bool {
        self.first.can_empty() && self.second.can_empty()
    }
}

/// Endpoints of `left` followed by endpoints of `right`, both started from
/// the same node. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alternative {
    left: Box<YamlTraversal>,
    right: Box<YamlTraversal>,
}

impl Alternative {
    /// # Errors
    ///
    /// [`YamlPathError::EmptyAlternative`] if either operand is the empty
    /// traversal.
    pub fn new(left: YamlTraversal, right: YamlTraversal) -> Result<Self, YamlPathError> {
        for operand in [&left, &right] {
            if operand.is_empty() {
                return Err(YamlPathError::EmptyAlternative {
                    operand: operand.to_string(),
                });
            }
        }
        Ok(Self {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn left(&self) -> &YamlTraversal {
        &self.left
    }

    pub fn right(&self) -> &YamlTraversal {
        &self.right
    }
}

impl Traversal for Alternative {
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        Box::new(
            self.left
                .traverse_ambiguously(start.clone())
                .chain(self.right.traverse_ambiguously(start)),
        )
    }

    fn can_empty(&self) -> bool {
        self.left.can_empty() || self.right.can_empty()
    }
}

/// Zero or more applications of `step`: the start node itself, then every
/// endpoint of repeating from each endpoint of `step`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repeating {
    step: Box<YamlTraversal>,
}

impl Repeating {
    /// # Errors
    ///
    /// [`YamlPathError::EmptyRepeatStep`] if `step` can match without
    /// moving, since repeating it would never terminate.
    pub fn new(step: YamlTraversal) -> Result<Self, YamlPathError> {
        if step.can_empty() {
            return Err(YamlPathError::EmptyRepeatStep {
                step: step.to_string(),
            });
        }
        Ok(Self {
            step: Box::new(step),
        })
    }

    pub fn step(&self) -> &YamlTraversal {
        &self.step
    }
}

impl Traversal for Repeating {
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        Box::new(
            std::iter::once(start.clone()).chain(
                self.step
                    .traverse_ambiguously(start)
                    .flat_map(move |node| self.traverse_ambiguously(node)),
            ),
        )
    }

    fn can_empty(&self) -> bool {
        true
    }
}

/// Endpoints of `target` from which `check` reaches at least one node.
/// The check only decides whether an endpoint survives, it never changes
/// which node is returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filtering {
    target: Box<YamlTraversal>,
    check: Box<YamlTraversal>,
}

impl Filtering {
    pub fn new(target: YamlTraversal, check: YamlTraversal) -> Self {
        Self {
            target: Box::new(target),
            check: Box::new(check),
        }
    }

    pub fn target(&self) -> &YamlTraversal {
        &self.target
    }

    pub fn check(&self) -> &YamlTraversal {
        &self.check
    }
}

impl Traversal for Filtering {
    fn traverse_ambiguously<'s, T: Navigable + 's>(&'s self, start: T) -> Endpoints<'s, T> {
        Box::new(
            self.target
                .traverse_ambiguously(start)
                .filter(move |node| self.check.traverse_ambiguously(node.clone()).next().is_some()),
        )
    }

    fn can_empty(&self) -> bool {
        self.target.can_empty()
    }
}
