//! Node representation for the Fibonacci-word tree
//!
//! Nodes live in an arena owned by the tree; a node refers to its
//! parent and children by [`NodeId`], never by pointer.

use std::fmt;
use std::str::FromStr;

use crate::ClockError;

/// Letter tag of a tree node
///
/// The branching rule of the whole structure: a B-node has two
/// children (B then A), an A-node has only a B-child. Substituting
/// B → BA and A → B level by level generates the Fibonacci word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    /// Two children: a B-child and an A-child
    B,
    /// One child: a B-child only
    A,
}

impl Letter {
    /// Number of children a node with this letter carries
    #[inline]
    pub fn child_count(self) -> usize {
        match self {
            Letter::B => 2,
            Letter::A => 1,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Letter::B => write!(f, "B"),
            Letter::A => write!(f, "A"),
        }
    }
}

/// Stable arena index of a node
///
/// Ids never change once a node is materialized; the root is always id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The canonical root id
    pub const ROOT: NodeId = NodeId(0);

    /// Arena slot index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Sequence of child selectors from the root to a node
///
/// Selector 0 descends into the B-child, selector 1 into the A-child.
/// The root's path is empty. A path is a stable address: resolving it
/// from the root always yields the same node identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexPath(Vec<u8>);

impl IndexPath {
    /// Empty path (the root)
    pub fn root() -> Self {
        IndexPath(Vec::new())
    }

    /// Build a path from raw selectors
    ///
    /// Fails with `InvalidConfig` if any selector is not 0 or 1.
    pub fn new(selectors: Vec<u8>) -> Result<Self, ClockError> {
        if let Some(&bad) = selectors.iter().find(|&&s| s > 1) {
            return Err(ClockError::InvalidConfig(format!(
                "index path selector must be 0 or 1, got {bad}"
            )));
        }
        Ok(IndexPath(selectors))
    }

    /// Path length, equal to the depth of the node it addresses
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root path
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw selector slice
    #[inline]
    pub fn selectors(&self) -> &[u8] {
        &self.0
    }

    /// Extend the path by one child selector
    pub(crate) fn child(&self, selector: u8) -> IndexPath {
        let mut selectors = self.0.clone();
        selectors.push(selector);
        IndexPath(selectors)
    }

    /// Path of the depth-`d` ancestor (truncated prefix)
    pub fn truncated(&self, depth: usize) -> IndexPath {
        IndexPath(self.0[..depth.min(self.0.len())].to_vec())
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for &s in &self.0 {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl FromStr for IndexPath {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "(root)" {
            return Ok(IndexPath::root());
        }
        let mut selectors = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => selectors.push(0),
                '1' => selectors.push(1),
                other => {
                    return Err(ClockError::InvalidConfig(format!(
                        "index path may contain only 0 and 1, got '{other}'"
                    )))
                }
            }
        }
        Ok(IndexPath(selectors))
    }
}

/// Arena entry for a single node
///
/// Letter, depth and path are fixed at creation; the child slots are
/// memoized on first access and never overwritten afterwards.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub letter: Letter,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub path: IndexPath,

    /// Lazily materialized B-child (every node has one eventually)
    pub b_child: Option<NodeId>,
    /// Lazily materialized A-child (only ever set on B-nodes)
    pub a_child: Option<NodeId>,
}
