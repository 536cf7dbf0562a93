//! Lazy infinite tree of the Fibonacci word
//!
//! Each node carries a letter, B or A. A B-node splits into a B-child
//! and an A-child; an A-node has only a B-child. Reading the nodes at
//! any fixed depth left to right spells a prefix-closed rendition of
//! the Fibonacci word:
//!
//! ```text
//! |- - - - - - - -B- - - - - - - -|
//! |- - - - -B- - - - -|- - -A- - -|
//! |- - -B- - -|- -A- -|- - -B- - -|
//! |- -B- -|-A-|- -B- -|- -B- -|-A-|
//! ```
//!
//! The tree is conceptually infinite and expanded on first access.
//! Nodes live in an arena and are addressed by [`NodeId`]; once
//! materialized, a node's id, letter, depth and index path never
//! change, so repeated lookups of the same path return the same node.

mod node;
mod traversal;

pub use node::{IndexPath, Letter, NodeId};

use node::Node;

use crate::ClockError;

/// Arena-backed Fibonacci-word tree
///
/// Creation methods take `&mut self` because they may materialize new
/// arena slots; all accessors on existing nodes are `&self`. After the
/// working subtree has been materialized the tree is read-only and may
/// be shared freely across threads.
#[derive(Debug)]
pub struct FibonacciTree {
    nodes: Vec<Node>,
}

impl FibonacciTree {
    /// Create a tree containing only the root, a depth-0 B-node
    pub fn new() -> Self {
        let root = Node {
            letter: Letter::B,
            parent: None,
            depth: 0,
            path: IndexPath::root(),
            b_child: None,
            a_child: None,
        };
        FibonacciTree { nodes: vec![root] }
    }

    /// The canonical root node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of materialized nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Letter of a materialized node
    #[inline]
    pub fn letter(&self, id: NodeId) -> Letter {
        self.nodes[id.index()].letter
    }

    /// Depth of a materialized node (0 at the root)
    #[inline]
    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id.index()].depth
    }

    /// Parent of a materialized node, `None` for the root
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Index path addressing a materialized node from the root
    #[inline]
    pub fn path(&self, id: NodeId) -> &IndexPath {
        &self.nodes[id.index()].path
    }

    /// Letter of a node's parent, `None` for the root
    pub fn parent_letter(&self, id: NodeId) -> Option<Letter> {
        self.parent(id).map(|p| self.letter(p))
    }

    /// Child by selector: 0 is the B-child, 1 is the A-child
    ///
    /// Fails with `NotFound` when selector 1 is requested on an A-node
    /// (A-nodes have no A-child) or the selector is out of range.
    pub fn child(&mut self, id: NodeId, selector: u8) -> Result<NodeId, ClockError> {
        match selector {
            0 => Ok(self.b_child(id)),
            1 => self.a_child(id).ok_or_else(|| ClockError::NotFound {
                path: self.nodes[id.index()].path.child(1).to_string(),
            }),
            _ => Err(ClockError::NotFound {
                path: format!("{}{selector}", self.nodes[id.index()].path),
            }),
        }
    }

    /// B-child of a node, materializing it on first access
    pub fn b_child(&mut self, id: NodeId) -> NodeId {
        if let Some(child) = self.nodes[id.index()].b_child {
            return child;
        }
        let child = self.push_child(id, Letter::B, 0);
        self.nodes[id.index()].b_child = Some(child);
        child
    }

    /// A-child of a node, materializing it on first access
    ///
    /// `None` when the node's letter is A. This asymmetry is the
    /// defining recursive rule of the Fibonacci word.
    pub fn a_child(&mut self, id: NodeId) -> Option<NodeId> {
        if self.nodes[id.index()].letter == Letter::A {
            return None;
        }
        if let Some(child) = self.nodes[id.index()].a_child {
            return Some(child);
        }
        let child = self.push_child(id, Letter::A, 1);
        self.nodes[id.index()].a_child = Some(child);
        Some(child)
    }

    /// Resolve an index path from the root
    ///
    /// Fails with `NotFound` if any segment requests the A-child of an
    /// A-node. Resolution is idempotent: the same path always yields
    /// the same node id.
    pub fn node_at(&mut self, path: &IndexPath) -> Result<NodeId, ClockError> {
        let mut id = self.root();
        for &selector in path.selectors() {
            id = self.child(id, selector)?;
        }
        Ok(id)
    }

    fn push_child(&mut self, parent: NodeId, letter: Letter, selector: u8) -> NodeId {
        let depth = self.nodes[parent.index()].depth + 1;
        let path = self.nodes[parent.index()].path.child(selector);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            letter,
            parent: Some(parent),
            depth,
            path,
            b_child: None,
            a_child: None,
        });
        id
    }
}

impl Default for FibonacciTree {
    fn default() -> Self {
        FibonacciTree::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_letter_b() {
        let tree = FibonacciTree::new();
        assert_eq!(tree.letter(tree.root()), Letter::B);
        assert_eq!(tree.depth(tree.root()), 0);
        assert!(tree.path(tree.root()).is_empty());
    }

    #[test]
    fn test_child_letters_follow_substitution() {
        // B → BA, A → B
        let mut tree = FibonacciTree::new();
        let root = tree.root();
        let b = tree.child(root, 0).unwrap();
        let a = tree.child(root, 1).unwrap();
        assert_eq!(tree.letter(b), Letter::B);
        assert_eq!(tree.letter(a), Letter::A);

        // The A-node only has a B-child
        let a_b_child = tree.b_child(a);
        assert_eq!(tree.letter(a_b_child), Letter::B);
        assert!(tree.child(a, 1).is_err());
        assert!(tree.a_child(a).is_none());
    }

    #[test]
    fn test_lookups_are_referentially_stable() {
        let mut tree = FibonacciTree::new();
        let path: IndexPath = "0101".parse().unwrap();
        let first = tree.node_at(&path).unwrap();
        let second = tree.node_at(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.path(first), &path);
        assert_eq!(tree.depth(first), 4);
    }

    #[test]
    fn test_bad_selector_is_not_found() {
        let mut tree = FibonacciTree::new();
        let root = tree.root();
        assert!(matches!(
            tree.child(root, 2),
            Err(ClockError::NotFound { .. })
        ));
    }

    #[test]
    fn test_parent_backlinks() {
        let mut tree = FibonacciTree::new();
        let path: IndexPath = "010".parse().unwrap();
        let node = tree.node_at(&path).unwrap();
        let parent = tree.parent(node).unwrap();
        assert_eq!(tree.path(parent).to_string(), "01");
        assert_eq!(tree.parent_letter(node), Some(tree.letter(parent)));
    }
}
