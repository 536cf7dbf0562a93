//! Same-depth traversal over the Fibonacci-word tree
//!
//! `next`/`previous` walk the infinite left-to-right sequence of nodes
//! at a fixed depth by propagating through the parent level and
//! re-descending, materializing nodes along the way as needed.

use super::{FibonacciTree, Letter, NodeId};

impl FibonacciTree {
    /// Node immediately to the right of `id` at the same depth
    ///
    /// A B-node whose parent also owns an A-child steps to that
    /// sibling; otherwise the step propagates to the parent's
    /// successor and re-enters through its B-child. The root has no
    /// successor.
    pub fn next(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        if self.letter(id) == Letter::B {
            if let Some(sibling) = self.a_child(parent) {
                return Some(sibling);
            }
        }
        let next_parent = self.next(parent)?;
        Some(self.b_child(next_parent))
    }

    /// Node immediately to the left of `id` at the same depth
    ///
    /// Inverse of [`FibonacciTree::next`]: an A-node steps to its
    /// B-sibling; a B-node re-enters the parent's predecessor through
    /// its A-child when that exists, else its B-child. The leftmost
    /// node of every depth (and the root) has no predecessor.
    pub fn previous(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        if self.letter(id) == Letter::A {
            return Some(self.b_child(parent));
        }
        let prev_parent = self.previous(parent)?;
        match self.a_child(prev_parent) {
            Some(a) => Some(a),
            None => Some(self.b_child(prev_parent)),
        }
    }

    /// All nodes at `depth` below `id`, left to right
    ///
    /// With `id` = root this is the full row of the tree at that
    /// depth; row lengths follow the Fibonacci numbers.
    pub fn nodes_at_depth(&mut self, id: NodeId, depth: usize) -> Vec<NodeId> {
        if depth == 0 {
            return vec![id];
        }
        let b = self.b_child(id);
        let mut row = self.nodes_at_depth(b, depth - 1);
        if let Some(a) = self.a_child(id) {
            row.extend(self.nodes_at_depth(a, depth - 1));
        }
        row
    }

    /// The Fibonacci-word prefix spelled by the row at `depth`
    pub fn letters_at_depth(&mut self, depth: usize) -> Vec<Letter> {
        let root = self.root();
        self.nodes_at_depth(root, depth)
            .into_iter()
            .map(|id| self.letter(id))
            .collect()
    }
}
