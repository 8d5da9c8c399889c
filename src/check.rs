//! Structural verification of the red-black invariants.

use std::cmp::Ordering::Less;

use compare::Compare;
use thiserror::Error;

use crate::rbtree::{Color, Node, NodeId, RbTree};

/// The first broken invariant found by [`RbTree::validate`].
///
/// Depths count from the root, which sits at depth 0.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Violation {
    #[error("the root is red")]
    RedRoot,
    #[error("red node at depth {depth} has a red child")]
    RedRedEdge { depth: usize },
    #[error("black-height differs below the node at depth {depth}: {left} on the left, {right} on the right")]
    BlackHeightMismatch { depth: usize, left: usize, right: usize },
    #[error("node at depth {depth} does not link back to its parent")]
    BrokenParentLink { depth: usize },
    #[error("keys out of order at in-order position {position}")]
    OutOfOrder { position: usize },
    #[error("{reachable} nodes reachable from the root, but the tree holds {len}")]
    LengthMismatch { reachable: usize, len: usize },
}

struct Walk<'a, K, V, C> {
    nodes: &'a [Node<K, V>],
    cmp: &'a C,
    prev: Option<&'a K>,
    visited: usize,
}

impl<'a, K, V, C> Walk<'a, K, V, C> where C: Compare<K> {
    // Returns the number of black nodes on every path from `id` down to an
    // absent child, counting `id` itself and the absent child.
    fn subtree(&mut self, id: Option<NodeId>, parent: Option<NodeId>, depth: usize)
               -> Result<usize, Violation> {
        let id = match id {
            Some(id) => id,
            None => return Ok(1),
        };
        let nodes: &'a [Node<K, V>] = self.nodes;
        let node = &nodes[id.index()];

        if node.parent != parent {
            return Err(Violation::BrokenParentLink { depth });
        }
        if node.color == Color::Red {
            let red_child = node.child.iter()
                .flatten()
                .any(|c| nodes[c.index()].color == Color::Red);
            if red_child {
                return Err(Violation::RedRedEdge { depth });
            }
        }

        let left = self.subtree(node.child[0], Some(id), depth + 1)?;

        if let Some(prev) = self.prev {
            if self.cmp.compare(prev, &node.key) != Less {
                return Err(Violation::OutOfOrder { position: self.visited });
            }
        }
        self.prev = Some(&node.key);
        self.visited += 1;

        let right = self.subtree(node.child[1], Some(id), depth + 1)?;

        if left != right {
            return Err(Violation::BlackHeightMismatch { depth, left, right });
        }
        Ok(left + if node.color == Color::Black { 1 } else { 0 })
    }
}

impl<K, V, C> RbTree<K, V, C> where C: Compare<K> {
    /// Walks the whole tree and checks every red-black invariant.
    ///
    /// On success returns the black-height of the root: the number of black
    /// nodes on any path from the root down to an absent child, not counting
    /// the root itself but counting the absent child. An empty tree has
    /// black-height 0.
    ///
    /// ```
    /// use redblack::RbTree;
    ///
    /// let map: RbTree<_, _> = (1..=7).map(|k| (k, ())).collect();
    /// assert_eq!(map.validate(), Ok(2));
    /// ```
    pub fn validate(&self) -> Result<usize, Violation> {
        let root = match self.root_id() {
            Some(root) => root,
            None if self.is_empty() => return Ok(0),
            None => return Err(Violation::LengthMismatch { reachable: 0, len: self.len() }),
        };
        if self[root].color == Color::Red {
            return Err(Violation::RedRoot);
        }

        let mut walk = Walk { nodes: self.nodes(), cmp: self.cmp(), prev: None, visited: 0 };
        let black = walk.subtree(Some(root), None, 0)?;
        if walk.visited != self.len() {
            return Err(Violation::LengthMismatch { reachable: walk.visited, len: self.len() });
        }
        Ok(black - 1)
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        fn go<K, V>(nodes: &[Node<K, V>], id: Option<NodeId>) -> usize {
            match id {
                None => 0,
                Some(id) => {
                    let node = &nodes[id.index()];
                    1 + go(nodes, node.child[0]).max(go(nodes, node.child[1]))
                }
            }
        }
        go(self.nodes(), self.root_id())
    }
}
