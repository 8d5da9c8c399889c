use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;
use std::iter;
use std::mem;
use std::ops::{Index, IndexMut};

use compare::{Compare, Natural};
use log::{debug, trace};

use self::Color::*;
use self::Dir::*;

// Classic parent-linked red-black tree. Nodes live in an arena owned by the
// tree and refer to each other by index, so the parent pointer is a plain
// back-reference and never a second owner. Nothing is ever removed from the
// arena, which keeps every `NodeId` valid for the life of the tree.

/// The color of a node. Absent children count as `Black`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Red => "RED",
            Black => "BLACK",
        })
    }
}

/// A child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    pub fn turnaround(self) -> Dir {
        if self == Left { Right } else { Left }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    /// `None` iff this node is the root.
    pub(crate) parent: Option<NodeId>,
    pub(crate) child: [Option<NodeId>; 2],
}

impl<K, V> Index<Dir> for Node<K, V> {
    type Output = Option<NodeId>;

    #[inline]
    fn index(&self, dir: Dir) -> &Option<NodeId> {
        match dir {
            Left => &self.child[0],
            Right => &self.child[1],
        }
    }
}

impl<K, V> IndexMut<Dir> for Node<K, V> {
    #[inline]
    fn index_mut(&mut self, dir: Dir) -> &mut Option<NodeId> {
        match dir {
            Left => &mut self.child[0],
            Right => &mut self.child[1],
        }
    }
}

/// An ordered map backed by a red-black tree.
///
/// Keys are ordered by the comparator `C`, which defaults to the natural
/// order of `K`. The comparator must be a total order and must not change
/// while keys are in the map; the tree does not validate it.
#[derive(Clone)]
pub struct RbTree<K, V, C = Natural<K>> where C: Compare<K> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    cmp: C,
}

impl<K, V> RbTree<K, V> where K: Ord {
    /// Creates an empty map ordered by the natural order of its keys.
    ///
    /// ```
    /// use redblack::RbTree;
    ///
    /// let mut map = RbTree::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.len(), 2);
    /// ```
    #[inline]
    pub fn new() -> RbTree<K, V> {
        RbTree::with_cmp(compare::natural())
    }
}

impl<K, V, C> RbTree<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered by the given comparator.
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use redblack::RbTree;
    ///
    /// let mut map = RbTree::with_cmp(natural().rev());
    /// map.insert(1, ());
    /// map.insert(3, ());
    /// map.insert(2, ());
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    #[inline]
    pub fn with_cmp(cmp: C) -> RbTree<K, V, C> {
        RbTree { nodes: Vec::new(), root: None, cmp }
    }

    /// The comparator that orders this map's keys.
    #[inline]
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A read-only handle on the root node, for traversal and printing.
    #[inline]
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef { nodes: &self.nodes, id })
    }

    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.find(key).map(|id| &self[id].value)
    }

    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        match self.find(key) {
            Some(id) => Some(&mut self[id].value),
            None => None,
        }
    }

    #[inline]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.find(key).is_some()
    }

    /// Inserts a key-value pair.
    ///
    /// If the key is already present its value is replaced in place and the
    /// old value returned; the shape and colors of the tree are untouched.
    /// Otherwise a new red node is attached below the last node visited on
    /// the search path and the tree is rebalanced.
    ///
    /// ```
    /// use redblack::RbTree;
    ///
    /// let mut map = RbTree::new();
    /// assert_eq!(map.insert(5, "five"), None);
    /// assert_eq!(map.insert(5, "FIVE"), Some("five"));
    /// assert_eq!(map.get(&5), Some(&"FIVE"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut dir = Left;
        let mut cur = self.root;

        while let Some(id) = cur {
            match self.cmp.compare(&key, &self[id].key) {
                Less => dir = Left,
                Greater => dir = Right,
                Equal => return Some(mem::replace(&mut self[id].value, value)),
            }
            parent = cur;
            cur = self[id][dir];
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { key, value, color: Red, parent, child: [None, None] });
        match parent {
            Some(p) => self[p][dir] = Some(id),
            None => self.root = Some(id),
        }
        debug!("attached {:?} under {:?} on the {:?}", id, parent, dir);

        self.insert_fix_up(id);
        None
    }

    fn find<Q: ?Sized>(&self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        let mut cur = self.root;
        while let Some(id) = cur {
            cur = match self.cmp.compare(key, &self[id].key) {
                Less => self[id][Left],
                Greater => self[id][Right],
                Equal => return Some(id),
            };
        }
        None
    }

    /// Which slot of `parent` holds `child`.
    #[inline]
    fn side_of(&self, child: NodeId, parent: NodeId) -> Dir {
        if self[parent][Left] == Some(child) { Left } else { Right }
    }

    // Moves `pivot` down into its `dir` slot and promotes the child on the
    // other side into its place. The promoted child must exist. Colors are
    // left alone. Returns the promoted node.
    fn rotate(&mut self, pivot: NodeId, dir: Dir) -> NodeId {
        let up = match self[pivot][dir.turnaround()] {
            Some(up) => up,
            None => {
                debug_assert!(false, "rotation of {:?} without a {:?} child", pivot, dir.turnaround());
                return pivot;
            }
        };

        let middle = self[up][dir];
        self[pivot][dir.turnaround()] = middle;
        if let Some(m) = middle {
            self[m].parent = Some(pivot);
        }

        let parent = self[pivot].parent;
        self[up].parent = parent;
        match parent {
            Some(p) => {
                let side = self.side_of(pivot, p);
                self[p][side] = Some(up);
            }
            None => self.root = Some(up),
        }

        self[up][dir] = Some(pivot);
        self[pivot].parent = Some(up);
        up
    }

    /// `x.right` takes `x`'s place and `x` becomes its left child.
    #[inline]
    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        self.rotate(x, Left)
    }

    /// `y.left` takes `y`'s place and `y` becomes its right child.
    #[inline]
    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        self.rotate(y, Right)
    }

    /// Rotates `node` down into its `dir` slot.
    #[inline]
    fn rotate_down(&mut self, node: NodeId, dir: Dir) -> NodeId {
        match dir {
            Left => self.rotate_left(node),
            Right => self.rotate_right(node),
        }
    }

    // Restores "no red node has a red child" after `node` was attached red,
    // walking upwards for as long as the red uncle case pushes the conflict
    // higher. Black-height is preserved by every step.
    fn insert_fix_up(&mut self, mut node: NodeId) {
        while let Some(parent) = self[node].parent {
            if self[parent].color == Black {
                break;
            }
            // a red parent is never the root, so the grandparent exists
            let grandparent = match self[parent].parent {
                Some(g) => g,
                None => break,
            };
            let side = self.side_of(parent, grandparent);
            let uncle = self[grandparent][side.turnaround()];

            if let Some(uncle) = uncle.filter(|&u| self[u].color == Red) {
                trace!("fix-up {:?}: red uncle {:?}, recolor and climb to {:?}", node, uncle, grandparent);
                self[parent].color = Black;
                self[uncle].color = Black;
                self[grandparent].color = Red;
                node = grandparent;
            } else if self[parent][side.turnaround()] == Some(node) {
                // inner grandchild: turn the zig-zag into a straight line and
                // handle the old parent as the offending node
                trace!("fix-up {:?}: inner child on the {:?}, rotate {:?}", node, side, parent);
                self.rotate_down(parent, side);
                node = parent;
            } else {
                trace!("fix-up {:?}: outer child on the {:?}, rotate {:?}", node, side, grandparent);
                self[parent].color = Black;
                self[grandparent].color = Red;
                self.rotate_down(grandparent, side.turnaround());
                break;
            }
        }

        if let Some(root) = self.root {
            self[root].color = Black;
        }
    }

    pub(crate) fn nodes(&self) -> &[Node<K, V>] {
        &self.nodes
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }
}

impl<K, V, C> Index<NodeId> for RbTree<K, V, C> where C: Compare<K> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }
}

impl<K, V, C> IndexMut<NodeId> for RbTree<K, V, C> where C: Compare<K> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }
}

impl<K, V> Default for RbTree<K, V> where K: Ord {
    #[inline]
    fn default() -> RbTree<K, V> {
        RbTree::new()
    }
}

impl<K, V> iter::FromIterator<(K, V)> for RbTree<K, V> where K: Ord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> RbTree<K, V> {
        let mut m = RbTree::new();
        m.extend(iterable);
        m
    }
}

impl<K, V, C> Extend<(K, V)> for RbTree<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (k, v) in iterable {
            self.insert(k, v);
        }
    }
}

impl<K, V, C> fmt::Display for RbTree<K, V, C>
    where K: fmt::Display, V: fmt::Display, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 { write!(f, ", ")?; }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}

impl<K, V, C> fmt::Debug for RbTree<K, V, C>
    where K: fmt::Debug, V: fmt::Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for RbTree<K, V, C>
    where K: PartialEq, V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &RbTree<K, V, C>) -> bool {
        self.len() == other.len() &&
            self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K, V, C> Eq for RbTree<K, V, C> where K: Eq, V: Eq, C: Compare<K> {}

/// A read-only view of one node of an [`RbTree`].
pub struct NodeRef<'a, K, V> {
    nodes: &'a [Node<K, V>],
    id: NodeId,
}

// derive would demand K: Clone and V: Clone
impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> NodeRef<'a, K, V> {
        *self
    }
}

impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    #[inline]
    fn node(&self) -> &'a Node<K, V> {
        &self.nodes[self.id.0]
    }

    #[inline]
    fn at(&self, id: Option<NodeId>) -> Option<NodeRef<'a, K, V>> {
        id.map(|id| NodeRef { nodes: self.nodes, id })
    }

    #[inline]
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    #[inline]
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.node().color
    }

    #[inline]
    pub fn child(&self, dir: Dir) -> Option<NodeRef<'a, K, V>> {
        self.at(self.node()[dir])
    }

    #[inline]
    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.child(Left)
    }

    #[inline]
    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.child(Right)
    }

    /// `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.node().parent)
    }

    /// Whether both handles point at the same node of the same tree.
    #[inline]
    pub fn same_node(&self, other: &NodeRef<'_, K, V>) -> bool {
        self.id == other.id && std::ptr::eq(self.nodes, other.nodes)
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}
