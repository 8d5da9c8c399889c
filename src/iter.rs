//! In-order iteration over an [`RbTree`].

use std::iter::FusedIterator;

use compare::Compare;

use crate::rbtree::{Node, NodeId, RbTree};

/// An iterator over the entries of an [`RbTree`], in key order.
pub struct Iter<'a, K: 'a, V: 'a> {
    nodes: &'a [Node<K, V>],
    // nodes whose left subtree is already on the stack or done
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(nodes: &'a [Node<K, V>], root: Option<NodeId>) -> Iter<'a, K, V> {
        let mut it = Iter { nodes, stack: Vec::new(), remaining: nodes.len() };
        it.descend(root);
        it
    }

    #[inline]
    fn node(&self, id: NodeId) -> &'a Node<K, V> {
        let nodes: &'a [Node<K, V>] = self.nodes;
        &nodes[id.index()]
    }

    fn descend(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.node(id).child[0];
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let id = self.stack.pop()?;
        let node = self.node(id);
        self.descend(node.child[1]);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of an [`RbTree`], in order.
pub struct Keys<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of an [`RbTree`], in key order.
pub struct Values<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

impl<K, V, C> RbTree<K, V, C> where C: Compare<K> {
    /// Returns an iterator over the map's entries in key order.
    ///
    /// ```
    /// use redblack::RbTree;
    ///
    /// let map: RbTree<_, _> = vec![(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &'a')));
    /// assert_eq!(it.next(), Some((&2, &'b')));
    /// assert_eq!(it.next(), Some((&3, &'c')));
    /// assert_eq!(it.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.nodes(), self.root_id())
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTree;

    #[test]
    fn test_empty() {
        let m: RbTree<i32, i32> = RbTree::new();
        assert_eq!(m.iter().next(), None);
        assert_eq!(m.iter().len(), 0);
    }

    #[test]
    fn test_orders() {
        let m: RbTree<i32, i32> = [9, -2, 7, 0, 4, 3, 2].iter().map(|&k| (k, k * 10)).collect();
        let x: Vec<(i32, i32)> = m.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(x, vec![(-2, -20), (0, 0), (2, 20), (3, 30), (4, 40), (7, 70), (9, 90)]);

        let keys: Vec<i32> = m.keys().cloned().collect();
        assert_eq!(keys, vec![-2, 0, 2, 3, 4, 7, 9]);
        let values: Vec<i32> = m.values().cloned().collect();
        assert_eq!(values, vec![-20, 0, 20, 30, 40, 70, 90]);
    }

    #[test]
    fn test_exact_size() {
        let m: RbTree<u32, ()> = (0..100).map(|k| (k, ())).collect();
        let mut it = m.iter();
        assert_eq!(it.len(), 100);
        it.next();
        it.next();
        assert_eq!(it.size_hint(), (98, Some(98)));
        assert_eq!(it.by_ref().count(), 98);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_into_iter_for_ref() {
        let m: RbTree<&str, usize> = vec![("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let mut total = 0;
        let mut seen = String::new();
        for (k, v) in &m {
            seen.push_str(k);
            total += *v;
        }
        assert_eq!(seen, "abc");
        assert_eq!(total, 6);
    }
}
