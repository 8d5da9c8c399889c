//! Plain-text dumps of an [`RbTree`] for debugging and the interactive shell.
//!
//! The tree dump is printed sideways: the root sits at the left margin,
//! each level is indented by one tab, right subtrees come first and absent
//! children show up as `NIL`. Reading it with the head tilted to the left
//! gives the usual picture.

use std::fmt::{self, Display, Write};

use compare::Compare;

use crate::rbtree::{NodeRef, RbTree};

/// Printed after every tree dump.
pub const SEPARATOR: &str = "-------------------------------------------";

/// Writes the sideways dump of `tree`, followed by [`SEPARATOR`].
pub fn write_tree<W, K, V, C>(out: &mut W, tree: &RbTree<K, V, C>) -> fmt::Result
    where W: Write, K: Display, C: Compare<K> {
    write_node(out, tree.root(), 0)?;
    writeln!(out, "{}", SEPARATOR)
}

fn write_node<W, K, V>(out: &mut W, node: Option<NodeRef<'_, K, V>>, level: usize) -> fmt::Result
    where W: Write, K: Display {
    match node {
        None => {
            pad(out, level)?;
            writeln!(out, "NIL")
        }
        Some(node) => {
            write_node(out, node.right(), level + 1)?;
            pad(out, level)?;
            writeln!(out, "{}({})", node.key(), node.color())?;
            write_node(out, node.left(), level + 1)
        }
    }
}

fn pad<W: Write>(out: &mut W, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_char('\t')?;
    }
    Ok(())
}

/// ```
/// use redblack::{render, RbTree};
///
/// let map: RbTree<_, _> = vec![(2, "two"), (1, "one")].into_iter().collect();
/// assert_eq!(render::tree_to_string(&map),
///            "\tNIL\n2(BLACK)\n\t\tNIL\n\t1(RED)\n\t\tNIL\n\
///             -------------------------------------------\n");
/// ```
pub fn tree_to_string<K, V, C>(tree: &RbTree<K, V, C>) -> String
    where K: Display, C: Compare<K> {
    let mut s = String::new();
    write_tree(&mut s, tree).expect("a Display implementation returned an error unexpectedly");
    s
}

/// Writes one `key:<key>,value:<value>` line per entry, in key order.
pub fn write_in_order<W, K, V, C>(out: &mut W, tree: &RbTree<K, V, C>) -> fmt::Result
    where W: Write, K: Display, V: Display, C: Compare<K> {
    for (k, v) in tree {
        writeln!(out, "key:{},value:{}", k, v)?;
    }
    Ok(())
}

pub fn in_order_to_string<K, V, C>(tree: &RbTree<K, V, C>) -> String
    where K: Display, V: Display, C: Compare<K> {
    let mut s = String::new();
    write_in_order(&mut s, tree).expect("a Display implementation returned an error unexpectedly");
    s
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::{in_order_to_string, tree_to_string, SEPARATOR};
    use crate::RbTree;

    #[derive(Eq, Ord, PartialEq, PartialOrd)]
    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _: &mut fmt::Formatter) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_empty_tree() {
        let m: RbTree<i32, ()> = RbTree::new();
        assert_eq!(tree_to_string(&m), format!("NIL\n{}\n", SEPARATOR));
        assert_eq!(in_order_to_string(&RbTree::<i32, i32>::new()), "");
    }

    #[test]
    fn test_balanced_three() {
        let m: RbTree<_, _> = vec![(10, ()), (20, ()), (30, ())].into_iter().collect();
        let expected = [
            "\t\tNIL",
            "\t30(RED)",
            "\t\tNIL",
            "20(BLACK)",
            "\t\tNIL",
            "\t10(RED)",
            "\t\tNIL",
            SEPARATOR,
        ];
        let dump = tree_to_string(&m);
        assert_eq!(dump.lines().collect::<Vec<_>>(), expected);
        assert!(dump.ends_with('\n'));
    }

    #[test]
    fn test_string_keys() {
        let mut m = RbTree::new();
        for k in "ijkgefhdabc".chars() {
            m.insert(k.to_string(), ());
        }
        let dump = tree_to_string(&m);
        // every key once, plus one NIL per absent child
        assert_eq!(dump.matches("NIL").count(), m.len() + 1);
        for k in "abcdefghijk".chars() {
            assert_eq!(dump.matches(&format!("{}(", k)).count(), 1);
        }
        let root = m.root().unwrap();
        assert!(dump.contains(&format!("\n{}(BLACK)\n", root.key())));
    }

    #[test]
    fn test_in_order() {
        let m: RbTree<_, _> = vec![("b", 2), ("c", 3), ("a", 1)].into_iter().collect();
        assert_eq!(in_order_to_string(&m), "key:a,value:1\nkey:b,value:2\nkey:c,value:3\n");
    }

    #[test]
    #[should_panic(expected = "a Display implementation returned an error unexpectedly")]
    fn test_failing_key_display_is_not_truncated() {
        let mut m = RbTree::new();
        m.insert(Unprintable, ());
        tree_to_string(&m);
    }

    #[test]
    #[should_panic(expected = "a Display implementation returned an error unexpectedly")]
    fn test_failing_value_display_is_not_truncated() {
        let mut m = RbTree::new();
        m.insert(1, Unprintable);
        in_order_to_string(&m);
    }
}
