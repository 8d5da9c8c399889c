//! An ordered map backed by a classic, parent-linked red-black tree.
//!
//! [`RbTree`] keeps its height within `2·log2(n + 1)` by coloring every node
//! red or black and repairing the coloring with rotations after each
//! insertion. Keys are ordered by a [`compare::Compare`] comparator, the
//! natural order of the key type unless another one is supplied with
//! [`RbTree::with_cmp`].
//!
//! The tree only grows: there is no removal.
//!
//! ```
//! use redblack::{Color, RbTree};
//!
//! let mut map = RbTree::new();
//! for k in [10, 20, 30] {
//!     map.insert(k, k * k);
//! }
//!
//! let root = map.root().unwrap();
//! assert_eq!((*root.key(), root.color()), (20, Color::Black));
//! assert_eq!(map.get(&30), Some(&900));
//! assert!(map.validate().is_ok());
//! ```

pub mod check;
pub mod iter;
mod rbtree;
#[cfg(feature = "render")]
pub mod render;

pub use crate::check::Violation;
pub use crate::iter::{Iter, Keys, Values};
pub use crate::rbtree::{Color, Dir, NodeRef, RbTree};
