//! This crate exposes an ordered Binary Search Tree (BST) whose ordering is supplied by the
//! caller.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, no `Node` in its left subtree orders after it.
//! 2. For every `Node` in a BST, no `Node` in its right subtree orders before it.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). The [`Tree`] here does **not** rebalance itself,
//! so its height is whatever the insertion order makes it - inserting sorted values builds a tree
//! of height `N`.
//!
//! ## Ordering
//!
//! A [`Tree`] doesn't require `V: Ord`. It is built with a [`Compare`] (any
//! `Fn(&V, &V) -> bool` works) that says whether one value strictly precedes another. Values
//! that neither precede nor follow each other are *equivalent* and are either ignored or kept
//! depending on the tree's [`DuplicatePolicy`].
//!
//! ## Parent links
//!
//! Every `Node` knows its parent, which lets deletion splice a replacement node into place
//! without walking back down from the root. Parent links never own anything: a `Node` is owned
//! by its parent's child link (or by the `Tree`, for the root).
//!
//! # Examples
//!
//! ```
//! use ordtree::{Order, Tree};
//!
//! let mut tree: Tree<_> = [10, 5, 11, 7, 24, 4, 3, 9, 8, 6, 20, 21, 19].into_iter().collect();
//!
//! assert_eq!(tree.len(), 13);
//! assert_eq!(tree.min(), Some(&3));
//! assert_eq!(tree.max(), Some(&24));
//!
//! assert!(tree.delete(&10));
//! assert!(tree.validate().is_ok());
//!
//! let mut descending = Vec::new();
//! tree.traverse(Order::RNL, |node| {
//!     descending.push(*node.value());
//!     true
//! });
//! assert_eq!(descending, [24, 21, 20, 19, 11, 9, 8, 7, 6, 5, 4, 3]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod compare;
pub mod sort;
mod traverse;
mod tree;
mod validate;

pub use compare::{Compare, DuplicatePolicy, Natural};
pub use traverse::{Iter, Order};
pub use tree::{IntoIter, Node, Tree};
pub use validate::Violation;
