//! Sorting by way of a [`Tree`].
//!
//! Every element is inserted into a tree that keeps duplicates, then moved back out of it in
//! order. Equivalent elements are inserted to the right of each other, so the sort is
//! stable. Because the tree never rebalances, already sorted input costs O(n²).

use crate::compare::{Compare, DuplicatePolicy, Natural};
use crate::tree::Tree;

/// Sorts `items` in ascending order.
///
/// # Examples
///
/// ```
/// use ordtree::sort::tree_sort;
///
/// assert_eq!(tree_sort([2, -2, 3, -4, 0]), [-4, -2, 0, 2, 3]);
/// assert_eq!(tree_sort([0, 0, 0]), [0, 0, 0]);
/// ```
pub fn tree_sort<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Ord,
{
    tree_sort_by(items, Natural)
}

/// Sorts `items` so that an element never comes after one that `less` says it precedes.
///
/// # Examples
///
/// ```
/// use ordtree::sort::tree_sort_by;
///
/// let words = ["pear", "fig", "apple", "kiwi"];
/// let by_len = tree_sort_by(words, |a: &&str, b: &&str| a.len() < b.len());
///
/// // "pear" and "kiwi" are equivalent and keep their input order.
/// assert_eq!(by_len, ["fig", "pear", "kiwi", "apple"]);
/// ```
pub fn tree_sort_by<T, C>(items: impl IntoIterator<Item = T>, less: C) -> Vec<T>
where
    C: Compare<T>,
{
    let mut tree = Tree::with_policy(less, DuplicatePolicy::Allow);
    tree.extend(items);
    tree.into_iter().collect()
}
