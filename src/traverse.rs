//! Depth-first walks over a [`Tree`].
//!
//! All walks keep their own stack instead of recursing, so a tree that has degenerated into a
//! long chain is walked just as safely as a bushy one.

use std::ptr;

use crate::tree::{Node, Side, Tree};

/// The order in which [`Tree::traverse`] visits nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. Visits values in ascending order.
    InOrder,
    /// Right subtree, then node, then left subtree. Visits values in descending order.
    ReverseInOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

impl Order {
    /// Shorthand for [`Order::PreOrder`].
    pub const NLR: Order = Order::PreOrder;
    /// Shorthand for [`Order::InOrder`].
    pub const LNR: Order = Order::InOrder;
    /// Shorthand for [`Order::ReverseInOrder`].
    pub const RNL: Order = Order::ReverseInOrder;
    /// Shorthand for [`Order::PostOrder`].
    pub const LRN: Order = Order::PostOrder;
}

impl<V, C> Tree<V, C> {
    /// Visits every node of the tree in the given `order`. The walk stops early as soon as
    /// `visit` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Order, Tree};
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let mut post_order = Vec::new();
    /// tree.traverse(Order::LRN, |node| {
    ///     post_order.push(*node.value());
    ///     true
    /// });
    /// assert_eq!(post_order, [1, 3, 2]);
    ///
    /// // Stop once we've seen the first value above 1.
    /// let mut seen = Vec::new();
    /// tree.traverse(Order::LNR, |node| {
    ///     seen.push(*node.value());
    ///     *node.value() <= 1
    /// });
    /// assert_eq!(seen, [1, 2]);
    /// ```
    pub fn traverse<'a, F>(&'a self, order: Order, visit: F)
    where
        F: FnMut(&'a Node<V>) -> bool,
    {
        walk(self.root(), order, visit);
    }

    /// Like [`Tree::traverse`] but only visits the subtree rooted at `node`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Order, Tree};
    ///
    /// let tree: Tree<_> = [5, 2, 8, 1, 3].into_iter().collect();
    /// let two = tree.search(&2).unwrap();
    ///
    /// let mut values = Vec::new();
    /// tree.traverse_from(two, Order::RNL, |node| {
    ///     values.push(*node.value());
    ///     true
    /// });
    /// assert_eq!(values, [3, 2, 1]);
    /// ```
    pub fn traverse_from<'a, F>(&'a self, node: &'a Node<V>, order: Order, visit: F)
    where
        F: FnMut(&'a Node<V>) -> bool,
    {
        walk(Some(node), order, visit);
    }

    /// Iterates over the values of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root())
    }
}

impl<'a, V, C> IntoIterator for &'a Tree<V, C> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the values of a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, V> {
    // The nodes whose left subtree has been entered but which haven't been yielded yet.
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iter<'a, V> {
    fn new(root: Option<&'a Node<V>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.value())
    }
}

fn walk<'a, V, F>(start: Option<&'a Node<V>>, order: Order, mut visit: F)
where
    F: FnMut(&'a Node<V>) -> bool,
{
    match order {
        Order::PreOrder => pre_order(start, &mut visit),
        Order::InOrder => in_order(start, Side::Left, &mut visit),
        Order::ReverseInOrder => in_order(start, Side::Right, &mut visit),
        Order::PostOrder => post_order(start, &mut visit),
    }
}

fn pre_order<'a, V, F>(start: Option<&'a Node<V>>, visit: &mut F)
where
    F: FnMut(&'a Node<V>) -> bool,
{
    let mut stack: Vec<&'a Node<V>> = start.into_iter().collect();
    while let Some(node) = stack.pop() {
        if !visit(node) {
            return;
        }
        stack.extend(node.right());
        stack.extend(node.left());
    }
}

/// Walks `first` subtree, node, other subtree. `Side::Left` gives ascending order and
/// `Side::Right` descending.
fn in_order<'a, V, F>(start: Option<&'a Node<V>>, first: Side, visit: &mut F)
where
    F: FnMut(&'a Node<V>) -> bool,
{
    let mut stack = Vec::new();
    let mut current = start;
    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.child(first);
        }
        let Some(node) = stack.pop() else {
            return;
        };
        if !visit(node) {
            return;
        }
        current = node.child(first.opposite());
    }
}

fn post_order<'a, V, F>(start: Option<&'a Node<V>>, visit: &mut F)
where
    F: FnMut(&'a Node<V>) -> bool,
{
    let mut stack: Vec<&'a Node<V>> = Vec::new();
    let mut current = start;
    // The node visited last. When it is the right child of the top of the stack, both subtrees
    // of the top are done.
    let mut last: Option<&'a Node<V>> = None;
    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left();
        }
        let Some(&top) = stack.last() else {
            return;
        };
        match top.right() {
            Some(right) if !last.map_or(false, |last| ptr::eq(last, right)) => {
                current = Some(right);
            }
            _ => {
                if !visit(top) {
                    return;
                }
                last = stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [i32; 13] = [10, 5, 11, 7, 24, 4, 3, 9, 8, 6, 20, 21, 19];

    fn collect<V: Copy, C>(tree: &Tree<V, C>, order: Order) -> Vec<V> {
        let mut values = Vec::new();
        tree.traverse(order, |node| {
            values.push(*node.value());
            true
        });
        values
    }

    #[test]
    fn orders_on_small_tree() {
        //     4
        //   2   6
        //  1 3 5 7
        let tree: Tree<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

        assert_eq!(collect(&tree, Order::NLR), [4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(collect(&tree, Order::LNR), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(collect(&tree, Order::RNL), [7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(collect(&tree, Order::LRN), [1, 3, 2, 5, 7, 6, 4]);
    }

    #[test]
    fn orders_on_lopsided_tree() {
        let tree: Tree<_> = VALUES.into_iter().collect();

        assert_eq!(
            collect(&tree, Order::PreOrder),
            [10, 5, 4, 3, 7, 6, 9, 8, 11, 24, 20, 19, 21]
        );
        assert_eq!(
            collect(&tree, Order::PostOrder),
            [3, 4, 6, 8, 9, 7, 5, 19, 21, 20, 24, 11, 10]
        );

        let mut reversed = collect(&tree, Order::ReverseInOrder);
        reversed.reverse();
        assert_eq!(reversed, collect(&tree, Order::InOrder));
    }

    #[test]
    fn empty_tree_visits_nothing() {
        let tree: Tree<i32> = Tree::default();

        for order in [Order::NLR, Order::LNR, Order::RNL, Order::LRN] {
            assert!(collect(&tree, order).is_empty());
        }
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn returning_false_stops_every_order() {
        let tree: Tree<_> = VALUES.into_iter().collect();

        for order in [Order::NLR, Order::LNR, Order::RNL, Order::LRN] {
            let mut visited = 0;
            tree.traverse(order, |_| {
                visited += 1;
                visited < 3
            });
            assert_eq!(visited, 3, "{order:?} kept going");
        }
    }

    #[test]
    fn traverse_from_subtree() {
        let tree: Tree<_> = VALUES.into_iter().collect();
        let seven = tree.search(&7).unwrap();

        let mut values = Vec::new();
        tree.traverse_from(seven, Order::LNR, |node| {
            values.push(*node.value());
            true
        });
        assert_eq!(values, [6, 7, 8, 9]);

        values.clear();
        tree.traverse_from(seven, Order::LRN, |node| {
            values.push(*node.value());
            true
        });
        assert_eq!(values, [6, 8, 9, 7]);
    }

    #[test]
    fn iter_matches_in_order() {
        let tree: Tree<_> = VALUES.into_iter().collect();

        let iterated: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(iterated, collect(&tree, Order::InOrder));

        let mut looped = Vec::new();
        for value in &tree {
            looped.push(*value);
        }
        assert_eq!(looped, iterated);
    }

    #[test]
    fn walks_a_long_chain() {
        let tree: Tree<_> = (0..10_000).collect();

        assert_eq!(collect(&tree, Order::LRN).first(), Some(&9_999));
        assert_eq!(collect(&tree, Order::RNL).last(), Some(&0));
    }
}
