//! A parent-linked, unbalanced BST ordered by an injected comparator.
//!
//! Nodes are heap allocated and linked with raw pointers. A node owns its children; the pointer
//! back to its parent is only ever read, never freed through. All of the pointer juggling is
//! confined to this module.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Order, Tree};
//!
//! let mut tree = Tree::new(|a: &i32, b: &i32| a < b);
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert_eq!(tree.search(&1).map(|n| *n.value()), Some(1));
//!
//! // Inserting an equivalent value does nothing.
//! assert!(!tree.insert(3));
//! assert_eq!(tree.len(), 3);
//!
//! // Deleting reports whether anything was there.
//! assert!(tree.delete(&2));
//! assert!(!tree.delete(&2));
//!
//! let mut values = Vec::new();
//! tree.traverse(Order::InOrder, |node| {
//!     values.push(*node.value());
//!     true
//! });
//! assert_eq!(values, [1, 3]);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::trace;

use crate::compare::{Compare, DuplicatePolicy, Natural};
use crate::traverse::Order;

/// An ordered binary search tree over values of type `V`, ordered by the comparator `C`.
///
/// The tree never rebalances, so its height (and the cost of every lookup) depends on insertion
/// order. Inserting already sorted values degrades it into a list.
pub struct Tree<V, C = Natural> {
    // This is a `Link` instead of an `Option<Box<Node>>` so that it can be moved around with the
    // `Tree` without the children's parent pointers breaking.
    pub(crate) root: Link<V>,
    less: C,
    policy: DuplicatePolicy,
    _owns: PhantomData<Box<Node<V>>>,
}

/// A single value stored in a [`Tree`], along with its position in it.
///
/// Nodes are only ever handed out by shared reference, so the structure can be inspected (and
/// used as a starting point for [`Tree::traverse_from`]) but not modified from the outside.
pub struct Node<V> {
    pub(crate) value: V,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
    pub(crate) parent: Link<V>,
}

pub(crate) struct Link<V>(pub(crate) Option<NonNull<Node<V>>>);

impl<V> Clone for Link<V> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<V> Copy for Link<V> {}

impl<V> Link<V> {
    const EMPTY: Self = Link(None);

    /// Allocates a new leaf hanging off `parent` and returns a link to it.
    fn leaf(value: V, parent: Link<V>) -> Self {
        Link(Some(Node::alloc(value, parent)))
    }

    fn node(&self) -> Option<&Node<V>> {
        // SAFETY: Every non-empty link in a tree points at a node allocated by `Link::leaf` that
        // stays alive until it is unlinked in `Tree::take` or freed in `Tree::drop`. Both of those
        // need `&mut Tree`, so they can't run while this borrow (which comes from a `&Tree`) is
        // alive.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }
}

/// Which child of its parent a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// How the replacement for a deleted node with two children was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Successor {
    /// The left child, which had no right child.
    LeftChild,
    /// The right child, which had no left child.
    RightChild,
    /// The rightmost node under the left child.
    LeftDeep,
    /// The leftmost node under the right child.
    RightDeep,
}

impl Successor {
    /// The subtree of the deleted node the successor was taken from.
    fn side(self) -> Side {
        match self {
            Successor::LeftChild | Successor::LeftDeep => Side::Left,
            Successor::RightChild | Successor::RightDeep => Side::Right,
        }
    }

    fn is_deep(self) -> bool {
        matches!(self, Successor::LeftDeep | Successor::RightDeep)
    }
}

impl<V> Node<V> {
    fn alloc(value: V, parent: Link<V>) -> NonNull<Self> {
        let node = Box::new(Node {
            value,
            left: Link::EMPTY,
            right: Link::EMPTY,
            parent,
        });
        NonNull::from(Box::leak(node))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The root of this node's left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    /// The root of this node's right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.node()
    }

    pub(crate) fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    fn link(&self, side: Side) -> Link<V> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn link_mut(&mut self, side: Side) -> &mut Link<V> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl<V> fmt::Debug for Node<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only one level deep: a degenerate tree would otherwise recurse once per node.
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

impl<V, C> Drop for Tree<V, C> {
    fn drop(&mut self) {
        let mut stack: Vec<NonNull<Node<V>>> = self.root.0.take().into_iter().collect();
        while let Some(ptr) = stack.pop() {
            // SAFETY: Each node is reachable through exactly one child link (or the root), so it
            // is pushed onto the stack exactly once and freed exactly once. It was allocated with
            // `Box::new` in `Link::leaf`.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            stack.extend(node.left.0);
            stack.extend(node.right.0);
        }
    }
}

impl<V, C> Clone for Tree<V, C>
where
    V: Clone,
    C: Clone,
{
    /// Copies the tree node for node, so the copy has exactly the same shape.
    fn clone(&self) -> Self {
        let mut tree = Self::with_policy(self.less.clone(), self.policy);
        let Some(root) = self.root() else {
            return tree;
        };

        let new_root = Node::alloc(root.value.clone(), Link::EMPTY);
        tree.root = Link(Some(new_root));
        let mut stack = vec![(root, new_root)];
        while let Some((source, copy)) = stack.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = source.child(side) {
                    let new_child = Node::alloc(child.value.clone(), Link(Some(copy)));
                    // SAFETY: `copy` belongs to the new tree, which nothing else can see yet.
                    // Linking each node as soon as it's allocated means a panicking `V::clone`
                    // still leaves every allocation reachable from `tree` to be freed.
                    unsafe { *(*copy.as_ptr()).link_mut(side) = Link(Some(new_child)) };
                    stack.push((child, new_child));
                }
            }
        }
        tree
    }
}

impl<V, C> fmt::Debug for Tree<V, C>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: Ord> Default for Tree<V, Natural> {
    fn default() -> Self {
        Self::new(Natural)
    }
}

impl<V: Ord> FromIterator<V> for Tree<V, Natural> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<V, C> Extend<V> for Tree<V, C>
where
    C: Compare<V>,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<V, C> IntoIterator for Tree<V, C> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    /// Moves the values out of the tree in ascending order.
    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter {
            stack: Vec::new(),
            _owns: PhantomData,
        };
        // The iterator takes over every node, leaving `self` empty for its own drop.
        iter.push_left_spine(self.root.0.take());
        iter
    }
}

/// A consuming in-order iterator over the values of a [`Tree`].
///
/// Created by the `into_iter` method on [`Tree`] (provided by the [`IntoIterator`] trait).
pub struct IntoIter<V> {
    // Nodes whose left subtree has already been yielded. Each one owns itself and its right
    // subtree; its left link is stale.
    stack: Vec<NonNull<Node<V>>>,
    _owns: PhantomData<Box<Node<V>>>,
}

impl<V> IntoIter<V> {
    fn push_left_spine(&mut self, mut current: Option<NonNull<Node<V>>>) {
        while let Some(ptr) = current {
            self.stack.push(ptr);
            // SAFETY: `ptr` is owned by this iterator and hasn't been freed, nodes are only
            // freed after being popped.
            current = unsafe { (*ptr.as_ptr()).left.0 };
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let ptr = self.stack.pop()?;
        // SAFETY: Every node reaches the stack exactly once, through its parent's left link or as
        // the top of a right subtree, and is popped exactly once. It was allocated with
        // `Box::new` in `Link::leaf`.
        let node = unsafe { Box::from_raw(ptr.as_ptr()) };
        let Node { value, right, .. } = *node;
        self.push_left_spine(right.0);
        Some(value)
    }
}

impl<V> Drop for IntoIter<V> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<V, C> Tree<V, C> {
    /// Generates a new, empty `Tree` ordered by `less` that ignores duplicate values.
    pub fn new(less: C) -> Self {
        Self::with_policy(less, DuplicatePolicy::Reject)
    }

    /// Generates a new, empty `Tree` ordered by `less` that treats equivalent values according
    /// to `policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{DuplicatePolicy, Tree};
    ///
    /// let mut tree = Tree::with_policy(|a: &i32, b: &i32| a < b, DuplicatePolicy::Allow);
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn with_policy(less: C, policy: DuplicatePolicy) -> Self {
        Self {
            root: Link::EMPTY,
            less,
            policy,
            _owns: PhantomData,
        }
    }

    /// How this tree treats values equivalent to ones it already holds.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// The comparator this tree is ordered by.
    pub fn comparator(&self) -> &C {
        &self.less
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<V>> {
        self.root.node()
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Counts the values in the tree. This visits every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2, 1].into_iter().collect();
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.traverse(Order::PreOrder, |_| {
            count += 1;
            true
        });
        count
    }

    /// The smallest value in the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&V> {
        self.extreme(Side::Left)
    }

    /// The largest value in the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&V> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&V> {
        let mut node = self.root()?;
        while let Some(next) = node.child(side) {
            node = next;
        }
        Some(&node.value)
    }
}

impl<V, C> Tree<V, C>
where
    C: Compare<V>,
{
    /// Inserts `value` into the tree and returns whether a node was added. When an equivalent
    /// value is already present, a [`DuplicatePolicy::Reject`] tree is left untouched and
    /// `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree: Tree<_> = Tree::default();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: V) -> bool {
        let Some(mut current) = self.root.0 else {
            trace!("inserting root");
            self.root = Link::leaf(value, Link::EMPTY);
            return true;
        };

        loop {
            // SAFETY: `current` came from a link of this tree, which we hold mutably, so it points
            // at a live node that nothing else is borrowing.
            let node = unsafe { &mut *current.as_ptr() };
            let side = if self.less.less(&node.value, &value) {
                Side::Right
            } else if self.less.less(&value, &node.value) {
                Side::Left
            } else {
                match self.policy {
                    DuplicatePolicy::Reject => {
                        trace!("ignoring duplicate value");
                        return false;
                    }
                    DuplicatePolicy::Allow => Side::Right,
                }
            };

            match node.link(side).0 {
                Some(next) => current = next,
                None => {
                    trace!("inserting {side:?} leaf");
                    *node.link_mut(side) = Link::leaf(value, Link(Some(current)));
                    return true;
                }
            }
        }
    }

    /// Finds the node holding a value equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree: Tree<_> = Tree::default();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let one = tree.search(&1).unwrap();
    /// assert_eq!(one.parent().map(|n| *n.value()), Some(2));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, value: &V) -> Option<&Node<V>> {
        // SAFETY: See `Link::node`. The returned reference borrows `self`.
        self.search_link(value)
            .0
            .map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// Returns `true` if the tree holds a value equivalent to `value`.
    pub fn contains(&self, value: &V) -> bool {
        self.search_link(value).0.is_some()
    }

    /// Removes a value equivalent to `value` from the tree and returns whether one was found.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert!(tree.delete(&2));
    /// assert!(!tree.delete(&999));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, value: &V) -> bool {
        self.take(value).is_some()
    }

    /// Removes a value equivalent to `value` from the tree and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let caseless = |a: &String, b: &String| a.to_lowercase() < b.to_lowercase();
    /// let mut tree = Tree::new(caseless);
    /// tree.insert("Hello".to_string());
    ///
    /// assert_eq!(tree.take(&"hello".to_string()), Some("Hello".to_string()));
    /// assert!(tree.is_empty());
    /// ```
    pub fn take(&mut self, value: &V) -> Option<V> {
        let target = self.search_link(value).0?;

        // SAFETY: `target` and every pointer reached from it belong to this tree, which we hold
        // mutably, so no references into it are alive while links are rewritten. Once unlinked,
        // nothing in the tree points at `target` any more and it can be freed.
        unsafe {
            let (left, right) = {
                let node = target.as_ref();
                (node.left.0, node.right.0)
            };
            match (left, right) {
                (None, None) => {
                    trace!("deleting leaf");
                    *self.slot_of(target) = Link::EMPTY;
                }
                (Some(child), None) | (None, Some(child)) => {
                    trace!("deleting node with one child");
                    (*child.as_ptr()).parent = (*target.as_ptr()).parent;
                    *self.slot_of(target) = Link(Some(child));
                }
                (Some(left), Some(right)) => {
                    let (successor, kind) = successor(left, right);
                    trace!("deleting node with two children, replacing it with {kind:?}");
                    self.replace(target, successor, kind, left, right);
                }
            }

            let node = *Box::from_raw(target.as_ptr());
            Some(node.value)
        }
    }

    fn search_link(&self, value: &V) -> Link<V> {
        let mut current = self.root;
        while let Some(ptr) = current.0 {
            // SAFETY: See `Link::node`.
            let node = unsafe { ptr.as_ref() };
            current = if self.less.less(&node.value, value) {
                node.right
            } else if self.less.less(value, &node.value) {
                node.left
            } else {
                break;
            };
        }
        current
    }

    /// Returns the link that owns `node`: the root, or whichever child link of its parent points
    /// at it.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree and no references into the tree may be alive.
    unsafe fn slot_of(&mut self, node: NonNull<Node<V>>) -> &mut Link<V> {
        match (*node.as_ptr()).parent.0 {
            None => &mut self.root,
            Some(parent) => {
                let parent = &mut *parent.as_ptr();
                if parent.left.0 == Some(node) {
                    &mut parent.left
                } else {
                    &mut parent.right
                }
            }
        }
    }

    /// Moves `successor` into the place of `target`, which has the two children `left` and
    /// `right`. Afterwards nothing in the tree refers to `target`.
    ///
    /// # Safety
    ///
    /// All pointers must be live nodes of this tree, `successor` must have been picked by
    /// [`successor`] for `left` and `right`, and no references into the tree may be alive.
    unsafe fn replace(
        &mut self,
        target: NonNull<Node<V>>,
        successor: NonNull<Node<V>>,
        kind: Successor,
        left: NonNull<Node<V>>,
        right: NonNull<Node<V>>,
    ) {
        let from = kind.side();
        let (near, far) = match from {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };

        *self.slot_of(successor) = Link::EMPTY;
        (*successor.as_ptr()).parent = (*target.as_ptr()).parent;
        *self.slot_of(target) = Link(Some(successor));

        // The successor never has a child on this side, it's either the innermost node of its
        // subtree or a direct child that was picked for lacking one.
        *(*successor.as_ptr()).link_mut(from.opposite()) = Link(Some(far));
        (*far.as_ptr()).parent = Link(Some(successor));

        if kind.is_deep() {
            let tip = descend(successor, from);
            *(*tip.as_ptr()).link_mut(from) = Link(Some(near));
            (*near.as_ptr()).parent = Link(Some(tip));
        }
    }
}

/// Picks the node to replace a deleted node whose children are `left` and `right`.
///
/// # Safety
///
/// Both pointers must be live nodes and nothing may be mutating the tree they belong to.
unsafe fn successor<V>(
    left: NonNull<Node<V>>,
    right: NonNull<Node<V>>,
) -> (NonNull<Node<V>>, Successor) {
    if (*left.as_ptr()).right.0.is_none() {
        return (left, Successor::LeftChild);
    }
    if (*right.as_ptr()).left.0.is_none() {
        return (right, Successor::RightChild);
    }

    let left_deep = descend(left, Side::Right);
    if (*left_deep.as_ptr()).left.0.is_none() {
        return (left_deep, Successor::LeftDeep);
    }
    let right_deep = descend(right, Side::Left);
    if (*right_deep.as_ptr()).right.0.is_none() {
        return (right_deep, Successor::RightDeep);
    }

    (left_deep, Successor::LeftDeep)
}

/// Follows `side` links from `node` until there are none left.
///
/// # Safety
///
/// `node` must be a live node and nothing may be mutating the tree it belongs to.
unsafe fn descend<V>(mut node: NonNull<Node<V>>, side: Side) -> NonNull<Node<V>> {
    while let Some(next) = (*node.as_ptr()).link(side).0 {
        node = next;
    }
    node
}
