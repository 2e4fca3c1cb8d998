//! The ordering a [`Tree`][crate::Tree] is built around.
//!
//! A tree never compares values itself. It is handed a [`Compare`] when it is constructed and asks
//! it one question: "does `a` strictly precede `b`?". Two values for which neither precedes the
//! other are *equivalent*, and what happens to equivalent values on insert is decided by the
//! tree's [`DuplicatePolicy`].

/// A strict weak ordering over `V`.
///
/// Implementations must be irreflexive, transitive, and treat equivalence transitively. The tree
/// does not check any of this. A comparator that breaks these rules will happily build a tree
/// that [`Tree::validate`][crate::Tree::validate] then rejects.
///
/// Any `Fn(&V, &V) -> bool` is a comparator:
///
/// ```
/// use ordtree::Tree;
///
/// let mut tree = Tree::new(|a: &i32, b: &i32| a > b);
/// tree.insert(1);
/// tree.insert(2);
///
/// assert_eq!(tree.min(), Some(&2));
/// ```
pub trait Compare<V> {
    /// Returns `true` if `a` strictly precedes `b`.
    fn less(&self, a: &V, b: &V) -> bool;

    /// Returns `true` if neither value precedes the other.
    fn equivalent(&self, a: &V, b: &V) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

impl<V, F> Compare<V> for F
where
    F: Fn(&V, &V) -> bool,
{
    fn less(&self, a: &V, b: &V) -> bool {
        self(a, b)
    }
}

/// Orders values by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<V: Ord> Compare<V> for Natural {
    fn less(&self, a: &V, b: &V) -> bool {
        a < b
    }
}

/// What [`Tree::insert`][crate::Tree::insert] does with a value equivalent to one already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Equivalent values are ignored. The tree behaves like a set.
    #[default]
    Reject,
    /// Equivalent values are stored to the right of the existing one. The tree behaves like a
    /// multiset and in-order traversal keeps equivalent values in insertion order.
    Allow,
}
