//! Structural checks for a [`Tree`].

use std::fmt;
use std::ptr;

use log::debug;

use crate::compare::Compare;
use crate::tree::{Node, Side, Tree};

/// The first structural problem [`Tree::validate`] found. The values involved are borrowed from
/// the tree so the offending nodes can be identified.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Violation<'a, V: fmt::Debug> {
    /// The root node has a parent.
    #[error("root element has a parent node")]
    RootHasParent,
    /// A left child orders after its parent.
    #[error("value of left child ({child:?}) is greater than parent node ({parent:?})")]
    LeftGreater {
        /// The parent's value.
        parent: &'a V,
        /// The left child's value.
        child: &'a V,
    },
    /// A right child orders before its parent.
    #[error("value of right child ({child:?}) is less than parent node ({parent:?})")]
    RightLess {
        /// The parent's value.
        parent: &'a V,
        /// The right child's value.
        child: &'a V,
    },
    /// A child's parent pointer doesn't lead back to the node it hangs from.
    #[error("child ({child:?}) does not point back to its parent ({parent:?})")]
    BrokenParentLink {
        /// The value of the node the child hangs from.
        parent: &'a V,
        /// The child's value.
        child: &'a V,
    },
}

impl<V, C> Tree<V, C>
where
    V: fmt::Debug,
    C: Compare<V>,
{
    /// Checks that the tree is a well formed BST: the root has no parent, no left child orders
    /// after its parent, no right child orders before its parent, and every parent pointer
    /// leads back to the node a child hangs from. Nodes are checked in pre-order and the first
    /// problem found is returned.
    ///
    /// A tree only fails this if its comparator isn't a strict weak ordering. Duplicates are not
    /// looked for. The error message shows the offending values, hence `V: Debug`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), Violation<'_, V>> {
        let result = self.find_violation();
        if let Err(violation) = &result {
            debug!("tree failed validation: {violation}");
        }
        result
    }

    fn find_violation(&self) -> Result<(), Violation<'_, V>> {
        let Some(root) = self.root() else {
            return Ok(());
        };
        if root.parent().is_some() {
            return Err(Violation::RootHasParent);
        }

        // Children are checked when popped. Pushing right before left checks a left child and its
        // whole subtree before its right sibling.
        let mut stack = Vec::new();
        push_children(&mut stack, root);
        while let Some((parent, child, side)) = stack.pop() {
            self.check_child(parent, child, side)?;
            push_children(&mut stack, child);
        }
        Ok(())
    }

    fn check_child<'a>(
        &self,
        parent: &'a Node<V>,
        child: &'a Node<V>,
        side: Side,
    ) -> Result<(), Violation<'a, V>> {
        let (parent_value, child_value) = (parent.value(), child.value());
        match side {
            Side::Left if self.comparator().less(parent_value, child_value) => {
                return Err(Violation::LeftGreater {
                    parent: parent_value,
                    child: child_value,
                });
            }
            Side::Right if self.comparator().less(child_value, parent_value) => {
                return Err(Violation::RightLess {
                    parent: parent_value,
                    child: child_value,
                });
            }
            _ => {}
        }

        if !child.parent().map_or(false, |p| ptr::eq(p, parent)) {
            return Err(Violation::BrokenParentLink {
                parent: parent_value,
                child: child_value,
            });
        }
        Ok(())
    }
}

fn push_children<'a, V>(stack: &mut Vec<(&'a Node<V>, &'a Node<V>, Side)>, node: &'a Node<V>) {
    if let Some(right) = node.right() {
        stack.push((node, right, Side::Right));
    }
    if let Some(left) = node.left() {
        stack.push((node, left, Side::Left));
    }
}
