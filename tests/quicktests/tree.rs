use ordtree::{DuplicatePolicy, Order, Tree};

use std::collections::{BTreeMap, HashSet};

use crate::{init_logging, Op};

/// Collects the values of `tree` in the given order.
fn walk<C>(tree: &Tree<i8, C>, order: Order) -> Vec<i8> {
    let mut values = Vec::new();
    tree.traverse(order, |node| {
        values.push(*node.value());
        true
    });
    values
}

/// Applies a set of operations to a tree and a counting map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we hold the same values the same number of times.
fn do_ops<C>(ops: &[Op<i8>], bst: &mut Tree<i8, C>, counts: &mut BTreeMap<i8, usize>)
where
    C: ordtree::Compare<i8>,
{
    let allow = bst.policy() == DuplicatePolicy::Allow;
    for op in ops {
        match op {
            Op::Insert(v) => {
                bst.insert(*v);
                let count = counts.entry(*v).or_insert(0);
                if allow || *count == 0 {
                    *count += 1;
                }
            }
            Op::Remove(v) => {
                let deleted = bst.delete(v);
                match counts.get_mut(v) {
                    Some(count) => {
                        assert!(deleted);
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(v);
                        }
                    }
                    None => assert!(!deleted),
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree: Tree<i8> = Tree::default();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    tree.validate().is_ok()
        && tree.len() == counts.len()
        && counts.keys().all(|key| tree.search(key).map(|n| n.value()) == Some(key))
}

#[quickcheck]
fn fuzz_multiple_operations_with_duplicates(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = Tree::with_policy(|a: &i8, b: &i8| a < b, DuplicatePolicy::Allow);
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let expected: Vec<i8> = counts
        .iter()
        .flat_map(|(value, count)| std::iter::repeat(*value).take(*count))
        .collect();

    tree.validate().is_ok() && walk(&tree, Order::InOrder) == expected
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
}

#[quickcheck]
fn in_order_is_sorted_and_reverse_mirrors_it(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let ascending = walk(&tree, Order::LNR);
    let mut descending = walk(&tree, Order::RNL);
    descending.reverse();

    ascending.windows(2).all(|pair| pair[0] < pair[1]) && ascending == descending
}

#[quickcheck]
fn duplicate_insert_keeps_shape(xs: Vec<i8>, dup: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let before = (walk(&tree, Order::NLR), walk(&tree, Order::LRN));

    let inserted = tree.insert(xs[dup % xs.len()]);

    !inserted && before == (walk(&tree, Order::NLR), walk(&tree, Order::LRN))
}

#[test]
fn scenario() {
    init_logging();
    let values = [10, 5, 11, 7, 24, 4, 3, 9, 8, 6, 20, 21, 19];
    let mut tree = Tree::new(|a: &i8, b: &i8| a < b);
    for value in values {
        tree.insert(value);
    }

    assert_eq!(tree.len(), 13);
    assert_eq!(tree.min(), Some(&3));
    assert_eq!(tree.max(), Some(&24));
    assert_eq!(
        walk(&tree, Order::LNR),
        [3, 4, 5, 6, 7, 8, 9, 10, 11, 19, 20, 21, 24]
    );

    assert!(!tree.delete(&99));
    assert_eq!(tree.len(), 13);

    assert!(tree.delete(&10));
    assert!(tree.search(&10).is_none());
    assert_eq!(tree.len(), 12);
    assert!(tree.validate().is_ok());
}
