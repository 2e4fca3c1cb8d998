use ordtree::sort::{tree_sort, tree_sort_by};

#[quickcheck]
fn sorts_like_std(xs: Vec<i32>) -> bool {
    let mut expected = xs.clone();
    expected.sort();

    tree_sort(xs) == expected
}

#[quickcheck]
fn sorts_stably(xs: Vec<(u8, u8)>) -> bool {
    let mut expected = xs.clone();
    // `sort_by_key` is stable.
    expected.sort_by_key(|pair| pair.0);

    tree_sort_by(xs, |a: &(u8, u8), b: &(u8, u8)| a.0 < b.0) == expected
}
