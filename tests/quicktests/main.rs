#[macro_use]
extern crate quickcheck_macros;

mod sort;
mod tree;

use quickcheck::{Arbitrary, Gen};
use simplelog::{Config, LevelFilter, TestLogger};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<V> {
    /// Insert the V into the data structure
    Insert(V),
    /// Remove the V from the data structure
    Remove(V),
}

impl<V> Arbitrary for Op<V>
where
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(V::arbitrary(g))
        } else {
            Op::Remove(V::arbitrary(g))
        }
    }
}

/// Routes the tree's `log` output to the test harness. Every test calls this, so only the first
/// call installs the logger and the "already set" error from the rest is ignored on purpose.
pub(crate) fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
