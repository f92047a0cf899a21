use std::collections::{BTreeSet, VecDeque};

/// Worklist solver for the transitive closure of a successor function
///
/// Only newly-inserted elements enqueue their successors, so every element
/// is expanded at most once per call to [`Self::solve`] and cycles in the
/// successor relation terminate.
#[derive(Debug)]
pub struct ClosureBuilder<T>(VecDeque<T>);

impl<T> Default for ClosureBuilder<T> {
    #[inline]
    fn default() -> Self { Self(VecDeque::new()) }
}

impl<T> ClosureBuilder<T> {
    /// Seed the worklist, which must have been drained by a previous solve
    #[inline]
    pub fn init<I: IntoIterator<Item = T>>(&mut self, it: I) {
        debug_assert!(self.0.is_empty());
        self.0.clear();
        self.0.extend(it);
    }
}

impl<T: Copy + Ord> ClosureBuilder<T> {
    /// Add the seeds and everything reachable from them through `succ` to
    /// `set`
    ///
    /// Elements already in `set` are treated as explored and are not
    /// expanded again.
    pub fn solve<I: IntoIterator<Item = T>>(
        &mut self,
        set: &mut BTreeSet<T>,
        succ: impl Fn(T) -> I,
    ) {
        while let Some(el) = self.0.pop_front() {
            if set.insert(el) {
                self.0.extend(succ(el));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cycle() {
        let mut c = ClosureBuilder::default();
        let mut set = BTreeSet::new();
        c.init([2_usize]);
        c.solve(&mut set, |n| [(n + 1) % 4]);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [0, 1, 2, 3]);
    }

    #[test]
    fn explored_elements_stop_expansion() {
        let mut c = ClosureBuilder::default();
        let mut set = BTreeSet::from([5_u32]);
        c.init([10]);
        c.solve(&mut set, |n| (n > 0).then(|| n / 2));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [5, 10]);
    }
}
