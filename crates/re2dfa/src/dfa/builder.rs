use std::collections::{BTreeSet, VecDeque};

use hashbrown::{HashMap, hash_map::Entry};
use tracing::trace;

use crate::{alphabet::Alphabet, graph::Graph};

/// Powerset construction over a lambda-free automaton
///
/// Each DFA node stands for one set of NFA nodes.  Sets are keyed in their
/// sorted form, so a set reached along different paths always resolves to
/// the same DFA node.
#[derive(Debug, Clone, Copy)]
pub struct DfaBuilder<'a> {
    nfa: &'a Graph,
    alphabet: &'a Alphabet,
}

impl<'a> DfaBuilder<'a> {
    /// Prepare to determinize `nfa`, which must have no epsilon edges
    #[inline]
    #[must_use]
    pub fn new(nfa: &'a Graph, alphabet: &'a Alphabet) -> Self {
        debug_assert!(!nfa.has_epsilon());
        Self { nfa, alphabet }
    }

    fn step(&self, set: &BTreeSet<usize>, c: char) -> BTreeSet<usize> {
        set.iter()
            .flat_map(|&n| self.nfa.node(n).targets(Some(c)))
            .collect()
    }

    /// Build the DFA, numbering nodes in breadth-first discovery order from
    /// node 0, the start
    ///
    /// Symbols with no successor produce no edge, so the result has no
    /// explicit trap node.
    #[must_use]
    pub fn build(&self) -> Graph {
        let mut dfa = Graph::with_start();

        if self.nfa.is_empty() {
            return dfa;
        }

        let seed = BTreeSet::from([self.nfa.start()]);
        let mut ids: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        let mut q = VecDeque::new();
        ids.insert(seed.clone(), dfa.start());
        q.push_back((seed, dfa.start()));

        while let Some((set, id)) = q.pop_front() {
            if set.iter().any(|&n| self.nfa.is_final(n)) {
                dfa.mark_final(id);
            }

            for c in self.alphabet.iter() {
                let next = self.step(&set, c);

                if next.is_empty() {
                    continue;
                }

                let to = match ids.entry(next) {
                    Entry::Occupied(o) => *o.get(),
                    Entry::Vacant(v) => {
                        let to = dfa.push();
                        q.push_back((v.key().clone(), to));
                        v.insert(to);
                        to
                    },
                };

                dfa.connect(id, to, Some(c));
            }
        }

        trace!(
            nodes = dfa.len(),
            edges = dfa.edge_count(),
            "Built DFA"
        );

        dfa
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merges_equal_sets() {
        // 0 -a-> {1, 2}, 0 -b-> {2, 1} in the other order
        let mut nfa = Graph::with_start();
        let x = nfa.push();
        let y = nfa.push();
        nfa.connect(0, x, Some('a'));
        nfa.connect(0, y, Some('a'));
        nfa.connect(0, y, Some('b'));
        nfa.connect(0, x, Some('b'));
        nfa.mark_final(y);

        let ab = Alphabet::new("ab".chars()).unwrap();
        let dfa = DfaBuilder::new(&nfa, &ab).build();

        assert_eq!(dfa.len(), 2);
        assert_eq!(dfa.node(0).targets(Some('a')).collect::<Vec<_>>(), [1]);
        assert_eq!(dfa.node(0).targets(Some('b')).collect::<Vec<_>>(), [1]);
        assert!(dfa.is_final(1));
        assert!(dfa.is_deterministic());
    }

    #[test]
    fn no_edge_for_empty_successor() {
        let mut nfa = Graph::with_start();
        let x = nfa.push();
        nfa.connect(0, x, Some('a'));

        let ab = Alphabet::new("ab".chars()).unwrap();
        let dfa = DfaBuilder::new(&nfa, &ab).build();

        assert_eq!(dfa.len(), 2);
        assert_eq!(dfa.edge_count(), 1);
        assert_eq!(dfa.finals().count(), 0);
    }
}
