//! Textual rendering of an automaton as a 5-tuple `(Q, Σ, δ, q0, F)`

use std::{collections::BTreeMap, fmt};

use crate::{alphabet::Alphabet, graph::Graph};

struct StateSet<I>(I);

impl<I: Clone + Iterator<Item = usize>> fmt::Display for StateSet<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        for (i, q) in self.0.clone().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }

            write!(f, "q{q}")?;
        }

        f.write_str("}")
    }
}

/// Display adapter printing the formal definition of an automaton
#[derive(Debug, Clone, Copy)]
pub struct FiveTuple<'a> {
    graph: &'a Graph,
    alphabet: &'a Alphabet,
}

impl Graph {
    /// Get a [`Display`](fmt::Display) adapter for the 5-tuple of this
    /// automaton over `alphabet`
    #[inline]
    #[must_use]
    pub fn tuple<'a>(&'a self, alphabet: &'a Alphabet) -> FiveTuple<'a> {
        FiveTuple {
            graph: self,
            alphabet,
        }
    }
}

impl fmt::Display for FiveTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { graph, alphabet } = *self;

        writeln!(f, "Q = {}", StateSet(0..graph.len()))?;
        writeln!(f, "Σ = {alphabet}")?;
        writeln!(f, "δ:")?;

        for (q, node) in graph.nodes().iter().enumerate() {
            let mut by_sym: BTreeMap<Option<char>, Vec<usize>> = BTreeMap::new();
            for e in node.edges() {
                by_sym.entry(e.sym).or_default().push(e.to);
            }

            for (sym, mut to) in by_sym {
                let sym = sym.map_or_else(|| "ϵ".to_owned(), String::from);
                to.sort_unstable();
                to.dedup();

                if let &[to] = to.as_slice() {
                    writeln!(f, "  δ(q{q}, {sym}) = q{to}")?;
                } else {
                    writeln!(f, "  δ(q{q}, {sym}) = {}", StateSet(to.iter().copied()))?;
                }
            }
        }

        if !graph.is_empty() {
            writeln!(f, "q0 = q{}", graph.start())?;
        }

        write!(f, "F = {}", StateSet(graph.finals()))
    }
}

#[cfg(test)]
mod test {
    use crate::{Alphabet, Compiler, Options, graph::Graph};

    #[test]
    fn dfa_tuple() {
        let ab = Alphabet::new("ab".chars()).unwrap();
        let dfa = Compiler::new(&ab, Options::default())
            .compile("ab*")
            .unwrap()
            .dfa;

        assert_eq!(
            dfa.tuple(&ab).to_string(),
            "Q = {q0, q1, q2}\n\
             Σ = {a, b}\n\
             δ:\n  \
             δ(q0, a) = q1\n  \
             δ(q1, b) = q2\n  \
             δ(q2, b) = q2\n\
             q0 = q0\n\
             F = {q1, q2}"
        );
    }

    #[test]
    fn nondeterministic_rows() {
        let mut g = Graph::with_start();
        let x = g.push();
        g.connect(0, x, Some('a'));
        g.connect(0, 0, Some('a'));
        g.connect(x, 0, None);
        g.mark_final(x);

        let ab = Alphabet::new("a".chars()).unwrap();
        let s = g.tuple(&ab).to_string();
        assert!(s.contains("δ(q0, a) = {q0, q1}"), "{s}");
        assert!(s.contains("δ(q1, ϵ) = q0"), "{s}");
    }
}
