//! Epsilon-closure computation and lambda elimination

use std::collections::BTreeSet;

use tracing::trace;

use crate::{
    closure_builder::ClosureBuilder,
    graph::{Edge, Graph},
};

/// Compute the set of nodes reachable from `node` along epsilon edges only,
/// including `node` itself
#[must_use]
pub fn closure(graph: &Graph, node: usize) -> BTreeSet<usize> {
    let mut builder = ClosureBuilder::default();
    let mut set = BTreeSet::new();
    builder.init([node]);
    builder.solve(&mut set, move |n| graph.node(n).targets(None));
    set
}

/// Remove every epsilon edge from `graph` without changing its language
///
/// First each node is made final if anything in its epsilon closure is final,
/// and given a direct epsilon edge to every member of its closure.  Then
/// every node inherits the symbol edges of its direct epsilon successors,
/// after which all epsilon edges are dropped and each edge list is sorted and
/// deduplicated.
pub fn eliminate(graph: &mut Graph) {
    let closures: Vec<_> = (0..graph.len()).map(|n| closure(graph, n)).collect();

    for (node, reach) in closures.iter().enumerate() {
        if reach.iter().any(|&r| graph.is_final(r)) {
            graph.mark_final(node);
        }

        for &r in reach {
            if r != node {
                graph.connect(node, r, None);
            }
        }
    }

    for node in 0..graph.len() {
        let inherited: Vec<_> = graph
            .node(node)
            .targets(None)
            .flat_map(|succ| graph.node(succ).edges().iter().copied())
            .filter(|e| !e.is_epsilon())
            .collect();

        graph.node_mut(node).edges.extend(inherited);
    }

    for node in 0..graph.len() {
        let edges = &mut graph.node_mut(node).edges;
        edges.retain(|e| !Edge::is_epsilon(e));
        edges.sort_unstable();
        edges.dedup();
    }

    trace!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "Eliminated epsilon edges"
    );
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        alphabet::Alphabet,
        infix,
        nfa::NfaBuilder,
        prop,
        token::Classifier,
    };

    fn nfa(re: &str) -> Graph {
        let ab = Alphabet::new("ab".chars()).unwrap();
        let cls = Classifier::new(&ab);
        let postfix = infix::to_postfix(&cls, &infix::insert_concat(&cls, re)).unwrap();
        NfaBuilder::build(cls, &postfix).unwrap()
    }

    #[test]
    fn closure_of_star() {
        let g = nfa("a*");
        // a: 0 -a-> 1, star: 2 -> {0, 3}, 1 -> {0, 3}
        assert_eq!(closure(&g, 2).into_iter().collect::<Vec<_>>(), [0, 2, 3]);
        assert_eq!(closure(&g, 1).into_iter().collect::<Vec<_>>(), [0, 1, 3]);
        assert_eq!(closure(&g, 0).into_iter().collect::<Vec<_>>(), [0]);
    }

    #[test]
    fn cyclic_closure_terminates() {
        let mut g = Graph::with_start();
        let a = g.push();
        g.connect(0, a, None);
        g.connect(a, 0, None);
        g.connect(a, a, Some('a'));
        g.mark_final(a);
        eliminate(&mut g);

        assert!(!g.has_epsilon());
        assert!(g.is_final(0));
        assert_eq!(g.node(0).edges(), [Edge { to: a, sym: Some('a') }]);
    }

    #[test]
    fn star_becomes_nullable() {
        let mut g = nfa("a*");
        let start = g.start();
        eliminate(&mut g);
        assert!(g.is_final(start));
        assert!(!g.has_epsilon());
    }

    proptest! {
        #[test]
        fn preserves_language(re in prop::regex(&['a', 'b'])) {
            let mut g = nfa(&re);
            let before: Vec<_> = prop::strings(&['a', 'b'], 5).map(|s| g.accepts(&s)).collect();

            eliminate(&mut g);
            prop_assert!(!g.has_epsilon());

            let after: Vec<_> = prop::strings(&['a', 'b'], 5).map(|s| g.accepts(&s)).collect();
            prop_assert_eq!(before, after);
        }
    }
}
