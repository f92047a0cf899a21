//! Determinization and cleanup of lambda-free automata

mod builder;
mod prune;

pub use builder::DfaBuilder;
pub use prune::prune;

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use crate::{Alphabet, Compiler, Options, prop};

    fn compile(re: &str, prune: bool) -> crate::Graph {
        let ab = Alphabet::new("ab".chars()).unwrap();
        Compiler::new(&ab, Options { prune })
            .compile(re)
            .unwrap()
            .dfa
    }

    #[test]
    fn textbook_abb() {
        let dfa = compile("(a|b)*abb", true);
        assert_eq!(dfa.len(), 5);
        assert_eq!(dfa.start(), 0);
        assert_eq!(dfa.finals().collect::<Vec<_>>(), [4]);

        let delta = |q: usize, c: char| dfa.node(q).targets(Some(c)).collect::<Vec<_>>();
        let expected = [(1, 2), (1, 3), (1, 2), (1, 4), (1, 2)];

        for (q, (a, b)) in expected.into_iter().enumerate() {
            assert_eq!(delta(q, 'a'), [a], "δ(q{q}, a)");
            assert_eq!(delta(q, 'b'), [b], "δ(q{q}, b)");
        }
    }

    #[test]
    fn operator_semantics() {
        let plus = compile("a+", true);
        assert!(plus.accepts("a") && plus.accepts("aaa"));
        assert!(!plus.accepts(""));

        let opt = compile("a?", true);
        assert!(opt.accepts("") && opt.accepts("a"));
        assert!(!opt.accepts("aa"));

        let star = compile("a*", true);
        assert!(star.accepts("") && star.accepts("aaaa"));
        assert!(!star.accepts("ab"));
    }

    proptest! {
        #[test]
        fn deterministic(re in prop::regex(&['a', 'b']), prune in any::<bool>()) {
            let dfa = compile(&re, prune);
            prop_assert!(dfa.is_deterministic());
            prop_assert!(!dfa.has_epsilon());
            prop_assert_eq!(dfa.nodes().iter().filter(|n| n.is_start()).count(), 1);
        }

        #[test]
        fn matches_reference(re in prop::regex(&['a', 'b']), prune in any::<bool>()) {
            let dfa = compile(&re, prune);

            for s in prop::strings(&['a', 'b'], 6) {
                prop_assert_eq!(
                    dfa.accepts(&s),
                    prop::reference_match(&re, &s),
                    "{:?} on {:?}",
                    re,
                    s
                );
            }
        }

        #[test]
        fn idempotent(re in prop::regex(&['a', 'b'])) {
            let lhs = compile(&re, true);
            let rhs = compile(&re, true);
            prop_assert_eq!(prop::canonical(&lhs), prop::canonical(&rhs));
        }
    }
}
