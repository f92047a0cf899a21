//! Property-testing support: expression generators and a reference matcher

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;

use crate::graph::Graph;

/// Generate well-formed expressions over `alphabet`
pub fn regex(alphabet: &'static [char]) -> impl Strategy<Value = String> {
    prop::sample::select(alphabet)
        .prop_map(String::from)
        .prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l}{r}")),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l}|{r}")),
                inner.clone().prop_map(|r| format!("({r})")),
                (inner, prop::sample::select(vec!['*', '+', '?']))
                    .prop_map(|(r, op)| format!("{r}{op}")),
            ]
        })
}

/// Every string over `alphabet` of length at most `max_len`, shortest first
pub fn strings(alphabet: &[char], max_len: usize) -> impl Iterator<Item = String> + use<> {
    let alphabet = alphabet.to_vec();
    let mut layer = vec![String::new()];
    let mut out = vec![];

    for _ in 0..=max_len {
        let next = layer
            .iter()
            .flat_map(|s| alphabet.iter().map(move |&c| format!("{s}{c}")))
            .collect();
        out.extend(std::mem::replace(&mut layer, next));
    }

    out.into_iter()
}

#[derive(Debug)]
enum Re {
    Sym(char),
    Cat(Box<Re>, Box<Re>),
    Alt(Box<Re>, Box<Re>),
    Star(Box<Re>),
    Plus(Box<Re>),
    Opt(Box<Re>),
}

struct Parser<'a>(std::iter::Peekable<std::str::Chars<'a>>);

impl Parser<'_> {
    fn alt(&mut self) -> Re {
        let mut re = self.cat();

        while self.0.next_if_eq(&'|').is_some() {
            re = Re::Alt(re.into(), self.cat().into());
        }

        re
    }

    fn cat(&mut self) -> Re {
        let mut re = self.post();

        while self.0.peek().is_some_and(|&c| c != '|' && c != ')') {
            re = Re::Cat(re.into(), self.post().into());
        }

        re
    }

    fn post(&mut self) -> Re {
        let mut re = self.atom();

        loop {
            re = match self.0.peek() {
                Some('*') => Re::Star(re.into()),
                Some('+') => Re::Plus(re.into()),
                Some('?') => Re::Opt(re.into()),
                _ => break re,
            };
            self.0.next();
        }
    }

    fn atom(&mut self) -> Re {
        match self.0.next() {
            Some('(') => {
                let re = self.alt();
                assert_eq!(self.0.next(), Some(')'));
                re
            },
            Some(c) => Re::Sym(c),
            None => panic!("Unexpected end of expression"),
        }
    }
}

fn ends(re: &Re, s: &[char], i: usize) -> BTreeSet<usize> {
    fn star(re: &Re, s: &[char], from: BTreeSet<usize>) -> BTreeSet<usize> {
        let mut seen = from.clone();
        let mut q: VecDeque<_> = from.into_iter().collect();

        while let Some(j) = q.pop_front() {
            for k in ends(re, s, j) {
                if seen.insert(k) {
                    q.push_back(k);
                }
            }
        }

        seen
    }

    match re {
        Re::Sym(c) => s.get(i).filter(|&x| x == c).map(|_| i + 1).into_iter().collect(),
        Re::Cat(l, r) => ends(l, s, i)
            .into_iter()
            .flat_map(|j| ends(r, s, j))
            .collect(),
        Re::Alt(l, r) => &ends(l, s, i) | &ends(r, s, i),
        Re::Star(r) => star(r, s, BTreeSet::from([i])),
        Re::Plus(r) => star(r, s, ends(r, s, i)),
        Re::Opt(r) => {
            let mut set = ends(r, s, i);
            set.insert(i);
            set
        },
    }
}

/// Test whether the well-formed expression `re` matches all of `input`, by
/// direct backtracking over its syntax tree
#[must_use]
pub fn reference_match(re: &str, input: &str) -> bool {
    let mut parser = Parser(re.chars().peekable());
    let tree = parser.alt();
    assert!(parser.0.next().is_none(), "Trailing input in {re:?}");

    let input: Vec<_> = input.chars().collect();
    ends(&tree, &input, 0).contains(&input.len())
}

/// Relabel the nodes reachable from the start in breadth-first order,
/// visiting edges by symbol, so that isomorphic deterministic automata
/// produce equal output
#[must_use]
pub fn canonical(graph: &Graph) -> Vec<(bool, Vec<(Option<char>, usize)>)> {
    if graph.is_empty() {
        return vec![];
    }

    let mut ids = vec![None; graph.len()];
    let mut order = vec![graph.start()];
    let mut q = VecDeque::from([graph.start()]);
    ids[graph.start()] = Some(0);

    while let Some(n) = q.pop_front() {
        let mut edges = graph.node(n).edges().to_vec();
        edges.sort_by_key(|e| (e.sym, e.to));

        for e in edges {
            if ids[e.to].is_none() {
                ids[e.to] = Some(order.len());
                order.push(e.to);
                q.push_back(e.to);
            }
        }
    }

    order
        .into_iter()
        .map(|n| {
            let node = graph.node(n);
            let mut edges: Vec<_> = node
                .edges()
                .iter()
                .map(|e| (e.sym, ids[e.to].unwrap_or_else(|| unreachable!())))
                .collect();
            edges.sort_unstable();
            (node.is_final(), edges)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_semantics() {
        assert!(reference_match("(a|b)*abb", "babb"));
        assert!(!reference_match("(a|b)*abb", "abba"));
        assert!(reference_match("ab|b", "b"));
        assert!(!reference_match("ab|b", "ab|b"));
        assert!(reference_match("a+?", ""));
        assert!(reference_match("ab*", "abbb"));
        assert!(!reference_match("ab*", "abab"));
    }

    #[test]
    fn enumerates_strings() {
        let all: Vec<_> = strings(&['a', 'b'], 2).collect();
        assert_eq!(all, ["", "a", "b", "aa", "ab", "ba", "bb"]);
    }

    proptest! {
        #[test]
        fn generated_regexes_parse(re in regex(&['a', 'b'])) {
            let _ = reference_match(&re, "");
        }
    }
}
