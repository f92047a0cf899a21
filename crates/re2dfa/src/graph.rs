//! The arena-backed automaton graph shared by the NFA and DFA stages

use std::{collections::BTreeSet, ops};

use hashbrown::HashSet;

use crate::closure_builder::ClosureBuilder;

/// Per-node marker bits
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Flags(u8);

impl Flags {
    /// The unique entry node
    pub const START: Self = Self(1 << 0);
    /// An accepting node
    pub const FINAL: Self = Self(1 << 1);
    /// Transient traversal marker, cleared after every pass that sets it
    pub const VISITED: Self = Self(1 << 2);
    /// Transient liveness marker, cleared after every pass that sets it
    pub const ACTIVE: Self = Self(1 << 3);
    /// All transient markers
    pub const TRANSIENT: Self = Self(Self::VISITED.0 | Self::ACTIVE.0);

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }

    #[inline]
    pub fn insert(&mut self, other: Self) { self.0 |= other.0; }

    #[inline]
    pub fn remove(&mut self, other: Self) { self.0 &= !other.0; }
}

impl ops::BitOr for Flags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self { Self(self.0 | rhs.0) }
}

/// A labelled transition
///
/// A symbol of `None` is an epsilon transition.  Edges order by destination
/// first, then by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub to: usize,
    pub sym: Option<char>,
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn is_epsilon(&self) -> bool { self.sym.is_none() }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) edges: Vec<Edge>,
    pub(crate) flags: Flags,
}

impl Node {
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> Flags { self.flags }

    #[inline]
    #[must_use]
    pub fn is_start(&self) -> bool { self.flags.contains(Flags::START) }

    #[inline]
    #[must_use]
    pub fn is_final(&self) -> bool { self.flags.contains(Flags::FINAL) }

    /// Destinations of all edges labelled `sym`
    #[inline]
    pub fn targets(&self, sym: Option<char>) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.sym == sym)
            .map(|e| e.to)
    }
}

/// An automaton over dense node indices `0..len()`
///
/// Every edge destination is a valid index and at most one node carries
/// [`Flags::START`].  A graph with no nodes has no meaningful start.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    start: usize,
}

impl Graph {
    #[inline]
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a graph holding a single node, marked as the start
    #[must_use]
    pub fn with_start() -> Self {
        let mut me = Self::new();
        let start = me.push();
        me.set_start(start);
        me
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    #[inline]
    #[must_use]
    pub fn start(&self) -> usize { self.start }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    #[inline]
    #[must_use]
    pub fn node(&self, id: usize) -> &Node { &self.nodes[id] }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: usize) -> &mut Node { &mut self.nodes[id] }

    /// Append a fresh node with no edges or flags, returning its index
    #[inline]
    pub fn push(&mut self) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::default());
        id
    }

    /// Add an edge from `from` to `to` labelled `sym`
    ///
    /// # Panics
    /// Panics if either node does not exist.
    #[inline]
    pub fn connect(&mut self, from: usize, to: usize, sym: Option<char>) {
        assert!(to < self.nodes.len(), "Edge to nonexistent node {to}");
        self.nodes[from].edges.push(Edge { to, sym });
    }

    /// Move the start marker to `id`
    pub fn set_start(&mut self, id: usize) {
        if let Some(old) = self.nodes.get_mut(self.start) {
            old.flags.remove(Flags::START);
        }

        self.nodes[id].flags.insert(Flags::START);
        self.start = id;
    }

    #[inline]
    pub fn mark_final(&mut self, id: usize) { self.nodes[id].flags.insert(Flags::FINAL); }

    #[inline]
    #[must_use]
    pub fn is_final(&self, id: usize) -> bool { self.nodes[id].is_final() }

    /// Indices of every accepting node, in ascending order
    #[inline]
    pub fn finals(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.is_final().then_some(i))
    }

    /// Clear the traversal markers from every node
    pub fn clear_transient(&mut self) {
        for node in &mut self.nodes {
            node.flags.remove(Flags::TRANSIENT);
        }
    }

    #[must_use]
    pub fn edge_count(&self) -> usize { self.nodes.iter().map(|n| n.edges.len()).sum() }

    #[must_use]
    pub fn has_epsilon(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| n.edges.iter().any(Edge::is_epsilon))
    }

    /// Test that no node has an epsilon edge or more than one edge for the
    /// same symbol
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.nodes.iter().all(|n| {
            let mut seen = HashSet::new();
            n.edges.iter().all(|e| e.sym.is_some_and(|s| seen.insert(s)))
        })
    }

    /// Rebuild the graph from the nodes for which `keep` is true, renumbering
    /// the survivors consecutively in their original order
    ///
    /// Edges into removed nodes are dropped.  The caller must keep the start
    /// node.
    pub(crate) fn retain(&mut self, keep: impl Fn(usize, &Node) -> bool) {
        let mut remap = vec![None; self.nodes.len()];
        let mut next = 0;

        for (i, node) in self.nodes.iter().enumerate() {
            if keep(i, node) {
                remap[i] = Some(next);
                next += 1;
            }
        }

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .zip(&remap)
            .filter(|(_, m)| m.is_some())
            .map(|(mut node, _)| {
                node.edges = node
                    .edges
                    .into_iter()
                    .filter_map(|Edge { to, sym }| remap[to].map(|to| Edge { to, sym }))
                    .collect();
                node
            })
            .collect();

        self.start = remap[self.start].unwrap_or_else(|| unreachable!("Start node was removed"));
    }

    fn epsilon_close(&self, closure: &mut ClosureBuilder<usize>, set: &mut BTreeSet<usize>) {
        closure.solve(set, move |n| self.nodes[n].targets(None));
    }

    /// Test whether the automaton accepts exactly `input`
    ///
    /// Simulates the automaton over sets of nodes, following epsilon edges,
    /// so this is valid at every stage of the pipeline.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let mut closure = ClosureBuilder::default();
        let mut current = BTreeSet::new();
        closure.init([self.start]);
        self.epsilon_close(&mut closure, &mut current);

        for c in input.chars() {
            closure.init(current.iter().flat_map(move |&n| self.nodes[n].targets(Some(c))));
            current.clear();
            self.epsilon_close(&mut closure, &mut current);

            if current.is_empty() {
                return false;
            }
        }

        current.iter().any(|&n| self.nodes[n].is_final())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn chain() -> Graph {
        let mut g = Graph::with_start();
        let a = g.push();
        let b = g.push();
        g.connect(0, a, Some('x'));
        g.connect(a, b, None);
        g.connect(b, a, None);
        g.mark_final(b);
        g
    }

    #[test]
    fn flags() {
        let mut f = Flags::START | Flags::VISITED;
        assert!(f.contains(Flags::START));
        f.remove(Flags::TRANSIENT);
        assert_eq!(f, Flags::START);
        assert!(!f.contains(Flags::FINAL));
    }

    #[test]
    fn single_start() {
        let mut g = chain();
        g.set_start(2);
        assert_eq!(g.nodes().iter().filter(|n| n.is_start()).count(), 1);
        assert_eq!(g.start(), 2);
    }

    #[test]
    fn accepts_through_epsilon_cycle() {
        let g = chain();
        assert!(g.accepts("x"));
        assert!(!g.accepts(""));
        assert!(!g.accepts("xx"));
        assert!(g.has_epsilon());
        assert!(!g.is_deterministic());
    }

    #[test]
    fn retain_renumbers() {
        let mut g = chain();
        let dead = g.push();
        g.connect(0, dead, Some('y'));
        g.mark_final(dead);
        g.retain(|i, _| i != 1);

        assert_eq!(g.len(), 3);
        assert_eq!(g.finals().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(g.node(0).edges(), [Edge { to: 2, sym: Some('y') }]);
        assert!(g.node(1).edges().is_empty());
    }
}
