//! Graphviz DOT export

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::{self, Display},
};

use indexmap::IndexMap;

macro_rules! attr {
    ($id:ident, $name:literal) => {
        pub fn $id<S: Into<Cow<'a, str>>>(&mut self, $id: S) -> &mut Self {
            self.attrs.insert($name, $id.into());
            self
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphType {
    Undirected,
    Directed,
}

impl Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Undirected => "graph",
            Self::Directed => "digraph",
        })
    }
}

/// A DOT document
#[derive(Debug)]
pub struct Graph<'a> {
    ty: GraphType,
    attrs: BTreeMap<&'static str, Cow<'a, str>>,
    nodes: IndexMap<Cow<'a, str>, Node<'a>>,
    edges: IndexMap<(Cow<'a, str>, Cow<'a, str>), Vec<Edge<'a>>>,
}

impl<'a> Graph<'a> {
    attr!(label, "label");

    attr!(rankdir, "rankdir");

    #[must_use]
    #[inline]
    pub fn new(ty: GraphType) -> Self {
        Self {
            ty,
            attrs: BTreeMap::new(),
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    #[inline]
    pub fn node<S: Into<Cow<'a, str>>>(&mut self, id: S) -> &mut Node<'a> {
        self.nodes.entry(id.into()).or_default()
    }

    #[inline]
    pub fn edge<L: Into<Cow<'a, str>>, R: Into<Cow<'a, str>>>(
        &mut self,
        l: L,
        r: R,
    ) -> &mut Edge<'a> {
        let l = l.into();
        let r = r.into();
        self.node(l.clone());
        self.node(r.clone());
        let edges = self.edges.entry((l, r)).or_default();
        edges.push(Edge::default());
        edges.last_mut().unwrap_or_else(|| unreachable!())
    }
}

#[derive(Default)]
struct AttrState {
    any: bool,
}

impl AttrState {
    fn write_one(
        &mut self,
        f: &mut fmt::Formatter,
        key: &'static str,
        val: impl FnOnce(&mut fmt::Formatter) -> fmt::Result,
    ) -> fmt::Result {
        f.write_str(if self.any {
            ","
        } else {
            self.any = true;
            "["
        })?;

        f.write_str(key)?;
        f.write_str("=")?;
        val(f)
    }

    fn finish(self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.any { f.write_str("]") } else { Ok(()) }
    }

    fn write_all(f: &mut fmt::Formatter, attrs: &BTreeMap<&'static str, Cow<str>>) -> fmt::Result {
        let mut state = Self::default();

        for (key, val) in attrs {
            state.write_one(f, key, |f| write!(f, "{val:?}"))?;
        }

        state.finish(f)
    }
}

impl Display for Graph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            ty,
            attrs,
            nodes,
            edges,
        } = self;

        write!(f, "{ty} {{")?;

        for (key, val) in attrs {
            write!(f, "{key}={val:?};")?;
        }

        for (id, Node { attrs }) in nodes {
            write!(f, "{id:?}")?;
            AttrState::write_all(f, attrs)?;
            f.write_str(";")?;
        }

        for ((l, r), edges) in edges {
            for Edge { attrs } in edges {
                write!(f, "{l:?}{}{r:?}", match ty {
                    GraphType::Undirected => "--",
                    GraphType::Directed => "->",
                })?;
                AttrState::write_all(f, attrs)?;
                f.write_str(";")?;
            }
        }

        f.write_str("}")
    }
}

#[derive(Debug, Default)]
pub struct Node<'a> {
    attrs: BTreeMap<&'static str, Cow<'a, str>>,
}

impl<'a> Node<'a> {
    attr!(style, "style");

    attr!(shape, "shape");

    attr!(label, "label");

    attr!(border_count, "peripheries");
}

#[derive(Debug, Default)]
pub struct Edge<'a> {
    attrs: BTreeMap<&'static str, Cow<'a, str>>,
}

impl<'a> Edge<'a> {
    attr!(style, "style");

    attr!(label, "label");
}

impl crate::graph::Graph {
    /// Render this automaton as a directed graph
    ///
    /// Final nodes are drawn with a double border and the start node is
    /// pointed to by an edge from an invisible node.  Epsilon edges are
    /// dashed and labelled `ϵ`.
    #[must_use]
    pub fn dot(&self) -> Graph<'static> {
        let mut graph = Graph::new(GraphType::Directed);
        graph.rankdir("LR");

        for (i, node) in self.nodes().iter().enumerate() {
            let n = graph.node(i.to_string());
            n.label(format!("q{i}")).shape("circle");

            if node.is_final() {
                n.border_count("2");
            }

            for e in node.edges() {
                let edge = graph.edge(i.to_string(), e.to.to_string());

                if let Some(c) = e.sym {
                    edge.label(c.to_string());
                } else {
                    edge.label("ϵ").style("dashed");
                }
            }
        }

        if !self.is_empty() {
            graph
                .node("_start")
                .style("invis")
                .shape("point")
                .label("");
            graph.edge("_start", self.start().to_string());
        }

        graph
    }
}

#[cfg(test)]
mod test {
    use crate::graph::Graph;

    #[test]
    fn state_machine() {
        let mut g = Graph::with_start();
        let x = g.push();
        g.connect(0, x, Some('a'));
        g.connect(x, 0, None);
        g.mark_final(x);

        assert_eq!(
            g.dot().to_string(),
            "digraph {rankdir=\"LR\";\
             \"0\"[label=\"q0\",shape=\"circle\"];\
             \"1\"[label=\"q1\",peripheries=\"2\",shape=\"circle\"];\
             \"_start\"[label=\"\",shape=\"point\",style=\"invis\"];\
             \"0\"->\"1\"[label=\"a\"];\
             \"1\"->\"0\"[label=\"ϵ\",style=\"dashed\"];\
             \"_start\"->\"0\";}"
        );
    }
}
