//! Thompson's construction of an epsilon-NFA from a postfix expression

use tracing::trace;

use crate::{
    error::{Malformed, Result},
    graph::Graph,
    token::{Classifier, Op, Token},
};

/// A partially-built sub-automaton
///
/// `finish` has no outgoing edges until an enclosing operator connects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub start: usize,
    pub finish: usize,
}

#[derive(Debug)]
pub struct NfaBuilder<'a> {
    cls: Classifier<'a>,
    graph: Graph,
    stack: Vec<Fragment>,
}

impl<'a> NfaBuilder<'a> {
    #[inline]
    #[must_use]
    pub fn new(cls: Classifier<'a>) -> Self {
        Self {
            cls,
            graph: Graph::new(),
            stack: vec![],
        }
    }

    /// Build an automaton with exactly one start and one final node from a
    /// postfix expression
    ///
    /// # Errors
    /// Returns [`Malformed`] if an operator is missing operands, if the
    /// expression does not reduce to exactly one fragment, or if it contains
    /// a character that cannot appear in postfix form.
    pub fn build(cls: Classifier<'a>, postfix: &str) -> Result<Graph> {
        let mut me = Self::new(cls);

        for (pos, tok) in cls.tokens(postfix) {
            me.step(pos, tok)?;
        }

        me.finish()
    }

    #[inline]
    fn fresh(&mut self) -> Fragment {
        Fragment {
            start: self.graph.push(),
            finish: self.graph.push(),
        }
    }

    #[inline]
    fn eps(&mut self, from: usize, to: usize) { self.graph.connect(from, to, None); }

    #[inline]
    fn pop(&mut self, op: Op, pos: usize) -> Result<Fragment, Malformed> {
        self.stack.pop().ok_or(Malformed::MissingOperand { op, pos })
    }

    fn pop2(&mut self, op: Op, pos: usize) -> Result<(Fragment, Fragment), Malformed> {
        if self.stack.len() < 2 {
            return Err(Malformed::MissingOperand { op, pos });
        }

        let rhs = self.pop(op, pos)?;
        let lhs = self.pop(op, pos)?;
        Ok((lhs, rhs))
    }

    /// Consume one postfix token
    ///
    /// # Errors
    /// See [`Self::build`].
    pub fn step(&mut self, pos: usize, tok: Token) -> Result<(), Malformed> {
        let op = match tok {
            Token::Symbol(c) => {
                let frag = self.fresh();
                self.graph.connect(frag.start, frag.finish, Some(c));
                self.stack.push(frag);
                return Ok(());
            },
            Token::Op(op) => op,
            Token::LParen => return Err(Malformed::Unexpected { ch: '(', pos }),
            Token::RParen => return Err(Malformed::Unexpected { ch: ')', pos }),
            Token::Invalid(ch) => return Err(Malformed::Unexpected { ch, pos }),
        };

        let frag = match op {
            Op::Cat => {
                let (x, y) = self.pop2(op, pos)?;
                self.eps(x.finish, y.start);

                Fragment {
                    start: x.start,
                    finish: y.finish,
                }
            },
            Op::Alt => {
                let (x, y) = self.pop2(op, pos)?;
                let frag = self.fresh();
                self.eps(frag.start, x.start);
                self.eps(frag.start, y.start);
                self.eps(x.finish, frag.finish);
                self.eps(y.finish, frag.finish);
                frag
            },
            Op::Star | Op::Plus | Op::Opt => {
                let x = self.pop(op, pos)?;
                let frag = self.fresh();
                self.eps(frag.start, x.start);

                if op != Op::Plus {
                    self.eps(frag.start, frag.finish);
                }

                if op != Op::Opt {
                    self.eps(x.finish, x.start);
                }

                self.eps(x.finish, frag.finish);
                frag
            },
        };

        self.stack.push(frag);
        Ok(())
    }

    /// Mark the single remaining fragment's ends and return the graph
    ///
    /// # Errors
    /// Returns [`Malformed::Empty`] or [`Malformed::Leftover`] if there is
    /// not exactly one fragment left.
    pub fn finish(self) -> Result<Graph> {
        let Self {
            mut graph, stack, ..
        } = self;

        let frag = match stack.as_slice() {
            &[frag] => frag,
            [] => return Err(Malformed::Empty.into()),
            s => return Err(Malformed::Leftover(s.len()).into()),
        };

        graph.set_start(frag.start);
        graph.mark_final(frag.finish);
        trace!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "Built epsilon-NFA"
        );

        Ok(graph)
    }

    #[inline]
    #[must_use]
    pub fn classifier(&self) -> &Classifier<'a> { &self.cls }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{alphabet::Alphabet, error::Error};

    fn build(postfix: &str) -> Result<Graph> {
        let ab = Alphabet::new("ab".chars()).unwrap();
        NfaBuilder::build(Classifier::new(&ab), postfix)
    }

    #[test]
    fn symbol() {
        let g = build("a").unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.start(), 0);
        assert_eq!(g.finals().collect::<Vec<_>>(), [1]);
        assert!(g.accepts("a"));
        assert!(!g.accepts("b"));
    }

    #[test]
    fn thompson_shapes() {
        let g = build("ab|").unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.start(), 4);

        let g = build("a*").unwrap();
        assert_eq!(g.edge_count(), 5);
        assert!(g.accepts("") && g.accepts("aaa"));

        let g = build("a+").unwrap();
        assert_eq!(g.edge_count(), 4);
        assert!(!g.accepts("") && g.accepts("aa"));

        let g = build("a?").unwrap();
        assert_eq!(g.edge_count(), 4);
        assert!(g.accepts("") && g.accepts("a") && !g.accepts("aa"));

        let g = build("ab.").unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.start(), 0);
        assert_eq!(g.finals().collect::<Vec<_>>(), [3]);
        assert!(g.accepts("ab"));
    }

    #[test]
    fn one_start_one_final() {
        let g = build("ab|*a.b.b.").unwrap();
        assert_eq!(g.nodes().iter().filter(|n| n.is_start()).count(), 1);
        assert_eq!(g.finals().count(), 1);
    }

    #[test]
    fn malformed() {
        assert_eq!(
            build("*a.").unwrap_err(),
            Error::MalformedExpression(Malformed::MissingOperand { op: Op::Star, pos: 0 })
        );
        assert_eq!(
            build("a|").unwrap_err(),
            Error::MalformedExpression(Malformed::MissingOperand { op: Op::Alt, pos: 1 })
        );
        assert_eq!(build("").unwrap_err(), Error::from(Malformed::Empty));
        assert_eq!(build("ab").unwrap_err(), Error::from(Malformed::Leftover(2)));
        assert_eq!(
            build("a(").unwrap_err(),
            Error::from(Malformed::Unexpected { ch: '(', pos: 1 })
        );
    }
}
