//! The full regex-to-DFA pipeline

use tracing::{debug, debug_span};

use crate::{
    alphabet::Alphabet,
    dfa::{self, DfaBuilder},
    epsilon,
    error::Result,
    graph::Graph,
    infix,
    nfa::NfaBuilder,
    token::Classifier,
};

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Remove unreachable and dead states from the DFA
    pub prune: bool,
}

impl Default for Options {
    fn default() -> Self { Self { prune: true } }
}

/// The syntactic forms of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The input with explicit concatenation operators
    pub concat: String,
    /// The postfix form of [`Self::concat`]
    pub postfix: String,
}

/// A successfully compiled expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub parsed: Parsed,
    pub dfa: Graph,
}

/// Compiles expressions over a fixed alphabet
///
/// Compilers hold no mutable state, so one may be shared freely and every
/// call owns its own graphs.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    alphabet: &'a Alphabet,
    opts: Options,
}

impl<'a> Compiler<'a> {
    #[inline]
    #[must_use]
    pub fn new(alphabet: &'a Alphabet, opts: Options) -> Self { Self { alphabet, opts } }

    #[inline]
    #[must_use]
    pub fn alphabet(&self) -> &'a Alphabet { self.alphabet }

    #[inline]
    fn classifier(&self) -> Classifier<'a> { Classifier::new(self.alphabet) }

    /// Make concatenation explicit and convert to postfix
    ///
    /// # Errors
    /// Returns an error for characters outside the alphabet and for
    /// unbalanced parentheses.
    pub fn parse(&self, regex: &str) -> Result<Parsed> {
        let cls = self.classifier();
        let concat = infix::insert_concat(&cls, regex);
        debug!(%concat, "Inserted explicit concatenation");
        let postfix = infix::to_postfix(&cls, &concat)?;
        debug!(%postfix, "Converted to postfix");

        Ok(Parsed { concat, postfix })
    }

    /// Build the epsilon-NFA for a parsed expression
    ///
    /// # Errors
    /// Returns an error if the postfix form is malformed.
    pub fn epsilon_nfa(&self, parsed: &Parsed) -> Result<Graph> {
        let nfa = NfaBuilder::build(self.classifier(), &parsed.postfix)?;
        debug!(nodes = nfa.len(), edges = nfa.edge_count(), "Built epsilon-NFA");
        Ok(nfa)
    }

    /// Build the lambda-free NFA for a parsed expression
    ///
    /// # Errors
    /// Returns an error if the postfix form is malformed.
    pub fn nfa(&self, parsed: &Parsed) -> Result<Graph> {
        let mut nfa = self.epsilon_nfa(parsed)?;
        epsilon::eliminate(&mut nfa);
        Ok(nfa)
    }

    /// Determinize a lambda-free NFA, pruning it if configured to
    #[must_use]
    pub fn determinize(&self, nfa: &Graph) -> Graph {
        let mut dfa = DfaBuilder::new(nfa, self.alphabet).build();
        debug!(nodes = dfa.len(), edges = dfa.edge_count(), "Built DFA");

        if self.opts.prune {
            dfa::prune(&mut dfa);
            debug!(nodes = dfa.len(), edges = dfa.edge_count(), "Pruned DFA");
        }

        dfa
    }

    /// Run the whole pipeline
    ///
    /// # Errors
    /// Returns an error if the expression is invalid.  No automaton is
    /// produced in that case.
    pub fn compile(&self, regex: &str) -> Result<Compiled> {
        let _span = debug_span!("compile", regex).entered();

        let parsed = self.parse(regex)?;
        let nfa = self.nfa(&parsed)?;
        let dfa = self.determinize(&nfa);

        Ok(Compiled { parsed, dfa })
    }
}
