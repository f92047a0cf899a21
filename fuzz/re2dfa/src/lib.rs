use arbitrary::Arbitrary;
use re2dfa::{Alphabet, Compiler, Options, prop};

const MAX_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Symbol {
    A,
    B,
    C,
}

impl Symbol {
    fn as_char(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
        }
    }
}

#[derive(Debug, Clone, Copy, Arbitrary)]
pub enum Char {
    Sym(Symbol),
    Star,
    Plus,
    Opt,
    Pipe,
    LPar,
    RPar,
    Junk,
}

impl Char {
    fn as_char(self) -> char {
        match self {
            Self::Sym(s) => s.as_char(),
            Self::Star => '*',
            Self::Plus => '+',
            Self::Opt => '?',
            Self::Pipe => '|',
            Self::LPar => '(',
            Self::RPar => ')',
            Self::Junk => '#',
        }
    }
}

#[derive(Debug, Arbitrary)]
pub struct Input {
    alphabet: Vec<Symbol>,
    regex: Vec<Char>,
    prune: bool,
}

impl Input {
    pub fn run(&self) {
        let Ok(alphabet) = Alphabet::new(self.alphabet.iter().map(|s| s.as_char())) else {
            return;
        };
        let regex: String = self.regex.iter().take(MAX_LEN).map(|c| c.as_char()).collect();
        let compiler = Compiler::new(&alphabet, Options { prune: self.prune });

        let Ok(parsed) = compiler.parse(&regex) else {
            return;
        };
        let Ok(nfa) = compiler.epsilon_nfa(&parsed) else {
            assert!(compiler.compile(&regex).is_err());
            return;
        };
        let dfa = compiler.compile(&regex).unwrap().dfa;

        assert!(dfa.is_deterministic());
        assert_eq!(dfa.nodes().iter().filter(|n| n.is_start()).count(), 1);

        let syms: Vec<_> = alphabet.iter().collect();
        for s in prop::strings(&syms, 4) {
            assert_eq!(nfa.accepts(&s), dfa.accepts(&s), "{regex:?} on {s:?}");
        }
    }
}
