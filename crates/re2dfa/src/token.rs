//! Character classification for the expression syntax

use std::fmt;

use crate::alphabet::Alphabet;

/// An expression operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    /// Kleene star, `*`
    Star,
    /// One-or-more, `+`
    Plus,
    /// Zero-or-one, `?`
    Opt,
    /// Explicit concatenation, `.`
    Cat,
    /// Union, `|`
    Alt,
}

impl Op {
    /// Look up the operator spelled by `c`
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '*' => Self::Star,
            '+' => Self::Plus,
            '?' => Self::Opt,
            '.' => Self::Cat,
            '|' => Self::Alt,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Star => '*',
            Self::Plus => '+',
            Self::Opt => '?',
            Self::Cat => '.',
            Self::Alt => '|',
        }
    }

    /// Binding strength of this operator, higher binds tighter
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Star | Self::Plus | Self::Opt => 3,
            Self::Cat => 2,
            Self::Alt => 1,
        }
    }

    /// Whether this is a unary operator written after its operand
    #[inline]
    #[must_use]
    pub const fn is_postfix(self) -> bool { matches!(self, Self::Star | Self::Plus | Self::Opt) }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_char())
    }
}

/// The syntactic category of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A symbol of the alphabet
    Symbol(char),
    Op(Op),
    LParen,
    RParen,
    /// Anything else
    Invalid(char),
}

impl Token {
    /// Whether a concatenation may directly follow this token
    #[inline]
    #[must_use]
    pub fn ends_operand(self) -> bool {
        match self {
            Self::Symbol(_) | Self::RParen => true,
            Self::Op(o) => o.is_postfix(),
            Self::LParen | Self::Invalid(_) => false,
        }
    }

    /// Whether this token may directly follow a concatenation
    #[inline]
    #[must_use]
    pub fn starts_operand(self) -> bool { matches!(self, Self::Symbol(_) | Self::LParen) }
}

/// Assigns a [`Token`] to each character, given an alphabet
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Classifier<'a> {
    #[inline]
    #[must_use]
    pub fn new(alphabet: &'a Alphabet) -> Self { Self { alphabet } }

    #[inline]
    #[must_use]
    pub fn alphabet(&self) -> &'a Alphabet { self.alphabet }

    #[must_use]
    pub fn classify(&self, c: char) -> Token {
        if self.alphabet.contains(c) {
            return Token::Symbol(c);
        }

        if let Some(op) = Op::from_char(c) {
            return Token::Op(op);
        }

        match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            c => Token::Invalid(c),
        }
    }

    /// Classify every character of `s`, paired with its position
    #[inline]
    pub fn tokens<'s>(&self, s: &'s str) -> impl Iterator<Item = (usize, Token)> + use<'a, 's> {
        let me = *self;
        s.chars().enumerate().map(move |(i, c)| (i, me.classify(c)))
    }
}
