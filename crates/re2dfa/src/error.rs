//! Errors produced while compiling an expression

use crate::token::Op;

/// Result alias for the compiler pipeline
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons an expression's postfix form cannot be assembled into an automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    /// An operator was applied with too few pending operands
    #[error("Missing operand for {op} at {pos}")]
    MissingOperand {
        /// The starved operator
        op: Op,
        /// Position of the operator in the postfix string
        pos: usize,
    },
    /// The expression produced no automaton at all
    #[error("Expression is empty")]
    Empty,
    /// More than one fragment was left after construction
    #[error("{0} disconnected subexpressions left after construction")]
    Leftover(usize),
    /// The postfix string contained a character with no meaning there
    #[error("Unexpected {ch:?} at {pos}")]
    Unexpected {
        /// The offending character
        ch: char,
        /// Position in the postfix string
        pos: usize,
    },
}

/// An invalid expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A character that is neither in the alphabet nor an operator
    #[error("Unexpected character {ch:?} at {pos}")]
    Lexical {
        /// The offending character
        ch: char,
        /// Position in the expression being scanned
        pos: usize,
    },
    /// A `)` with no matching `(`, or a `(` that was never closed
    #[error("Unbalanced parenthesis at {pos}")]
    UnbalancedParen {
        /// Position of the unmatched parenthesis
        pos: usize,
    },
    /// The expression does not form a well-shaped tree of operators
    #[error("Malformed expression: {0}")]
    MalformedExpression(#[from] Malformed),
}

/// Fieldless discriminant of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Lexical`]
    Lexical,
    /// See [`Error::UnbalancedParen`]
    UnbalancedParen,
    /// See [`Error::MalformedExpression`]
    MalformedExpression,
}

impl Error {
    /// Get the category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lexical { .. } => ErrorKind::Lexical,
            Self::UnbalancedParen { .. } => ErrorKind::UnbalancedParen,
            Self::MalformedExpression(_) => ErrorKind::MalformedExpression,
        }
    }
}
