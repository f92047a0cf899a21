//! Infix syntax handling: explicit concatenation and the shunting-yard
//! conversion to postfix
//!
//! Error positions are character offsets into the string passed to the
//! function that reported them.

use tracing::trace;

use crate::{
    error::{Error, Result},
    token::{Classifier, Op, Token},
};

/// Insert an explicit [`Op::Cat`] between every pair of adjacent tokens that
/// are implicitly concatenated
///
/// A concatenation is inserted when the left token ends an operand (a symbol,
/// a postfix operator or `)`) and the right token starts one (a symbol or
/// `(`).  Characters are otherwise copied through unchanged, including ones
/// that do not classify.
#[must_use]
pub fn insert_concat(cls: &Classifier, infix: &str) -> String {
    let mut out = String::with_capacity(infix.len() * 2);
    let mut prev: Option<Token> = None;

    for c in infix.chars() {
        let tok = cls.classify(c);

        if prev.is_some_and(|p| p.ends_operand() && tok.starts_operand()) {
            out.push(Op::Cat.as_char());
        }

        out.push(c);
        prev = Some(tok);
    }

    out
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Op(Op),
    LParen(usize),
}

/// Convert an infix expression with explicit concatenation to postfix
///
/// All operators are treated as left-associative: an incoming operator pops
/// every stacked operator of equal or higher precedence before it is pushed.
///
/// # Errors
/// Fails with [`Error::Lexical`] on the first unclassifiable character, and
/// with [`Error::UnbalancedParen`] if the parentheses do not match.
pub fn to_postfix(cls: &Classifier, infix: &str) -> Result<String> {
    let mut out = String::with_capacity(infix.len());
    let mut stack: Vec<Pending> = Vec::new();

    for (pos, tok) in cls.tokens(infix) {
        match tok {
            Token::Symbol(c) => out.push(c),
            Token::Op(op) => {
                while let Some(&Pending::Op(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }

                    out.push(top.as_char());
                    stack.pop();
                }

                stack.push(Pending::Op(op));
            },
            Token::LParen => stack.push(Pending::LParen(pos)),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Pending::Op(op)) => out.push(op.as_char()),
                    Some(Pending::LParen(_)) => break,
                    None => return Err(Error::UnbalancedParen { pos }),
                }
            },
            Token::Invalid(ch) => return Err(Error::Lexical { ch, pos }),
        }
    }

    while let Some(top) = stack.pop() {
        match top {
            Pending::Op(op) => out.push(op.as_char()),
            Pending::LParen(pos) => return Err(Error::UnbalancedParen { pos }),
        }
    }

    trace!(infix, postfix = %out, "Converted to postfix");
    Ok(out)
}
