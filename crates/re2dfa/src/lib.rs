//! Compile regular expressions to deterministic finite automata
//!
//! The pipeline runs in strict stages, each consuming the complete output of
//! the previous one:
//!
//! 1. [`infix::insert_concat`] makes implicit concatenation explicit
//! 2. [`infix::to_postfix`] reorders the expression with the shunting-yard
//!    algorithm
//! 3. [`nfa::NfaBuilder`] runs Thompson's construction over the postfix form
//! 4. [`epsilon::eliminate`] removes all epsilon transitions
//! 5. [`dfa::DfaBuilder`] runs the powerset construction
//! 6. [`dfa::prune`] drops unreachable and dead states
//!
//! [`compile::Compiler`] wires all of these together.

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod alphabet;
pub mod cli;
mod closure_builder;
pub mod compile;
pub mod dfa;
pub mod dot;
pub mod epsilon;
pub mod error;
pub mod graph;
pub mod infix;
pub mod nfa;
pub mod token;
pub mod tuple;

#[cfg(any(test, feature = "proptest"))]
pub mod prop;

pub use alphabet::Alphabet;
pub use compile::{Compiled, Compiler, Options};
pub use error::{Error, ErrorKind, Result};
pub use graph::Graph;
