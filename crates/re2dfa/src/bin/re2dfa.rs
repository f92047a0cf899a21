//! Compile a regular expression and print the resulting automaton

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

use clap::Parser;
use re2dfa::cli::{self, CommonOpts};

#[derive(Debug, Parser)]
#[command(version, author, about)]
struct Opts {
    /// Pipeline stage whose automaton is printed
    #[arg(long, default_value = "dfa")]
    stage: Stage,

    #[command(flatten)]
    common: CommonOpts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Stage {
    /// Thompson epsilon-NFA
    EpsilonNfa,
    /// NFA after epsilon elimination
    Nfa,
    /// Final DFA
    Dfa,
}

fn main() {
    let Opts { stage, common } = Opts::parse();
    common.init_logger();
    tracing::debug!(?stage, ?common);

    let alphabet = common
        .alphabet()
        .unwrap_or_else(|e| cli::fail("Invalid alphabet", &e));
    let compiler = common.compiler(&alphabet);

    let parsed = compiler
        .parse(&common.regex)
        .unwrap_or_else(|e| cli::fail("Invalid expression", &e));
    println!("Infix: {}", common.regex);
    println!("With explicit concat: {}", parsed.concat);
    println!("Postfix: {}", parsed.postfix);

    let graph = match stage {
        Stage::EpsilonNfa => compiler.epsilon_nfa(&parsed),
        Stage::Nfa => compiler.nfa(&parsed),
        Stage::Dfa => compiler.nfa(&parsed).map(|n| compiler.determinize(&n)),
    }
    .unwrap_or_else(|e| cli::fail("Invalid expression", &e));

    println!();
    println!("{}", graph.tuple(&alphabet));
}
