//! Convert a regular expression to a Graphviz DOT document

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
    /// Render the epsilon-NFA instead of the DFA
    #[arg(long)]
    nfa: bool,

    #[command(flatten)]
    common: CommonOpts,
}

fn main() {
    let Opts { nfa, common } = Opts::parse();
    common.init_logger();

    let alphabet = common
        .alphabet()
        .unwrap_or_else(|e| cli::fail("Invalid alphabet", &e));
    let compiler = common.compiler(&alphabet);

    let graph = if nfa {
        compiler
            .parse(&common.regex)
            .and_then(|p| compiler.epsilon_nfa(&p))
    } else {
        compiler.compile(&common.regex).map(|c| c.dfa)
    }
    .unwrap_or_else(|e| cli::fail("Invalid expression", &e));

    println!("{}", graph.dot());
}
