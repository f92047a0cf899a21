//! Command-line plumbing shared by the binaries

use tracing_subscriber::{filter::LevelFilter, prelude::*};

use crate::{Alphabet, Compiler, Options, alphabet::AlphabetError};

/// Flags common to every binary
#[derive(Debug, clap::Args)]
pub struct CommonOpts {
    /// Print more verbose logs
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Symbols the expression is written over, as a string of ASCII letters
    /// and digits
    #[arg(short, long, default_value = "abcdefghijklmnopqrstuvwxyz")]
    pub alphabet: String,

    /// Keep unreachable and dead states in the DFA
    #[arg(long)]
    pub no_prune: bool,

    /// The expression to compile
    pub regex: String,
}

impl CommonOpts {
    /// Install a stderr logger at the level selected by `--verbose`
    pub fn init_logger(&self) {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(match (cfg!(debug_assertions), self.verbose) {
                (false, 0) => LevelFilter::INFO,
                (false, 1) | (true, 0) => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            })
            .init();
    }

    /// Validate the alphabet flag
    ///
    /// # Errors
    /// Returns an error if the alphabet is empty or contains characters other
    /// than ASCII letters and digits.
    pub fn alphabet(&self) -> Result<Alphabet, AlphabetError> { Alphabet::parse(&self.alphabet) }

    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            prune: !self.no_prune,
        }
    }

    #[inline]
    #[must_use]
    pub fn compiler<'a>(&self, alphabet: &'a Alphabet) -> Compiler<'a> {
        Compiler::new(alphabet, self.options())
    }
}

/// Exit the process with status 1 after logging `err`
pub fn fail(what: &str, err: &impl std::fmt::Display) -> ! {
    tracing::error!("{what}: {err}");
    std::process::exit(1);
}
