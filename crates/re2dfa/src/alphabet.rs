//! The set of input symbols an expression is written over

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::token::Op;

/// Reserved character standing in for the empty string
pub const EPSILON: char = '\0';

/// Error indicating a set of characters cannot be used as an alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    /// No symbols were given
    #[error("Alphabet must contain at least one symbol")]
    Empty,
    /// The epsilon sentinel was given as a symbol
    #[error("The empty-string sentinel cannot be an alphabet symbol")]
    Sentinel,
    /// An operator or parenthesis was given as a symbol
    #[error("{0:?} is reserved for expression syntax")]
    Reserved(char),
    /// A symbol failed the alphanumeric check of [`Alphabet::parse`]
    #[error("{0:?} is not an ASCII letter or digit")]
    NotAlphanumeric(char),
}

/// A finite, non-empty, ordered set of symbols
///
/// Iteration is always in ascending character order, which fixes the order
/// in which the powerset construction explores transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet(BTreeSet<char>);

impl Default for Alphabet {
    /// The lowercase English letters
    fn default() -> Self { Self(('a'..='z').collect()) }
}

impl Alphabet {
    /// Collect an alphabet from the given symbols, discarding duplicates
    ///
    /// # Errors
    /// Returns an error if no symbols are given, or if any symbol is the
    /// epsilon sentinel or a character reserved for expression syntax.
    pub fn new<I: IntoIterator<Item = char>>(it: I) -> Result<Self, AlphabetError> {
        let set: BTreeSet<_> = it.into_iter().collect();

        if set.is_empty() {
            return Err(AlphabetError::Empty);
        }

        for &c in &set {
            if c == EPSILON {
                return Err(AlphabetError::Sentinel);
            }

            if Op::from_char(c).is_some() || matches!(c, '(' | ')') {
                return Err(AlphabetError::Reserved(c));
            }
        }

        Ok(Self(set))
    }

    /// Parse a user-supplied alphabet string, accepting only ASCII letters
    /// and digits
    ///
    /// # Errors
    /// Returns an error under the same conditions as [`Alphabet::new`], or if
    /// any character is not ASCII alphanumeric.
    pub fn parse(s: &str) -> Result<Self, AlphabetError> {
        if let Some(c) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(AlphabetError::NotAlphanumeric(c));
        }

        Self::new(s.chars())
    }

    /// Test whether `c` is a symbol of this alphabet
    #[inline]
    #[must_use]
    pub fn contains(&self, c: char) -> bool { self.0.contains(&c) }

    /// Number of distinct symbols
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Always `false`, alphabets cannot be empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterate the symbols in ascending order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ { self.0.iter().copied() }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        for (i, c) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }

            write!(f, "{c}")?;
        }

        f.write_str("}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dedup_and_order() {
        let a = Alphabet::new("bab".chars()).unwrap();
        assert_eq!(a.iter().collect::<Vec<_>>(), ['a', 'b']);
        assert_eq!(a.to_string(), "{a, b}");
    }

    #[test]
    fn rejects() {
        assert_eq!(Alphabet::new([]), Err(AlphabetError::Empty));
        assert_eq!(Alphabet::new(['a', EPSILON]), Err(AlphabetError::Sentinel));
        assert_eq!(Alphabet::new("a*".chars()), Err(AlphabetError::Reserved('*')));
        assert_eq!(Alphabet::new("(a".chars()), Err(AlphabetError::Reserved('(')));
        assert_eq!(
            Alphabet::parse("ab c"),
            Err(AlphabetError::NotAlphanumeric(' '))
        );
        assert_eq!("".parse::<Alphabet>(), Err(AlphabetError::Empty));
    }

    #[test]
    fn default_is_lowercase() {
        let a = Alphabet::default();
        assert_eq!(a.len(), 26);
        assert!(a.contains('a') && a.contains('z'));
        assert!(!a.contains('A'));
    }
}
