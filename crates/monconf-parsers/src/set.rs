//! Longest-match recognition over a fixed set of literal tokens.

use crate::errors::ParseError;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};

/// Recognises the longest candidate that prefixes the input.
///
/// A candidate ending in a letter must not be followed by a letter, digit or
/// `_`, so `and` does not match inside `andx`. A candidate rejected this way
/// lets shorter candidates be tried.
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, SetParser};
/// let ops = SetParser::new(["<", "<=", "<>", "and", "or"]);
/// let parsed = ops.parse("prefixand this", 6).unwrap();
/// assert_eq!(parsed.value, "and");
/// assert!(ops.parse("anor", 0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SetParser {
    candidates: Vec<String>,
    word_boundary: bool,
}

impl SetParser {
    /// Build a parser over `candidates`.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut candidates: Vec<String> = candidates
            .into_iter()
            .map(Into::into)
            .filter(|candidate| !candidate.is_empty())
            .collect();
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        candidates.dedup();
        Self {
            candidates,
            word_boundary: true,
        }
    }

    /// Accept a candidate regardless of the byte following it.
    #[must_use]
    pub fn without_word_boundary(mut self) -> Self {
        self.word_boundary = false;
        self
    }

    /// The candidates, longest first.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn at_boundary(&self, candidate: &str, next: Option<&u8>) -> bool {
        if !self.word_boundary || !candidate.ends_with(|c: char| c.is_alphabetic()) {
            return true;
        }
        !next.is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_')
    }
}

impl Parse for SetParser {
    type Value = String;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, String> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let rest = bytes.get(pos..).unwrap_or_default();
        if rest.is_empty() {
            return Err(ParseError::at(bytes, pos));
        }
        self.candidates
            .iter()
            .find(|candidate| {
                rest.starts_with(candidate.as_bytes())
                    && self.at_boundary(candidate, rest.get(candidate.len()))
            })
            .map(|candidate| {
                Parsed::new(source, pos, pos + candidate.len(), candidate.clone())
            })
            .ok_or_else(|| ParseError::unexpected(pos))
    }
}
