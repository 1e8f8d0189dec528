//! The contract shared by every parser: try to recognise a construct at an
//! offset and report how much of the source it covers.

use crate::errors::{ParseError, ParseErrorKind};

/// Whether a successful match reaches the end of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Completion {
    /// Nothing follows the match.
    Done,
    /// Bytes follow the match; interpreting them is the caller's job.
    Continuation,
}

impl Completion {
    pub(crate) const fn at(source_len: usize, end: usize) -> Self {
        if end >= source_len {
            Self::Done
        } else {
            Self::Continuation
        }
    }
}

/// A borrowed slice of the source covered by a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Match<'s> {
    start: usize,
    text: &'s str,
}

impl<'s> Match<'s> {
    pub(crate) fn new(source: &'s str, start: usize, end: usize) -> Self {
        Self {
            start,
            text: source.get(start..end).unwrap_or_default(),
        }
    }

    /// Offset of the first matched byte.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last matched byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Number of matched bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the match covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The matched text.
    #[must_use]
    pub const fn as_str(&self) -> &'s str {
        self.text
    }
}

/// A successful parse: the matched slice, its completion and decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parsed<'s, T> {
    /// The slice of the source that was recognised.
    pub matched: Match<'s>,
    /// Whether bytes remain after the match.
    pub completion: Completion,
    /// Structured fields decoded from the match.
    pub value: T,
}

impl<'s, T> Parsed<'s, T> {
    pub(crate) fn new(source: &'s str, start: usize, end: usize, value: T) -> Self {
        Self {
            matched: Match::new(source, start, end),
            completion: Completion::at(source.len(), end),
            value,
        }
    }

    /// Number of matched bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.matched.len()
    }

    /// Whether the match covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Offset one past the last matched byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.matched.end()
    }

    /// Replace the decoded value, keeping the match.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<'s, U> {
        Parsed {
            matched: self.matched,
            completion: self.completion,
            value: f(self.value),
        }
    }

    /// Require the match to reach the end of the source.
    ///
    /// # Errors
    ///
    /// Returns an `UnexpectedCharacter` error at the first unmatched byte when
    /// the parse ended with [`Completion::Continuation`].
    pub fn complete(self) -> Result<Self, ParseError> {
        match self.completion {
            Completion::Done => Ok(self),
            Completion::Continuation => Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter,
                self.matched.end(),
            )),
        }
    }
}

/// Result of a single `parse()` call.
pub type ParseResult<'s, T> = Result<Parsed<'s, T>, ParseError>;

/// Compact view of a parse result: failure, or the match length and whether
/// anything follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Nothing was recognised.
    Fail,
    /// A match of the given length reaching the end of the source.
    Done(usize),
    /// A match of the given length followed by more bytes.
    Continuation(usize),
}

impl ParseOutcome {
    /// Whether the parse recognised something.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

impl<T> From<&ParseResult<'_, T>> for ParseOutcome {
    fn from(result: &ParseResult<'_, T>) -> Self {
        match result {
            Err(_) => Self::Fail,
            Ok(parsed) => match parsed.completion {
                Completion::Done => Self::Done(parsed.len()),
                Completion::Continuation => Self::Continuation(parsed.len()),
            },
        }
    }
}

/// A recogniser for one construct.
///
/// Implementations hold only immutable configuration, so one instance can be
/// shared between threads and reused for any number of inputs.
pub trait Parse {
    /// Structured fields decoded from a match.
    type Value;

    /// Try to recognise the construct starting at byte offset `pos`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] locating the first byte that could not be
    /// accepted.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is past the end of `source`; that is a caller bug,
    /// not a data error.
    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Self::Value>;

    /// Parse from offset `pos` and collapse the result into a [`ParseOutcome`].
    ///
    /// # Panics
    ///
    /// Panics when `pos` is past the end of `source`.
    fn outcome(&self, source: &str, pos: usize) -> ParseOutcome {
        ParseOutcome::from(&self.parse(source, pos))
    }

    /// Parse the whole of `source`, rejecting trailing bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the construct is malformed or does not
    /// span the entire source.
    fn parse_all<'s>(&self, source: &'s str) -> ParseResult<'s, Self::Value> {
        let result = self.parse(source, 0).and_then(Parsed::complete);
        if let Err(err) = &result {
            log::trace!(
                "{} rejected input: {err}",
                std::any::type_name::<Self>()
            );
        }
        result
    }
}

pub(crate) fn check_start(source: &str, pos: usize) {
    assert!(
        pos <= source.len(),
        "start offset {pos} is past the end of a {}-byte source",
        source.len()
    );
}
