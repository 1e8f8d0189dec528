//! Error types shared by every parser in the crate.

use thiserror::Error;

/// Number of characters shown by [`ParseError::near`] before truncating.
pub const PREVIEW_LEN: usize = 50;

/// Classification of a parse failure.
///
/// Every variant is a data error: malformed input is the expected common case
/// for configuration text typed by a user, so parsers report it instead of
/// panicking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ParseErrorKind {
    /// The source contained nothing to parse.
    #[error("empty input")]
    EmptyInput,
    /// The source ended before the construct was complete.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A byte that cannot start or continue the construct.
    #[error("incorrect syntax")]
    UnexpectedCharacter,
    /// A numeric field outside its permitted bounds.
    #[error("{field} value {value} is out of range {min}-{max}")]
    OutOfRange {
        /// Name of the offending field, e.g. `hour`.
        field: &'static str,
        /// The value found in the source.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },
    /// A field appearing twice or after a field that must follow it.
    #[error("{field} is duplicated or out of order")]
    MisorderedField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A range whose start lies after its end.
    #[error("range start exceeds range end")]
    InvertedRange,
    /// Parentheses that do not pair up.
    #[error("unbalanced parentheses")]
    UnbalancedBraces,
}

/// A parse failure and the zero-based byte offset where it was detected.
///
/// # Examples
/// ```
/// use monconf_parsers::{ParseError, ParseErrorKind};
/// let err = ParseError::new(ParseErrorKind::UnexpectedCharacter, 3);
/// assert_eq!(err.to_string(), "incorrect syntax at byte 3 (zero-based)");
/// assert_eq!(err.near("abcdef"), "def");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{kind} at byte {position} (zero-based)")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Offset into the original source.
    pub position: usize,
}

impl ParseError {
    /// Create an error of `kind` at `position`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Report the byte at `position` as unexpected, or the end of input when
    /// `position` is past the last byte.
    pub(crate) fn at(bytes: &[u8], position: usize) -> Self {
        if position < bytes.len() {
            Self::new(ParseErrorKind::UnexpectedCharacter, position)
        } else {
            Self::new(ParseErrorKind::UnexpectedEnd, position)
        }
    }

    pub(crate) const fn unexpected(position: usize) -> Self {
        Self::new(ParseErrorKind::UnexpectedCharacter, position)
    }

    pub(crate) const fn out_of_range(
        field: &'static str,
        value: u64,
        (min, max): (u64, u64),
        position: usize,
    ) -> Self {
        Self::new(
            ParseErrorKind::OutOfRange {
                field,
                value,
                min,
                max,
            },
            position,
        )
    }

    /// Return the part of `source` starting at the error, capped at
    /// [`PREVIEW_LEN`] characters.
    #[must_use]
    pub fn near(&self, source: &str) -> String {
        self.near_with(source, PREVIEW_LEN)
    }

    /// Return the part of `source` starting at the error, capped at
    /// `max_chars` characters with `...` appended when truncated.
    ///
    /// # Examples
    /// ```
    /// use monconf_parsers::{ParseError, ParseErrorKind};
    /// let err = ParseError::new(ParseErrorKind::UnexpectedCharacter, 2);
    /// assert_eq!(err.near_with("h5/1,2,3", 3), "/1,...");
    /// ```
    #[must_use]
    pub fn near_with(&self, source: &str, max_chars: usize) -> String {
        let tail = source.get(self.position..).unwrap_or_default();
        let mut chars = tail.chars();
        let mut preview: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            preview.push_str("...");
        }
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_position_as_zero_based_byte() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEnd, 7);
        assert_eq!(
            err.to_string(),
            "unexpected end of input at byte 7 (zero-based)"
        );
    }

    #[test]
    fn formats_out_of_range_details() {
        let err = ParseError::out_of_range("hour", 24, (0, 23), 1);
        assert_eq!(
            err.to_string(),
            "hour value 24 is out of range 0-23 at byte 1 (zero-based)"
        );
    }

    #[test]
    fn picks_end_of_input_past_last_byte() {
        assert_eq!(
            ParseError::at(b"ab", 2).kind,
            ParseErrorKind::UnexpectedEnd
        );
        assert_eq!(
            ParseError::at(b"ab", 1).kind,
            ParseErrorKind::UnexpectedCharacter
        );
    }

    #[test]
    fn preview_is_empty_at_end_of_source() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEnd, 4);
        assert_eq!(err.near("abcd"), "");
    }

    #[test]
    fn preview_truncates_by_characters_not_bytes() {
        let err = ParseError::new(ParseErrorKind::UnexpectedCharacter, 0);
        assert_eq!(err.near_with("日本語テキスト", 3), "日本語...");
    }
}
