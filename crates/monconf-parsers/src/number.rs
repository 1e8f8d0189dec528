//! Numeric literals with an optional unit suffix.

use crate::errors::ParseError;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{digits_end, digits_value, slice};
use crate::units::{Suffix, Suffixes};

/// A recognised numeric literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Number {
    /// The literal without its suffix, sign included.
    pub digits: String,
    /// The unit suffix, when present.
    pub suffix: Option<Suffix>,
}

impl Number {
    /// Whether the literal has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.digits.contains('.')
    }

    /// The unsigned integer value scaled by the suffix multiplier.
    ///
    /// Returns `None` for fractional or signed literals and on overflow.
    #[must_use]
    pub fn scaled(&self) -> Option<u64> {
        if !self.is_integer() || self.digits.starts_with(['+', '-']) {
            return None;
        }
        let value: u64 = self.digits.parse().ok()?;
        value.checked_mul(self.suffix.map_or(1, Suffix::multiplier))
    }
}

/// Parser for `[+-]?digits[.digits][suffix]`.
///
/// # Examples
/// ```
/// use monconf_parsers::{NumberParser, Parse, ParseOutcome, Suffixes};
/// let parser = NumberParser::new(Suffixes::TIME);
/// assert_eq!(parser.outcome("1.5h", 0), ParseOutcome::Done(4));
/// assert_eq!(parser.outcome("10s)", 0), ParseOutcome::Continuation(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NumberParser {
    suffixes: Suffixes,
    signed: bool,
}

impl NumberParser {
    /// Create a parser accepting unsigned numbers with `suffixes`.
    #[must_use]
    pub const fn new(suffixes: Suffixes) -> Self {
        Self {
            suffixes,
            signed: false,
        }
    }

    /// Also accept a leading `+` or `-`.
    #[must_use]
    pub const fn signed(mut self) -> Self {
        self.signed = true;
        self
    }
}

impl Parse for NumberParser {
    type Value = Number;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Number> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let mut i = pos;
        if self.signed && matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let int_end = digits_end(bytes, i);
        if int_end == i {
            return Err(ParseError::at(bytes, i));
        }
        i = int_end;
        if bytes.get(i) == Some(&b'.') {
            let frac_end = digits_end(bytes, i + 1);
            if frac_end == i + 1 {
                return Err(ParseError::at(bytes, frac_end));
            }
            i = frac_end;
            if bytes.get(i) == Some(&b'.') {
                return Err(ParseError::unexpected(i));
            }
        }
        let digits = slice(source, pos, i).to_owned();
        let suffix = bytes.get(i).and_then(|&b| self.suffixes.lookup(b));
        if suffix.is_some() {
            i += 1;
        }
        Ok(Parsed::new(source, pos, i, Number { digits, suffix }))
    }
}

/// Parse an unsigned integer digit run at `pos` without suffix handling.
pub(crate) fn unsigned(bytes: &[u8], pos: usize) -> Result<(usize, u64), ParseError> {
    let end = digits_end(bytes, pos);
    if end == pos {
        return Err(ParseError::at(bytes, pos));
    }
    Ok((end, digits_value(bytes, pos, end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::outcome::ParseOutcome;
    use rstest::rstest;

    #[rstest]
    #[case("0", ParseOutcome::Done(1))]
    #[case("123", ParseOutcome::Done(3))]
    #[case("1.5", ParseOutcome::Done(3))]
    #[case("10K", ParseOutcome::Done(3))]
    #[case("5m", ParseOutcome::Done(2))]
    #[case("5m)", ParseOutcome::Continuation(2))]
    #[case("1.", ParseOutcome::Fail)]
    #[case(".1", ParseOutcome::Fail)]
    #[case("1.2.3", ParseOutcome::Fail)]
    #[case("-1", ParseOutcome::Fail)]
    #[case("", ParseOutcome::Fail)]
    fn recognises_trigger_numbers(#[case] input: &str, #[case] expected: ParseOutcome) {
        let parser = NumberParser::new(Suffixes::TRIGGER);
        assert_eq!(parser.outcome(input, 0), expected);
    }

    #[rstest]
    #[case("-1", ParseOutcome::Done(2))]
    #[case("+2.5", ParseOutcome::Done(4))]
    #[case("-", ParseOutcome::Fail)]
    #[case("+x", ParseOutcome::Fail)]
    fn signed_parser_accepts_sign(#[case] input: &str, #[case] expected: ParseOutcome) {
        let parser = NumberParser::new(Suffixes::NONE).signed();
        assert_eq!(parser.outcome(input, 0), expected);
    }

    #[test]
    fn decodes_digits_and_suffix() {
        let Ok(parsed) = NumberParser::new(Suffixes::TIME).parse("x15M", 1) else {
            panic!("expected a number");
        };
        assert_eq!(parsed.value.digits, "15");
        assert_eq!(parsed.value.suffix, Some(Suffix::Months));
        assert_eq!(parsed.matched.as_str(), "15M");
    }

    #[test]
    fn scales_integer_values() {
        let Ok(parsed) = NumberParser::new(Suffixes::INTERVAL).parse("2h", 0) else {
            panic!("expected a number");
        };
        assert_eq!(parsed.value.scaled(), Some(7_200));
    }

    #[test]
    fn suffix_outside_table_leaves_continuation() {
        let Ok(parsed) = NumberParser::new(Suffixes::BYTE).parse("5s", 0) else {
            panic!("expected a number");
        };
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.value.suffix, None);
    }

    #[test]
    fn reports_missing_fraction_digits() {
        let Err(err) = NumberParser::new(Suffixes::NONE).parse("1.", 0) else {
            panic!("expected failure");
        };
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(err.position, 2);
    }
}
