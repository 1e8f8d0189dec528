//! Numeric and status-code ranges such as `-5.5-10`, `200-299` and
//! comma-separated lists of them.

use std::cmp::Ordering;

use crate::errors::{ParseError, ParseErrorKind};
use crate::macros::{LldMacroParser, UserMacroParser};
use crate::number::{NumberParser, unsigned};
use crate::options::ParserOptions;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{skip_spaces, slice};
use crate::units::Suffixes;

/// One end of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "snake_case"))]
pub enum RangeBound {
    /// A number as written.
    Number(String),
    /// A user macro as written.
    UserMacro(String),
    /// An LLD macro as written.
    LldMacro(String),
}

impl RangeBound {
    /// The bound as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number(text) | Self::UserMacro(text) | Self::LldMacro(text) => text,
        }
    }
}

/// A single value or a `from-till` range.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Range {
    /// The first bound.
    pub from: RangeBound,
    /// The second bound, when a range was written.
    pub till: Option<RangeBound>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bounds {
    Decimal,
    StatusCode,
}

/// Parser for `bound[-bound]` where a bound is a signed decimal number or a
/// macro allowed by the options.
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, ParserOptions, RangeParser};
/// let parser = RangeParser::new(ParserOptions::default());
/// let range = parser.parse_all("-5.5--1").unwrap().value;
/// assert_eq!(range.from.as_str(), "-5.5");
/// assert_eq!(range.till.unwrap().as_str(), "-1");
/// assert!(parser.parse_all("10-1").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RangeParser {
    options: ParserOptions,
    bounds: Bounds,
}

impl Default for RangeParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl RangeParser {
    /// Create a parser for decimal ranges.
    #[must_use]
    pub const fn new(options: ParserOptions) -> Self {
        Self {
            options,
            bounds: Bounds::Decimal,
        }
    }

    fn bound(&self, source: &str, pos: usize) -> Result<(usize, RangeBound), ParseError> {
        let bytes = source.as_bytes();
        if bytes.get(pos) == Some(&b'{') {
            if self.options.user_macros {
                if let Ok(m) = UserMacroParser.parse(source, pos) {
                    return Ok((m.end(), RangeBound::UserMacro(m.matched.as_str().to_owned())));
                }
            }
            if self.options.lld_macros {
                if let Ok(m) = LldMacroParser.parse(source, pos) {
                    return Ok((m.end(), RangeBound::LldMacro(m.matched.as_str().to_owned())));
                }
            }
            return Err(ParseError::unexpected(pos));
        }
        let end = match self.bounds {
            Bounds::Decimal => NumberParser::new(Suffixes::NONE).signed().parse(source, pos)?.end(),
            Bounds::StatusCode => unsigned(bytes, pos)?.0,
        };
        Ok((end, RangeBound::Number(slice(source, pos, end).to_owned())))
    }

    fn ordered(&self, from: &str, till: &str) -> bool {
        let ordering = match self.bounds {
            Bounds::Decimal => match (from.parse::<f64>(), till.parse::<f64>()) {
                (Ok(from), Ok(till)) => from.partial_cmp(&till),
                _ => None,
            },
            Bounds::StatusCode => match (from.parse::<u64>(), till.parse::<u64>()) {
                (Ok(from), Ok(till)) => Some(from.cmp(&till)),
                _ => None,
            },
        };
        ordering != Some(Ordering::Greater)
    }
}

impl Parse for RangeParser {
    type Value = Range;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Range> {
        check_start(source, pos);
        let (mut end, from) = self.bound(source, pos)?;
        let mut till = None;
        if source.as_bytes().get(end) == Some(&b'-') {
            let till_pos = end + 1;
            let (till_end, bound) = self.bound(source, till_pos)?;
            if let (RangeBound::Number(a), RangeBound::Number(b)) = (&from, &bound) {
                if !self.ordered(a, b) {
                    return Err(ParseError::new(ParseErrorKind::InvertedRange, till_pos));
                }
            }
            end = till_end;
            till = Some(bound);
        }
        Ok(Parsed::new(source, pos, end, Range { from, till }))
    }
}

/// Parser for HTTP status code ranges such as `200-299`.
#[derive(Debug, Clone, Copy)]
pub struct StatusCodeRangeParser(RangeParser);

impl Default for StatusCodeRangeParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl StatusCodeRangeParser {
    /// Create a parser for unsigned integer ranges.
    #[must_use]
    pub const fn new(options: ParserOptions) -> Self {
        Self(RangeParser {
            options,
            bounds: Bounds::StatusCode,
        })
    }
}

impl Parse for StatusCodeRangeParser {
    type Value = Range;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Range> {
        self.0.parse(source, pos)
    }
}

/// Parser for comma-separated lists of ranges recognised by `P`.
///
/// Spaces are allowed around each comma and at either end of the list.
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, ParserOptions, RangesParser, StatusCodeRangeParser};
/// let parser = RangesParser::new(StatusCodeRangeParser::new(ParserOptions::default()));
/// assert_eq!(parser.parse_all("200, 301-308 ,{$OK}").unwrap().value.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RangesParser<P = RangeParser> {
    inner: P,
}

impl<P> RangesParser<P> {
    /// Wrap `inner` to parse a list of its ranges.
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parse> Parse for RangesParser<P> {
    type Value = Vec<P::Value>;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Self::Value> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let mut ranges = Vec::new();
        let mut i = skip_spaces(bytes, pos);
        loop {
            let range = self.inner.parse(source, i)?;
            i = skip_spaces(bytes, range.end());
            ranges.push(range.value);
            if bytes.get(i) != Some(&b',') {
                break;
            }
            i = skip_spaces(bytes, i + 1);
        }
        Ok(Parsed::new(source, pos, i, ranges))
    }
}
