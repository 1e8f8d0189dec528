use super::macro_value;
use crate::errors::ParseError;
use crate::options::ParserOptions;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{digits_end, digits_value, slice};
use crate::units::{Suffix, Suffixes};

/// A delay such as `30s`, `5m` or a macro standing in for one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Delay {
    /// The delay as written.
    pub text: String,
    seconds: Option<u64>,
}

impl Delay {
    /// The delay in seconds, or `None` when it is a macro.
    #[must_use]
    pub const fn seconds(&self) -> Option<u64> {
        self.seconds
    }

    /// Whether the delay is a macro resolved later.
    #[must_use]
    pub const fn is_macro(&self) -> bool {
        self.seconds.is_none()
    }
}

/// Parser for `digits[s|m|h|d|w]`, or a macro when the options allow it.
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, ParserOptions, SimpleIntervalParser};
/// let parser = SimpleIntervalParser::new(ParserOptions::default());
/// assert_eq!(parser.parse_all("5m").unwrap().value.seconds(), Some(300));
/// assert!(parser.parse_all("{$DELAY}").unwrap().value.is_macro());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleIntervalParser {
    options: ParserOptions,
}

impl SimpleIntervalParser {
    /// Create a parser accepting the macro kinds enabled in `options`.
    #[must_use]
    pub const fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Parse for SimpleIntervalParser {
    type Value = Delay;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Delay> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        if bytes.get(pos) == Some(&b'{') {
            let end = macro_value(source, pos, self.options)?;
            let delay = Delay {
                text: slice(source, pos, end).to_owned(),
                seconds: None,
            };
            return Ok(Parsed::new(source, pos, end, delay));
        }
        let digits = digits_end(bytes, pos);
        if digits == pos {
            return Err(ParseError::at(bytes, pos));
        }
        let value = digits_value(bytes, pos, digits);
        let suffix = bytes.get(digits).and_then(|&b| Suffixes::INTERVAL.lookup(b));
        let end = if suffix.is_some() { digits + 1 } else { digits };
        let multiplier = suffix.map_or(1, Suffix::multiplier);
        let delay = Delay {
            text: slice(source, pos, end).to_owned(),
            seconds: Some(value.saturating_mul(multiplier)),
        };
        Ok(Parsed::new(source, pos, end, delay))
    }
}
