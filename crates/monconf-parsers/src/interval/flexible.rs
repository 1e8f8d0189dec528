use super::simple::{Delay, SimpleIntervalParser};
use super::{TimePeriod, TimePeriodParser, macro_value};
use crate::errors::ParseError;
use crate::options::ParserOptions;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::slice;

/// Longest delay a flexible interval may set, in seconds.
pub const MAX_FLEXIBLE_DELAY: u64 = 86_400;

/// A delay applied during a period, `delay/period`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlexibleInterval {
    /// The delay used inside the period.
    pub delay: Delay,
    /// The period as written.
    pub period: String,
    /// The decoded period; `None` when the period is a macro.
    pub time_period: Option<TimePeriod>,
}

/// Parser for flexible intervals.
///
/// # Examples
/// ```
/// use monconf_parsers::{FlexibleIntervalParser, Parse, ParserOptions};
/// let parser = FlexibleIntervalParser::new(ParserOptions::default());
/// let flex = parser.parse_all("50s/1-5,09:00-18:00").unwrap().value;
/// assert_eq!(flex.delay.seconds(), Some(50));
/// assert!(parser.parse_all("2d/1-5,09:00-18:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexibleIntervalParser {
    options: ParserOptions,
}

impl FlexibleIntervalParser {
    /// Create a parser accepting the macro kinds enabled in `options`.
    #[must_use]
    pub const fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Parse for FlexibleIntervalParser {
    type Value = FlexibleInterval;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, FlexibleInterval> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let delay = SimpleIntervalParser::new(self.options).parse(source, pos)?;
        if let Some(seconds) = delay.value.seconds() {
            if seconds > MAX_FLEXIBLE_DELAY {
                return Err(ParseError::out_of_range(
                    "delay",
                    seconds,
                    (0, MAX_FLEXIBLE_DELAY),
                    pos,
                ));
            }
        }
        let slash = delay.end();
        if bytes.get(slash) != Some(&b'/') {
            return Err(ParseError::at(bytes, slash));
        }
        let period_pos = slash + 1;
        let (end, time_period) = if bytes.get(period_pos) == Some(&b'{') {
            (macro_value(source, period_pos, self.options)?, None)
        } else {
            let period = TimePeriodParser.parse(source, period_pos)?;
            (period.end(), Some(period.value))
        };
        let value = FlexibleInterval {
            delay: delay.value,
            period: slice(source, period_pos, end).to_owned(),
            time_period,
        };
        Ok(Parsed::new(source, pos, end, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("50/1-7,00:00-24:00", "50", "1-7,00:00-24:00")]
    #[case("1d/1,00:00-24:00", "1d", "1,00:00-24:00")]
    #[case("{$DELAY}/1-5,09:00-18:00", "{$DELAY}", "1-5,09:00-18:00")]
    #[case("5m/{$PERIOD}", "5m", "{$PERIOD}")]
    fn splits_delay_and_period(#[case] input: &str, #[case] delay: &str, #[case] period: &str) {
        let parser = FlexibleIntervalParser::new(ParserOptions::default());
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let flex = parser.parse_all(input).expect("flexible interval").value;
        assert_eq!(flex.delay.text, delay);
        assert_eq!(flex.period, period);
    }

    #[rstest]
    #[case("86401/1,00:00-24:00", 0, ParseErrorKind::OutOfRange { field: "delay", value: 86_401, min: 0, max: 86_400 })]
    #[case("50", 2, ParseErrorKind::UnexpectedEnd)]
    #[case("50;1,00:00-24:00", 2, ParseErrorKind::UnexpectedCharacter)]
    #[case("50/8,00:00-24:00", 3, ParseErrorKind::OutOfRange { field: "weekday", value: 8, min: 1, max: 7 })]
    #[case("50/", 3, ParseErrorKind::UnexpectedEnd)]
    fn rejects_flexible_intervals(
        #[case] input: &str,
        #[case] position: usize,
        #[case] kind: ParseErrorKind,
    ) {
        let parser = FlexibleIntervalParser::new(ParserOptions::default());
        let Err(err) = parser.parse_all(input) else {
            panic!("expected {input:?} to be rejected");
        };
        assert_eq!((err.position, err.kind), (position, kind), "{input}");
    }

    #[test]
    fn macro_period_needs_user_macros() {
        let parser = FlexibleIntervalParser::new(ParserOptions::strict());
        assert!(parser.parse_all("5m/{$PERIOD}").is_err());
    }
}
