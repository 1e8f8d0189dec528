use super::delay_flex::{Interval, ItemDelayFlexParser};
use super::simple::{Delay, SimpleIntervalParser};
use super::{FlexibleInterval, SchedulingInterval};
use crate::errors::ParseError;
use crate::options::ParserOptions;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};

/// A base delay and its custom intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateInterval {
    /// The base delay.
    pub delay: Delay,
    /// Custom intervals following the delay.
    pub intervals: Vec<Interval>,
}

impl UpdateInterval {
    /// Parse `text` as one complete update interval.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found.
    pub fn parse(text: &str, options: ParserOptions) -> Result<Self, ParseError> {
        UpdateIntervalParser::new(options)
            .parse_all(text)
            .map(|parsed| parsed.value)
    }

    /// Flexible intervals in order.
    pub fn flexible(&self) -> impl Iterator<Item = &FlexibleInterval> {
        self.intervals.iter().filter_map(|i| match i {
            Interval::Flexible(flex) => Some(flex),
            _ => None,
        })
    }

    /// Scheduling intervals in order.
    pub fn scheduling(&self) -> impl Iterator<Item = &SchedulingInterval> {
        self.intervals.iter().filter_map(|i| match i {
            Interval::Scheduling(schedule) => Some(schedule),
            _ => None,
        })
    }
}

/// Parser for `delay(;interval)*`.
///
/// # Examples
/// ```
/// use monconf_parsers::{ParserOptions, UpdateInterval};
/// let update = UpdateInterval::parse("1h;wd1-5h9-18m0/30;wd6-7h10-16", ParserOptions::default()).unwrap();
/// assert_eq!(update.delay.text, "1h");
/// assert_eq!(update.scheduling().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateIntervalParser {
    delay: SimpleIntervalParser,
    custom: ItemDelayFlexParser,
}

impl UpdateIntervalParser {
    /// Create a parser accepting the macro kinds enabled in `options`.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            delay: SimpleIntervalParser::new(options),
            custom: ItemDelayFlexParser::new(options),
        }
    }
}

impl Parse for UpdateIntervalParser {
    type Value = UpdateInterval;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, UpdateInterval> {
        check_start(source, pos);
        let delay = self.delay.parse(source, pos)?;
        let mut end = delay.end();
        let mut intervals = Vec::new();
        if source.as_bytes().get(end) == Some(&b';') {
            (end, intervals) = self.custom.entries(source, end + 1)?;
        }
        let value = UpdateInterval {
            delay: delay.value,
            intervals,
        };
        Ok(Parsed::new(source, pos, end, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use rstest::rstest;

    #[test]
    fn splits_delay_and_schedules() {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let update = UpdateInterval::parse("1h;wd1-5h9-18m0/30;wd6-7h10-16", ParserOptions::default())
            .expect("update interval");
        assert_eq!(update.delay.text, "1h");
        assert_eq!(update.delay.seconds(), Some(3_600));
        let schedules: Vec<String> = update.scheduling().map(ToString::to_string).collect();
        assert_eq!(schedules, ["wd1-5h9-18m0/30", "wd6-7h10-16"]);
    }

    #[rstest]
    #[case("30s", 0)]
    #[case("{$DELAY}", 0)]
    #[case("0;50s/1-7,00:00-24:00", 1)]
    #[case("{$DELAY};{$FLEX};md1", 2)]
    fn accepts_update_intervals(#[case] input: &str, #[case] entries: usize) {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let update = UpdateInterval::parse(input, ParserOptions::default()).expect("update interval");
        assert_eq!(update.intervals.len(), entries);
    }

    #[test]
    fn lists_flexible_entries_apart_from_schedules() {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let update = UpdateInterval::parse("0;50s/1-7,00:00-24:00;md1", ParserOptions::default())
            .expect("update interval");
        let flexible: Vec<&FlexibleInterval> = update.flexible().collect();
        let [flex] = flexible.as_slice() else {
            panic!("expected one flexible interval, got {flexible:?}");
        };
        assert_eq!(flex.delay.text, "50s");
        assert_eq!(flex.period, "1-7,00:00-24:00");
        assert_eq!(update.scheduling().count(), 1);
    }

    #[test]
    fn user_macro_delay_needs_user_macros() {
        let options = ParserOptions::default().with_user_macros(false);
        let Err(err) = UpdateInterval::parse("{$D}", options) else {
            panic!("expected the user macro delay to be rejected");
        };
        assert_eq!((err.position, err.kind), (0, ParseErrorKind::UnexpectedCharacter));
        assert!(UpdateInterval::parse("{$D}", options.with_user_macros(true)).is_ok());
    }

    #[rstest]
    #[case("", 0, ParseErrorKind::UnexpectedEnd)]
    #[case("1h;", 3, ParseErrorKind::UnexpectedEnd)]
    #[case("wd1", 0, ParseErrorKind::UnexpectedCharacter)]
    #[case("1h;h24", 4, ParseErrorKind::OutOfRange { field: "h", value: 24, min: 0, max: 23 })]
    #[case("1h 5m", 2, ParseErrorKind::UnexpectedCharacter)]
    fn rejects_update_intervals(
        #[case] input: &str,
        #[case] position: usize,
        #[case] kind: ParseErrorKind,
    ) {
        let Err(err) = UpdateInterval::parse(input, ParserOptions::default()) else {
            panic!("expected {input:?} to be rejected");
        };
        assert_eq!((err.position, err.kind), (position, kind), "{input}");
    }
}
