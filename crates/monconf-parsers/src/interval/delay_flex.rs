use super::simple::SimpleIntervalParser;
use super::{FlexibleInterval, FlexibleIntervalParser, SchedulingInterval, SchedulingIntervalParser};
use crate::errors::ParseError;
use crate::options::ParserOptions;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};

/// One custom interval of an update interval.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "snake_case"))]
pub enum Interval {
    /// `delay/period`.
    Flexible(FlexibleInterval),
    /// `md..wd..h..m..s..`.
    Scheduling(SchedulingInterval),
    /// A macro standing in for a whole entry, as written.
    UserMacro(String),
}

/// Parser for `entry(;entry)*` custom interval lists.
///
/// An entry starting with a digit is flexible, one starting with `{` is a
/// macro (flexible when followed by `/period`), anything else is scheduling.
///
/// # Examples
/// ```
/// use monconf_parsers::{Interval, ItemDelayFlexParser, Parse, ParserOptions};
/// let parser = ItemDelayFlexParser::new(ParserOptions::default());
/// let entries = parser.parse_all("50s/1-5,09:00-18:00;wd1-5h9;{$FLEX}").unwrap().value;
/// assert!(matches!(entries[0], Interval::Flexible(_)));
/// assert!(matches!(entries[1], Interval::Scheduling(_)));
/// assert_eq!(entries[2], Interval::UserMacro("{$FLEX}".to_owned()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemDelayFlexParser {
    options: ParserOptions,
    scheduling: SchedulingIntervalParser,
}

impl ItemDelayFlexParser {
    /// Create a parser accepting the macro kinds enabled in `options`.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            scheduling: SchedulingIntervalParser::new(),
        }
    }

    fn entry(&self, source: &str, pos: usize) -> Result<(usize, Interval), ParseError> {
        let bytes = source.as_bytes();
        match bytes.get(pos) {
            Some(b) if b.is_ascii_digit() => self.flexible(source, pos),
            Some(b'{') => {
                let delay = SimpleIntervalParser::new(self.options).parse(source, pos)?;
                if bytes.get(delay.end()) == Some(&b'/') {
                    self.flexible(source, pos)
                } else {
                    Ok((delay.end(), Interval::UserMacro(delay.value.text)))
                }
            }
            _ => {
                let schedule = self.scheduling.parse(source, pos)?;
                Ok((schedule.end(), Interval::Scheduling(schedule.value)))
            }
        }
    }

    fn flexible(&self, source: &str, pos: usize) -> Result<(usize, Interval), ParseError> {
        let flex = FlexibleIntervalParser::new(self.options).parse(source, pos)?;
        Ok((flex.end(), Interval::Flexible(flex.value)))
    }

    /// Parse entries from `pos` until a byte other than `;` follows one.
    pub(super) fn entries(
        &self,
        source: &str,
        pos: usize,
    ) -> Result<(usize, Vec<Interval>), ParseError> {
        let mut entries = Vec::new();
        let mut i = pos;
        loop {
            let (end, entry) = self.entry(source, i)?;
            entries.push(entry);
            i = end;
            if source.as_bytes().get(i) != Some(&b';') {
                return Ok((i, entries));
            }
            i += 1;
        }
    }
}

impl Parse for ItemDelayFlexParser {
    type Value = Vec<Interval>;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Vec<Interval>> {
        check_start(source, pos);
        let (end, entries) = self.entries(source, pos)?;
        Ok(Parsed::new(source, pos, end, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("50/1-7,00:00-24:00", 1)]
    #[case("wd1-5h9-18", 1)]
    #[case("wd1-5h9-18;wd6-7h10-16", 2)]
    #[case("{$FLEX}", 1)]
    #[case("{$DELAY}/1-5,09:00-18:00;md1", 2)]
    #[case("1m/1,00:00-24:00;2m/2,00:00-24:00;h/2", 3)]
    fn counts_entries(#[case] input: &str, #[case] count: usize) {
        let parser = ItemDelayFlexParser::new(ParserOptions::default());
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let entries = parser.parse_all(input).expect("entries").value;
        assert_eq!(entries.len(), count);
    }

    #[rstest]
    #[case("wd1-5;", 6, ParseErrorKind::UnexpectedEnd)]
    #[case("50", 2, ParseErrorKind::UnexpectedEnd)]
    #[case("wd1-5h9 ", 7, ParseErrorKind::UnexpectedCharacter)]
    #[case(";wd1", 0, ParseErrorKind::UnexpectedCharacter)]
    #[case("{#FLEX}", 0, ParseErrorKind::UnexpectedCharacter)]
    fn rejects_entries(
        #[case] input: &str,
        #[case] position: usize,
        #[case] kind: ParseErrorKind,
    ) {
        let parser = ItemDelayFlexParser::new(ParserOptions::default());
        let Err(err) = parser.parse_all(input) else {
            panic!("expected {input:?} to be rejected");
        };
        assert_eq!((err.position, err.kind), (position, kind), "{input}");
    }

    #[test]
    fn lld_macro_entries_follow_options() {
        let parser = ItemDelayFlexParser::new(ParserOptions::default().with_lld_macros(true));
        assert!(parser.parse_all("{#FLEX}").is_ok());
    }
}
