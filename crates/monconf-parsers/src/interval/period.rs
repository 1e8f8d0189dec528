use std::fmt;

use super::{Field, inverted};
use crate::errors::ParseError;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::digits_end;

const WEEKDAY: Field = Field {
    name: "weekday",
    min: 1,
    max: 7,
    max_digits: 1,
};
const HOUR: Field = Field {
    name: "hour",
    min: 0,
    max: 23,
    max_digits: 2,
};
const MINUTE: Field = Field {
    name: "minute",
    min: 0,
    max: 59,
    max_digits: 2,
};

/// A time of day with minute precision; `24:00` marks the end of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DayTime {
    /// Hour, 0 to 24.
    pub hour: u32,
    /// Minute, 0 to 59.
    pub minute: u32,
}

impl DayTime {
    /// Minutes since midnight, saturating at `u32::MAX` for out-of-range
    /// fields.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.hour.saturating_mul(60).saturating_add(self.minute)
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A weekly time window, `d[-d],hh:mm-hh:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimePeriod {
    /// First week day, 1 (Monday) to 7.
    pub day_from: u32,
    /// Last week day, at least `day_from`.
    pub day_till: u32,
    /// Start of the window on each day.
    pub start: DayTime,
    /// End of the window on each day, after `start`.
    pub end: DayTime,
}

impl TimePeriod {
    /// Whether the window contains `weekday` at `time`.
    #[must_use]
    pub fn contains(&self, weekday: u32, time: DayTime) -> bool {
        (self.day_from..=self.day_till).contains(&weekday)
            && (self.start.minutes()..self.end.minutes()).contains(&time.minutes())
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.day_from)?;
        if self.day_till != self.day_from {
            write!(f, "-{}", self.day_till)?;
        }
        write!(f, ",{}-{}", self.start, self.end)
    }
}

/// Parser for one time period.
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, TimePeriodParser};
/// let period = TimePeriodParser.parse_all("1-5,09:00-18:00").unwrap().value;
/// assert_eq!((period.day_from, period.day_till), (1, 5));
/// assert_eq!(period.end.minutes(), 18 * 60);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimePeriodParser;

impl Parse for TimePeriodParser {
    type Value = TimePeriod;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, TimePeriod> {
        check_start(source, pos);
        let (end, period) = time_period(source.as_bytes(), pos)?;
        Ok(Parsed::new(source, pos, end, period))
    }
}

fn time_period(bytes: &[u8], pos: usize) -> Result<(usize, TimePeriod), ParseError> {
    let (mut i, day_from) = WEEKDAY.read(bytes, pos)?;
    let mut day_till = day_from;
    if bytes.get(i) == Some(&b'-') {
        let till_pos = i + 1;
        let (end, till) = WEEKDAY.read(bytes, till_pos)?;
        if till < day_from {
            return Err(inverted(till_pos));
        }
        (i, day_till) = (end, till);
    }
    i = expect(bytes, i, b',')?;
    let (i, start) = day_time(bytes, i, false)?;
    let end_pos = expect(bytes, i, b'-')?;
    let (i, end) = day_time(bytes, end_pos, true)?;
    if start >= end {
        return Err(inverted(end_pos));
    }
    let period = TimePeriod {
        day_from,
        day_till,
        start,
        end,
    };
    Ok((i, period))
}

fn expect(bytes: &[u8], pos: usize, byte: u8) -> Result<usize, ParseError> {
    if bytes.get(pos) == Some(&byte) {
        Ok(pos + 1)
    } else {
        Err(ParseError::at(bytes, pos))
    }
}

/// Read `h:mm` or `hh:mm`; `24:00` is accepted only as an end time.
fn day_time(bytes: &[u8], pos: usize, is_end: bool) -> Result<(usize, DayTime), ParseError> {
    let hour_field = if is_end {
        HOUR.with_range("hour", 0, 24)
    } else {
        HOUR
    };
    let (i, hour) = hour_field.read(bytes, pos)?;
    let minute_pos = expect(bytes, i, b':')?;
    let minute_end = digits_end(bytes, minute_pos);
    if minute_end < minute_pos + 2 {
        return Err(ParseError::at(bytes, minute_end));
    }
    let (end, minute) = MINUTE.read(bytes, minute_pos)?;
    if hour == 24 && minute != 0 {
        return Err(ParseError::out_of_range("hour", 24, (0, 23), pos));
    }
    Ok((end, DayTime { hour, minute }))
}

/// Parser for `period(;period)*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimePeriodsParser;

impl Parse for TimePeriodsParser {
    type Value = Vec<TimePeriod>;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Vec<TimePeriod>> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let mut periods = Vec::new();
        let mut i = pos;
        loop {
            let (end, period) = time_period(bytes, i)?;
            periods.push(period);
            i = end;
            if bytes.get(i) != Some(&b';') {
                break;
            }
            i += 1;
        }
        Ok(Parsed::new(source, pos, i, periods))
    }
}
