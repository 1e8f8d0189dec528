use std::collections::BTreeMap;
use std::fmt;

use super::{Field, inverted};
use crate::errors::{ParseError, ParseErrorKind};
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::set::SetParser;

/// A field group of a scheduling interval, in the order groups must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScheduleUnit {
    /// `md`: day of the month, 1 to 31.
    MonthDay,
    /// `wd`: day of the week, 1 to 7.
    WeekDay,
    /// `h`: hour, 0 to 23.
    Hour,
    /// `m`: minute, 0 to 59.
    Minute,
    /// `s`: second, 0 to 59.
    Second,
}

impl ScheduleUnit {
    const ALL: [Self; 5] = [
        Self::MonthDay,
        Self::WeekDay,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// The tag written before the group's filters.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::MonthDay => "md",
            Self::WeekDay => "wd",
            Self::Hour => "h",
            Self::Minute => "m",
            Self::Second => "s",
        }
    }

    /// Smallest and largest accepted value.
    #[must_use]
    pub const fn bounds(self) -> (u32, u32) {
        match self {
            Self::MonthDay => (1, 31),
            Self::WeekDay => (1, 7),
            Self::Hour => (0, 23),
            Self::Minute | Self::Second => (0, 59),
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.tag() == tag)
    }

    const fn field(self) -> Field {
        let (min, max) = self.bounds();
        Field {
            name: self.tag(),
            min,
            max,
            max_digits: if matches!(self, Self::WeekDay) { 1 } else { 2 },
        }
    }
}

impl fmt::Display for ScheduleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One `from[-till][/step]` filter; absent parts are `None`, not zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleFilter {
    /// First selected value.
    pub from: Option<u32>,
    /// Last selected value.
    pub till: Option<u32>,
    /// Distance between selected values.
    pub step: Option<u32>,
}

impl fmt::Display for ScheduleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{from}")?;
        }
        if let Some(till) = self.till {
            write!(f, "-{till}")?;
        }
        if let Some(step) = self.step {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

/// A cron-like schedule such as `wd1-5h9-18m0/30`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SchedulingInterval {
    /// Filters for each group present, in group order.
    pub fields: BTreeMap<ScheduleUnit, Vec<ScheduleFilter>>,
}

impl SchedulingInterval {
    /// Filters of `unit`, or an empty slice when the group is absent.
    #[must_use]
    pub fn filters(&self, unit: ScheduleUnit) -> &[ScheduleFilter] {
        self.fields.get(&unit).map(Vec::as_slice).unwrap_or_default()
    }
}

impl fmt::Display for SchedulingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, filters) in &self.fields {
            write!(f, "{unit}")?;
            for (index, filter) in filters.iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{filter}")?;
            }
        }
        Ok(())
    }
}

/// Parser for scheduling intervals.
///
/// Groups appear in the order `md`, `wd`, `h`, `m`, `s`; any may be skipped
/// but none repeated. A step needs a range of at least two values, except
/// after a lone `0` in `h`, `m` or `s`, where it spans the whole unit
/// (`m0/30`).
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, ScheduleUnit, SchedulingIntervalParser};
/// let parser = SchedulingIntervalParser::new();
/// let interval = parser.parse_all("md1-5h9-18").unwrap().value;
/// assert_eq!(interval.filters(ScheduleUnit::Hour)[0].till, Some(18));
/// assert_eq!(interval.to_string(), "md1-5h9-18");
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingIntervalParser {
    tags: SetParser,
}

impl Default for SchedulingIntervalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingIntervalParser {
    /// Create a scheduling interval parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: SetParser::new(ScheduleUnit::ALL.map(ScheduleUnit::tag)).without_word_boundary(),
        }
    }
}

impl Parse for SchedulingIntervalParser {
    type Value = SchedulingInterval;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, SchedulingInterval> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let mut interval = SchedulingInterval::default();
        let mut last: Option<ScheduleUnit> = None;
        let mut i = pos;
        loop {
            let tag = match self.tags.parse(source, i) {
                Ok(tag) => tag,
                Err(err) if last.is_none() => return Err(err),
                Err(_) => break,
            };
            let Some(unit) = ScheduleUnit::from_tag(&tag.value) else {
                return Err(ParseError::unexpected(i));
            };
            if last.is_some_and(|prev| prev >= unit) {
                return Err(ParseError::new(
                    ParseErrorKind::MisorderedField { field: unit.tag() },
                    i,
                ));
            }
            let (end, filters) = filter_list(bytes, tag.end(), unit)?;
            interval.fields.insert(unit, filters);
            last = Some(unit);
            i = end;
        }
        Ok(Parsed::new(source, pos, i, interval))
    }
}

fn filter_list(
    bytes: &[u8],
    pos: usize,
    unit: ScheduleUnit,
) -> Result<(usize, Vec<ScheduleFilter>), ParseError> {
    let mut filters = Vec::new();
    let mut i = pos;
    loop {
        let (end, filter) = read_filter(bytes, i, unit)?;
        filters.push(filter);
        i = end;
        if bytes.get(i) != Some(&b',') {
            return Ok((i, filters));
        }
        i += 1;
    }
}

/// Read `from[-till][/step]` or `/step`; each digit run is validated once
/// the first byte after it is known.
fn read_filter(
    bytes: &[u8],
    pos: usize,
    unit: ScheduleUnit,
) -> Result<(usize, ScheduleFilter), ParseError> {
    let field = unit.field();
    let (min, max) = unit.bounds();
    let mut filter = ScheduleFilter::default();
    let mut i = pos;
    let span = if bytes.get(i) == Some(&b'/') {
        max - min
    } else {
        let (end, from) = field.read(bytes, i)?;
        filter.from = Some(from);
        i = end;
        if bytes.get(i) == Some(&b'-') {
            let till_pos = i + 1;
            let (end, till) = field.read(bytes, till_pos)?;
            if till < from {
                return Err(inverted(till_pos));
            }
            filter.till = Some(till);
            i = end;
            till - from
        } else if min == 0 && from == 0 {
            max
        } else {
            if bytes.get(i) == Some(&b'/') {
                return Err(ParseError::unexpected(i));
            }
            return Ok((i, filter));
        }
    };
    if bytes.get(i) == Some(&b'/') {
        let step_pos = i + 1;
        if span == 0 {
            return Err(ParseError::at(bytes, step_pos));
        }
        let (end, step) = field.with_range("step", 1, span).read(bytes, step_pos)?;
        filter.step = Some(step);
        i = end;
    }
    Ok((i, filter))
}

#[cfg(test)]
mod tests;
