//! Update intervals and their parts.
//!
//! An update interval is a base delay followed by `;`-separated custom
//! intervals, e.g. `1h;50s/1-5,09:00-18:00;wd1-5h9`:
//!
//! - a flexible interval `delay/period` overrides the delay during a period,
//! - a scheduling interval selects moments by month day, week day, hour,
//!   minute and second.

mod delay_flex;
mod flexible;
mod period;
mod scheduling;
mod simple;
mod update;

pub use delay_flex::{Interval, ItemDelayFlexParser};
pub use flexible::{FlexibleInterval, FlexibleIntervalParser, MAX_FLEXIBLE_DELAY};
pub use period::{DayTime, TimePeriod, TimePeriodParser, TimePeriodsParser};
pub use scheduling::{ScheduleFilter, ScheduleUnit, SchedulingInterval, SchedulingIntervalParser};
pub use simple::{Delay, SimpleIntervalParser};
pub use update::{UpdateInterval, UpdateIntervalParser};

use crate::errors::{ParseError, ParseErrorKind};
use crate::macros::{LldMacroParser, UserMacroParser};
use crate::options::ParserOptions;
use crate::outcome::Parse;
use crate::scan::{digits_end, digits_value};

/// Parse a macro standing in for a value, as allowed by `options`; returns
/// the offset past it.
fn macro_value(source: &str, pos: usize, options: ParserOptions) -> Result<usize, ParseError> {
    let bytes = source.as_bytes();
    if options.user_macros {
        if let Ok(m) = UserMacroParser.parse(source, pos) {
            return Ok(m.end());
        }
    }
    if options.lld_macros {
        if let Ok(m) = LldMacroParser.parse(source, pos) {
            return Ok(m.end());
        }
    }
    Err(ParseError::at(bytes, pos))
}

/// Bounds and width of one numeric field.
#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    min: u32,
    max: u32,
    max_digits: usize,
}

impl Field {
    /// Read a digit run at `pos` and check it against the field bounds.
    fn read(self, bytes: &[u8], pos: usize) -> Result<(usize, u32), ParseError> {
        let end = digits_end(bytes, pos);
        if end == pos {
            return Err(ParseError::at(bytes, pos));
        }
        if end - pos > self.max_digits {
            return Err(ParseError::unexpected(pos + self.max_digits));
        }
        let value = digits_value(bytes, pos, end);
        self.check(value, pos)?;
        Ok((end, u32::try_from(value).unwrap_or(u32::MAX)))
    }

    fn check(self, value: u64, pos: usize) -> Result<(), ParseError> {
        if value < u64::from(self.min) || value > u64::from(self.max) {
            return Err(ParseError::out_of_range(
                self.name,
                value,
                (u64::from(self.min), u64::from(self.max)),
                pos,
            ));
        }
        Ok(())
    }

    const fn with_range(self, name: &'static str, min: u32, max: u32) -> Self {
        Self {
            name,
            min,
            max,
            max_digits: self.max_digits,
        }
    }
}

fn inverted(pos: usize) -> ParseError {
    ParseError::new(ParseErrorKind::InvertedRange, pos)
}
