//! Unit suffix tables for numeric literals.

/// A single-letter unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Suffix {
    /// `s`: seconds.
    Seconds,
    /// `m`: minutes.
    Minutes,
    /// `h`: hours.
    Hours,
    /// `d`: days.
    Days,
    /// `w`: weeks.
    Weeks,
    /// `M` in a time context: months, counted as 30 days.
    Months,
    /// `y`: years, counted as 365 days.
    Years,
    /// `K`: kibibytes.
    Kilo,
    /// `M` in a byte context: mebibytes.
    Mega,
    /// `G`: gibibytes.
    Giga,
    /// `T`: tebibytes.
    Tera,
}

impl Suffix {
    /// The letter written in the source.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Seconds => 's',
            Self::Minutes => 'm',
            Self::Hours => 'h',
            Self::Days => 'd',
            Self::Weeks => 'w',
            Self::Months | Self::Mega => 'M',
            Self::Years => 'y',
            Self::Kilo => 'K',
            Self::Giga => 'G',
            Self::Tera => 'T',
        }
    }

    /// Seconds or bytes represented by one unit.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 3_600,
            Self::Days => 86_400,
            Self::Weeks => 604_800,
            Self::Months => 2_592_000,
            Self::Years => 31_536_000,
            Self::Kilo => 1 << 10,
            Self::Mega => 1 << 20,
            Self::Giga => 1 << 30,
            Self::Tera => 1 << 40,
        }
    }
}

/// An immutable table of suffixes accepted in one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suffixes(&'static [Suffix]);

impl Suffixes {
    /// Time units: `s m h d w M y`.
    pub const TIME: Self = Self(&[
        Suffix::Seconds,
        Suffix::Minutes,
        Suffix::Hours,
        Suffix::Days,
        Suffix::Weeks,
        Suffix::Months,
        Suffix::Years,
    ]);
    /// Byte units: `K M G T`.
    pub const BYTE: Self = Self(&[Suffix::Kilo, Suffix::Mega, Suffix::Giga, Suffix::Tera]);
    /// Units accepted after a number in a trigger expression.
    pub const TRIGGER: Self = Self(&[
        Suffix::Seconds,
        Suffix::Minutes,
        Suffix::Hours,
        Suffix::Days,
        Suffix::Weeks,
        Suffix::Kilo,
        Suffix::Mega,
        Suffix::Giga,
        Suffix::Tera,
    ]);
    /// Units accepted in update intervals: `s m h d w`.
    pub const INTERVAL: Self = Self(&[
        Suffix::Seconds,
        Suffix::Minutes,
        Suffix::Hours,
        Suffix::Days,
        Suffix::Weeks,
    ]);
    /// No suffix at all.
    pub const NONE: Self = Self(&[]);

    /// Find the suffix written as byte `b`.
    #[must_use]
    pub fn lookup(self, b: u8) -> Option<Suffix> {
        self.0
            .iter()
            .copied()
            .find(|suffix| u32::from(b) == u32::from(suffix.symbol()))
    }
}
