//! Position-based parsers for monitoring configuration text.
//!
//! Each parser recognises one construct (a macro, an item key, a trigger
//! expression, an update interval, ...) starting at a byte offset and reports
//! how much of the source it matched. Higher-level parsers call lower-level
//! ones at their cursor and advance by the match length, so every parser can
//! also be used to scan for its construct inside a larger string.
//!
//! # Outcomes
//!
//! A successful parse carries a [`Completion`]: `Done` when the match reaches
//! the end of the source, `Continuation` when bytes remain for the caller to
//! interpret. [`Parse::parse_all`] turns a continuation into an error.
//! Failures are [`ParseError`]s holding a zero-based byte offset; malformed
//! input never panics.
//!
//! # Example
//!
//! ```
//! use monconf_parsers::{Parse, ParseOutcome, UserMacroParser};
//!
//! assert_eq!(UserMacroParser.outcome("{$A}", 0), ParseOutcome::Done(4));
//! assert_eq!(UserMacroParser.outcome("url?{$A}&x", 4), ParseOutcome::Continuation(4));
//! assert_eq!(UserMacroParser.outcome("{$}", 0), ParseOutcome::Fail);
//! ```
//!
//! # Features
//!
//! - `serde`: derive `serde::Serialize` for decoded values and errors.

mod errors;
mod formula;
mod function;
mod interval;
mod item_key;
mod macros;
mod number;
mod options;
mod outcome;
mod range;
mod scan;
mod set;
mod trigger;
mod units;

pub use errors::{PREVIEW_LEN, ParseError, ParseErrorKind};
pub use formula::{ConditionFormula, ConditionFormulaParser, FormulaConstant};
pub use function::{FunctionCall, FunctionParser};
pub use interval::{
    DayTime, Delay, FlexibleInterval, FlexibleIntervalParser, Interval, ItemDelayFlexParser,
    MAX_FLEXIBLE_DELAY, ScheduleFilter, ScheduleUnit, SchedulingInterval,
    SchedulingIntervalParser, SimpleIntervalParser, TimePeriod, TimePeriodParser,
    TimePeriodsParser, UpdateInterval, UpdateIntervalParser,
};
pub use item_key::{ItemKey, ItemKeyParser, KeyParameter, KeyParameterKind};
pub use macros::{
    FunctionMacro, FunctionMacroParser, LldMacro, LldMacroParser, MacroContext, MacroFunction,
    MacroFunctionParser, MacroParser, MacroRef, MacroReference, ReferenceMode, UserMacro,
    UserMacroParser,
};
pub use number::{Number, NumberParser};
pub use options::ParserOptions;
pub use outcome::{Completion, Match, Parse, ParseOutcome, ParseResult, Parsed};
pub use range::{Range, RangeBound, RangeParser, RangesParser, StatusCodeRangeParser};
pub use set::SetParser;
pub use trigger::{
    DEFAULT_MACROS, Token, TokenKind, TriggerExpression, TriggerExpressionParser,
    validate_trigger,
};
pub use units::{Suffix, Suffixes};
