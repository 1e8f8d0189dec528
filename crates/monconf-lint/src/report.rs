//! Run one parser over the input text and describe the result.

use std::io::Write;

use clap::ValueEnum;
use monconf_parsers::{
    ConditionFormulaParser, DEFAULT_MACROS, FunctionMacro, FunctionMacroParser, ItemDelayFlexParser,
    ItemKeyParser, MacroFunction, MacroFunctionParser, MacroParser, MacroRef, Parse, ParseError,
    RangeParser, RangesParser, ReferenceMode, SchedulingIntervalParser, StatusCodeRangeParser,
    TriggerExpressionParser, UpdateIntervalParser, UserMacroParser,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::LintConfig;
use crate::error::LintError;

/// The construct the input text is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Trigger expression such as `{host:key.last()}>5 and {$LIMIT}<1K`.
    Trigger,
    /// Update interval: a delay followed by `;`-separated custom intervals.
    Delay,
    /// Custom interval list without the leading delay.
    Flex,
    /// Scheduling interval such as `wd1-5h9-18`.
    Schedule,
    /// Item key such as `vfs.fs.size[/,pfree]`.
    Key,
    /// Calculated item formula.
    Formula,
    /// Function macro, built-in macro or macro function.
    Macro,
    /// User macro such as `{$NAME:context}`.
    UserMacro,
    /// Comma-separated numeric ranges.
    Ranges,
    /// Comma-separated HTTP status code ranges.
    StatusCodes,
}

/// Where and why the input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Human readable description including the position.
    pub message: String,
    /// Zero-based byte offset of the error.
    pub position: usize,
    /// The input from the error position on, truncated.
    pub near: String,
}

/// The outcome of checking one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// What the input was checked as.
    pub kind: CheckKind,
    /// The checked text.
    pub input: String,
    /// Whether the whole input was accepted.
    pub valid: bool,
    /// The decoded structure for valid input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// The rejection for invalid input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Rejection>,
}

impl Report {
    /// Write the report as plain text: `valid` followed by the decoded
    /// structure, or a single `invalid: ...` line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn write_text(&self, writer: &mut dyn Write) -> Result<(), LintError> {
        if let Some(error) = &self.error {
            writeln!(writer, "invalid: {} near \"{}\"", error.message, error.near)?;
            return Ok(());
        }
        writeln!(writer, "valid")?;
        if let Some(value) = &self.value {
            writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
        }
        Ok(())
    }

    /// Write the report as a single JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn write_json(&self, writer: &mut dyn Write) -> Result<(), LintError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
enum AnyMacro {
    FunctionMacro(FunctionMacro),
    Macro(MacroRef),
    MacroFunction(MacroFunction<MacroRef>),
}

/// Check `input` as `kind` using the macro settings of `config`.
///
/// # Errors
///
/// Returns an error only if a decoded value cannot be serialised; rejected
/// input yields a report with `valid == false`.
pub fn check(kind: CheckKind, input: &str, config: &LintConfig) -> Result<Report, LintError> {
    let options = config.parser_options();
    debug!(?kind, ?options, "checking input");
    let result = match kind {
        CheckKind::Trigger => decode(&TriggerExpressionParser::new(options), input),
        CheckKind::Delay => decode(&UpdateIntervalParser::new(options), input),
        CheckKind::Flex => decode(&ItemDelayFlexParser::new(options), input),
        CheckKind::Schedule => decode(&SchedulingIntervalParser::new(), input),
        CheckKind::Key => decode(&ItemKeyParser, input),
        CheckKind::Formula => decode(&ConditionFormulaParser::new(), input),
        CheckKind::Macro => decode_macro(input),
        CheckKind::UserMacro => decode(&UserMacroParser, input),
        CheckKind::Ranges => decode(&RangesParser::new(RangeParser::new(options)), input),
        CheckKind::StatusCodes => {
            decode(&RangesParser::new(StatusCodeRangeParser::new(options)), input)
        }
    };
    let report = match result {
        Ok(value) => Report {
            kind,
            input: input.to_owned(),
            valid: true,
            value: Some(value?),
            error: None,
        },
        Err(err) => {
            info!(position = err.position, error = %err, "input rejected");
            Report {
                kind,
                input: input.to_owned(),
                valid: false,
                value: None,
                error: Some(Rejection {
                    message: err.to_string(),
                    position: err.position,
                    near: err.near_with(input, config.preview_len),
                }),
            }
        }
    };
    Ok(report)
}

type Decoded = Result<Result<Value, serde_json::Error>, ParseError>;

fn decode<P>(parser: &P, input: &str) -> Decoded
where
    P: Parse,
    P::Value: Serialize,
{
    parser
        .parse_all(input)
        .map(|parsed| serde_json::to_value(parsed.value))
}

fn decode_macro(input: &str) -> Decoded {
    let function = match FunctionMacroParser.parse_all(input) {
        Ok(parsed) => return Ok(serde_json::to_value(AnyMacro::FunctionMacro(parsed.value))),
        Err(err) => err,
    };
    let builtin = MacroParser::new(DEFAULT_MACROS.iter().copied(), ReferenceMode::Numeric);
    if let Ok(parsed) = builtin.parse_all(input) {
        return Ok(serde_json::to_value(AnyMacro::Macro(parsed.value)));
    }
    if let Ok(parsed) = MacroFunctionParser::new(builtin).parse_all(input) {
        return Ok(serde_json::to_value(AnyMacro::MacroFunction(parsed.value)));
    }
    Err(function)
}
