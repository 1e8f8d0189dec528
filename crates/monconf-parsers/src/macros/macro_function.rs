use super::closing_brace;
use super::reference::MacroParser;
use crate::errors::ParseError;
use crate::function::{FunctionCall, FunctionParser};
use crate::outcome::{Parse, ParseResult, Parsed, check_start};

/// A macro with a function applied to its value, `{{MACRO}.func(params)}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MacroFunction<T> {
    /// The inner macro.
    pub inner: T,
    /// The function applied to it.
    pub function: FunctionCall,
}

/// Parser for `{` + inner macro + `.` + function call + `}`.
///
/// The inner macro is recognised by `P`, typically a [`MacroParser`]; an
/// [`LldMacroParser`](crate::LldMacroParser) gives `{{#NAME}.regsub(...)}`.
///
/// # Examples
/// ```
/// use monconf_parsers::{MacroFunctionParser, MacroParser, Parse, ReferenceMode};
/// let parser = MacroFunctionParser::new(MacroParser::new(["ITEM.VALUE"], ReferenceMode::Numeric));
/// let parsed = parser.parse_all("{{ITEM.VALUE1}.regsub(\"(\\d+)\", \\1)}").unwrap();
/// assert_eq!(parsed.value.inner.name, "ITEM.VALUE");
/// assert_eq!(parsed.value.function.name, "regsub");
/// ```
#[derive(Debug, Clone)]
pub struct MacroFunctionParser<P = MacroParser> {
    inner: P,
}

impl<P> MacroFunctionParser<P> {
    /// Wrap `inner` so that it is followed by a function call.
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parse> Parse for MacroFunctionParser<P> {
    type Value = MacroFunction<P::Value>;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, Self::Value> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        if bytes.get(pos) != Some(&b'{') {
            return Err(ParseError::at(bytes, pos));
        }
        let inner = self.inner.parse(source, pos + 1)?;
        let dot = inner.end();
        if bytes.get(dot) != Some(&b'.') {
            return Err(ParseError::at(bytes, dot));
        }
        let call = FunctionParser.parse(source, dot + 1)?;
        let end = closing_brace(bytes, call.end())?;
        let value = MacroFunction {
            inner: inner.value,
            function: call.value,
        };
        Ok(Parsed::new(source, pos, end, value))
    }
}
