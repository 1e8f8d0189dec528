use super::closing_brace;
use crate::errors::ParseError;
use crate::function::FunctionParser;
use crate::item_key::{key_id_end, parse_parameters};
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{run_end, slice};

/// A function applied to a host item, `{host:key.function(params)}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionMacro {
    /// Host name.
    pub host: String,
    /// Item key, parameters included.
    pub item: String,
    /// The whole function call, e.g. `last(0)`.
    pub function: String,
    /// Function name.
    pub function_name: String,
    /// Decoded function parameters.
    pub function_params: Vec<String>,
}

/// Parser for function macros.
///
/// When the key has no `[params]`, the key and function name are written as
/// one dotted run; the run is split at its last `.`.
///
/// # Examples
/// ```
/// use monconf_parsers::{FunctionMacroParser, Parse};
/// let parsed = FunctionMacroParser.parse_all("{srv:agent.ping.last(0)}").unwrap();
/// assert_eq!(parsed.value.host, "srv");
/// assert_eq!(parsed.value.item, "agent.ping");
/// assert_eq!(parsed.value.function_name, "last");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionMacroParser;

impl Parse for FunctionMacroParser {
    type Value = FunctionMacro;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, FunctionMacro> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        if bytes.get(pos) != Some(&b'{') {
            return Err(ParseError::at(bytes, pos));
        }
        let host_start = pos + 1;
        let host_end = run_end(bytes, host_start, |b| {
            b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b' ' | b'-')
        });
        if host_end == host_start || bytes.get(host_end) != Some(&b':') {
            return Err(ParseError::at(bytes, host_end));
        }
        let key_start = host_end + 1;
        let (key_end, func_start) = split_key(bytes, key_start)?;
        let call = FunctionParser.parse(source, func_start)?;
        let end = closing_brace(bytes, call.end())?;
        let value = FunctionMacro {
            host: slice(source, host_start, host_end).to_owned(),
            item: slice(source, key_start, key_end).to_owned(),
            function: call.matched.as_str().to_owned(),
            function_name: call.value.name,
            function_params: call.value.parameters,
        };
        Ok(Parsed::new(source, pos, end, value))
    }
}

/// Find where the key ends and the function name starts.
fn split_key(bytes: &[u8], key_start: usize) -> Result<(usize, usize), ParseError> {
    let id_end = key_id_end(bytes, key_start);
    if id_end == key_start {
        return Err(ParseError::at(bytes, key_start));
    }
    if bytes.get(id_end) == Some(&b'[') {
        let (params_end, _) = parse_parameters(bytes, id_end)?;
        if bytes.get(params_end) != Some(&b'.') {
            return Err(ParseError::at(bytes, params_end));
        }
        return Ok((params_end, params_end + 1));
    }
    let run = bytes.get(key_start..id_end).unwrap_or_default();
    match run.iter().rposition(|&b| b == b'.') {
        Some(dot) if dot > 0 => Ok((key_start + dot, key_start + dot + 1)),
        _ => Err(ParseError::at(bytes, id_end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::outcome::ParseOutcome;
    use rstest::rstest;

    #[rstest]
    #[case("{srv:agent.ping.last(0)}", "srv", "agent.ping", "last(0)", &["0"])]
    #[case("{Zabbix server:key.last()}", "Zabbix server", "key", "last()", &[])]
    #[case("{host:vfs.fs.size[/,pfree].min(5m)}", "host", "vfs.fs.size[/,pfree]", "min(5m)", &["5m"])]
    #[case("{host:key.str( ()}", "host", "key", "str( ()", &["("])]
    #[case(r#"{host:key.str("a,b",1)}"#, "host", "key", r#"str("a,b",1)"#, &["a,b", "1"])]
    fn decodes_function_macros(
        #[case] input: &str,
        #[case] host: &str,
        #[case] item: &str,
        #[case] function: &str,
        #[case] params: &[&str],
    ) {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let parsed = FunctionMacroParser.parse_all(input).expect("function macro");
        assert_eq!(parsed.value.host, host);
        assert_eq!(parsed.value.item, item);
        assert_eq!(parsed.value.function, function);
        assert_eq!(parsed.value.function_params, params);
    }

    #[rstest]
    #[case("{:key.last(0)}")]
    #[case("{host:last(0)}")]
    #[case("{host:.last(0)}")]
    #[case(r#"{host:key.str( ")}"#)]
    #[case("{host:key.last(0)")]
    #[case("{host:key[a]last(0)}")]
    #[case("{host:key.1st(0)}")]
    #[case("{HOST.HOST}")]
    fn rejects_malformed_function_macros(#[case] input: &str) {
        assert_eq!(FunctionMacroParser.outcome(input, 0), ParseOutcome::Fail);
    }

    #[test]
    fn reports_missing_brace_at_end() {
        let Err(err) = FunctionMacroParser.parse("{h:k.last(0)", 0) else {
            panic!("expected failure");
        };
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(err.position, 12);
    }

    #[test]
    fn leaves_comparison_to_caller() {
        assert_eq!(
            FunctionMacroParser.outcome("{h:k.last()}=1", 0),
            ParseOutcome::Continuation(12)
        );
    }
}
