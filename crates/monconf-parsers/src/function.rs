//! Function call syntax: `name(param, "quoted param", ...)`.

use crate::errors::ParseError;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{quoted, run_end, skip_spaces, slice};

/// A recognised function call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    /// Function name.
    pub name: String,
    /// Parameters with quotes removed and escapes resolved.
    pub parameters: Vec<String>,
    /// Text between the parentheses, exactly as written.
    pub raw_parameters: String,
}

/// Parser for `name(params)`.
///
/// Names are `[a-zA-Z][a-zA-Z0-9_]*`. Parameters are comma separated with
/// leading spaces skipped; a quoted parameter may be followed by spaces before
/// the next `,` or `)`.
///
/// # Examples
/// ```
/// use monconf_parsers::{FunctionParser, Parse};
/// let call = FunctionParser.parse_all(r#"last(#1, "a,b")"#).unwrap().value;
/// assert_eq!(call.name, "last");
/// assert_eq!(call.parameters, ["#1", "a,b"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionParser;

impl Parse for FunctionParser {
    type Value = FunctionCall;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, FunctionCall> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        if !bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
            return Err(ParseError::at(bytes, pos));
        }
        let name_end = run_end(bytes, pos + 1, |b| b.is_ascii_alphanumeric() || b == b'_');
        if bytes.get(name_end) != Some(&b'(') {
            return Err(ParseError::at(bytes, name_end));
        }
        let params_start = name_end + 1;
        let (close, parameters) = parameters(bytes, params_start)?;
        let value = FunctionCall {
            name: slice(source, pos, name_end).to_owned(),
            parameters,
            raw_parameters: slice(source, params_start, close).to_owned(),
        };
        Ok(Parsed::new(source, pos, close + 1, value))
    }
}

/// Scan a parameter list starting just after `(`; returns the offset of the
/// closing `)` and the decoded parameters.
fn parameters(bytes: &[u8], start: usize) -> Result<(usize, Vec<String>), ParseError> {
    let mut params = Vec::new();
    let mut i = skip_spaces(bytes, start);
    if bytes.get(i) == Some(&b')') {
        return Ok((i, params));
    }
    loop {
        i = skip_spaces(bytes, i);
        if bytes.get(i) == Some(&b'"') {
            let (end, value) = quoted(bytes, i)?;
            params.push(value);
            i = skip_spaces(bytes, end);
        } else {
            let end = run_end(bytes, i, |b| b != b',' && b != b')');
            params.push(String::from_utf8_lossy(bytes.get(i..end).unwrap_or_default()).into_owned());
            i = end;
        }
        match bytes.get(i) {
            Some(b',') => i += 1,
            Some(b')') => return Ok((i, params)),
            _ => return Err(ParseError::at(bytes, i)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::outcome::ParseOutcome;
    use rstest::rstest;

    #[rstest]
    #[case("last()", &[])]
    #[case("last(0)", &["0"])]
    #[case("last( 0 ,1)", &["0 ", "1"])]
    #[case("count(a,)", &["a", ""])]
    #[case(r#"str("a\"b" , x)"#, &["a\"b", "x"])]
    #[case("str( ()", &["("])]
    #[case("f(#1,5m)", &["#1", "5m"])]
    fn decodes_parameters(#[case] input: &str, #[case] expected: &[&str]) {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let call = FunctionParser.parse_all(input).expect("function call").value;
        assert_eq!(call.parameters, expected);
    }

    #[rstest]
    #[case("last(0)}", ParseOutcome::Continuation(7))]
    #[case("1ast()", ParseOutcome::Fail)]
    #[case("last", ParseOutcome::Fail)]
    #[case("last(0", ParseOutcome::Fail)]
    #[case(r#"str(")"#, ParseOutcome::Fail)]
    #[case(r#"str("a"b)"#, ParseOutcome::Fail)]
    fn reports_outcome(#[case] input: &str, #[case] expected: ParseOutcome) {
        assert_eq!(FunctionParser.outcome(input, 0), expected);
    }

    #[test]
    fn keeps_raw_parameter_text() {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let call = FunctionParser.parse_all(r#"regsub("(\d+)", \1)"#).expect("call").value;
        assert_eq!(call.name, "regsub");
        assert_eq!(call.raw_parameters, r#""(\d+)", \1"#);
    }

    #[test]
    fn unterminated_list_reports_end() {
        let Err(err) = FunctionParser.parse("last(0", 0) else {
            panic!("expected failure");
        };
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(err.position, 6);
    }
}
