use super::{closing_brace, sigil_name};
use crate::errors::ParseError;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{quoted, run_end, skip_spaces, slice};

/// Context suffix of a user macro, `{$NAME:context}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MacroContext {
    /// Context text with quotes removed and escapes resolved.
    pub value: String,
    /// Whether the context was written in double quotes.
    pub quoted: bool,
}

/// A user macro, `{$NAME}` or `{$NAME:context}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UserMacro {
    /// The name without `{$`, context and `}`.
    pub name: String,
    /// The context, when present.
    pub context: Option<MacroContext>,
}

/// Parser for user macros.
///
/// An unquoted context runs to the first `}`. A quoted context ends at the
/// first unescaped `"`, which must be followed directly by `}`.
///
/// # Examples
/// ```
/// use monconf_parsers::{Parse, UserMacroParser};
/// let parsed = UserMacroParser.parse_all(r#"{$MACRO:"a\"b"}"#).unwrap();
/// assert_eq!(parsed.value.name, "MACRO");
/// assert_eq!(parsed.value.context.unwrap().value, "a\"b");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UserMacroParser;

impl Parse for UserMacroParser {
    type Value = UserMacro;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, UserMacro> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let name_end = sigil_name(bytes, pos, b'$')?;
        let name = slice(source, pos + 2, name_end).to_owned();
        if bytes.get(name_end) != Some(&b':') {
            let end = closing_brace(bytes, name_end)?;
            return Ok(Parsed::new(source, pos, end, UserMacro { name, context: None }));
        }
        let (end, context) = context(source, name_end + 1)?;
        let value = UserMacro {
            name,
            context: Some(context),
        };
        Ok(Parsed::new(source, pos, end, value))
    }
}

/// Scan a context starting after `:`; returns the offset past `}`.
fn context(source: &str, start: usize) -> Result<(usize, MacroContext), ParseError> {
    let bytes = source.as_bytes();
    let i = skip_spaces(bytes, start);
    if bytes.get(i) == Some(&b'"') {
        let (close, value) = quoted(bytes, i)?;
        let end = closing_brace(bytes, close)?;
        return Ok((end, MacroContext { value, quoted: true }));
    }
    let close = run_end(bytes, i, |b| b != b'}');
    let end = closing_brace(bytes, close)?;
    let value = slice(source, i, close).to_owned();
    Ok((end, MacroContext { value, quoted: false }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::outcome::ParseOutcome;
    use rstest::rstest;

    #[rstest]
    #[case("{$A}", "A", None)]
    #[case("{$MACRO.X_1}", "MACRO.X_1", None)]
    #[case("{$M:ctx}", "M", Some(("ctx", false)))]
    #[case("{$M:}", "M", Some(("", false)))]
    #[case("{$M: \"ctx\"}", "M", Some(("ctx", true)))]
    #[case(r#"{$MACRO:"a\"b"}"#, "MACRO", Some(("a\"b", true)))]
    #[case(r#"{$M:regex:"^a{2}$"}"#, "M", Some((r#"regex:"^a{2"#, false)))]
    fn decodes_user_macros(
        #[case] input: &str,
        #[case] name: &str,
        #[case] context: Option<(&str, bool)>,
    ) {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let parsed = UserMacroParser.parse(input, 0).expect("user macro");
        assert_eq!(parsed.value.name, name);
        let got = parsed
            .value
            .context
            .as_ref()
            .map(|c| (c.value.as_str(), c.quoted));
        assert_eq!(got, context);
    }

    #[rstest]
    #[case("{$}", 2, ParseErrorKind::UnexpectedCharacter)]
    #[case(r#"{$MACRO:"a\"b}"#, 14, ParseErrorKind::UnexpectedEnd)]
    #[case(r#"{$M:"a"b}"#, 7, ParseErrorKind::UnexpectedCharacter)]
    #[case("{$lowercase}", 2, ParseErrorKind::UnexpectedCharacter)]
    #[case("{$M", 3, ParseErrorKind::UnexpectedEnd)]
    #[case("{$M:ctx", 7, ParseErrorKind::UnexpectedEnd)]
    #[case("{#M}", 1, ParseErrorKind::UnexpectedCharacter)]
    fn rejects_malformed_macros(
        #[case] input: &str,
        #[case] position: usize,
        #[case] kind: ParseErrorKind,
    ) {
        let Err(err) = UserMacroParser.parse(input, 0) else {
            panic!("expected {input:?} to be rejected");
        };
        assert_eq!((err.position, err.kind), (position, kind));
    }

    #[test]
    fn leaves_trailing_text_to_caller() {
        assert_eq!(
            UserMacroParser.outcome("{$A}=1", 0),
            ParseOutcome::Continuation(4)
        );
    }
}
