use super::closing_brace;
use crate::errors::ParseError;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{quoted, run_end, slice};
use crate::set::SetParser;

/// Which suffix may follow a macro name before the closing `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceMode {
    /// Nothing may follow the name.
    #[default]
    None,
    /// An optional single digit `1`-`9`, as in `{HOST.HOST2}`.
    Numeric,
    /// A mandatory `.` and an alphanumeric or quoted token, as in
    /// `{EVENT.TAGS.service}`.
    AlphaNumeric,
}

/// The reference suffix of a recognised macro.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MacroReference {
    /// No suffix.
    None,
    /// A numeric index `1`-`9`.
    Numeric(u8),
    /// An alphanumeric or quoted token; quotes are stripped from `value`.
    AlphaNumeric {
        /// The token text.
        value: String,
        /// Whether the token was written in double quotes.
        quoted: bool,
    },
}

/// A recognised built-in macro.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MacroRef {
    /// The macro name without braces.
    pub name: String,
    /// The suffix following the name.
    pub reference: MacroReference,
}

/// Parser for built-in macros drawn from a fixed name list.
///
/// # Examples
/// ```
/// use monconf_parsers::{MacroParser, MacroReference, Parse, ReferenceMode};
/// let parser = MacroParser::new(["{HOST.HOST}", "{HOST.NAME}"], ReferenceMode::Numeric);
/// let parsed = parser.parse_all("{HOST.HOST2}").unwrap();
/// assert_eq!(parsed.value.name, "HOST.HOST");
/// assert_eq!(parsed.value.reference, MacroReference::Numeric(2));
/// ```
#[derive(Debug, Clone)]
pub struct MacroParser {
    names: SetParser,
    mode: ReferenceMode,
}

impl MacroParser {
    /// Build a parser over `names`, given with or without braces.
    pub fn new<I, S>(names: I, mode: ReferenceMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names.into_iter().map(|name| {
            let name = name.as_ref();
            let name = name.strip_prefix('{').unwrap_or(name);
            name.strip_suffix('}').unwrap_or(name).to_owned()
        });
        Self {
            names: SetParser::new(names).without_word_boundary(),
            mode,
        }
    }

    fn reference(
        &self,
        source: &str,
        pos: usize,
    ) -> Result<(usize, MacroReference), ParseError> {
        let bytes = source.as_bytes();
        match self.mode {
            ReferenceMode::None => Ok((pos, MacroReference::None)),
            ReferenceMode::Numeric => match bytes.get(pos) {
                Some(&digit @ b'1'..=b'9') => Ok((pos + 1, MacroReference::Numeric(digit - b'0'))),
                _ => Ok((pos, MacroReference::None)),
            },
            ReferenceMode::AlphaNumeric => {
                if bytes.get(pos) != Some(&b'.') {
                    return Err(ParseError::at(bytes, pos));
                }
                let start = pos + 1;
                if bytes.get(start) == Some(&b'"') {
                    let (end, value) = quoted(bytes, start)?;
                    return Ok((end, MacroReference::AlphaNumeric { value, quoted: true }));
                }
                let end = run_end(bytes, start, |b| b.is_ascii_alphanumeric() || b == b'_');
                if end == start {
                    return Err(ParseError::at(bytes, start));
                }
                let value = slice(source, start, end).to_owned();
                Ok((end, MacroReference::AlphaNumeric { value, quoted: false }))
            }
        }
    }
}

impl Parse for MacroParser {
    type Value = MacroRef;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, MacroRef> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        if bytes.get(pos) != Some(&b'{') {
            return Err(ParseError::at(bytes, pos));
        }
        let name = self.names.parse(source, pos + 1)?;
        let (ref_end, reference) = self.reference(source, name.end())?;
        let end = closing_brace(bytes, ref_end)?;
        let value = MacroRef {
            name: name.value,
            reference,
        };
        Ok(Parsed::new(source, pos, end, value))
    }
}
