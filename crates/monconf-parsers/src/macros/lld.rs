use super::{closing_brace, sigil_name};
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::slice;

/// A low-level discovery macro, `{#NAME}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LldMacro {
    /// The name without `{#` and `}`.
    pub name: String,
}

/// Parser for `{#NAME}` with `NAME = [A-Z0-9_.]+`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LldMacroParser;

impl Parse for LldMacroParser {
    type Value = LldMacro;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, LldMacro> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let name_end = sigil_name(bytes, pos, b'#')?;
        let end = closing_brace(bytes, name_end)?;
        let name = slice(source, pos + 2, name_end).to_owned();
        Ok(Parsed::new(source, pos, end, LldMacro { name }))
    }
}
