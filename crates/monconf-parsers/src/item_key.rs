//! Item keys: `key_id[param,"quoted param",[array,param]]`.

use crate::errors::{ParseError, ParseErrorKind};
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{quoted, run_end, skip_spaces, slice};

/// How a key parameter was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyParameterKind {
    /// Bare text up to the next `,` or `]`.
    Unquoted,
    /// A double-quoted string.
    Quoted,
    /// A nested `[...]` list, kept verbatim.
    Array,
}

/// One parameter of an item key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyParameter {
    /// Unquoted value; for arrays, the bracketed text as written.
    pub value: String,
    /// How the parameter was written.
    pub kind: KeyParameterKind,
}

/// A recognised item key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemKey {
    /// The part before `[`.
    pub key_id: String,
    /// Parameters in order; empty when the key has no brackets.
    pub parameters: Vec<KeyParameter>,
}

impl ItemKey {
    /// Parse `text` as one complete item key.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when `text` is not exactly one key.
    ///
    /// # Examples
    /// ```
    /// use monconf_parsers::{ItemKey, ParseErrorKind};
    /// let key = ItemKey::parse("key[a, b, c]").unwrap();
    /// assert_eq!(key.key_id, "key");
    /// assert_eq!(key.values(), ["a", "b", "c"]);
    /// assert_eq!(ItemKey::parse("key[a").unwrap_err().kind, ParseErrorKind::UnexpectedEnd);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        ItemKeyParser.parse_all(text).map(|parsed| parsed.value)
    }

    /// Parameter values in order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.value.as_str()).collect()
    }
}

/// Parser for item keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemKeyParser;

impl Parse for ItemKeyParser {
    type Value = ItemKey;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, ItemKey> {
        check_start(source, pos);
        let bytes = source.as_bytes();
        let id_end = key_id_end(bytes, pos);
        if id_end == pos {
            return Err(ParseError::at(bytes, pos));
        }
        let key_id = slice(source, pos, id_end).to_owned();
        let (end, parameters) = if bytes.get(id_end) == Some(&b'[') {
            parse_parameters(bytes, id_end)?
        } else {
            (id_end, Vec::new())
        };
        Ok(Parsed::new(source, pos, end, ItemKey { key_id, parameters }))
    }
}

pub(crate) fn key_id_end(bytes: &[u8], pos: usize) -> usize {
    run_end(bytes, pos, |b| {
        b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-')
    })
}

/// Scan `[param,...]` whose `[` sits at `open`; returns the offset past `]`.
pub(crate) fn parse_parameters(
    bytes: &[u8],
    open: usize,
) -> Result<(usize, Vec<KeyParameter>), ParseError> {
    let mut params = Vec::new();
    let mut i = open + 1;
    loop {
        let (end, param) = parameter(bytes, skip_spaces(bytes, i), true)?;
        params.push(param);
        i = end;
        match bytes.get(i) {
            Some(b',') => i += 1,
            Some(b']') => return Ok((i + 1, params)),
            _ => return Err(ParseError::at(bytes, i)),
        }
    }
}

/// Scan one parameter at `i`, leaving the cursor on its `,` or `]`.
fn parameter(
    bytes: &[u8],
    i: usize,
    allow_array: bool,
) -> Result<(usize, KeyParameter), ParseError> {
    match bytes.get(i) {
        Some(b'"') => {
            let (end, value) = quoted(bytes, i)?;
            let param = KeyParameter {
                value,
                kind: KeyParameterKind::Quoted,
            };
            Ok((skip_spaces(bytes, end), param))
        }
        Some(b'[') if allow_array => {
            let mut j = i + 1;
            loop {
                let (end, _) = parameter(bytes, skip_spaces(bytes, j), false)?;
                match bytes.get(end) {
                    Some(b',') => j = end + 1,
                    Some(b']') => {
                        let close = end + 1;
                        let param = KeyParameter {
                            value: lossy(bytes, i, close),
                            kind: KeyParameterKind::Array,
                        };
                        return Ok((skip_spaces(bytes, close), param));
                    }
                    _ => return Err(ParseError::at(bytes, end)),
                }
            }
        }
        Some(b'[') => Err(ParseError::new(ParseErrorKind::UnexpectedCharacter, i)),
        _ => {
            let end = run_end(bytes, i, |b| b != b',' && b != b']');
            let param = KeyParameter {
                value: lossy(bytes, i, end),
                kind: KeyParameterKind::Unquoted,
            };
            Ok((end, param))
        }
    }
}

fn lossy(bytes: &[u8], start: usize, end: usize) -> String {
    String::from_utf8_lossy(bytes.get(start..end).unwrap_or_default()).into_owned()
}
