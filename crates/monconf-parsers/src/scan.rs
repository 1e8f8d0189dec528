//! Byte-level scanning helpers shared by the parsers.

use crate::errors::ParseError;

/// Return the offset of the first non-digit byte at or after `pos`.
pub(crate) fn digits_end(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

/// Skip ASCII spaces starting at `pos`.
pub(crate) fn skip_spaces(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    while bytes.get(end) == Some(&b' ') {
        end += 1;
    }
    end
}

/// Bytes allowed in user and LLD macro names.
pub(crate) const fn is_macro_name_byte(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'.')
}

/// Return the offset of the first byte at or after `pos` rejected by `accept`.
pub(crate) fn run_end(bytes: &[u8], pos: usize, accept: impl Fn(u8) -> bool) -> usize {
    let mut end = pos;
    while bytes.get(end).is_some_and(|&b| accept(b)) {
        end += 1;
    }
    end
}

/// Decimal value of the digit run `bytes[start..end]`, saturating on overflow.
pub(crate) fn digits_value(bytes: &[u8], start: usize, end: usize) -> u64 {
    bytes
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .fold(0_u64, |acc, &b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

/// Borrow `source[start..end]`, or an empty string for an invalid range.
pub(crate) fn slice(source: &str, start: usize, end: usize) -> &str {
    source.get(start..end).unwrap_or_default()
}

/// Scan a double-quoted string whose opening quote sits at `pos`.
///
/// `\"` and `\\` are unescaped; any other backslash is kept verbatim. Returns
/// the offset just past the closing quote and the unescaped content.
pub(crate) fn quoted(bytes: &[u8], pos: usize) -> Result<(usize, String), ParseError> {
    if bytes.get(pos) != Some(&b'"') {
        return Err(ParseError::at(bytes, pos));
    }
    let mut value = Vec::new();
    let mut i = pos + 1;
    loop {
        match bytes.get(i) {
            None => return Err(ParseError::at(bytes, i)),
            Some(b'"') => {
                return Ok((i + 1, String::from_utf8_lossy(&value).into_owned()));
            }
            Some(b'\\') => match bytes.get(i + 1) {
                Some(&next @ (b'"' | b'\\')) => {
                    value.push(next);
                    i += 2;
                }
                _ => {
                    value.push(b'\\');
                    i += 1;
                }
            },
            Some(&b) => {
                value.push(b);
                i += 1;
            }
        }
    }
}
