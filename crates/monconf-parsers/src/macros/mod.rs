//! Macro references embedded in configuration text.
//!
//! Every parser here expects the opening `{` at the start offset and stops
//! right after the matching `}`, so callers can scan for macros at arbitrary
//! offsets inside a larger string.

mod function_macro;
mod lld;
mod macro_function;
mod reference;
mod user;

pub use function_macro::{FunctionMacro, FunctionMacroParser};
pub use lld::{LldMacro, LldMacroParser};
pub use macro_function::{MacroFunction, MacroFunctionParser};
pub use reference::{MacroParser, MacroRef, MacroReference, ReferenceMode};
pub use user::{MacroContext, UserMacro, UserMacroParser};

use crate::errors::ParseError;
use crate::scan::{is_macro_name_byte, run_end};

/// Scan `{<sigil>NAME` at `pos`; returns the offset past the name.
fn sigil_name(bytes: &[u8], pos: usize, sigil: u8) -> Result<usize, ParseError> {
    if bytes.get(pos) != Some(&b'{') {
        return Err(ParseError::at(bytes, pos));
    }
    if bytes.get(pos + 1) != Some(&sigil) {
        return Err(ParseError::at(bytes, pos + 1));
    }
    let start = pos + 2;
    let end = run_end(bytes, start, is_macro_name_byte);
    if end == start {
        return Err(ParseError::at(bytes, start));
    }
    Ok(end)
}

/// Require `}` at `pos`.
fn closing_brace(bytes: &[u8], pos: usize) -> Result<usize, ParseError> {
    if bytes.get(pos) == Some(&b'}') {
        Ok(pos + 1)
    } else {
        Err(ParseError::at(bytes, pos))
    }
}
