//! Trigger expressions: boolean and arithmetic conditions over function
//! macros, numbers and macros.
//!
//! ```
//! use monconf_parsers::{Parse, TriggerExpressionParser};
//! let parser = TriggerExpressionParser::default();
//! let expr = parser
//!     .parse_all("{srv:agent.ping.last(0)}=1 and {TRIGGER.VALUE}={$TRIGGER.VALUE}")
//!     .unwrap()
//!     .value;
//! assert_eq!(expr.function_macros().count(), 1);
//! assert_eq!(expr.operators().collect::<Vec<_>>(), ["=", "and", "="]);
//! ```

mod machine;

use crate::errors::ParseError;
use crate::macros::{
    FunctionMacro, FunctionMacroParser, LldMacro, LldMacroParser, MacroParser, MacroRef,
    ReferenceMode, UserMacro, UserMacroParser,
};
use crate::number::NumberParser;
use crate::options::ParserOptions;
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::set::SetParser;
use crate::units::{Suffix, Suffixes};

/// Macro names accepted as constants unless replaced.
pub const DEFAULT_MACROS: &[&str] = &["{TRIGGER.VALUE}"];

/// What a token stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum TokenKind {
    /// `(`.
    OpenBrace,
    /// `)`.
    CloseBrace,
    /// A binary, logical or unary operator; the token text names it.
    Operator,
    /// A numeric literal.
    Number {
        /// Its unit suffix, if any.
        suffix: Option<Suffix>,
    },
    /// `{host:key.func(params)}`.
    FunctionMacro(FunctionMacro),
    /// A built-in macro such as `{TRIGGER.VALUE}`.
    Macro(MacroRef),
    /// `{$NAME}`.
    UserMacro(UserMacro),
    /// `{#NAME}`.
    LldMacro(LldMacro),
}

/// One lexical element of a trigger expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// What the token stands for.
    pub kind: TokenKind,
    /// Offset of the first byte in the source.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
    /// The token text.
    pub text: String,
}

/// A validated trigger expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriggerExpression {
    /// Tokens in source order, whitespace excluded.
    pub tokens: Vec<Token>,
}

impl TriggerExpression {
    /// Function macros in source order.
    pub fn function_macros(&self) -> impl Iterator<Item = &FunctionMacro> {
        self.tokens.iter().filter_map(|t| match &t.kind {
            TokenKind::FunctionMacro(m) => Some(m),
            _ => None,
        })
    }

    /// Built-in macros in source order.
    pub fn macros(&self) -> impl Iterator<Item = &MacroRef> {
        self.tokens.iter().filter_map(|t| match &t.kind {
            TokenKind::Macro(m) => Some(m),
            _ => None,
        })
    }

    /// User macros in source order.
    pub fn user_macros(&self) -> impl Iterator<Item = &UserMacro> {
        self.tokens.iter().filter_map(|t| match &t.kind {
            TokenKind::UserMacro(m) => Some(m),
            _ => None,
        })
    }

    /// LLD macros in source order.
    pub fn lld_macros(&self) -> impl Iterator<Item = &LldMacro> {
        self.tokens.iter().filter_map(|t| match &t.kind {
            TokenKind::LldMacro(m) => Some(m),
            _ => None,
        })
    }

    /// Numeric literals as written.
    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Number { .. }))
            .map(|t| t.text.as_str())
    }

    /// Operators as written, unary ones included.
    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
    }
}

/// Parser for trigger expressions.
///
/// The parser consumes everything from the start offset; trailing text is an
/// error rather than a continuation.
#[derive(Debug, Clone)]
pub struct TriggerExpressionParser {
    options: ParserOptions,
    binary: SetParser,
    logical: SetParser,
    not: SetParser,
    number: NumberParser,
    macros: MacroParser,
}

impl Default for TriggerExpressionParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl TriggerExpressionParser {
    /// Create a parser accepting the macro kinds enabled in `options`.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            binary: SetParser::new(["<", ">", "<=", ">=", "+", "-", "/", "*", "=", "<>"]),
            logical: SetParser::new(["and", "or"]),
            not: SetParser::new(["not"]),
            number: NumberParser::new(Suffixes::TRIGGER),
            macros: MacroParser::new(DEFAULT_MACROS.iter().copied(), ReferenceMode::None),
        }
    }

    /// Replace the built-in macro names accepted as constants.
    #[must_use]
    pub fn with_macros<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.macros = MacroParser::new(names, ReferenceMode::None);
        self
    }

    /// Try every macro kind at `pos`, in a fixed order.
    fn macro_constant(&self, source: &str, pos: usize) -> Option<(usize, TokenKind)> {
        if let Ok(m) = FunctionMacroParser.parse(source, pos) {
            return Some((m.len(), TokenKind::FunctionMacro(m.value)));
        }
        if let Ok(m) = self.macros.parse(source, pos) {
            return Some((m.len(), TokenKind::Macro(m.value)));
        }
        if self.options.user_macros {
            if let Ok(m) = UserMacroParser.parse(source, pos) {
                return Some((m.len(), TokenKind::UserMacro(m.value)));
            }
        }
        if self.options.lld_macros {
            if let Ok(m) = LldMacroParser.parse(source, pos) {
                return Some((m.len(), TokenKind::LldMacro(m.value)));
            }
        }
        None
    }
}

impl Parse for TriggerExpressionParser {
    type Value = TriggerExpression;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, TriggerExpression> {
        check_start(source, pos);
        let (end, tokens) = machine::run(self, source, pos)?;
        Ok(Parsed::new(source, pos, end, TriggerExpression { tokens }))
    }
}

/// Validate `source` as a complete trigger expression.
///
/// # Errors
///
/// Returns the first [`ParseError`] found.
pub fn validate_trigger(
    source: &str,
    options: ParserOptions,
) -> Result<TriggerExpression, ParseError> {
    TriggerExpressionParser::new(options)
        .parse_all(source)
        .map(|parsed| parsed.value)
}
