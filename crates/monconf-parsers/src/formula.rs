//! Condition formulas: boolean expressions over uppercase constants, such as
//! `(A or B) and C`.

use crate::errors::{ParseError, ParseErrorKind};
use crate::outcome::{Parse, ParseResult, Parsed, check_start};
use crate::scan::{run_end, slice};
use crate::set::SetParser;

/// A constant referenced by a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormulaConstant {
    /// The constant, e.g. `A`.
    pub value: String,
    /// Offset of the constant in the source.
    pub offset: usize,
}

/// A recognised condition formula.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConditionFormula {
    /// Constants in the order they appear.
    pub constants: Vec<FormulaConstant>,
}

/// Parser for condition formulas.
///
/// `and` and `or` must be preceded by whitespace. The whole remaining input
/// is consumed, so a successful parse is always [`Completion::Done`].
///
/// [`Completion::Done`]: crate::Completion::Done
///
/// # Examples
/// ```
/// use monconf_parsers::{ConditionFormulaParser, Parse};
/// let parser = ConditionFormulaParser::new();
/// let formula = parser.parse_all("(A or B) and C").unwrap().value;
/// assert_eq!(formula.constants.len(), 3);
/// assert!(parser.parse_all("A andB").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ConditionFormulaParser {
    operators: SetParser,
}

impl Default for ConditionFormulaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionFormulaParser {
    /// Create a formula parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operators: SetParser::new(["and", "or"]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AfterOpenBrace,
    AfterLogicalOperator,
    AfterCloseBrace,
    AfterConstant,
}

impl State {
    const fn expects_operand(self) -> bool {
        matches!(self, Self::AfterOpenBrace | Self::AfterLogicalOperator)
    }
}

struct Machine<'p, 's> {
    parser: &'p ConditionFormulaParser,
    source: &'s str,
    pos: usize,
    state: State,
    depth: usize,
    after_space: bool,
    formula: ConditionFormula,
}

impl Machine<'_, '_> {
    fn step(&mut self) -> Result<(), ParseError> {
        let source = self.source;
        let bytes = source.as_bytes();
        let Some(&b) = bytes.get(self.pos) else {
            return Err(ParseError::at(bytes, self.pos));
        };
        if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
            self.pos += 1;
            self.after_space = true;
            return Ok(());
        }
        match (b, self.state.expects_operand()) {
            (b'(', true) => {
                self.depth += 1;
                self.advance(1, State::AfterOpenBrace);
            }
            (b')', false) => {
                if self.depth == 0 {
                    return Err(ParseError::new(ParseErrorKind::UnbalancedBraces, self.pos));
                }
                self.depth -= 1;
                self.advance(1, State::AfterCloseBrace);
            }
            (b'A'..=b'Z', true) => {
                let end = run_end(bytes, self.pos, |c| c.is_ascii_uppercase());
                self.formula.constants.push(FormulaConstant {
                    value: slice(source, self.pos, end).to_owned(),
                    offset: self.pos,
                });
                self.advance(end - self.pos, State::AfterConstant);
            }
            (_, false) if self.after_space => {
                let op = self
                    .parser
                    .operators
                    .parse(source, self.pos)
                    .map_err(|_| ParseError::unexpected(self.pos))?;
                self.advance(op.len(), State::AfterLogicalOperator);
            }
            _ => return Err(ParseError::unexpected(self.pos)),
        }
        Ok(())
    }

    fn advance(&mut self, len: usize, state: State) {
        self.pos += len;
        self.state = state;
        self.after_space = false;
    }

    fn finish(self) -> Result<ConditionFormula, ParseError> {
        if self.state.expects_operand() {
            return Err(ParseError::at(self.source.as_bytes(), self.pos));
        }
        if self.depth > 0 {
            return Err(ParseError::new(ParseErrorKind::UnbalancedBraces, self.pos));
        }
        Ok(self.formula)
    }
}

impl Parse for ConditionFormulaParser {
    type Value = ConditionFormula;

    fn parse<'s>(&self, source: &'s str, pos: usize) -> ParseResult<'s, ConditionFormula> {
        check_start(source, pos);
        if pos == source.len() {
            return Err(ParseError::new(ParseErrorKind::EmptyInput, pos));
        }
        let mut machine = Machine {
            parser: self,
            source,
            pos,
            state: State::AfterOpenBrace,
            depth: 0,
            after_space: false,
            formula: ConditionFormula::default(),
        };
        while machine.pos < source.len() {
            machine.step()?;
        }
        let end = machine.pos;
        let formula = machine.finish()?;
        Ok(Parsed::new(source, pos, end, formula))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A")]
    #[case("A and B")]
    #[case("(A or B) and C")]
    #[case(" ( A )  or\tBC ")]
    #[case("A and (B or (C and D))")]
    #[case("A or(B)")]
    fn accepts_formulas(#[case] input: &str) {
        assert!(ConditionFormulaParser::new().parse_all(input).is_ok(), "{input}");
    }

    #[rstest]
    #[case("", 0, ParseErrorKind::EmptyInput)]
    #[case("A and", 5, ParseErrorKind::UnexpectedEnd)]
    #[case("(A", 2, ParseErrorKind::UnbalancedBraces)]
    #[case("A)", 1, ParseErrorKind::UnbalancedBraces)]
    #[case("A and)", 5, ParseErrorKind::UnexpectedCharacter)]
    #[case("Aand B", 1, ParseErrorKind::UnexpectedCharacter)]
    #[case("A andB", 2, ParseErrorKind::UnexpectedCharacter)]
    #[case("A B", 2, ParseErrorKind::UnexpectedCharacter)]
    #[case("a and B", 0, ParseErrorKind::UnexpectedCharacter)]
    #[case("A xor B", 2, ParseErrorKind::UnexpectedCharacter)]
    #[case("()", 1, ParseErrorKind::UnexpectedCharacter)]
    fn rejects_formulas(
        #[case] input: &str,
        #[case] position: usize,
        #[case] kind: ParseErrorKind,
    ) {
        let Err(err) = ConditionFormulaParser::new().parse_all(input) else {
            panic!("expected {input:?} to be rejected");
        };
        assert_eq!((err.position, err.kind), (position, kind));
    }

    #[test]
    fn records_constant_offsets() {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let formula = ConditionFormulaParser::new()
            .parse_all("A or BC")
            .expect("formula")
            .value;
        let found: Vec<_> = formula
            .constants
            .iter()
            .map(|c| (c.value.as_str(), c.offset))
            .collect();
        assert_eq!(found, [("A", 0), ("BC", 5)]);
    }
}
