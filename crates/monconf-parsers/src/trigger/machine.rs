use super::{Token, TokenKind, TriggerExpressionParser};
use crate::errors::{ParseError, ParseErrorKind};
use crate::outcome::Parse;
use crate::scan::slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AfterOpenBrace,
    AfterBinaryOperator,
    AfterLogicalOperator,
    AfterNotOperator,
    AfterMinusOperator,
    AfterCloseBrace,
    AfterConstant,
}

impl State {
    const fn expects_operand(self) -> bool {
        !matches!(self, Self::AfterCloseBrace | Self::AfterConstant)
    }
}

struct Machine<'p, 's> {
    parser: &'p TriggerExpressionParser,
    source: &'s str,
    pos: usize,
    state: State,
    depth: usize,
    after_space: bool,
    tokens: Vec<Token>,
}

/// Scan from `pos` to the end of `source`; returns the end offset and tokens.
pub(super) fn run(
    parser: &TriggerExpressionParser,
    source: &str,
    pos: usize,
) -> Result<(usize, Vec<Token>), ParseError> {
    if pos == source.len() {
        return Err(ParseError::new(ParseErrorKind::EmptyInput, pos));
    }
    let mut machine = Machine {
        parser,
        source,
        pos,
        state: State::AfterOpenBrace,
        depth: 0,
        after_space: false,
        tokens: Vec::new(),
    };
    while machine.pos < source.len() {
        machine.step()?;
    }
    machine.finish()
}

impl Machine<'_, '_> {
    fn step(&mut self) -> Result<(), ParseError> {
        let bytes = self.source.as_bytes();
        let Some(&b) = bytes.get(self.pos) else {
            return Err(ParseError::at(bytes, self.pos));
        };
        if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
            self.pos += 1;
            self.after_space = true;
            return Ok(());
        }
        if self.state.expects_operand() {
            self.step_operand(b)
        } else {
            self.step_operator(b)
        }
    }

    fn step_operand(&mut self, b: u8) -> Result<(), ParseError> {
        let source = self.source;
        let parser = self.parser;
        match b {
            b'(' => {
                self.depth += 1;
                self.push(TokenKind::OpenBrace, 1, State::AfterOpenBrace);
            }
            b'-' if self.state != State::AfterMinusOperator => {
                self.push(TokenKind::Operator, 1, State::AfterMinusOperator);
            }
            b'{' => {
                let (len, kind) = parser
                    .macro_constant(source, self.pos)
                    .ok_or_else(|| ParseError::unexpected(self.pos))?;
                self.push(kind, len, State::AfterConstant);
            }
            b'0'..=b'9' => {
                let number = parser
                    .number
                    .parse(source, self.pos)
                    .map_err(|_| ParseError::unexpected(self.pos))?;
                let kind = TokenKind::Number {
                    suffix: number.value.suffix,
                };
                self.push(kind, number.len(), State::AfterConstant);
            }
            b'n' if self.not_allowed() => {
                let op = parser
                    .not
                    .parse(source, self.pos)
                    .map_err(|_| ParseError::unexpected(self.pos))?;
                self.push(TokenKind::Operator, op.len(), State::AfterNotOperator);
            }
            _ => return Err(ParseError::unexpected(self.pos)),
        }
        Ok(())
    }

    fn step_operator(&mut self, b: u8) -> Result<(), ParseError> {
        let source = self.source;
        let parser = self.parser;
        if b == b')' {
            if self.depth == 0 {
                return Err(ParseError::new(ParseErrorKind::UnbalancedBraces, self.pos));
            }
            self.depth -= 1;
            self.push(TokenKind::CloseBrace, 1, State::AfterCloseBrace);
            return Ok(());
        }
        if let Ok(op) = parser.binary.parse(source, self.pos) {
            self.push(TokenKind::Operator, op.len(), State::AfterBinaryOperator);
            return Ok(());
        }
        if self.after_space {
            if let Ok(op) = parser.logical.parse(source, self.pos) {
                self.push(TokenKind::Operator, op.len(), State::AfterLogicalOperator);
                return Ok(());
            }
        }
        Err(ParseError::unexpected(self.pos))
    }

    /// `not` may open the expression, follow `(`, or follow whitespace.
    fn not_allowed(&self) -> bool {
        self.state != State::AfterMinusOperator
            && (self.after_space || self.state == State::AfterOpenBrace)
    }

    fn push(&mut self, kind: TokenKind, len: usize, state: State) {
        self.tokens.push(Token {
            kind,
            offset: self.pos,
            length: len,
            text: slice(self.source, self.pos, self.pos + len).to_owned(),
        });
        self.pos += len;
        self.state = state;
        self.after_space = false;
    }

    fn finish(self) -> Result<(usize, Vec<Token>), ParseError> {
        if self.state.expects_operand() {
            return Err(ParseError::at(self.source.as_bytes(), self.pos));
        }
        if self.depth > 0 {
            return Err(ParseError::new(ParseErrorKind::UnbalancedBraces, self.pos));
        }
        Ok((self.pos, self.tokens))
    }
}
