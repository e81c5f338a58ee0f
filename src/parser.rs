use std::vec::IntoIter;

use crate::{
    air::{Air, AirStmt, Operand, Program},
    error::AsmError,
    isa::{Arity, Opcode},
    lexer::{self, Line, Token},
};

/// Assemble source text into a program image.
pub fn assemble(src: &str) -> Result<Program, AsmError> {
    Ok(AsmParser::new(src).parse()?.emit())
}

/// Transforms lexed source lines into AIR
pub struct AsmParser<'a> {
    /// Non-blank source lines, in order
    lines: IntoIter<Line<'a>>,
    /// Assembly intermediate representation
    air: Air,
}

impl<'a> AsmParser<'a> {
    pub fn new(src: &'a str) -> Self {
        let lines: Vec<Line<'a>> = lexer::lines(src).collect();
        AsmParser {
            lines: lines.into_iter(),
            air: Air::new(),
        }
    }

    /// Parse every line, stopping at the first error.
    pub fn parse(mut self) -> Result<Air, AsmError> {
        for line in self.lines.by_ref() {
            let stmt = Self::parse_line(&line)?;
            self.air.add_stmt(stmt);
        }
        Ok(self.air)
    }

    fn parse_line(line: &Line) -> Result<AirStmt, AsmError> {
        // Lexer never yields empty lines
        let (head, operands) = match line.tokens.split_first() {
            Some(split) => split,
            None => unreachable!("blank lines are skipped by the lexer"),
        };
        let mnemonic = head.text.to_ascii_uppercase();
        let desc = Opcode::lookup(&mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
            line: line.number,
            mnemonic: mnemonic.clone(),
            span: head.span.into(),
        })?;

        let expected = desc.arity.operands();
        if operands.len() != expected {
            return Err(AsmError::OperandCount {
                line: line.number,
                mnemonic,
                expected,
                found: operands.len(),
                span: line.span().into(),
            });
        }

        let operand = match desc.arity {
            Arity::None => Operand::None,
            Arity::Imm8 => {
                let val = Self::integer(line.number, &operands[0])?;
                Operand::Imm8(val as u8)
            }
            Arity::Addr16 => {
                let addr = Self::integer(line.number, &operands[0])?;
                Operand::Addr16(addr)
            }
        };

        Ok(AirStmt {
            line: line.number,
            opcode: desc.opcode,
            operand,
        })
    }

    /// Parse a decimal literal of any length, reduced modulo 2^16 with floor semantics.
    fn integer(line: usize, tok: &Token) -> Result<u16, AsmError> {
        let invalid = || AsmError::InvalidOperand {
            line,
            operand: tok.text.to_string(),
            span: tok.span.into(),
        };
        let (negative, digits) = match tok.text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, tok.text.strip_prefix('+').unwrap_or(tok.text)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // Only the low 16 bits ever reach the image
        let magnitude = digits.bytes().fold(0u16, |acc, b| {
            acc.wrapping_mul(10).wrapping_add(u16::from(b - b'0'))
        });
        Ok(if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        })
    }
}
