use std::fmt;

use crate::isa::Opcode;

/// Assembly intermediate representation, a list of instructions in source order
#[derive(Debug, Default)]
pub struct Air {
    ast: Vec<AirStmt>,
}

impl Air {
    pub fn new() -> Self {
        Air { ast: Vec::new() }
    }

    pub fn add_stmt(&mut self, stmt: AirStmt) {
        self.ast.push(stmt)
    }

    pub fn get(&self, idx: usize) -> &AirStmt {
        &self.ast[idx]
    }

    pub fn len(&self) -> usize {
        self.ast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ast.is_empty()
    }

    /// Encode every statement into a contiguous program image.
    pub fn emit(&self) -> Program {
        let mut bytes = Vec::with_capacity(self.ast.iter().map(AirStmt::size).sum());
        for stmt in &self.ast {
            stmt.emit(&mut bytes);
        }
        Program::new(bytes)
    }
}

impl<'a> IntoIterator for &'a Air {
    type Item = &'a AirStmt;
    type IntoIter = std::slice::Iter<'a, AirStmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.ast.iter()
    }
}

/// Single instruction with its already-reduced operand.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AirStmt {
    /// Source line the statement came from
    pub line: usize,
    pub opcode: Opcode,
    pub operand: Operand,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operand {
    None,
    Imm8(u8),
    Addr16(u16),
}

impl AirStmt {
    /// Size in bytes once emitted.
    pub fn size(&self) -> usize {
        1 + self.opcode.arity().width()
    }

    pub fn emit(&self, out: &mut Vec<u8>) {
        out.push(self.opcode.into());
        match self.operand {
            Operand::None => (),
            Operand::Imm8(val) => out.push(val),
            // Low byte first
            Operand::Addr16(addr) => out.extend_from_slice(&addr.to_le_bytes()),
        }
    }
}

/// Assembled byte image, loaded verbatim at address 0.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new(bytes: Vec<u8>) -> Self {
        Program { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Status line reported after a successful assembly.
    pub fn status(&self) -> String {
        format!("Assembled successfully. Program size: {} bytes.", self.len())
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Program::new(bytes)
    }
}

impl fmt::Display for AirStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand {
            Operand::None => write!(f, "{}", self.opcode),
            Operand::Imm8(val) => write!(f, "{} {}", self.opcode, val),
            Operand::Addr16(addr) => write!(f, "{} {}", self.opcode, addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(opcode: Opcode, operand: Operand) -> AirStmt {
        AirStmt {
            line: 1,
            opcode,
            operand,
        }
    }

    #[test]
    fn emit_widths() {
        let mut air = Air::new();
        air.add_stmt(stmt(Opcode::Lai, Operand::Imm8(200)));
        air.add_stmt(stmt(Opcode::Adb, Operand::None));
        air.add_stmt(stmt(Opcode::Jmp, Operand::Addr16(0x1234)));
        let program = air.emit();
        assert_eq!(program.bytes(), &[0x06, 200, 0x80, 0x44, 0x34, 0x12]);
        assert_eq!(
            program.len(),
            air.into_iter().map(AirStmt::size).sum::<usize>()
        );
    }

    #[test]
    fn status_reports_size() {
        let program = Program::from(vec![0x01]);
        assert_eq!(
            program.status(),
            "Assembled successfully. Program size: 1 bytes."
        );
    }

    #[test]
    fn display_round_trips_source_form() {
        assert_eq!(stmt(Opcode::Jmp, Operand::Addr16(3)).to_string(), "JMP 3");
        assert_eq!(stmt(Opcode::Hlt, Operand::None).to_string(), "HLT");
    }
}
