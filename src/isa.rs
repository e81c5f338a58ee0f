//! Instruction set shared by the assembler and the runtime.
//!
//! Both sides derive their view of the encoding from [`INSTRUCTIONS`]: the
//! parser looks descriptors up by mnemonic, the runtime decodes opcode bytes
//! back into [`Opcode`] through the same table.

use std::fmt;

/// Operand shape following an opcode byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    /// No operand
    None,
    /// Single immediate byte
    Imm8,
    /// Little-endian 16-bit address
    Addr16,
}

impl Arity {
    /// Number of source tokens expected after the mnemonic.
    pub fn operands(self) -> usize {
        match self {
            Arity::None => 0,
            Arity::Imm8 | Arity::Addr16 => 1,
        }
    }

    /// Number of bytes emitted after the opcode byte.
    pub fn width(self) -> usize {
        match self {
            Arity::None => 0,
            Arity::Imm8 => 1,
            Arity::Addr16 => 2,
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    /// Halt execution
    Hlt = 0x01,
    /// Load immediate into A
    Lai = 0x06,
    /// Load immediate into B
    Lbi = 0x0E,
    /// Load immediate into C
    Lci = 0x16,
    /// Copy B into A
    Lab = 0xC1,
    /// Copy A into B
    Lba = 0x87,
    /// Add B to A, setting all flags
    Adb = 0x80,
    /// Load A from memory at HL
    Lam = 0xC6,
    /// Store A to memory at HL
    Lma = 0x77,
    /// Absolute jump
    Jmp = 0x44,
}

/// Static description of a single instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Descriptor {
    pub mnemonic: &'static str,
    pub opcode: Opcode,
    pub arity: Arity,
}

const fn desc(mnemonic: &'static str, opcode: Opcode, arity: Arity) -> Descriptor {
    Descriptor {
        mnemonic,
        opcode,
        arity,
    }
}

pub const INSTRUCTIONS: [Descriptor; 10] = [
    desc("HLT", Opcode::Hlt, Arity::None),
    desc("LAI", Opcode::Lai, Arity::Imm8),
    desc("LBI", Opcode::Lbi, Arity::Imm8),
    desc("LCI", Opcode::Lci, Arity::Imm8),
    desc("LAB", Opcode::Lab, Arity::None),
    desc("LBA", Opcode::Lba, Arity::None),
    desc("ADB", Opcode::Adb, Arity::None),
    desc("LAM", Opcode::Lam, Arity::None),
    desc("LMA", Opcode::Lma, Arity::None),
    desc("JMP", Opcode::Jmp, Arity::Addr16),
];

impl Opcode {
    /// Look up an instruction by its mnemonic. Expects an uppercased name.
    pub fn lookup(mnemonic: &str) -> Option<&'static Descriptor> {
        INSTRUCTIONS.iter().find(|d| d.mnemonic == mnemonic)
    }

    pub fn descriptor(self) -> &'static Descriptor {
        INSTRUCTIONS
            .iter()
            .find(|d| d.opcode == self)
            .unwrap_or_else(|| unreachable!("every opcode has a descriptor"))
    }

    pub fn mnemonic(self) -> &'static str {
        self.descriptor().mnemonic
    }

    pub fn arity(self) -> Arity {
        self.descriptor().arity
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        INSTRUCTIONS
            .iter()
            .find(|d| d.opcode as u8 == byte)
            .map(|d| d.opcode)
            .ok_or(byte)
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
