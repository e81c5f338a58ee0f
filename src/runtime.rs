use std::fmt;

use crate::isa::Opcode;
use crate::symbol::Register;

/// The machine can address 16KB of memory.
pub const MEMORY_SIZE: usize = 0x4000;

/// Depth of the hardware call stack.
pub const STACK_DEPTH: usize = 7;

/// Cycle budget used when none is configured.
pub const DEFAULT_CYCLE_LIMIT: u64 = 200_000;

/// Reduce any address into the memory space.
#[inline]
pub fn wrap_addr(addr: usize) -> usize {
    addr % MEMORY_SIZE
}

/// Condition flags, only ever updated by `ADB`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Flags {
    pub carry: bool,
    pub zero: bool,
    pub sign: bool,
    pub parity: bool,
}

impl Default for Flags {
    /// Power-on state: the flags describe a zero accumulator.
    fn default() -> Self {
        Flags {
            carry: false,
            zero: true,
            sign: false,
            parity: true,
        }
    }
}

impl Flags {
    /// Recompute zero, sign and parity from a result byte. Carry is left alone.
    pub fn set_result(&mut self, val: u8) {
        self.zero = val == 0;
        self.sign = val & 0x80 != 0;
        self.parity = val.count_ones() % 2 == 0;
    }
}

impl fmt::Display for Flags {
    /// Carry, zero, sign, parity as four binary digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in [self.carry, self.zero, self.sign, self.parity] {
            write!(f, "{}", u8::from(flag))?;
        }
        Ok(())
    }
}

/// How a call to [`RunState::run`] ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Exit {
    /// `HLT` was executed
    Halted,
    /// The cycle budget ran out first
    CycleLimit,
}

impl Exit {
    pub fn status(self) -> &'static str {
        match self {
            Exit::Halted => "Execution halted normally.",
            Exit::CycleLimit => "Warning: Execution hit max cycle limit.",
        }
    }
}

/// Represents complete machine state during runtime.
#[derive(Clone)]
pub struct RunState {
    /// System memory, 16KB
    mem: Box<[u8; MEMORY_SIZE]>,
    /// Program counter
    pc: u16,
    /// A, B, C, D, E, H, L
    reg: [u8; 7],
    flags: Flags,
    /// Stack pointer. No instruction touches the stack yet.
    sp: u8,
    stack: [u16; STACK_DEPTH],
    halted: bool,
    /// Instructions executed so far
    cycles: u64,
}

impl Default for RunState {
    fn default() -> Self {
        RunState {
            mem: Box::new([0; MEMORY_SIZE]),
            pc: 0,
            reg: [0; 7],
            flags: Flags::default(),
            sp: 0,
            stack: [0; STACK_DEPTH],
            halted: false,
            cycles: 0,
        }
    }
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh machine with `image` copied to memory starting at address 0.
    pub fn from_image(image: &[u8]) -> Self {
        let mut state = Self::new();
        for (addr, byte) in image.iter().enumerate() {
            state.write(addr, *byte);
        }
        state
    }

    /// Run until halted or until `limit` cycles have been spent.
    pub fn run(&mut self, limit: u64) -> Exit {
        for _ in 0..limit {
            if self.halted {
                return Exit::Halted;
            }
            self.step();
        }
        if self.halted {
            Exit::Halted
        } else {
            self.halted = true;
            Exit::CycleLimit
        }
    }

    /// Execute a single instruction.
    pub fn step(&mut self) {
        let byte = self.fetch();
        self.cycles += 1;
        // Bytes that are not opcodes do nothing
        if let Ok(op) = Opcode::try_from(byte) {
            self.execute(op);
        }
    }

    fn execute(&mut self, op: Opcode) {
        match op {
            Opcode::Hlt => self.halted = true,
            Opcode::Lai => self.load_imm(Register::A),
            Opcode::Lbi => self.load_imm(Register::B),
            Opcode::Lci => self.load_imm(Register::C),
            Opcode::Lab => self.copy(Register::B, Register::A),
            Opcode::Lba => self.copy(Register::A, Register::B),
            Opcode::Adb => self.adb(),
            Opcode::Lam => {
                let val = self.read(self.hl());
                *self.reg_mut(Register::A) = val;
            }
            Opcode::Lma => {
                let addr = self.hl();
                self.write(addr, self.reg(Register::A));
            }
            Opcode::Jmp => self.jmp(),
        }
    }

    /// Read the byte at PC and advance past it.
    fn fetch(&mut self) -> u8 {
        let byte = self.read(self.pc as usize);
        self.pc = wrap_addr(self.pc as usize + 1) as u16;
        byte
    }

    fn load_imm(&mut self, reg: Register) {
        let val = self.fetch();
        *self.reg_mut(reg) = val;
    }

    fn copy(&mut self, src: Register, dest: Register) {
        let val = self.reg(src);
        *self.reg_mut(dest) = val;
    }

    fn adb(&mut self) {
        let res = self.reg(Register::A) as u16 + self.reg(Register::B) as u16;
        self.flags.carry = res > 0xFF;
        let val = res as u8;
        *self.reg_mut(Register::A) = val;
        self.flags.set_result(val);
    }

    fn jmp(&mut self) {
        let low = self.fetch();
        let high = self.fetch();
        let target = u16::from_le_bytes([low, high]);
        self.pc = wrap_addr(target as usize) as u16;
    }

    /// Effective address of the HL pair. Only the low six bits of H count.
    pub fn hl(&self) -> usize {
        let high = (self.reg(Register::H) & 0x3F) as usize;
        let low = self.reg(Register::L) as usize;
        (high << 8) | low
    }

    #[inline]
    pub fn reg(&self, reg: Register) -> u8 {
        self.reg[reg as usize]
    }

    #[inline]
    fn reg_mut(&mut self, reg: Register) -> &mut u8 {
        &mut self.reg[reg as usize]
    }

    #[inline]
    pub fn read(&self, addr: usize) -> u8 {
        self.mem[wrap_addr(addr)]
    }

    #[inline]
    pub fn write(&mut self, addr: usize, val: u8) {
        self.mem[wrap_addr(addr)] = val;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl fmt::Debug for RunState {
    // Memory is too large to be worth printing
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunState")
            .field("pc", &self.pc)
            .field("reg", &self.reg)
            .field("flags", &self.flags)
            .field("sp", &self.sp)
            .field("halted", &self.halted)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}
