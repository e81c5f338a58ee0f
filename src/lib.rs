// Parsing
mod lexer;
mod parser;
pub use parser::{assemble, AsmParser};
mod air;
pub use air::{Air, AirStmt, Operand, Program};
pub mod isa;

// Running
mod runtime;
pub use runtime::{wrap_addr, Exit, Flags, RunState, DEFAULT_CYCLE_LIMIT, MEMORY_SIZE};
pub mod output;
pub use output::format_report;
pub mod session;

mod error;
pub use error::{AsmError, SessionError};
mod symbol;
pub use symbol::Register;

pub mod env;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 4;
