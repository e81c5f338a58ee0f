use std::cell::RefCell;
use std::path::Path;

use colored::Colorize;

use crate::runtime::RunState;
use crate::symbol::Register;

/// First address of the memory-mapped screen.
pub const SCREEN_START: usize = 0xEEE;
/// Last address of the screen, inclusive.
pub const SCREEN_END: usize = 0xFFF;
/// Drawn in place of any byte that is not printable ASCII.
pub const PLACEHOLDER: char = '·';

/// Separates the sections of a report.
const RULE: &str = "---";

/// Render the screen window of memory as text, one glyph per byte.
pub fn render_screen(state: &RunState) -> String {
    (SCREEN_START..=SCREEN_END)
        .map(|addr| glyph(state.read(addr)))
        .collect()
}

fn glyph(byte: u8) -> char {
    match byte {
        0x20..=0x7E => byte as char,
        _ => PLACEHOLDER,
    }
}

/// Final report for a finished run: status lines, screen, then register and flag values.
pub fn format_report(status: &str, state: &RunState) -> String {
    let regs = [Register::A, Register::B, Register::C]
        .iter()
        .map(|&r| format!("{}:{}", r, state.reg(r)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{status}\n{RULE}\nScreen (0x{SCREEN_START:03X}-{SCREEN_END:03X}):\n{}\n{RULE}\nFinal {regs} | Flags(CZSP):{}",
        render_screen(state),
        state.flags(),
    )
}

thread_local! {
    static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
}

/// Silence progress messages, leaving only program output.
pub fn set_minimal(new_value: bool) -> bool {
    IS_MINIMAL.with(|value| value.replace(new_value))
}

pub fn is_minimal() -> bool {
    IS_MINIMAL.with(|value| *value.borrow())
}

#[derive(Clone, Copy, Debug)]
pub enum MsgColor {
    Green,
    Red,
}

pub fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

/// Right-aligned progress line, like `   Assembling target foo.asm`.
pub fn message(color: MsgColor, left: &str, right: &str) {
    if is_minimal() {
        return;
    }
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Red => left.red(),
    };
    eprintln!("{left:>12} {right}");
}
