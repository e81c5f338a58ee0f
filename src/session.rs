//! Text-in, text-out front end used by hosts that pass a whole command as a
//! single string, such as a chat bot.
//!
//! The first word picks a mode:
//!
//! - `new <name> <code...>` / `cont <name> <code...>`: reply with a tag command
//!   the user can run to save the program under `name`
//! - `run <code...>`: assemble and run the code after the keyword
//! - anything else: assemble and run the whole text

use crate::error::{AsmError, SessionError};
use crate::output::format_report;
use crate::parser::assemble;
use crate::runtime::RunState;

/// Assemble, run and report on `src` on a freshly zeroed machine.
///
/// A program that assembles to zero bytes is not executed; only the assembly
/// status is returned.
pub fn evaluate(src: &str, cycle_limit: u64) -> Result<String, AsmError> {
    let program = assemble(src)?;
    if program.is_empty() {
        return Ok(program.status());
    }
    let mut state = RunState::from_image(program.bytes());
    let exit = state.run(cycle_limit);
    let status = format!("{}\n{}", program.status(), exit.status());
    Ok(format_report(&status, &state))
}

/// Handle one host command. Never fails: errors are rendered into the reply.
pub fn respond(args: Option<&str>, cycle_limit: u64) -> String {
    match dispatch(args, cycle_limit) {
        Ok(reply) => reply,
        Err(e) => format!("Error: {e}"),
    }
}

fn dispatch(args: Option<&str>, cycle_limit: u64) -> Result<String, SessionError> {
    let raw = args.unwrap_or_default();
    let text = raw.trim();
    if text.is_empty() {
        return Err(SessionError::MissingInput);
    }

    let (command, rest) = split_word(text);
    match command.to_ascii_lowercase().as_str() {
        "new" | "cont" => Ok(save_command(rest)),
        "run" => {
            if rest.is_empty() {
                return Err(SessionError::MissingInput);
            }
            Ok(evaluate(rest, cycle_limit)?)
        }
        _ => Ok(evaluate(raw, cycle_limit)?),
    }
}

/// Build the tag command that stores a program for later runs.
fn save_command(args: &str) -> String {
    let (name, code) = split_word(args);
    if name.is_empty() || code.is_empty() {
        return "Error: Manager mode requires a name and code. \
                Usage: .nsb8 new <program_name> <your_code...>"
            .to_string();
    }
    format!(
        "Copy the following command and run it to save your program:\n\
         ```\n.t add {name} {{text:\n{code}\n}}\n```"
    )
}

/// Split off the first whitespace-delimited word. The remainder keeps its
/// line breaks so it can still be assembled line by line.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::DEFAULT_CYCLE_LIMIT;

    fn reply(args: &str) -> String {
        respond(Some(args), DEFAULT_CYCLE_LIMIT)
    }

    #[test]
    fn missing_input() {
        assert_eq!(
            respond(None, DEFAULT_CYCLE_LIMIT),
            "Error: No assembly code provided."
        );
        assert_eq!(reply("  \n "), "Error: No assembly code provided.");
        assert_eq!(reply("run"), "Error: No assembly code provided.");
    }

    #[test]
    fn direct_run() {
        let out = reply("LAI 200\nLBI 55\nADB\nHLT");
        assert!(out.starts_with(
            "Assembled successfully. Program size: 6 bytes.\nExecution halted normally.\n---\n"
        ));
        assert!(out.ends_with("Final A:255 B:55 C:0 | Flags(CZSP):0011"));
    }

    #[test]
    fn run_keyword_is_dropped() {
        let keyword = reply("run LAI 250\nLBI 10\nADB\nHLT");
        let direct = reply("LAI 250\nLBI 10\nADB\nHLT");
        assert_eq!(keyword, direct);
        assert!(direct.ends_with("Final A:4 B:10 C:0 | Flags(CZSP):1000"));
    }

    #[test]
    fn cycle_limit_warning() {
        let out = respond(Some("JMP 0"), 500);
        assert!(out.contains("Warning: Execution hit max cycle limit."));
        assert!(!out.contains("halted normally"));
    }

    #[test]
    fn assembly_errors_short_circuit() {
        assert_eq!(reply("FOO 1"), "Error: line 1: unknown mnemonic 'FOO'");
        assert_eq!(
            reply("HLT\nLAI"),
            "Error: line 2: 'LAI' expects 1 operand(s), found 0"
        );
    }

    #[test]
    fn leading_blank_lines_keep_line_numbers() {
        let src = "\n\n  FOO 1";
        let line = assemble(src).unwrap_err().line();
        assert_eq!(line, 3);
        assert_eq!(reply(src), "Error: line 3: unknown mnemonic 'FOO'");
        let out = reply("\n; header\nLAI 1\nHLT");
        assert!(out.ends_with("Final A:1 B:0 C:0 | Flags(CZSP):0101"));
    }

    #[test]
    fn empty_program_is_not_run() {
        assert_eq!(
            reply("; only a comment"),
            "Assembled successfully. Program size: 0 bytes."
        );
    }

    #[test]
    fn manager_mode() {
        let out = reply("new adder LAI 1\nLBI 2\nADB\nHLT");
        assert_eq!(
            out,
            "Copy the following command and run it to save your program:\n\
             ```\n.t add adder {text:\nLAI 1\nLBI 2\nADB\nHLT\n}\n```"
        );
        assert!(reply("CONT adder HLT").contains(".t add adder {text:\nHLT\n}"));
    }

    #[test]
    fn manager_mode_needs_name_and_code() {
        assert!(reply("new").starts_with("Error: Manager mode requires a name and code."));
        assert!(reply("new adder").starts_with("Error: Manager mode requires a name and code."));
    }

    #[test]
    fn output_is_repeatable() {
        let src = "LAI 7\nLMA\nLBI 9\nADB\nHLT";
        assert_eq!(reply(src), reply(src));
    }

    #[test]
    fn split_word_keeps_lines() {
        assert_eq!(split_word("run LAI 1\nHLT"), ("run", "LAI 1\nHLT"));
        assert_eq!(split_word("HLT"), ("HLT", ""));
        assert_eq!(split_word("  new\n x y "), ("new", "x y"));
    }
}
