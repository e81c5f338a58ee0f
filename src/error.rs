use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Failure while turning source text into a program image. Assembly stops at
/// the first one of these.
#[derive(Clone, PartialEq, Eq, Debug, Error, Diagnostic)]
pub enum AsmError {
    #[error("line {line}: unknown mnemonic '{mnemonic}'")]
    #[diagnostic(
        code(asm::unknown_mnemonic),
        help("available mnemonics: HLT LAI LBI LCI LAB LBA ADB LAM LMA JMP")
    )]
    UnknownMnemonic {
        line: usize,
        mnemonic: String,
        #[label("unknown mnemonic")]
        span: SourceSpan,
    },

    #[error("line {line}: '{mnemonic}' expects {expected} operand(s), found {found}")]
    #[diagnostic(
        code(asm::operand_count),
        help("check the operands for this instruction")
    )]
    OperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
        #[label("incorrect operands")]
        span: SourceSpan,
    },

    #[error("line {line}: invalid integer operand '{operand}'")]
    #[diagnostic(
        code(asm::bad_lit),
        help("operands are decimal integers, like 42 or -1")
    )]
    InvalidOperand {
        line: usize,
        operand: String,
        #[label("not an integer")]
        span: SourceSpan,
    },
}

impl AsmError {
    /// 1-based source line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownMnemonic { line, .. }
            | Self::OperandCount { line, .. }
            | Self::InvalidOperand { line, .. } => *line,
        }
    }
}

/// Failure surfaced to the host before any output is produced.
#[derive(Clone, PartialEq, Eq, Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("No assembly code provided.")]
    #[diagnostic(code(session::missing_input))]
    MissingInput,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Assembly(#[from] AsmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_line_and_cause() {
        let err = AsmError::UnknownMnemonic {
            line: 3,
            mnemonic: "FOO".into(),
            span: (0, 3).into(),
        };
        assert_eq!(err.to_string(), "line 3: unknown mnemonic 'FOO'");
        assert_eq!(err.line(), 3);

        let err = AsmError::OperandCount {
            line: 1,
            mnemonic: "LAI".into(),
            expected: 1,
            found: 0,
            span: (0, 3).into(),
        };
        assert_eq!(
            err.to_string(),
            "line 1: 'LAI' expects 1 operand(s), found 0"
        );
    }

    #[test]
    fn session_wraps_assembly_errors() {
        let inner = AsmError::InvalidOperand {
            line: 2,
            operand: "x".into(),
            span: (4, 1).into(),
        };
        let err = SessionError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(
            SessionError::MissingInput.to_string(),
            "No assembly code provided."
        );
    }
}
