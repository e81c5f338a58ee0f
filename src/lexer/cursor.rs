// Heavily inspired by `rustc_lexer` and adapted to suit the project.
// See https://doc.rust-lang.org/beta/nightly-rustc/src/rustc_lexer/cursor.rs.html

use std::str::Chars;

/// Peekable iterator over a char sequence.
pub struct Cursor<'a> {
    /// Source the cursor was created over
    src: &'a str,
    /// Remaining chars
    chars: Chars<'a>,
    /// Byte offset of the start of the current token
    tok_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Cursor<'a> {
        Cursor {
            src,
            chars: src.chars(),
            tok_start: 0,
        }
    }

    /// Byte offset of the next char to be consumed.
    pub fn curr_pt(&self) -> usize {
        self.src.len() - self.chars.as_str().len()
    }

    /// Peek at the next char without consuming it. Returns `'\0'` at the end.
    pub fn first(&self) -> char {
        self.chars.clone().next().unwrap_or('\0')
    }

    pub fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// Move to the next char.
    pub fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Eats chars while the predicate holds or until end of input.
    pub fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.bump();
        }
    }

    /// Start a new token at the current position.
    pub fn reset_pos(&mut self) {
        self.tok_start = self.curr_pt();
    }

    /// Start offset and text of the token consumed since the last `reset_pos`.
    pub fn token(&self) -> (usize, &'a str) {
        (self.tok_start, &self.src[self.tok_start..self.curr_pt()])
    }
}
