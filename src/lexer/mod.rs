use crate::lexer::cursor::Cursor;
use crate::symbol::{Span, SrcOffset};

pub mod cursor;

/// Whitespace-delimited word inside a source line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Non-blank source line with comments removed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line<'a> {
    /// 1-based line number in the source
    pub number: usize,
    pub tokens: Vec<Token<'a>>,
}

impl Line<'_> {
    /// Span from the first to the last token on the line.
    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => first.span.join(last.span),
            _ => Span::default(),
        }
    }
}

/// Comments run from this character to the end of the line.
pub const COMMENT: char = ';';

/// Iterate over the lines of `src` that carry at least one token.
pub fn lines(src: &str) -> impl Iterator<Item = Line<'_>> + '_ {
    let mut cursor = Cursor::new(src);
    let mut number = 0;
    std::iter::from_fn(move || loop {
        if cursor.is_eof() {
            return None;
        }
        number += 1;
        let tokens = cursor.advance_line();
        if !tokens.is_empty() {
            return Some(Line { number, tokens });
        }
    })
}

impl<'a> Cursor<'a> {
    /// Consume one line, including its terminating newline.
    fn advance_line(&mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        loop {
            self.reset_pos();
            match self.bump() {
                None | Some('\n') => break,
                Some(COMMENT) => self.take_while(|c| c != '\n'),
                Some(c) if c.is_whitespace() => {
                    self.take_while(|c| c != '\n' && c.is_whitespace())
                }
                Some(_) => {
                    self.take_while(|c| !c.is_whitespace() && c != COMMENT);
                    let (start, text) = self.token();
                    tokens.push(Token {
                        text,
                        span: Span::new(SrcOffset(start), text.len()),
                    });
                }
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words<'a>(line: &Line<'a>) -> Vec<&'a str> {
        line.tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let lines: Vec<_> = lines("  lai \t 200  \n").collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(words(&lines[0]), ["lai", "200"]);
        assert_eq!(lines[0].tokens[0].span, Span::new(SrcOffset(2), 3));
        assert_eq!(lines[0].tokens[1].span, Span::new(SrcOffset(8), 3));
    }

    #[test]
    fn strips_comments() {
        let lines: Vec<_> = lines("LAI 5;load\n; whole line\nHLT ; done").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(words(&lines[0]), ["LAI", "5"]);
        assert_eq!(words(&lines[1]), ["HLT"]);
    }

    // Blank lines still advance the line counter
    #[test]
    fn numbers_are_source_lines() {
        let numbers: Vec<_> = lines("\nHLT\n\n   \n;x\nLAB\r\n")
            .map(|l| l.number)
            .collect();
        assert_eq!(numbers, [2, 6]);
    }

    #[test]
    fn empty_source() {
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines("\n\n ; nothing\n").count(), 0);
    }

    #[test]
    fn line_span_covers_tokens() {
        let line = lines("  JMP 12  ").next().unwrap();
        assert_eq!(line.span(), Span::new(SrcOffset(2), 6));
    }
}
