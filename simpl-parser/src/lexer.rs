// Simpl Tokenizer
// Single left-to-right scan over the source characters

use crate::ast::Span;
use crate::error::LexError;
use crate::token::{keyword, Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Character-level tokenizer; one character of lookahead, no backtracking
pub struct Tokenizer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    tokens: Vec<Token>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
        }
    }

    /// Consume the whole source, appending an `EndOfInput` sentinel
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some((start, ch)) = self.chars.next() {
            let kind = match ch {
                ' ' | '\t' | '\n' | '\r' => continue,
                '=' => TokenKind::Equals,
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                ';' => TokenKind::Semicolon,
                ',' => TokenKind::Comma,
                ':' => TokenKind::Colon,
                '{' => TokenKind::OpenBrace,
                '}' => TokenKind::CloseBrace,
                '[' => TokenKind::OpenBracket,
                ']' => TokenKind::CloseBracket,
                '.' => TokenKind::Dot,
                '+' | '-' | '*' | '/' | '%' => TokenKind::BinaryOperator,
                c if c.is_ascii_digit() => {
                    self.lex_number(start);
                    continue;
                }
                c if is_identifier_start(c) => {
                    self.lex_word(start);
                    continue;
                }
                other => {
                    return Err(LexError::unexpected_character(self.source, other, start));
                }
            };

            let end = start + ch.len_utf8();
            self.push(kind, start, end);
        }

        let eof = self.source.len();
        self.tokens.push(Token::end_of_input(eof));
        log::trace!("tokenized {} bytes into {} tokens", eof, self.tokens.len());
        Ok(self.tokens)
    }

    /// Digits, optionally followed by `.` and at least one more digit
    fn lex_number(&mut self, start: usize) {
        self.consume_while(|c| c.is_ascii_digit());

        if let Some(&(dot, '.')) = self.chars.peek() {
            let after_dot = &self.source[dot + 1..];
            if after_dot.starts_with(|c: char| c.is_ascii_digit()) {
                self.chars.next();
                self.consume_while(|c| c.is_ascii_digit());
            }
        }

        let end = self.offset();
        self.push(TokenKind::Number, start, end);
    }

    fn lex_word(&mut self, start: usize) {
        self.consume_while(is_identifier_continue);

        let end = self.offset();
        let kind = keyword(&self.source[start..end]).unwrap_or(TokenKind::Identifier);
        self.push(kind, start, end);
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.chars.next_if(|&(_, c)| predicate(c)).is_some() {}
    }

    /// Byte offset of the next unconsumed character
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map_or(self.source.len(), |&(index, _)| index)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token::new(
            kind,
            &self.source[start..end],
            Span::new(start, end),
        ));
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
