// Simpl Parser Library
// Hand-written tokenizer and recursive-descent parser for the Simpl language

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::*;
pub use lexer::Tokenizer;
pub use parser::{Parser, DEFAULT_MAX_NESTING_DEPTH};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;

/// Split source text into tokens, ending with an `EndOfInput` sentinel
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input).tokenize()
}

/// Parse a whole program
pub fn parse_program(input: &str) -> ParseResult<Program> {
    Parser::new(input)?.parse_program()
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
