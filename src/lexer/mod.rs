//! Lexical analysis for cminus
//!
//! Converts source text into a flat stream of tokens with line/column positions.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
