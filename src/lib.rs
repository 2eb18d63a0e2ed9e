//! # cminus
//!
//! Single-pass recursive-descent parser and evaluator for a small imperative
//! toy language:
//!
//! ```text
//! Program NAME {
//!     int a;
//!     float v[4];
//!     a = (10 - 3 - 2) * 2;
//!     if (a >= 10) a = a / 2; else a = 0;
//! }
//! ```
//!
//! No syntax tree is built. Every production consumes its tokens, checks
//! declared types against evaluated types, updates the symbol table and
//! returns the value it reduced to, all during the same forward pass.
//!
//! ## Quick Start
//!
//! ```rust
//! use cminus::{Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = "Program X { int a; int b; a = 10; b = 20; a = a + b; }";
//!
//! // Tokenize (scan)
//! let tokens = Scanner::new(code).scan_tokens()?;
//!
//! // Parse and evaluate
//! let program = Parser::new(tokens).parse()?;
//!
//! let a = program.symbols.lookup("a").and_then(|e| e.value);
//! assert_eq!(a, Some(Value::Int(30)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The first error aborts the parse and carries its source position:
//!
//! ```rust
//! use cminus::{run_source, ErrorKind};
//!
//! let err = run_source("Program X { int a; int b; a = 10; b = 0; a = a / b; }").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DivisionByZero);
//! assert_eq!(err.position(), (1, 48));
//! ```
//!
//! ## Language Notes
//!
//! - Types are `int` and `float`; both operands of an operator, and both sides
//!   of an assignment, must have the same type.
//! - `if` and `while` evaluate their guard and then parse and evaluate their
//!   bodies unconditionally: `if` runs both branches, `while` runs its body once.
//! - Array syntax is recognized; see [`ArrayPolicy`] for how it evaluates.

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use config::{ArrayPolicy, ParserConfig};
pub use error::{Error, ErrorKind, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{Declaration, Parser, Program, StatementRecord};
pub use runtime::{Evaluated, SymbolEntry, SymbolTable, Value, ValueType};

/// Scans and parses `source` with the default configuration
pub fn run_source(source: &str) -> Result<Program> {
    run_source_with(source, ParserConfig::default())
}

/// Scans and parses `source` with a custom configuration
pub fn run_source_with(source: &str, config: ParserConfig) -> Result<Program> {
    let tokens = Scanner::new(source).scan_tokens()?;
    Parser::with_config(tokens, config).parse()
}
