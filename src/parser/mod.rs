//! cminus parser module
//!
//! Recognizes, type-checks and evaluates a program in one pass over its tokens.

mod grammar;
mod record;

pub use grammar::Parser;
pub use record::{Declaration, Program, StatementRecord};
