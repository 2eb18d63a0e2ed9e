//! Descriptive records returned by the declaration and statement productions
//!
//! Records describe what a production did while it was parsed and evaluated.
//! They hold computed results only and cannot be re-evaluated.

use crate::runtime::{Evaluated, SymbolTable, ValueType};

/// A parsed variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Declared name
    pub name: String,
    /// Declared type
    pub ty: ValueType,
    /// Element count for `type ID [ NUM ] ;`
    pub array_len: Option<usize>,
    /// Line of the identifier
    pub line: usize,
    /// Column of the identifier
    pub column: usize,
}

/// Result of one statement production
#[derive(Debug, Clone, PartialEq)]
pub enum StatementRecord {
    /// `var = expression ;`
    Assignment {
        /// Assigned variable
        target: String,
        /// Evaluated subscript, when the target was `ID [ expression ]`
        subscript: Option<Evaluated>,
        /// Evaluated right-hand side
        value: Evaluated,
        /// False when the write was dropped (array element under the ignore policy)
        stored: bool,
    },
    /// `{ statement-list }`
    Compound(Vec<StatementRecord>),
    /// `if ( expression ) statement [ else statement ]`
    Selection {
        /// Evaluated guard
        guard: Evaluated,
        /// The `then` statement
        then_branch: Box<StatementRecord>,
        /// The `else` statement, if present
        else_branch: Option<Box<StatementRecord>>,
    },
    /// `while ( expression ) statement`
    Iteration {
        /// Evaluated guard
        guard: Evaluated,
        /// Loop body
        body: Box<StatementRecord>,
    },
}

/// A successfully parsed program
#[derive(Debug, Clone)]
pub struct Program {
    /// Name after the `Program` keyword
    pub name: String,
    /// Declarations in source order
    pub declarations: Vec<Declaration>,
    /// Top-level statements in source order
    pub statements: Vec<StatementRecord>,
    /// Symbol table as it stood when the closing brace was reached
    pub symbols: SymbolTable,
}
