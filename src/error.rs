//! Error types for the cminus parser/evaluator

use thiserror::Error;

/// Parse and evaluation errors
///
/// Every error is fatal to the parse that raised it. The first error
/// encountered is returned to the caller; nothing is accumulated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors
    /// Character the scanner cannot start a token with
    ///
    /// **Triggered by:** Characters outside the language alphabet
    /// **Example:** `a = b $ c;`, or a lone `!`
    #[error("Unexpected character '{ch}' at line {line}, column {column}")]
    LexError {
        /// Offending character
        ch: char,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    // Parse errors
    /// Current token does not fit the grammar
    ///
    /// **Triggered by:** A missing or misplaced token, or input ending early
    /// **Example:** `Program X { int a; a = 1;` (missing closing `}`)
    #[error("Syntax error at line {line}, column {column}: expected {expected}, found {found}")]
    SyntaxError {
        /// Description of the token kind(s) the production expected
        expected: String,
        /// The token actually seen, or "end of input"
        found: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    /// Numeric literal that cannot be represented
    #[error("Invalid numeric literal '{lexeme}' at line {line}, column {column}")]
    InvalidLiteral {
        /// Literal text
        lexeme: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    // Declaration errors
    /// A name declared twice in one program
    ///
    /// **Triggered by:** `int a; float a;`
    #[error("Variable '{name}' is already declared (line {line}, column {column})")]
    DuplicateDeclaration {
        /// Variable name
        name: String,
        /// Line of the second declaration
        line: usize,
        /// Column of the second declaration
        column: usize,
    },

    /// A name read or assigned without a prior declaration
    ///
    /// **Prevention:** Declare every variable in the declaration list
    #[error("Undeclared variable '{name}' at line {line}, column {column}")]
    UndeclaredVariable {
        /// Variable name
        name: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    // Evaluation errors
    /// Operand or assignment types disagree
    ///
    /// **Triggered by:** `int a; float b; a = b;` or `1 + 2.0`
    #[error("Type mismatch at line {line}, column {column}: expected {expected}, got {got}")]
    TypeMismatch {
        /// Type required by the left operand or assignment target
        expected: String,
        /// Type actually supplied
        got: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    /// Right operand of `/` evaluated to zero
    #[error("Division by zero at line {line}, column {column}")]
    DivisionByZero {
        /// Line of the `/` operator
        line: usize,
        /// Column of the `/` operator
        column: usize,
    },

    /// Value of a declared variable used before any assignment
    #[error("Variable '{name}' is used before it is assigned (line {line}, column {column})")]
    UninitializedVariable {
        /// Variable name
        name: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    /// Array access under the rejecting array policy
    #[error("Array access on '{name}' is not supported (line {line}, column {column})")]
    UnsupportedArray {
        /// Variable name
        name: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },

    // Resource errors
    /// Recursion deeper than the configured limit
    #[error("Nesting deeper than {limit} levels at line {line}, column {column}")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
    },
}

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Scanner could not tokenize the input
    Lexical,
    /// Grammar violation
    Syntax,
    /// Name declared twice
    DuplicateDeclaration,
    /// Name used without declaration
    UndeclaredVariable,
    /// Declared and evaluated types disagree
    TypeMismatch,
    /// Division by a zero-valued operand
    DivisionByZero,
    /// Any other evaluation-time failure
    Runtime,
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LexError { .. } => ErrorKind::Lexical,
            Error::SyntaxError { .. } | Error::InvalidLiteral { .. } => ErrorKind::Syntax,
            Error::DuplicateDeclaration { .. } => ErrorKind::DuplicateDeclaration,
            Error::UndeclaredVariable { .. } => ErrorKind::UndeclaredVariable,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Error::UninitializedVariable { .. }
            | Error::UnsupportedArray { .. }
            | Error::NestingTooDeep { .. } => ErrorKind::Runtime,
        }
    }

    /// Source position `(line, column)` the error points at
    pub fn position(&self) -> (usize, usize) {
        match self {
            Error::LexError { line, column, .. }
            | Error::SyntaxError { line, column, .. }
            | Error::InvalidLiteral { line, column, .. }
            | Error::DuplicateDeclaration { line, column, .. }
            | Error::UndeclaredVariable { line, column, .. }
            | Error::TypeMismatch { line, column, .. }
            | Error::DivisionByZero { line, column }
            | Error::UninitializedVariable { line, column, .. }
            | Error::UnsupportedArray { line, column, .. }
            | Error::NestingTooDeep { line, column, .. } => (*line, *column),
        }
    }
}

/// Result type for cminus operations
pub type Result<T> = std::result::Result<T, Error>;
