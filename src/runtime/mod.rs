//! Evaluation support: values, operators and the symbol table

pub mod ops;
mod symbol_table;
mod value;

pub use ops::{ArithOp, RelOp};
pub use symbol_table::{SymbolEntry, SymbolTable};
pub use value::{Evaluated, Slot, UnsetRead, Value, ValueType};
