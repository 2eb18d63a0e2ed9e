use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::runtime::{Value, ValueType};

/// One declared variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolEntry {
    /// Variable name
    pub name: String,
    /// Type given at the declaration
    #[serde(rename = "type")]
    pub ty: ValueType,
    /// Current value; `None` until the first assignment
    pub value: Option<Value>,
    /// Element count when declared as an array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_len: Option<usize>,
}

/// Flat, insertion-ordered mapping from variable name to type and value
///
/// One table lives for the duration of one program parse. There are no
/// nested scopes: every name is declared at most once per program.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    /// Entries in declaration order
    entries: Vec<SymbolEntry>,
    /// Name to position in `entries`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Creates an empty symbol table
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Declares a scalar variable with no value
    pub fn declare(&mut self, name: &str, ty: ValueType, line: usize, column: usize) -> Result<()> {
        self.insert(name, ty, None, line, column)
    }

    /// Declares an array variable of `len` elements
    pub fn declare_array(
        &mut self,
        name: &str,
        ty: ValueType,
        len: usize,
        line: usize,
        column: usize,
    ) -> Result<()> {
        self.insert(name, ty, Some(len), line, column)
    }

    fn insert(
        &mut self,
        name: &str,
        ty: ValueType,
        array_len: Option<usize>,
        line: usize,
        column: usize,
    ) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(Error::DuplicateDeclaration {
                name: name.to_string(),
                line,
                column,
            });
        }

        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(SymbolEntry {
            name: name.to_string(),
            ty,
            value: None,
            array_len,
        });
        Ok(())
    }

    /// Overwrites the value of a declared variable
    ///
    /// Fails when `name` was never declared or when `value_type` differs from
    /// the declared type.
    pub fn assign(
        &mut self,
        name: &str,
        value: Value,
        value_type: ValueType,
        line: usize,
        column: usize,
    ) -> Result<()> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| Error::UndeclaredVariable {
                name: name.to_string(),
                line,
                column,
            })?;

        let entry = &mut self.entries[idx];
        if entry.ty != value_type {
            return Err(Error::TypeMismatch {
                expected: entry.ty.to_string(),
                got: value_type.to_string(),
                line,
                column,
            });
        }

        entry.value = Some(value);
        Ok(())
    }

    /// Gets the entry for a name, if declared
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    /// Checks if a name has been declared
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter()
    }

    /// Number of declared names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:<20} {:<8} {:<12} {:<10}", "Name", "Type", "Value", "Info")?;
        writeln!(f, "{}", "-".repeat(53))?;
        for entry in &self.entries {
            let value = entry
                .value
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            let info = entry
                .array_len
                .map(|n| format!("array[{}]", n))
                .unwrap_or_default();
            writeln!(
                f,
                "{:<20} {:<8} {:<12} {:<10}",
                entry.name, entry.ty, value, info
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("a", ValueType::Int, 1, 1).unwrap();

        let entry = table.lookup("a").unwrap();
        assert_eq!(entry.ty, ValueType::Int);
        assert_eq!(entry.value, None);
        assert!(table.lookup("b").is_none());
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut table = SymbolTable::new();
        table.declare("a", ValueType::Int, 1, 1).unwrap();

        let err = table.declare("a", ValueType::Float, 2, 7).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateDeclaration {
                name: "a".to_string(),
                line: 2,
                column: 7
            }
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("a").unwrap().ty, ValueType::Int);
    }

    #[test]
    fn test_assign() {
        let mut table = SymbolTable::new();
        table.declare("x", ValueType::Float, 1, 1).unwrap();

        table.assign("x", Value::Float(2.5), ValueType::Float, 2, 1).unwrap();
        assert_eq!(table.lookup("x").unwrap().value, Some(Value::Float(2.5)));

        table.assign("x", Value::Float(4.0), ValueType::Float, 3, 1).unwrap();
        assert_eq!(table.lookup("x").unwrap().value, Some(Value::Float(4.0)));
    }

    #[test]
    fn test_assign_undeclared() {
        let mut table = SymbolTable::new();
        let err = table.assign("y", Value::Int(1), ValueType::Int, 5, 3).unwrap_err();
        assert!(matches!(err, Error::UndeclaredVariable { ref name, .. } if name == "y"));
    }

    #[test]
    fn test_assign_type_mismatch() {
        let mut table = SymbolTable::new();
        table.declare("a", ValueType::Int, 1, 1).unwrap();

        let err = table
            .assign("a", Value::Float(1.0), ValueType::Float, 2, 1)
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(table.lookup("a").unwrap().value, None);
    }

    #[test]
    fn test_insertion_order() {
        let mut table = SymbolTable::new();
        for name in ["zeta", "alpha", "mid"] {
            table.declare(name, ValueType::Int, 1, 1).unwrap();
        }
        table.declare_array("arr", ValueType::Float, 4, 1, 1).unwrap();

        let names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid", "arr"]);
        assert_eq!(table.lookup("arr").unwrap().array_len, Some(4));
    }

    #[test]
    fn test_display_table() {
        let mut table = SymbolTable::new();
        table.declare("a", ValueType::Int, 1, 1).unwrap();
        table.declare("b", ValueType::Float, 1, 1).unwrap();
        table.assign("a", Value::Int(30), ValueType::Int, 2, 1).unwrap();

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].starts_with("a"));
        assert!(lines[2].contains("30"));
        assert!(lines[3].contains("float"));
        assert!(lines[3].contains('-'));
    }

    #[test]
    fn test_serialize_json() {
        let mut table = SymbolTable::new();
        table.declare("a", ValueType::Int, 1, 1).unwrap();
        table.assign("a", Value::Int(7), ValueType::Int, 1, 1).unwrap();

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "name": "a", "type": "int", "value": 7 }])
        );
    }
}
