use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Declared or evaluated type of a numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
}

impl ValueType {
    /// Returns the type name as written in source
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
    /// Result of a relational comparison
    Bool(bool),
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
        }
    }

    /// Converts the value to the numeric representation of `ty`
    ///
    /// Comparison results become 1/0; numeric values already carry their
    /// own type and are returned unchanged.
    pub fn to_numeric(self, ty: ValueType) -> Value {
        match (self, ty) {
            (Value::Bool(b), ValueType::Int) => Value::Int(b as i64),
            (Value::Bool(b), ValueType::Float) => Value::Float(if b { 1.0 } else { 0.0 }),
            (other, _) => other,
        }
    }

    /// True when the value is an integer or float zero
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Bool(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Read of a declared variable that has no value yet
#[derive(Debug, Clone, PartialEq)]
pub struct UnsetRead {
    /// Variable name
    pub name: String,
    /// Line of the reference
    pub line: usize,
    /// Column of the reference
    pub column: usize,
}

/// Value slot of an evaluated expression
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// A computed value
    Set(Value),
    /// The expression read an unassigned variable
    Unset(UnsetRead),
}

/// A value produced by an expression production, paired with its type tag
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    /// Computed value, or the unassigned read it depends on
    pub slot: Slot,
    /// Type tag the value was produced under
    pub ty: ValueType,
}

impl Evaluated {
    /// Creates an evaluated result with a known value
    pub fn new(value: Value, ty: ValueType) -> Self {
        Evaluated {
            slot: Slot::Set(value),
            ty,
        }
    }

    /// Creates a typed result for a read of an unassigned variable
    pub fn unset(ty: ValueType, read: UnsetRead) -> Self {
        Evaluated {
            slot: Slot::Unset(read),
            ty,
        }
    }

    /// The computed value, if any
    pub fn value(&self) -> Option<Value> {
        match &self.slot {
            Slot::Set(v) => Some(*v),
            Slot::Unset(_) => None,
        }
    }

    /// The computed value, or `UninitializedVariable` for the unassigned read
    pub fn require(&self) -> Result<Value> {
        match &self.slot {
            Slot::Set(v) => Ok(*v),
            Slot::Unset(read) => Err(Error::UninitializedVariable {
                name: read.name.clone(),
                line: read.line,
                column: read.column,
            }),
        }
    }
}

impl fmt::Display for Evaluated {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.slot {
            Slot::Set(v) => write!(f, "{}({})", v, self.ty),
            Slot::Unset(read) => write!(f, "unset {}({})", read.name, self.ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_to_numeric() {
        assert_eq!(Value::Bool(true).to_numeric(ValueType::Int), Value::Int(1));
        assert_eq!(
            Value::Bool(false).to_numeric(ValueType::Float),
            Value::Float(0.0)
        );
        assert_eq!(Value::Int(7).to_numeric(ValueType::Int), Value::Int(7));
    }

    #[test]
    fn test_is_zero() {
        assert!(Value::Int(0).is_zero());
        assert!(Value::Float(-0.0).is_zero());
        assert!(!Value::Float(0.5).is_zero());
        assert!(!Value::Bool(false).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(30.0).to_string(), "30.0");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Evaluated::new(Value::Int(3), ValueType::Int).to_string(), "3(int)");
    }

    #[test]
    fn test_require_unset() {
        let read = UnsetRead {
            name: "b".to_string(),
            line: 2,
            column: 5,
        };
        let eval = Evaluated::unset(ValueType::Float, read);
        assert_eq!(eval.value(), None);
        assert_eq!(eval.to_string(), "unset b(float)");
        assert_eq!(
            eval.require(),
            Err(Error::UninitializedVariable {
                name: "b".to_string(),
                line: 2,
                column: 5
            })
        );
    }
}
