//! Operator application for the evaluation layer
//!
//! Both operands of every operator must carry the same type tag. The type
//! check runs before the operand values are inspected, so a mismatch is
//! reported even when one side has never been assigned.

use crate::error::{Error, Result};
use crate::lexer::TokenKind;
use crate::runtime::{Evaluated, Value, ValueType};

/// Additive and multiplicative operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl ArithOp {
    /// Maps an operator token kind to its arithmetic operator
    pub fn from_token(kind: TokenKind) -> Option<ArithOp> {
        match kind {
            TokenKind::Plus => Some(ArithOp::Add),
            TokenKind::Minus => Some(ArithOp::Sub),
            TokenKind::Star => Some(ArithOp::Mul),
            TokenKind::Slash => Some(ArithOp::Div),
            _ => None,
        }
    }
}

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
}

impl RelOp {
    /// Maps an operator token kind to its relational operator
    pub fn from_token(kind: TokenKind) -> Option<RelOp> {
        match kind {
            TokenKind::Lt => Some(RelOp::Lt),
            TokenKind::LtEq => Some(RelOp::LtEq),
            TokenKind::Gt => Some(RelOp::Gt),
            TokenKind::GtEq => Some(RelOp::GtEq),
            TokenKind::EqEq => Some(RelOp::Eq),
            TokenKind::NotEq => Some(RelOp::NotEq),
            _ => None,
        }
    }

    fn holds<T: PartialOrd>(self, l: T, r: T) -> bool {
        match self {
            RelOp::Lt => l < r,
            RelOp::LtEq => l <= r,
            RelOp::Gt => l > r,
            RelOp::GtEq => l >= r,
            RelOp::Eq => l == r,
            RelOp::NotEq => l != r,
        }
    }
}

fn check_types(left: &Evaluated, right: &Evaluated, line: usize, column: usize) -> Result<()> {
    if left.ty != right.ty {
        return Err(Error::TypeMismatch {
            expected: left.ty.to_string(),
            got: right.ty.to_string(),
            line,
            column,
        });
    }
    Ok(())
}

/// Applies `left op right`; `line`/`column` locate the operator token
pub fn apply_arith(
    op: ArithOp,
    left: &Evaluated,
    right: &Evaluated,
    line: usize,
    column: usize,
) -> Result<Evaluated> {
    check_types(left, right, line, column)?;
    let ty = left.ty;
    let l = left.require()?.to_numeric(ty);
    let r = right.require()?.to_numeric(ty);
    if op == ArithOp::Div && r.is_zero() {
        return Err(Error::DivisionByZero { line, column });
    }

    let value = match (l, r) {
        (Value::Int(l), Value::Int(r)) => match op {
            ArithOp::Add => Value::Int(l.saturating_add(r)),
            ArithOp::Sub => Value::Int(l.saturating_sub(r)),
            ArithOp::Mul => Value::Int(l.saturating_mul(r)),
            ArithOp::Div => Value::Int(l.saturating_div(r)),
        },
        (Value::Float(l), Value::Float(r)) => match op {
            ArithOp::Add => Value::Float(l + r),
            ArithOp::Sub => Value::Float(l - r),
            ArithOp::Mul => Value::Float(l * r),
            ArithOp::Div => Value::Float(l / r),
        },
        (l, r) => {
            // A value whose kind disagrees with its tag; tags were checked above.
            return Err(Error::TypeMismatch {
                expected: l.type_name().to_string(),
                got: r.type_name().to_string(),
                line,
                column,
            });
        }
    };

    Ok(Evaluated::new(value, ty))
}

/// Compares `left op right`
///
/// The boolean result keeps the operands' type tag rather than a boolean
/// type; guards and assignments see it under that tag.
pub fn apply_rel(
    op: RelOp,
    left: &Evaluated,
    right: &Evaluated,
    line: usize,
    column: usize,
) -> Result<Evaluated> {
    check_types(left, right, line, column)?;
    let ty = left.ty;
    let l = left.require()?.to_numeric(ty);
    let r = right.require()?.to_numeric(ty);

    let result = match (l, r) {
        (Value::Int(l), Value::Int(r)) => op.holds(l, r),
        (Value::Float(l), Value::Float(r)) => op.holds(l, r),
        (l, r) => {
            return Err(Error::TypeMismatch {
                expected: l.type_name().to_string(),
                got: r.type_name().to_string(),
                line,
                column,
            })
        }
    };

    Ok(Evaluated::new(Value::Bool(result), ty))
}

/// Checks a value against a declared type before it is stored
pub fn check_assignable(
    target: ValueType,
    value: &Evaluated,
    line: usize,
    column: usize,
) -> Result<Value> {
    if value.ty != target {
        return Err(Error::TypeMismatch {
            expected: target.to_string(),
            got: value.ty.to_string(),
            line,
            column,
        });
    }
    Ok(value.require()?.to_numeric(target))
}
