//! The syntax tree produced by the [`Parser`](super::Parser).
//!
//! An equation is flat: each side is an infix sequence of operands and operators, kept in reading
//! order. There is no precedence tree, since the tutor manipulates the blocks in the order the
//! student sees them.

use super::token::op::BinOp;
use std::{fmt, ops::Range};

/// The kind of value an operand holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// A literal number, such as `3`, `-4` or `1.5`.
    Number,

    /// A variable, optionally with a numeric coefficient, such as `x`, `-x` or `2x`.
    Variable,
}

/// A number or variable appearing on one side of the equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    /// Whether this operand is a number or a variable.
    pub kind: OperandKind,

    /// The text of the operand, with any folded leading `-` and without whitespace.
    pub lexeme: String,

    /// The region of the source code that this operand was parsed from.
    pub span: Range<usize>,
}

/// One block of an equation side.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Operand(Operand),
    Operator(BinOp),
}

impl Item {
    /// Returns the region of the source code this item was parsed from.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Operand(operand) => operand.span.clone(),
            Self::Operator(op) => op.span.clone(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(operand) => f.write_str(&operand.lexeme),
            Self::Operator(op) => write!(f, "{}", op.kind),
        }
    }
}

/// One side of an equation.
#[derive(Debug, Clone, PartialEq)]
pub struct SideExpr {
    /// The operands and operators of this side, in reading order. Operands and operators
    /// alternate, starting and ending with an operand.
    pub items: Vec<Item>,

    /// The region of the source code spanned by this side.
    pub span: Range<usize>,
}

impl fmt::Display for SideExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// A parsed equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: SideExpr,

    /// The region of the source code containing the `=` sign.
    pub equals: Range<usize>,

    /// The right-hand side of the equation.
    pub rhs: SideExpr,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}
