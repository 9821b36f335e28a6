//! The [`Term`] type: one block of an equation.

use eqt_parser::parser::token::op::BinOpKind;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The stable identity of a [`Term`].
///
/// Identities are unique within an [`EquationState`](crate::EquationState). A term keeps its
/// identity when it is carried over to a new state, including when it is moved to the other
/// side of the equation; terms created by a computation get a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A side of the equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the other side of the equation.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the name of the side, for messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TermKind {
    Number,
    Variable,
    Operator,
    Equals,
}

impl TermKind {
    /// Returns true if terms of this kind hold a value (as opposed to an operator or the equals
    /// marker).
    pub fn is_operand(self) -> bool {
        matches!(self, Self::Number | Self::Variable)
    }
}

/// Which inverse operation applies when a term is dragged across the equals sign.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// The term is added or subtracted; moving it subtracts it from the other side.
    Additive,

    /// The term is a factor; moving it multiplies the other side by its reciprocal.
    Multiplicative,

    /// Moving the term has no algebraic meaning. Operators and the equals marker are neutral.
    #[default]
    Neutral,
}

impl Role {
    /// Returns the role of an operand that directly follows the given operator, or that starts a
    /// side if there is no operator.
    pub fn after(op: Option<BinOpKind>) -> Self {
        match op {
            Some(BinOpKind::Mul | BinOpKind::Div) => Self::Multiplicative,
            Some(BinOpKind::Add | BinOpKind::Sub) | None => Self::Additive,
        }
    }
}

/// The smallest unit of an equation: a number, variable, operator or the equals marker, along
/// with the metadata needed to move it around.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// The identity of the term.
    pub id: TermId,

    /// The text displayed on the block.
    pub content: String,

    /// The kind of the term.
    pub kind: TermKind,

    /// The side of the equation that owns the term.
    pub side: Side,

    /// The inverse operation applied when the term crosses the equals sign.
    pub role: Role,
}

impl Term {
    /// Creates a term with the given identity and content, on the left side, with a neutral
    /// role.
    pub fn new(id: TermId, kind: TermKind, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            kind,
            side: Side::Left,
            role: Role::Neutral,
        }
    }

    /// Creates a number term.
    pub fn number(id: TermId, content: impl Into<String>) -> Self {
        Self::new(id, TermKind::Number, content)
    }

    /// Creates a variable term.
    pub fn variable(id: TermId, content: impl Into<String>) -> Self {
        Self::new(id, TermKind::Variable, content)
    }

    /// Creates an operator term.
    pub fn operator(id: TermId, op: BinOpKind) -> Self {
        Self::new(id, TermKind::Operator, op.symbol())
    }

    /// Creates the equals marker.
    pub fn equals(id: TermId) -> Self {
        Self::new(id, TermKind::Equals, "=")
    }

    /// Returns the same term, moved to the given side.
    pub fn on(self, side: Side) -> Self {
        Self { side, ..self }
    }

    /// Returns the same term, with the given role.
    pub fn with_role(self, role: Role) -> Self {
        Self { role, ..self }
    }

    /// Returns the operator this term represents, if it is an operator.
    pub fn op(&self) -> Option<BinOpKind> {
        match self.kind {
            TermKind::Operator => BinOpKind::from_symbol(&self.content),
            _ => None,
        }
    }

    /// Returns true if the term holds a value.
    pub fn is_operand(&self) -> bool {
        self.kind.is_operand()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_after_operator() {
        assert_eq!(Role::after(None), Role::Additive);
        assert_eq!(Role::after(Some(BinOpKind::Add)), Role::Additive);
        assert_eq!(Role::after(Some(BinOpKind::Sub)), Role::Additive);
        assert_eq!(Role::after(Some(BinOpKind::Mul)), Role::Multiplicative);
        assert_eq!(Role::after(Some(BinOpKind::Div)), Role::Multiplicative);
    }

    #[test]
    fn operator_terms() {
        let term = Term::operator(TermId(4), BinOpKind::Div);
        assert_eq!(term.content, "/");
        assert_eq!(term.op(), Some(BinOpKind::Div));
        assert_eq!(term.role, Role::Neutral);
        assert!(!term.is_operand());
        assert_eq!(Term::number(TermId(5), "/").op(), None);
    }

    #[test]
    fn opposite_sides() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite().opposite(), Side::Right);
    }
}
