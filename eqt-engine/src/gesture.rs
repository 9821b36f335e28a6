//! The inputs the presentation layer hands to the engine.

use crate::term::{Role, Side, Term, TermId};

/// Supplies the horizontal position of the equals sign at the moment a block is dropped.
///
/// This is a layout measurement owned by the presentation layer. Returning [`None`] means the
/// position is unknown, in which case a drop never counts as crossing the equals sign.
pub trait BoundaryProvider {
    /// Returns the x-coordinate of the midpoint of the equals sign.
    fn equals_midpoint(&self) -> Option<f64>;
}

impl BoundaryProvider for Option<f64> {
    fn equals_midpoint(&self) -> Option<f64> {
        *self
    }
}

impl BoundaryProvider for f64 {
    fn equals_midpoint(&self) -> Option<f64> {
        Some(*self)
    }
}

/// A finished drag of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// The identity of the dragged term.
    pub term_id: TermId,

    /// The side the term was dragged from.
    pub origin: Side,

    /// Whether the term was dropped on the other side of the equals sign.
    pub crossed: bool,

    /// The inverse operation to apply if the term crossed.
    pub role: Role,
}

impl Gesture {
    /// Creates a gesture for the given term, using the role of the term.
    pub fn for_term(term: &Term, crossed: bool) -> Self {
        Self {
            term_id: term.id,
            origin: term.side,
            crossed,
            role: term.role,
        }
    }

    /// Creates a gesture for a term dropped at the given x-coordinate, comparing it with the
    /// position of the equals sign.
    ///
    /// A term from the left side crosses when it is dropped to the right of the equals sign, and
    /// vice versa. A drop exactly on the midpoint does not cross.
    pub fn from_drop(term: &Term, drop_x: f64, boundary: &impl BoundaryProvider) -> Self {
        let crossed = boundary.equals_midpoint().is_some_and(|mid| match term.side {
            Side::Left => drop_x > mid,
            Side::Right => drop_x < mid,
        });
        Self::for_term(term, crossed)
    }
}

/// A click on a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// The identity of the clicked term.
    pub term_id: TermId,

    /// The side the clicked term is on.
    pub side: Side,
}

impl Click {
    /// Creates a click on the given term.
    pub fn on(term: &Term) -> Self {
        Self {
            term_id: term.id,
            side: term.side,
        }
    }
}
