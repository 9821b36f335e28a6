//! The transformation rules: each one interprets a gesture or click on an [`EquationState`] and
//! produces the next state.
//!
//! Rules never modify the state they are given. When a rule fails, the caller still holds the
//! previous state untouched, so a failed transformation can simply be ignored.

pub mod expand;
pub mod move_across;
pub mod resolve;

use crate::{
    error::InvalidGesture,
    state::EquationState,
    term::{Side, TermId},
};
use eqt_error::Error;

pub use expand::expand;
pub use move_across::{move_across, Moved};
pub use resolve::resolve;

/// Returns the span of the given term in the rendered equation, falling back to the span of the
/// whole side if the term is not on that side.
pub(crate) fn term_span(state: &EquationState, side: Side, id: TermId) -> std::ops::Range<usize> {
    state.span_of(side, id).unwrap_or_else(|| state.side_span(side))
}

/// Creates an [`InvalidGesture`] error pointing at the given term.
pub(crate) fn invalid_gesture(
    state: &EquationState,
    side: Side,
    id: TermId,
    reason: impl Into<String>,
) -> Error {
    Error::new(vec![term_span(state, side, id)], InvalidGesture { reason: reason.into() })
}

/// Creates an [`InvalidGesture`] error for a term that is not on the stated side.
pub(crate) fn missing_term(state: &EquationState, side: Side, id: TermId) -> Error {
    invalid_gesture(state, side, id, format!("there is no block {} on the {} side", id, side))
}
