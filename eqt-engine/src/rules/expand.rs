//! Expanding a coefficient-variable product, such as `2x`, into `2 * x`.

use crate::{
    arith,
    error::NotExpandable,
    gesture::Click,
    rules::{missing_term, term_span},
    state::EquationState,
    term::{Role, Term},
};
use eqt_error::Error;
use eqt_parser::parser::token::op::BinOpKind;
use tracing::trace;

/// Expands the clicked coefficient-variable product in place.
///
/// The product is replaced by its coefficient, a `*` operator and its variable, all with a
/// multiplicative role. The coefficient keeps the identity of the clicked term. Any other term
/// returns a [`NotExpandable`] error.
pub fn expand(state: &EquationState, click: &Click) -> Result<EquationState, Error> {
    let side = click.side;
    let Some((index, term)) = state.find(side, click.term_id) else {
        return Err(missing_term(state, side, click.term_id));
    };

    let split = if term.is_operand() { arith::split_product(&term.content) } else { None };
    let Some((coefficient, variable)) = split else {
        return Err(Error::new(vec![term_span(state, side, term.id)], NotExpandable {
            content: term.content.clone(),
        }));
    };
    trace!(term = %term, side = %side, "expanding product");

    let mut next = state.clone();
    let expanded = [
        Term::number(term.id, coefficient),
        Term::operator(next.fresh_id(), BinOpKind::Mul),
        Term::variable(next.fresh_id(), variable),
    ].map(|term| term.with_role(Role::Multiplicative));

    let mut terms = state.side(side).to_vec();
    terms.splice(index..=index, expanded);
    next.with_side(side, terms)
}
