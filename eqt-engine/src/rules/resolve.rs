//! Resolving an operator: combining it and its two neighbours into a single computed term.

use crate::{
    arith::{self, Combined},
    error::{InvalidGesture, UnresolvableOperator},
    gesture::Click,
    options::EngineOptions,
    rules::{missing_term, term_span},
    state::EquationState,
    term::{Role, Side, Term, TermKind},
};
use eqt_error::Error;
use eqt_parser::parser::token::op::BinOpKind;
use tracing::trace;

/// Resolves the clicked operator.
///
/// The operator and the operands on either side of it are replaced by one new term holding the
/// result, with a fresh identity and a neutral role. Sides are read left to right with no
/// operator precedence: resolving the `+` in `2 + 3 * 4` gives `5 * 4`.
///
/// After the replacement, if either side is left holding a single computed
/// coefficient-variable product (such as `2x`), that term is expanded into
/// `coefficient * variable`, so the student can keep working on its factors.
pub fn resolve(
    state: &EquationState,
    click: &Click,
    options: &EngineOptions,
) -> Result<EquationState, Error> {
    let side = click.side;
    let Some((index, term)) = state.find(side, click.term_id) else {
        return Err(missing_term(state, side, click.term_id));
    };
    let Some(op) = term.op() else {
        return Err(Error::new(vec![term_span(state, side, term.id)], InvalidGesture {
            reason: "only operators can be resolved".to_string(),
        }));
    };

    let terms = state.side(side);
    let unresolvable = |reason: String| Error::new(
        vec![term_span(state, side, term.id)],
        UnresolvableOperator { op: op.symbol().to_string(), reason },
    );

    if index == 0 || index + 1 >= terms.len() {
        return Err(unresolvable("this operator is missing an operand".to_string()));
    }
    let (lhs, rhs) = (&terms[index - 1], &terms[index + 1]);

    let Combined { content, kind } = arith::combine(&lhs.content, op, &rhs.content, options.decimal_precision)
        .map_err(|reason| unresolvable(reason.to_string()))?;
    trace!(lhs = %lhs, op = %op, rhs = %rhs, result = %content, "combined operands");

    let mut next = state.clone();
    let result = Term {
        id: next.fresh_id(),
        content,
        kind,
        side: lhs.side,
        role: Role::Neutral,
    };

    let mut replaced = terms.to_vec();
    replaced.splice(index - 1..=index + 1, [result]);
    let mut next = next.with_side(side, replaced)?;

    for side in [side, side.opposite()] {
        if let Some(expanded) = expand_lone_product(&mut next, side) {
            next = next.with_side(side, expanded)?;
        }
    }

    Ok(next)
}

/// If the side holds a single computed coefficient-variable product, returns the three terms it
/// expands into. The coefficient keeps the identity of the product.
fn expand_lone_product(state: &mut EquationState, side: Side) -> Option<Vec<Term>> {
    let [term] = state.side(side) else {
        return None;
    };
    if term.kind != TermKind::Number {
        return None;
    }
    let (coefficient, variable) = arith::split_product(&term.content)?;
    let id = term.id;
    trace!(term = %term, side = %side, "expanding computed product");

    Some(vec![
        Term::number(id, coefficient).with_role(Role::Multiplicative),
        Term::operator(state.fresh_id(), BinOpKind::Mul).with_role(Role::Multiplicative),
        Term::variable(state.fresh_id(), variable).with_role(Role::Multiplicative),
    ])
}
