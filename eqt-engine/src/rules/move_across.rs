//! Moving a term across the equals sign.
//!
//! Dragging a term to the other side removes it (and the operator next to it) from its side, and
//! applies its inverse to the other side: an additive term is subtracted from the destination,
//! and a multiplicative term's reciprocal multiplies it.
//!
//! ```text
//! 2x + 3 = 5      move `3` (additive)        ->  2x = 5 - 3
//! 2 * x = 8       move `2` (multiplicative)  ->  x = 1/2 * 8
//! ```
//!
//! Moving never simplifies; the student resolves the inserted operator separately.

use crate::{
    arith,
    options::EngineOptions,
    gesture::Gesture,
    rules::{invalid_gesture, missing_term},
    state::EquationState,
    term::{Role, Side, Term},
};
use eqt_error::Error;
use eqt_parser::parser::token::op::BinOpKind;
use tracing::trace;

/// The result of moving a term across the equals sign.
#[derive(Debug, Clone, PartialEq)]
pub struct Moved {
    /// The equation after the move.
    pub state: EquationState,

    /// The term as it was before the move, with its original side and role. The presentation can
    /// use this to animate the block leaving its side.
    pub term: Term,
}

/// The operator next to the moved term, which leaves the origin side together with it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Adjacent {
    /// The term is the only term on its side.
    None,

    /// The operator directly before the term.
    Before(usize, BinOpKind),

    /// The operator directly after the term, which is the first term on its side.
    After(usize, BinOpKind),
}

impl Adjacent {
    fn find(terms: &[Term], index: usize) -> Self {
        if index > 0 {
            if let Some(op) = terms[index - 1].op() {
                return Self::Before(index - 1, op);
            }
        }
        match terms.get(index + 1).and_then(Term::op) {
            Some(op) => Self::After(index + 1, op),
            None => Self::None,
        }
    }

    fn index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Before(index, _) | Self::After(index, _) => Some(index),
        }
    }
}

/// Applies a drag gesture to the equation.
///
/// Returns `Ok(None)` if the gesture does not change the equation: the term was dropped on its own
/// side, or its role is [`Role::Neutral`]. Returns an error if the term is not on the gesture's
/// origin side, if it is not a number or variable, or if the move is rejected by the strict
/// options (see [`EngineOptions`]).
pub fn move_across(
    state: &EquationState,
    gesture: &Gesture,
    options: &EngineOptions,
) -> Result<Option<Moved>, Error> {
    let origin = gesture.origin;
    let Some((index, term)) = state.find(origin, gesture.term_id) else {
        return Err(missing_term(state, origin, gesture.term_id));
    };
    if !term.is_operand() {
        return Err(invalid_gesture(state, origin, term.id, "only numbers and variables can be moved"));
    }

    if !gesture.crossed {
        trace!(term = %term.id, "dropped on its own side");
        return Ok(None);
    }
    if gesture.role == Role::Neutral {
        trace!(term = %term.id, "neutral role, nothing to move");
        return Ok(None);
    }

    let destination = origin.opposite();
    let origin_terms = state.side(origin);
    let adjacent = Adjacent::find(origin_terms, index);

    if options.strict_operator_inverse {
        check_strict(state, origin, index, adjacent, gesture.role)
            .map_err(|reason| invalid_gesture(state, origin, term.id, reason))?;
    }

    let mut next = state.clone();

    let mut remaining = origin_terms.iter()
        .enumerate()
        .filter(|&(i, _)| i != index && Some(i) != adjacent.index())
        .map(|(_, term)| term.clone())
        .collect::<Vec<_>>();

    if remaining.is_empty() {
        // the side would be empty; leave the identity element of the inverse operation instead
        let identity = if gesture.role == Role::Multiplicative { "1" } else { "0" };
        remaining.push(Term::number(next.fresh_id(), identity).with_role(Role::Additive));
    } else if options.strict_operator_inverse && adjacent == Adjacent::After(index + 1, BinOpKind::Sub) {
        // `3 - x`: removing `3 -` leaves `-x`
        remaining[0].content = arith::negate(&remaining[0].content);
    }

    let moved_value = |content: String| Term {
        id: term.id,
        content,
        kind: term.kind,
        side: destination,
        role: term.role,
    };

    let mut destination_terms = state.side(destination).to_vec();
    match gesture.role {
        Role::Additive => {
            let op = match adjacent {
                Adjacent::Before(_, BinOpKind::Sub) if options.strict_operator_inverse => BinOpKind::Add,
                _ => BinOpKind::Sub,
            };
            destination_terms.push(Term::operator(next.fresh_id(), op));
            destination_terms.push(moved_value(term.content.clone()));
        },
        Role::Multiplicative => {
            let content = match adjacent {
                Adjacent::Before(_, BinOpKind::Div) if options.strict_operator_inverse => term.content.clone(),
                _ => arith::reciprocal(&term.content, options.strict_fraction_inverse)
                    .ok_or_else(|| invalid_gesture(
                        state,
                        origin,
                        term.id,
                        format!("`{}` has no reciprocal to multiply the other side by", term.content),
                    ))?,
            };
            let value = moved_value(content);
            let op = Term::operator(next.fresh_id(), BinOpKind::Mul);
            destination_terms.splice(0..0, [value, op]);
        },
        Role::Neutral => unreachable!("neutral gestures return early"),
    }

    let next = next
        .with_side(origin, remaining)?
        .with_side(destination, destination_terms)?;
    trace!(term = %term.id, from = %origin, to = %destination, result = %next, "moved term");

    Ok(Some(Moved {
        state: next,
        term: term.clone(),
    }))
}

/// Checks that moving the term with the given role keeps the equation equivalent.
///
/// The sides are read left to right with the usual precedence of `*` and `/` over `+` and `-`,
/// so an additive move must not pull a factor out of a product, and a multiplicative move is only
/// exact when both sides are single products.
fn check_strict(
    state: &EquationState,
    origin: Side,
    index: usize,
    adjacent: Adjacent,
    role: Role,
) -> Result<(), String> {
    let terms = state.side(origin);
    let neighbours = [
        index.checked_sub(1).and_then(|i| terms.get(i)).and_then(Term::op),
        terms.get(index + 1).and_then(Term::op),
    ];

    match role {
        Role::Additive => {
            if neighbours.iter().flatten().any(|op| !op.is_additive()) {
                return Err("this term is part of a product; move it as a factor instead".to_string());
            }
        },
        Role::Multiplicative => {
            for side in [origin, origin.opposite()] {
                if state.side(side).iter().filter_map(Term::op).any(BinOpKind::is_additive) {
                    return Err(format!(
                        "the {} side has terms added together; combine them before multiplying",
                        side,
                    ));
                }
            }
            if let Adjacent::After(_, BinOpKind::Div) = adjacent {
                return Err("this term is being divided; it cannot be moved on its own".to_string());
            }
        },
        Role::Neutral => {},
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::{error::InvalidGesture, options::EngineOptionsBuilder, term::{TermId, TermKind}};

    fn contents(terms: &[Term]) -> Vec<&str> {
        terms.iter().map(|term| term.content.as_str()).collect()
    }

    /// Returns the term with the given content on the given side.
    fn term<'a>(state: &'a EquationState, side: Side, content: &str) -> &'a Term {
        state.side(side).iter().find(|term| term.content == content).unwrap()
    }

    fn drag(state: &EquationState, side: Side, content: &str, options: &EngineOptions) -> Result<Option<Moved>, Error> {
        let gesture = Gesture::for_term(term(state, side, content), true);
        move_across(state, &gesture, options)
    }

    fn strict() -> EngineOptions {
        EngineOptionsBuilder::new().strict_operator_inverse(true).build()
    }

    #[test]
    fn additive_move_appends_subtraction() {
        let state = EquationState::parse("2x + 3 = 5").unwrap();
        let moved = drag(&state, Side::Left, "3", &EngineOptions::default()).unwrap().unwrap();

        assert_eq!(contents(moved.state.left()), vec!["2x"]);
        assert_eq!(contents(moved.state.right()), vec!["5", "-", "3"]);
        assert_eq!(moved.state.left().len(), state.left().len() - 2);
        assert_eq!(moved.state.right().len(), state.right().len() + 2);

        // the inserted value continues the moved block
        let original = term(&state, Side::Left, "3");
        let inserted = &moved.state.right()[2];
        assert_eq!(inserted.id, original.id);
        assert_eq!(inserted.side, Side::Right);
        assert_eq!(inserted.role, Role::Additive);
        assert_eq!(moved.term, *original);
    }

    #[test]
    fn multiplicative_move_prepends_reciprocal() {
        let state = EquationState::parse("x * 4 = 12 * 2").unwrap();
        let moved = drag(&state, Side::Left, "4", &EngineOptions::default()).unwrap().unwrap();

        assert_eq!(contents(moved.state.left()), vec!["x"]);
        assert_eq!(contents(moved.state.right()), vec!["1/4", "*", "12", "*", "2"]);
        assert_eq!(moved.state.right()[0].role, Role::Multiplicative);
        assert_eq!(moved.state.right()[0].kind, TermKind::Number);
    }

    #[test]
    fn first_term_takes_the_following_operator() {
        let state = EquationState::parse("3 + x = 5").unwrap();
        let moved = drag(&state, Side::Left, "3", &EngineOptions::default()).unwrap().unwrap();
        assert_eq!(moved.state.render(), "x = 5 - 3");
    }

    #[test]
    fn move_from_right_to_left() {
        let state = EquationState::parse("x = 5 + 2").unwrap();
        let moved = drag(&state, Side::Right, "2", &EngineOptions::default()).unwrap().unwrap();
        assert_eq!(moved.state.render(), "x - 2 = 5");
    }

    #[test]
    fn lone_term_leaves_identity() {
        let state = EquationState::parse("x = 5").unwrap();
        let moved = drag(&state, Side::Right, "5", &EngineOptions::default()).unwrap().unwrap();
        assert_eq!(moved.state.render(), "x - 5 = 0");

        let gesture = Gesture {
            role: Role::Multiplicative,
            ..Gesture::for_term(term(&state, Side::Right, "5"), true)
        };
        let moved = move_across(&state, &gesture, &EngineOptions::default()).unwrap().unwrap();
        assert_eq!(moved.state.render(), "1/5 * x = 1");
    }

    #[test]
    fn ids_stay_unique() {
        let state = EquationState::parse("2x + 3 = 5").unwrap();
        let moved = drag(&state, Side::Left, "3", &EngineOptions::default()).unwrap().unwrap();
        let mut ids = moved.state.left().iter().chain(moved.state.right()).map(|t| t.id).collect::<Vec<_>>();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn no_crossing_is_a_no_op() {
        let state = EquationState::parse("2x + 3 = 5").unwrap();
        let gesture = Gesture::for_term(term(&state, Side::Left, "3"), false);
        assert_eq!(move_across(&state, &gesture, &EngineOptions::default()).unwrap(), None);
    }

    #[test]
    fn neutral_role_is_a_no_op() {
        let state = EquationState::parse("2x + 3 = 5").unwrap();
        let gesture = Gesture {
            role: Role::Neutral,
            ..Gesture::for_term(term(&state, Side::Left, "3"), true)
        };
        assert_eq!(move_across(&state, &gesture, &EngineOptions::default()).unwrap(), None);
    }

    #[test]
    fn unknown_term_is_an_invalid_gesture() {
        let state = EquationState::parse("2x + 3 = 5").unwrap();
        let gesture = Gesture {
            origin: Side::Right,
            ..Gesture::for_term(term(&state, Side::Left, "3"), true)
        };
        let err = move_across(&state, &gesture, &EngineOptions::default()).unwrap_err();
        assert!(err.is::<InvalidGesture>());

        let gesture = Gesture { term_id: TermId(999), ..gesture };
        assert!(move_across(&state, &gesture, &EngineOptions::default()).unwrap_err().is::<InvalidGesture>());
    }

    #[test]
    fn operators_cannot_be_moved() {
        let state = EquationState::parse("2x + 3 = 5").unwrap();
        let gesture = Gesture {
            role: Role::Additive,
            ..Gesture::for_term(term(&state, Side::Left, "+"), true)
        };
        assert!(move_across(&state, &gesture, &EngineOptions::default()).unwrap_err().is::<InvalidGesture>());
    }

    #[test]
    fn fraction_reciprocal_is_literal_by_default() {
        let state = EquationState::from_contents(&["x", "*", "3/4"], &["6"]).unwrap();
        let moved = drag(&state, Side::Left, "3/4", &EngineOptions::default()).unwrap().unwrap();
        assert_eq!(moved.state.render(), "x = 1/3/4 * 6");
    }

    #[test]
    fn fraction_reciprocal_is_computed_when_strict() {
        let options = EngineOptionsBuilder::new().strict_fraction_inverse(true).build();
        let state = EquationState::from_contents(&["x", "*", "3/4"], &["6"]).unwrap();
        let moved = drag(&state, Side::Left, "3/4", &options).unwrap().unwrap();
        assert_eq!(moved.state.render(), "x = 4/3 * 6");

        let state = EquationState::parse("x * 0 = 6").unwrap();
        assert!(drag(&state, Side::Left, "0", &options).unwrap_err().is::<InvalidGesture>());
    }

    #[test]
    fn strict_operators_flip_subtraction_and_division() {
        let state = EquationState::parse("x - 3 = 5").unwrap();
        assert_eq!(drag(&state, Side::Left, "3", &strict()).unwrap().unwrap().state.render(), "x = 5 + 3");

        let state = EquationState::parse("x / 2 = 5").unwrap();
        assert_eq!(drag(&state, Side::Left, "2", &strict()).unwrap().unwrap().state.render(), "x = 2 * 5");

        // faithful mode ignores the operator
        let state = EquationState::parse("x - 3 = 5").unwrap();
        assert_eq!(
            drag(&state, Side::Left, "3", &EngineOptions::default()).unwrap().unwrap().state.render(),
            "x = 5 - 3",
        );
    }

    #[test]
    fn strict_operators_negate_the_remaining_first_term() {
        let state = EquationState::parse("3 - x = 5").unwrap();
        assert_eq!(drag(&state, Side::Left, "3", &strict()).unwrap().unwrap().state.render(), "-x = 5 - 3");
    }

    #[test]
    fn strict_operators_reject_inexact_moves() {
        // `2` is a factor of `2 * x`, not a separate term
        let state = EquationState::parse("2 * x + 3 = 5").unwrap();
        assert!(drag(&state, Side::Left, "2", &strict()).unwrap_err().is::<InvalidGesture>());

        // dividing only part of a sum
        let state = EquationState::parse("x * 2 = 5 + 1").unwrap();
        assert!(drag(&state, Side::Left, "2", &strict()).unwrap_err().is::<InvalidGesture>());

        // the numerator of a quotient
        let state = EquationState::parse("6 / x = 2").unwrap();
        let gesture = Gesture {
            role: Role::Multiplicative,
            ..Gesture::for_term(term(&state, Side::Left, "6"), true)
        };
        assert!(move_across(&state, &gesture, &strict()).unwrap_err().is::<InvalidGesture>());
    }
}
