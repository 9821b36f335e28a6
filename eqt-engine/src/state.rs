//! The [`EquationState`]: both sides of the equation, as sequences of [`Term`]s.

use crate::{
    error::MalformedSide,
    term::{Role, Side, Term, TermId, TermKind},
};
use eqt_error::Error;
use eqt_parser::parser::{ast::{Item, OperandKind, SideExpr}, product::bare_variable, Parser};
use std::{fmt, ops::Range};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest term identity [`EquationState::from_sides`] accepts. Identities above it are left
/// for the terms that transformations create.
pub const LARGEST_ID: u64 = u64::MAX / 2;

/// A snapshot of the equation being solved.
///
/// Each side is an infix sequence of terms: operand, operator, operand, ..., starting and ending
/// with an operand. The equals sign is not stored; it is implied between the two sides.
///
/// An [`EquationState`] is never modified once built. Every transformation produces a new state,
/// which the [`Session`](crate::Session) swaps in for the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquationState {
    left: Vec<Term>,
    right: Vec<Term>,

    /// The identity to give to the next term created in a state derived from this one.
    next_id: u64,
}

impl EquationState {
    /// Parses an equation string into a new state.
    ///
    /// Each number and variable gets a role from the operator directly before it: additive after
    /// `+`, `-` or at the start of a side, multiplicative after `*` or `/`.
    pub fn parse(source: &str) -> Result<Self, Vec<Error>> {
        let equation = Parser::new(source).try_parse_equation()?;

        let mut next_id = 1;
        let left = terms_from_ast(&equation.lhs, Side::Left, &mut next_id);
        let right = terms_from_ast(&equation.rhs, Side::Right, &mut next_id);
        debug!(source, left = left.len(), right = right.len(), "parsed equation");

        Ok(Self { left, right, next_id })
    }

    /// Builds a state from explicit terms.
    ///
    /// The terms are restamped with the side they are placed on. Both sides must be proper infix
    /// sequences, and term identities must be unique across the whole equation and no larger than
    /// [`LARGEST_ID`].
    pub fn from_sides(left: Vec<Term>, right: Vec<Term>) -> Result<Self, Error> {
        let left = left.into_iter().map(|term| term.on(Side::Left)).collect::<Vec<_>>();
        let right = right.into_iter().map(|term| term.on(Side::Right)).collect::<Vec<_>>();
        let largest = left.iter().chain(&right).map(|term| term.id.0).max().unwrap_or(0);

        let mut state = Self { left, right, next_id: 0 };
        state.validate()?;

        if largest > LARGEST_ID {
            let side = if state.left.iter().any(|term| term.id.0 == largest) { Side::Left } else { Side::Right };
            return Err(Error::new(vec![state.side_span(side)], MalformedSide {
                side: side.name(),
                reason: "term identities are exhausted".to_string(),
            }));
        }
        state.next_id = largest + 1;

        let mut ids = state.left.iter().chain(&state.right).map(|term| term.id).collect::<Vec<_>>();
        ids.sort();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            let reason = format!("the identity {} is used more than once", pair[0]);
            let side = if state.left.iter().any(|term| term.id == pair[0]) { Side::Left } else { Side::Right };
            return Err(Error::new(vec![state.side_span(side)], MalformedSide {
                side: side.name(),
                reason,
            }));
        }

        Ok(state)
    }

    /// Builds a state from the text of each block, assigning identities and roles the same way
    /// [`EquationState::parse`] does.
    ///
    /// This accepts contents the equation grammar cannot express as a single block, such as the
    /// fraction `2/3`.
    pub fn from_contents(left: &[&str], right: &[&str]) -> Result<Self, Error> {
        let mut next_id = 1;
        let left = terms_from_contents(left, &mut next_id);
        let right = terms_from_contents(right, &mut next_id);
        Self::from_sides(left, right)
    }

    /// Returns the terms of the given side.
    pub fn side(&self, side: Side) -> &[Term] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns the terms of the left side.
    pub fn left(&self) -> &[Term] {
        &self.left
    }

    /// Returns the terms of the right side.
    pub fn right(&self) -> &[Term] {
        &self.right
    }

    /// Returns the position and term with the given identity on the given side.
    pub fn find(&self, side: Side, id: TermId) -> Option<(usize, &Term)> {
        self.side(side).iter().enumerate().find(|(_, term)| term.id == id)
    }

    /// Returns every block of the equation in display order, with an equals marker between the
    /// two sides.
    pub fn blocks(&self) -> Vec<Term> {
        let equals = Term::equals(TermId(0));
        self.left.iter()
            .cloned()
            .chain(std::iter::once(equals))
            .chain(self.right.iter().cloned())
            .collect()
    }

    /// Renders the equation: each side's term contents joined with single spaces, and the sides
    /// joined with `" = "`.
    pub fn render(&self) -> String {
        format!("{} = {}", render_side(&self.left), render_side(&self.right))
    }

    /// Returns the byte range of the given term within [`EquationState::render`].
    pub fn span_of(&self, side: Side, id: TermId) -> Option<Range<usize>> {
        let (index, term) = self.find(side, id)?;
        let start = self.side_offset(side)
            + self.side(side)[..index].iter().map(|term| term.content.len() + 1).sum::<usize>();
        Some(start..start + term.content.len())
    }

    /// Returns the byte range of a whole side within [`EquationState::render`].
    pub fn side_span(&self, side: Side) -> Range<usize> {
        let start = self.side_offset(side);
        start..start + render_side(self.side(side)).len()
    }

    fn side_offset(&self, side: Side) -> usize {
        match side {
            Side::Left => 0,
            Side::Right => render_side(&self.left).len() + " = ".len(),
        }
    }

    /// Returns true if the equation is solved: one side is a lone variable with no coefficient,
    /// and the other side a lone number.
    pub fn is_solved(&self) -> bool {
        let lone = |terms: &[Term]| match terms {
            [term] => Some(term.clone()),
            _ => None,
        };
        let (Some(left), Some(right)) = (lone(&self.left), lone(&self.right)) else {
            return false;
        };
        let solved = |var: &Term, value: &Term| {
            var.kind == TermKind::Variable
                && bare_variable(&var.content).is_some_and(|(negative, _)| !negative)
                && value.kind == TermKind::Number
                && !crate::arith::is_undefined(&value.content)
        };
        solved(&left, &right) || solved(&right, &left)
    }

    /// Returns a new state with the given side replaced.
    ///
    /// The replacement is validated before it is accepted, so a transformation can never leave
    /// behind a malformed equation.
    pub(crate) fn with_side(&self, side: Side, terms: Vec<Term>) -> Result<Self, Error> {
        let terms = terms.into_iter().map(|term| term.on(side)).collect();
        let mut state = self.clone();
        match side {
            Side::Left => state.left = terms,
            Side::Right => state.right = terms,
        }
        state.validate()?;
        Ok(state)
    }

    /// Reserves a fresh identity for a term created by a transformation of this state.
    pub(crate) fn fresh_id(&mut self) -> TermId {
        let id = TermId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Checks that both sides are proper infix sequences.
    fn validate(&self) -> Result<(), Error> {
        for side in [Side::Left, Side::Right] {
            if let Err(reason) = check_infix(self.side(side)) {
                return Err(Error::new(vec![self.side_span(side)], MalformedSide {
                    side: side.name(),
                    reason,
                }));
            }
        }
        Ok(())
    }
}

impl fmt::Display for EquationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_side(terms: &[Term]) -> String {
    terms.iter().map(|term| term.content.as_str()).collect::<Vec<_>>().join(" ")
}

/// Checks that the terms alternate between operands and operators, starting and ending with an
/// operand.
fn check_infix(terms: &[Term]) -> Result<(), String> {
    if terms.is_empty() {
        return Err("this side has no terms".to_string());
    }

    for (i, term) in terms.iter().enumerate() {
        let expect_operand = i % 2 == 0;
        match term.kind {
            TermKind::Equals => return Err("an `=` sign cannot appear inside a side".to_string()),
            TermKind::Operator if expect_operand => {
                return Err(format!("expected a term in position {}, found `{}`", i + 1, term.content));
            },
            TermKind::Operator if term.op().is_none() => {
                return Err(format!("`{}` is not an operator", term.content));
            },
            TermKind::Number | TermKind::Variable if !expect_operand => {
                return Err(format!("expected an operator in position {}, found `{}`", i + 1, term.content));
            },
            _ => {},
        }
    }

    if terms.len() % 2 == 0 {
        return Err("this side ends with an operator".to_string());
    }
    Ok(())
}

/// Gives each operand the role implied by the operator before it.
pub(crate) fn assign_roles(terms: &mut [Term]) {
    let mut prev_op = None;
    for term in terms {
        if term.is_operand() {
            term.role = Role::after(prev_op);
        } else {
            term.role = Role::Neutral;
            prev_op = term.op();
        }
    }
}

fn next(next_id: &mut u64) -> TermId {
    let id = TermId(*next_id);
    *next_id += 1;
    id
}

fn terms_from_ast(expr: &SideExpr, side: Side, next_id: &mut u64) -> Vec<Term> {
    let mut terms = expr.items.iter()
        .map(|item| match item {
            Item::Operand(operand) => {
                let kind = match operand.kind {
                    OperandKind::Number => TermKind::Number,
                    OperandKind::Variable => TermKind::Variable,
                };
                Term::new(next(next_id), kind, operand.lexeme.clone())
            },
            Item::Operator(op) => Term::operator(next(next_id), op.kind),
        }.on(side))
        .collect::<Vec<_>>();
    assign_roles(&mut terms);
    terms
}

fn terms_from_contents(contents: &[&str], next_id: &mut u64) -> Vec<Term> {
    let mut terms = contents.iter()
        .map(|content| {
            let kind = if eqt_parser::parser::token::op::BinOpKind::from_symbol(content).is_some() {
                TermKind::Operator
            } else if content.chars().any(|c| c.is_ascii_alphabetic()) && !crate::arith::is_undefined(content) {
                TermKind::Variable
            } else {
                TermKind::Number
            };
            Term::new(next(next_id), kind, *content)
        })
        .collect::<Vec<_>>();
    assign_roles(&mut terms);
    terms
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::error::MalformedSide;

    fn contents(terms: &[Term]) -> Vec<&str> {
        terms.iter().map(|term| term.content.as_str()).collect()
    }

    #[test]
    fn parse_and_render_round_trip() {
        for (source, normalized) in [
            ("2x + 3 = 5", "2x + 3 = 5"),
            ("2x+3=5", "2x + 3 = 5"),
            ("  x =   7 +3 ", "x = 7 + 3"),
            ("-3 * x / 4 = -2", "-3 * x / 4 = -2"),
            ("1.5x - 0.5 = 4", "1.5x - 0.5 = 4"),
        ] {
            let state = EquationState::parse(source).unwrap();
            assert_eq!(state.render(), normalized);
            assert_eq!(state.to_string(), normalized);
        }
    }

    #[test]
    fn parse_assigns_kinds_sides_and_roles() {
        let state = EquationState::parse("2x + 3 = 5 * 4").unwrap();

        let kinds = state.blocks().iter().map(|term| term.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TermKind::Variable,
            TermKind::Operator,
            TermKind::Number,
            TermKind::Equals,
            TermKind::Number,
            TermKind::Operator,
            TermKind::Number,
        ]);

        let roles = state.left().iter().chain(state.right()).map(|term| term.role).collect::<Vec<_>>();
        assert_eq!(roles, vec![
            Role::Additive,
            Role::Neutral,
            Role::Additive,
            Role::Additive,
            Role::Neutral,
            Role::Multiplicative,
        ]);

        assert!(state.left().iter().all(|term| term.side == Side::Left));
        assert!(state.right().iter().all(|term| term.side == Side::Right));
    }

    #[test]
    fn parse_gives_unique_ids() {
        let state = EquationState::parse("x + 1 - 2 = 3 / 4").unwrap();
        let mut ids = state.left().iter().chain(state.right()).map(|term| term.id).collect::<Vec<_>>();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn parse_errors_are_returned() {
        let errors = EquationState::parse("x + = ").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn span_of_points_into_render() {
        let state = EquationState::parse("2x + 3 = 5 - 3").unwrap();
        let rendered = state.render();
        for side in [Side::Left, Side::Right] {
            for term in state.side(side) {
                let span = state.span_of(side, term.id).unwrap();
                assert_eq!(&rendered[span], term.content);
            }
        }
        assert_eq!(&rendered[state.side_span(Side::Right)], "5 - 3");

        let first = state.left()[0].id;
        assert_eq!(state.span_of(Side::Right, first), None);
    }

    #[test]
    fn from_contents_accepts_fractions() {
        let state = EquationState::from_contents(&["2/3", "*", "3/4"], &["x"]).unwrap();
        assert_eq!(contents(state.left()), vec!["2/3", "*", "3/4"]);
        assert_eq!(state.left()[0].kind, TermKind::Number);
        assert_eq!(state.left()[2].role, Role::Multiplicative);
        assert_eq!(state.right()[0].kind, TermKind::Variable);
        assert_eq!(state.render(), "2/3 * 3/4 = x");
    }

    #[test]
    fn from_sides_rejects_malformed_sides() {
        for (left, right) in [
            (vec!["+", "2"], vec!["x"]),
            (vec!["2", "+"], vec!["x"]),
            (vec!["2", "3"], vec!["x"]),
            (vec!["2", "+", "*", "3"], vec!["x"]),
            (vec!["2"], vec![]),
        ] {
            let err = EquationState::from_contents(&left, &right).unwrap_err();
            assert!(err.is::<MalformedSide>(), "{left:?} = {right:?}");
        }
    }

    #[test]
    fn from_sides_rejects_duplicate_ids() {
        let err = EquationState::from_sides(
            vec![Term::variable(TermId(1), "x")],
            vec![Term::number(TermId(1), "4")],
        ).unwrap_err();
        assert!(err.is::<MalformedSide>());
    }

    #[test]
    fn from_sides_rejects_exhausted_ids() {
        let err = EquationState::from_sides(
            vec![Term::variable(TermId(u64::MAX), "x")],
            vec![Term::number(TermId(1), "4")],
        ).unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(err.downcast_ref::<MalformedSide>().unwrap().reason, "term identities are exhausted");

        let mut state = EquationState::from_sides(
            vec![Term::variable(TermId(LARGEST_ID), "x")],
            vec![Term::number(TermId(1), "4")],
        ).unwrap();
        assert_eq!(state.fresh_id(), TermId(LARGEST_ID + 1));
    }

    #[test]
    fn from_sides_rejects_equals_inside_a_side() {
        let err = EquationState::from_sides(
            vec![Term::variable(TermId(1), "x")],
            vec![Term::equals(TermId(2))],
        ).unwrap_err();
        assert!(err.is::<MalformedSide>());
    }

    #[test]
    fn solved_equations() {
        assert!(EquationState::parse("x = 4").unwrap().is_solved());
        assert!(EquationState::parse("-2.5 = y").unwrap().is_solved());
        assert!(!EquationState::parse("2x = 4").unwrap().is_solved());
        assert!(!EquationState::parse("-x = 4").unwrap().is_solved());
        assert!(!EquationState::parse("x = 4 + 1").unwrap().is_solved());
        assert!(!EquationState::parse("x = y").unwrap().is_solved());
    }

    #[test]
    fn fresh_ids_do_not_collide() {
        let mut state = EquationState::parse("x = 4").unwrap();
        let existing = state.left()[0].id.max(state.right()[0].id);
        let fresh = state.fresh_id();
        assert!(fresh > existing);
        assert!(state.fresh_id() > fresh);
    }
}
