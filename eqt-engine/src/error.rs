//! Errors produced by the engine.
//!
//! The spans of these errors point into the rendered equation (see
//! [`EquationState::span_of`](crate::EquationState::span_of)), so the report can underline the
//! block the student touched.

use ariadne::Fmt;
use eqt_attrs::ErrorKind;
use eqt_error::{ErrorKind, EXPR};

/// The gesture refers to a term that is not on the stated side, or to a term that cannot be
/// dragged in that way.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "this block cannot be moved like that",
    labels = [self.reason.clone()],
)]
pub struct InvalidGesture {
    /// Why the gesture was rejected.
    pub reason: String,
}

/// The clicked operator cannot be resolved into a single term.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot resolve the `{}` operator", self.op),
    labels = [self.reason.clone()],
    help = "an operator can be resolved when both of its neighbours are numbers, or a number and a variable being multiplied",
    note = "operators are resolved one at a time, in any order you choose",
)]
pub struct UnresolvableOperator {
    /// The symbol of the operator.
    pub op: String,

    /// Why the operator could not be resolved.
    pub reason: String,
}

/// The clicked term is not a coefficient-variable product.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be expanded", self.content),
    labels = ["this term"],
    help = format!("only a number written directly before a variable, like {}, can be expanded", "2x".fg(EXPR)),
)]
pub struct NotExpandable {
    /// The content of the clicked term.
    pub content: String,
}

/// A side built from explicit terms is not a proper infix sequence.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the {} side of the equation is malformed", self.side),
    labels = [self.reason.clone()],
    help = "a side must alternate between terms and operators, starting and ending with a term",
)]
pub struct MalformedSide {
    /// The name of the malformed side.
    pub side: &'static str,

    /// What is wrong with the side.
    pub reason: String,
}
