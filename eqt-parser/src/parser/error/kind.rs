use ariadne::Fmt;
use eqt_attrs::ErrorKind;
use eqt_error::{ErrorKind, EXPR};

/// The equation has no `=` sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `=` sign",
    labels = ["this needs an `=` sign to be an equation"],
    help = format!("write both sides, for example: {}", "2x + 3 = 5".fg(EXPR)),
)]
pub struct MissingEquals;

/// The equation has more than one `=` sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "too many `=` signs",
    labels = ["the equation is already split here", "so this `=` is not allowed"],
    help = "an equation has exactly one `=` sign separating its two sides",
)]
pub struct ExtraEquals;

/// One of the sides of the equation has no terms.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the {} side of the equation is empty", if self.left { "left" } else { "right" }),
    labels = [format!("add a {} on this side", "term".fg(EXPR))],
)]
pub struct EmptySide {
    /// Whether the empty side is the left side. (Otherwise, it is the right side.)
    pub left: bool,
}

/// Two operands appear next to each other without an operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator between two terms",
    labels = ["this term", "is directly followed by this term"],
    help = format!(
        "put one of {} between them; a coefficient must touch its variable, as in {}",
        "+ - * /".fg(EXPR),
        "2x".fg(EXPR),
    ),
)]
pub struct ConsecutiveOperands;

/// Two operators appear next to each other without an operand between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing term between two operators",
    labels = ["this operator", "is directly followed by this operator"],
    help = format!("add a {} between them, or remove one of the operators", "term".fg(EXPR)),
)]
pub struct ConsecutiveOperators;

/// An operator is the first or last token of a side, so it is missing an operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if self.leading {
        "operator at the start of a side"
    } else {
        "operator at the end of a side"
    },
    labels = [if self.leading {
        "there is no term before this operator"
    } else {
        "there is no term after this operator"
    }],
    help = if self.leading {
        "only `-` may start a side, to write a negative term"
    } else {
        "add a term after this operator, or remove it"
    },
)]
pub struct DanglingOperator {
    /// Whether the operator is at the start of the side. (Otherwise, it is at the end.)
    pub leading: bool,
}

/// A character that is not part of the equation grammar.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected symbol `{}`", self.symbol),
    labels = ["I do not understand this symbol"],
    help = format!(
        "equations may only contain numbers, single-letter variables, {} and one {}",
        "+ - * /".fg(EXPR),
        "=".fg(EXPR),
    ),
)]
pub struct UnexpectedSymbol {
    /// The symbol that was found.
    pub symbol: String,
}
