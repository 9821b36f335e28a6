//! Arithmetic on term contents.
//!
//! Terms store their values as text, exactly as they are displayed on the blocks. The functions
//! here parse that text, combine values under an operator, and format the result back into text.
//!
//! The four operators do not treat their operands the same way:
//!
//! - `+` and `-` work on plain integers and decimals,
//! - `*` treats both operands as fractions and reduces the product to lowest terms,
//! - `/` is a plain quotient, with no fraction reduction.

pub mod fraction;

use crate::term::TermKind;
use eqt_parser::parser::{product::{bare_variable, ImplicitProduct}, token::op::BinOpKind};
pub use fraction::Fraction;
use std::fmt;

/// The content given to the result of a degenerate computation, such as a division by zero.
///
/// The sentinel is rendered like any other value, but it cannot take part in further
/// computations.
pub const UNDEFINED: &str = "undefined";

/// Returns true if the content is the [`UNDEFINED`] sentinel.
pub fn is_undefined(content: &str) -> bool {
    content == UNDEFINED
}

/// The content and kind of a computed term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined {
    pub content: String,
    pub kind: TermKind,
}

impl Combined {
    fn number(content: impl Into<String>) -> Self {
        Self { content: content.into(), kind: TermKind::Number }
    }

    fn undefined() -> Self {
        Self::number(UNDEFINED)
    }
}

/// The reason two operands could not be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotComputable {
    /// One of the operands is the [`UNDEFINED`] sentinel.
    Undefined,

    /// One of the operands is a variable, and the operator cannot combine it.
    Variable,

    /// Both operands are variables being multiplied.
    Nonlinear,

    /// The result does not fit in the range of supported numbers.
    Overflow,
}

impl fmt::Display for NotComputable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Undefined => "one of these values is undefined",
            Self::Variable => "a variable cannot be combined with this operator",
            Self::Nonlinear => "multiplying two variables is not supported",
            Self::Overflow => "the result is too large",
        })
    }
}

/// A plain integer or decimal value, used by `+`, `-` and `/`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Plain {
    Int(i64),
    Real(f64),
}

impl Plain {
    fn parse(content: &str) -> Result<Self, NotComputable> {
        if let Ok(n) = content.parse::<i64>() {
            return Ok(Self::Int(n));
        }

        match Fraction::parse(content) {
            Some(frac) if frac.is_degenerate() => Err(NotComputable::Undefined),
            Some(frac) if frac.is_integer() => Ok(Self::Int(frac.numer / frac.denom)),
            Some(frac) => Ok(Self::Real(frac.to_f64())),
            None => match parse_real(content) {
                Some(n) if n.is_finite() => Ok(Self::Real(n)),
                Some(_) => Err(NotComputable::Undefined),
                None => Err(NotComputable::Variable),
            },
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Real(n) => n,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Real(n) => n == 0.0,
        }
    }

    fn format(self, precision: usize) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Real(n) => format_decimal(n, precision),
        }
    }
}

/// A factor of a product, used by `*`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Factor<'a> {
    /// A plain number, as a fraction.
    Number(Fraction),

    /// A coefficient times a variable: `x` is `1 * x`, `-x` is `-1 * x`, `2x` is `2 * x`.
    Product(Fraction, &'a str),
}

impl<'a> Factor<'a> {
    fn parse(content: &'a str) -> Option<Self> {
        if let Some(frac) = Fraction::parse(content) {
            return Some(Self::Number(frac));
        }

        if let Some((negative, name)) = bare_variable(content) {
            let coefficient = if negative { -1 } else { 1 };
            return Some(Self::Product(Fraction::integer(coefficient), name));
        }

        let product = ImplicitProduct::split(content)?;
        Some(Self::Product(Fraction::parse(product.coefficient)?, product.variable))
    }

    /// Like [`Factor::parse`], but tells a number too large for a fraction apart from a variable.
    fn parse_or_reason(content: &'a str) -> Result<Self, NotComputable> {
        Self::parse(content).ok_or_else(|| {
            let number = ImplicitProduct::split(content).map_or(content, |product| product.coefficient);
            match parse_real(number) {
                Some(_) => NotComputable::Overflow,
                None => NotComputable::Variable,
            }
        })
    }
}

/// Reads numeric content that does not fit in a [`Fraction`] as a float, with `/` applied left to
/// right. Returns [`None`] if the content is not made of decimal literals.
fn parse_real(content: &str) -> Option<f64> {
    let mut parts = content.split('/').map(|part| {
        let digits = part.strip_prefix('-').unwrap_or(part);
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let literal = !whole.is_empty()
            && whole.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b.is_ascii_digit())
            && !(digits.contains('.') && frac.is_empty());
        if literal { part.parse::<f64>().ok() } else { None }
    });
    let first = parts.next()??;
    parts.try_fold(first, |acc, part| Some(acc / part?))
}

/// Formats a decimal with at most `precision` fractional digits, trimming trailing zeros.
/// Non-finite values become the [`UNDEFINED`] sentinel.
pub fn format_decimal(n: f64, precision: usize) -> String {
    if !n.is_finite() {
        return UNDEFINED.to_string();
    }

    let formatted = format!("{:.*}", precision, n);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        &formatted
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Combines the contents of two operands under the given operator.
///
/// Division by zero, and products involving a zero denominator, are not errors: they produce the
/// [`UNDEFINED`] sentinel so the side can still be displayed. Any later computation involving the
/// sentinel fails with [`NotComputable::Undefined`].
pub fn combine(
    lhs: &str,
    op: BinOpKind,
    rhs: &str,
    precision: usize,
) -> Result<Combined, NotComputable> {
    if is_undefined(lhs) || is_undefined(rhs) {
        return Err(NotComputable::Undefined);
    }

    match op {
        BinOpKind::Add | BinOpKind::Sub => add_sub(lhs, op, rhs, precision),
        BinOpKind::Mul => multiply(lhs, rhs),
        BinOpKind::Div => divide(lhs, rhs, precision),
    }
}

/// Numeric sum or difference. Integers are combined exactly; anything else as a decimal.
fn add_sub(lhs: &str, op: BinOpKind, rhs: &str, precision: usize) -> Result<Combined, NotComputable> {
    let (lhs, rhs) = (Plain::parse(lhs)?, Plain::parse(rhs)?);
    let result = match (lhs, rhs) {
        (Plain::Int(a), Plain::Int(b)) => {
            let exact = if op == BinOpKind::Add { a.checked_add(b) } else { a.checked_sub(b) };
            exact.map(Plain::Int)
                .unwrap_or_else(|| Plain::Real(apply_real(a as f64, op, b as f64)))
        },
        _ => Plain::Real(apply_real(lhs.to_f64(), op, rhs.to_f64())),
    };
    Ok(Combined::number(result.format(precision)))
}

fn apply_real(a: f64, op: BinOpKind, b: f64) -> f64 {
    match op {
        BinOpKind::Add => a + b,
        BinOpKind::Sub => a - b,
        BinOpKind::Mul => a * b,
        BinOpKind::Div => a / b,
    }
}

/// Product of two fractions, reduced by their greatest common divisor. A number times a variable
/// gives a coefficient-variable product, such as `2x`.
fn multiply(lhs: &str, rhs: &str) -> Result<Combined, NotComputable> {
    let lhs = Factor::parse_or_reason(lhs)?;
    let rhs = Factor::parse_or_reason(rhs)?;

    match (lhs, rhs) {
        (Factor::Number(a), Factor::Number(b)) => {
            if a.is_degenerate() || b.is_degenerate() {
                return Ok(Combined::undefined());
            }
            let product = a.checked_mul(b).ok_or(NotComputable::Overflow)?.reduce();
            Ok(Combined::number(product.to_string()))
        },
        (Factor::Number(a), Factor::Product(coefficient, name))
        | (Factor::Product(coefficient, name), Factor::Number(a)) => {
            if a.is_degenerate() || coefficient.is_degenerate() {
                return Ok(Combined::undefined());
            }
            let coefficient = a.checked_mul(coefficient).ok_or(NotComputable::Overflow)?.reduce();
            Ok(coefficient_product(coefficient, name))
        },
        (Factor::Product(..), Factor::Product(..)) => Err(NotComputable::Nonlinear),
    }
}

/// Writes a reduced coefficient in front of a variable. A coefficient of 1 or -1 leaves a bare
/// variable, and a coefficient of 0 leaves 0.
fn coefficient_product(coefficient: Fraction, name: &str) -> Combined {
    match (coefficient.numer, coefficient.denom) {
        (0, _) => Combined::number("0"),
        (1, 1) => Combined { content: name.to_string(), kind: TermKind::Variable },
        (-1, 1) => Combined { content: format!("-{name}"), kind: TermKind::Variable },
        _ => Combined::number(format!("{coefficient}{name}")),
    }
}

/// Plain numeric quotient. Exact when both operands are integers and the division is even;
/// otherwise a decimal.
fn divide(lhs: &str, rhs: &str, precision: usize) -> Result<Combined, NotComputable> {
    let (lhs, rhs) = (Plain::parse(lhs)?, Plain::parse(rhs)?);
    if rhs.is_zero() {
        return Ok(Combined::undefined());
    }

    let result = match (lhs, rhs) {
        (Plain::Int(a), Plain::Int(b)) if a.checked_rem(b) == Some(0) => {
            a.checked_div(b).map(Plain::Int).ok_or(NotComputable::Overflow)?
        },
        _ => Plain::Real(lhs.to_f64() / rhs.to_f64()),
    };
    Ok(Combined::number(result.format(precision)))
}

/// Returns the content of the multiplicative inverse of the given content.
///
/// When `strict` is false, the inverse is the literal text `1/<content>`, even if the content is
/// already a fraction: the inverse of `3/4` is written `1/3/4`. When `strict` is true, the content
/// must be a non-zero number, and the inverse is computed and reduced: the inverse of `3/4` is
/// `4/3`. Returns [`None`] in strict mode if the content has no numeric inverse.
pub fn reciprocal(content: &str, strict: bool) -> Option<String> {
    if !strict {
        return Some(format!("1/{content}"));
    }

    let frac = Fraction::parse(content)?;
    if frac.numer == 0 || frac.is_degenerate() {
        return None;
    }
    Some(frac.recip().reduce().to_string())
}

/// Returns the content of the additive inverse of the given content: `3` becomes `-3`, and `-x`
/// becomes `x`.
pub fn negate(content: &str) -> String {
    match content.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None if content == "0" => content.to_string(),
        None => format!("-{content}"),
    }
}

/// Splits a coefficient-variable product into the contents of its coefficient and variable.
pub fn split_product(content: &str) -> Option<(String, String)> {
    let product = ImplicitProduct::split(content)?;
    Some((product.coefficient.to_string(), product.variable.to_string()))
}
