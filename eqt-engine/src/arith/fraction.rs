//! Tools to help manipulate fractions.

use num_integer::Integer;
use std::fmt;

/// The largest number of fractional digits a decimal can have and still be converted to an exact
/// fraction with an `i64` denominator.
const MAX_DECIMAL_DIGITS: usize = 18;

/// A fraction with integer numerator and denominator.
///
/// The denominator is allowed to be zero, since a student can write (or move) a block like
/// `1/0`. Such a fraction is not a number; any arithmetic involving it is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numer: i64,
    pub denom: i64,
}

impl Fraction {
    /// Creates a fraction without reducing it.
    pub fn new(numer: i64, denom: i64) -> Self {
        Self { numer, denom }
    }

    /// Creates the fraction `n/1`.
    pub fn integer(n: i64) -> Self {
        Self::new(n, 1)
    }

    /// Parses term content as a fraction.
    ///
    /// - `"n"` parses as `n/1`
    /// - `"1.25"` parses exactly, as `125/100`
    /// - `"a/b"` parses as `a/b`, where `a` and `b` may themselves be decimals
    /// - `"a/b/c"` parses left to right, as `(a/b)/c`
    ///
    /// Returns [`None`] for anything else, including variables.
    pub fn parse(content: &str) -> Option<Self> {
        let mut parts = content.split('/');
        let first = parse_decimal(parts.next()?)?;
        parts.try_fold(first, |acc, part| {
            let divisor = parse_decimal(part)?;
            Some(acc.checked_mul(divisor.recip())?)
        })
    }

    /// Returns true if the denominator is zero.
    pub fn is_degenerate(self) -> bool {
        self.denom == 0
    }

    /// Returns true if the fraction is a whole number once reduced.
    pub fn is_integer(self) -> bool {
        !self.is_degenerate() && self.numer % self.denom == 0
    }

    /// Reduces the fraction to lowest terms by dividing out the greatest common divisor of the
    /// numerator and denominator. The sign is carried by the numerator.
    ///
    /// `6/12` becomes `1/2`, `4/-6` becomes `-2/3`. Degenerate fractions are returned unchanged.
    pub fn reduce(self) -> Self {
        if self.is_degenerate() {
            return self;
        }

        let gcd = self.numer.gcd(&self.denom);
        let (mut numer, mut denom) = (self.numer / gcd, self.denom / gcd);
        if denom < 0 {
            numer = -numer;
            denom = -denom;
        }
        Self { numer, denom }
    }

    /// Returns the reciprocal of the fraction, with the sign moved to the numerator.
    pub fn recip(self) -> Self {
        let (numer, denom) = (self.denom, self.numer);
        if denom < 0 {
            Self::new(-numer, -denom)
        } else {
            Self::new(numer, denom)
        }
    }

    /// Multiplies numerators and denominators independently, without reducing. Returns [`None`]
    /// on overflow.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.numer.checked_mul(other.numer)?,
            self.denom.checked_mul(other.denom)?,
        ))
    }

    /// Returns the value of the fraction as a float. Degenerate fractions are not finite.
    pub fn to_f64(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl fmt::Display for Fraction {
    /// Formats the fraction as `num/den`, or as a bare integer if the denominator is 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Parses a signed integer or decimal literal into an exact fraction with a power-of-ten
/// denominator.
fn parse_decimal(content: &str) -> Option<Fraction> {
    let (negative, digits) = match content.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, content),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
        || frac.len() > MAX_DECIMAL_DIGITS
        || (digits.contains('.') && frac.is_empty())
    {
        return None;
    }

    let denom = 10i64.checked_pow(frac.len() as u32)?;
    let numer = format!("{whole}{frac}").parse::<i64>().ok()?;
    let numer = if negative { -numer } else { numer };
    Some(Fraction::new(numer, denom))
}
