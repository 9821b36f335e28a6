//! Options controlling how the engine transforms equations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how the transformation rules behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineOptions {
    /// How to write the reciprocal of a term moved across the equals sign with a multiplicative
    /// role.
    ///
    /// When `false` (the default), the reciprocal is the literal text `1/<value>`, even if the
    /// value is already a fraction: moving `3/4` inserts `1/3/4`. When `true`, the reciprocal is
    /// computed and reduced, so moving `3/4` inserts `4/3`; terms with no numeric reciprocal (zero,
    /// or anything containing a variable) then cannot be moved multiplicatively.
    pub strict_fraction_inverse: bool,

    /// Whether the inverse inserted by a move takes the operator next to the moved term into
    /// account.
    ///
    /// When `false` (the default), an additive move always inserts `- value` and a multiplicative
    /// move always inserts `1/value *`, whatever operator preceded the term. When `true`, a term
    /// that was subtracted is added to the other side (`x - 3 = 5` becomes `x = 5 + 3`), and a term
    /// that was a divisor multiplies the other side (`x / 2 = 5` becomes `x = 2 * 5`).
    pub strict_operator_inverse: bool,

    /// The maximum number of fractional digits shown when a sum, difference or quotient is not a
    /// whole number. Trailing zeros are always trimmed.
    pub decimal_precision: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict_fraction_inverse: false,
            strict_operator_inverse: false,
            decimal_precision: 6,
        }
    }
}

impl EngineOptions {
    /// Wraps the given [`EngineOptions`] into a builder for further customization.
    pub fn into_builder(self) -> EngineOptionsBuilder {
        EngineOptionsBuilder(self)
    }
}

/// A builder for [`EngineOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptionsBuilder(EngineOptions);

impl EngineOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the reciprocal of a moved fraction is computed. See
    /// [`EngineOptions::strict_fraction_inverse`] for more information.
    pub fn strict_fraction_inverse(mut self, strict: bool) -> Self {
        self.0.strict_fraction_inverse = strict;
        self
    }

    /// Sets whether the inverse of a moved term depends on its neighbouring operator. See
    /// [`EngineOptions::strict_operator_inverse`] for more information.
    pub fn strict_operator_inverse(mut self, strict: bool) -> Self {
        self.0.strict_operator_inverse = strict;
        self
    }

    /// Sets the maximum number of fractional digits shown for decimal results.
    pub fn decimal_precision(mut self, precision: usize) -> Self {
        self.0.decimal_precision = precision;
        self
    }

    /// Builds the [`EngineOptions`] struct.
    pub fn build(self) -> EngineOptions {
        self.0
    }
}
