//! Recognizes implicit coefficient-variable products, such as `2x`, `-3y` or `1/2x`.

use crate::tokenizer::{tokenize_complete, TokenKind};

/// A number written directly in front of a variable, with no operator or whitespace between
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplicitProduct<'source> {
    /// The coefficient, including its sign and an optional `/denominator`: `2`, `-3`, `1/2`.
    pub coefficient: &'source str,

    /// The variable symbol.
    pub variable: &'source str,
}

impl<'source> ImplicitProduct<'source> {
    /// Splits the given term content into its coefficient and variable. Returns [`None`] if the
    /// content is not exactly a number followed by a variable.
    pub fn split(content: &'source str) -> Option<Self> {
        let tokens = tokenize_complete(content);
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();

        let coefficient_kinds: &[TokenKind] = match kinds.as_slice() {
            [rest @ .., TokenKind::Name] => rest,
            _ => return None,
        };
        let coefficient_kinds = coefficient_kinds.strip_prefix(&[TokenKind::Sub]).unwrap_or(coefficient_kinds);
        match coefficient_kinds {
            [TokenKind::Number] | [TokenKind::Number, TokenKind::Div, TokenKind::Number] => {},
            _ => return None,
        }

        let name = tokens.last()?;
        Some(Self {
            coefficient: &content[..name.span.start],
            variable: name.lexeme,
        })
    }
}

/// Returns the variable symbol of the given content, if the content is a lone variable,
/// optionally negated (`x`, `-x`).
pub fn bare_variable(content: &str) -> Option<(bool, &str)> {
    match content.strip_prefix('-') {
        Some(rest) => single_name(rest).map(|name| (true, name)),
        None => single_name(content).map(|name| (false, name)),
    }
}

fn single_name(content: &str) -> Option<&str> {
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(content),
        _ => None,
    }
}
