pub mod ast;
pub mod error;
pub mod product;
pub mod token;

use ast::{Equation, Item, Operand, OperandKind, SideExpr};
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use token::op::BinOp;

/// A high-level parser for equations. This is the type to use to turn the text of an equation
/// into an [`Equation`].
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns a span covering the whole source code.
    fn full_span(&self) -> Range<usize> {
        self.tokens.first().map_or(0, |token| token.span.start)..self.eof_span().end
    }

    /// Returns the current token without moving the cursor. Whitespace tokens are skipped.
    /// Returns [`None`] if the cursor is at the end of the stream.
    pub fn current_token(&mut self) -> Option<&Token<'source>> {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
        self.tokens.get(self.cursor)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        let token = self.current_token()?.clone();
        self.cursor += 1;
        Some(token)
    }

    /// Returns the token directly at the cursor, **without** skipping whitespace.
    fn adjacent_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Parses the whole source as an equation. All the tokens must be consumed.
    ///
    /// Parsing does not stop at the first problem: every error that can be found is collected
    /// and returned, so the student can fix them all at once.
    pub fn try_parse_equation(&mut self) -> Result<Equation, Vec<Error>> {
        let equals = self.tokens.iter()
            .filter(|token| token.kind == TokenKind::Equals)
            .map(|token| token.span.clone())
            .collect::<Vec<_>>();

        let equals = match equals.as_slice() {
            [] => return Err(vec![Error::new(vec![self.full_span()], kind::MissingEquals)]),
            [equals] => equals.clone(),
            [first, rest @ ..] => {
                return Err(rest.iter()
                    .map(|extra| Error::new(vec![first.clone(), extra.clone()], kind::ExtraEquals))
                    .collect());
            },
        };

        let mut errors = Vec::new();
        let lhs = self.parse_side(true, &equals).map_err(|errs| errors.extend(errs));

        // step over the `=` sign
        self.next_token();

        let rhs = self.parse_side(false, &equals).map_err(|errs| errors.extend(errs));

        match (lhs, rhs) {
            (Ok(lhs), Ok(rhs)) if errors.is_empty() => Ok(Equation { lhs, equals, rhs }),
            _ => Err(errors),
        }
    }

    /// Parses one side of the equation, stopping at the `=` sign or the end of the source.
    fn parse_side(&mut self, left: bool, equals: &Range<usize>) -> Result<SideExpr, Vec<Error>> {
        let mut items: Vec<Item> = Vec::new();
        let mut errors = Vec::new();

        while let Some(token) = self.current_token() {
            if token.kind == TokenKind::Equals {
                break;
            }

            let token = token.clone();
            self.cursor += 1;

            if token.kind == TokenKind::Symbol {
                errors.push(Error::new(vec![token.span.clone()], kind::UnexpectedSymbol {
                    symbol: token.lexeme.to_string(),
                }));
                continue;
            }

            if let Some(op) = BinOp::from_token(&token) {
                match items.last() {
                    Some(Item::Operator(prev)) => {
                        errors.push(Error::new(
                            vec![prev.span.clone(), op.span.clone()],
                            kind::ConsecutiveOperators,
                        ));
                    },
                    None => {
                        // a leading `-` negates the first operand
                        if token.kind == TokenKind::Sub {
                            if let Some(operand) = self.parse_operand(Some(token.clone())) {
                                items.push(Item::Operand(operand));
                                continue;
                            }
                        }
                        errors.push(Error::new(
                            vec![op.span.clone()],
                            kind::DanglingOperator { leading: true },
                        ));
                    },
                    Some(Item::Operand(_)) => {},
                }
                items.push(Item::Operator(op));
                continue;
            }

            // the token starts an operand; back up so `parse_operand` sees it
            self.cursor -= 1;
            let Some(operand) = self.parse_operand(None) else {
                break;
            };
            if let Some(Item::Operand(prev)) = items.last() {
                errors.push(Error::new(
                    vec![prev.span.clone(), operand.span.clone()],
                    kind::ConsecutiveOperands,
                ));
            }
            items.push(Item::Operand(operand));
        }

        match items.last() {
            None => {
                // point at the `=` sign, since the empty side has no tokens to point at
                errors.push(Error::new(vec![equals.clone()], kind::EmptySide { left }));
            },
            Some(Item::Operator(op)) => {
                errors.push(Error::new(
                    vec![op.span.clone()],
                    kind::DanglingOperator { leading: false },
                ));
            },
            Some(Item::Operand(_)) => {},
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let span = items.first().map_or(0, |item| item.span().start)
            ..items.last().map_or(0, |item| item.span().end);
        Ok(SideExpr { items, span })
    }

    /// Parses a single operand at the cursor: a number, a variable, or a number directly followed
    /// by a variable. If `sign` is given, it is a `-` token that has already been consumed and is
    /// folded into the operand.
    ///
    /// Returns [`None`] without moving the cursor if there is no operand at the cursor.
    fn parse_operand(&mut self, sign: Option<Token<'source>>) -> Option<Operand> {
        let start = self.cursor;
        let first = self.next_token().filter(|token| token.kind.is_operand());
        let Some(first) = first else {
            self.cursor = start;
            return None;
        };

        let mut lexeme = String::new();
        let mut span = first.span.clone();
        if let Some(sign) = &sign {
            lexeme.push('-');
            span.start = sign.span.start;
        }
        lexeme.push_str(first.lexeme);

        let mut kind = match first.kind {
            TokenKind::Name => OperandKind::Variable,
            _ => OperandKind::Number,
        };

        // a coefficient must touch its variable: `2x` is one operand, `2 x` is two
        if first.kind == TokenKind::Number {
            if let Some(name) = self.adjacent_token().filter(|t| t.kind == TokenKind::Name && first.touches(t)) {
                lexeme.push_str(name.lexeme);
                span.end = name.span.end;
                kind = OperandKind::Variable;
                self.cursor += 1;
            }
        }

        Some(Operand { kind, lexeme, span })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use token::op::BinOpKind;

    fn operand(kind: OperandKind, lexeme: &str, span: Range<usize>) -> Item {
        Item::Operand(Operand { kind, lexeme: lexeme.to_string(), span })
    }

    fn op(kind: BinOpKind, span: Range<usize>) -> Item {
        Item::Operator(BinOp { kind, span })
    }

    fn parse_err(source: &str) -> Vec<Error> {
        Parser::new(source).try_parse_equation().unwrap_err()
    }

    #[test]
    fn coefficient_equation() {
        let equation = Parser::new("2x + 3 = 5").try_parse_equation().unwrap();

        assert_eq!(equation, Equation {
            lhs: SideExpr {
                items: vec![
                    operand(OperandKind::Variable, "2x", 0..2),
                    op(BinOpKind::Add, 3..4),
                    operand(OperandKind::Number, "3", 5..6),
                ],
                span: 0..6,
            },
            equals: 7..8,
            rhs: SideExpr {
                items: vec![operand(OperandKind::Number, "5", 9..10)],
                span: 9..10,
            },
        });
    }

    #[test]
    fn whitespace_is_ignored() {
        let equation = Parser::new("  x*4/2=7 -  1 ").try_parse_equation().unwrap();
        assert_eq!(equation.to_string(), "x * 4 / 2 = 7 - 1");
    }

    #[test]
    fn leading_minus_is_folded() {
        let equation = Parser::new("-3 + x = -2x").try_parse_equation().unwrap();
        assert_eq!(equation.lhs.items[0], operand(OperandKind::Number, "-3", 0..2));
        assert_eq!(equation.rhs.items[0], operand(OperandKind::Variable, "-2x", 9..12));
    }

    #[test]
    fn decimal_operand() {
        let equation = Parser::new("1.5x = 3").try_parse_equation().unwrap();
        assert_eq!(equation.lhs.items[0], operand(OperandKind::Variable, "1.5x", 0..4));
    }

    #[test]
    fn missing_equals() {
        let errors = parse_err("2x + 3");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is::<kind::MissingEquals>());
        assert_eq!(errors[0].spans, vec![0..6]);
    }

    #[test]
    fn extra_equals() {
        let errors = parse_err("x = 2 = 3 = 4");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|err| err.is::<kind::ExtraEquals>()));
        assert_eq!(errors[0].spans, vec![2..3, 6..7]);
        assert_eq!(errors[1].spans, vec![2..3, 10..11]);
    }

    #[test]
    fn empty_sides() {
        let errors = parse_err(" = ");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].downcast_ref::<kind::EmptySide>(), Some(&kind::EmptySide { left: true }));
        assert_eq!(errors[1].downcast_ref::<kind::EmptySide>(), Some(&kind::EmptySide { left: false }));
    }

    #[test]
    fn consecutive_operands() {
        let errors = parse_err("2 x = 4");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is::<kind::ConsecutiveOperands>());
        assert_eq!(errors[0].spans, vec![0..1, 2..3]);

        // a variable followed by a number is not a coefficient
        assert!(parse_err("x2 = 4")[0].is::<kind::ConsecutiveOperands>());
    }

    #[test]
    fn consecutive_operators() {
        let errors = parse_err("x + * 2 = 4");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is::<kind::ConsecutiveOperators>());
        assert_eq!(errors[0].spans, vec![2..3, 4..5]);
    }

    #[test]
    fn dangling_operators() {
        let errors = parse_err("* x = 4 +");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].downcast_ref::<kind::DanglingOperator>(),
            Some(&kind::DanglingOperator { leading: true }),
        );
        assert_eq!(
            errors[1].downcast_ref::<kind::DanglingOperator>(),
            Some(&kind::DanglingOperator { leading: false }),
        );
    }

    #[test]
    fn unexpected_symbol() {
        let errors = parse_err("x = 4 % 2");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].downcast_ref::<kind::UnexpectedSymbol>(),
            Some(&kind::UnexpectedSymbol { symbol: "%".to_string() }),
        );
        // without the `%`, `4 2` is two operands in a row
        assert!(errors[1].is::<kind::ConsecutiveOperands>());
    }

    #[test]
    fn errors_on_both_sides_are_collected() {
        let errors = parse_err("x + = 4 4");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].is::<kind::DanglingOperator>());
        assert!(errors[1].is::<kind::ConsecutiveOperands>());
    }
}
