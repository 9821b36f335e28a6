//! Tokenizer and parser for the equations handled by the algebra tutor.
//!
//! The accepted grammar is deliberately small: an optional leading `-`, then numbers, variables
//! and coefficient-variable products (such as `2x`) separated by the operators `+`, `-`, `*` and
//! `/`, with exactly one `=` separating two non-empty sides. Whitespace between tokens is ignored.
//!
//! ```
//! use eqt_parser::parser::{ast::Item, Parser};
//!
//! let equation = Parser::new("2x + 3 = 5").try_parse_equation().unwrap();
//! assert_eq!(equation.lhs.items.len(), 3);
//! assert!(matches!(&equation.rhs.items[0], Item::Operand(operand) if operand.lexeme == "5"));
//! ```

pub mod parser;
pub mod tokenizer;
