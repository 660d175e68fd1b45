// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Recursive-descent parser.
//!
//! ```text
//! expr     := operand | call
//! call     := IDENT '(' expr (',' expr)* ')'     -- exactly two exprs
//! operand  := '@' INTEGER
//! ```

use crate::token::{tokenize, Token, TokenKind};
use crate::{BinaryOp, Expr, ParseError, ParseErrorKind};

/// Deepest call nesting accepted before parsing is abandoned.
pub const MAX_NESTING: usize = 256;

/// Parses `source` into an expression tree.
///
/// Every call must have exactly two arguments; `f(a, b, c)` is rejected
/// rather than folded.
///
/// # Examples
/// ```
/// use expression::{parse, BinaryOp, Expr};
/// let e = parse("add(@0, @1)").unwrap();
/// assert_eq!(e, Expr::binary(BinaryOp::Add, Expr::Operand(0), Expr::Operand(1)));
/// ```
///
/// # Errors
/// Returns a [`ParseError`] carrying the byte offset of the first offending
/// character.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, cursor: 0 };

    if parser.peek().kind == TokenKind::Eof {
        return Err(ParseError::new(ParseErrorKind::EmptyExpression, 0));
    }

    let expr = parser.expr(0)?;

    let rest = parser.peek();
    match rest.kind {
        TokenKind::Eof => {}
        TokenKind::RParen => {
            return Err(ParseError::new(
                ParseErrorKind::UnbalancedParentheses,
                rest.position,
            ))
        }
        ref other => {
            return Err(ParseError::new(
                ParseErrorKind::TrailingInput(other.to_string()),
                rest.position,
            ))
        }
    }

    tracing::debug!(
        source,
        nodes = expr.node_count(),
        depth = expr.depth(),
        "parsed expression"
    );
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // `tokenize` always ends the sequence with Eof, and the cursor
        // never advances past it.
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn expr(&mut self, nesting: usize) -> Result<Expr, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::At => self.operand(token.position),
            TokenKind::Ident(name) => self.call(name, token.position, nesting),
            TokenKind::Eof => Err(ParseError::new(
                ParseErrorKind::UnbalancedParentheses,
                token.position,
            )),
            other => Err(ParseError::new(
                ParseErrorKind::Expected {
                    expected: "operand or function call",
                    found: other.to_string(),
                },
                token.position,
            )),
        }
    }

    /// Parses the integer after an `@` at `at_position`.
    fn operand(&mut self, at_position: usize) -> Result<Expr, ParseError> {
        let next = self.peek().clone();
        match next.kind {
            TokenKind::Integer(index) if next.position == at_position + 1 => {
                self.advance();
                Ok(Expr::Operand(index))
            }
            TokenKind::Integer(_) => Err(ParseError::new(
                ParseErrorKind::MalformedOperand("whitespace between '@' and index".into()),
                at_position + 1,
            )),
            other => Err(ParseError::new(
                ParseErrorKind::MalformedOperand(format!("expected index after '@', found {other}")),
                next.position,
            )),
        }
    }

    /// Parses `( expr , expr )` after the function name `name`.
    fn call(&mut self, name: String, position: usize, nesting: usize) -> Result<Expr, ParseError> {
        let op = BinaryOp::from_name(&name)
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownFunction(name.clone()), position))?;

        if nesting >= MAX_NESTING {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep(MAX_NESTING),
                position,
            ));
        }

        let open = self.advance();
        if open.kind != TokenKind::LParen {
            return Err(ParseError::new(
                ParseErrorKind::Expected {
                    expected: "'(' after function name",
                    found: open.kind.to_string(),
                },
                open.position,
            ));
        }

        let mut args = vec![self.expr(nesting + 1)?];
        loop {
            let sep = self.advance();
            match sep.kind {
                TokenKind::Comma => args.push(self.expr(nesting + 1)?),
                TokenKind::RParen => break,
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnbalancedParentheses,
                        sep.position,
                    ))
                }
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::Expected {
                            expected: "',' or ')'",
                            found: other.to_string(),
                        },
                        sep.position,
                    ))
                }
            }
        }

        let found = args.len();
        let mut args = args.into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(lhs), Some(rhs), None) => Ok(Expr::binary(op, lhs, rhs)),
            _ => Err(ParseError::new(
                ParseErrorKind::WrongArity {
                    function: name,
                    found,
                },
                position,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(lhs: Expr, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Add, lhs, rhs)
    }

    fn err_kind(source: &str) -> ParseErrorKind {
        parse(source).unwrap_err().kind
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse("@0").unwrap(), Expr::Operand(0));
        assert_eq!(parse("  @17 ").unwrap(), Expr::Operand(17));
    }

    #[test]
    fn test_parse_nested() {
        let e = parse("mul(add(@0,@1),add(@2,@3))").unwrap();
        assert_eq!(
            e,
            Expr::binary(
                BinaryOp::Mul,
                add(Expr::Operand(0), Expr::Operand(1)),
                add(Expr::Operand(2), Expr::Operand(3)),
            )
        );
        assert_eq!(e.max_operand(), 3);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let e = parse(" sub ( @1 ,\tdiv(@0, @1) ) ").unwrap();
        assert_eq!(e.to_string(), "sub(@1,div(@0,@1))");
    }

    #[test]
    fn test_display_reparses() {
        let source = "div(mul(@4,sub(@0,@2)),add(@1,@1))";
        let e = parse(source).unwrap();
        assert_eq!(e.to_string(), source);
        assert_eq!(parse(&e.to_string()).unwrap(), e);
    }

    #[test]
    fn test_empty() {
        let err = parse("").unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::EmptyExpression, 0));
        assert_eq!(err_kind("   "), ParseErrorKind::EmptyExpression);
    }

    #[test]
    fn test_wrong_arity() {
        let err = parse("add(@0)").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::WrongArity {
                function: "add".into(),
                found: 1
            }
        );
        assert_eq!(err.position, 0);

        let err = parse("mul(@0,add(@1,@2,@3))").unwrap_err();
        assert_eq!(err.position, 7);
        assert!(matches!(err.kind, ParseErrorKind::WrongArity { found: 3, .. }));
    }

    #[test]
    fn test_unknown_function() {
        let err = parse("add(@0,pow(@1,@2))").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownFunction("pow".into()));
        assert_eq!(err.position, 7);
    }

    #[test]
    fn test_malformed_operand() {
        assert!(matches!(err_kind("@"), ParseErrorKind::MalformedOperand(_)));
        assert!(matches!(err_kind("add(@x,@1)"), ParseErrorKind::MalformedOperand(_)));
        assert!(matches!(err_kind("add(@ 0,@1)"), ParseErrorKind::MalformedOperand(_)));
        assert!(matches!(err_kind("add(0,@1)"), ParseErrorKind::Expected { .. }));

        let err = parse("add(@,@1)").unwrap_err();
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_unbalanced_parentheses() {
        let err = parse("add(@0,@1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParentheses);
        assert_eq!(err.position, 9);

        let err = parse("add(@0,@1))").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParentheses);
        assert_eq!(err.position, 10);

        assert_eq!(err_kind("add(@0,"), ParseErrorKind::UnbalancedParentheses);
    }

    #[test]
    fn test_missing_open_paren() {
        let err = parse("add @0").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Expected { .. }));
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("@0 @1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingInput("'@'".into()));
        assert_eq!(err.position, 3);
        assert!(matches!(err_kind("add(@0,@1),"), ParseErrorKind::TrailingInput(_)));
    }

    #[test]
    fn test_empty_call() {
        let err = parse("add()").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Expected { .. }));
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_nesting_limit() {
        let mut source = String::from("@0");
        for _ in 0..(MAX_NESTING + 1) {
            source = format!("add({source},@0)");
        }
        assert_eq!(
            err_kind(&source),
            ParseErrorKind::NestingTooDeep(MAX_NESTING)
        );

        let mut source = String::from("@0");
        for _ in 0..MAX_NESTING {
            source = format!("add({source},@0)");
        }
        assert_eq!(parse(&source).unwrap().depth(), MAX_NESTING + 1);
    }

    #[test]
    fn test_error_display() {
        let err = parse("add(@0)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error at position 0: function 'add' takes 2 arguments, found 1"
        );
    }
}
