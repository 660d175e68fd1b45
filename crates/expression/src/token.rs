// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tokens and the lexer.

use std::fmt;

use crate::{ParseError, ParseErrorKind};

/// The kinds of token the expression language is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A function name such as `add`.
    Ident(String),
    /// The operand marker `@`.
    At,
    /// A non-negative decimal integer.
    Integer(usize),
    LParen,
    RParen,
    Comma,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::At => f.write_str("'@'"),
            TokenKind::Integer(value) => write!(f, "integer {value}"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Splits `source` into tokens. Whitespace between tokens is skipped.
///
/// The returned sequence always ends with a single [`TokenKind::Eof`].
///
/// # Errors
/// Returns a [`ParseError`] for characters outside the language and for
/// integers that do not fit in `usize`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '@' => {
                chars.next();
                TokenKind::At
            }
            '(' => {
                chars.next();
                TokenKind::LParen
            }
            ')' => {
                chars.next();
                TokenKind::RParen
            }
            ',' => {
                chars.next();
                TokenKind::Comma
            }
            c if c.is_ascii_digit() => {
                let end = take_while(&mut chars, |c| c.is_ascii_digit());
                let digits = &source[position..end];
                let value = digits.parse::<usize>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::MalformedOperand(format!(
                            "index {digits} is out of range"
                        )),
                        position,
                    )
                })?;
                TokenKind::Integer(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = take_while(&mut chars, |c| c.is_ascii_alphanumeric() || c == '_');
                TokenKind::Ident(source[position..end].to_string())
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter(other),
                    position,
                ))
            }
        };
        tokens.push(Token { kind, position });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        position: source.len(),
    });
    Ok(tokens)
}

/// Consumes characters while `pred` holds and returns the end byte offset.
fn take_while<I, P>(chars: &mut std::iter::Peekable<I>, pred: P) -> usize
where
    I: Iterator<Item = (usize, char)>,
    P: Fn(char) -> bool,
{
    let mut end = 0;
    while let Some(&(pos, c)) = chars.peek() {
        if !pred(c) {
            return pos;
        }
        end = pos + c.len_utf8();
        chars.next();
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_call() {
        assert_eq!(
            kinds("add(@0,@12)"),
            vec![
                TokenKind::Ident("add".into()),
                TokenKind::LParen,
                TokenKind::At,
                TokenKind::Integer(0),
                TokenKind::Comma,
                TokenKind::At,
                TokenKind::Integer(12),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("mul( @3 , @4)").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 5, 6, 8, 10, 11, 12, 13]);
    }

    #[test]
    fn test_whitespace_only_is_just_eof() {
        assert_eq!(kinds("  \t\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("add(@0+@1)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('+'));
        assert_eq!(err.position, 6);
    }

    #[test]
    fn test_integer_overflow() {
        let err = tokenize("@99999999999999999999999").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::MalformedOperand(_)));
        assert_eq!(err.position, 1);
    }

    #[test]
    fn test_identifier_with_digits() {
        assert_eq!(
            kinds("f_2x"),
            vec![TokenKind::Ident("f_2x".into()), TokenKind::Eof]
        );
    }
}
