// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Syntax errors reported by the lexer and parser.

/// A malformed expression, located at the offending byte offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at position {position}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Byte offset into the source string.
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The category of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The source contains no tokens.
    #[error("empty expression")]
    EmptyExpression,

    /// A character outside the expression alphabet.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A call names a function that is not registered.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// An `@` that is not immediately followed by an operand index.
    #[error("malformed operand: {0}")]
    MalformedOperand(String),

    /// A token other than the one the grammar requires here.
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
    },

    /// A `(` without its `)`, or a `)` without its `(`.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// A call with other than two arguments.
    #[error("function '{function}' takes 2 arguments, found {found}")]
    WrongArity { function: String, found: usize },

    /// Tokens left over after a complete expression.
    #[error("unexpected trailing input {0}")]
    TrailingInput(String),

    /// Calls nested beyond the parser's recursion limit.
    #[error("expression nested deeper than {0} calls")]
    NestingTooDeep(usize),
}
