// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # expression
//!
//! A small formula language that composes elementwise binary functions over
//! positional operands, e.g. `mul(add(@0,@1),add(@2,@3))`.
//!
//! - [`tokenize`] — the lexer, producing position-tagged [`Token`]s.
//! - [`parse`] — a recursive-descent parser producing an [`Expr`] tree.
//! - [`ParseError`] — syntax errors with the offending byte offset.
//!
//! Parsing never touches tensor data; evaluating an [`Expr`] against tensors
//! is the job of the `layers` crate.
//!
//! # Example
//! ```
//! let expr = expression::parse("mul(add(@0,@1),@2)").unwrap();
//! assert_eq!(expr.max_operand(), 2);
//! assert_eq!(expr.to_string(), "mul(add(@0,@1),@2)");
//! ```

mod ast;
mod error;
mod parser;
mod token;

pub use ast::{BinaryOp, Expr};
pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, MAX_NESTING};
pub use token::{tokenize, Token, TokenKind};
