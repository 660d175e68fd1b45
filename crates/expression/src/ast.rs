// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Expression syntax tree.

use std::fmt;

/// A registered binary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Looks up a function by the name used in expression source.
    ///
    /// Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "sub" => Some(Self::Sub),
            "mul" => Some(Self::Mul),
            "div" => Some(Self::Div),
            _ => None,
        }
    }

    /// Returns the name used in expression source.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    /// Applies the function to a pair of scalars.
    #[inline(always)]
    pub fn apply(self, lhs: f32, rhs: f32) -> f32 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the parsed expression.
///
/// Children are owned exclusively by their parent, so the tree can be
/// shared read-only between threads and evaluated concurrently.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// `@index`: the index-th tensor of the runtime input sequence.
    Operand(usize),
    /// `op(lhs, rhs)`.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Builds a `Binary` node.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// The largest operand index referenced anywhere in the tree.
    ///
    /// Evaluation needs at least `max_operand() + 1` inputs.
    pub fn max_operand(&self) -> usize {
        match self {
            Self::Operand(index) => *index,
            Self::Binary { lhs, rhs, .. } => lhs.max_operand().max(rhs.max_operand()),
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Operand(_) => 1,
            Self::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
        }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Operand(_) => 1,
            Self::Binary { lhs, rhs, .. } => 1 + lhs.node_count() + rhs.node_count(),
        }
    }
}

/// Prints the canonical source form, e.g. `mul(add(@0,@1),@2)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(index) => write!(f, "@{index}"),
            Self::Binary { op, lhs, rhs } => write!(f, "{op}({lhs},{rhs})"),
        }
    }
}
