// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer that evaluates a parsed formula over its inputs.
//!
//! The formula is parsed once in [`ExpressionLayer::new`]. Each `forward`
//! first checks every operand reference against the inputs, then walks the
//! tree bottom-up. Interior nodes produce temporaries; the root writes into
//! the output slot.

use expression::{BinaryOp, Expr, ParseError};
use tensor_core::{ops, Shape, Tensor, TensorError, TensorView};

use crate::layer::{check_outputs, write_output};
use crate::{Layer, LayerError};

/// Elementwise formula over positional operands, e.g.
/// `mul(add(@0,@1),add(@2,@3))`.
#[derive(Debug, Clone)]
pub struct ExpressionLayer {
    source: String,
    expr: Expr,
}

impl ExpressionLayer {
    /// Parses `source` and builds the layer.
    ///
    /// # Errors
    /// Returns the [`ParseError`] if `source` is not a valid expression.
    ///
    /// # Examples
    /// ```
    /// use layers::{ExpressionLayer, Layer};
    /// use tensor_core::{Shape, Tensor};
    ///
    /// let layer = ExpressionLayer::new("add(@0,@1)").unwrap();
    /// let a = Tensor::full(Shape::new(1, 1, 2), 1.0);
    /// let b = Tensor::full(Shape::new(1, 1, 2), 2.0);
    /// let mut out = [None];
    /// layer.forward(&[a, b], &mut out).unwrap();
    /// assert_eq!(out[0].as_ref().unwrap().as_slice(), &[3.0, 3.0]);
    /// ```
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let expr = expression::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// The expression text this layer was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

/// Checks operand indices and shapes bottom-up, in evaluation order, so a
/// mismatch names the first call that would see it. Returns the subtree's
/// result shape.
fn check_operands(expr: &Expr, inputs: &[Tensor]) -> Result<Shape, LayerError> {
    match expr {
        Expr::Operand(index) => inputs
            .get(*index)
            .map(Tensor::shape)
            .ok_or(LayerError::OperandOutOfRange {
                index: *index,
                available: inputs.len(),
            }),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = check_operands(lhs, inputs)?;
            let rhs = check_operands(rhs, inputs)?;
            if lhs != rhs {
                return Err(LayerError::OperandShapeMismatch { op: *op, lhs, rhs });
            }
            Ok(lhs)
        }
    }
}

fn apply(
    op: BinaryOp,
    lhs: &TensorView<'_>,
    rhs: &TensorView<'_>,
    out: &mut Tensor,
) -> Result<(), TensorError> {
    match op {
        BinaryOp::Add => ops::add(lhs, rhs, out),
        BinaryOp::Sub => ops::sub(lhs, rhs, out),
        BinaryOp::Mul => ops::mul(lhs, rhs, out),
        BinaryOp::Div => ops::div(lhs, rhs, out),
    }
}

/// Evaluates a subtree. Operands share the input's buffer; calls allocate.
fn eval(expr: &Expr, inputs: &[Tensor]) -> Result<Tensor, TensorError> {
    match expr {
        Expr::Operand(index) => Ok(inputs[*index].clone()),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval(lhs, inputs)?;
            let r = eval(rhs, inputs)?;
            let mut out = Tensor::zeros(l.shape());
            apply(*op, &l.view(), &r.view(), &mut out)?;
            Ok(out)
        }
    }
}

/// Evaluates the root directly into `out`.
fn eval_into(expr: &Expr, inputs: &[Tensor], out: &mut Tensor) -> Result<(), TensorError> {
    match expr {
        Expr::Operand(index) => ops::unary_map("copy", &inputs[*index].view(), out, |x| x),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval(lhs, inputs)?;
            let r = eval(rhs, inputs)?;
            apply(*op, &l.view(), &r.view(), out)
        }
    }
}

impl Layer for ExpressionLayer {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        check_outputs(self, outputs)?;
        if inputs.is_empty() {
            return Err(LayerError::EmptyInputs { layer: self.name() });
        }
        let shape = check_operands(&self.expr, inputs)?;

        tracing::trace!(layer = self.name(), expr = %self.expr, inputs = inputs.len(), %shape, "forward");
        write_output(self.name(), &mut outputs[0], shape, |out| {
            eval_into(&self.expr, inputs, out)
        })
    }
}
