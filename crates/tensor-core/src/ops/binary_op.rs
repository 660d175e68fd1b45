// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise binary arithmetic over tensors of identical shape.

use super::binary_map;
use crate::{Tensor, TensorError, TensorView};

/// `output = lhs + rhs`, element-wise.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn add(
    lhs: &TensorView<'_>,
    rhs: &TensorView<'_>,
    output: &mut Tensor,
) -> Result<(), TensorError> {
    binary_map("add", lhs, rhs, output, |a, b| a + b)
}

/// `output = lhs - rhs`, element-wise.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn sub(
    lhs: &TensorView<'_>,
    rhs: &TensorView<'_>,
    output: &mut Tensor,
) -> Result<(), TensorError> {
    binary_map("sub", lhs, rhs, output, |a, b| a - b)
}

/// `output = lhs * rhs`, element-wise.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn mul(
    lhs: &TensorView<'_>,
    rhs: &TensorView<'_>,
    output: &mut Tensor,
) -> Result<(), TensorError> {
    binary_map("mul", lhs, rhs, output, |a, b| a * b)
}

/// `output = lhs / rhs`, element-wise. Division by zero follows IEEE 754.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn div(
    lhs: &TensorView<'_>,
    rhs: &TensorView<'_>,
    output: &mut Tensor,
) -> Result<(), TensorError> {
    binary_map("div", lhs, rhs, output, |a, b| a / b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn pair() -> (Tensor, Tensor) {
        let a = Tensor::from_vec(Shape::new(1, 1, 3), vec![6.0, 8.0, -1.0]).unwrap();
        let b = Tensor::from_vec(Shape::new(1, 1, 3), vec![2.0, 4.0, 0.5]).unwrap();
        (a, b)
    }

    #[test]
    fn test_arithmetic() {
        let (a, b) = pair();
        let mut out = Tensor::zeros(a.shape());

        add(&a.view(), &b.view(), &mut out).unwrap();
        assert_eq!(out.as_slice(), &[8.0, 12.0, -0.5]);

        sub(&a.view(), &b.view(), &mut out).unwrap();
        assert_eq!(out.as_slice(), &[4.0, 4.0, -1.5]);

        mul(&a.view(), &b.view(), &mut out).unwrap();
        assert_eq!(out.as_slice(), &[12.0, 32.0, -0.5]);

        div(&a.view(), &b.view(), &mut out).unwrap();
        assert_eq!(out.as_slice(), &[3.0, 2.0, -2.0]);
    }

    #[test]
    fn test_div_by_zero_is_infinite() {
        let a = Tensor::full(Shape::new(1, 1, 1), 1.0);
        let b = Tensor::zeros(Shape::new(1, 1, 1));
        let mut out = Tensor::zeros(a.shape());
        div(&a.view(), &b.view(), &mut out).unwrap();
        assert!(out.as_slice()[0].is_infinite());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Tensor::new(2, 1, 1);
        let b = Tensor::new(1, 2, 1);
        let mut out = Tensor::zeros(a.shape());
        let err = mul(&a.view(), &b.view(), &mut out).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { op: "mul", .. }));
    }
}
