// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise activation functions: Sigmoid, HardSwish and SiLU.

use super::unary_map;
use crate::{Tensor, TensorError, TensorView};

/// Applies the logistic sigmoid `1 / (1 + exp(-x))` element-wise.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if input and output shapes differ.
pub fn sigmoid(input: &TensorView<'_>, output: &mut Tensor) -> Result<(), TensorError> {
    unary_map("sigmoid", input, output, sigmoid_scalar)
}

/// Applies HardSwish element-wise:
///
/// `0` for `x <= -3`, `x` for `x >= 3`, `x * (x + 3) / 6` in between.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if input and output shapes differ.
pub fn hard_swish(input: &TensorView<'_>, output: &mut Tensor) -> Result<(), TensorError> {
    unary_map("hard_swish", input, output, hard_swish_scalar)
}

/// Applies SiLU (a.k.a. swish) `x * sigmoid(x)` element-wise.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if input and output shapes differ.
pub fn silu(input: &TensorView<'_>, output: &mut Tensor) -> Result<(), TensorError> {
    unary_map("silu", input, output, silu_scalar)
}

/// Sigmoid of a single value.
#[inline(always)]
pub fn sigmoid_scalar(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// HardSwish of a single value.
#[inline(always)]
pub fn hard_swish_scalar(x: f32) -> f32 {
    if x <= -3.0 {
        0.0
    } else if x >= 3.0 {
        x
    } else {
        x * (x + 3.0) / 6.0
    }
}

/// SiLU of a single value.
#[inline(always)]
pub fn silu_scalar(x: f32) -> f32 {
    x * sigmoid_scalar(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_sigmoid_known_values() {
        assert!(approx_eq(sigmoid_scalar(0.0), 0.5, 1e-6));
        assert!(approx_eq(sigmoid_scalar(1.0), 0.731_058_6, 1e-6));
        assert!(approx_eq(sigmoid_scalar(-1.0), 0.268_941_4, 1e-6));
    }

    #[test]
    fn test_sigmoid_saturates() {
        assert!(approx_eq(sigmoid_scalar(50.0), 1.0, 1e-6));
        assert!(approx_eq(sigmoid_scalar(-50.0), 0.0, 1e-6));
        // exp overflow must not produce NaN.
        assert!(!sigmoid_scalar(-200.0).is_nan());
    }

    #[test]
    fn test_hard_swish_regions() {
        assert_eq!(hard_swish_scalar(-5.0), 0.0);
        assert_eq!(hard_swish_scalar(-3.0), 0.0);
        assert_eq!(hard_swish_scalar(0.0), 0.0);
        assert_eq!(hard_swish_scalar(3.0), 3.0);
        assert_eq!(hard_swish_scalar(5.0), 5.0);
        assert!(approx_eq(hard_swish_scalar(1.0), 4.0 / 6.0, 1e-6));
        assert!(approx_eq(hard_swish_scalar(-1.5), -1.5 * 1.5 / 6.0, 1e-6));
    }

    #[test]
    fn test_silu_known_values() {
        assert_eq!(silu_scalar(0.0), 0.0);
        assert!(approx_eq(silu_scalar(1.0), 0.731_058_6, 1e-6));
        assert!(approx_eq(silu_scalar(-1.0), -0.268_941_4, 1e-6));
    }

    #[test]
    fn test_sigmoid_tensor() {
        let input = Tensor::from_vec(Shape::new(1, 1, 3), vec![0.0, 1.0, -1.0]).unwrap();
        let mut output = Tensor::zeros(input.shape());
        sigmoid(&input.view(), &mut output).unwrap();
        let r = output.as_slice();
        assert!(approx_eq(r[0], 0.5, 1e-6));
        assert!(approx_eq(r[1], 0.731_058_6, 1e-6));
        assert!(approx_eq(r[2], 0.268_941_4, 1e-6));
    }

    #[test]
    fn test_hard_swish_tensor() {
        let input = Tensor::from_vec(Shape::new(1, 2, 2), vec![-5.0, 5.0, 0.0, 1.0]).unwrap();
        let mut output = Tensor::zeros(input.shape());
        hard_swish(&input.view(), &mut output).unwrap();
        let r = output.as_slice();
        assert_eq!(&r[..3], &[0.0, 5.0, 0.0]);
        assert!(approx_eq(r[3], 4.0 / 6.0, 1e-6));
    }

    #[test]
    fn test_silu_shape_mismatch() {
        let input = Tensor::new(1, 1, 3);
        let mut output = Tensor::new(1, 1, 4);
        assert!(silu(&input.view(), &mut output).is_err());
    }
}
