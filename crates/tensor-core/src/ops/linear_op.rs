// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dense (fully-connected) transform.

use crate::{Shape, Tensor, TensorError, TensorView};

/// Computes `output[b, :] = weight · input[b, :] + bias` for every batch row.
///
/// `input` is read as a `batch × in_features` matrix: its column axis is the
/// feature axis and `channels * rows` is the batch. `weight` is
/// `out_features × in_features` in row-major order, `bias` (if any) holds
/// `out_features` values, and `output` must be `(C, H, out_features)`.
///
/// # Errors
/// Returns [`TensorError::ElementCountMismatch`] if the weight or bias
/// length does not match, [`TensorError::InvalidParameter`] if the weight
/// matrix size overflows `usize`, and [`TensorError::ShapeMismatch`] if
/// `output` has the wrong shape.
pub fn linear(
    input: &TensorView<'_>,
    weight: &[f32],
    bias: Option<&[f32]>,
    out_features: usize,
    output: &mut Tensor,
) -> Result<(), TensorError> {
    let in_shape = input.shape();
    let in_features = in_shape.cols();

    match in_features.checked_mul(out_features) {
        Some(expected) if expected == weight.len() => {}
        Some(expected) => {
            return Err(TensorError::ElementCountMismatch {
                expected,
                actual: weight.len(),
            })
        }
        None => {
            return Err(TensorError::InvalidParameter {
                op: "linear",
                detail: format!("{out_features}x{in_features} weight matrix overflows usize"),
            })
        }
    }
    if let Some(bias) = bias {
        if bias.len() != out_features {
            return Err(TensorError::ElementCountMismatch {
                expected: out_features,
                actual: bias.len(),
            });
        }
    }

    let expected_shape = Shape::new(in_shape.channels(), in_shape.rows(), out_features);
    if output.shape() != expected_shape {
        return Err(TensorError::ShapeMismatch {
            op: "linear (output)",
            lhs: expected_shape,
            rhs: output.shape(),
        });
    }

    let batch = in_shape.channels() * in_shape.rows();
    linear_f32_generic(
        input.as_slice(),
        weight,
        bias,
        output.as_mut_slice(),
        batch,
        in_features,
        out_features,
    );

    Ok(())
}

/// Portable f32 kernel: one dot product per `(row, out_feature)` pair.
///
/// Weight rows are contiguous, so the inner loop walks both operands
/// sequentially.
fn linear_f32_generic(
    x: &[f32],
    w: &[f32],
    bias: Option<&[f32]>,
    y: &mut [f32],
    batch: usize,
    k: usize,
    n: usize,
) {
    for b in 0..batch {
        let x_row = &x[b * k..(b + 1) * k];
        let y_row = &mut y[b * n..(b + 1) * n];
        for (o, y_val) in y_row.iter_mut().enumerate() {
            let w_row = &w[o * k..(o + 1) * k];
            let dot: f32 = w_row.iter().zip(x_row).map(|(&wv, &xv)| wv * xv).sum();
            *y_val = match bias {
                Some(bias) => dot + bias[o],
                None => dot,
            };
        }
    }
}
