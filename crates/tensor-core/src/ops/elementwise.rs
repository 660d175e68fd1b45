// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared skeletons for per-element kernels.

use crate::{Tensor, TensorError, TensorView};

/// Applies `f` to every element of `input`, writing into `output`.
///
/// Elements are independent, so the traversal order is irrelevant to the
/// result.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if input and output shapes differ.
pub fn unary_map<F>(
    op: &'static str,
    input: &TensorView<'_>,
    output: &mut Tensor,
    f: F,
) -> Result<(), TensorError>
where
    F: Fn(f32) -> f32,
{
    if input.shape() != output.shape() {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: input.shape(),
            rhs: output.shape(),
        });
    }

    let src = input.as_slice();
    let dst = output.as_mut_slice();
    for (d, &x) in dst.iter_mut().zip(src.iter()) {
        *d = f(x);
    }

    Ok(())
}

/// Combines `lhs` and `rhs` element by element with `f`, writing into `output`.
///
/// No broadcasting: all three shapes must be identical.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if any two shapes differ.
pub fn binary_map<F>(
    op: &'static str,
    lhs: &TensorView<'_>,
    rhs: &TensorView<'_>,
    output: &mut Tensor,
    f: F,
) -> Result<(), TensorError>
where
    F: Fn(f32, f32) -> f32,
{
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    if lhs.shape() != output.shape() {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: lhs.shape(),
            rhs: output.shape(),
        });
    }

    let a = lhs.as_slice();
    let b = rhs.as_slice();
    let dst = output.as_mut_slice();
    for ((d, &x), &y) in dst.iter_mut().zip(a.iter()).zip(b.iter()) {
        *d = f(x, y);
    }

    Ok(())
}
