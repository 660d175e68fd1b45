// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Two-dimensional max pooling over each channel.

use crate::{Shape, Tensor, TensorError, TensorView};

/// Window geometry for [`max_pool2d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PoolParams {
    pub pad_h: usize,
    pub pad_w: usize,
    pub kernel_h: usize,
    pub kernel_w: usize,
    pub stride_h: usize,
    pub stride_w: usize,
}

impl PoolParams {
    /// Computes the pooled shape for `input`.
    ///
    /// `out = floor((in + 2 * pad - kernel) / stride) + 1` along each spatial
    /// axis; the channel count is preserved.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidParameter`] if a kernel or stride
    /// dimension is zero, the kernel is larger than the padded input, or the
    /// padded extent or pooled element count does not fit in memory.
    pub fn output_shape(&self, input: Shape) -> Result<Shape, TensorError> {
        if self.kernel_h == 0 || self.kernel_w == 0 {
            return Err(TensorError::InvalidParameter {
                op: "max_pool2d",
                detail: format!(
                    "kernel must be positive, got {}x{}",
                    self.kernel_h, self.kernel_w
                ),
            });
        }
        if self.stride_h == 0 || self.stride_w == 0 {
            return Err(TensorError::InvalidParameter {
                op: "max_pool2d",
                detail: format!(
                    "stride must be positive, got {}x{}",
                    self.stride_h, self.stride_w
                ),
            });
        }

        let padded_h = padded_extent(input.rows(), self.pad_h)?;
        let padded_w = padded_extent(input.cols(), self.pad_w)?;
        if self.kernel_h > padded_h || self.kernel_w > padded_w {
            return Err(TensorError::InvalidParameter {
                op: "max_pool2d",
                detail: format!(
                    "kernel {}x{} exceeds padded input {}x{}",
                    self.kernel_h, self.kernel_w, padded_h, padded_w
                ),
            });
        }

        let out_h = (padded_h - self.kernel_h) / self.stride_h + 1;
        let out_w = (padded_w - self.kernel_w) / self.stride_w + 1;
        let out_shape = Shape::new(input.channels(), out_h, out_w);
        match out_shape.checked_num_elements() {
            Some(n) if n <= MAX_ELEMENTS => Ok(out_shape),
            _ => Err(TensorError::InvalidParameter {
                op: "max_pool2d",
                detail: format!("pooled shape {out_shape} is too large to allocate"),
            }),
        }
    }
}

/// Largest element count an `f32` buffer can hold.
const MAX_ELEMENTS: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// `len + 2 * pad`, kept within `isize` so window offsets can be signed.
fn padded_extent(len: usize, pad: usize) -> Result<usize, TensorError> {
    pad.checked_mul(2)
        .and_then(|both| both.checked_add(len))
        .filter(|&padded| padded <= isize::MAX as usize)
        .ok_or_else(|| TensorError::InvalidParameter {
            op: "max_pool2d",
            detail: format!("padding {pad} overflows the extent of a {len}-element axis"),
        })
}

/// Max pooling: every output element is the maximum of its window.
///
/// Window `(i, j)` covers input rows `[i * stride_h - pad_h, .. + kernel_h)`
/// and columns `[j * stride_w - pad_w, .. + kernel_w)`. Padded positions
/// count as negative infinity, so they are never selected unless the whole
/// window lies in the padding.
///
/// # Errors
/// Returns [`TensorError::InvalidParameter`] for degenerate parameters (see
/// [`PoolParams::output_shape`]) and [`TensorError::ShapeMismatch`] if
/// `output` does not have the pooled shape.
pub fn max_pool2d(
    input: &TensorView<'_>,
    params: &PoolParams,
    output: &mut Tensor,
) -> Result<(), TensorError> {
    let in_shape = input.shape();
    let out_shape = params.output_shape(in_shape)?;
    if output.shape() != out_shape {
        return Err(TensorError::ShapeMismatch {
            op: "max_pool2d (output)",
            lhs: out_shape,
            rhs: output.shape(),
        });
    }

    let src = input.as_slice();
    let dst = output.as_mut_slice();
    let (in_h, in_w) = (in_shape.rows(), in_shape.cols());
    let (out_h, out_w) = (out_shape.rows(), out_shape.cols());

    for c in 0..in_shape.channels() {
        let plane = &src[c * in_h * in_w..(c + 1) * in_h * in_w];
        let out_plane = &mut dst[c * out_h * out_w..(c + 1) * out_h * out_w];

        for i in 0..out_h {
            // Clip the window to the valid region; what is cut off is padding.
            let row_start = (i * params.stride_h) as isize - params.pad_h as isize;
            let r0 = (row_start.max(0) as usize).min(in_h);
            let r1 = ((row_start + params.kernel_h as isize).max(0) as usize).min(in_h);

            for j in 0..out_w {
                let col_start = (j * params.stride_w) as isize - params.pad_w as isize;
                let c0 = (col_start.max(0) as usize).min(in_w);
                let c1 = ((col_start + params.kernel_w as isize).max(0) as usize).min(in_w);

                let mut max_val = f32::NEG_INFINITY;
                for r in r0..r1 {
                    for &v in &plane[r * in_w + c0..r * in_w + c1] {
                        if v > max_val {
                            max_val = v;
                        }
                    }
                }
                out_plane[i * out_w + j] = max_val;
            }
        }
    }

    Ok(())
}
