// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sliding-window max pooling layer.

use tensor_core::ops::{self, PoolParams};
use tensor_core::Tensor;

use crate::layer::{single_input, write_output};
use crate::{Layer, LayerError};

/// Max pooling over each channel with padding, kernel and stride per axis.
///
/// Padded positions never win the max. The output is
/// `(C, floor((H + 2·pad_h − kernel_h) / stride_h) + 1, …)`.
#[derive(Debug, Clone)]
pub struct MaxPoolingLayer {
    params: PoolParams,
}

impl MaxPoolingLayer {
    /// Creates the layer. Parameters are checked against each input in
    /// `forward`; degenerate values surface there as a compute error.
    pub fn new(
        pad_h: usize,
        pad_w: usize,
        kernel_h: usize,
        kernel_w: usize,
        stride_h: usize,
        stride_w: usize,
    ) -> Self {
        Self {
            params: PoolParams {
                pad_h,
                pad_w,
                kernel_h,
                kernel_w,
                stride_h,
                stride_w,
            },
        }
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }
}

impl From<PoolParams> for MaxPoolingLayer {
    fn from(params: PoolParams) -> Self {
        Self { params }
    }
}

impl Layer for MaxPoolingLayer {
    fn name(&self) -> &'static str {
        "max_pooling"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        let input = single_input(self, inputs, outputs)?;
        let out_shape = self
            .params
            .output_shape(input.shape())
            .map_err(|source| LayerError::Compute {
                layer: self.name(),
                source,
            })?;

        tracing::trace!(layer = self.name(), input = %input.shape(), output = %out_shape, "forward");
        write_output(self.name(), &mut outputs[0], out_shape, |out| {
            ops::max_pool2d(&input.view(), &self.params, out)
        })
    }
}
