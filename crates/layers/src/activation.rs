// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise activation layers: Sigmoid, HardSwish and SiLU.
//!
//! All three take one input and produce one output of the same shape; they
//! differ only in the per-element function.

use tensor_core::{ops, Tensor, TensorError, TensorView};

use crate::layer::{single_input, write_output};
use crate::{Layer, LayerError};

type Kernel = fn(&TensorView<'_>, &mut Tensor) -> Result<(), TensorError>;

/// Shared forward skeleton for the activation layers.
fn forward_elementwise(
    layer: &dyn Layer,
    kernel: Kernel,
    inputs: &[Tensor],
    outputs: &mut [Option<Tensor>],
) -> Result<(), LayerError> {
    let input = single_input(layer, inputs, outputs)?;
    tracing::trace!(layer = layer.name(), shape = %input.shape(), "forward");
    write_output(layer.name(), &mut outputs[0], input.shape(), |out| {
        kernel(&input.view(), out)
    })
}

/// `y = 1 / (1 + exp(-x))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigmoidLayer;

impl SigmoidLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for SigmoidLayer {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        forward_elementwise(self, ops::sigmoid, inputs, outputs)
    }
}

/// `y = 0` for `x <= -3`, `y = x` for `x >= 3`, else `x * (x + 3) / 6`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardSwishLayer;

impl HardSwishLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for HardSwishLayer {
    fn name(&self) -> &'static str {
        "hard_swish"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        forward_elementwise(self, ops::hard_swish, inputs, outputs)
    }
}

/// `y = x * sigmoid(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiluLayer;

impl SiluLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for SiluLayer {
    fn name(&self) -> &'static str {
        "silu"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        forward_elementwise(self, ops::silu, inputs, outputs)
    }
}
