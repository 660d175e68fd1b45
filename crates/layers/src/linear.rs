// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dense (fully-connected) layer.

use tensor_core::{ops, Shape, Tensor};

use crate::layer::{single_input, write_output};
use crate::{Layer, LayerError};

/// `output[b, :] = weight · input[b, :] (+ bias)` for every batch row.
///
/// The input's column axis is the feature axis; `channels * rows` rows form
/// the batch. For an input of `(C, H, in_features)` the output is
/// `(C, H, out_features)`.
///
/// Weights start out unset: [`set_weights`](LinearLayer::set_weights) (and
/// [`set_bias`](LinearLayer::set_bias) when the bias is enabled) must be
/// called before `forward` succeeds.
#[derive(Debug, Clone)]
pub struct LinearLayer {
    in_features: usize,
    out_features: usize,
    use_bias: bool,
    /// `out_features × in_features`, row-major.
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl LinearLayer {
    pub fn new(in_features: usize, out_features: usize, use_bias: bool) -> Self {
        Self {
            in_features,
            out_features,
            use_bias,
            weights: Vec::new(),
            bias: Vec::new(),
        }
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn use_bias(&self) -> bool {
        self.use_bias
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn bias(&self) -> &[f32] {
        &self.bias
    }

    /// Number of weights the configuration calls for.
    fn weight_len(&self) -> Result<usize, LayerError> {
        self.in_features
            .checked_mul(self.out_features)
            .ok_or_else(|| LayerError::InvalidConfig {
                layer: "linear",
                detail: format!(
                    "{}x{} weight matrix overflows usize",
                    self.out_features, self.in_features
                ),
            })
    }

    /// Installs the `out_features × in_features` weight matrix (row-major).
    ///
    /// # Errors
    /// Returns [`LayerError::WeightSize`] if the length is not
    /// `out_features * in_features`, and [`LayerError::InvalidConfig`] if
    /// that product overflows; the previous weights are kept.
    pub fn set_weights(&mut self, weights: Vec<f32>) -> Result<(), LayerError> {
        let expected = self.weight_len()?;
        if weights.len() != expected {
            return Err(LayerError::WeightSize {
                expected,
                actual: weights.len(),
            });
        }
        self.weights = weights;
        Ok(())
    }

    /// Installs the bias vector.
    ///
    /// # Errors
    /// Returns [`LayerError::InvalidConfig`] if the layer was built without a
    /// bias and [`LayerError::BiasSize`] if the length is not `out_features`.
    pub fn set_bias(&mut self, bias: Vec<f32>) -> Result<(), LayerError> {
        if !self.use_bias {
            return Err(LayerError::InvalidConfig {
                layer: "linear",
                detail: "bias is disabled for this layer".into(),
            });
        }
        if bias.len() != self.out_features {
            return Err(LayerError::BiasSize {
                expected: self.out_features,
                actual: bias.len(),
            });
        }
        self.bias = bias;
        Ok(())
    }
}

impl Layer for LinearLayer {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        let input = single_input(self, inputs, outputs)?;

        if input.cols() != self.in_features {
            return Err(LayerError::FeatureMismatch {
                expected: self.in_features,
                actual: input.cols(),
            });
        }
        let expected_weights = self.weight_len()?;
        if self.weights.len() != expected_weights {
            return Err(LayerError::WeightSize {
                expected: expected_weights,
                actual: self.weights.len(),
            });
        }
        let bias = if self.use_bias {
            if self.bias.len() != self.out_features {
                return Err(LayerError::BiasSize {
                    expected: self.out_features,
                    actual: self.bias.len(),
                });
            }
            Some(self.bias.as_slice())
        } else {
            None
        };

        let out_shape = Shape::new(input.channels(), input.rows(), self.out_features);
        if out_shape.checked_num_elements().is_none() {
            return Err(LayerError::InvalidConfig {
                layer: self.name(),
                detail: format!("output shape {out_shape} overflows usize"),
            });
        }
        tracing::trace!(layer = self.name(), input = %input.shape(), output = %out_shape, "forward");
        write_output(self.name(), &mut outputs[0], out_shape, |out| {
            ops::linear(&input.view(), &self.weights, bias, self.out_features, out)
        })
    }
}
