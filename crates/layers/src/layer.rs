// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The layer execution contract.
//!
//! Every kernel implements [`Layer`]. A caller passes the input tensors and
//! one slot per output; the layer validates everything first, then writes
//! the outputs. A failed call leaves the output slots exactly as they were.
//!
//! # Output slots
//! - `None`: a tensor of the right shape is allocated.
//! - `Some(t)` with the right shape: `t`'s buffer is overwritten in place.
//! - `Some(t)` with the same element count but another shape: `t` is
//!   reshaped in place, then overwritten.
//! - `Some(t)` otherwise: replaced by a fresh allocation.

use std::fmt;

use tensor_core::{Shape, Tensor, TensorError};

use crate::{LayerError, Status};

/// A configured operator with a synchronous forward pass.
///
/// Layers hold only their fixed configuration, so repeated calls with the
/// same inputs produce bit-identical outputs, and one instance can serve
/// concurrent callers that each bring their own input and output sequences.
pub trait Layer: Send + Sync + fmt::Debug {
    /// Short kind name used in errors and logs (e.g. `"max_pooling"`).
    fn name(&self) -> &'static str;

    /// Number of output slots `forward` expects. Calls with any other
    /// number of slots fail with [`LayerError::OutputArity`].
    fn output_arity(&self) -> usize {
        1
    }

    /// Runs the layer.
    ///
    /// # Errors
    /// Returns a [`LayerError`]; [`LayerError::status`] classifies it.
    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>])
        -> Result<(), LayerError>;

    /// Runs the layer and reports only the [`Status`].
    fn forward_status(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Status {
        let result = self.forward(inputs, outputs);
        if let Err(e) = &result {
            tracing::debug!(layer = self.name(), status = %e.status(), "forward failed: {e}");
        }
        Status::from(&result)
    }
}

/// Checks for exactly one input and the layer's declared number of output
/// slots; returns the input.
pub(crate) fn single_input<'a>(
    layer: &dyn Layer,
    inputs: &'a [Tensor],
    outputs: &[Option<Tensor>],
) -> Result<&'a Tensor, LayerError> {
    check_outputs(layer, outputs)?;
    match inputs {
        [] => Err(LayerError::EmptyInputs {
            layer: layer.name(),
        }),
        [input] => Ok(input),
        _ => Err(LayerError::InputArity {
            layer: layer.name(),
            expected: 1,
            actual: inputs.len(),
        }),
    }
}

/// Checks the number of output slots against [`Layer::output_arity`].
pub(crate) fn check_outputs(
    layer: &dyn Layer,
    outputs: &[Option<Tensor>],
) -> Result<(), LayerError> {
    let expected = layer.output_arity();
    if outputs.len() != expected {
        return Err(LayerError::OutputArity {
            layer: layer.name(),
            expected,
            actual: outputs.len(),
        });
    }
    Ok(())
}

/// Fills `slot` with a tensor of `shape` written by `compute`.
///
/// Reuses the slot's tensor when the element count allows it (see the
/// module docs). If `compute` fails, the slot is restored to its previous
/// state.
pub(crate) fn write_output<F>(
    layer: &'static str,
    slot: &mut Option<Tensor>,
    shape: Shape,
    compute: F,
) -> Result<(), LayerError>
where
    F: FnOnce(&mut Tensor) -> Result<(), TensorError>,
{
    let mut displaced = None;
    let mut reused_shape = None;
    let mut out = match slot.take() {
        Some(mut existing) => {
            let previous = existing.shape();
            match existing.reshape(shape) {
                Ok(()) => {
                    reused_shape = Some(previous);
                    existing
                }
                Err(_) => {
                    displaced = Some(existing);
                    Tensor::zeros(shape)
                }
            }
        }
        None => Tensor::zeros(shape),
    };

    match compute(&mut out) {
        Ok(()) => {
            *slot = Some(out);
            Ok(())
        }
        Err(source) => {
            // Kernels validate before writing, so the reused buffer still
            // holds its old values.
            *slot = match reused_shape {
                Some(previous) => out.reshape(previous).ok().map(|()| out),
                None => displaced,
            };
            Err(LayerError::Compute { layer, source })
        }
    }
}
