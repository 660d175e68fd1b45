// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error and status types for layer execution.

use std::fmt;

use expression::{BinaryOp, ParseError};
use tensor_core::{Shape, TensorError};

/// Classification of a `forward` outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Every output was fully written.
    Ok,
    /// Arity, shape or index mismatch between the configuration and the
    /// runtime tensors.
    InvalidInput,
    /// The configuration makes the computation mathematically invalid.
    ComputeError,
}

impl Status {
    /// Returns `true` for [`Status::Ok`].
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl<T> From<&Result<T, LayerError>> for Status {
    fn from(result: &Result<T, LayerError>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "ok",
            Status::InvalidInput => "invalid input",
            Status::ComputeError => "compute error",
        })
    }
}

/// Errors that can occur while configuring or running a layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayerError {
    /// `forward` was called without any input tensors.
    #[error("{layer}: input sequence is empty")]
    EmptyInputs { layer: &'static str },

    /// Wrong number of input tensors.
    #[error("{layer}: expected {expected} input tensor(s), got {actual}")]
    InputArity {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Wrong number of output slots.
    #[error("{layer}: expected {expected} output slot(s), got {actual}")]
    OutputArity {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The input's feature axis does not match the configured width.
    #[error("linear: input has {actual} features, layer expects {expected}")]
    FeatureMismatch { expected: usize, actual: usize },

    /// The weight buffer is unset or has the wrong length.
    #[error("linear: weight buffer holds {actual} values, expected {expected}")]
    WeightSize { expected: usize, actual: usize },

    /// The bias buffer is unset or has the wrong length.
    #[error("linear: bias buffer holds {actual} values, expected {expected}")]
    BiasSize { expected: usize, actual: usize },

    /// The view target cannot be resolved (bad sentinel or ambiguous wildcard).
    #[error("view: invalid target shape {shape:?}: {detail}")]
    InvalidViewShape { shape: Vec<i64>, detail: String },

    /// A reshape target holds a different number of elements than the input.
    #[error("{layer}: target holds {actual} elements, input holds {expected}")]
    ElementCountMismatch {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An expression operand refers past the end of the input sequence.
    #[error("expression: operand @{index} out of range for {available} input(s)")]
    OperandOutOfRange { index: usize, available: usize },

    /// An expression combines tensors of different shapes.
    #[error("expression: {op} operands have different shapes {lhs} and {rhs}")]
    OperandShapeMismatch { op: BinaryOp, lhs: Shape, rhs: Shape },

    /// The layer's own configuration is unusable.
    #[error("{layer}: invalid configuration: {detail}")]
    InvalidConfig { layer: &'static str, detail: String },

    /// A tensor kernel rejected the computation.
    #[error("{layer}: {source}")]
    Compute {
        layer: &'static str,
        #[source]
        source: TensorError,
    },

    /// An expression string failed to parse.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// A layer configuration document could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LayerError {
    /// The [`Status`] this error is reported as.
    pub fn status(&self) -> Status {
        match self {
            LayerError::EmptyInputs { .. }
            | LayerError::InputArity { .. }
            | LayerError::OutputArity { .. }
            | LayerError::FeatureMismatch { .. }
            | LayerError::WeightSize { .. }
            | LayerError::BiasSize { .. }
            | LayerError::InvalidViewShape { .. }
            | LayerError::ElementCountMismatch { .. }
            | LayerError::OperandOutOfRange { .. }
            | LayerError::Syntax(_)
            | LayerError::Config(_) => Status::InvalidInput,
            LayerError::OperandShapeMismatch { .. }
            | LayerError::InvalidConfig { .. }
            | LayerError::Compute { .. } => Status::ComputeError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let invalid = LayerError::OperandOutOfRange {
            index: 5,
            available: 2,
        };
        assert_eq!(invalid.status(), Status::InvalidInput);

        let compute = LayerError::Compute {
            layer: "max_pooling",
            source: TensorError::InvalidParameter {
                op: "max_pool2d",
                detail: "stride must be positive".into(),
            },
        };
        assert_eq!(compute.status(), Status::ComputeError);

        let mismatch = LayerError::OperandShapeMismatch {
            op: BinaryOp::Add,
            lhs: Shape::new(1, 2, 3),
            rhs: Shape::new(1, 3, 2),
        };
        assert_eq!(mismatch.status(), Status::ComputeError);
    }

    #[test]
    fn test_status_from_result() {
        let ok: Result<(), LayerError> = Ok(());
        assert_eq!(Status::from(&ok), Status::Ok);
        assert!(Status::from(&ok).is_ok());

        let err: Result<(), LayerError> = Err(LayerError::EmptyInputs { layer: "sigmoid" });
        assert_eq!(Status::from(&err), Status::InvalidInput);
    }

    #[test]
    fn test_display() {
        let e = LayerError::InputArity {
            layer: "silu",
            expected: 1,
            actual: 3,
        };
        assert_eq!(e.to_string(), "silu: expected 1 input tensor(s), got 3");
        assert_eq!(Status::ComputeError.to_string(), "compute error");
    }
}
