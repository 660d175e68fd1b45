// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # layers
//!
//! Neural-network layer kernels behind one execution contract.
//!
//! - [`Layer`] — `forward(inputs, outputs)` plus its [`Status`] summary.
//! - Activations — [`SigmoidLayer`], [`HardSwishLayer`], [`SiluLayer`].
//! - [`LinearLayer`] — dense projection along the column axis.
//! - [`MaxPoolingLayer`] — windowed max with `-inf` padding.
//! - [`ViewLayer`] — zero-copy reshape with one inferred dimension.
//! - [`ExpressionLayer`] — elementwise formula over positional operands.
//! - [`LayerConfig`] — TOML/JSON description that builds any of the above.
//!
//! # Example
//! ```
//! use layers::{Layer, SigmoidLayer, Status};
//! use tensor_core::Tensor;
//!
//! let layer = SigmoidLayer::new();
//! let mut outputs = [None];
//! let status = layer.forward_status(&[Tensor::new(1, 2, 2)], &mut outputs);
//! assert_eq!(status, Status::Ok);
//! assert_eq!(outputs[0].as_ref().unwrap().as_slice(), &[0.5; 4]);
//! ```

mod activation;
mod config;
mod error;
mod expression_layer;
mod layer;
mod linear;
mod max_pooling;
mod view;

pub use activation::{HardSwishLayer, SigmoidLayer, SiluLayer};
pub use config::LayerConfig;
pub use error::{LayerError, Status};
pub use expression_layer::ExpressionLayer;
pub use layer::Layer;
pub use linear::LinearLayer;
pub use max_pooling::MaxPoolingLayer;
pub use view::{ViewLayer, WILDCARD};
