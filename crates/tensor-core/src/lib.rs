// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Three-axis `f32` tensors and the numeric kernels that layers are built on.
//!
//! This crate provides:
//! - [`Tensor`] — a `(channels, rows, cols)` tensor over a reference-counted,
//!   copy-on-write buffer.
//! - [`Shape`] — the three-axis extent and its addressing rules.
//! - Kernels in [`ops`]: sigmoid, HardSwish, SiLU, elementwise add/sub/mul/div,
//!   dense linear transform, 2-D max pooling.
//!
//! # Design Goals
//! - Cheap sharing of activations between layers (`Clone` shares the buffer).
//! - Kernels write into caller-provided outputs and never allocate.
//! - Clean error types via `thiserror`.

mod error;
pub mod ops;
mod shape;
mod tensor;

pub use error::TensorError;
pub use shape::Shape;
pub use tensor::{Tensor, TensorView};
