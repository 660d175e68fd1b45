// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic operations.
//!
//! Each operation reads from [`crate::TensorView`]s and writes into a
//! pre-allocated output [`crate::Tensor`] of the exact expected shape. Shape
//! policy (allocating or reshaping outputs) belongs to the caller.

mod activation_op;
mod binary_op;
mod elementwise;
mod linear_op;
mod max_pool_op;

pub use activation_op::{
    hard_swish, hard_swish_scalar, sigmoid, sigmoid_scalar, silu, silu_scalar,
};
pub use binary_op::{add, div, mul, sub};
pub use elementwise::{binary_map, unary_map};
pub use linear_op::linear;
pub use max_pool_op::{max_pool2d, PoolParams};
