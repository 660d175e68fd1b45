// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type and view abstractions.

use std::sync::Arc;

use crate::{Shape, TensorError};

/// A three-axis `f32` tensor backed by a reference-counted buffer.
///
/// `Tensor` is the data carrier between layers. Cloning a tensor is cheap:
/// the clone shares the backing buffer, so several layers can hold the same
/// activation. Writes go through [`as_mut_slice`](Tensor::as_mut_slice),
/// which copies the buffer first if anyone else still holds it. A holder
/// therefore never observes another holder's writes.
///
/// # Memory Layout
/// Data is stored channel by channel, each channel in row-major order:
/// element `(c, r, col)` lives at `c * H * W + r * W + col`.
#[derive(Debug, Clone)]
pub struct Tensor {
    shape: Shape,
    data: Arc<Vec<f32>>,
}

impl Tensor {
    /// Creates a zero-filled tensor of `channels × rows × cols`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Tensor;
    /// let t = Tensor::new(2, 3, 4);
    /// assert_eq!(t.num_elements(), 24);
    /// ```
    pub fn new(channels: usize, rows: usize, cols: usize) -> Self {
        Self::zeros(Shape::new(channels, rows, cols))
    }

    /// Creates a zero-filled tensor with the given shape.
    pub fn zeros(shape: Shape) -> Self {
        Self {
            shape,
            data: Arc::new(vec![0.0; shape.num_elements()]),
        }
    }

    /// Creates a tensor with every element set to `value`.
    pub fn full(shape: Shape, value: f32) -> Self {
        Self {
            shape,
            data: Arc::new(vec![value; shape.num_elements()]),
        }
    }

    /// Creates a tensor from a flat buffer in channel-major order.
    ///
    /// Returns an error if `data.len()` is not `shape.num_elements()`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Shape, Tensor};
    /// let t = Tensor::from_vec(Shape::new(1, 1, 3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_vec(shape: Shape, data: Vec<f32>) -> Result<Self, TensorError> {
        if data.len() != shape.num_elements() {
            return Err(TensorError::ElementCountMismatch {
                expected: shape.num_elements(),
                actual: data.len(),
            });
        }
        Ok(Self {
            shape,
            data: Arc::new(data),
        })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.shape.channels()
    }

    /// Number of rows per channel.
    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    /// Number of columns per row.
    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Total number of elements.
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// Returns an immutable view over this tensor's data.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            shape: self.shape,
            data: &self.data,
        }
    }

    /// Returns the flat element buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the flat element buffer for writing.
    ///
    /// If the buffer is shared with another tensor handle it is copied
    /// first, so the other holders keep their values.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Returns the elements of channel `c`.
    ///
    /// # Panics
    /// Panics if `c >= self.channels()`.
    pub fn channel(&self, c: usize) -> &[f32] {
        let plane = self.shape.plane_size();
        &self.data[c * plane..(c + 1) * plane]
    }

    /// Returns element `(c, r, col)`.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn at(&self, c: usize, r: usize, col: usize) -> f32 {
        assert!(
            c < self.channels() && r < self.rows() && col < self.cols(),
            "index ({c}, {r}, {col}) out of range for shape {}",
            self.shape
        );
        self.data[self.shape.offset(c, r, col)]
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f32) {
        match Arc::get_mut(&mut self.data) {
            Some(data) => data.iter_mut().for_each(|x| *x = value),
            // Shared: allocating a fresh buffer avoids copying values that
            // would be overwritten anyway.
            None => self.data = Arc::new(vec![value; self.shape.num_elements()]),
        }
    }

    /// Changes the logical shape in place. The element order is unchanged.
    ///
    /// Returns an error if `shape` holds a different number of elements.
    pub fn reshape(&mut self, shape: Shape) -> Result<(), TensorError> {
        if shape.num_elements() != self.num_elements() {
            return Err(TensorError::ElementCountMismatch {
                expected: self.num_elements(),
                actual: shape.num_elements(),
            });
        }
        self.shape = shape;
        Ok(())
    }

    /// Returns a new handle over the same buffer with a different shape.
    ///
    /// Returns an error if `shape` holds a different number of elements.
    pub fn reshaped(&self, shape: Shape) -> Result<Tensor, TensorError> {
        let mut aliased = self.clone();
        aliased.reshape(shape)?;
        Ok(aliased)
    }

    /// Returns `true` if both handles point at the same backing buffer.
    pub fn shares_buffer_with(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// A borrowed, read-only view over a [`Tensor`]'s data.
///
/// Kernels take their inputs as views so the borrow checker keeps the
/// source alive and unmodified for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    shape: Shape,
    data: &'a [f32],
}

impl<'a> TensorView<'a> {
    /// Creates a view from raw parts.
    ///
    /// Returns an error if `data.len()` is not `shape.num_elements()`.
    pub fn from_parts(shape: Shape, data: &'a [f32]) -> Result<Self, TensorError> {
        if data.len() != shape.num_elements() {
            return Err(TensorError::ElementCountMismatch {
                expected: shape.num_elements(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the shape of the viewed tensor.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the flat element buffer.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }
}
