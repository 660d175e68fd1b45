// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Three-axis tensor shape descriptor.

use std::fmt;

/// Describes the `(channels, rows, cols)` extent of a [`crate::Tensor`].
///
/// Every tensor in the layer pipeline is three-dimensional. Element
/// `(c, r, col)` lives at flat offset `c * rows * cols + r * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    channels: usize,
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Creates a new shape.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::new(2, 3, 4);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub const fn new(channels: usize, rows: usize, cols: usize) -> Self {
        Self {
            channels,
            rows,
            cols,
        }
    }

    /// Folds an arbitrary-rank dimension list into the three-axis form.
    ///
    /// Missing leading axes become 1; surplus leading axes are multiplied
    /// into the channel axis.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// assert_eq!(Shape::collapse(&[1, 128, 32, 128]), Shape::new(128, 32, 128));
    /// assert_eq!(Shape::collapse(&[6, 7]), Shape::new(1, 6, 7));
    /// ```
    pub fn collapse(dims: &[usize]) -> Self {
        match dims {
            [] => Self::new(1, 1, 1),
            [w] => Self::new(1, 1, *w),
            [h, w] => Self::new(1, *h, *w),
            [lead @ .., h, w] => Self::new(lead.iter().product(), *h, *w),
        }
    }

    /// Number of channels.
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Number of rows per channel.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per row.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the dimensions as `[channels, rows, cols]`.
    pub const fn dims(&self) -> [usize; 3] {
        [self.channels, self.rows, self.cols]
    }

    /// Total number of elements, `C * H * W`.
    pub const fn num_elements(&self) -> usize {
        self.channels * self.rows * self.cols
    }

    /// Total number of elements, or `None` if the product overflows `usize`.
    pub const fn checked_num_elements(&self) -> Option<usize> {
        match self.channels.checked_mul(self.rows) {
            Some(plane_rows) => plane_rows.checked_mul(self.cols),
            None => None,
        }
    }

    /// Number of elements in one channel plane, `H * W`.
    pub const fn plane_size(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major strides `[H * W, W, 1]`.
    pub const fn strides(&self) -> [usize; 3] {
        [self.rows * self.cols, self.cols, 1]
    }

    /// Flat buffer offset of element `(c, r, col)`.
    #[inline(always)]
    pub const fn offset(&self, c: usize, r: usize, col: usize) -> usize {
        c * self.rows * self.cols + r * self.cols + col
    }

    /// Returns `true` if the shape holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.channels, self.rows, self.cols)
    }
}

/// Convenience: `Shape::from([2, 3, 4])`.
impl From<[usize; 3]> for Shape {
    fn from([channels, rows, cols]: [usize; 3]) -> Self {
        Self::new(channels, rows, cols)
    }
}
