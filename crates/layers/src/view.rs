// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape reinterpretation layer.

use tensor_core::{Shape, Tensor};

use crate::layer::single_input;
use crate::{Layer, LayerError};

/// Dimension value that is inferred from the element count.
pub const WILDCARD: i64 = -1;

/// Reinterprets the input under a new shape without touching its values.
///
/// The target may have any rank; it is folded into three axes with
/// [`Shape::collapse`], so `[1, 128, 32, 128]` becomes `(128, 32, 128)`. At
/// most one dimension may be [`WILDCARD`]. The output shares the input's
/// buffer.
#[derive(Debug, Clone)]
pub struct ViewLayer {
    shape: Vec<i64>,
}

impl ViewLayer {
    pub fn new(shape: Vec<i64>) -> Self {
        Self { shape }
    }

    pub fn target(&self) -> &[i64] {
        &self.shape
    }

    /// Resolves the target against an input of `num_elements` elements.
    ///
    /// # Errors
    /// Returns [`LayerError::InvalidViewShape`] for negative dimensions other
    /// than a single wildcard or an unresolvable wildcard, and
    /// [`LayerError::ElementCountMismatch`] if the resolved shape holds a
    /// different number of elements.
    pub fn resolve(&self, num_elements: usize) -> Result<Shape, LayerError> {
        let invalid = |detail: &str| LayerError::InvalidViewShape {
            shape: self.shape.clone(),
            detail: detail.to_string(),
        };

        let mut wildcard = None;
        let mut known: usize = 1;
        for (axis, &dim) in self.shape.iter().enumerate() {
            if dim == WILDCARD {
                if wildcard.replace(axis).is_some() {
                    return Err(invalid("more than one wildcard dimension"));
                }
            } else if dim < 0 {
                return Err(invalid("dimensions must be non-negative"));
            } else {
                known = known
                    .checked_mul(dim as usize)
                    .ok_or_else(|| invalid("element count overflows"))?;
            }
        }

        let mut dims: Vec<usize> = self.shape.iter().map(|&d| d.max(0) as usize).collect();
        if let Some(axis) = wildcard {
            if known == 0 || num_elements % known != 0 {
                return Err(invalid(&format!(
                    "cannot infer wildcard for {num_elements} elements"
                )));
            }
            dims[axis] = num_elements / known;
        } else if known != num_elements {
            return Err(LayerError::ElementCountMismatch {
                layer: "view",
                expected: num_elements,
                actual: known,
            });
        }

        Ok(Shape::collapse(&dims))
    }
}

impl Layer for ViewLayer {
    fn name(&self) -> &'static str {
        "view"
    }

    fn forward(&self, inputs: &[Tensor], outputs: &mut [Option<Tensor>]) -> Result<(), LayerError> {
        let input = single_input(self, inputs, outputs)?;
        let shape = self.resolve(input.num_elements())?;
        let viewed = input
            .reshaped(shape)
            .map_err(|source| LayerError::Compute {
                layer: self.name(),
                source,
            })?;

        tracing::trace!(layer = self.name(), input = %input.shape(), output = %shape, "forward");
        outputs[0] = Some(viewed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    fn view(input: &Tensor, target: Vec<i64>) -> Result<Tensor, LayerError> {
        let mut outputs = vec![None];
        ViewLayer::new(target).forward(std::slice::from_ref(input), &mut outputs)?;
        Ok(outputs.pop().flatten().unwrap())
    }

    #[test]
    fn test_four_axis_target() {
        let data: Vec<f32> = (0..32 * 128 * 128).map(|x| x as f32).collect();
        let input = Tensor::from_vec(Shape::new(32, 128, 128), data).unwrap();
        let out = view(&input, vec![1, 128, 32, 128]).unwrap();
        assert_eq!(out.shape(), Shape::new(128, 32, 128));
        assert_eq!(out.num_elements(), input.num_elements());
        assert_eq!(out.as_slice(), input.as_slice());
        assert!(out.shares_buffer_with(&input));
    }

    #[test]
    fn test_wildcard() {
        let input = Tensor::new(2, 3, 4);
        assert_eq!(view(&input, vec![-1, 6]).unwrap().shape(), Shape::new(1, 4, 6));
        assert_eq!(
            view(&input, vec![2, -1, 2, 2]).unwrap().shape(),
            Shape::new(6, 2, 2)
        );
    }

    #[test]
    fn test_count_mismatch() {
        let input = Tensor::new(2, 3, 4);
        let err = view(&input, vec![5, 5]).unwrap_err();
        assert_eq!(
            err,
            LayerError::ElementCountMismatch {
                layer: "view",
                expected: 24,
                actual: 25
            }
        );
        assert_eq!(err.status(), Status::InvalidInput);
    }

    #[test]
    fn test_invalid_targets() {
        let input = Tensor::new(2, 3, 4);
        for target in [vec![-1, -1], vec![-2, 12], vec![-1, 5], vec![0, -1]] {
            let err = view(&input, target).unwrap_err();
            assert!(matches!(err, LayerError::InvalidViewShape { .. }), "{err}");
            assert_eq!(err.status(), Status::InvalidInput);
        }
    }

    #[test]
    fn test_output_slot_untouched_on_failure() {
        let input = Tensor::new(1, 2, 2);
        let mut outputs = vec![Some(Tensor::full(Shape::new(1, 1, 1), 3.0))];
        let status = ViewLayer::new(vec![3]).forward_status(std::slice::from_ref(&input), &mut outputs);
        assert_eq!(status, Status::InvalidInput);
        assert_eq!(outputs[0].as_ref().unwrap().as_slice(), &[3.0]);
    }

    #[test]
    fn test_writing_view_leaves_input() {
        let input = Tensor::full(Shape::new(1, 2, 2), 1.0);
        let mut out = view(&input, vec![4]).unwrap();
        out.as_mut_slice()[0] = 5.0;
        assert_eq!(input.as_slice()[0], 1.0);
    }
}
