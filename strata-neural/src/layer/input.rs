/**
 * @file strata-neural/src/layer/input.rs
 * @brief Input layer: the head of a layer chain
 *
 * Holds externally supplied weights for downstream layers to read. It has
 * no kernels and no praxis; `predict` and `compare` are no-ops because the
 * layer computes nothing of its own.
 */

use strata_compute::{ComputeError, Tensor, TensorShape};

use super::Layer;
use crate::error::LayerError;
use crate::praxis::Praxis;

pub struct Input {
    shape: TensorShape,
    weights: Tensor,
    deltas: Tensor,
}

impl Input {
    /// An input layer of the given shape, zero-filled until data arrives.
    pub fn new(shape: TensorShape) -> Self {
        Self {
            shape,
            weights: Tensor::zeros(shape),
            deltas: Tensor::zeros(shape),
        }
    }

    /// An input layer adopting the shape of its initial weights.
    pub fn with_weights(weights: Tensor) -> Self {
        let shape = weights.shape();
        Self {
            shape,
            weights,
            deltas: Tensor::zeros(shape),
        }
    }

    /// Replaces the held weights. The tensor must match the layer's shape
    /// exactly; a mismatch is a wiring error, not a resize request.
    pub fn set_weights(&mut self, weights: Tensor) -> Result<(), LayerError> {
        if weights.shape() != self.shape {
            return Err(LayerError::Compute(ComputeError::ShapeMismatch {
                argument: 0,
                expected: self.shape,
                actual: weights.shape(),
            }));
        }
        self.weights = weights;
        Ok(())
    }
}

impl Layer for Input {
    fn shape(&self) -> TensorShape {
        self.shape
    }

    fn weights(&self) -> &Tensor {
        &self.weights
    }

    fn deltas(&self) -> &Tensor {
        &self.deltas
    }

    fn set_deltas(&mut self, deltas: Tensor) {
        self.deltas = deltas;
    }

    fn praxis(&self) -> Option<&dyn Praxis> {
        None
    }

    fn praxis_mut(&mut self) -> Option<&mut dyn Praxis> {
        None
    }

    fn setup_kernels(&mut self) {
        // nothing to compile
    }

    fn predict(&mut self) -> Result<(), LayerError> {
        Ok(())
    }

    fn compare(&mut self) -> Result<(), LayerError> {
        Ok(())
    }
}

// === TESTS ===

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_weights_accepts_conformant_tensors() {
        let mut layer = Input::new(TensorShape::rank2(2, 2));
        let weights = Tensor::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        layer.set_weights(weights.clone()).unwrap();
        assert_eq!(layer.weights(), &weights);
    }

    #[test]
    fn set_weights_rejects_shape_mismatch() {
        let mut layer = Input::new(TensorShape::rank2(2, 2));
        let wrong = Tensor::zeros(TensorShape::rank2(3, 2));
        let err = layer.set_weights(wrong).unwrap_err();
        assert!(matches!(
            err,
            LayerError::Compute(ComputeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn with_weights_adopts_the_tensor_shape() {
        let weights = Tensor::zeros(TensorShape::rank3(4, 3, 2));
        let layer = Input::with_weights(weights);
        assert_eq!(layer.shape(), TensorShape::rank3(4, 3, 2));
        assert_eq!(layer.depth(), Some(2));
    }
}
