//! Momentum gradient-descent praxis
//!
//! The reference update rule of the runtime: plain SGD with an optional
//! momentum term accumulated in a shape-conformant buffer.
//!
//!   v = momentum * v + learning_rate * delta
//!   w' = w - v

use ndarray::Zip;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use strata_compute::{ComputeError, Tensor, TensorShape};

use super::{Praxis, PraxisFactory};
use crate::error::LayerError;

/// Hyperparameters for [`GradientDescent`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescentConfig {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            momentum: 0.0,
        }
    }
}

impl GradientDescentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }
}

/// SGD-with-momentum update rule over a layer's delta tensor.
pub struct GradientDescent {
    config: GradientDescentConfig,
    velocity: Tensor,
}

impl GradientDescent {
    pub fn new(shape: TensorShape, config: GradientDescentConfig) -> Self {
        Self {
            config,
            velocity: Tensor::zeros(shape),
        }
    }
}

impl Praxis for GradientDescent {
    fn run(&mut self, weights: &Tensor, deltas: &Tensor) -> Result<Tensor, LayerError> {
        let shape = self.velocity.shape();
        for (argument, tensor) in [weights, deltas].into_iter().enumerate() {
            if tensor.shape() != shape {
                return Err(LayerError::Compute(ComputeError::ShapeMismatch {
                    argument,
                    expected: shape,
                    actual: tensor.shape(),
                }));
            }
        }

        let momentum = self.config.momentum;
        let learning_rate = self.config.learning_rate;
        match (weights, deltas, &mut self.velocity) {
            (Tensor::Rank2(weights), Tensor::Rank2(deltas), Tensor::Rank2(velocity)) => {
                Zip::from(&mut *velocity).and(deltas).for_each(|v, &d| {
                    *v = momentum * *v + learning_rate * d;
                });
                Ok(Tensor::Rank2(weights - &*velocity))
            }
            (Tensor::Rank3(weights), Tensor::Rank3(deltas), Tensor::Rank3(velocity)) => {
                Zip::from(&mut *velocity).and(deltas).for_each(|v, &d| {
                    *v = momentum * *v + learning_rate * d;
                });
                Ok(Tensor::Rank3(weights - &*velocity))
            }
            // Shapes matched above, so the variants agree
            _ => unreachable!("rank mismatch after shape validation"),
        }
    }
}

/// Builds [`GradientDescent`] handles sized to each layer's shape.
#[derive(Debug, Clone, Default)]
pub struct GradientDescentFactory {
    config: GradientDescentConfig,
}

impl GradientDescentFactory {
    pub fn new(config: GradientDescentConfig) -> Self {
        Self { config }
    }
}

impl PraxisFactory for GradientDescentFactory {
    fn build(&self, shape: TensorShape) -> Result<Box<dyn Praxis>, LayerError> {
        Ok(Box::new(GradientDescent::new(shape, self.config)))
    }
}

// === TESTS ===

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn plain_descent_steps_against_the_gradient() {
        let shape = TensorShape::rank2(2, 1);
        let config = GradientDescentConfig::default().with_learning_rate(0.5);
        let mut praxis = GradientDescent::new(shape, config);

        let weights = Tensor::from_rows(&[vec![1.0, 2.0]]).unwrap();
        let deltas = Tensor::from_rows(&[vec![0.2, -0.4]]).unwrap();

        let updated = praxis.run(&weights, &deltas).unwrap();
        assert_abs_diff_eq!(updated.cell_2d(0, 0), 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(updated.cell_2d(1, 0), 2.2, epsilon = 1e-12);
    }

    #[test]
    fn momentum_accumulates_across_steps() {
        let shape = TensorShape::rank2(1, 1);
        let config = GradientDescentConfig::default()
            .with_learning_rate(1.0)
            .with_momentum(0.5);
        let mut praxis = GradientDescent::new(shape, config);

        let weights = Tensor::from_rows(&[vec![0.0]]).unwrap();
        let deltas = Tensor::from_rows(&[vec![1.0]]).unwrap();

        // v1 = 1.0, v2 = 0.5 * 1.0 + 1.0 = 1.5
        let first = praxis.run(&weights, &deltas).unwrap();
        assert_abs_diff_eq!(first.cell_2d(0, 0), -1.0, epsilon = 1e-12);
        let second = praxis.run(&weights, &deltas).unwrap();
        assert_abs_diff_eq!(second.cell_2d(0, 0), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn run_rejects_shape_mismatch() {
        let mut praxis = GradientDescent::new(
            TensorShape::rank2(2, 2),
            GradientDescentConfig::default(),
        );
        let weights = Tensor::zeros(TensorShape::rank2(2, 2));
        let deltas = Tensor::zeros(TensorShape::rank2(3, 2));

        let err = praxis.run(&weights, &deltas).unwrap_err();
        assert!(matches!(
            err,
            LayerError::Compute(ComputeError::ShapeMismatch { argument: 1, .. })
        ));
    }

    #[test]
    fn factory_sizes_the_praxis_to_the_layer_shape() {
        let factory = GradientDescentFactory::default();
        let mut praxis = factory.build(TensorShape::rank3(2, 2, 2)).unwrap();

        let weights = Tensor::zeros(TensorShape::rank3(2, 2, 2));
        let deltas = Tensor::zeros(TensorShape::rank3(2, 2, 2));
        assert!(praxis.run(&weights, &deltas).is_ok());
    }
}
