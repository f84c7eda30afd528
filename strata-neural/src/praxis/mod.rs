/**
 * @file strata-neural/src/praxis/mod.rs
 * @brief Optimizer (praxis) contracts
 *
 * A praxis is the update rule attached to a layer. The layer core treats it
 * as an opaque capability: the handle is built once at layer construction
 * by the configured factory and stored, but the core never inspects it or
 * calls into it; that is the training loop's job.
 */

use strata_compute::{Tensor, TensorShape};

use crate::error::LayerError;

// === MODULE DECLARATIONS ===

/// Momentum gradient-descent praxis.
pub mod gradient_descent;

pub use gradient_descent::{GradientDescent, GradientDescentConfig, GradientDescentFactory};

// === CONTRACTS ===

/// Update-rule handle attached to a layer.
pub trait Praxis {
    /// Produces updated weights from a layer's current weights and deltas.
    fn run(&mut self, weights: &Tensor, deltas: &Tensor) -> Result<Tensor, LayerError>;
}

/**
 * Builds a praxis for a layer at construction time.
 *
 * The factory receives the constructed layer's shape, the one layer
 * property an update rule needs to size its own state buffers. Construction
 * failures propagate unmodified; the layer neither retries nor substitutes
 * a default.
 */
pub trait PraxisFactory {
    fn build(&self, shape: TensorShape) -> Result<Box<dyn Praxis>, LayerError>;
}
