/**
 * @file strata-neural/src/layer/sigmoid.rs
 * @brief Sigmoid layer: elementwise logistic activation
 *
 * The composition root of the runtime: a [`Sigmoid`] layer maps the
 * upstream layer's `weights` through the logistic function during the
 * forward pass, and combines its own stored `weights` with the incoming
 * `deltas` through the sigmoid derivative during the backward pass.
 */

use strata_compute::{BinaryProgram, UnaryProgram};

use super::activation::{ActivationLayer, compare_2d, compare_3d, predict_2d, predict_3d};
use super::{LayerSettings, SharedLayer};
use crate::activation::Sigmoid as SigmoidFunction;
use crate::error::LayerError;

/// Elementwise sigmoid layer.
pub type Sigmoid = ActivationLayer<SigmoidFunction>;

/// Monomorphic handles to the four sigmoid kernel programs.
pub const PREDICT_2D: UnaryProgram = predict_2d::<SigmoidFunction>;
pub const PREDICT_3D: UnaryProgram = predict_3d::<SigmoidFunction>;
pub const COMPARE_2D: BinaryProgram = compare_2d::<SigmoidFunction>;
pub const COMPARE_3D: BinaryProgram = compare_3d::<SigmoidFunction>;

/// Factory entry point: constructs a sigmoid layer whose shape mirrors the
/// upstream layer and whose praxis comes from the settings bundle.
pub fn sigmoid(input_layer: SharedLayer, settings: &LayerSettings) -> Result<Sigmoid, LayerError> {
    Sigmoid::new(input_layer, settings)
}
