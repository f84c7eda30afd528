//! Hyperbolic-tangent layer

use super::activation::ActivationLayer;
use super::{LayerSettings, SharedLayer};
use crate::activation::Tanh as TanhFunction;
use crate::error::LayerError;

/// Elementwise tanh layer.
pub type Tanh = ActivationLayer<TanhFunction>;

/// Factory entry point mirroring the upstream layer's shape.
pub fn tanh(input_layer: SharedLayer, settings: &LayerSettings) -> Result<Tanh, LayerError> {
    Tanh::new(input_layer, settings)
}
