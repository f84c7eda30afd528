//! Leaky rectified-linear layer

use super::activation::ActivationLayer;
use super::{LayerSettings, SharedLayer};
use crate::activation::LeakyRelu as LeakyReluFunction;
use crate::error::LayerError;

/// Elementwise leaky-ReLU layer.
pub type LeakyRelu = ActivationLayer<LeakyReluFunction>;

/// Factory entry point mirroring the upstream layer's shape.
pub fn leaky_relu(
    input_layer: SharedLayer,
    settings: &LayerSettings,
) -> Result<LeakyRelu, LayerError> {
    LeakyRelu::new(input_layer, settings)
}
