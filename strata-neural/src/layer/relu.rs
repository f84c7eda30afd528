//! Rectified-linear layer

use super::activation::ActivationLayer;
use super::{LayerSettings, SharedLayer};
use crate::activation::Relu as ReluFunction;
use crate::error::LayerError;

/// Elementwise ReLU layer.
pub type Relu = ActivationLayer<ReluFunction>;

/// Factory entry point mirroring the upstream layer's shape.
pub fn relu(input_layer: SharedLayer, settings: &LayerSettings) -> Result<Relu, LayerError> {
    Relu::new(input_layer, settings)
}
