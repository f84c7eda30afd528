/**
 * @file strata-neural/src/layer/mod.rs
 * @brief Layer contract and settings
 *
 * Every layer exposes the same surface it consumes from its upstream layer:
 * shape dimensions, a `weights` tensor (forward-pass output), a `deltas`
 * tensor (backward-pass gradient), an opaque praxis handle, and the
 * `setup_kernels`/`predict`/`compare` lifecycle. The symmetric contract is
 * what lets layers chain arbitrarily.
 *
 * ## Execution model
 *
 * Layers are single-threaded and synchronous: `predict` and `compare` run
 * to completion before returning, and the network drives layers in a strict
 * forward-then-backward sequence. Tensors passed between layers are read
 * through shared handles but never concurrently mutated. The only component
 * with internal parallelism is the kernel dispatcher in `strata-compute`.
 */

use std::cell::RefCell;
use std::rc::Rc;

use strata_compute::{Tensor, TensorShape};

use crate::error::LayerError;
use crate::praxis::{Praxis, PraxisFactory};

// === MODULE DECLARATIONS ===

/// Generic elementwise activation layer and its kernel programs.
pub mod activation;

/// Chain head holding externally supplied weights.
pub mod input;

/// Concrete activation layers.
pub mod leaky_relu;
pub mod relu;
pub mod sigmoid;
pub mod tanh;

// === RE-EXPORTS ===

pub use activation::ActivationLayer;
pub use input::Input;
pub use leaky_relu::{LeakyRelu, leaky_relu};
pub use relu::{Relu, relu};
pub use sigmoid::{Sigmoid, sigmoid};
pub use tanh::{Tanh, tanh};

// === LAYER CONTRACT ===

/// Shared handle to a layer in a network graph.
pub type SharedLayer = Rc<RefCell<dyn Layer>>;

/// Wraps a layer into a [`SharedLayer`] handle.
pub fn shared<L: Layer + 'static>(layer: L) -> SharedLayer {
    Rc::new(RefCell::new(layer))
}

/**
 * The contract every layer exposes to the rest of the network, identical in
 * shape to the upstream contract it consumes.
 *
 * A layer exclusively owns its `weights`, `deltas`, and kernel handles.
 * `weights` here is the layer's forward-pass output, not a learned
 * parameter matrix.
 */
pub trait Layer {
    /// Output shape, fixed at construction and never mutated afterward.
    fn shape(&self) -> TensorShape;

    fn width(&self) -> usize {
        self.shape().width()
    }

    fn height(&self) -> usize {
        self.shape().height()
    }

    fn depth(&self) -> Option<usize> {
        self.shape().depth()
    }

    /// Forward-pass output stored on this layer.
    fn weights(&self) -> &Tensor;

    /// Gradient tensor stored on this layer.
    fn deltas(&self) -> &Tensor;

    /// Places an incoming gradient on this layer. Called by the downstream
    /// consumer before `compare`; the shape is validated when the backward
    /// kernel runs.
    fn set_deltas(&mut self, deltas: Tensor);

    /// Optimizer handle constructed at layer creation. Opaque to the layer
    /// core; only the training loop calls into it.
    fn praxis(&self) -> Option<&dyn Praxis>;

    /// Mutable access to the praxis handle, for the training loop's use.
    fn praxis_mut(&mut self) -> Option<&mut dyn Praxis>;

    /// Compiles the layer's kernels, bound to its own output shape.
    ///
    /// Not guarded against repeat calls: compiling again replaces the
    /// existing kernels. Callers compile at most once per layer.
    fn setup_kernels(&mut self);

    /// Forward pass. Requires compiled kernels; fails with a typed error
    /// otherwise rather than silently skipping the computation.
    fn predict(&mut self) -> Result<(), LayerError>;

    /// Backward pass over this layer's own `weights` and `deltas`. Same
    /// kernel-compilation requirement as `predict`.
    fn compare(&mut self) -> Result<(), LayerError>;
}

// === SETTINGS ===

/// Settings bundle consumed at layer construction.
#[derive(Default)]
pub struct LayerSettings {
    /// Optimizer factory invoked once per layer at construction time.
    /// Factory errors propagate unmodified out of the layer constructor.
    pub praxis: Option<Rc<dyn PraxisFactory>>,
}

impl LayerSettings {
    pub fn with_praxis(factory: Rc<dyn PraxisFactory>) -> Self {
        Self {
            praxis: Some(factory),
        }
    }

    /// Builds this layer's praxis, if a factory is configured.
    pub(crate) fn build_praxis(
        &self,
        shape: TensorShape,
    ) -> Result<Option<Box<dyn Praxis>>, LayerError> {
        match self.praxis.as_ref() {
            Some(factory) => Ok(Some(factory.build(shape)?)),
            None => Ok(None),
        }
    }
}
