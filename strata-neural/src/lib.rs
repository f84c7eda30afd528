//! Elementwise activation layers for the strata runtime
//!
//! This crate implements the layer side of strata: activation-function pairs
//! (`activate` for forward propagation, `measure` for backward propagation),
//! layers that schedule those pairs as data-parallel kernels through
//! `strata-compute`, and the praxis (optimizer) contract each layer carries.
//!
//! Every layer exposes the same contract it consumes (shape, `weights`,
//! `deltas`, `praxis`, `setup_kernels`, `predict`, `compare`), so layers
//! chain arbitrarily. A layer's `weights` tensor is its forward-pass output,
//! not a learned parameter matrix; its `deltas` tensor is the gradient it
//! produces during the backward pass.
//!
//! ### Quick start:
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use strata_compute::{Tensor, TensorShape};
//! use strata_neural::layer::{sigmoid, Input, Layer, LayerSettings, SharedLayer};
//!
//! # fn main() -> Result<(), strata_neural::LayerError> {
//! let input = Rc::new(RefCell::new(Input::new(TensorShape::rank2(4, 3))));
//! input.borrow_mut().set_weights(Tensor::from_rows(&[
//!     vec![0.1, 0.2, 0.3, 0.4],
//!     vec![0.5, 0.6, 0.7, 0.8],
//!     vec![0.9, 1.0, 1.1, 1.2],
//! ])?)?;
//!
//! let head: SharedLayer = input.clone();
//! let mut layer = sigmoid(head, &LayerSettings::default())?;
//! layer.setup_kernels();
//! layer.predict()?;
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod error;
pub mod layer;
pub mod praxis;

pub use activation::ActivationFunction;
pub use error::LayerError;
pub use layer::{ActivationLayer, Input, Layer, LayerSettings, SharedLayer, Sigmoid};
pub use praxis::{Praxis, PraxisFactory};
