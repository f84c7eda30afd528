//! Compute-side error types
//!
//! Every error here is a deterministic programming or wiring mistake, not a
//! transient condition. Nothing is retried; callers treat these as fatal
//! construction-time failures.

use crate::tensor::TensorShape;

/// Errors raised by tensor construction and kernel dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
  /// An input tensor's dimensions disagree with the kernel's bound output
  /// shape. Kernels perform no broadcasting or bounds adjustment.
  #[error("kernel input {argument} has shape {actual}, expected {expected}")]
  ShapeMismatch {
    argument: usize,
    expected: TensorShape,
    actual: TensorShape,
  },

  /// A kernel handle was used before `compile_with` transitioned it.
  #[error("{0} kernel invoked before compilation")]
  KernelNotCompiled(&'static str),

  /// Nested input rows/slices disagree in length; tensors must be
  /// rectangular at every nesting depth.
  #[error("jagged tensor: element {index} has length {actual}, expected {expected}")]
  JaggedTensor {
    index: usize,
    expected: usize,
    actual: usize,
  },

  /// A shape with a zero dimension or an empty nested literal.
  #[error("invalid tensor shape: {0}")]
  InvalidShape(String),
}

/// Convenience alias used throughout the compute crate.
pub type Result<T> = std::result::Result<T, ComputeError>;
