//! Prelude module for convenient imports

pub use crate::error::{ComputeError, Result};
pub use crate::kernel::{
  BinaryKernel, BinaryProgram, KernelHandle, KernelSource, LaunchConfig, ThreadContext,
  UnaryKernel, UnaryProgram, compile_binary, compile_unary,
};
pub use crate::tensor::{Tensor, TensorShape};
