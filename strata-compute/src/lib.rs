//! Data-parallel kernel execution engine for the strata layer runtime
//!
//! A kernel program in strata is a pure scalar function: it receives the
//! coordinate of a single output cell plus whole-tensor inputs, and returns
//! the value of that one cell. This crate compiles such programs into
//! dispatch-bound kernels and evaluates them over the full output coordinate
//! space, in parallel when the `parallel` feature is enabled.
//!
//! The contract is deliberately narrow:
//!
//! - [`kernel::compile_unary`] / [`kernel::compile_binary`] bind a program to
//!   its output bounds and to the named pure sub-programs it calls.
//! - The compiled kernel validates every input tensor against the bound
//!   output shape, evaluates the program once per output coordinate, and
//!   returns a fully assembled tensor. No partial results are observable.
//! - The original program source and its function-dependency list stay
//!   attached to the compiled kernel for introspection.

pub mod error;
pub mod kernel;
pub mod prelude;
pub mod tensor;

pub use error::{ComputeError, Result};
pub use kernel::{
  BinaryKernel, BinaryProgram, KernelHandle, KernelSource, LaunchConfig, ThreadContext,
  UnaryKernel, UnaryProgram, compile_binary, compile_unary,
};
pub use tensor::{Tensor, TensorShape};
