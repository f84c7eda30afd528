//! Kernel compilation and data-parallel dispatch
//!
//! Compilation binds a scalar program to a [`LaunchConfig`]: the output
//! shape the kernel will be dispatched over, and the named pure sub-programs
//! the program calls. Both stay attached to the compiled kernel so tests and
//! tooling can verify what was wired in.
//!
//! Dispatch evaluates the program once per output coordinate. The programs
//! accepted here read at most one cell per input tensor, at the coordinate
//! of the output cell being computed, so every evaluation is independent and
//! the sweep parallelizes freely. The output tensor is fully assembled
//! before `run` returns; a kernel invocation completes or fails atomically.

use ndarray::{Array2, Array3, Zip};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ComputeError, Result};
use crate::tensor::{Tensor, TensorShape};

// === PROGRAM SURFACE ===

/// Coordinate of the output cell a kernel program is evaluating.
///
/// `z` is always zero under rank-2 dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadContext {
  pub x: usize,
  pub y: usize,
  pub z: usize,
}

/// Introspectable source of a kernel program or of a named sub-program.
///
/// `body` carries the scalar formula the program computes. It is metadata
/// for conformance checks, not executable text; the executable form is the
/// program function itself.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelSource {
  pub name: String,
  pub body: String,
}

impl KernelSource {
  pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      body: body.into(),
    }
  }
}

/// Compile-time kernel configuration: the output bounds the kernel is
/// dispatched over, plus the function dependencies of the program.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
  pub output: TensorShape,
  pub functions: Vec<KernelSource>,
}

/// Scalar program over one input tensor.
pub type UnaryProgram = fn(&Tensor, &ThreadContext) -> f64;

/// Scalar program over two input tensors.
pub type BinaryProgram = fn(&Tensor, &Tensor, &ThreadContext) -> f64;

// === COMPILED KERNELS ===

/// A unary program bound to its dispatch bounds.
#[derive(Debug, Clone)]
pub struct UnaryKernel {
  program: UnaryProgram,
  source: KernelSource,
  functions: Vec<KernelSource>,
  output: TensorShape,
}

/// A binary program bound to its dispatch bounds.
#[derive(Debug, Clone)]
pub struct BinaryKernel {
  program: BinaryProgram,
  source: KernelSource,
  functions: Vec<KernelSource>,
  output: TensorShape,
}

/// Compiles a one-input scalar program into a dispatchable kernel.
pub fn compile_unary(
  program: UnaryProgram,
  source: KernelSource,
  config: LaunchConfig,
) -> UnaryKernel {
  debug!(kernel = %source.name, output = %config.output, "compiling unary kernel");
  UnaryKernel {
    program,
    source,
    functions: config.functions,
    output: config.output,
  }
}

/// Compiles a two-input scalar program into a dispatchable kernel.
pub fn compile_binary(
  program: BinaryProgram,
  source: KernelSource,
  config: LaunchConfig,
) -> BinaryKernel {
  debug!(kernel = %source.name, output = %config.output, "compiling binary kernel");
  BinaryKernel {
    program,
    source,
    functions: config.functions,
    output: config.output,
  }
}

impl UnaryKernel {
  /// Source of the entry program.
  pub fn source(&self) -> &KernelSource {
    &self.source
  }

  /// Named sub-programs registered at compile time.
  pub fn functions(&self) -> &[KernelSource] {
    &self.functions
  }

  /// Output bounds the kernel was bound to.
  pub fn output(&self) -> TensorShape {
    self.output
  }

  /// Evaluates the program over the full output space.
  ///
  /// The input must match the bound output shape exactly; there is no
  /// broadcasting. A mismatch is a wiring bug in the caller and is surfaced
  /// as a fatal [`ComputeError::ShapeMismatch`].
  pub fn run(&self, input: &Tensor) -> Result<Tensor> {
    check_shape(0, self.output, input.shape())?;
    trace!(kernel = %self.source.name, "dispatching");
    Ok(dispatch(self.output, &|ctx| (self.program)(input, ctx)))
  }
}

impl BinaryKernel {
  pub fn source(&self) -> &KernelSource {
    &self.source
  }

  pub fn functions(&self) -> &[KernelSource] {
    &self.functions
  }

  pub fn output(&self) -> TensorShape {
    self.output
  }

  /// Evaluates the program over the full output space. Both inputs must
  /// match the bound output shape exactly.
  pub fn run(&self, first: &Tensor, second: &Tensor) -> Result<Tensor> {
    check_shape(0, self.output, first.shape())?;
    check_shape(1, self.output, second.shape())?;
    trace!(kernel = %self.source.name, "dispatching");
    Ok(dispatch(self.output, &|ctx| (self.program)(first, second, ctx)))
  }
}

fn check_shape(argument: usize, expected: TensorShape, actual: TensorShape) -> Result<()> {
  if expected != actual {
    return Err(ComputeError::ShapeMismatch {
      argument,
      expected,
      actual,
    });
  }
  Ok(())
}

// === DISPATCH ===

fn dispatch(output: TensorShape, eval: &(dyn Fn(&ThreadContext) -> f64 + Sync)) -> Tensor {
  match output {
    TensorShape::Rank2 { width, height } => {
      let mut cells = Array2::zeros((height, width));
      fill_rank2(&mut cells, eval);
      Tensor::Rank2(cells)
    }
    TensorShape::Rank3 {
      width,
      height,
      depth,
    } => {
      let mut cells = Array3::zeros((depth, height, width));
      fill_rank3(&mut cells, eval);
      Tensor::Rank3(cells)
    }
  }
}

#[cfg(feature = "parallel")]
fn fill_rank2(cells: &mut Array2<f64>, eval: &(dyn Fn(&ThreadContext) -> f64 + Sync)) {
  Zip::indexed(cells).par_for_each(|(y, x), cell| {
    *cell = eval(&ThreadContext { x, y, z: 0 });
  });
}

#[cfg(not(feature = "parallel"))]
fn fill_rank2(cells: &mut Array2<f64>, eval: &(dyn Fn(&ThreadContext) -> f64 + Sync)) {
  Zip::indexed(cells).for_each(|(y, x), cell| {
    *cell = eval(&ThreadContext { x, y, z: 0 });
  });
}

#[cfg(feature = "parallel")]
fn fill_rank3(cells: &mut Array3<f64>, eval: &(dyn Fn(&ThreadContext) -> f64 + Sync)) {
  Zip::indexed(cells).par_for_each(|(z, y, x), cell| {
    *cell = eval(&ThreadContext { x, y, z });
  });
}

#[cfg(not(feature = "parallel"))]
fn fill_rank3(cells: &mut Array3<f64>, eval: &(dyn Fn(&ThreadContext) -> f64 + Sync)) {
  Zip::indexed(cells).for_each(|(z, y, x), cell| {
    *cell = eval(&ThreadContext { x, y, z });
  });
}

// === KERNEL LIFECYCLE ===

/// Two-state lifecycle of a layer-owned kernel.
///
/// A handle starts `Uncompiled` and transitions through
/// [`KernelHandle::compile_with`]. Using it before the transition is a typed
/// error. Compiling again is not a guarded no-op: the prior kernel is
/// dropped and replaced, so callers compile at most once per owner.
#[derive(Debug)]
pub enum KernelHandle<K> {
  Uncompiled,
  Compiled(K),
}

impl<K> Default for KernelHandle<K> {
  fn default() -> Self {
    KernelHandle::Uncompiled
  }
}

impl<K> KernelHandle<K> {
  /// Transitions to `Compiled`, replacing any prior kernel.
  pub fn compile_with(&mut self, build: impl FnOnce() -> K) {
    *self = KernelHandle::Compiled(build());
  }

  /// The compiled kernel, or a typed error naming the kernel if it was
  /// never compiled.
  pub fn compiled(&self, name: &'static str) -> Result<&K> {
    match self {
      KernelHandle::Compiled(kernel) => Ok(kernel),
      KernelHandle::Uncompiled => Err(ComputeError::KernelNotCompiled(name)),
    }
  }

  pub fn is_compiled(&self) -> bool {
    matches!(self, KernelHandle::Compiled(_))
  }
}

// === TESTS ===
