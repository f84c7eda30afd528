/**
 * @file strata-neural/src/layer/activation.rs
 * @brief Generic elementwise activation layer
 *
 * `ActivationLayer<A>` implements the full layer lifecycle for any
 * [`ActivationFunction`]: it adopts the upstream layer's shape at
 * construction, lazily compiles a forward and a backward kernel bound to
 * that shape, and replaces its own `weights`/`deltas` tensors on every
 * `predict`/`compare` call. Concrete layers (`Sigmoid`, `Relu`, ...) are
 * thin aliases over this type.
 *
 * ## Kernel programs
 *
 * The four scalar programs below compute one output cell each and read
 * exactly one input cell per input tensor, at the coordinate of the output
 * cell being computed. No cross-cell access, no shared mutable state: the
 * dispatcher may evaluate all cells concurrently.
 *
 * - `predict_2d`:  `activate(inputs[y][x])`
 * - `predict_3d`:  `activate(inputs[z][y][x])`
 * - `compare_2d`:  `measure(weights[y][x], deltas[y][x])`
 * - `compare_3d`:  `measure(weights[z][y][x], deltas[z][y][x])`
 *
 * Inputs must already match the kernel's bound output shape exactly; the
 * programs perform no bounds adjustment or broadcasting. A mismatch is a
 * network-wiring bug and surfaces as a fatal typed error at dispatch.
 */

use std::marker::PhantomData;

use tracing::debug;

use strata_compute::{
    BinaryKernel, KernelHandle, KernelSource, LaunchConfig, Tensor, TensorShape, ThreadContext,
    UnaryKernel, compile_binary, compile_unary,
};

use super::{Layer, LayerSettings, SharedLayer};
use crate::activation::ActivationFunction;
use crate::error::LayerError;
use crate::praxis::Praxis;

// === KERNEL PROGRAMS ===

/// Forward program, rank 2.
pub fn predict_2d<A: ActivationFunction>(inputs: &Tensor, ctx: &ThreadContext) -> f64 {
    A::activate(inputs.cell_2d(ctx.x, ctx.y))
}

/// Forward program, rank 3.
pub fn predict_3d<A: ActivationFunction>(inputs: &Tensor, ctx: &ThreadContext) -> f64 {
    A::activate(inputs.cell_3d(ctx.x, ctx.y, ctx.z))
}

/// Backward program, rank 2: combines the stored forward output with the
/// incoming gradient at the same coordinate.
pub fn compare_2d<A: ActivationFunction>(
    weights: &Tensor,
    deltas: &Tensor,
    ctx: &ThreadContext,
) -> f64 {
    A::measure(weights.cell_2d(ctx.x, ctx.y), deltas.cell_2d(ctx.x, ctx.y))
}

/// Backward program, rank 3.
pub fn compare_3d<A: ActivationFunction>(
    weights: &Tensor,
    deltas: &Tensor,
    ctx: &ThreadContext,
) -> f64 {
    A::measure(
        weights.cell_3d(ctx.x, ctx.y, ctx.z),
        deltas.cell_3d(ctx.x, ctx.y, ctx.z),
    )
}

pub fn predict_2d_source<A: ActivationFunction>() -> KernelSource {
    KernelSource::new(format!("{}::predict_2d", A::NAME), "activate(inputs[y][x])")
}

pub fn predict_3d_source<A: ActivationFunction>() -> KernelSource {
    KernelSource::new(
        format!("{}::predict_3d", A::NAME),
        "activate(inputs[z][y][x])",
    )
}

pub fn compare_2d_source<A: ActivationFunction>() -> KernelSource {
    KernelSource::new(
        format!("{}::compare_2d", A::NAME),
        "measure(weights[y][x], deltas[y][x])",
    )
}

pub fn compare_3d_source<A: ActivationFunction>() -> KernelSource {
    KernelSource::new(
        format!("{}::compare_3d", A::NAME),
        "measure(weights[z][y][x], deltas[z][y][x])",
    )
}

// === LAYER ===

/**
 * Elementwise activation layer over an upstream layer.
 *
 * State machine over two independent kernel resources, each `Uncompiled`
 * until the first (and only) `setup_kernels` call. The praxis handle, in
 * contrast, is constructed eagerly: the factory runs during construction,
 * regardless of kernel compilation state.
 */
pub struct ActivationLayer<A: ActivationFunction> {
    shape: TensorShape,
    weights: Tensor,
    deltas: Tensor,
    predict_kernel: KernelHandle<UnaryKernel>,
    compare_kernel: KernelHandle<BinaryKernel>,
    praxis: Option<Box<dyn Praxis>>,
    input_layer: SharedLayer,
    _activation: PhantomData<A>,
}

impl<A: ActivationFunction> std::fmt::Debug for ActivationLayer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationLayer")
            .field("activation", &A::NAME)
            .field("shape", &self.shape)
            .field("praxis", &self.praxis.is_some())
            .finish_non_exhaustive()
    }
}

impl<A: ActivationFunction> ActivationLayer<A> {
    /// Constructs the layer over an upstream layer, adopting its shape.
    ///
    /// `weights` and `deltas` start zero-filled and shape-conformant; both
    /// kernels start uncompiled. A configured praxis factory runs here, and
    /// its errors propagate unmodified.
    pub fn new(input_layer: SharedLayer, settings: &LayerSettings) -> Result<Self, LayerError> {
        let shape = input_layer.borrow().shape();
        let praxis = settings.build_praxis(shape)?;
        debug!(layer = A::NAME, %shape, "constructed activation layer");

        Ok(Self {
            shape,
            weights: Tensor::zeros(shape),
            deltas: Tensor::zeros(shape),
            predict_kernel: KernelHandle::default(),
            compare_kernel: KernelHandle::default(),
            praxis,
            input_layer,
            _activation: PhantomData,
        })
    }

    /// Forward kernel handle, for introspection.
    pub fn predict_kernel(&self) -> &KernelHandle<UnaryKernel> {
        &self.predict_kernel
    }

    /// Backward kernel handle, for introspection.
    pub fn compare_kernel(&self) -> &KernelHandle<BinaryKernel> {
        &self.compare_kernel
    }
}

impl<A: ActivationFunction> Layer for ActivationLayer<A> {
    fn shape(&self) -> TensorShape {
        self.shape
    }

    fn weights(&self) -> &Tensor {
        &self.weights
    }

    fn deltas(&self) -> &Tensor {
        &self.deltas
    }

    fn set_deltas(&mut self, deltas: Tensor) {
        self.deltas = deltas;
    }

    fn praxis(&self) -> Option<&dyn Praxis> {
        self.praxis.as_deref()
    }

    fn praxis_mut(&mut self) -> Option<&mut dyn Praxis> {
        self.praxis.as_mut().map(|p| &mut **p as &mut dyn Praxis)
    }

    /// Selects the program pair matching the layer's rank and binds each
    /// kernel to the layer's own shape as its dispatch bounds. The forward
    /// kernel carries `activate` as its sole function dependency, the
    /// backward kernel `measure`.
    fn setup_kernels(&mut self) {
        let output = self.shape;
        match output {
            TensorShape::Rank2 { .. } => {
                self.predict_kernel.compile_with(|| {
                    compile_unary(
                        predict_2d::<A>,
                        predict_2d_source::<A>(),
                        LaunchConfig {
                            output,
                            functions: vec![A::activate_source()],
                        },
                    )
                });
                self.compare_kernel.compile_with(|| {
                    compile_binary(
                        compare_2d::<A>,
                        compare_2d_source::<A>(),
                        LaunchConfig {
                            output,
                            functions: vec![A::measure_source()],
                        },
                    )
                });
            }
            TensorShape::Rank3 { .. } => {
                self.predict_kernel.compile_with(|| {
                    compile_unary(
                        predict_3d::<A>,
                        predict_3d_source::<A>(),
                        LaunchConfig {
                            output,
                            functions: vec![A::activate_source()],
                        },
                    )
                });
                self.compare_kernel.compile_with(|| {
                    compile_binary(
                        compare_3d::<A>,
                        compare_3d_source::<A>(),
                        LaunchConfig {
                            output,
                            functions: vec![A::measure_source()],
                        },
                    )
                });
            }
        }
    }

    fn predict(&mut self) -> Result<(), LayerError> {
        let kernel = self.predict_kernel.compiled("predict")?;
        let weights = {
            let input = self.input_layer.borrow();
            kernel.run(input.weights())?
        };
        self.weights = weights;
        Ok(())
    }

    fn compare(&mut self) -> Result<(), LayerError> {
        let kernel = self.compare_kernel.compiled("compare")?;
        let deltas = kernel.run(&self.weights, &self.deltas)?;
        self.deltas = deltas;
        Ok(())
    }
}
