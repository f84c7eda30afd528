/**
 * @file strata-neural/src/activation/mod.rs
 * @brief Activation function pairs
 *
 * An activation is a stateless pair of pure scalar functions: `activate`
 * maps one input cell to one output cell during forward propagation, and
 * `measure` combines a stored forward output (`weight`) with an incoming
 * error signal (`delta`) during backward propagation.
 *
 * Both halves are injectable into the kernel dispatcher as named
 * sub-programs: each carries a [`KernelSource`] so a compiled kernel can
 * report which primitive functions it was built from. Conformance tests
 * rely on that metadata to verify the correct activation was wired in.
 */

use strata_compute::KernelSource;

// === MODULE DECLARATIONS ===

/// Logistic sigmoid, the reference activation of the runtime.
pub mod sigmoid;

/// Rectified linear unit.
pub mod relu;

/// Hyperbolic tangent.
pub mod tanh;

/// Leaky rectified linear unit (slope 0.01 below zero).
pub mod leaky_relu;

// === RE-EXPORTS ===

pub use leaky_relu::LeakyRelu;
pub use relu::Relu;
pub use sigmoid::Sigmoid;
pub use tanh::Tanh;

// === ACTIVATION CONTRACT ===

/**
 * A stateless `(activate, measure)` pair.
 *
 * Implementations are zero-sized types: one activation definition is shared
 * by every layer instance that uses it, never copied or mutated. Both
 * functions must be pure and side-effect-free so the dispatcher may
 * evaluate them concurrently across output cells.
 */
pub trait ActivationFunction {
    /// Short name used to compose kernel and sub-program identifiers.
    const NAME: &'static str;

    /// Scalar formula of `activate`, preserved as introspection metadata.
    const ACTIVATE_BODY: &'static str;

    /// Scalar formula of `measure`, preserved as introspection metadata.
    const MEASURE_BODY: &'static str;

    /// Forward transfer function.
    fn activate(x: f64) -> f64;

    /// Backward gradient combination: `weight` is the forward output
    /// already produced for this cell, `delta` the upstream error signal.
    fn measure(weight: f64, delta: f64) -> f64;

    /// Named sub-program registered with forward kernels.
    fn activate_source() -> KernelSource {
        KernelSource::new(format!("{}.activate", Self::NAME), Self::ACTIVATE_BODY)
    }

    /// Named sub-program registered with backward kernels.
    fn measure_source() -> KernelSource {
        KernelSource::new(format!("{}.measure", Self::NAME), Self::MEASURE_BODY)
    }
}
