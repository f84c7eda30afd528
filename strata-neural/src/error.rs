//! Layer-side error types
//!
//! Everything here is a deterministic wiring mistake surfaced fail-fast.
//! Nothing is retried or substituted with a default; masking an error by
//! silently skipping a pass would silently skip network computation.

use strata_compute::ComputeError;

/// Errors raised by layer construction and the predict/compare passes.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// Kernel lifecycle and dispatch failures: using a kernel before
    /// `setup_kernels`, or feeding a tensor that disagrees with the
    /// kernel's bound output shape.
    #[error("kernel execution error: {0}")]
    Compute(#[from] ComputeError),

    /// The optimizer factory failed while the layer was being constructed.
    /// Propagated unmodified; the layer does not retry or substitute a
    /// default praxis.
    #[error("praxis construction failed: {0}")]
    PraxisConstruction(String),
}
