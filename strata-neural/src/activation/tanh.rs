//! Hyperbolic tangent activation pair

use super::ActivationFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl ActivationFunction for Tanh {
    const NAME: &'static str = "tanh";
    const ACTIVATE_BODY: &'static str = "tanh(x)";
    const MEASURE_BODY: &'static str = "(1 - weight * weight) * delta";

    fn activate(x: f64) -> f64 {
        x.tanh()
    }

    fn measure(weight: f64, delta: f64) -> f64 {
        (1.0 - weight * weight) * delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn activate_matches_std_tanh() {
        assert_abs_diff_eq!(Tanh::activate(0.0), 0.0);
        assert_abs_diff_eq!(Tanh::activate(1.0), 1.0f64.tanh());
    }

    #[test]
    fn measure_uses_the_stored_output() {
        // d/dx tanh = 1 - tanh^2, expressed in terms of the forward output
        assert_abs_diff_eq!(Tanh::measure(0.5, 2.0), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Tanh::measure(1.0, 3.0), 0.0, epsilon = 1e-12);
    }
}
