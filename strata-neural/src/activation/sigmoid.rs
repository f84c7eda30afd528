/**
 * @file strata-neural/src/activation/sigmoid.rs
 * @brief Logistic sigmoid activation pair
 *
 * `activate(x) = 1 / (1 + e^(-x))`, the smooth S-curve onto (0, 1).
 * `measure(weight, delta) = delta * weight * (1 - weight)` applies the
 * sigmoid derivative through the chain rule, where `weight` is the forward
 * output already computed for the cell.
 *
 * Standard IEEE double-precision arithmetic throughout; no special-casing
 * of overflow or NaN. `activate` saturates naturally toward 0 and 1 for
 * large-magnitude inputs.
 */

use super::ActivationFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl ActivationFunction for Sigmoid {
    const NAME: &'static str = "sigmoid";
    const ACTIVATE_BODY: &'static str = "1 / (1 + exp(-x))";
    const MEASURE_BODY: &'static str = "delta * weight * (1 - weight)";

    fn activate(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    fn measure(weight: f64, delta: f64) -> f64 {
        delta * weight * (1.0 - weight)
    }
}

// === TESTS ===

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn activate_matches_closed_form() {
        for &x in &[-20.0, -3.5, -1.0, -0.1, 0.0, 0.1, 1.0, 3.5, 20.0] {
            let expected = 1.0 / (1.0 + f64::exp(-x));
            assert_relative_eq!(Sigmoid::activate(x), expected, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(Sigmoid::activate(0.0), 0.5);
        assert_abs_diff_eq!(Sigmoid::activate(1.0), 0.731_058_578_6, epsilon = 1e-6);
    }

    #[test]
    fn activate_is_monotonically_increasing() {
        let mut previous = Sigmoid::activate(-40.0);
        let mut x = -40.0;
        while x <= 40.0 {
            let current = Sigmoid::activate(x);
            assert!(current >= previous, "sigmoid decreased at x = {}", x);
            previous = current;
            x += 0.25;
        }
    }

    #[test]
    fn activate_saturates_toward_bounds() {
        assert_abs_diff_eq!(Sigmoid::activate(-1000.0), 0.0);
        assert_abs_diff_eq!(Sigmoid::activate(1000.0), 1.0);
    }

    #[test]
    fn measure_is_the_chain_rule_product() {
        assert_abs_diff_eq!(Sigmoid::measure(0.1, 1.0), 0.09, epsilon = 1e-12);
        assert_abs_diff_eq!(Sigmoid::measure(0.5, 2.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Sigmoid::measure(1.0, 1.0), 0.0, epsilon = 1e-12);
        // Weights outside (0, 1) are not clamped
        assert_abs_diff_eq!(Sigmoid::measure(1.1, 1.0), -0.11, epsilon = 1e-12);
    }
}
