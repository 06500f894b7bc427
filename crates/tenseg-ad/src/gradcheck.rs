//! Gradient checking utilities
//!
//! Verifies analytic gradient implementations (VJP rules) against numerical
//! gradients computed with finite differences. This is the standard way to
//! validate a hand-derived backward rule.
//!
//! # Finite Difference Methods
//!
//! - **Central difference**: `f'(x) ≈ [f(x+h) - f(x-h)] / (2h)` (more accurate)
//! - **Forward difference**: `f'(x) ≈ [f(x+h) - f(x)] / h` (half the evaluations)
//!
//! Finite differences do not tolerate NaN inputs (every perturbed evaluation
//! would be NaN); exclude NaN-carrying data before checking.
//!
//! # Example
//!
//! ```
//! use tenseg_ad::gradcheck::{check_gradient, GradCheckConfig};
//! use tenseg_core::DenseND;
//!
//! // f(x) = x, so the VJP is the identity on the cotangent.
//! let f = |x: &DenseND<f64>| Ok(x.clone());
//! let df = |_x: &DenseND<f64>, grad_y: &DenseND<f64>| Ok(grad_y.clone());
//!
//! let x = DenseND::ones(&[3, 2]);
//! let grad_y = DenseND::ones(&[3, 2]);
//!
//! let result = check_gradient(f, df, &x, &grad_y, &GradCheckConfig::default()).unwrap();
//! assert!(result.passed);
//! ```

use anyhow::{anyhow, Result};
use scirs2_core::numeric::Float;
use tenseg_core::DenseND;

/// Gradient checking configuration
#[derive(Debug, Clone)]
pub struct GradCheckConfig {
    /// Step size for finite differences (default: 1e-5)
    pub epsilon: f64,

    /// Relative tolerance for gradient comparison (default: 1e-3)
    pub rtol: f64,

    /// Absolute tolerance for gradient comparison (default: 1e-5)
    pub atol: f64,

    /// Use central difference (more accurate but 2x the evaluations)
    pub use_central_diff: bool,

    /// Print detailed mismatch reports
    pub verbose: bool,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            rtol: 1e-3,
            atol: 1e-5,
            use_central_diff: true,
            verbose: false,
        }
    }
}

/// Result of gradient checking
#[derive(Debug)]
pub struct GradCheckResult {
    /// Maximum absolute difference between analytical and numerical gradients
    pub max_abs_diff: f64,

    /// Maximum relative difference
    pub max_rel_diff: f64,

    /// Whether the gradient check passed
    pub passed: bool,

    /// Number of elements checked
    pub num_elements: usize,

    /// Number of elements that failed the check
    pub num_failures: usize,
}

/// Check a gradient implementation using finite differences
///
/// Perturbs each element of `x`, contracts the output delta with the
/// upstream gradient `grad_y`, and compares the resulting numerical
/// gradient against `df(x, grad_y)` within `rtol`/`atol`.
///
/// # Arguments
///
/// * `f` - Forward function: x -> y
/// * `df` - Gradient function: (x, grad_y) -> grad_x
/// * `x` - Input tensor to check gradients at (must be NaN-free)
/// * `grad_y` - Upstream gradient (∂L/∂y), shaped like `f(x)`
/// * `config` - Gradient checking configuration
pub fn check_gradient<T, F, G>(
    f: F,
    df: G,
    x: &DenseND<T>,
    grad_y: &DenseND<T>,
    config: &GradCheckConfig,
) -> Result<GradCheckResult>
where
    T: Float + std::fmt::Display,
    F: Fn(&DenseND<T>) -> Result<DenseND<T>>,
    G: Fn(&DenseND<T>, &DenseND<T>) -> Result<DenseND<T>>,
{
    let analytical = df(x, grad_y)?;
    if analytical.shape() != x.shape() {
        return Err(anyhow!(
            "Gradient shape {:?} doesn't match input shape {:?}",
            analytical.shape(),
            x.shape()
        ));
    }

    let numerical = numerical_gradient(&f, x, grad_y, config)?;

    compare_gradients(&analytical, &numerical, config)
}

/// Contract the upstream gradient with a scaled output difference:
/// `sum(grad_y * (y_a - y_b)) * scale`
fn contract_delta<T>(
    grad_y: &DenseND<T>,
    y_a: &DenseND<T>,
    y_b: &DenseND<T>,
    scale: T,
) -> Result<T>
where
    T: Float,
{
    if y_a.shape() != grad_y.shape() || y_b.shape() != grad_y.shape() {
        return Err(anyhow!(
            "Output shape {:?} doesn't match upstream gradient shape {:?}",
            y_a.shape(),
            grad_y.shape()
        ));
    }

    let mut acc = T::zero();
    for ((&g, &a), &b) in grad_y
        .as_slice()
        .iter()
        .zip(y_a.as_slice())
        .zip(y_b.as_slice())
    {
        acc = acc + g * (a - b);
    }
    Ok(acc * scale)
}

/// Compute the numerical gradient of `sum(grad_y * f(x))` w.r.t. `x`
fn numerical_gradient<T, F>(
    f: &F,
    x: &DenseND<T>,
    grad_y: &DenseND<T>,
    config: &GradCheckConfig,
) -> Result<DenseND<T>>
where
    T: Float,
    F: Fn(&DenseND<T>) -> Result<DenseND<T>>,
{
    let epsilon = T::from(config.epsilon).ok_or_else(|| anyhow!("Failed to convert epsilon"))?;
    let mut numerical = DenseND::zeros(x.shape());

    if config.use_central_diff {
        for i in 0..x.len() {
            let v = x.as_slice()[i];

            let mut x_plus = x.clone();
            x_plus.as_slice_mut()[i] = v + epsilon;
            let y_plus = f(&x_plus)?;

            let mut x_minus = x.clone();
            x_minus.as_slice_mut()[i] = v - epsilon;
            let y_minus = f(&x_minus)?;

            numerical.as_slice_mut()[i] =
                contract_delta(grad_y, &y_plus, &y_minus, T::one() / (epsilon + epsilon))?;
        }
    } else {
        let y_base = f(x)?;
        for i in 0..x.len() {
            let v = x.as_slice()[i];

            let mut x_plus = x.clone();
            x_plus.as_slice_mut()[i] = v + epsilon;
            let y_plus = f(&x_plus)?;

            numerical.as_slice_mut()[i] =
                contract_delta(grad_y, &y_plus, &y_base, T::one() / epsilon)?;
        }
    }

    Ok(numerical)
}

/// Compare analytical and numerical gradients element by element
fn compare_gradients<T>(
    analytical: &DenseND<T>,
    numerical: &DenseND<T>,
    config: &GradCheckConfig,
) -> Result<GradCheckResult>
where
    T: Float + std::fmt::Display,
{
    let rtol = T::from(config.rtol).ok_or_else(|| anyhow!("Failed to convert rtol"))?;
    let atol = T::from(config.atol).ok_or_else(|| anyhow!("Failed to convert atol"))?;

    let mut max_abs_diff = 0.0_f64;
    let mut max_rel_diff = 0.0_f64;
    let mut num_failures = 0;

    for (i, (&a_val, &n_val)) in analytical
        .as_slice()
        .iter()
        .zip(numerical.as_slice())
        .enumerate()
    {
        let abs_diff = (a_val - n_val).abs();
        let rel_diff = if n_val.abs() > T::epsilon() {
            abs_diff / n_val.abs()
        } else {
            abs_diff
        };

        let abs_diff_f64 = abs_diff
            .to_f64()
            .ok_or_else(|| anyhow!("Conversion error"))?;
        let rel_diff_f64 = rel_diff
            .to_f64()
            .ok_or_else(|| anyhow!("Conversion error"))?;

        max_abs_diff = max_abs_diff.max(abs_diff_f64);
        max_rel_diff = max_rel_diff.max(rel_diff_f64);

        if abs_diff > atol && rel_diff > rtol {
            num_failures += 1;

            if config.verbose {
                println!(
                    "Gradient mismatch at flat index {}: analytical={}, numerical={}, abs_diff={}, rel_diff={}",
                    i, a_val, n_val, abs_diff, rel_diff
                );
            }
        }
    }

    let passed = num_failures == 0;

    if config.verbose {
        if passed {
            println!("Gradient check passed");
        } else {
            println!(
                "Gradient check failed: {}/{} elements exceeded tolerance",
                num_failures,
                analytical.len()
            );
        }
        println!("  Max absolute difference: {:.2e}", max_abs_diff);
        println!("  Max relative difference: {:.2e}", max_rel_diff);
    }

    Ok(GradCheckResult {
        max_abs_diff,
        max_rel_diff,
        passed,
        num_elements: analytical.len(),
        num_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradcheck_identity() {
        // f(x) = x, df/dx = 1
        let f = |x: &DenseND<f64>| Ok(x.clone());
        let df = |_x: &DenseND<f64>, grad_y: &DenseND<f64>| Ok(grad_y.clone());

        let x = DenseND::from_vec(vec![0.5, -1.0, 2.0, 3.5], &[4]).unwrap();
        let grad_y = DenseND::ones(&[4]);

        let result = check_gradient(f, df, &x, &grad_y, &GradCheckConfig::default()).unwrap();
        assert!(result.passed);
        assert!(result.max_abs_diff < 1e-6);
    }

    #[test]
    fn test_gradcheck_cube() {
        // f(x) = x^3, df/dx = 3x^2
        let f = |x: &DenseND<f64>| {
            let mut y = x.clone();
            for v in y.as_slice_mut() {
                *v = *v * *v * *v;
            }
            Ok(y)
        };
        let df = |x: &DenseND<f64>, grad_y: &DenseND<f64>| {
            let mut grad = x.clone();
            for (g, (&xv, &gy)) in grad
                .as_slice_mut()
                .iter_mut()
                .zip(x.as_slice().iter().zip(grad_y.as_slice()))
            {
                *g = 3.0 * xv * xv * gy;
            }
            Ok(grad)
        };

        let x = DenseND::from_vec(vec![1.0, -2.0, 0.5, 3.0], &[2, 2]).unwrap();
        let grad_y = DenseND::from_vec(vec![1.0, 2.0, -1.0, 0.5], &[2, 2]).unwrap();

        let result = check_gradient(f, df, &x, &grad_y, &GradCheckConfig::default()).unwrap();
        assert!(result.passed, "max_rel_diff = {}", result.max_rel_diff);
    }

    #[test]
    fn test_gradcheck_catches_wrong_gradient() {
        // Claimed gradient is off by a factor of two.
        let f = |x: &DenseND<f64>| {
            let mut y = x.clone();
            for v in y.as_slice_mut() {
                *v = *v * *v;
            }
            Ok(y)
        };
        let df = |x: &DenseND<f64>, grad_y: &DenseND<f64>| {
            let mut grad = x.clone();
            for (g, (&xv, &gy)) in grad
                .as_slice_mut()
                .iter_mut()
                .zip(x.as_slice().iter().zip(grad_y.as_slice()))
            {
                *g = 4.0 * xv * gy;
            }
            Ok(grad)
        };

        let x = DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let grad_y = DenseND::ones(&[3]);

        let result = check_gradient(f, df, &x, &grad_y, &GradCheckConfig::default()).unwrap();
        assert!(!result.passed);
        assert!(result.num_failures > 0);
    }

    #[test]
    fn test_gradcheck_forward_difference() {
        let f = |x: &DenseND<f64>| Ok(x.clone());
        let df = |_x: &DenseND<f64>, grad_y: &DenseND<f64>| Ok(grad_y.clone());

        let x = DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let grad_y = DenseND::ones(&[2]);

        let config = GradCheckConfig {
            use_central_diff: false,
            ..GradCheckConfig::default()
        };
        let result = check_gradient(f, df, &x, &grad_y, &config).unwrap();
        assert!(result.passed);
    }

    #[test]
    fn test_gradcheck_config_default() {
        let config = GradCheckConfig::default();
        assert_eq!(config.epsilon, 1e-5);
        assert_eq!(config.rtol, 1e-3);
        assert_eq!(config.atol, 1e-5);
        assert!(config.use_central_diff);
        assert!(!config.verbose);
    }
}
