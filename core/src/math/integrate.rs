use crate::prelude::{ChromaError, ChromaResult};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numerical rule used to turn a peak window into an elution volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMethod {
    #[default]
    Simpson,
    Trapezoid,
}

impl IntegrationMethod {
    pub fn apply(self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        match self {
            IntegrationMethod::Simpson => simpson(x, y),
            IntegrationMethod::Trapezoid => trapezoid(x, y),
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = ChromaError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "simpson" => Ok(IntegrationMethod::Simpson),
            "trapezoid" => Ok(IntegrationMethod::Trapezoid),
            _ => Err(ChromaError::UnsupportedIntegration(name.to_string())),
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::Simpson => write!(f, "simpson"),
            IntegrationMethod::Trapezoid => write!(f, "trapezoid"),
        }
    }
}

/// Integrate `y` over `x` with the given rule, rejecting mismatched inputs.
pub fn integrate(
    method: IntegrationMethod,
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
) -> ChromaResult<f64> {
    if x.len() != y.len() {
        return Err(ChromaError::InvalidPeak(format!(
            "cannot integrate {} values over {} sample times",
            y.len(),
            x.len()
        )));
    }
    Ok(method.apply(x, y))
}

/// Composite trapezoid rule over possibly uneven sample spacing.
pub fn trapezoid(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let n = x.len().min(y.len());
    (1..n)
        .map(|i| (x[i] - x[i - 1]) * (y[i] + y[i - 1]) / 2.0)
        .sum()
}

/// Composite Simpson's rule over possibly uneven sample spacing.
///
/// * fewer than 2 samples: 0.0
/// * 2 samples: a single trapezoid
/// * odd sample count: composite Simpson over every pair of intervals
/// * even sample count: composite Simpson over the first `n - 1` samples,
///   then the last interval is closed with Cartwright's correction
///   `alpha * y[n-1] + beta * y[n-2] - eta * y[n-3]`, which integrates the
///   parabola through the final three samples over that interval only.
pub fn simpson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let n = x.len().min(y.len());
    match n {
        0 | 1 => 0.0,
        2 => trapezoid(x, y),
        _ if n % 2 == 1 => simpson_pairs(x, y, n - 1),
        _ => {
            let head = simpson_pairs(x, y, n - 2);
            let h0 = x[n - 2] - x[n - 3];
            let h1 = x[n - 1] - x[n - 2];
            let alpha = (2.0 * h1 * h1 + 3.0 * h0 * h1) / (6.0 * (h0 + h1));
            let beta = (h1 * h1 + 3.0 * h0 * h1) / (6.0 * h0);
            let eta = h1 * h1 * h1 / (6.0 * h0 * (h0 + h1));
            head + alpha * y[n - 1] + beta * y[n - 2] - eta * y[n - 3]
        }
    }
}

/// Simpson over samples `0..=last`; `last` must be even.
fn simpson_pairs(x: ArrayView1<f64>, y: ArrayView1<f64>, last: usize) -> f64 {
    (0..last)
        .step_by(2)
        .map(|i| {
            let h0 = x[i + 1] - x[i];
            let h1 = x[i + 2] - x[i + 1];
            let sum = h0 + h1;
            let ratio = h0 / h1;
            sum / 6.0
                * (y[i] * (2.0 - 1.0 / ratio)
                    + y[i + 1] * sum * sum / (h0 * h1)
                    + y[i + 2] * (2.0 - ratio))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn simpson_is_exact_for_quadratic_on_odd_samples() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = x.mapv(|v| v * v);
        assert!(close(simpson(x.view(), y.view()), 64.0 / 3.0));
    }

    #[test]
    fn simpson_is_exact_for_quadratic_on_even_samples() {
        // 0..=3 of x^2 = 9; the final interval goes through the correction.
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = x.mapv(|v| v * v);
        assert!(close(simpson(x.view(), y.view()), 9.0));
    }

    #[test]
    fn simpson_handles_uneven_spacing() {
        let x = array![0.0, 0.5, 2.0, 2.5, 4.0, 4.2];
        let y = x.mapv(|v| 3.0 * v * v - v + 1.0);
        let exact = |t: f64| t * t * t - t * t / 2.0 + t;
        assert!(close(simpson(x.view(), y.view()), exact(4.2) - exact(0.0)));
    }

    #[test]
    fn simpson_degenerate_windows() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert_eq!(simpson(empty.view(), empty.view()), 0.0);
        let one = array![1.0];
        assert_eq!(simpson(one.view(), one.view()), 0.0);
        let x = array![0.0, 2.0];
        let y = array![1.0, 3.0];
        assert!(close(simpson(x.view(), y.view()), 4.0));
    }

    #[test]
    fn simpson_is_idempotent() {
        let x = array![0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
        let y = array![0.0, 0.4, 1.1, 0.9, 0.3, 0.05];
        let first = simpson(x.view(), y.view());
        let second = simpson(x.view(), y.view());
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn trapezoid_is_exact_for_lines() {
        let x = array![0.0, 1.0, 3.0];
        let y = array![0.0, 2.0, 6.0];
        assert!(close(trapezoid(x.view(), y.view()), 9.0));
    }

    #[test]
    fn integrate_rejects_mismatched_lengths() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0];
        assert!(matches!(
            integrate(IntegrationMethod::Simpson, x.view(), y.view()),
            Err(ChromaError::InvalidPeak(_))
        ));
    }

    #[test]
    fn method_names_parse_case_insensitively() {
        assert_eq!(
            "Simpson".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::Simpson
        );
        assert_eq!(
            " trapezoid ".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::Trapezoid
        );
        assert_eq!(IntegrationMethod::Trapezoid.to_string(), "trapezoid");
    }

    #[test]
    fn unknown_method_is_rejected() {
        match "romberg".parse::<IntegrationMethod>() {
            Err(ChromaError::UnsupportedIntegration(name)) => assert_eq!(name, "romberg"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
