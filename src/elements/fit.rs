use std::fmt;

use approx::{AbsDiffEq, RelativeEq};
use num_traits::pow;

use crate::error::FitError;

/// First-degree least-squares fit of a plotted series against its numeric
/// step values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub y_intercept: f64,
    pub correlation_coefficient: f64,
}

impl LinearFit {
    pub fn from_series(steps: &[i64], values: &[f64]) -> Result<Self, FitError> {
        let points: Vec<(f64, f64)> =
            steps.iter().zip(values).map(|(step, value)| (*step as f64, *value)).collect();
        Self::from_points(&points)
    }

    pub fn from_points(data: &[(f64, f64)]) -> Result<Self, FitError> {
        let (n, sum_x, sum_y, sum_xy, sum_x2, sum_y2) = Self::components(data);
        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - pow(sum_x, 2));
        let y_intercept = (sum_y - slope * sum_x) / n;
        let correlation_coefficient =
            (n * sum_xy - sum_x * sum_y) / ((n * sum_x2 - pow(sum_x, 2)) * (n * sum_y2 - pow(sum_y, 2))).sqrt();

        // constant or empty step values leave the normal equations unsolvable
        if !slope.is_finite() || !y_intercept.is_finite() {
            return Err(FitError(format!("cannot fit a line through {} degenerate points", data.len())));
        }

        Ok(Self { slope, y_intercept, correlation_coefficient })
    }

    fn components(data: &[(f64, f64)]) -> (f64, f64, f64, f64, f64, f64) {
        let (sum_x, sum_y, sum_xy, sum_x2, sum_y2) = data.iter().fold(
            (0., 0., 0., 0., 0.),
            |(acc_x, acc_y, acc_xy, acc_x2, acc_y2), (x, y)| {
                (
                    acc_x + x,
                    acc_y + y,
                    acc_xy + x * y,
                    acc_x2 + pow(*x, 2),
                    acc_y2 + pow(*y, 2),
                )
            },
        );

        let n = data.len() as f64;
        tracing::trace!(%sum_x, %sum_y, %sum_xy, %sum_x2, %sum_y2, %n, "intermediate linear regression calculations");
        (n, sum_x, sum_y, sum_xy, sum_x2, sum_y2)
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.y_intercept
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.y_intercept < 0.0 { '-' } else { '+' };
        f.write_fmt(format_args!("{:.4}x {} {:.4}", self.slope, sign, self.y_intercept.abs()))
    }
}

impl AbsDiffEq for LinearFit {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.slope, &other.slope, epsilon)
            && f64::abs_diff_eq(&self.y_intercept, &other.y_intercept, epsilon)
    }
}

impl RelativeEq for LinearFit {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        f64::relative_eq(&self.slope, &other.slope, epsilon, max_relative)
            && f64::relative_eq(&self.y_intercept, &other.y_intercept, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use claim::*;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fit_recovers_exact_line() {
        let steps = vec![1, 2, 3, 4, 5];
        let values: Vec<f64> = steps.iter().map(|s| 2.0 * *s as f64 + 1.0).collect();
        let fit = assert_ok!(LinearFit::from_series(&steps, &values));
        assert_relative_eq!(fit.slope, 2.0, max_relative = 1e-9);
        assert_relative_eq!(fit.y_intercept, 1.0, max_relative = 1e-9);
        assert_relative_eq!(fit.correlation_coefficient, 1.0, max_relative = 1e-9);
        assert_relative_eq!(fit.at(10.0), 21.0, max_relative = 1e-9);
    }

    #[test]
    fn test_fit_least_squares_on_noisy_points() {
        let steps = vec![1, 2, 3, 4];
        let values = vec![1.1, 1.9, 3.2, 3.8];
        let fit = assert_ok!(LinearFit::from_series(&steps, &values));
        // hand-computed least squares: slope 0.94, intercept 0.15
        assert_relative_eq!(fit.slope, 0.94, max_relative = 1e-9);
        assert_relative_eq!(fit.y_intercept, 0.15, max_relative = 1e-6);
        assert!(fit.correlation_coefficient > 0.98);
    }

    #[test]
    fn test_fit_flat_series_has_zero_slope() {
        let steps = vec![1, 2, 3, 4];
        let values = vec![7.5, 7.5, 7.5, 7.5];
        let fit = assert_ok!(LinearFit::from_series(&steps, &values));
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-9);
        assert_relative_eq!(fit.y_intercept, 7.5, max_relative = 1e-9);
    }

    #[test]
    fn test_fit_rejects_constant_steps() {
        let steps = vec![1, 1, 1];
        let values = vec![10.0, 11.0, 12.0];
        assert_err!(LinearFit::from_series(&steps, &values));
    }

    #[test]
    fn test_fit_rejects_empty_series() {
        assert_err!(LinearFit::from_series(&[], &[]));
    }

    #[test]
    fn test_fit_equation_rendering() {
        let fit = LinearFit { slope: 0.1235, y_intercept: 4.56, correlation_coefficient: 1.0 };
        assert_eq!(fit.to_string(), "0.1235x + 4.5600");

        let fit = LinearFit { slope: -2.5, y_intercept: -0.25, correlation_coefficient: 1.0 };
        assert_eq!(fit.to_string(), "-2.5000x - 0.2500");
    }
}
