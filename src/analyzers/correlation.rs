use serde::Serialize;

use crate::analyzers::descriptive::mean;
use crate::analyzers::hypothesis::paired_complete;

/// Symmetric Pearson correlation matrix over a set of named series.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub struct CorrelationComputer;

impl CorrelationComputer {
    pub fn new() -> Self {
        Self
    }

    /// Pairwise-complete Pearson correlations. The diagonal is exactly 1.0
    /// for series with nonzero variance and NaN otherwise; off-diagonal
    /// cells are NaN when either member of the pair has zero variance or
    /// fewer than two complete observations.
    pub fn compute(&self, series: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
        let n = series.len();
        let mut values = vec![vec![f64::NAN; n]; n];

        for i in 0..n {
            for j in i..n {
                let r = if i == j {
                    self_correlation(&series[i].1)
                } else {
                    let (a, b) = paired_complete(&series[i].1, &series[j].1);
                    pearson(&a, &b)
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix {
            labels: series.iter().map(|(label, _)| label.clone()).collect(),
            values,
        }
    }
}

impl Default for CorrelationComputer {
    fn default() -> Self {
        Self::new()
    }
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 {
        return f64::NAN;
    }

    let mean_a = match mean(a) {
        Some(m) => m,
        None => return f64::NAN,
    };
    let mean_b = match mean(b) {
        Some(m) => m,
        None => return f64::NAN,
    };

    let mut covariance = 0.0;
    let mut sum_sq_a = 0.0;
    let mut sum_sq_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        sum_sq_a += dx * dx;
        sum_sq_b += dy * dy;
    }

    if sum_sq_a == 0.0 || sum_sq_b == 0.0 {
        return f64::NAN;
    }

    covariance / (sum_sq_a.sqrt() * sum_sq_b.sqrt())
}

fn self_correlation(values: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    if present.len() < 2 {
        return f64::NAN;
    }

    let m = match mean(&present) {
        Some(m) => m,
        None => return f64::NAN,
    };
    if present.iter().all(|v| *v == m) {
        return f64::NAN;
    }

    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn matrix_for(series: Vec<(&str, Vec<Option<f64>>)>) -> CorrelationMatrix {
        let named: Vec<(String, Vec<Option<f64>>)> = series
            .into_iter()
            .map(|(label, values)| (label.to_string(), values))
            .collect();
        CorrelationComputer::new().compute(&named)
    }

    #[test]
    fn test_diagonal_is_one_for_varying_series() {
        let matrix = matrix_for(vec![
            ("a", present(&[1.0, 2.0, 3.0])),
            ("b", present(&[2.0, 4.0, 8.0])),
        ]);

        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(1, 1), 1.0);
    }

    #[test]
    fn test_perfect_positive_and_negative_correlation() {
        let matrix = matrix_for(vec![
            ("a", present(&[1.0, 2.0, 3.0, 4.0])),
            ("b", present(&[2.0, 4.0, 6.0, 8.0])),
            ("c", present(&[8.0, 6.0, 4.0, 2.0])),
        ]);

        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((matrix.get(0, 2) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let matrix = matrix_for(vec![
            ("a", present(&[1.0, 2.0, 4.0, 3.0])),
            ("b", present(&[1.5, 2.0, 3.0, 5.0])),
            ("c", present(&[9.0, 1.0, 4.0, 4.5])),
        ]);

        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                let forward = matrix.get(i, j);
                let backward = matrix.get(j, i);
                assert!(
                    (forward - backward).abs() < 1e-12,
                    "asymmetry at ({}, {})",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_zero_variance_series_is_nan() {
        let matrix = matrix_for(vec![
            ("constant", present(&[5.0, 5.0, 5.0])),
            ("varying", present(&[1.0, 2.0, 3.0])),
        ]);

        assert!(matrix.get(0, 0).is_nan());
        assert!(matrix.get(0, 1).is_nan());
        assert_eq!(matrix.get(1, 1), 1.0);
    }

    #[test]
    fn test_pairwise_complete_observations() {
        // The missing value in `a` drops row 1 from the (a, b) pair only.
        let matrix = matrix_for(vec![
            ("a", vec![Some(1.0), None, Some(3.0), Some(4.0)]),
            ("b", present(&[2.0, 100.0, 6.0, 8.0])),
        ]);

        // Remaining pairs (1,2), (3,6), (4,8) are perfectly linear.
        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_values_stay_in_range() {
        let matrix = matrix_for(vec![
            ("a", present(&[1.0, 5.0, 2.0, 8.0, 3.0])),
            ("b", present(&[4.0, 2.0, 9.0, 1.0, 7.0])),
        ]);

        let r = matrix.get(0, 1);
        assert!((-1.0..=1.0).contains(&r));
    }
}
