use serde::Serialize;
use tracing::debug;

use crate::analyzers::descriptive::variance;

/// Paired deletion: drop every position where either series is missing,
/// keeping positional correspondence between the two. Stricter than dropping
/// missing values per series, and deliberately so — it changes which samples
/// end up compared.
pub fn paired_complete(a: &[Option<f64>], b: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    let mut left = Vec::new();
    let mut right = Vec::new();

    for (x, y) in a.iter().zip(b.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            if x.is_finite() && y.is_finite() {
                left.push(*x);
                right.push(*y);
            }
        }
    }

    (left, right)
}

/// Outcome of a two-sample test. Degenerate inputs produce `Undefined` with
/// a reason instead of a NaN statistic or a panic.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    Computed {
        t_statistic: f64,
        p_value: f64,
        degrees_of_freedom: f64,
    },
    Undefined {
        reason: String,
    },
}

impl TestOutcome {
    pub fn is_defined(&self) -> bool {
        matches!(self, TestOutcome::Computed { .. })
    }
}

/// A named metric-pair comparison, as written to the results report.
#[derive(Debug, Clone, Serialize)]
pub struct NamedTestResult {
    pub name: String,
    pub group_a: String,
    pub group_b: String,
    #[serde(flatten)]
    pub outcome: TestOutcome,
}

pub struct HypothesisTester;

impl HypothesisTester {
    pub fn new() -> Self {
        Self
    }

    /// Two-independent-samples t-test with the equal-variance (Student)
    /// policy, after paired deletion of missing values.
    pub fn test(&self, series_a: &[Option<f64>], series_b: &[Option<f64>]) -> TestOutcome {
        let (a, b) = paired_complete(series_a, series_b);

        if a.len() < 2 {
            return TestOutcome::Undefined {
                reason: format!(
                    "only {} paired observations remain after filtering",
                    a.len()
                ),
            };
        }

        let var_a = variance(&a).unwrap_or(0.0);
        let var_b = variance(&b).unwrap_or(0.0);
        if var_a == 0.0 && var_b == 0.0 {
            return TestOutcome::Undefined {
                reason: "both groups have zero variance".to_string(),
            };
        }

        let a32: Vec<f32> = a.iter().map(|v| *v as f32).collect();
        let b32: Vec<f32> = b.iter().map(|v| *v as f32).collect();

        match aprender::stats::hypothesis::ttest_ind(&a32, &b32, true) {
            Ok(result) => {
                debug!(
                    statistic = result.statistic,
                    pvalue = result.pvalue,
                    "t-test computed"
                );
                TestOutcome::Computed {
                    t_statistic: result.statistic as f64,
                    p_value: result.pvalue as f64,
                    degrees_of_freedom: result.df as f64,
                }
            }
            Err(error) => TestOutcome::Undefined {
                reason: error.to_string(),
            },
        }
    }

    /// Run and label one comparison.
    pub fn named_test(
        &self,
        name: &str,
        label_a: &str,
        series_a: &[Option<f64>],
        label_b: &str,
        series_b: &[Option<f64>],
    ) -> NamedTestResult {
        NamedTestResult {
            name: name.to_string(),
            group_a: label_a.to_string(),
            group_b: label_b.to_string(),
            outcome: self.test(series_a, series_b),
        }
    }
}

impl Default for HypothesisTester {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_paired_deletion() {
        let a = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let b = vec![Some(10.0), Some(20.0), None, Some(40.0)];

        let (left, right) = paired_complete(&a, &b);

        assert_eq!(left, vec![1.0, 4.0]);
        assert_eq!(right, vec![10.0, 40.0]);
    }

    #[test]
    fn test_identical_series() {
        let values = present(&[10.0, 12.0, 11.0, 13.0, 10.0, 12.5]);
        let outcome = HypothesisTester::new().test(&values, &values);

        match outcome {
            TestOutcome::Computed {
                t_statistic,
                p_value,
                ..
            } => {
                assert!(t_statistic.abs() < 1e-6, "t = {}", t_statistic);
                assert!((p_value - 1.0).abs() < 1e-4, "p = {}", p_value);
            }
            TestOutcome::Undefined { reason } => panic!("unexpected undefined: {}", reason),
        }
    }

    #[test]
    fn test_clearly_different_series() {
        let a = present(&[10.0, 12.0, 11.0, 13.0, 10.0]);
        let b = present(&[25.0, 27.0, 26.0, 28.0, 25.0]);

        match HypothesisTester::new().test(&a, &b) {
            TestOutcome::Computed { p_value, .. } => {
                assert!(p_value < 0.05, "p = {}", p_value);
            }
            TestOutcome::Undefined { reason } => panic!("unexpected undefined: {}", reason),
        }
    }

    #[test]
    fn test_empty_after_filtering_is_undefined() {
        let a = vec![Some(1.0), None];
        let b = vec![None, Some(2.0)];

        let outcome = HypothesisTester::new().test(&a, &b);

        assert!(!outcome.is_defined());
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let a = present(&[5.0, 5.0, 5.0]);
        let b = present(&[5.0, 5.0, 5.0]);

        let outcome = HypothesisTester::new().test(&a, &b);

        match outcome {
            TestOutcome::Undefined { reason } => {
                assert!(reason.contains("zero variance"));
            }
            TestOutcome::Computed { .. } => panic!("expected undefined outcome"),
        }
    }

    #[test]
    fn test_named_result_carries_labels() {
        let a = present(&[1.0, 2.0, 3.0]);
        let b = present(&[1.5, 2.5, 3.5]);

        let result = HypothesisTester::new().named_test(
            "Actual Time vs OSRM Time",
            "actual_time",
            &a,
            "osrm_time",
            &b,
        );

        assert_eq!(result.name, "Actual Time vs OSRM Time");
        assert_eq!(result.group_a, "actual_time");
        assert_eq!(result.group_b, "osrm_time");
        assert!(result.outcome.is_defined());
    }
}
