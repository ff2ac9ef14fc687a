use serde::Serialize;
use tracing::debug;

use crate::analyzers::descriptive::quantile;
use crate::utils::constants::IQR_MULTIPLIER;

/// IQR fences and the records that fall strictly outside them, for one
/// metric.
#[derive(Debug, Clone, Serialize)]
pub struct OutlierReport {
    pub metric: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
    pub outlier_percentage: f64,
    pub total_records: usize,
}

pub struct OutlierDetector {
    multiplier: f64,
}

impl OutlierDetector {
    pub fn new() -> Self {
        Self {
            multiplier: IQR_MULTIPLIER,
        }
    }

    /// Classify the present values of a metric against Q1/Q3 ± multiplier·IQR
    /// fences. Quantiles use linear interpolation over the present values;
    /// the percentage denominator counts every record, missing included.
    /// Returns `None` when the metric has no present values, so one empty
    /// metric never aborts the others.
    pub fn detect(&self, metric: &str, values: &[Option<f64>]) -> Option<OutlierReport> {
        let total_records = values.len();
        let mut present: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if present.is_empty() {
            debug!(metric, "no present values, skipping outlier detection");
            return None;
        }
        present.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&present, 0.25)?;
        let q3 = quantile(&present, 0.75)?;
        let iqr = q3 - q1;
        let lower_bound = q1 - self.multiplier * iqr;
        let upper_bound = q3 + self.multiplier * iqr;

        let outlier_count = present
            .iter()
            .filter(|v| **v < lower_bound || **v > upper_bound)
            .count();

        Some(OutlierReport {
            metric: metric.to_string(),
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outlier_count,
            outlier_percentage: outlier_count as f64 / total_records as f64 * 100.0,
            total_records,
        })
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new()
    }
}
