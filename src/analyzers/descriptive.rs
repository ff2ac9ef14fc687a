use serde::Serialize;

/// Arithmetic mean; `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n − 1 denominator); `None` for fewer than two values.
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Quantile by linear interpolation at rank `p · (n − 1)` over a sorted
/// sample. This is the default method of the reference numeric stack.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        return Some(sorted[lower]);
    }

    let weight = rank - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Per-metric describe() summary over the present values of a metric.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptiveSummary {
    pub metric: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarize the present values of a metric; `None` when every value is
/// missing.
pub fn summarize(metric: &str, values: &[Option<f64>]) -> Option<DescriptiveSummary> {
    let mut present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));

    Some(DescriptiveSummary {
        metric: metric.to_string(),
        count: present.len(),
        mean: mean(&present)?,
        std_dev: std_dev(&present),
        min: present[0],
        q25: quantile(&present, 0.25)?,
        median: quantile(&present, 0.5)?,
        q75: quantile(&present, 0.75)?,
        max: present[present.len() - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 6.0, 8.0];
        assert_eq!(mean(&values), Some(5.0));
        // Sample variance: 20 / 3
        assert!((variance(&values).unwrap() - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(variance(&[1.0]), None);
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        // rank 0.25 * 5 = 1.25 between 2 and 3
        assert!((quantile(&sorted, 0.25).unwrap() - 2.25).abs() < 1e-12);
        // rank 0.75 * 5 = 3.75 between 4 and 5
        assert!((quantile(&sorted, 0.75).unwrap() - 4.75).abs() < 1e-12);
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 1.0), Some(100.0));
    }

    #[test]
    fn test_quantile_median() {
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
        assert_eq!(quantile(&[1.0, 3.0, 5.0, 7.0, 9.0], 0.5), Some(5.0));
    }

    #[test]
    fn test_quantile_invalid_input() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[1.0], 1.5), None);
    }

    #[test]
    fn test_summarize() {
        let values: Vec<Option<f64>> = vec![Some(1.0), None, Some(3.0), Some(2.0), None];
        let summary = summarize("actual_time", &values).unwrap();

        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn test_summarize_all_missing() {
        assert!(summarize("osrm_time", &[None, None]).is_none());
    }
}
