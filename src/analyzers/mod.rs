pub mod correlation;
pub mod descriptive;
pub mod hypothesis;
pub mod outliers;
pub mod summary;

pub use correlation::{CorrelationComputer, CorrelationMatrix};
pub use descriptive::DescriptiveSummary;
pub use hypothesis::{HypothesisTester, NamedTestResult, TestOutcome};
pub use outliers::{OutlierDetector, OutlierReport};
pub use summary::{BasicInfo, CorridorMetrics, MissingValueEntry, RouteTypeMetrics};

use serde::Serialize;

/// Everything the analyze pass produces, as written to the results report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults {
    pub time_analysis: Vec<NamedTestResult>,
    pub distance_analysis: Vec<NamedTestResult>,
    pub scan_analysis: Vec<NamedTestResult>,
    pub outliers: Vec<OutlierReport>,
}
