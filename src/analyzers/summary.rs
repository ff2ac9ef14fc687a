use serde::Serialize;
use std::collections::HashMap;

use crate::analyzers::descriptive::{mean, summarize, DescriptiveSummary};
use crate::models::{RawSegmentRow, SegmentRecord, TripRecord};
use crate::utils::constants::{NUMERIC_METRIC_COLUMNS, REQUIRED_COLUMNS};

/// Missing-value tally for one column.
#[derive(Debug, Clone, Serialize)]
pub struct MissingValueEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Per-column missing counts over the raw dataset. Only columns with at
/// least one missing value appear, sorted by percentage descending.
pub fn missing_value_summary(rows: &[RawSegmentRow]) -> Vec<MissingValueEntry> {
    let total = rows.len();
    let mut entries: Vec<MissingValueEntry> = REQUIRED_COLUMNS
        .iter()
        .filter_map(|column| {
            let missing_count = rows.iter().filter(|row| row.field(column).is_none()).count();
            if missing_count == 0 {
                return None;
            }
            Some(MissingValueEntry {
                column: column.to_string(),
                missing_count,
                missing_percentage: if total == 0 {
                    0.0
                } else {
                    missing_count as f64 / total as f64 * 100.0
                },
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.missing_percentage
            .total_cmp(&a.missing_percentage)
            .then_with(|| a.column.cmp(&b.column))
    });
    entries
}

/// Shape summary of the raw and aggregated datasets.
#[derive(Debug, Clone, Serialize)]
pub struct BasicInfo {
    pub raw_shape: (usize, usize),
    pub columns: Vec<String>,
    pub processed_shape: (usize, usize),
}

impl BasicInfo {
    pub fn new(raw_rows: usize, columns: Vec<String>, trip_rows: usize) -> Self {
        Self {
            raw_shape: (raw_rows, columns.len()),
            processed_shape: (trip_rows, TripRecord::column_names().len()),
            columns,
        }
    }
}

/// describe() pass over the segment-level numeric metrics.
pub fn describe_segments(segments: &[SegmentRecord]) -> Vec<DescriptiveSummary> {
    NUMERIC_METRIC_COLUMNS
        .iter()
        .filter_map(|metric| {
            let values: Vec<Option<f64>> = segments.iter().map(|s| s.metric(metric)).collect();
            summarize(metric, &values)
        })
        .collect()
}

/// Mean metrics for one route type.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTypeMetrics {
    pub route_type: String,
    pub trip_count: usize,
    pub mean_actual_time: Option<f64>,
    pub mean_actual_distance: Option<f64>,
    pub mean_total_trip_time: Option<f64>,
}

/// Distribution of route types with mean time/distance metrics per type,
/// sorted by trip count descending. Trips without a route type are skipped.
pub fn route_type_metrics(trips: &[TripRecord]) -> Vec<RouteTypeMetrics> {
    let mut groups: HashMap<&str, Vec<&TripRecord>> = HashMap::new();
    for trip in trips {
        if let Some(route_type) = trip.route_type.as_deref() {
            groups.entry(route_type).or_default().push(trip);
        }
    }

    let mut metrics: Vec<RouteTypeMetrics> = groups
        .iter()
        .map(|(route_type, group)| RouteTypeMetrics {
            route_type: route_type.to_string(),
            trip_count: group.len(),
            mean_actual_time: group_mean(group, |t| Some(t.actual_time)),
            mean_actual_distance: group_mean(group, |t| Some(t.actual_distance_to_destination)),
            mean_total_trip_time: group_mean(group, |t| t.total_trip_time),
        })
        .collect();

    metrics.sort_by(|a, b| {
        b.trip_count
            .cmp(&a.trip_count)
            .then_with(|| a.route_type.cmp(&b.route_type))
    });
    metrics
}

/// Traffic and mean metrics for one source-city → destination-city corridor.
#[derive(Debug, Clone, Serialize)]
pub struct CorridorMetrics {
    pub corridor: String,
    pub trip_count: usize,
    pub mean_actual_time: Option<f64>,
    pub mean_actual_distance: Option<f64>,
    pub mean_total_trip_time: Option<f64>,
}

/// Trips grouped by their city pair, sorted by trip count descending. Trips
/// missing either city are skipped.
pub fn corridor_metrics(trips: &[TripRecord]) -> Vec<CorridorMetrics> {
    let mut groups: HashMap<String, Vec<&TripRecord>> = HashMap::new();
    for trip in trips {
        if let (Some(source), Some(destination)) =
            (trip.source_city.as_deref(), trip.destination_city.as_deref())
        {
            let corridor = format!("{} - {}", source, destination);
            groups.entry(corridor).or_default().push(trip);
        }
    }

    let mut metrics: Vec<CorridorMetrics> = groups
        .iter()
        .map(|(corridor, group)| CorridorMetrics {
            corridor: corridor.clone(),
            trip_count: group.len(),
            mean_actual_time: group_mean(group, |t| Some(t.actual_time)),
            mean_actual_distance: group_mean(group, |t| Some(t.actual_distance_to_destination)),
            mean_total_trip_time: group_mean(group, |t| t.total_trip_time),
        })
        .collect();

    metrics.sort_by(|a, b| {
        b.trip_count
            .cmp(&a.trip_count)
            .then_with(|| a.corridor.cmp(&b.corridor))
    });
    metrics
}

fn group_mean<F>(group: &[&TripRecord], metric: F) -> Option<f64>
where
    F: Fn(&TripRecord) -> Option<f64>,
{
    let present: Vec<f64> = group.iter().filter_map(|t| metric(t)).collect();
    mean(&present)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(trip_uuid: &str, source_name: Option<&str>) -> RawSegmentRow {
        RawSegmentRow {
            trip_uuid: trip_uuid.to_string(),
            source_name: source_name.map(str::to_string),
            route_type: Some("FTL".to_string()),
            ..Default::default()
        }
    }

    fn trip(route_type: &str, source_city: &str, destination_city: &str) -> TripRecord {
        TripRecord {
            trip_uuid: "trip".to_string(),
            route_type: Some(route_type.to_string()),
            source_center: None,
            source_name: None,
            source_city: Some(source_city.to_string()),
            source_place: None,
            source_code: None,
            destination_center: None,
            destination_name: None,
            destination_city: Some(destination_city.to_string()),
            destination_place: None,
            destination_code: None,
            trip_creation_time: None,
            od_start_time: None,
            od_end_time: None,
            segment_count: 1,
            actual_distance_to_destination: 100.0,
            actual_time: 10.0,
            osrm_time: 8.0,
            osrm_distance: 95.0,
            segment_actual_time: 10.0,
            segment_osrm_time: 8.0,
            segment_osrm_distance: 95.0,
            total_trip_time: Some(3.0),
            creation_to_start_time: Some(5.0),
            creation_year: None,
            creation_month: None,
            creation_day: None,
            creation_hour: None,
            creation_weekday: None,
        }
    }

    #[test]
    fn test_missing_value_summary() {
        let rows = vec![
            raw_row("trip-1", Some("Delhi")),
            raw_row("trip-2", None),
            raw_row("trip-3", None),
        ];

        let summary = missing_value_summary(&rows);

        let source_name = summary
            .iter()
            .find(|e| e.column == "source_name")
            .expect("source_name should be reported");
        assert_eq!(source_name.missing_count, 2);
        assert!((source_name.missing_percentage - 200.0 / 3.0).abs() < 1e-9);

        // Fully-populated columns are not reported.
        assert!(summary.iter().all(|e| e.column != "trip_uuid"));
        assert!(summary.iter().all(|e| e.column != "route_type"));

        // Sorted by percentage descending.
        for pair in summary.windows(2) {
            assert!(pair[0].missing_percentage >= pair[1].missing_percentage);
        }
    }

    #[test]
    fn test_basic_info_shapes() {
        let info = BasicInfo::new(120, vec!["trip_uuid".to_string(), "actual_time".to_string()], 14);

        assert_eq!(info.raw_shape, (120, 2));
        assert_eq!(info.processed_shape.0, 14);
        assert_eq!(info.processed_shape.1, TripRecord::column_names().len());
    }

    #[test]
    fn test_route_type_metrics_sorted_by_count() {
        let trips = vec![
            trip("FTL", "Delhi", "Mumbai"),
            trip("Carting", "Delhi", "Mumbai"),
            trip("Carting", "Pune", "Nagpur"),
        ];

        let metrics = route_type_metrics(&trips);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].route_type, "Carting");
        assert_eq!(metrics[0].trip_count, 2);
        assert_eq!(metrics[1].route_type, "FTL");
        assert_eq!(metrics[0].mean_actual_time, Some(10.0));
    }

    #[test]
    fn test_corridor_metrics() {
        let trips = vec![
            trip("FTL", "Delhi", "Mumbai"),
            trip("FTL", "Delhi", "Mumbai"),
            trip("FTL", "Pune", "Nagpur"),
        ];

        let metrics = corridor_metrics(&trips);

        assert_eq!(metrics[0].corridor, "Delhi - Mumbai");
        assert_eq!(metrics[0].trip_count, 2);
        assert_eq!(metrics[0].mean_total_trip_time, Some(3.0));
        assert_eq!(metrics[1].corridor, "Pune - Nagpur");
    }

    #[test]
    fn test_corridor_skips_trips_without_cities() {
        let mut nameless = trip("FTL", "Delhi", "Mumbai");
        nameless.source_city = None;

        let metrics = corridor_metrics(&[nameless]);

        assert!(metrics.is_empty());
    }
}
