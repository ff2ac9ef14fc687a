use crate::error::{ProcessingError, Result};
use crate::models::{SegmentRecord, TripRecord};
use std::collections::HashMap;

/// Reduces segment rows to one record per trip identifier.
///
/// Reduction rules are fixed: the seven numeric metrics sum, source-side
/// fields and the creation/start timestamps come from the first segment,
/// destination-side fields and the end timestamp from the last. First and
/// last are relative to the original input row order, which is preserved
/// within each group and never re-sorted.
pub struct TripAggregator;

impl TripAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One record per distinct trip identifier, in sorted key order.
    pub fn aggregate(&self, segments: &[SegmentRecord]) -> Result<Vec<TripRecord>> {
        if segments.is_empty() {
            return Err(ProcessingError::EmptyDataset(
                "no segments to aggregate".to_string(),
            ));
        }

        let mut groups: HashMap<&str, Vec<&SegmentRecord>> = HashMap::new();
        for segment in segments {
            groups.entry(&segment.trip_uuid).or_default().push(segment);
        }

        let mut trips: Vec<TripRecord> = groups
            .iter()
            .map(|(trip_uuid, group)| self.reduce_group(trip_uuid, group))
            .collect();

        trips.sort_by(|a, b| a.trip_uuid.cmp(&b.trip_uuid));

        Ok(trips)
    }

    fn reduce_group(&self, trip_uuid: &str, segments: &[&SegmentRecord]) -> TripRecord {
        let first = segments[0];
        let last = segments[segments.len() - 1];

        TripRecord {
            trip_uuid: trip_uuid.to_string(),
            route_type: first.route_type.clone(),

            source_center: first.source_center.clone(),
            source_name: first.source_name.clone(),
            source_city: first.source_location.city.clone(),
            source_place: first.source_location.place.clone(),
            source_code: first.source_location.code.clone(),

            destination_center: last.destination_center.clone(),
            destination_name: last.destination_name.clone(),
            destination_city: last.destination_location.city.clone(),
            destination_place: last.destination_location.place.clone(),
            destination_code: last.destination_location.code.clone(),

            trip_creation_time: first.trip_creation_time,
            od_start_time: first.od_start_time,
            od_end_time: last.od_end_time,

            segment_count: segments.len(),

            actual_distance_to_destination: sum_metric(segments, |s| {
                s.actual_distance_to_destination
            }),
            actual_time: sum_metric(segments, |s| s.actual_time),
            osrm_time: sum_metric(segments, |s| s.osrm_time),
            osrm_distance: sum_metric(segments, |s| s.osrm_distance),
            segment_actual_time: sum_metric(segments, |s| s.segment_actual_time),
            segment_osrm_time: sum_metric(segments, |s| s.segment_osrm_time),
            segment_osrm_distance: sum_metric(segments, |s| s.segment_osrm_distance),

            total_trip_time: None,
            creation_to_start_time: None,
            creation_year: None,
            creation_month: None,
            creation_day: None,
            creation_hour: None,
            creation_weekday: None,
        }
    }
}

impl Default for TripAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum a metric over the group, skipping missing values. A group with no
/// present values sums to zero, matching the reference aggregation.
fn sum_metric<F>(segments: &[&SegmentRecord], metric: F) -> f64
where
    F: Fn(&SegmentRecord) -> Option<f64>,
{
    segments.iter().filter_map(|s| metric(s)).sum()
}
