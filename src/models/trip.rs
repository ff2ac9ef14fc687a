use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One aggregated trip: sums over the numeric metrics of its segments,
/// first-segment source fields, last-segment destination fields, and the
/// derived elapsed-hour metrics filled in after aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TripRecord {
    #[validate(length(min = 1))]
    pub trip_uuid: String,

    pub route_type: Option<String>,

    pub source_center: Option<String>,
    pub source_name: Option<String>,
    pub source_city: Option<String>,
    pub source_place: Option<String>,
    pub source_code: Option<String>,

    pub destination_center: Option<String>,
    pub destination_name: Option<String>,
    pub destination_city: Option<String>,
    pub destination_place: Option<String>,
    pub destination_code: Option<String>,

    pub trip_creation_time: Option<NaiveDateTime>,
    pub od_start_time: Option<NaiveDateTime>,
    pub od_end_time: Option<NaiveDateTime>,

    pub segment_count: usize,

    pub actual_distance_to_destination: f64,
    pub actual_time: f64,
    pub osrm_time: f64,
    pub osrm_distance: f64,
    pub segment_actual_time: f64,
    pub segment_osrm_time: f64,
    pub segment_osrm_distance: f64,

    pub total_trip_time: Option<f64>,
    pub creation_to_start_time: Option<f64>,

    pub creation_year: Option<i32>,
    pub creation_month: Option<u32>,
    pub creation_day: Option<u32>,
    pub creation_hour: Option<u32>,
    pub creation_weekday: Option<u32>,
}

impl TripRecord {
    /// Column names in serialized order, matching the CSV output header.
    pub fn column_names() -> Vec<&'static str> {
        vec![
            "trip_uuid",
            "route_type",
            "source_center",
            "source_name",
            "source_city",
            "source_place",
            "source_code",
            "destination_center",
            "destination_name",
            "destination_city",
            "destination_place",
            "destination_code",
            "trip_creation_time",
            "od_start_time",
            "od_end_time",
            "segment_count",
            "actual_distance_to_destination",
            "actual_time",
            "osrm_time",
            "osrm_distance",
            "segment_actual_time",
            "segment_osrm_time",
            "segment_osrm_distance",
            "total_trip_time",
            "creation_to_start_time",
            "creation_year",
            "creation_month",
            "creation_day",
            "creation_hour",
            "creation_weekday",
        ]
    }

    /// Trip-level numeric metric by column name, for analyses driven by
    /// column lists. Summed metrics are always present; derived metrics may
    /// be missing when a timestamp was.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "actual_distance_to_destination" => Some(self.actual_distance_to_destination),
            "actual_time" => Some(self.actual_time),
            "osrm_time" => Some(self.osrm_time),
            "osrm_distance" => Some(self.osrm_distance),
            "segment_actual_time" => Some(self.segment_actual_time),
            "segment_osrm_time" => Some(self.segment_osrm_time),
            "segment_osrm_distance" => Some(self.segment_osrm_distance),
            "total_trip_time" => self.total_trip_time,
            "creation_to_start_time" => self.creation_to_start_time,
            _ => None,
        }
    }

    /// Whether the three lifecycle timestamps that are present appear in
    /// chronological order (creation, then start, then end). Violations are
    /// reported by the derived-metric pass rather than corrected.
    pub fn has_ordered_timestamps(&self) -> bool {
        if let (Some(created), Some(start)) = (self.trip_creation_time, self.od_start_time) {
            if created > start {
                return false;
            }
        }
        if let (Some(start), Some(end)) = (self.od_start_time, self.od_end_time) {
            if start > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 9, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn base_trip() -> TripRecord {
        TripRecord {
            trip_uuid: "trip-1".to_string(),
            route_type: Some("FTL".to_string()),
            source_center: None,
            source_name: None,
            source_city: None,
            source_place: None,
            source_code: None,
            destination_center: None,
            destination_name: None,
            destination_city: None,
            destination_place: None,
            destination_code: None,
            trip_creation_time: Some(timestamp(20, 1)),
            od_start_time: Some(timestamp(20, 6)),
            od_end_time: Some(timestamp(20, 9)),
            segment_count: 1,
            actual_distance_to_destination: 100.0,
            actual_time: 120.0,
            osrm_time: 90.0,
            osrm_distance: 95.0,
            segment_actual_time: 120.0,
            segment_osrm_time: 90.0,
            segment_osrm_distance: 95.0,
            total_trip_time: None,
            creation_to_start_time: None,
            creation_year: None,
            creation_month: None,
            creation_day: None,
            creation_hour: None,
            creation_weekday: None,
        }
    }

    #[test]
    fn test_trip_validation() {
        let trip = base_trip();
        assert!(trip.validate().is_ok());

        let mut unnamed = base_trip();
        unnamed.trip_uuid = String::new();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_ordered_timestamps() {
        assert!(base_trip().has_ordered_timestamps());

        let mut backwards = base_trip();
        backwards.od_end_time = Some(timestamp(20, 2));
        assert!(!backwards.has_ordered_timestamps());

        let mut late_creation = base_trip();
        late_creation.trip_creation_time = Some(timestamp(20, 8));
        assert!(!late_creation.has_ordered_timestamps());
    }

    #[test]
    fn test_missing_timestamps_count_as_ordered() {
        let mut trip = base_trip();
        trip.trip_creation_time = None;
        trip.od_end_time = None;
        assert!(trip.has_ordered_timestamps());
    }

    #[test]
    fn test_metric_lookup() {
        let mut trip = base_trip();
        trip.total_trip_time = Some(3.0);

        assert_eq!(trip.metric("actual_time"), Some(120.0));
        assert_eq!(trip.metric("total_trip_time"), Some(3.0));
        assert_eq!(trip.metric("creation_to_start_time"), None);
        assert_eq!(trip.metric("no_such_metric"), None);
    }
}
