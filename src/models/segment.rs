use chrono::NaiveDateTime;
use serde::Deserialize;

use super::location::LocationParts;

/// One row of the input CSV exactly as read. Everything beyond the trip
/// identifier is optional, and numeric fields stay textual so that a bad
/// value can degrade to missing instead of rejecting the whole row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSegmentRow {
    pub trip_uuid: String,
    pub route_type: Option<String>,
    pub source_center: Option<String>,
    pub source_name: Option<String>,
    pub destination_center: Option<String>,
    pub destination_name: Option<String>,
    pub trip_creation_time: Option<String>,
    pub od_start_time: Option<String>,
    pub od_end_time: Option<String>,
    pub cutoff_timestamp: Option<String>,
    pub actual_time: Option<String>,
    pub osrm_time: Option<String>,
    pub segment_actual_time: Option<String>,
    pub segment_osrm_time: Option<String>,
    pub actual_distance_to_destination: Option<String>,
    pub osrm_distance: Option<String>,
    pub segment_osrm_distance: Option<String>,
}

impl RawSegmentRow {
    /// Raw value of a named column; `None` for a missing value or an unknown
    /// column name.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "trip_uuid" => {
                if self.trip_uuid.is_empty() {
                    None
                } else {
                    Some(self.trip_uuid.as_str())
                }
            }
            "route_type" => self.route_type.as_deref(),
            "source_center" => self.source_center.as_deref(),
            "source_name" => self.source_name.as_deref(),
            "destination_center" => self.destination_center.as_deref(),
            "destination_name" => self.destination_name.as_deref(),
            "trip_creation_time" => self.trip_creation_time.as_deref(),
            "od_start_time" => self.od_start_time.as_deref(),
            "od_end_time" => self.od_end_time.as_deref(),
            "cutoff_timestamp" => self.cutoff_timestamp.as_deref(),
            "actual_time" => self.actual_time.as_deref(),
            "osrm_time" => self.osrm_time.as_deref(),
            "segment_actual_time" => self.segment_actual_time.as_deref(),
            "segment_osrm_time" => self.segment_osrm_time.as_deref(),
            "actual_distance_to_destination" => self.actual_distance_to_destination.as_deref(),
            "osrm_distance" => self.osrm_distance.as_deref(),
            "segment_osrm_distance" => self.segment_osrm_distance.as_deref(),
            _ => None,
        }
    }
}

/// One cleaned trip segment: timestamps normalized, numerics coerced,
/// location names decomposed.
#[derive(Debug, Clone)]
pub struct SegmentRecord {
    pub trip_uuid: String,
    pub route_type: Option<String>,
    pub source_center: Option<String>,
    pub source_name: Option<String>,
    pub destination_center: Option<String>,
    pub destination_name: Option<String>,
    pub source_location: LocationParts,
    pub destination_location: LocationParts,
    pub trip_creation_time: Option<NaiveDateTime>,
    pub od_start_time: Option<NaiveDateTime>,
    pub od_end_time: Option<NaiveDateTime>,
    pub cutoff_timestamp: Option<NaiveDateTime>,
    pub actual_time: Option<f64>,
    pub osrm_time: Option<f64>,
    pub segment_actual_time: Option<f64>,
    pub segment_osrm_time: Option<f64>,
    pub actual_distance_to_destination: Option<f64>,
    pub osrm_distance: Option<f64>,
    pub segment_osrm_distance: Option<f64>,
}

impl SegmentRecord {
    /// Numeric metric by column name, for analyses driven by column lists.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "actual_time" => self.actual_time,
            "osrm_time" => self.osrm_time,
            "segment_actual_time" => self.segment_actual_time,
            "segment_osrm_time" => self.segment_osrm_time,
            "actual_distance_to_destination" => self.actual_distance_to_destination,
            "osrm_distance" => self.osrm_distance,
            "segment_osrm_distance" => self.segment_osrm_distance,
            _ => None,
        }
    }

    /// Elapsed hours between the origin-departure scans of this segment.
    pub fn scan_window_hours(&self) -> Option<f64> {
        match (self.od_start_time, self.od_end_time) {
            (Some(start), Some(end)) => {
                let millis = end.signed_duration_since(start).num_milliseconds();
                Some(millis as f64 / crate::utils::constants::MILLIS_PER_HOUR)
            }
            _ => None,
        }
    }
}
