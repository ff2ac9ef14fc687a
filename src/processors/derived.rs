use chrono::{Datelike, Timelike};
use serde::Serialize;
use tracing::warn;

use crate::models::TripRecord;
use crate::utils::constants::MILLIS_PER_HOUR;

/// Counts of data-quality findings from the derived-metric pass. Negative
/// elapsed times come from out-of-order timestamps and are preserved in the
/// output, so downstream consumers need the count to spot them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DerivedReport {
    pub trips: usize,
    pub out_of_order_timestamps: usize,
}

impl DerivedReport {
    pub fn has_anomalies(&self) -> bool {
        self.out_of_order_timestamps > 0
    }
}

pub struct DerivedMetricCalculator;

impl DerivedMetricCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Fill in the elapsed-hour metrics and the creation-time calendar
    /// features on each trip. Negative durations are counted, never clamped.
    pub fn enrich(&self, trips: &mut [TripRecord]) -> DerivedReport {
        let mut report = DerivedReport {
            trips: trips.len(),
            ..Default::default()
        };

        for trip in trips.iter_mut() {
            if let (Some(start), Some(end)) = (trip.od_start_time, trip.od_end_time) {
                let hours = end.signed_duration_since(start).num_milliseconds() as f64
                    / MILLIS_PER_HOUR;
                trip.total_trip_time = Some(hours);
            }

            if let (Some(created), Some(start)) = (trip.trip_creation_time, trip.od_start_time) {
                let hours = start.signed_duration_since(created).num_milliseconds() as f64
                    / MILLIS_PER_HOUR;
                trip.creation_to_start_time = Some(hours);
            }

            if let Some(created) = trip.trip_creation_time {
                trip.creation_year = Some(created.year());
                trip.creation_month = Some(created.month());
                trip.creation_day = Some(created.day());
                trip.creation_hour = Some(created.hour());
                trip.creation_weekday = Some(created.weekday().num_days_from_monday());
            }

            if !trip.has_ordered_timestamps() {
                report.out_of_order_timestamps += 1;
            }
        }

        if report.has_anomalies() {
            warn!(
                out_of_order_timestamps = report.out_of_order_timestamps,
                "trips with out-of-order timestamps"
            );
        }

        report
    }
}

impl Default for DerivedMetricCalculator {
    fn default() -> Self {
        Self::new()
    }
}
