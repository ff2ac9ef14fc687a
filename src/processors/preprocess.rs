use crate::error::{ProcessingError, Result};
use crate::models::{LocationField, RawSegmentRow, SegmentRecord};
use crate::processors::locations::extract_location;
use crate::processors::timestamps::TimestampNormalizer;
use crate::utils::constants::TIMESTAMP_COLUMNS;
use tracing::info;

pub struct Preprocessor {
    normalizer: TimestampNormalizer,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            normalizer: TimestampNormalizer::new(),
        }
    }

    /// Turn raw CSV rows into typed segment records: timestamp columns are
    /// normalized column-wide, numeric fields coerce to missing on parse
    /// failure, and location names are decomposed. Only a timestamp column
    /// that no strategy can parse aborts the run.
    pub fn preprocess(&self, rows: &[RawSegmentRow]) -> Result<Vec<SegmentRecord>> {
        if rows.is_empty() {
            return Err(ProcessingError::EmptyDataset(
                "no segment rows in input".to_string(),
            ));
        }

        let mut timestamps = Vec::with_capacity(TIMESTAMP_COLUMNS.len());
        for column in TIMESTAMP_COLUMNS {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| row.field(column).map(str::to_string))
                .collect();
            timestamps.push(self.normalizer.normalize_column(column, &values)?);
        }

        let segments = rows
            .iter()
            .enumerate()
            .map(|(i, row)| SegmentRecord {
                trip_uuid: row.trip_uuid.clone(),
                route_type: row.route_type.clone(),
                source_center: row.source_center.clone(),
                source_name: row.source_name.clone(),
                destination_center: row.destination_center.clone(),
                destination_name: row.destination_name.clone(),
                source_location: extract_location(&LocationField::from_csv(
                    row.source_name.as_deref(),
                )),
                destination_location: extract_location(&LocationField::from_csv(
                    row.destination_name.as_deref(),
                )),
                trip_creation_time: timestamps[0][i],
                od_start_time: timestamps[1][i],
                od_end_time: timestamps[2][i],
                cutoff_timestamp: timestamps[3][i],
                actual_time: coerce_numeric(row.actual_time.as_deref()),
                osrm_time: coerce_numeric(row.osrm_time.as_deref()),
                segment_actual_time: coerce_numeric(row.segment_actual_time.as_deref()),
                segment_osrm_time: coerce_numeric(row.segment_osrm_time.as_deref()),
                actual_distance_to_destination: coerce_numeric(
                    row.actual_distance_to_destination.as_deref(),
                ),
                osrm_distance: coerce_numeric(row.osrm_distance.as_deref()),
                segment_osrm_distance: coerce_numeric(row.segment_osrm_distance.as_deref()),
            })
            .collect::<Vec<_>>();

        info!(segments = segments.len(), "preprocessing complete");
        Ok(segments)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a numeric field, coercing anything unparseable to missing.
fn coerce_numeric(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}
