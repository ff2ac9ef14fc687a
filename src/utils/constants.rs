/// Columns the input CSV must carry before any processing starts
pub const REQUIRED_COLUMNS: &[&str] = &[
    "trip_uuid",
    "source_name",
    "destination_name",
    "route_type",
    "source_center",
    "destination_center",
    "trip_creation_time",
    "od_start_time",
    "od_end_time",
    "cutoff_timestamp",
    "actual_time",
    "osrm_time",
    "segment_actual_time",
    "segment_osrm_time",
    "actual_distance_to_destination",
    "osrm_distance",
    "segment_osrm_distance",
];

/// Timestamp columns normalized by the three-tier parser
pub const TIMESTAMP_COLUMNS: &[&str] = &[
    "trip_creation_time",
    "od_start_time",
    "od_end_time",
    "cutoff_timestamp",
];

/// Segment-level numeric metrics used for hypothesis tests and correlation
pub const NUMERIC_METRIC_COLUMNS: &[&str] = &[
    "actual_time",
    "osrm_time",
    "segment_actual_time",
    "segment_osrm_time",
    "actual_distance_to_destination",
    "osrm_distance",
    "segment_osrm_distance",
];

/// Trip-level metrics inspected for outliers
pub const OUTLIER_METRIC_COLUMNS: &[&str] = &[
    "actual_time",
    "actual_distance_to_destination",
    "osrm_time",
    "osrm_distance",
    "total_trip_time",
];

/// IQR fence multiplier
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Milliseconds per hour, for elapsed-time conversion
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Default output file names
pub const PROCESSED_TRIPS_FILE: &str = "processed_trips.csv";
pub const MISSING_VALUES_FILE: &str = "missing_values.csv";
pub const CORRELATION_MATRIX_FILE: &str = "correlation_matrix.csv";
pub const CORRIDOR_METRICS_FILE: &str = "corridor_metrics.csv";
pub const BASIC_INFO_FILE: &str = "basic_info.json";
pub const ANALYSIS_RESULTS_FILE: &str = "analysis_results.json";
