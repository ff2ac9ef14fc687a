use crate::analyzers::{
    correlation::CorrelationComputer,
    hypothesis::{HypothesisTester, NamedTestResult, TestOutcome},
    outliers::OutlierDetector,
    summary::{self, BasicInfo},
    AnalysisResults,
};
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::TripRecord;
use crate::processors::{DerivedMetricCalculator, Preprocessor, TripAggregator};
use crate::readers::SegmentReader;
use crate::utils::constants::{
    ANALYSIS_RESULTS_FILE, BASIC_INFO_FILE, CORRELATION_MATRIX_FILE, CORRIDOR_METRICS_FILE,
    MISSING_VALUES_FILE, NUMERIC_METRIC_COLUMNS, OUTLIER_METRIC_COLUMNS, PROCESSED_TRIPS_FILE,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvReportWriter, JsonReportWriter};
use std::path::{Path, PathBuf};

/// Explicit run configuration: every path the pipeline touches comes from
/// here, not from process-wide state.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process { input, output_dir } => process(&AnalysisConfig {
            input_path: input,
            output_dir,
        }),

        Commands::Analyze {
            input,
            output_dir,
            top_corridors,
        } => analyze(
            &AnalysisConfig {
                input_path: input,
                output_dir,
            },
            top_corridors,
        ),

        Commands::Info { input, sample } => info(&input, sample),
    }
}

fn process(config: &AnalysisConfig) -> Result<()> {
    println!("Processing trip data...");
    println!("Input file: {}", config.input_path.display());
    println!("Output directory: {}", config.output_dir.display());

    std::fs::create_dir_all(&config.output_dir)?;

    let progress = ProgressReporter::new_spinner("Reading segments...", false);

    let reader = SegmentReader::new();
    let rows = reader.read_segments(&config.input_path)?;
    let columns = reader.read_columns(&config.input_path)?;
    progress.set_message("Cleaning segments...");

    let missing = summary::missing_value_summary(&rows);
    let segments = Preprocessor::new().preprocess(&rows)?;

    progress.set_message("Aggregating trips...");
    let mut trips = TripAggregator::new().aggregate(&segments)?;
    let report = DerivedMetricCalculator::new().enrich(&mut trips);

    progress.finish_with_message(&format!(
        "Aggregated {} trips from {} segments",
        trips.len(),
        segments.len()
    ));

    if report.has_anomalies() {
        println!(
            "Warning: {} trips with out-of-order timestamps",
            report.out_of_order_timestamps
        );
    }

    let csv_writer = CsvReportWriter::new();
    let written = csv_writer.write_trips(&trips, &config.output_dir.join(PROCESSED_TRIPS_FILE))?;
    csv_writer.write_missing_summary(&missing, &config.output_dir.join(MISSING_VALUES_FILE))?;

    let basic_info = BasicInfo::new(rows.len(), columns, trips.len());
    JsonReportWriter::new()
        .write_basic_info(&basic_info, &config.output_dir.join(BASIC_INFO_FILE))?;

    println!("\nDataset shape: {} rows x {} columns", rows.len(), basic_info.raw_shape.1);
    if missing.is_empty() {
        println!("No missing values found");
    } else {
        println!("Columns with missing values:");
        for entry in &missing {
            println!(
                "  {}: {} ({:.2}%)",
                entry.column, entry.missing_count, entry.missing_percentage
            );
        }
    }
    println!("\nWrote {} trip records to {}", written, config.output_dir.display());
    println!("Processing complete!");

    Ok(())
}

fn analyze(config: &AnalysisConfig, top_corridors: usize) -> Result<()> {
    println!("Analyzing trip data...");
    println!("Input file: {}", config.input_path.display());

    std::fs::create_dir_all(&config.output_dir)?;

    let progress = ProgressReporter::new_spinner("Preparing data...", false);

    let reader = SegmentReader::new();
    let rows = reader.read_segments(&config.input_path)?;
    let columns = reader.read_columns(&config.input_path)?;
    let segments = Preprocessor::new().preprocess(&rows)?;

    let mut trips = TripAggregator::new().aggregate(&segments)?;
    DerivedMetricCalculator::new().enrich(&mut trips);

    progress.finish_with_message(&format!(
        "Prepared {} segments, {} trips",
        segments.len(),
        trips.len()
    ));

    // Hypothesis tests compare segment-level metrics, as collected.
    let tester = HypothesisTester::new();
    let series = |name: &str| -> Vec<Option<f64>> {
        segments.iter().map(|s| s.metric(name)).collect()
    };
    let scan_window: Vec<Option<f64>> = segments.iter().map(|s| s.scan_window_hours()).collect();

    println!("\n=== Time Differences Analysis ===");
    let actual_time = series("actual_time");
    let osrm_time = series("osrm_time");
    let segment_actual_time = series("segment_actual_time");
    let segment_osrm_time = series("segment_osrm_time");
    let osrm_distance = series("osrm_distance");
    let segment_osrm_distance = series("segment_osrm_distance");

    let time_analysis = vec![
        tester.named_test(
            "Actual Time vs OSRM Time",
            "actual_time",
            &actual_time,
            "osrm_time",
            &osrm_time,
        ),
        tester.named_test(
            "Actual Time vs Segment Actual Time",
            "actual_time",
            &actual_time,
            "segment_actual_time",
            &segment_actual_time,
        ),
        tester.named_test(
            "OSRM Time vs Segment OSRM Time",
            "osrm_time",
            &osrm_time,
            "segment_osrm_time",
            &segment_osrm_time,
        ),
    ];
    print_test_results(&time_analysis);

    println!("\n=== Distance Differences Analysis ===");
    let distance_analysis = vec![tester.named_test(
        "OSRM Distance vs Segment OSRM Distance",
        "osrm_distance",
        &osrm_distance,
        "segment_osrm_distance",
        &segment_osrm_distance,
    )];
    print_test_results(&distance_analysis);

    println!("\n=== Scan Window Analysis ===");
    let scan_analysis = vec![tester.named_test(
        "Actual Time vs Start Scan to End Scan Time",
        "actual_time",
        &actual_time,
        "start_scan_to_end_scan",
        &scan_window,
    )];
    print_test_results(&scan_analysis);

    // Correlation over the segment-level metrics present in the input.
    let correlation_series: Vec<(String, Vec<Option<f64>>)> = NUMERIC_METRIC_COLUMNS
        .iter()
        .filter(|metric| columns.iter().any(|c| c == *metric))
        .map(|metric| (metric.to_string(), series(metric)))
        .collect();
    let matrix = CorrelationComputer::new().compute(&correlation_series);

    // Outliers over the aggregated trip table.
    println!("\n=== Outlier Analysis ===");
    let detector = OutlierDetector::new();
    let mut outliers = Vec::new();
    for metric in OUTLIER_METRIC_COLUMNS {
        let values: Vec<Option<f64>> = trips.iter().map(|t| t.metric(metric)).collect();
        match detector.detect(metric, &values) {
            Some(report) => {
                println!(
                    "{}: {} outliers ({:.2}%), bounds [{:.2}, {:.2}]",
                    report.metric,
                    report.outlier_count,
                    report.outlier_percentage,
                    report.lower_bound,
                    report.upper_bound
                );
                outliers.push(report);
            }
            None => println!("{}: no values to analyze", metric),
        }
    }

    println!("\n=== Route Type Analysis ===");
    for metrics in summary::route_type_metrics(&trips) {
        println!(
            "{}: {} trips, mean actual time {}",
            metrics.route_type,
            metrics.trip_count,
            format_mean(metrics.mean_actual_time)
        );
    }

    let corridors = summary::corridor_metrics(&trips);
    println!("\nTop {} busiest corridors:", top_corridors.min(corridors.len()));
    for corridor in corridors.iter().take(top_corridors) {
        println!(
            "  {}: {} trips, mean total trip time {}",
            corridor.corridor,
            corridor.trip_count,
            format_mean(corridor.mean_total_trip_time)
        );
    }

    let results = AnalysisResults {
        time_analysis,
        distance_analysis,
        scan_analysis,
        outliers,
    };

    let csv_writer = CsvReportWriter::new();
    csv_writer
        .write_correlation_matrix(&matrix, &config.output_dir.join(CORRELATION_MATRIX_FILE))?;
    csv_writer.write_corridors(&corridors, &config.output_dir.join(CORRIDOR_METRICS_FILE))?;
    JsonReportWriter::new()
        .write_analysis_results(&results, &config.output_dir.join(ANALYSIS_RESULTS_FILE))?;

    println!("\nAnalysis complete! Results written to {}", config.output_dir.display());

    Ok(())
}

fn info(input: &Path, sample: usize) -> Result<()> {
    println!("Summarizing: {}", input.display());

    let reader = SegmentReader::new();
    let rows = reader.read_segments(input)?;
    let columns = reader.read_columns(input)?;

    println!("\nDataset shape: {} rows x {} columns", rows.len(), columns.len());
    println!("Columns: {}", columns.join(", "));

    let missing = summary::missing_value_summary(&rows);
    if missing.is_empty() {
        println!("\nNo missing values found");
    } else {
        println!("\nColumns with missing values:");
        for entry in &missing {
            println!(
                "  {}: {} ({:.2}%)",
                entry.column, entry.missing_count, entry.missing_percentage
            );
        }
    }

    let segments = Preprocessor::new().preprocess(&rows)?;

    println!("\nNumeric metrics:");
    for stats in summary::describe_segments(&segments) {
        println!(
            "  {}: count={}, mean={:.2}, std={}, min={:.2}, q25={:.2}, median={:.2}, q75={:.2}, max={:.2}",
            stats.metric,
            stats.count,
            stats.mean,
            stats
                .std_dev
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "n/a".to_string()),
            stats.min,
            stats.q25,
            stats.median,
            stats.q75,
            stats.max
        );
    }

    let mut trips = TripAggregator::new().aggregate(&segments)?;
    DerivedMetricCalculator::new().enrich(&mut trips);
    println!("\nAggregated trips: {}", trips.len());

    if sample > 0 {
        println!("\nSample trips (showing up to {}):", sample);
        for (i, trip) in trips.iter().take(sample).enumerate() {
            println!("{}. {}", i + 1, describe_trip(trip));
        }
    }

    Ok(())
}

fn print_test_results(results: &[NamedTestResult]) {
    for result in results {
        println!("\n{}", result.name);
        match &result.outcome {
            TestOutcome::Computed {
                t_statistic,
                p_value,
                ..
            } => {
                println!("t-statistic: {:.4}", t_statistic);
                println!("p-value: {:.4}", p_value);
            }
            TestOutcome::Undefined { reason } => {
                println!("result undefined: {}", reason);
            }
        }
    }
}

fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

fn describe_trip(trip: &TripRecord) -> String {
    format!(
        "{}: {} -> {}, {} segments, actual time {:.1}, total trip time {}",
        trip.trip_uuid,
        trip.source_city.as_deref().unwrap_or("?"),
        trip.destination_city.as_deref().unwrap_or("?"),
        trip.segment_count,
        trip.actual_time,
        format_mean(trip.total_trip_time)
    )
}
