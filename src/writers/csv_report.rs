use crate::analyzers::{CorrelationMatrix, CorridorMetrics, MissingValueEntry};
use crate::error::Result;
use crate::models::TripRecord;
use std::path::Path;

/// Writes the tabular reports: processed trips, missing-value summary,
/// correlation matrix, corridor metrics.
pub struct CsvReportWriter;

impl CsvReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_trips(&self, trips: &[TripRecord], path: &Path) -> Result<usize> {
        let mut writer = csv::Writer::from_path(path)?;
        for trip in trips {
            writer.serialize(trip)?;
        }
        writer.flush()?;
        Ok(trips.len())
    }

    pub fn write_missing_summary(
        &self,
        entries: &[MissingValueEntry],
        path: &Path,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for entry in entries {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Labeled square matrix: first column holds the row label, NaN cells
    /// are written empty.
    pub fn write_correlation_matrix(
        &self,
        matrix: &CorrelationMatrix,
        path: &Path,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = vec![String::new()];
        header.extend(matrix.labels.iter().cloned());
        writer.write_record(&header)?;

        for (label, row) in matrix.labels.iter().zip(matrix.values.iter()) {
            let mut record = vec![label.clone()];
            for value in row {
                if value.is_nan() {
                    record.push(String::new());
                } else {
                    record.push(format!("{}", value));
                }
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_corridors(&self, corridors: &[CorridorMetrics], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for corridor in corridors {
            writer.serialize(corridor)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
