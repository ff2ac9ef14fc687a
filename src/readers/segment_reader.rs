use crate::error::{ProcessingError, Result};
use crate::models::RawSegmentRow;
use crate::utils::constants::REQUIRED_COLUMNS;
use std::path::Path;

pub struct SegmentReader;

impl SegmentReader {
    pub fn new() -> Self {
        Self
    }

    /// Read raw segment rows from a CSV file. The header is validated before
    /// any row is parsed, so a missing required column fails here rather than
    /// deep inside aggregation.
    pub fn read_segments(&self, path: &Path) -> Result<Vec<RawSegmentRow>> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.clone();
        self.validate_headers(&headers)?;

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: RawSegmentRow = row?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn validate_headers(&self, headers: &csv::StringRecord) -> Result<()> {
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *required) {
                return Err(ProcessingError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }

    /// Header columns of a CSV file, in file order.
    pub fn read_columns(&self, path: &Path) -> Result<Vec<String>> {
        let mut reader = csv::Reader::from_path(path)?;
        Ok(reader.headers()?.iter().map(str::to_string).collect())
    }
}

impl Default for SegmentReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_HEADER: &str = "trip_uuid,route_type,source_center,source_name,\
destination_center,destination_name,trip_creation_time,od_start_time,od_end_time,\
cutoff_timestamp,actual_time,osrm_time,segment_actual_time,segment_osrm_time,\
actual_distance_to_destination,osrm_distance,segment_osrm_distance";

    #[test]
    fn test_read_segments() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", FULL_HEADER)?;
        writeln!(
            file,
            "trip-1,FTL,IND01,Delhi - Rohini - DEL001,IND02,Mumbai - Andheri - BOM001,\
2018-09-20 01:00:00,2018-09-20 06:00:00,2018-09-20 09:00:00,2018-09-20 05:00:00,\
120.5,90.0,120.5,90.0,100.2,95.1,95.1"
        )?;
        writeln!(
            file,
            "trip-2,Carting,IND03,,IND04,,2018-09-21 01:00:00,2018-09-21 06:00:00,\
2018-09-21 09:00:00,,not-a-number,,,,,,"
        )?;

        let reader = SegmentReader::new();
        let rows = reader.read_segments(file.path())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].trip_uuid, "trip-1");
        assert_eq!(rows[0].actual_time.as_deref(), Some("120.5"));
        assert_eq!(rows[1].source_name, None);
        assert_eq!(rows[1].actual_time.as_deref(), Some("not-a-number"));
        assert_eq!(rows[1].osrm_time, None);

        Ok(())
    }

    #[test]
    fn test_missing_column_is_detected_up_front() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "trip_uuid,route_type")?;
        writeln!(file, "trip-1,FTL")?;

        let reader = SegmentReader::new();
        let result = reader.read_segments(file.path());

        match result {
            Err(ProcessingError::MissingColumn(column)) => {
                assert_eq!(column, "source_name");
            }
            other => panic!("expected MissingColumn error, got {:?}", other.map(|r| r.len())),
        }

        Ok(())
    }

    #[test]
    fn test_read_columns() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", FULL_HEADER)?;

        let reader = SegmentReader::new();
        let columns = reader.read_columns(file.path())?;

        assert_eq!(columns.len(), 17);
        assert_eq!(columns[0], "trip_uuid");
        assert_eq!(columns[16], "segment_osrm_distance");

        Ok(())
    }
}
