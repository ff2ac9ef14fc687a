use crate::analyzers::{AnalysisResults, BasicInfo};
use crate::error::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes the JSON reports: dataset shape info and analysis results.
pub struct JsonReportWriter;

impl JsonReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_basic_info(&self, info: &BasicInfo, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, info)?;
        Ok(())
    }

    pub fn write_analysis_results(&self, results: &AnalysisResults, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, results)?;
        Ok(())
    }
}

impl Default for JsonReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
