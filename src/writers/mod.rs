pub mod csv_report;
pub mod json_report;

pub use csv_report::CsvReportWriter;
pub use json_report::JsonReportWriter;
