use chrono::{DateTime, Local};

/// Timestamp format appended to every output file of a scan
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Prefix of the companion file holding storage object listings
const GCS_PREFIX: &str = "gcs-";

/// Deterministic output file names derived from project id and scan start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    file_name: String,
}

impl OutputName {
    pub fn new(project_id: &str, scan_time_suffix: &str) -> Self {
        Self {
            file_name: format!("{}-{}.json", project_id, scan_time_suffix),
        }
    }

    /// Formats a scan start time the way output file names expect it
    pub fn time_suffix(started_at: &DateTime<Local>) -> String {
        started_at.format(SCAN_TIME_FORMAT).to_string()
    }

    /// File name of the project's result document
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name of the storage object listing written next to the result document
    pub fn gcs_file_name(&self) -> String {
        format!("{}{}", GCS_PREFIX, self.file_name)
    }
}
