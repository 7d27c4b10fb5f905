//! Download records and the shared download-log CSV conventions

use crate::version::VersionKey;
use chrono::{DateTime, Utc};

/// Column names of the download-log CSV format shared by every source.
pub const DOWNLOAD_LOG_COLUMNS: [&str; 3] = ["Date", "Downloads", "Mod Version"];

/// Timestamp format used in the `Date` column, e.g. `2023-03-11 18:02:44.123456`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One parsed download-log entry: a version and how many downloads it got.
///
/// The log's `Date` column is carried in the files but never analyzed, so it
/// is not part of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRecord {
    pub version: VersionKey,
    pub count: u64,
}

impl DownloadRecord {
    pub fn new(version: VersionKey, count: u64) -> Self {
        Self { version, count }
    }
}

/// Format a timestamp for the `Date` column of a download log.
pub fn format_log_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(LOG_TIMESTAMP_FORMAT).to_string()
}
