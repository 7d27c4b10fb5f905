//! Reading and writing the shared download-log CSV format
//!
//! Every source persists its counts as a CSV with the header
//! `Date,Downloads,Mod Version` so that all files merge identically. The
//! persisted form is also the external interface other tooling may consume.

use csv::{ReaderBuilder, WriterBuilder};
use modstats_common::{
    DownloadRecord, ModStatsError, Result, VersionKey, DOWNLOAD_LOG_COLUMNS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One row of a download-log CSV file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Downloads")]
    pub downloads: u64,
    #[serde(rename = "Mod Version")]
    pub mod_version: String,
}

/// Write a download log, overwriting any previous file.
///
/// The header is written even when `rows` is empty so the file stays a valid
/// download log.
pub fn write_download_log(path: &Path, rows: &[LogRow]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(DOWNLOAD_LOG_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote download log");
    Ok(())
}

/// Read a download log into records.
///
/// The header must carry the `Date`, `Downloads` and `Mod Version` columns.
/// Any row whose `Downloads` or `Mod Version` field fails to parse aborts
/// the read with a [`ModStatsError::MalformedRecord`] naming the file and
/// row; totals must be exact, so there is no best-effort skipping.
pub fn read_download_log(path: &Path) -> Result<Vec<DownloadRecord>> {
    let file_name = path.display().to_string();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            ModStatsError::with_source(format!("Failed to open download log {}", file_name), e)
        })?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            ModStatsError::malformed_record(
                &file_name,
                1,
                format!("missing required column {:?}", name),
            )
        })
    };
    // Date is carried but never analyzed; it still has to be there for the
    // file to be a download log.
    column(DOWNLOAD_LOG_COLUMNS[0])?;
    let downloads_idx = column(DOWNLOAD_LOG_COLUMNS[1])?;
    let version_idx = column(DOWNLOAD_LOG_COLUMNS[2])?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        // 1-based, counting the header line
        let row_number = (i + 2) as u64;

        let row = row.map_err(|e| {
            ModStatsError::malformed_record_with_source(
                &file_name,
                row_number,
                "unreadable CSV row",
                ModStatsError::Csv(e),
            )
        })?;

        let downloads_field = row.get(downloads_idx).unwrap_or("");
        let count: u64 = downloads_field.trim().parse().map_err(|_| {
            ModStatsError::malformed_record(
                &file_name,
                row_number,
                format!("invalid Downloads value {:?}", downloads_field),
            )
        })?;

        let version_field = row.get(version_idx).unwrap_or("");
        let version: VersionKey = version_field.trim().parse().map_err(|e| {
            ModStatsError::malformed_record_with_source(
                &file_name,
                row_number,
                format!("invalid Mod Version {:?}", version_field),
                e,
            )
        })?;

        records.push(DownloadRecord::new(version, count));
    }

    info!(file = %file_name, records = records.len(), "Read download log");
    Ok(records)
}
