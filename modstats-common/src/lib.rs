//! Common utilities and types for the modstats tooling

pub mod error;
pub mod fmt;
pub mod logging;
pub mod record;
pub mod version;

// Re-export commonly used types
pub use error::{ModStatsError, Result};
pub use fmt::format_count;
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use record::{
    format_log_timestamp, DownloadRecord, DOWNLOAD_LOG_COLUMNS, LOG_TIMESTAMP_FORMAT,
};
pub use version::VersionKey;
