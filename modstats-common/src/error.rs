//! Error types and utilities for modstats

use thiserror::Error;

/// Result type alias for modstats operations
pub type Result<T> = std::result::Result<T, ModStatsError>;

/// Main error type for modstats operations
#[derive(Error, Debug)]
pub enum ModStatsError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network/transport failures reaching a download source
    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A CSV row or release tag that fails version/count parsing.
    ///
    /// `row` is 1-based and counts the header line, matching what an editor
    /// shows for the file.
    #[error("Malformed record in {file} at row {row}: {message}")]
    MalformedRecord {
        file: String,
        row: u64,
        message: String,
        #[source]
        source: Option<Box<ModStatsError>>,
    },

    /// A version string that cannot be decomposed into integer components
    #[error("Malformed version string: {input:?}")]
    MalformedVersion { input: String },

    /// Graph generation and rendering errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// CSV encoding/decoding errors outside of per-row field parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ModStatsError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new fetch error with source
    pub fn fetch_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new malformed record error
    pub fn malformed_record(
        file: impl Into<String>,
        row: u64,
        msg: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            file: file.into(),
            row,
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new malformed record error that wraps the underlying parse error
    pub fn malformed_record_with_source(
        file: impl Into<String>,
        row: u64,
        msg: impl Into<String>,
        source: ModStatsError,
    ) -> Self {
        Self::MalformedRecord {
            file: file.into(),
            row,
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new malformed version error
    pub fn malformed_version(input: impl Into<String>) -> Self {
        Self::MalformedVersion {
            input: input.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to ModStatsError
impl From<reqwest::Error> for ModStatsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::fetch_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::fetch_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::fetch_with_source(format!("HTTP error: {}", status_code), err)
        } else {
            Self::fetch_with_source("Network request failed", err)
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to ModStatsError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for ModStatsError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
