//! Aggregation and chart generation for modstats download statistics

pub mod aggregator;
pub mod bar_chart;
pub mod pie_chart;
pub mod renderer;
pub mod series;
pub mod types;

// Re-export commonly used types
pub use aggregator::{aggregate, AggregateTotals};
pub use bar_chart::DownloadsBarChart;
pub use pie_chart::DownloadsPieChart;
pub use renderer::GraphRenderer;
pub use series::{bar_series, pie_series, PieSeries, DEFAULT_PIE_THRESHOLD};
pub use types::{ColorScheme, FontConfig, GraphConfig, GraphType, MarginConfig, StyleConfig};
