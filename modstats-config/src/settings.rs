//! Application settings structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// GitHub release source configuration
    #[validate]
    pub github: GithubSettings,

    /// SpaceDock download-log sources
    #[validate]
    pub sources: Vec<SpacedockSource>,

    /// Filesystem locations for intermediate and output files
    #[validate]
    pub paths: PathSettings,

    /// Chart rendering settings
    #[validate]
    pub graph: GraphSettings,

    /// Logging configuration
    #[validate]
    pub logging: LogSettings,
}

/// GitHub release source configuration.
///
/// The access token is deliberately not part of the settings file; it is
/// passed by the caller on the command line and flows straight to the client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GithubSettings {
    /// Base URL of the GitHub REST API
    #[validate(url(message = "GitHub API base must be a valid URL"))]
    pub api_base_url: String,

    /// Repository owner
    #[validate(length(min = 1, message = "GitHub owner cannot be empty"))]
    pub owner: String,

    /// Repository name
    #[validate(length(min = 1, message = "GitHub repo cannot be empty"))]
    pub repo: String,

    /// Only releases whose tag starts with this prefix are counted
    #[validate(length(min = 1, message = "Tag prefix cannot be empty"))]
    pub tag_prefix: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,
}

/// A SpaceDock download-log export to fetch and merge
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpacedockSource {
    /// Short name used in log messages
    #[validate(length(min = 1, message = "Source name cannot be empty"))]
    pub name: String,

    /// URL of the CSV stats export
    #[validate(url(message = "Source URL must be a valid URL"))]
    pub url: String,

    /// File name (under the resources directory) the export is saved as
    #[validate(length(min = 1, message = "Source file name cannot be empty"))]
    pub file: String,
}

/// Filesystem locations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PathSettings {
    /// Directory the intermediate CSV files are written to
    #[validate(length(min = 1, message = "Resources directory cannot be empty"))]
    pub resources_dir: String,

    /// Directory the chart images are written to
    #[validate(length(min = 1, message = "Output directory cannot be empty"))]
    pub output_dir: String,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GraphSettings {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be a hex color like #000000"))]
    pub background_color: String,

    /// Text color for titles and labels (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Text color must be a hex color like #FFFFFF"))]
    pub text_color: String,

    /// Bar fill color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Bar color must be a hex color like #1F77B4"))]
    pub bar_color: String,

    /// Versions with fewer downloads than this are folded into "Others" in
    /// the pie chart
    pub pie_threshold: u64,

    /// Font family for chart text
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for chart labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use colored console output
    pub colored: bool,
}

impl Settings {
    /// Validate the whole settings tree
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github: GithubSettings::default(),
            sources: vec![
                SpacedockSource {
                    name: "spacewarp".to_string(),
                    url: "https://spacedock.info/mod/3257/Space%20Warp/stats/downloads"
                        .to_string(),
                    file: "spacedock_spacewarp.csv".to_string(),
                },
                SpacedockSource {
                    name: "spacewarp-bepinex".to_string(),
                    url:
                        "https://spacedock.info/mod/3277/Space%20Warp%20+%20BepInEx/stats/downloads"
                            .to_string(),
                    file: "spacedock_spacewarp_bepinex.csv".to_string(),
                },
            ],
            paths: PathSettings::default(),
            graph: GraphSettings::default(),
            logging: LogSettings::default(),
        }
    }
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            owner: "SpaceWarpDev".to_string(),
            repo: "SpaceWarp".to_string(),
            tag_prefix: "spacewarp-".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            resources_dir: "resources".to_string(),
            output_dir: "out".to_string(),
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: "#000000".to_string(),
            text_color: "#FFFFFF".to_string(),
            bar_color: "#1F77B4".to_string(),
            pie_threshold: 1000,
            font_family: "sans-serif".to_string(),
            font_size: 12,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            colored: true,
        }
    }
}
