//! Configuration management for the modstats tooling

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, SettingsLoader};
pub use settings::{
    GithubSettings, GraphSettings, LogSettings, PathSettings, Settings, SpacedockSource,
};
