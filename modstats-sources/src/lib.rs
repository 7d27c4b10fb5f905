//! Download-statistics sources for modstats
//!
//! Two producers feed the shared download-log CSV format: SpaceDock's
//! per-mod stats export and GitHub release-asset download counts. Both end
//! up as files with the header `Date,Downloads,Mod Version` that
//! [`log_file::read_download_log`] turns into records for aggregation.

pub mod github;
pub mod log_file;
pub mod spacedock;

pub use github::{
    mod_version_from_tag, release_rows, GithubClient, GithubConfig, Release, ReleaseAsset,
};
pub use log_file::{read_download_log, write_download_log, LogRow};
pub use spacedock::SpacedockClient;
