//! SpaceWarp download statistics: fetch, merge, report, render

pub mod pipeline;
pub mod report;
