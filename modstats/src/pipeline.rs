//! The sequential aggregation pipeline
//!
//! One run is fully sequential: fetch the SpaceDock exports, export the
//! GitHub release downloads, read every intermediate CSV back, aggregate,
//! print the report, render both charts. Any fatal error aborts the run; a
//! failed fetch never produces partial charts.

use crate::report::report_lines;
use modstats_common::Result;
use modstats_config::{GraphSettings, Settings};
use modstats_graphs::{
    aggregate, AggregateTotals, ColorScheme, DownloadsBarChart, DownloadsPieChart, FontConfig,
    GraphRenderer, MarginConfig, StyleConfig,
};
use modstats_sources::{read_download_log, GithubClient, GithubConfig, SpacedockClient};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the persisted GitHub release downloads, next to the
/// SpaceDock exports
const GITHUB_RELEASES_FILE: &str = "github_releases.csv";

/// Run the full pipeline and return the aggregated totals.
pub async fn run(settings: &Settings, access_token: &str) -> Result<AggregateTotals> {
    let resources_dir = Path::new(&settings.paths.resources_dir);
    std::fs::create_dir_all(resources_dir)?;

    // SpaceDock download logs
    let spacedock = SpacedockClient::with_defaults()?;
    for source in &settings.sources {
        info!(source = %source.name, "Fetching SpaceDock download log");
        spacedock
            .download_stats(&source.url, &resources_dir.join(&source.file))
            .await?;
    }

    // GitHub release downloads, persisted in the same CSV shape
    let github_config = GithubConfig::new(
        access_token,
        &settings.github.owner,
        &settings.github.repo,
    )
    .with_api_base_url(&settings.github.api_base_url)
    .with_timeout(settings.github.timeout_seconds);
    let github = GithubClient::new(github_config)?;

    let github_csv = resources_dir.join(GITHUB_RELEASES_FILE);
    github
        .export_download_log(&settings.github.tag_prefix, &github_csv)
        .await?;

    // Merge every intermediate CSV into one set of totals
    let mut csv_paths: Vec<PathBuf> = settings
        .sources
        .iter()
        .map(|source| resources_dir.join(&source.file))
        .collect();
    csv_paths.push(github_csv);

    let mut record_sources = Vec::with_capacity(csv_paths.len());
    for path in &csv_paths {
        record_sources.push(read_download_log(path)?);
    }
    let totals = aggregate(record_sources);

    // Console report
    for line in report_lines(&totals) {
        println!("{line}");
    }

    // Charts
    let output_dir = Path::new(&settings.paths.output_dir);
    std::fs::create_dir_all(output_dir)?;

    let (bar_chart, mut bar_config) =
        DownloadsBarChart::with_config(&totals, settings.graph.width, settings.graph.height);
    bar_config.style = style_from_settings(&settings.graph);
    bar_config.style.color_scheme = ColorScheme::Custom(vec![settings.graph.bar_color.clone()]);
    bar_chart
        .render_to_file(&bar_config, &output_dir.join("bar_chart.png"))
        .await?;

    let (pie_chart, mut pie_config) = DownloadsPieChart::with_config(
        &totals,
        settings.graph.pie_threshold,
        settings.graph.width,
        settings.graph.height,
    );
    pie_config.style = style_from_settings(&settings.graph);
    pie_chart
        .render_to_file(&pie_config, &output_dir.join("pie_chart.png"))
        .await?;

    info!(
        versions = totals.len(),
        total = totals.grand_total(),
        "Pipeline complete"
    );
    Ok(totals)
}

/// Map the configured graph settings onto a chart style
fn style_from_settings(graph: &GraphSettings) -> StyleConfig {
    StyleConfig {
        color_scheme: ColorScheme::Default,
        background_color: Some(graph.background_color.clone()),
        text_color: Some(graph.text_color.clone()),
        title_font: FontConfig {
            family: graph.font_family.clone(),
            size: graph.font_size + 4,
        },
        axis_font: FontConfig {
            family: graph.font_family.clone(),
            size: graph.font_size,
        },
        margins: MarginConfig::default(),
    }
}
