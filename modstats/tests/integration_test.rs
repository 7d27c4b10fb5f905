//! End-to-end test of the offline pipeline stages: persisted CSV sources in,
//! report lines and chart files out. Network fetches are exercised at their
//! boundaries in the source crates.

use modstats::report::report_lines;
use modstats_graphs::{
    aggregate, AggregateTotals, DownloadsBarChart, DownloadsPieChart, GraphRenderer,
    DEFAULT_PIE_THRESHOLD,
};
use modstats_sources::{read_download_log, release_rows, write_download_log, Release, ReleaseAsset};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_spacedock_fixture(dir: &Path, name: &str, rows: &[(&str, u64, &str)]) {
    let mut content = String::from("Date,Downloads,Mod Version\n");
    for (date, downloads, version) in rows {
        content.push_str(&format!("{},{},{}\n", date, downloads, version));
    }
    fs::write(dir.join(name), content).unwrap();
}

fn release(tag: &str, prerelease: bool, asset_counts: &[u64]) -> Release {
    Release {
        tag_name: tag.to_string(),
        prerelease,
        published_at: None,
        assets: asset_counts
            .iter()
            .map(|&download_count| ReleaseAsset { download_count })
            .collect(),
    }
}

fn merge_csvs(paths: &[std::path::PathBuf]) -> AggregateTotals {
    let sources = paths
        .iter()
        .map(|path| read_download_log(path).unwrap())
        .collect::<Vec<_>>();
    aggregate(sources)
}

#[tokio::test]
async fn csv_sources_merge_into_report_and_charts() {
    let dir = tempdir().unwrap();

    // Two SpaceDock-style exports
    write_spacedock_fixture(
        dir.path(),
        "spacedock_spacewarp.csv",
        &[
            ("2023-03-11 18:02:44.123456", 1500, "1.0.0"),
            ("2023-03-12 10:00:00.000000", 300, "1.1.0"),
        ],
    );
    write_spacedock_fixture(
        dir.path(),
        "spacedock_spacewarp_bepinex.csv",
        &[("2023-03-13 08:30:00.000000", 200, "1.1.0")],
    );

    // GitHub releases persisted through the shared writer
    let releases = vec![
        release("spacewarp-1.1.0", false, &[2500]),
        release("spacewarp-1.2.0-rc1", false, &[700]),
        release("spacewarp-2.0.0", true, &[9999]),
        release("unrelated-1.0.0", false, &[123]),
    ];
    let rows = release_rows(&releases, "spacewarp-").unwrap();
    let github_csv = dir.path().join("github_releases.csv");
    write_download_log(&github_csv, &rows).unwrap();

    let totals = merge_csvs(&[
        dir.path().join("spacedock_spacewarp.csv"),
        dir.path().join("spacedock_spacewarp_bepinex.csv"),
        github_csv,
    ]);

    // Prerelease and foreign tags contributed nothing; the rc suffix folded
    // into 1.2.0.
    assert_eq!(totals.grand_total(), 1500 + 300 + 200 + 2500 + 700);
    assert_eq!(
        report_lines(&totals),
        vec![
            "Version 1.0.0: 1500 downloads",
            "Version 1.1.0: 3000 downloads",
            "Version 1.2.0: 700 downloads",
            "Total: 5,200 downloads",
        ]
    );

    // Both charts render from the same totals
    let out = tempdir().unwrap();

    let (bar, bar_config) = DownloadsBarChart::with_config(&totals, 800, 600);
    let bar_path = out.path().join("bar_chart.png");
    bar.render_to_file(&bar_config, &bar_path).await.unwrap();
    assert!(bar_path.exists());

    let (pie, pie_config) =
        DownloadsPieChart::with_config(&totals, DEFAULT_PIE_THRESHOLD, 800, 600);
    let pie_path = out.path().join("pie_chart.png");
    pie.render_to_file(&pie_config, &pie_path).await.unwrap();
    assert!(pie_path.exists());
}

#[test]
fn source_order_does_not_change_the_report() {
    let dir = tempdir().unwrap();

    write_spacedock_fixture(
        dir.path(),
        "a.csv",
        &[("2023-03-11 18:02:44.123456", 10, "1.0.0")],
    );
    write_spacedock_fixture(
        dir.path(),
        "b.csv",
        &[
            ("2023-03-12 10:00:00.000000", 5, "1.0.0"),
            ("2023-03-12 10:00:00.000000", 7, "1.1.0"),
        ],
    );

    let forward = merge_csvs(&[dir.path().join("a.csv"), dir.path().join("b.csv")]);
    let backward = merge_csvs(&[dir.path().join("b.csv"), dir.path().join("a.csv")]);

    assert_eq!(report_lines(&forward), report_lines(&backward));
}

#[test]
fn a_malformed_source_aborts_the_merge() {
    let dir = tempdir().unwrap();

    write_spacedock_fixture(
        dir.path(),
        "good.csv",
        &[("2023-03-11 18:02:44.123456", 10, "1.0.0")],
    );
    write_spacedock_fixture(
        dir.path(),
        "bad.csv",
        &[("2023-03-12 10:00:00.000000", 5, "abc")],
    );

    assert!(read_download_log(&dir.path().join("good.csv")).is_ok());
    assert!(read_download_log(&dir.path().join("bad.csv")).is_err());
}
