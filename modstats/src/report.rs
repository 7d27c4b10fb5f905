//! Console report of aggregated download totals

use modstats_common::format_count;
use modstats_graphs::AggregateTotals;

/// Build the report lines: one line per version in ascending version order,
/// then the grand total with thousands separators.
///
/// Pure formatting; printing the lines is the caller's side effect.
pub fn report_lines(totals: &AggregateTotals) -> Vec<String> {
    let mut lines: Vec<String> = totals
        .iter()
        .map(|(version, count)| format!("Version {}: {} downloads", version, count))
        .collect();

    lines.push(format!(
        "Total: {} downloads",
        format_count(totals.grand_total())
    ));
    lines
}
