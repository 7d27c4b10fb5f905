//! Chart series preparation from aggregated totals

use crate::AggregateTotals;

/// Versions with fewer downloads than this are folded into "Others" in the
/// pie chart, unless overridden.
pub const DEFAULT_PIE_THRESHOLD: u64 = 1000;

/// Bar series: every version with its total, ascending by version. Nothing
/// is dropped.
pub fn bar_series(totals: &AggregateTotals) -> Vec<(String, u64)> {
    totals
        .iter()
        .map(|(version, count)| (version.to_string(), count))
        .collect()
}

/// Pie series: the significant versions plus the folded remainder
#[derive(Debug, Clone, PartialEq)]
pub struct PieSeries {
    /// Versions meeting the threshold, ascending by version
    pub significant: Vec<(String, u64)>,
    /// Combined count of all versions below the threshold
    pub others_total: u64,
}

/// Partition totals into significant versions and an "Others" remainder.
///
/// A version is significant when its count is at least `threshold`. When
/// every version is below the threshold, `significant` is empty and
/// `others_total` equals the grand total.
pub fn pie_series(totals: &AggregateTotals, threshold: u64) -> PieSeries {
    let mut significant = Vec::new();
    let mut others_total = 0u64;

    for (version, count) in totals.iter() {
        if count >= threshold {
            significant.push((version.to_string(), count));
        } else {
            others_total += count;
        }
    }

    PieSeries {
        significant,
        others_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use modstats_common::DownloadRecord;

    fn totals(entries: &[(&str, u64)]) -> AggregateTotals {
        aggregate(vec![entries
            .iter()
            .map(|&(v, c)| DownloadRecord::new(v.parse().unwrap(), c))
            .collect::<Vec<_>>()])
    }

    #[test]
    fn test_bar_series_includes_every_version_in_order() {
        let totals = totals(&[("1.10.0", 5), ("1.2.0", 10), ("1.9.0", 2)]);

        let series = bar_series(&totals);
        assert_eq!(
            series,
            vec![
                ("1.2.0".to_string(), 10),
                ("1.9.0".to_string(), 2),
                ("1.10.0".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_pie_partitioning() {
        let totals = totals(&[("1.0.0", 500), ("1.1.0", 2000), ("1.2.0", 50)]);

        let series = pie_series(&totals, 1000);
        assert_eq!(series.significant, vec![("1.1.0".to_string(), 2000)]);
        assert_eq!(series.others_total, 550);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let totals = totals(&[("1.0.0", 1000), ("1.1.0", 999)]);

        let series = pie_series(&totals, 1000);
        assert_eq!(series.significant, vec![("1.0.0".to_string(), 1000)]);
        assert_eq!(series.others_total, 999);
    }

    #[test]
    fn test_all_versions_below_threshold() {
        let totals = totals(&[("1.0.0", 10), ("1.1.0", 20)]);

        let series = pie_series(&totals, 1000);
        assert!(series.significant.is_empty());
        assert_eq!(series.others_total, totals.grand_total());
    }

    #[test]
    fn test_empty_totals() {
        let totals = AggregateTotals::new();

        assert!(bar_series(&totals).is_empty());
        let series = pie_series(&totals, DEFAULT_PIE_THRESHOLD);
        assert!(series.significant.is_empty());
        assert_eq!(series.others_total, 0);
    }
}
