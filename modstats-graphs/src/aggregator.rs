//! Folding download records into version-keyed totals

use modstats_common::{DownloadRecord, VersionKey};
use std::collections::BTreeMap;
use tracing::debug;

/// Total download counts keyed by version.
///
/// Keys are unique under the zero-padded version equality, so different
/// spellings of the same version ("1.03.0", "1.3.0") share one entry.
/// Values only ever grow, one fold step at a time; the structure is built
/// fresh per pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTotals {
    totals: BTreeMap<VersionKey, u64>,
}

impl AggregateTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the totals
    pub fn add_record(&mut self, record: DownloadRecord) {
        *self.totals.entry(record.version).or_insert(0) += record.count;
    }

    /// Number of distinct versions
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum of the download counts over all versions
    pub fn grand_total(&self) -> u64 {
        self.totals.values().sum()
    }

    /// Total for a single version, if present
    pub fn get(&self, version: &VersionKey) -> Option<u64> {
        self.totals.get(version).copied()
    }

    /// Iterate totals in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = (&VersionKey, u64)> {
        self.totals.iter().map(|(version, &count)| (version, count))
    }
}

/// Fold records from any number of sources into one total mapping.
///
/// The fold is commutative and associative: neither source order nor row
/// order affects the result. No sources, or sources without records, produce
/// empty totals rather than an error.
pub fn aggregate<I, S>(sources: I) -> AggregateTotals
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = DownloadRecord>,
{
    let mut totals = AggregateTotals::new();
    for source in sources {
        for record in source {
            totals.add_record(record);
        }
    }

    debug!(
        versions = totals.len(),
        grand_total = totals.grand_total(),
        "Aggregated download records"
    );
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(version: &str, count: u64) -> DownloadRecord {
        DownloadRecord::new(version.parse().unwrap(), count)
    }

    #[test]
    fn test_basic_fold() {
        let totals = aggregate(vec![vec![
            record("1.0.0", 10),
            record("1.1.0", 20),
            record("1.0.0", 5),
        ]]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get(&"1.0.0".parse().unwrap()), Some(15));
        assert_eq!(totals.get(&"1.1.0".parse().unwrap()), Some(20));
        assert_eq!(totals.grand_total(), 35);
    }

    #[test]
    fn test_commutative_across_source_order() {
        let a = vec![record("1.0.0", 10), record("1.2.0", 7)];
        let b = vec![record("1.2.0", 3), record("2.0.0", 1)];

        let forward = aggregate(vec![a.clone(), b.clone()]);
        let backward = aggregate(vec![b, a]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_splitting_rows_across_sources_is_equivalent() {
        let rows = vec![
            record("1.0.0", 10),
            record("1.1.0", 20),
            record("1.0.0", 5),
            record("1.2.0", 2),
        ];

        let merged = aggregate(vec![rows.clone()]);
        let split = aggregate(
            rows.into_iter()
                .map(|r| vec![r])
                .collect::<Vec<_>>(),
        );

        assert_eq!(merged, split);
    }

    #[test]
    fn test_sum_invariant() {
        let sources = vec![
            vec![record("1.0.0", 11), record("1.1.0", 22)],
            vec![record("0.4.0", 7)],
            vec![],
            vec![record("1.1.0", 100)],
        ];
        let input_sum: u64 = sources
            .iter()
            .flatten()
            .map(|r| r.count)
            .sum();

        let totals = aggregate(sources);
        assert_eq!(totals.grand_total(), input_sum);
    }

    #[test]
    fn test_version_spellings_merge_canonically() {
        let totals = aggregate(vec![vec![record("1.03.0", 10), record("1.3.0", 5)]]);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get(&"1.3.0".parse().unwrap()), Some(15));
    }

    #[test]
    fn test_empty_sources_yield_empty_totals() {
        let totals = aggregate(Vec::<Vec<DownloadRecord>>::new());
        assert!(totals.is_empty());
        assert_eq!(totals.grand_total(), 0);

        let totals = aggregate(vec![Vec::<DownloadRecord>::new()]);
        assert!(totals.is_empty());
    }

    #[test]
    fn test_iteration_is_version_ordered() {
        let totals = aggregate(vec![vec![
            record("1.10.0", 1),
            record("1.2.0", 2),
            record("1.9.0", 3),
        ]]);

        let order: Vec<String> = totals.iter().map(|(v, _)| v.to_string()).collect();
        assert_eq!(order, vec!["1.2.0", "1.9.0", "1.10.0"]);
    }
}
