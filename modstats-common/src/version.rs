//! Version keys: dotted numeric version strings with numeric ordering
//!
//! A [`VersionKey`] is the canonical orderable form of a mod version string
//! such as `"1.3.2"`. Comparison is purely numeric and component-wise, never
//! lexicographic, so `"1.10.0"` sorts after `"1.9.0"`.

use crate::error::{ModStatsError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Ordered sequence of non-negative integer version components.
///
/// Keys of differing length compare as if the shorter one were zero-padded
/// on the right, so `"1.3"` and `"1.3.0"` are equal. Equality, ordering and
/// hashing all agree on that policy.
#[derive(Debug, Clone, Eq)]
pub struct VersionKey {
    components: Vec<u64>,
}

impl VersionKey {
    /// Parse a dotted numeric version string.
    ///
    /// Fails with [`ModStatsError::MalformedVersion`] if the string is empty
    /// or any component is not an unsigned decimal number.
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    /// The parsed integer components, in order.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Components with trailing zeros stripped; this is the normalized form
    /// that equality and hashing operate on.
    fn significant(&self) -> &[u64] {
        let end = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        &self.components[..end]
    }
}

impl FromStr for VersionKey {
    type Err = ModStatsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ModStatsError::malformed_version(s));
        }

        let components = s
            .split('.')
            .map(|part| {
                // Reject anything u64::from_str would coerce, like "+3".
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ModStatsError::malformed_version(s));
                }
                part.parse::<u64>()
                    .map_err(|_| ModStatsError::malformed_version(s))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components })
    }
}

impl fmt::Display for VersionKey {
    /// Canonical string form: components rejoined with `'.'`.
    ///
    /// This normalizes representations, e.g. `"1.03.0"` displays as `"1.3.0"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Hash for VersionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with the padded equality above, so trailing zeros are
        // excluded from the hash.
        self.significant().hash(state);
    }
}
