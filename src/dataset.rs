//! The normalized dataset: one activity code per day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::Timestamp;
use crate::taxonomy::ActivityCode;

/// Mapping from local-midnight timestamp to activity code
///
/// Serializes as a flat JSON object whose keys are decimal timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    entries: BTreeMap<Timestamp, ActivityCode>,
}

impl Dataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `code` for `timestamp`, returning the code it replaced
    pub fn insert(&mut self, timestamp: Timestamp, code: ActivityCode) -> Option<ActivityCode> {
        self.entries.insert(timestamp, code)
    }

    /// Code stored for `timestamp`
    #[must_use]
    pub fn get(&self, timestamp: Timestamp) -> Option<ActivityCode> {
        self.entries.get(&timestamp).copied()
    }

    /// Number of days with an activity
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no day has an activity
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in timestamp order
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, ActivityCode)> + '_ {
        self.entries.iter().map(|(&ts, &code)| (ts, code))
    }

    /// Number of days recorded per activity code
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<ActivityCode, usize> {
        let mut counts = BTreeMap::new();
        for &code in self.entries.values() {
            *counts.entry(code).or_insert(0) += 1;
        }
        counts
    }

    /// First and last timestamp, if any
    #[must_use]
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        let first = self.entries.keys().next()?;
        let last = self.entries.keys().next_back()?;
        Some((*first, *last))
    }
}

impl FromIterator<(Timestamp, ActivityCode)> for Dataset {
    /// Later pairs overwrite earlier ones with the same timestamp
    fn from_iter<I: IntoIterator<Item = (Timestamp, ActivityCode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
