//! Gauntlet result data models
//!
//! Timings are stored in seconds, keyed by payload size. Iteration is always
//! in ascending size order.

use std::collections::btree_map::{self, BTreeMap};
use std::time::Duration;

/// Write, read and delete timings for one payload size, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseTimings {
    /// Time for one batch write divided by the round count
    pub write: f64,
    /// Time for one batch read divided by the round count
    pub read: f64,
    /// Time for one batch delete divided by the round count
    pub delete: f64,
}

impl PhaseTimings {
    pub fn new(write: f64, read: f64, delete: f64) -> Self {
        Self {
            write,
            read,
            delete,
        }
    }

    /// Timings in write, read, delete order
    pub fn as_array(&self) -> [f64; 3] {
        [self.write, self.read, self.delete]
    }

    /// Scale a measured duration down by `rounds`
    pub fn normalize(elapsed: Duration, rounds: usize) -> f64 {
        if rounds == 0 {
            return 0.0;
        }
        elapsed.as_secs_f64() / rounds as f64
    }
}

impl From<[f64; 3]> for PhaseTimings {
    fn from(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}

/// Mapping from payload size to its retained phase timings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingResults {
    by_size: BTreeMap<u64, PhaseTimings>,
}

impl TimingResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record timings for `size`, replacing any earlier entry
    pub fn record(&mut self, size: u64, timings: PhaseTimings) {
        self.by_size.insert(size, timings);
    }

    pub fn get(&self, size: u64) -> Option<&PhaseTimings> {
        self.by_size.get(&size)
    }

    pub fn len(&self) -> usize {
        self.by_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }

    /// Sizes in ascending order
    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.by_size.keys().copied()
    }

    /// Entries in ascending size order
    pub fn iter(&self) -> btree_map::Iter<'_, u64, PhaseTimings> {
        self.by_size.iter()
    }
}

impl<'a> IntoIterator for &'a TimingResults {
    type Item = (&'a u64, &'a PhaseTimings);
    type IntoIter = btree_map::Iter<'a, u64, PhaseTimings>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_size.iter()
    }
}

impl FromIterator<(u64, [f64; 3])> for TimingResults {
    fn from_iter<I: IntoIterator<Item = (u64, [f64; 3])>>(iter: I) -> Self {
        let mut results = Self::new();
        for (size, timings) in iter {
            results.record(size, PhaseTimings::from(timings));
        }
        results
    }
}
