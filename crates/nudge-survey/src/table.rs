//! `BehaviorTable`: historical records grouped by `StateKey`.
//!
//! # Layout
//!
//! Buckets are stored in a flat `Vec` indexed by [`StateKey::index`], so the
//! table is always complete: a key with no observations simply has an empty
//! bucket.  Record order inside a bucket is insertion order, which carries no
//! meaning for the models.

use std::collections::HashMap;

use nudge_core::{Outcome, StateKey};

use crate::BehaviorRecord;

// ── CoverageReport ────────────────────────────────────────────────────────────

/// Which state keys have no historical data.
///
/// Sparse coverage is not an error: the history-weighted models answer empty
/// buckets with a fixed fallback distribution.  This report exists so that
/// callers can log or assert on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageReport {
    pub empty_states: Vec<StateKey>,
    pub total_states: usize,
}

impl CoverageReport {
    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty_states.len()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.empty_states.is_empty()
    }
}

// ── BehaviorTable ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct BehaviorTable {
    buckets: Vec<Vec<BehaviorRecord>>,
}

impl Default for BehaviorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorTable {
    /// A table with all 56 buckets present and empty.
    pub fn new() -> Self {
        Self { buckets: vec![Vec::new(); StateKey::COUNT] }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BehaviorRecord>,
    {
        let mut table = Self::new();
        for r in records {
            table.push(r);
        }
        table
    }

    /// Like [`from_records`][Self::from_records] but keeps only records for
    /// which `keep` returns `true` (e.g. a single respondent).
    pub fn from_records_filtered<I, F>(records: I, mut keep: F) -> Self
    where
        I: IntoIterator<Item = BehaviorRecord>,
        F: FnMut(&BehaviorRecord) -> bool,
    {
        Self::from_records(records.into_iter().filter(|r| keep(r)))
    }

    /// Build from an externally populated mapping.  Keys missing from
    /// `buckets` get empty buckets.
    pub fn from_buckets(buckets: HashMap<StateKey, Vec<BehaviorRecord>>) -> Self {
        let mut table = Self::new();
        for (key, records) in buckets {
            table.buckets[key.index()].extend(records);
        }
        table
    }

    /// File `record` under its own state key.
    pub fn push(&mut self, record: BehaviorRecord) {
        self.buckets[record.key.index()].push(record);
    }

    /// Records for `key`; empty slice when there is no data.
    #[inline]
    pub fn bucket(&self, key: StateKey) -> &[BehaviorRecord] {
        &self.buckets[key.index()]
    }

    /// `(key, records)` pairs for every state, in `StateKey::index` order.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, &[BehaviorRecord])> {
        StateKey::all().map(move |k| (k, self.bucket(k)))
    }

    pub fn total_records(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn accept_count(&self) -> usize {
        self.count_outcome(Outcome::Accept)
    }

    pub fn ignore_count(&self) -> usize {
        self.count_outcome(Outcome::Ignore)
    }

    pub fn empty_state_count(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_empty()).count()
    }

    pub fn coverage(&self) -> CoverageReport {
        let empty_states: Vec<StateKey> = self
            .iter()
            .filter(|(_, records)| records.is_empty())
            .map(|(key, _)| key)
            .collect();
        CoverageReport { empty_states, total_states: StateKey::COUNT }
    }

    /// Compute [`coverage`][Self::coverage] and log it: one `debug!` per
    /// empty state and a single `warn!` with the total.
    pub fn report_coverage(&self) -> CoverageReport {
        let report = self.coverage();
        for key in &report.empty_states {
            tracing::debug!(state = %key, "no historical records for state");
        }
        if !report.is_complete() {
            tracing::warn!(
                empty = report.empty_count(),
                total = report.total_states,
                "no records for {} states; those states use the fallback distribution",
                report.empty_count(),
            );
        }
        report
    }

    fn count_outcome(&self, outcome: Outcome) -> usize {
        self.buckets
            .iter()
            .flatten()
            .filter(|r| r.outcome == outcome)
            .count()
    }
}
