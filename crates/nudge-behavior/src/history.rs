//! History-weighted humans: replay a nearby historical response.
//!
//! # Sampling
//!
//! A query is classified into its [`StateKey`]; the records in that bucket
//! already match the weekday and recency, so only time of day separates
//! them.  Each record gets weight
//!
//! ```text
//! w = 1 / (|query_minute_of_day - record_minute_of_day| + 5)
//! ```
//!
//! and exactly one record is drawn from the normalized weights.  The result
//! is a point mass on that record's outcome.  Drawing (rather than picking
//! the nearest record) keeps the variance present in the data.
//!
//! An empty bucket answers with a fixed fallback distribution.

use rand::distributions::{Distribution, WeightedIndex};

use nudge_core::{CoreError, ResponseDistribution, SimRng};
use nudge_survey::{BehaviorTable, CoverageReport};

use crate::{BehaviorError, BehaviorResult, ResponseModel, ResponseQuery};

/// Added to every time-of-day distance before inverting.
pub const DISTANCE_OFFSET_MINUTES: f64 = 5.0;

/// Fallback for panel data.  The remaining 0.1 stands for "dismissed",
/// which is not tracked as an outcome.
pub const PANEL_FALLBACK: ResponseDistribution = ResponseDistribution::new(0.1, 0.8);

/// Fallback for survey-line data.
pub const SURVEY_FALLBACK: ResponseDistribution = ResponseDistribution::new(0.1, 0.9);

/// Samples responses from historical records, weighted by time-of-day
/// proximity.
#[derive(Clone, Debug)]
pub struct HistoryWeighted {
    table:    BehaviorTable,
    fallback: ResponseDistribution,
    coverage: CoverageReport,
}

impl HistoryWeighted {
    /// Panel-data model with fallback `(0.1, 0.8)`.
    ///
    /// Logs a coverage warning when some states have no records.
    pub fn new(table: BehaviorTable) -> Self {
        Self::build(table, PANEL_FALLBACK)
    }

    /// Survey-line model with fallback `(0.1, 0.9)`.
    pub fn survey(table: BehaviorTable) -> Self {
        Self::build(table, SURVEY_FALLBACK)
    }

    /// Model with a custom fallback.  Both weights must be finite and
    /// non-negative with a positive sum.
    pub fn with_fallback(table: BehaviorTable, fallback: ResponseDistribution) -> BehaviorResult<Self> {
        let ok = [fallback.accept, fallback.ignore]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
            && fallback.accept + fallback.ignore > 0.0;
        if !ok {
            return Err(BehaviorError::Config(format!(
                "invalid fallback distribution {fallback:?}"
            )));
        }
        Ok(Self::build(table, fallback))
    }

    fn build(table: BehaviorTable, fallback: ResponseDistribution) -> Self {
        let coverage = table.report_coverage();
        Self { table, fallback, coverage }
    }

    pub fn table(&self) -> &BehaviorTable {
        &self.table
    }

    pub fn fallback(&self) -> ResponseDistribution {
        self.fallback
    }

    /// Empty buckets found at construction.
    pub fn coverage(&self) -> &CoverageReport {
        &self.coverage
    }
}

impl ResponseModel for HistoryWeighted {
    fn response_distribution(
        &self,
        query: &ResponseQuery,
        rng:   &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        let records = self.table.bucket(query.state_key()?);
        if records.is_empty() {
            return Ok(self.fallback);
        }

        let query_minute = query.hour as i64 * 60 + query.minute as i64;
        let weights: Vec<f64> = records
            .iter()
            .map(|r| {
                let delta = (query_minute - r.minute_of_day()).abs();
                1.0 / (delta as f64 + DISTANCE_OFFSET_MINUTES)
            })
            .collect();

        let index = WeightedIndex::new(&weights)
            .map_err(|_| CoreError::Distribution { weights: weights.clone() })?;
        let chosen = &records[index.sample(rng.inner())];
        Ok(ResponseDistribution::certain(chosen.outcome))
    }

    fn name(&self) -> &'static str {
        "history-weighted"
    }
}
