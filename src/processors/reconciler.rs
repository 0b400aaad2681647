use crate::models::{DailyRecord, DailyRollup, MergedRecord};
use crate::utils::constants::JOIN_SAMPLE_SIZE;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Outcome of the date join between the daily dataset and the hourly rollup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinReport {
    pub matched: usize,
    /// Dates found only in the daily dataset, ascending.
    pub daily_only: Vec<NaiveDate>,
    /// Dates found only in the hourly rollup, ascending.
    pub rollup_only: Vec<NaiveDate>,
    /// Daily dates that occurred more than once; only the first row is merged.
    pub duplicate_daily: Vec<NaiveDate>,
}

impl JoinReport {
    pub fn is_exact(&self) -> bool {
        self.daily_only.is_empty()
            && self.rollup_only.is_empty()
            && self.duplicate_daily.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.daily_only.len() + self.rollup_only.len()
    }
}

/// Inner-joins daily records with hourly rollups on the calendar date.
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    /// Merge the two sources, keeping only dates present in both.
    pub fn merge(&self, daily: &[DailyRecord], rollup: &[DailyRollup]) -> Vec<MergedRecord> {
        self.merge_with_report(daily, rollup).0
    }

    /// Merge the two sources and report which dates were excluded.
    ///
    /// Each date is merged at most once, so the output never holds more rows
    /// than the smaller input. Output is ordered by date.
    pub fn merge_with_report(
        &self,
        daily: &[DailyRecord],
        rollup: &[DailyRollup],
    ) -> (Vec<MergedRecord>, JoinReport) {
        let mut index: HashMap<NaiveDate, &DailyRollup> = HashMap::with_capacity(rollup.len());
        for summary in rollup {
            index.entry(summary.date).or_insert(summary);
        }

        let mut merged = Vec::with_capacity(daily.len().min(index.len()));
        let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(daily.len());
        let mut daily_only = Vec::new();
        let mut duplicate_daily = Vec::new();

        for record in daily {
            if !seen.insert(record.date) {
                duplicate_daily.push(record.date);
                continue;
            }
            match index.get(&record.date) {
                Some(summary) => merged.push(MergedRecord::from_parts(record, summary)),
                None => daily_only.push(record.date),
            }
        }

        let mut rollup_only: Vec<NaiveDate> = index
            .into_keys()
            .filter(|date| !seen.contains(date))
            .collect();
        rollup_only.sort_unstable();
        daily_only.sort_unstable();
        duplicate_daily.sort_unstable();
        duplicate_daily.dedup();
        merged.sort_by_key(|r| r.date);

        let report = JoinReport {
            matched: merged.len(),
            daily_only,
            rollup_only,
            duplicate_daily,
        };

        if !report.daily_only.is_empty() || !report.rollup_only.is_empty() {
            warn!(
                daily_only = report.daily_only.len(),
                rollup_only = report.rollup_only.len(),
                daily_only_sample = ?sample(&report.daily_only),
                rollup_only_sample = ?sample(&report.rollup_only),
                "Join key mismatch: dates present in only one source were excluded from the merge"
            );
        }
        if !report.duplicate_daily.is_empty() {
            warn!(
                duplicates = report.duplicate_daily.len(),
                sample = ?sample(&report.duplicate_daily),
                "Repeated daily dates were merged once; later rows were skipped"
            );
        }
        info!(matched = report.matched, "Merged daily records with hourly rollup");

        (merged, report)
    }
}

fn sample(dates: &[NaiveDate]) -> &[NaiveDate] {
    &dates[..dates.len().min(JOIN_SAMPLE_SIZE)]
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
