use crate::models::{DailyRollup, HourlyRecord};
use crate::utils::stats::MeanAccumulator;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Running totals for the hourly rows of one date.
#[derive(Default)]
struct DateAccumulator {
    cnt: u64,
    casual: u64,
    registered: u64,
    temp: MeanAccumulator,
    atemp: MeanAccumulator,
    humidity: MeanAccumulator,
    windspeed: MeanAccumulator,
}

impl DateAccumulator {
    fn add(&mut self, record: &HourlyRecord) {
        self.cnt += record.cnt as u64;
        self.casual += record.casual as u64;
        self.registered += record.registered as u64;
        self.temp.add(record.temp);
        self.atemp.add(record.atemp);
        self.humidity.add(record.humidity);
        self.windspeed.add(record.windspeed);
    }

    fn finish(self, date: NaiveDate) -> Option<DailyRollup> {
        Some(DailyRollup {
            date,
            cnt: self.cnt,
            casual: self.casual,
            registered: self.registered,
            temp: self.temp.mean()?,
            atemp: self.atemp.mean()?,
            humidity: self.humidity.mean()?,
            windspeed: self.windspeed.mean()?,
            hours: self.temp.count(),
        })
    }
}

/// Collapses hourly rows into one daily-equivalent row per date.
pub struct RollupAggregator;

impl RollupAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Sum counts and average environmental fields per date.
    ///
    /// The result holds each date once, ordered by date.
    pub fn rollup(&self, records: &[HourlyRecord]) -> Vec<DailyRollup> {
        let mut grouped: BTreeMap<NaiveDate, DateAccumulator> = BTreeMap::new();
        for record in records {
            grouped.entry(record.date).or_default().add(record);
        }

        let rollups: Vec<DailyRollup> = grouped
            .into_iter()
            .filter_map(|(date, acc)| acc.finish(date))
            .collect();

        debug!(
            hourly_rows = records.len(),
            dates = rollups.len(),
            "Rolled up hourly records"
        );
        rollups
    }
}

impl Default for RollupAggregator {
    fn default() -> Self {
        Self::new()
    }
}
