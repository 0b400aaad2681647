use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DailyRecord, DailyRollup};

/// A date present in both the daily dataset and the hourly rollup.
///
/// Fields that exist in both sources are kept twice: `*_day` holds the value
/// recorded in the daily dataset, `*_hour` the value derived from hourly rows.
/// Fields only the daily dataset carries keep their original name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub date: NaiveDate,
    pub season: u8,
    pub workingday: u8,
    pub holiday: u8,

    pub temp_day: f64,
    pub atemp_day: f64,
    pub humidity_day: f64,
    pub windspeed_day: f64,
    pub casual_day: u32,
    pub registered_day: u32,
    pub cnt_day: u32,

    pub cnt_hour: u64,
    pub casual_hour: u64,
    pub registered_hour: u64,
    pub temp_hour: f64,
    pub atemp_hour: f64,
    pub humidity_hour: f64,
    pub windspeed_hour: f64,

    pub hours: usize,
}

impl MergedRecord {
    /// Combine a daily row with the rollup for the same date.
    ///
    /// Callers are responsible for matching dates; the daily date is kept.
    pub fn from_parts(daily: &DailyRecord, rollup: &DailyRollup) -> Self {
        Self {
            date: daily.date,
            season: daily.season,
            workingday: daily.workingday,
            holiday: daily.holiday,
            temp_day: daily.temp,
            atemp_day: daily.atemp,
            humidity_day: daily.humidity,
            windspeed_day: daily.windspeed,
            casual_day: daily.casual,
            registered_day: daily.registered,
            cnt_day: daily.cnt,
            cnt_hour: rollup.cnt,
            casual_hour: rollup.casual,
            registered_hour: rollup.registered,
            temp_hour: rollup.temp,
            atemp_hour: rollup.atemp,
            humidity_hour: rollup.humidity,
            windspeed_hour: rollup.windspeed,
            hours: rollup.hours,
        }
    }

    /// Daily count minus the hourly-derived count.
    pub fn cnt_difference(&self) -> i64 {
        self.cnt_day as i64 - self.cnt_hour as i64
    }

    pub fn counts_agree(&self) -> bool {
        self.cnt_difference() == 0
    }
}
