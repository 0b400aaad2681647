use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily-equivalent summary derived purely from hourly rows of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    pub date: NaiveDate,

    // Sums over the hours of the date
    pub cnt: u64,
    pub casual: u64,
    pub registered: u64,

    // Unweighted means over the hours of the date
    pub temp: f64,
    pub atemp: f64,
    pub humidity: f64,
    pub windspeed: f64,

    pub hours: usize,
}

impl DailyRollup {
    pub fn has_consistent_counts(&self) -> bool {
        self.casual + self.registered == self.cnt
    }
}
