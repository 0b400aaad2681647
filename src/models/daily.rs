use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the daily dataset. `date` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DailyRecord {
    pub date: NaiveDate,

    #[validate(range(min = 1, max = 4))]
    pub season: u8,

    #[validate(range(min = 0, max = 1))]
    pub workingday: u8,

    #[validate(range(min = 0, max = 1))]
    pub holiday: u8,

    #[validate(range(min = 0.0, max = 1.0))]
    pub temp: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub atemp: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub humidity: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub windspeed: f64,

    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

impl DailyRecord {
    /// casual + registered == cnt
    pub fn has_consistent_counts(&self) -> bool {
        self.casual as u64 + self.registered as u64 == self.cnt as u64
    }
}
