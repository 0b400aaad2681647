use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ProcessingError, Result};
use crate::models::DailyRecord;

/// Mean rentals for one hour of the day, across every date that has that hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyProfile {
    pub hour: u8,
    pub mean_cnt: f64,
    pub observations: usize,
}

/// Mean hourly rentals for one calendar month (1-12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProfile {
    pub month: u32,
    pub mean_cnt: f64,
    pub observations: usize,
}

/// Categorical column of the daily dataset that can be used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryField {
    WorkingDay,
    Holiday,
    Season,
}

impl CategoryField {
    pub fn column_name(&self) -> &'static str {
        match self {
            CategoryField::WorkingDay => "workingday",
            CategoryField::Holiday => "holiday",
            CategoryField::Season => "season",
        }
    }

    pub fn value_of(&self, record: &DailyRecord) -> u8 {
        match self {
            CategoryField::WorkingDay => record.workingday,
            CategoryField::Holiday => record.holiday,
            CategoryField::Season => record.season,
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Mean daily rentals per observed value of a [`CategoryField`].
///
/// Only categories that actually occur in the input are present. Looking up
/// any other category is an error rather than a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub field: CategoryField,
    means: BTreeMap<u8, f64>,
}

impl CategoryProfile {
    pub fn new(field: CategoryField, means: BTreeMap<u8, f64>) -> Self {
        Self { field, means }
    }

    pub fn get(&self, category: u8) -> Result<f64> {
        self.means
            .get(&category)
            .copied()
            .ok_or_else(|| ProcessingError::MissingCategory {
                field: self.field.column_name().to_string(),
                category,
            })
    }

    pub fn categories(&self) -> impl Iterator<Item = u8> + '_ {
        self.means.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.means.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}
