use crate::models::{
    CategoryField, CategoryProfile, DailyRecord, HourlyProfile, HourlyRecord, MonthlyProfile,
};
use crate::utils::stats::MeanAccumulator;
use chrono::Datelike;
use std::collections::BTreeMap;
use tracing::debug;

/// Group-wise mean rentals over the hourly and daily datasets.
pub struct ProfileAggregator;

impl ProfileAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Mean `cnt` per hour of day, ascending by hour.
    ///
    /// Hours that never occur in the input produce no row.
    pub fn hourly_profile(&self, records: &[HourlyRecord]) -> Vec<HourlyProfile> {
        let mut groups: BTreeMap<u8, MeanAccumulator> = BTreeMap::new();
        for record in records {
            groups.entry(record.hour).or_default().add(record.cnt as f64);
        }

        let profile: Vec<HourlyProfile> = groups
            .into_iter()
            .filter_map(|(hour, acc)| {
                acc.mean().map(|mean_cnt| HourlyProfile {
                    hour,
                    mean_cnt,
                    observations: acc.count(),
                })
            })
            .collect();

        debug!(hours = profile.len(), "Computed hourly profile");
        profile
    }

    /// Mean `cnt` per observed value of `field`.
    pub fn category_profile(
        &self,
        records: &[DailyRecord],
        field: CategoryField,
    ) -> CategoryProfile {
        let mut groups: BTreeMap<u8, MeanAccumulator> = BTreeMap::new();
        for record in records {
            groups
                .entry(field.value_of(record))
                .or_default()
                .add(record.cnt as f64);
        }

        let means: BTreeMap<u8, f64> = groups
            .into_iter()
            .filter_map(|(category, acc)| acc.mean().map(|mean| (category, mean)))
            .collect();

        debug!(%field, categories = means.len(), "Computed category profile");
        CategoryProfile::new(field, means)
    }

    /// Mean hourly `cnt` per calendar month of the record date.
    pub fn monthly_profile(&self, records: &[HourlyRecord]) -> Vec<MonthlyProfile> {
        let mut groups: BTreeMap<u32, MeanAccumulator> = BTreeMap::new();
        for record in records {
            groups
                .entry(record.date.month())
                .or_default()
                .add(record.cnt as f64);
        }

        groups
            .into_iter()
            .filter_map(|(month, acc)| {
                acc.mean().map(|mean_cnt| MonthlyProfile {
                    month,
                    mean_cnt,
                    observations: acc.count(),
                })
            })
            .collect()
    }
}

impl Default for ProfileAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::daily::fixtures::daily;
    use crate::models::hourly::fixtures::hourly;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_hourly_profile_only_observed_hours() {
        let records = vec![
            hourly(date(1, 2), 17, 10, 30, 0.3),
            hourly(date(1, 1), 5, 1, 1, 0.2),
            hourly(date(1, 1), 17, 20, 40, 0.3),
            hourly(date(1, 2), 5, 2, 2, 0.2),
        ];

        let profile = ProfileAggregator::new().hourly_profile(&records);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].hour, 5);
        assert_eq!(profile[0].mean_cnt, 3.0);
        assert_eq!(profile[0].observations, 2);
        assert_eq!(profile[1].hour, 17);
        assert_eq!(profile[1].mean_cnt, 50.0);
    }

    #[test]
    fn test_hourly_profile_is_ascending_and_bounded() {
        let mut records = Vec::new();
        for day in 1..=3 {
            for hour in (0..24).rev() {
                records.push(hourly(date(3, day), hour, hour as u32, 1, 0.5));
            }
        }

        let profile = ProfileAggregator::new().hourly_profile(&records);

        assert_eq!(profile.len(), 24);
        assert!(profile.windows(2).all(|w| w[0].hour < w[1].hour));
        assert!(profile.iter().all(|p| p.mean_cnt >= 0.0));
    }

    #[test]
    fn test_hourly_profile_empty_input() {
        assert!(ProfileAggregator::new().hourly_profile(&[]).is_empty());
    }

    #[test]
    fn test_category_profile() {
        let records = vec![
            daily(date(1, 1), 0, 1, 1000),
            daily(date(1, 2), 1, 0, 3000),
            daily(date(1, 3), 1, 0, 5000),
        ];
        let aggregator = ProfileAggregator::new();

        let workingday = aggregator.category_profile(&records, CategoryField::WorkingDay);
        assert_eq!(workingday.get(0).unwrap(), 1000.0);
        assert_eq!(workingday.get(1).unwrap(), 4000.0);

        let holiday = aggregator.category_profile(&records, CategoryField::Holiday);
        assert_eq!(holiday.get(1).unwrap(), 1000.0);
        assert_eq!(holiday.get(0).unwrap(), 4000.0);
    }

    #[test]
    fn test_category_profile_single_category() {
        let records = vec![daily(date(1, 2), 1, 0, 3000), daily(date(1, 3), 1, 0, 5000)];

        let holiday = ProfileAggregator::new().category_profile(&records, CategoryField::Holiday);

        assert_eq!(holiday.len(), 1);
        assert!(matches!(
            holiday.get(1),
            Err(ProcessingError::MissingCategory { category: 1, .. })
        ));
    }

    #[test]
    fn test_category_profile_unexpected_category_value() {
        let mut odd = daily(date(1, 4), 1, 0, 10);
        odd.workingday = 2;

        let profile = ProfileAggregator::new().category_profile(&[odd], CategoryField::WorkingDay);

        assert_eq!(profile.categories().collect::<Vec<_>>(), vec![2]);
        assert!(profile.get(1).is_err());
    }

    #[test]
    fn test_season_profile() {
        let mut winter = daily(date(1, 1), 1, 0, 100);
        winter.season = 4;
        let spring = daily(date(3, 21), 1, 0, 300);

        let profile =
            ProfileAggregator::new().category_profile(&[winter, spring], CategoryField::Season);

        assert_eq!(profile.get(1).unwrap(), 300.0);
        assert_eq!(profile.get(4).unwrap(), 100.0);
        assert!(profile.get(2).is_err());
    }

    #[test]
    fn test_monthly_profile() {
        let records = vec![
            hourly(date(2, 1), 0, 1, 1, 0.2),
            hourly(date(1, 1), 0, 2, 2, 0.2),
            hourly(date(1, 9), 3, 4, 4, 0.2),
        ];

        let profile = ProfileAggregator::new().monthly_profile(&records);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].month, 1);
        assert_eq!(profile[0].mean_cnt, 6.0);
        assert_eq!(profile[1].month, 2);
        assert_eq!(profile[1].mean_cnt, 2.0);
    }
}
