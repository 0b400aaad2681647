use crate::analyzers::{RentalAnalyzer, RentalSummary};
use crate::error::Result;
use crate::models::{
    CategoryField, CategoryProfile, DailyRecord, DailyRollup, HourlyProfile, HourlyRecord,
    MergedRecord, MonthlyProfile,
};
use crate::processors::{JoinReport, ProfileAggregator, Reconciler, RollupAggregator};
use crate::readers::RecordLoader;
use serde::Serialize;
use std::io::Read;
use tracing::info;

/// Everything one pipeline run produces, handed read-only to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub summary: RentalSummary,
    pub hourly_profile: Vec<HourlyProfile>,
    pub monthly_profile: Vec<MonthlyProfile>,
    pub workingday_profile: CategoryProfile,
    pub holiday_profile: CategoryProfile,
    pub season_profile: CategoryProfile,
    pub rollup: Vec<DailyRollup>,
    pub merged: Vec<MergedRecord>,
    pub join_report: JoinReport,
}

/// Runs the aggregation and reconciliation stages over loaded datasets.
pub struct Pipeline {
    loader: RecordLoader,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            loader: RecordLoader::new(),
        }
    }

    pub fn with_loader(loader: RecordLoader) -> Self {
        Self { loader }
    }

    /// Load both datasets, then run. A load failure aborts before any
    /// aggregation happens.
    pub fn run_from_readers<D: Read, H: Read>(&self, day: D, hour: H) -> Result<DashboardData> {
        let daily = self.loader.load_daily(day)?;
        let hourly = self.loader.load_hourly(hour)?;
        Ok(self.run(&daily, &hourly))
    }

    /// Profiles and the rollup are independent and run concurrently; the
    /// merge waits for the rollup.
    pub fn run(&self, daily: &[DailyRecord], hourly: &[HourlyRecord]) -> DashboardData {
        let profiles = ProfileAggregator::new();
        let rollups = RollupAggregator::new();

        let (hour_profiles, (category_profiles, rollup)) = rayon::join(
            || {
                rayon::join(
                    || profiles.hourly_profile(hourly),
                    || profiles.monthly_profile(hourly),
                )
            },
            || {
                rayon::join(
                    || {
                        (
                            profiles.category_profile(daily, CategoryField::WorkingDay),
                            profiles.category_profile(daily, CategoryField::Holiday),
                            profiles.category_profile(daily, CategoryField::Season),
                        )
                    },
                    || rollups.rollup(hourly),
                )
            },
        );
        let (hourly_profile, monthly_profile) = hour_profiles;
        let (workingday_profile, holiday_profile, season_profile) = category_profiles;

        let (merged, join_report) = Reconciler::new().merge_with_report(daily, &rollup);
        let summary = RentalAnalyzer::new().summarize(daily);

        info!(
            days = summary.total_days,
            rentals = summary.total_rentals,
            rollup_dates = rollup.len(),
            merged = merged.len(),
            "Pipeline run complete"
        );

        DashboardData {
            summary,
            hourly_profile,
            monthly_profile,
            workingday_profile,
            holiday_profile,
            season_profile,
            rollup,
            merged,
            join_report,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
