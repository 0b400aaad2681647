use crate::models::{CategoryProfile, DailyRecord, HourlyProfile};
use crate::processors::DashboardData;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Headline figures over the daily dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalSummary {
    pub total_days: usize,
    pub total_rentals: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl RentalSummary {
    pub fn mean_daily_rentals(&self) -> Option<f64> {
        if self.total_days == 0 {
            None
        } else {
            Some(self.total_rentals as f64 / self.total_days as f64)
        }
    }
}

pub struct RentalAnalyzer;

impl RentalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, daily: &[DailyRecord]) -> RentalSummary {
        RentalSummary {
            total_days: daily.len(),
            total_rentals: daily.iter().map(|r| r.cnt as u64).sum(),
            first_date: daily.iter().map(|r| r.date).min(),
            last_date: daily.iter().map(|r| r.date).max(),
        }
    }

    /// Hour with the highest mean rentals. Ties resolve to the earliest hour.
    pub fn peak_hour<'a>(&self, profile: &'a [HourlyProfile]) -> Option<&'a HourlyProfile> {
        let mut best: Option<&'a HourlyProfile> = None;
        for p in profile {
            if best.map_or(true, |b| p.mean_cnt > b.mean_cnt) {
                best = Some(p);
            }
        }
        best
    }

    /// Plain-text report of a pipeline run.
    pub fn detailed_summary(&self, data: &DashboardData) -> String {
        let mut out = String::new();
        let summary = &data.summary;

        let _ = writeln!(out, "=== Bike Rental Summary ===");
        let _ = writeln!(out, "Total Days: {}", summary.total_days);
        let _ = writeln!(out, "Total Rentals: {}", summary.total_rentals);
        if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
            let _ = writeln!(out, "Date Range: {} to {}", first, last);
        }
        if let Some(mean) = summary.mean_daily_rentals() {
            let _ = writeln!(out, "Mean Daily Rentals: {:.2}", mean);
        }

        let _ = writeln!(out, "\nWorking Day vs Holiday:");
        let _ = writeln!(
            out,
            "  Mean rentals on working days: {}",
            category_mean(&data.workingday_profile, 1)
        );
        let _ = writeln!(
            out,
            "  Mean rentals on holidays: {}",
            category_mean(&data.holiday_profile, 1)
        );

        let _ = writeln!(out, "\nMean Rentals by Season:");
        for (season, mean) in data.season_profile.iter() {
            let _ = writeln!(out, "  {} ({}): {:.2}", season, season_name(season), mean);
        }

        if let Some(peak) = self.peak_hour(&data.hourly_profile) {
            let _ = writeln!(
                out,
                "\nPeak Hour: {:02}:00 ({:.2} mean rentals over {} days)",
                peak.hour, peak.mean_cnt, peak.observations
            );
        }

        if !data.monthly_profile.is_empty() {
            let _ = writeln!(out, "\nMean Hourly Rentals by Month:");
            for month in &data.monthly_profile {
                let _ = writeln!(out, "  {:>2}: {:.2}", month.month, month.mean_cnt);
            }
        }

        let report = &data.join_report;
        let _ = writeln!(out, "\nDaily/Hourly Reconciliation:");
        let _ = writeln!(out, "  Hourly rollup dates: {}", data.rollup.len());
        let _ = writeln!(out, "  Merged dates: {}", report.matched);
        if report.dropped() > 0 {
            let _ = writeln!(
                out,
                "  Excluded: {} daily-only, {} hourly-only",
                report.daily_only.len(),
                report.rollup_only.len()
            );
        }
        if !report.duplicate_daily.is_empty() {
            let _ = writeln!(
                out,
                "  Repeated daily dates merged once: {}",
                report.duplicate_daily.len()
            );
        }

        out
    }
}

impl Default for RentalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn category_mean(profile: &CategoryProfile, category: u8) -> String {
    match profile.get(category) {
        Ok(mean) => format!("{:.2}", mean),
        Err(_) => format!("n/a (no rows with {} = {})", profile.field, category),
    }
}

fn season_name(season: u8) -> &'static str {
    match season {
        1 => "spring",
        2 => "summer",
        3 => "fall",
        4 => "winter",
        _ => "unknown",
    }
}
