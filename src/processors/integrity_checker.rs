use crate::models::{DailyRecord, HourlyRecord, MergedRecord};
use crate::utils::constants::{MAX_NORMALIZED, MIN_NORMALIZED};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub daily_records: usize,
    pub hourly_records: usize,
    pub merged_records: usize,
    pub violations: Vec<IntegrityViolation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count_of(&self, violation_type: ViolationType) -> usize {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrityViolation {
    pub source: RecordSource,
    pub date: NaiveDate,
    pub hour: Option<u8>,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordSource {
    Daily,
    Hourly,
    Merged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    /// casual + registered != cnt
    CountMismatch,
    /// Normalized feature outside [0, 1]
    OutOfRange,
    /// Daily count differs from the count summed over its hours
    RollupDivergence,
}

/// Reports inconsistencies in loaded and merged data. Nothing is repaired.
pub struct IntegrityChecker {
    divergence_tolerance: u64,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            divergence_tolerance: 0,
        }
    }

    /// Largest absolute difference between `cnt_day` and `cnt_hour` that is
    /// not reported.
    pub fn with_divergence_tolerance(mut self, tolerance: u64) -> Self {
        self.divergence_tolerance = tolerance;
        self
    }

    pub fn check(
        &self,
        daily: &[DailyRecord],
        hourly: &[HourlyRecord],
        merged: &[MergedRecord],
    ) -> IntegrityReport {
        let mut report = IntegrityReport {
            daily_records: daily.len(),
            hourly_records: hourly.len(),
            merged_records: merged.len(),
            violations: Vec::new(),
        };

        for record in daily {
            if !record.has_consistent_counts() {
                report.violations.push(IntegrityViolation {
                    source: RecordSource::Daily,
                    date: record.date,
                    hour: None,
                    violation_type: ViolationType::CountMismatch,
                    details: format!(
                        "casual {} + registered {} != cnt {}",
                        record.casual, record.registered, record.cnt
                    ),
                });
            }
            let features = [
                (record.temp, "temp"),
                (record.atemp, "atemp"),
                (record.humidity, "humidity"),
                (record.windspeed, "windspeed"),
            ];
            self.check_ranges(RecordSource::Daily, record.date, None, &features, &mut report);
        }

        for record in hourly {
            if !record.has_consistent_counts() {
                report.violations.push(IntegrityViolation {
                    source: RecordSource::Hourly,
                    date: record.date,
                    hour: Some(record.hour),
                    violation_type: ViolationType::CountMismatch,
                    details: format!(
                        "casual {} + registered {} != cnt {}",
                        record.casual, record.registered, record.cnt
                    ),
                });
            }
            let features = [
                (record.temp, "temp"),
                (record.atemp, "atemp"),
                (record.humidity, "humidity"),
                (record.windspeed, "windspeed"),
            ];
            self.check_ranges(
                RecordSource::Hourly,
                record.date,
                Some(record.hour),
                &features,
                &mut report,
            );
        }

        for record in merged {
            if record.cnt_difference().unsigned_abs() > self.divergence_tolerance {
                report.violations.push(IntegrityViolation {
                    source: RecordSource::Merged,
                    date: record.date,
                    hour: None,
                    violation_type: ViolationType::RollupDivergence,
                    details: format!(
                        "daily cnt {} differs from hourly total {} over {} hours",
                        record.cnt_day, record.cnt_hour, record.hours
                    ),
                });
            }
        }

        report
    }

    fn check_ranges(
        &self,
        source: RecordSource,
        date: NaiveDate,
        hour: Option<u8>,
        features: &[(f64, &str)],
        report: &mut IntegrityReport,
    ) {
        for &(value, name) in features {
            if !(MIN_NORMALIZED..=MAX_NORMALIZED).contains(&value) {
                report.violations.push(IntegrityViolation {
                    source,
                    date,
                    hour,
                    violation_type: ViolationType::OutOfRange,
                    details: format!(
                        "{} {} is outside normalized range [{}, {}]",
                        name, value, MIN_NORMALIZED, MAX_NORMALIZED
                    ),
                });
            }
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        let _ = writeln!(summary, "=== Integrity Check Report ===");
        let _ = writeln!(summary, "Daily Records: {}", report.daily_records);
        let _ = writeln!(summary, "Hourly Records: {}", report.hourly_records);
        let _ = writeln!(summary, "Merged Records: {}", report.merged_records);
        let _ = writeln!(
            summary,
            "\nCount Mismatches: {}",
            report.count_of(ViolationType::CountMismatch)
        );
        let _ = writeln!(
            summary,
            "Out of Range Values: {}",
            report.count_of(ViolationType::OutOfRange)
        );
        let _ = writeln!(
            summary,
            "Rollup Divergences: {}",
            report.count_of(ViolationType::RollupDivergence)
        );

        if !report.violations.is_empty() {
            let _ = writeln!(summary, "\nTop 10 Violations:");
            for (i, violation) in report.violations.iter().take(10).enumerate() {
                let hour = violation
                    .hour
                    .map(|h| format!(" hour {:02}", h))
                    .unwrap_or_default();
                let _ = writeln!(
                    summary,
                    "  {}. {:?} {}{}: {}",
                    i + 1,
                    violation.source,
                    violation.date,
                    hour,
                    violation.details
                );
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
