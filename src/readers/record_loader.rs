use crate::error::{ProcessingError, Result};
use crate::models::{DailyRecord, HourlyRecord};
use crate::utils::constants::*;
use crate::utils::dates::parse_calendar_date;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::io::Read;
use std::str::FromStr;
use tracing::{debug, info};
use validator::Validate;

/// Parses delimited daily and hourly input into typed records.
///
/// Input must carry a header row. Any missing column or unparseable field
/// aborts the whole load; no row is skipped.
pub struct RecordLoader {
    date_formats: Vec<String>,
    strict_validation: bool,
}

impl RecordLoader {
    pub fn new() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            strict_validation: false,
        }
    }

    pub fn with_date_formats(mut self, date_formats: Vec<String>) -> Self {
        if !date_formats.is_empty() {
            self.date_formats = date_formats;
        }
        self
    }

    /// Reject rows whose values fall outside their documented domains
    /// (season 1-4, flags 0/1, normalized features in [0, 1]).
    pub fn with_strict_validation(mut self, strict_validation: bool) -> Self {
        self.strict_validation = strict_validation;
        self
    }

    /// Load the daily dataset. Dates must be unique.
    pub fn load_daily<R: Read>(&self, input: R) -> Result<Vec<DailyRecord>> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
        let columns = FeatureColumns::resolve(reader.headers()?, DAILY_DATASET)?;

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut row = StringRecord::new();

        while reader.read_record(&mut row)? {
            let fields = RowFields::new(&row, DAILY_DATASET);
            let date = fields.date(columns.date, DATE_COLUMNS[0], &self.date_formats)?;

            let record = DailyRecord {
                date,
                season: fields.number(columns.season, SEASON_COLUMNS[0])?,
                workingday: fields.number(columns.workingday, WORKINGDAY_COLUMNS[0])?,
                holiday: fields.number(columns.holiday, HOLIDAY_COLUMNS[0])?,
                temp: fields.float(columns.temp, TEMP_COLUMNS[0])?,
                atemp: fields.float(columns.atemp, ATEMP_COLUMNS[0])?,
                humidity: fields.float(columns.humidity, HUMIDITY_COLUMNS[0])?,
                windspeed: fields.float(columns.windspeed, WINDSPEED_COLUMNS[0])?,
                casual: fields.number(columns.casual, CASUAL_COLUMNS[0])?,
                registered: fields.number(columns.registered, REGISTERED_COLUMNS[0])?,
                cnt: fields.number(columns.cnt, CNT_COLUMNS[0])?,
            };

            if !seen.insert(date) {
                return Err(ProcessingError::DuplicateKey {
                    dataset: DAILY_DATASET.to_string(),
                    key: date.to_string(),
                });
            }

            if self.strict_validation {
                record.validate().inspect_err(|e| {
                    debug!(line = fields.line(), error = %e, "Daily row failed validation");
                })?;
            }

            records.push(record);
        }

        info!(dataset = DAILY_DATASET, rows = records.len(), "Loaded records");
        Ok(records)
    }

    /// Load the hourly dataset. Each `(date, hour)` pair must be unique.
    pub fn load_hourly<R: Read>(&self, input: R) -> Result<Vec<HourlyRecord>> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
        let headers = reader.headers()?.clone();
        let columns = FeatureColumns::resolve(&headers, HOURLY_DATASET)?;
        let hour_column = resolve_column(&headers, HOUR_COLUMNS, HOURLY_DATASET)?;

        let mut records = Vec::new();
        let mut seen: HashSet<(NaiveDate, u8)> = HashSet::new();
        let mut row = StringRecord::new();

        while reader.read_record(&mut row)? {
            let fields = RowFields::new(&row, HOURLY_DATASET);
            let date = fields.date(columns.date, DATE_COLUMNS[0], &self.date_formats)?;
            let hour = fields.hour(hour_column)?;

            let record = HourlyRecord {
                date,
                hour,
                season: fields.number(columns.season, SEASON_COLUMNS[0])?,
                workingday: fields.number(columns.workingday, WORKINGDAY_COLUMNS[0])?,
                holiday: fields.number(columns.holiday, HOLIDAY_COLUMNS[0])?,
                temp: fields.float(columns.temp, TEMP_COLUMNS[0])?,
                atemp: fields.float(columns.atemp, ATEMP_COLUMNS[0])?,
                humidity: fields.float(columns.humidity, HUMIDITY_COLUMNS[0])?,
                windspeed: fields.float(columns.windspeed, WINDSPEED_COLUMNS[0])?,
                casual: fields.number(columns.casual, CASUAL_COLUMNS[0])?,
                registered: fields.number(columns.registered, REGISTERED_COLUMNS[0])?,
                cnt: fields.number(columns.cnt, CNT_COLUMNS[0])?,
            };

            if !seen.insert((date, hour)) {
                return Err(ProcessingError::DuplicateKey {
                    dataset: HOURLY_DATASET.to_string(),
                    key: format!("{} hour {}", date, hour),
                });
            }

            if self.strict_validation {
                record.validate().inspect_err(|e| {
                    debug!(line = fields.line(), error = %e, "Hourly row failed validation");
                })?;
            }

            records.push(record);
        }

        info!(dataset = HOURLY_DATASET, rows = records.len(), "Loaded records");
        Ok(records)
    }
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions of the columns shared by both datasets.
struct FeatureColumns {
    date: usize,
    season: usize,
    workingday: usize,
    holiday: usize,
    temp: usize,
    atemp: usize,
    humidity: usize,
    windspeed: usize,
    casual: usize,
    registered: usize,
    cnt: usize,
}

impl FeatureColumns {
    fn resolve(headers: &StringRecord, dataset: &str) -> Result<Self> {
        Ok(Self {
            date: resolve_column(headers, DATE_COLUMNS, dataset)?,
            season: resolve_column(headers, SEASON_COLUMNS, dataset)?,
            workingday: resolve_column(headers, WORKINGDAY_COLUMNS, dataset)?,
            holiday: resolve_column(headers, HOLIDAY_COLUMNS, dataset)?,
            temp: resolve_column(headers, TEMP_COLUMNS, dataset)?,
            atemp: resolve_column(headers, ATEMP_COLUMNS, dataset)?,
            humidity: resolve_column(headers, HUMIDITY_COLUMNS, dataset)?,
            windspeed: resolve_column(headers, WINDSPEED_COLUMNS, dataset)?,
            casual: resolve_column(headers, CASUAL_COLUMNS, dataset)?,
            registered: resolve_column(headers, REGISTERED_COLUMNS, dataset)?,
            cnt: resolve_column(headers, CNT_COLUMNS, dataset)?,
        })
    }
}

/// Find the first header matching any alias (case-insensitive).
fn resolve_column(headers: &StringRecord, aliases: &[&str], dataset: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| {
            let header = header.trim_start_matches('\u{feff}').trim();
            aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
        })
        .ok_or_else(|| ProcessingError::Schema {
            dataset: dataset.to_string(),
            column: aliases[0].to_string(),
        })
}

/// Typed access to the fields of one data row.
struct RowFields<'a> {
    row: &'a StringRecord,
    dataset: &'static str,
}

impl<'a> RowFields<'a> {
    fn new(row: &'a StringRecord, dataset: &'static str) -> Self {
        Self { row, dataset }
    }

    fn line(&self) -> u64 {
        self.row.position().map(|p| p.line()).unwrap_or(0)
    }

    fn raw(&self, index: usize) -> &'a str {
        self.row.get(index).unwrap_or("")
    }

    fn error(&self, column: &str, value: &str, reason: &str) -> ProcessingError {
        ProcessingError::Parse {
            dataset: self.dataset.to_string(),
            line: self.line(),
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn date(&self, index: usize, column: &str, formats: &[String]) -> Result<NaiveDate> {
        let value = self.raw(index);
        parse_calendar_date(value, formats)
            .ok_or_else(|| self.error(column, value, "unrecognised calendar date"))
    }

    fn number<T: FromStr>(&self, index: usize, column: &str) -> Result<T> {
        let value = self.raw(index);
        value
            .parse::<T>()
            .map_err(|_| self.error(column, value, "expected a non-negative integer"))
    }

    fn float(&self, index: usize, column: &str) -> Result<f64> {
        let value = self.raw(index);
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.error(column, value, "expected a finite number")),
        }
    }

    fn hour(&self, index: usize) -> Result<u8> {
        let hour: u8 = self.number(index, HOUR_COLUMNS[0])?;
        if hour >= HOURS_PER_DAY {
            return Err(self.error(HOUR_COLUMNS[0], self.raw(index), "hour must be within 0-23"));
        }
        Ok(hour)
    }
}
