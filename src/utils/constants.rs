/// Dataset labels used in errors and log output
pub const DAILY_DATASET: &str = "daily";
pub const HOURLY_DATASET: &str = "hourly";

/// Column names, with the aliases accepted for each
pub const DATE_COLUMNS: &[&str] = &["dteday", "date"];
pub const HOUR_COLUMNS: &[&str] = &["hr", "hour"];
pub const SEASON_COLUMNS: &[&str] = &["season"];
pub const WORKINGDAY_COLUMNS: &[&str] = &["workingday"];
pub const HOLIDAY_COLUMNS: &[&str] = &["holiday"];
pub const TEMP_COLUMNS: &[&str] = &["temp"];
pub const ATEMP_COLUMNS: &[&str] = &["atemp"];
pub const HUMIDITY_COLUMNS: &[&str] = &["hum", "humidity"];
pub const WINDSPEED_COLUMNS: &[&str] = &["windspeed"];
pub const CASUAL_COLUMNS: &[&str] = &["casual"];
pub const REGISTERED_COLUMNS: &[&str] = &["registered"];
pub const CNT_COLUMNS: &[&str] = &["cnt", "count"];

/// Default input locations
pub const DEFAULT_DAY_PATH: &str = "data/day.csv";
pub const DEFAULT_HOUR_PATH: &str = "data/hour.csv";

/// Date formats tried in order when no configuration overrides them
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%Y%m%d",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Configuration sources
pub const CONFIG_FILE: &str = "bikeshare";
pub const ENV_PREFIX: &str = "BIKESHARE";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Normalized feature bounds
pub const MIN_NORMALIZED: f64 = 0.0;
pub const MAX_NORMALIZED: f64 = 1.0;

/// Hours in a day
pub const HOURS_PER_DAY: u8 = 24;

/// Number of unmatched dates included in join mismatch log events
pub const JOIN_SAMPLE_SIZE: usize = 5;
