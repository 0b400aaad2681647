use crate::error::Result;
use crate::readers::{ConcurrentReader, RecordLoader};
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime settings, layered as defaults < config file < `BIKESHARE_*` env.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub day_path: PathBuf,
    pub hour_path: PathBuf,
    pub date_formats: Vec<String>,
    pub strict_validation: bool,
    pub use_mmap: bool,
    pub log_level: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            day_path: PathBuf::from(DEFAULT_DAY_PATH),
            hour_path: PathBuf::from(DEFAULT_HOUR_PATH),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            strict_validation: false,
            use_mmap: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PipelineSettings {
    /// Load settings. An explicit `path` must exist; otherwise an optional
    /// `bikeshare.{toml,yaml,json}` in the working directory is used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("day_path", DEFAULT_DAY_PATH)?
            .set_default("hour_path", DEFAULT_HOUR_PATH)?
            .set_default("date_formats", DEFAULT_DATE_FORMATS.to_vec())?
            .set_default("strict_validation", false)?
            .set_default("use_mmap", false)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("date_formats"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn record_loader(&self) -> RecordLoader {
        RecordLoader::new()
            .with_date_formats(self.date_formats.clone())
            .with_strict_validation(self.strict_validation)
    }

    pub fn concurrent_reader(&self) -> ConcurrentReader {
        ConcurrentReader::new(self.record_loader()).with_mmap(self.use_mmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.day_path, PathBuf::from("data/day.csv"));
        assert_eq!(settings.hour_path, PathBuf::from("data/hour.csv"));
        assert_eq!(settings.date_formats.len(), DEFAULT_DATE_FORMATS.len());
        assert!(!settings.strict_validation);
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "day_path = \"input/daily.csv\"")?;
        writeln!(file, "date_formats = [\"%d.%m.%Y\"]")?;
        writeln!(file, "strict_validation = true")?;

        let settings = PipelineSettings::load(Some(file.path()))?;

        assert_eq!(settings.day_path, PathBuf::from("input/daily.csv"));
        assert_eq!(settings.hour_path, PathBuf::from("data/hour.csv"));
        assert_eq!(settings.date_formats, vec!["%d.%m.%Y".to_string()]);
        assert!(settings.strict_validation);
        assert!(!settings.use_mmap);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = PipelineSettings::load(Some(Path::new("/nonexistent/bikeshare.toml")));
        assert!(result.is_err());
    }
}
