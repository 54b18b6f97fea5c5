use crate::constants::*;
use crate::error::{DedupError, Result};
use serde::Deserialize;
use std::env::{self, VarError};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a pipeline run needs to know about where to read and write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_with_email: PathBuf,
    pub output_without_email: PathBuf,
    pub output_all_unique: PathBuf,
    /// Where to write the run summary, if anywhere
    pub summary_file: Option<PathBuf>,
    /// Lowest `business_data_<N>` file number to load
    pub start_index: Option<u64>,
    /// Highest `business_data_<N>` file number to load
    pub end_index: Option<u64>,
    pub sort_by_postcode: bool,
    /// Log and skip unreadable input files instead of aborting the run
    pub skip_malformed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_with_email: PathBuf::from(DEFAULT_OUTPUT_WITH_EMAIL),
            output_without_email: PathBuf::from(DEFAULT_OUTPUT_WITHOUT_EMAIL),
            output_all_unique: PathBuf::from(DEFAULT_OUTPUT_ALL_UNIQUE),
            summary_file: None,
            start_index: None,
            end_index: None,
            sort_by_postcode: false,
            skip_malformed: false,
        }
    }
}

impl Config {
    /// Load a config from a TOML file; fields the file omits keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DedupError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `DEDUP_*` environment overrides on top of this config.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(v) = env_var(ENV_INPUT_DIR)? {
            self.input_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var(ENV_OUTPUT_WITH_EMAIL)? {
            self.output_with_email = PathBuf::from(v);
        }
        if let Some(v) = env_var(ENV_OUTPUT_WITHOUT_EMAIL)? {
            self.output_without_email = PathBuf::from(v);
        }
        if let Some(v) = env_var(ENV_OUTPUT_ALL_UNIQUE)? {
            self.output_all_unique = PathBuf::from(v);
        }
        if let Some(v) = env_var(ENV_SUMMARY_FILE)? {
            self.summary_file = Some(PathBuf::from(v));
        }
        if let Some(v) = env_var(ENV_START_INDEX)? {
            self.start_index = Some(parse_index(ENV_START_INDEX, &v)?);
        }
        if let Some(v) = env_var(ENV_END_INDEX)? {
            self.end_index = Some(parse_index(ENV_END_INDEX, &v)?);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_index, self.end_index) {
            if start > end {
                return Err(DedupError::Config(format!(
                    "start index {} is greater than end index {}",
                    start, end
                )));
            }
        }

        let outputs = [
            &self.output_with_email,
            &self.output_without_email,
            &self.output_all_unique,
        ];
        for (i, a) in outputs.iter().enumerate() {
            if outputs[i + 1..].contains(a) {
                return Err(DedupError::Config(format!(
                    "output path '{}' is used for more than one output",
                    a.display()
                )));
            }
        }
        Ok(())
    }

    /// Whether the file-number range filter is active.
    pub fn has_index_range(&self) -> bool {
        self.start_index.is_some() || self.end_index.is_some()
    }
}

fn env_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(Some(v)),
        Ok(_) | Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_index(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| DedupError::Config(format!("{} must be a non-negative integer, got '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_paths() {
        let config = Config::default();
        assert_eq!(config.output_with_email, PathBuf::from("records_with_email.json"));
        assert_eq!(config.output_without_email, PathBuf::from("records_without_email.json"));
        assert_eq!(config.output_all_unique, PathBuf::from("all_unique_records.json"));
        assert!(!config.skip_malformed);
        assert!(!config.has_index_range());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input_dir = \"scraped\"\nstart_index = 10\nsort_by_postcode = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("scraped"));
        assert_eq!(config.start_index, Some(10));
        assert!(config.sort_by_postcode);
        assert_eq!(config.output_all_unique, PathBuf::from(DEFAULT_OUTPUT_ALL_UNIQUE));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, DedupError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = Config {
            start_index: Some(20),
            end_index: Some(10),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shared_output_path() {
        let config = Config {
            output_without_email: PathBuf::from(DEFAULT_OUTPUT_WITH_EMAIL),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("X", " 42 ").unwrap(), 42);
        assert!(parse_index("X", "-1").is_err());
        assert!(parse_index("X", "abc").is_err());
    }
}
