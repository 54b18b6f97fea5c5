//! Reads scraped business-contact JSON files from a directory.

use crate::config::Config;
use crate::constants::INPUT_FILE_PATTERN;
use crate::error::{DedupError, Result};
use crate::types::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

static FILE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"business_data_(\d+)").expect("file number pattern is valid"));

/// Records read from the input directory plus the counters reported at the end of a run
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub total_input_records: usize,
}

/// Loads every `*.json` file in `config.input_dir`, in file name order.
///
/// A missing directory yields zero records. A file that fails to parse aborts
/// the load unless `config.skip_malformed` is set.
#[instrument(skip(config), fields(input_dir = %config.input_dir.display()))]
pub fn load_records(config: &Config) -> Result<LoadedRecords> {
    let mut loaded = LoadedRecords::default();

    if !config.input_dir.is_dir() {
        warn!("Input directory does not exist; continuing with no records");
        return Ok(loaded);
    }

    for path in discover_input_files(config)? {
        match read_file(&path) {
            Ok(records) => {
                debug!(file = %path.display(), records = records.len(), "Loaded file");
                loaded.total_input_records += records.len();
                loaded.records.extend(records);
                loaded.files_processed += 1;
            }
            Err(e) if config.skip_malformed && e.is_malformed_input() => {
                warn!("Skipping malformed input: {}", e);
                loaded.files_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Processed {} files with a total of {} records",
        loaded.files_processed, loaded.total_input_records
    );
    Ok(loaded)
}

/// Lists the input files to load, applying the file-number range filter.
pub fn discover_input_files(config: &Config) -> Result<Vec<PathBuf>> {
    let dir = config.input_dir.to_str().ok_or_else(|| {
        DedupError::Config(format!("input path '{}' is not valid UTF-8", config.input_dir.display()))
    })?;
    // Escape the directory so only the file name part acts as a pattern
    let pattern = Path::new(&glob::Pattern::escape(dir)).join(INPUT_FILE_PATTERN);
    let pattern = pattern.to_string_lossy();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(DedupError::io(path, e.into_error()));
            }
        };
        if !path.is_file() {
            continue;
        }
        if config.has_index_range() && !in_index_range(&path, config.start_index, config.end_index) {
            debug!(file = %path.display(), "Outside file number range");
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// The `<N>` in a `business_data_<N>` file name.
pub fn file_number(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    FILE_NUMBER_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn in_index_range(path: &Path, start: Option<u64>, end: Option<u64>) -> bool {
    match file_number(path) {
        Some(n) => start.map_or(true, |s| n >= s) && end.map_or(true, |e| n <= e),
        None => false,
    }
}

/// Parses one input file into records. The root must be an object or an
/// array of objects.
pub fn read_file(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| DedupError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| DedupError::json(path, e))?;
    records_from_value(path, value)
}

fn records_from_value(path: &Path, value: Value) -> Result<Vec<Record>> {
    match value {
        Value::Object(fields) => Ok(vec![Record::from(fields)]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(fields) => Ok(Record::from(fields)),
                other => Err(DedupError::InvalidRecord {
                    path: path.to_path_buf(),
                    message: format!("element {} is {}, expected an object", i, json_kind(&other)),
                }),
            })
            .collect(),
        other => Err(DedupError::InvalidRecord {
            path: path.to_path_buf(),
            message: format!("root value is {}, expected an object or an array", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, value: &Value) {
        fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
    }

    fn config_for(dir: &Path) -> Config {
        Config {
            input_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_array_and_object_files_are_counted() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", &json!([{"n": 1}, {"n": 2}, {"n": 3}]));
        write(dir.path(), "b.json", &json!({"n": 4}));
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loaded = load_records(&config_for(dir.path())).unwrap();
        assert_eq!(loaded.files_processed, 2);
        assert_eq!(loaded.total_input_records, 4);
        assert_eq!(loaded.records.len(), 4);
        assert_eq!(loaded.records[3].get("n"), Some(&json!(4)));
    }

    #[test]
    fn test_missing_directory_yields_no_records() {
        let dir = tempdir().unwrap();
        let loaded = load_records(&config_for(&dir.path().join("nope"))).unwrap();
        assert_eq!(loaded.files_processed, 0);
        assert!(loaded.records.is_empty());
    }

    #[test]
    fn test_malformed_file_fails_fast_by_default() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", &json!({"n": 1}));
        fs::write(dir.path().join("b.json"), "{not json").unwrap();

        let err = load_records(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, DedupError::Json { .. }));
    }

    #[test]
    fn test_malformed_file_skipped_when_configured() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", &json!({"n": 1}));
        fs::write(dir.path().join("b.json"), "{not json").unwrap();

        let config = Config {
            skip_malformed: true,
            ..config_for(dir.path())
        };
        let loaded = load_records(&config).unwrap();
        assert_eq!(loaded.files_processed, 1);
        assert_eq!(loaded.files_skipped, 1);
        assert_eq!(loaded.total_input_records, 1);
    }

    #[test]
    fn test_non_object_elements_are_rejected() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", &json!([{"n": 1}, "oops"]));

        let err = load_records(&config_for(dir.path())).unwrap_err();
        match err {
            DedupError::InvalidRecord { message, .. } => assert!(message.contains("element 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", &json!(42));
        assert!(load_records(&config_for(dir.path())).is_err());
    }

    #[test]
    fn test_index_range_filter() {
        let dir = tempdir().unwrap();
        for n in 1..=4 {
            write(dir.path(), &format!("business_data_{n}.json"), &json!({"n": n}));
        }
        write(dir.path(), "other.json", &json!({"n": 0}));

        let config = Config {
            start_index: Some(2),
            end_index: Some(3),
            ..config_for(dir.path())
        };
        let files = discover_input_files(&config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["business_data_2.json", "business_data_3.json"]);
    }

    #[test]
    fn test_open_ended_range() {
        let dir = tempdir().unwrap();
        for n in [5, 50, 500] {
            write(dir.path(), &format!("business_data_{n}.json"), &json!({"n": n}));
        }
        let config = Config {
            start_index: Some(50),
            ..config_for(dir.path())
        };
        assert_eq!(discover_input_files(&config).unwrap().len(), 2);
    }

    #[test]
    fn test_file_number() {
        assert_eq!(file_number(Path::new("/x/business_data_32003.json")), Some(32003));
        assert_eq!(file_number(Path::new("business_data_.json")), None);
        assert_eq!(file_number(Path::new("records.json")), None);
    }
}
