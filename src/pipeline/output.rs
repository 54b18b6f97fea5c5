use crate::error::{DedupError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Writes `value` as 2-space indented JSON to `path`, replacing any existing
/// file and creating missing parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DedupError::io(parent, e))?;
    }

    let json_content = serde_json::to_string_pretty(value)?;
    fs::write(path, json_content).map_err(|e| DedupError::io(path, e))?;

    debug!(path = %path.display(), "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_write_json_pretty_prints_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        write_json(&path, &json!([{"Business Name": "A"}])).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"Business Name\": \"A\"\n  }\n]");
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.json");
        write_json(&path, &Vec::<u8>::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be overwritten as a file
        let err = write_json(dir.path(), &json!([])).unwrap_err();
        assert!(matches!(err, DedupError::Io { .. }));
    }
}
