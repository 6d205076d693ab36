//! Serialization of snapshot documents with atomic replacement.

use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const LOG_TARGET: &str = "     store";

/// Load a document from a file.
pub fn load<T>(path: impl AsRef<Path>, context: impl AsRef<str>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let ctx = context.as_ref();

    let file = File::open(path).into_app_err_with(|| format!("unable to open {ctx} file '{}'", path.display()))?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader).into_app_err_with(|| format!("unable to parse {ctx} file '{}'", path.display()))?;

    log::debug!(target: LOG_TARGET, "Loaded {ctx} from '{}'", path.display());

    Ok(data)
}

/// Save a document to a file, replacing any previous version atomically.
///
/// The document is written to a sibling temporary file and renamed into place,
/// so a concurrent reader observes either the old snapshot or the new one,
/// never a partial write.
pub fn save_atomic<T>(data: &T, path: impl AsRef<Path>) -> Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).into_app_err("invalid snapshot file name")?;
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    let file = File::create(&tmp_path).into_app_err_with(|| format!("unable to create file '{}'", tmp_path.display()))?;
    let mut writer = BufWriter::new(file);

    // Snapshots are consumer-facing, so always write them human-readable.
    serde_json::to_writer_pretty(&mut writer, data).into_app_err_with(|| format!("unable to write file '{}'", tmp_path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush file '{}'", tmp_path.display()))?;

    fs::rename(&tmp_path, path).into_app_err_with(|| format!("unable to move snapshot into place at '{}'", path.display()))?;

    log::debug!(target: LOG_TARGET, "Wrote '{}'", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::env;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: u64,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = env::temp_dir();
        let file_path = temp_dir.join("agi_meter_store_test.json");

        let original = TestData {
            name: "test".to_string(),
            value: 42,
        };

        save_atomic(&original, &file_path).unwrap();
        assert!(file_path.exists());

        // The temporary file must not survive the rename.
        assert!(!file_path.with_file_name("agi_meter_store_test.json.tmp").exists());

        let loaded: TestData = load(&file_path, "test data").unwrap();
        assert_eq!(original, loaded);

        let _ = fs::remove_file(&file_path);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result: Result<TestData> = load("/nonexistent/path/file.json", "test data");
        assert!(result.unwrap_err().to_string().contains("unable to open"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = env::temp_dir();
        let file_path = temp_dir.join("agi_meter_store_invalid.json");

        fs::write(&file_path, "not valid json").unwrap();

        let result: Result<TestData> = load(&file_path, "test data");
        assert!(result.unwrap_err().to_string().contains("unable to parse"));

        let _ = fs::remove_file(&file_path);
    }
}
