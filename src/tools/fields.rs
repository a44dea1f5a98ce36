use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use super::FileBatchSummary;
use crate::{
    core::PoemkitError,
    persistence::{
        read_json_file,
        write_json_file,
    },
};

/// Removes `field` from every record of a top-level JSON array.
/// Returns how many records had it.
pub fn strip_field_in_value(records: &mut Value, field: &str) -> Result<usize, PoemkitError> {
    let records = records
        .as_array_mut()
        .ok_or_else(|| PoemkitError::Custom("expected a JSON array of records".to_string()))?;

    Ok(records
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .map(|record| record.shift_remove(field).is_some())
        .filter(|removed| *removed)
        .count())
}

pub fn strip_field_file(path: &Path, field: &str) -> Result<usize, PoemkitError> {
    let mut records: Value = read_json_file(path)?;
    let removed = strip_field_in_value(&mut records, field)?;
    if removed > 0 {
        write_json_file(path, &records)?;
    }
    Ok(removed)
}

pub fn strip_field_files(paths: &[PathBuf], field: &str) -> FileBatchSummary {
    let mut summary = FileBatchSummary::default();
    for path in paths {
        summary.record(path.clone(), strip_field_file(path, field));
    }
    summary
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_strips_field_and_keeps_key_order() {
        let mut records = json!([
            {"id": "p1", "title": "静夜思", "tag": ["唐诗"], "author": "李白", "sentence": []},
            {"id": "p2", "title": "春晓", "author": "孟浩然", "sentence": []},
        ]);

        assert_eq!(strip_field_in_value(&mut records, "tag").unwrap(), 1);

        let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "title", "author", "sentence"]);
        assert_eq!(strip_field_in_value(&mut records, "tag").unwrap(), 0);
    }

    #[test]
    fn test_file_without_field_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poem_german.json");
        let raw = r#"[{"id":"p1","sentence":[]}]"#;
        std::fs::write(&path, raw).unwrap();

        let summary = strip_field_files(&[path.clone()], "tag");
        assert_eq!(summary.changes, 0);
        assert_eq!(summary.unchanged_files, vec![path.clone()]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
    }

    #[test]
    fn test_non_array_file_fails_without_aborting_batch() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        let good = dir.path().join("good.json");
        std::fs::write(&bad, r#"{"id":"p1"}"#).unwrap();
        std::fs::write(&good, r#"[{"id":"p1","tag":["x"]}]"#).unwrap();

        let summary = strip_field_files(&[bad.clone(), good.clone()], "tag");
        assert_eq!(summary.failed_files.len(), 1);
        assert_eq!(summary.changed_files, vec![good.clone()]);

        let written: Value = read_json_file(&good).unwrap();
        assert_eq!(written, json!([{"id": "p1"}]));
    }
}
