use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::LazyLock,
};

use regex::Regex;
use serde_json::Value;

use super::FileBatchSummary;
use crate::{
    core::PoemkitError,
    persistence::{
        read_json_file,
        write_json_file,
    },
};

pub const FULL_STOP: char = '。';

// Includes the full stop itself, so "月。。" keeps both and a second pass changes nothing.
static EXCLUDED_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[。.,，;；:：!！?？、"“”'‘’「」『』【】()（）《》…]"#).expect("valid punctuation class")
});

/// Drops one trailing `。` when nothing before it is punctuation.
/// Returns `None` when the content should stay as it is.
pub fn trim_trailing_stop(content: &str) -> Option<String> {
    let body = content.strip_suffix(FULL_STOP)?;
    if EXCLUDED_PUNCTUATION.is_match(body) {
        return None;
    }

    Some(body.to_string())
}

/// Applies [`trim_trailing_stop`] to every `sentence[].content` of every
/// poem in a per-language JSON array. Returns the number of sentences changed.
pub fn trim_stops_in_value(poems: &mut Value) -> Result<usize, PoemkitError> {
    let records = poems
        .as_array_mut()
        .ok_or_else(|| PoemkitError::Custom("expected a JSON array of poems".to_string()))?;

    let mut changed = 0;
    for record in records {
        let Some(sentences) = record.get_mut("sentence").and_then(Value::as_array_mut) else {
            continue;
        };

        for sentence in sentences {
            let Some(content) = sentence.get_mut("content") else {
                continue;
            };
            if let Some(trimmed) = content.as_str().and_then(trim_trailing_stop) {
                *content = Value::String(trimmed);
                changed += 1;
            }
        }
    }

    Ok(changed)
}

/// Rewrites the file only when a sentence changed.
pub fn trim_stops_file(path: &Path) -> Result<usize, PoemkitError> {
    let mut poems: Value = read_json_file(path)?;
    let changed = trim_stops_in_value(&mut poems)?;
    if changed > 0 {
        write_json_file(path, &poems)?;
    }
    Ok(changed)
}

pub fn trim_stops_files(paths: &[PathBuf]) -> FileBatchSummary {
    let mut summary = FileBatchSummary::default();
    for path in paths {
        summary.record(path.clone(), trim_stops_file(path));
    }
    summary
}
