pub mod consistency;
pub mod fields;
pub mod images;
pub mod merge;
pub mod punctuation;
pub mod split;

use std::path::PathBuf;

pub use consistency::{
    check_store,
    ConsistencyIssue,
};
pub use fields::strip_field_files;
pub use images::{
    convert_directory,
    ConversionSummary,
};
pub use merge::{
    merge_store,
    merge_to_file,
};
pub use punctuation::{
    trim_stops_files,
    trim_trailing_stop,
};
pub use split::{
    split_file,
    SplitSummary,
};

/// Result of running one in-place transform over several JSON files.
#[derive(Debug, Default)]
pub struct FileBatchSummary {
    pub changed_files: Vec<PathBuf>,
    pub unchanged_files: Vec<PathBuf>,
    pub failed_files: Vec<(PathBuf, String)>,
    /// Records or sentences modified across all files.
    pub changes: usize,
}

impl FileBatchSummary {
    pub(crate) fn record(&mut self, path: PathBuf, result: Result<usize, crate::core::PoemkitError>) {
        match result {
            Ok(0) => {
                tracing::info!("Unchanged: {}", path.display());
                self.unchanged_files.push(path);
            }
            Ok(count) => {
                tracing::info!("Updated {} entries in {}", count, path.display());
                self.changes += count;
                self.changed_files.push(path);
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                self.failed_files.push((path, e.to_string()));
            }
        }
    }
}
