use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoemkitError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(Box<image::ImageError>),

    #[error("WebP encoding failed: {0}")]
    WebpEncode(String),

    #[error("Failed to read {path}: {message}")]
    FailedToLoadFile { path: PathBuf, message: String },

    #[error("No language file could be loaded from {0}")]
    NoLanguageLoaded(PathBuf),

    #[error("Poem not found: {0}")]
    UnknownPoem(String),

    #[error("Sentence {senid} not found in poem {poem_id}")]
    UnknownSentence { poem_id: String, senid: u32 },

    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    #[error("Failed to start editor: {0}")]
    Gui(String),

    #[error("PoemkitError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for PoemkitError {
    fn from(error: std::io::Error) -> Self {
        PoemkitError::Io(Box::new(error))
    }
}

impl From<image::ImageError> for PoemkitError {
    fn from(error: image::ImageError) -> Self {
        PoemkitError::Image(Box::new(error))
    }
}

impl From<eframe::Error> for PoemkitError {
    fn from(error: eframe::Error) -> Self {
        PoemkitError::Gui(error.to_string())
    }
}
