use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::PoemkitError;
use crate::persistence::{
    load_json_or_default,
    read_json_file,
    save_json,
};

pub const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_LANGUAGES: &[&str] =
    &["chinese", "english", "french", "german", "japanese", "spanish"];

pub const DEFAULT_TRIM_STOP_LANGUAGES: &[&str] = &["chinese", "japanese"];

pub const DEFAULT_CANONICAL_PRIORITY: &[&str] =
    &["chinese", "english", "french", "german", "japanese", "spanish"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Longest side an image may have before it is placed on the canvas.
    pub max_dimension: u32,
    pub canvas_size: u32,
    pub background: [u8; 3],
    /// WebP quality, 0-100.
    pub quality: f32,
    /// Output directory, created next to the source directory.
    pub output_dir_name: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_dimension: 512,
            canvas_size: 512,
            background: [255, 255, 255],
            quality: 90.0,
            output_dir_name: "poem_images".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub data_dir: PathBuf,
    pub basename: String,
    pub languages: Vec<String>,
    pub canonical_priority: Vec<String>,
    pub combined_source: PathBuf,
    pub combined_output: PathBuf,
    pub strip_field: String,
    pub trim_stop_languages: Vec<String>,
    pub ui_font: Option<PathBuf>,
    pub images: ImageSettings,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("resource").join("data");
        Self {
            combined_source: data_dir.join("poem_alllang.json"),
            combined_output: data_dir.join("poem_alllang_merged.json"),
            data_dir,
            basename: "poem".to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            canonical_priority: DEFAULT_CANONICAL_PRIORITY.iter().map(|s| s.to_string()).collect(),
            strip_field: "tag".to_string(),
            trim_stop_languages: DEFAULT_TRIM_STOP_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            ui_font: None,
            images: ImageSettings::default(),
        }
    }
}

impl ToolConfig {
    /// Loads an explicit config file, or the user's settings file when none
    /// is given. A missing or broken settings file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, PoemkitError> {
        match path {
            Some(path) => {
                let config = read_json_file(path)?;
                tracing::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(load_json_or_default::<ToolConfig>(SETTINGS_FILE)),
        }
    }

    pub fn save(&self) -> Result<(), PoemkitError> {
        save_json(self, SETTINGS_FILE)
    }

    /// `<data_dir>/<basename>_<language>.json`
    pub fn language_file(&self, language: &str) -> PathBuf {
        language_file_path(&self.data_dir, &self.basename, language)
    }

    pub fn language_files(&self) -> Vec<(String, PathBuf)> {
        self.languages.iter().map(|lang| (lang.clone(), self.language_file(lang))).collect()
    }
}

pub fn language_file_path(dir: &Path, basename: &str, language: &str) -> PathBuf {
    dir.join(format!("{}_{}.json", basename, language))
}
