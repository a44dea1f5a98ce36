use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::PoemkitError;

const APP_NAME: &str = "poemkit";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), PoemkitError> {
    let file_path = get_data_file_path(filename);
    write_json_file(&file_path, data)?;
    tracing::info!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    filename: &str,
) -> Result<T, PoemkitError> {
    let file_path = get_data_file_path(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let data = read_json_file(&file_path)?;
    tracing::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

/// Reads and parses a JSON file, naming the path in the error.
pub fn read_json_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, PoemkitError> {
    let json = fs::read_to_string(path).map_err(|e| PoemkitError::FailedToLoadFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&json).map_err(|e| PoemkitError::FailedToLoadFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Overwrites `path` with pretty-printed JSON. Non-ASCII text is written as-is.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), PoemkitError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
