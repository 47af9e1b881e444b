//! User preferences stored as a JSON file: window geometry plus the
//! locations of the two data files.
//!
//! Same read contract as the XML storage: a missing file is an empty
//! result, unreadable content is a data conversion failure.

use crate::errors::{DataError, StorageError};
use crate::storage::write_atomic;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuiSettings {
    pub window_width: f64,
    pub window_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_coordinates: Option<(i32, i32)>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        GuiSettings {
            window_width: 740.0,
            window_height: 600.0,
            window_coordinates: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPrefs {
    pub gui_settings: GuiSettings,
    pub address_book_file_path: PathBuf,
    pub expenditure_tracker_file_path: PathBuf,
}

impl Default for UserPrefs {
    fn default() -> Self {
        UserPrefs {
            gui_settings: GuiSettings::default(),
            address_book_file_path: PathBuf::from("data/addressbook.xml"),
            expenditure_tracker_file_path: PathBuf::from("data/expendituretracker.xml"),
        }
    }
}

/// Reads user preferences from `path`. Missing file → `Ok(None)`.
pub fn read_user_prefs(path: &Path) -> Result<Option<UserPrefs>, StorageError> {
    if !path.exists() {
        info!("Prefs file {} not found", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(e, format!("Failed to read {}", path.display())))?;

    let prefs: UserPrefs = serde_json::from_str(&content).map_err(|e| {
        info!("Data in {} could not be converted: {}", path.display(), e);
        StorageError::DataConversion(DataError::Malformed(format!("user prefs JSON: {e}")))
    })?;
    Ok(Some(prefs))
}

/// Saves user preferences to `path` as pretty-printed JSON.
pub fn save_user_prefs(prefs: &UserPrefs, path: &Path) -> Result<(), StorageError> {
    let mut json = serde_json::to_string_pretty(prefs)
        .map_err(|e| StorageError::Serialization(format!("Failed to serialize prefs: {e}")))?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}
