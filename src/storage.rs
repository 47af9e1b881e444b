//! Access to the record collections stored as XML files on the hard disk.
//!
//! Reads return `Ok(None)` when the file does not exist yet; content that
//! cannot be turned into a valid domain object surfaces as a
//! [`StorageError::DataConversion`]. Saves create missing parent directories
//! and replace the target file atomically, so a failed save never leaves a
//! truncated data file behind.

use crate::errors::StorageError;
use crate::formats::{address, expenditure};
use crate::models_address::AddressBook;
use crate::models_expenditure::ExpenditureTracker;
use log::info;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// The persistence adapter for both record collections.
#[derive(Debug, Clone)]
pub struct XmlStorage {
    address_book_path: PathBuf,
    expenditure_tracker_path: PathBuf,
}

impl XmlStorage {
    pub fn new(
        address_book_path: impl Into<PathBuf>,
        expenditure_tracker_path: impl Into<PathBuf>,
    ) -> Self {
        XmlStorage {
            address_book_path: address_book_path.into(),
            expenditure_tracker_path: expenditure_tracker_path.into(),
        }
    }

    pub fn address_book_path(&self) -> &Path {
        &self.address_book_path
    }

    pub fn expenditure_tracker_path(&self) -> &Path {
        &self.expenditure_tracker_path
    }

    pub fn read_address_book(&self) -> Result<Option<AddressBook>, StorageError> {
        self.read_address_book_from(&self.address_book_path)
    }

    /// Reads the address book at `path`. A missing file is an empty result,
    /// not an error.
    pub fn read_address_book_from(&self, path: &Path) -> Result<Option<AddressBook>, StorageError> {
        let Some(content) = read_file(path)? else {
            info!("Address book file {} not found", path.display());
            return Ok(None);
        };

        let book = address::xml::parse_str(&content)
            .and_then(|document| document.to_model())
            .map_err(|e| {
                info!("Data in {} could not be converted: {}", path.display(), e);
                StorageError::DataConversion(e)
            })?;
        Ok(Some(book))
    }

    pub fn read_expenditure_tracker(&self) -> Result<Option<ExpenditureTracker>, StorageError> {
        self.read_expenditure_tracker_from(&self.expenditure_tracker_path)
    }

    /// Reads the expenditure tracker at `path`. Same contract as the
    /// address book read.
    pub fn read_expenditure_tracker_from(
        &self,
        path: &Path,
    ) -> Result<Option<ExpenditureTracker>, StorageError> {
        let Some(content) = read_file(path)? else {
            info!("Expenditure tracker file {} not found", path.display());
            return Ok(None);
        };

        let tracker = expenditure::xml::parse_str(&content)
            .and_then(|document| document.to_model())
            .map_err(|e| {
                info!("Data in {} could not be converted: {}", path.display(), e);
                StorageError::DataConversion(e)
            })?;
        Ok(Some(tracker))
    }

    pub fn save_address_book(&self, book: &AddressBook) -> Result<(), StorageError> {
        self.save_address_book_to(book, &self.address_book_path)
    }

    pub fn save_address_book_to(
        &self,
        book: &AddressBook,
        path: &Path,
    ) -> Result<(), StorageError> {
        let document = address::AddressBookDocument::from_model(book);
        let mut buffer = Vec::new();
        address::xml::write(&mut buffer, &document)?;
        write_atomic(path, &buffer)
    }

    pub fn save_expenditure_tracker(
        &self,
        tracker: &ExpenditureTracker,
    ) -> Result<(), StorageError> {
        self.save_expenditure_tracker_to(tracker, &self.expenditure_tracker_path)
    }

    pub fn save_expenditure_tracker_to(
        &self,
        tracker: &ExpenditureTracker,
        path: &Path,
    ) -> Result<(), StorageError> {
        let document = expenditure::ExpenditureTrackerDocument::from_model(tracker);
        let mut buffer = Vec::new();
        expenditure::xml::write(&mut buffer, &document)?;
        write_atomic(path, &buffer)
    }

    /// Saves a copy of the address book next to the live file.
    pub fn backup_address_book(&self, book: &AddressBook) -> Result<(), StorageError> {
        self.save_address_book_to(book, &backup_path(&self.address_book_path))
    }

    /// Saves a copy of the expenditure tracker next to the live file.
    pub fn backup_expenditure_tracker(
        &self,
        tracker: &ExpenditureTracker,
    ) -> Result<(), StorageError> {
        self.save_expenditure_tracker_to(tracker, &backup_path(&self.expenditure_tracker_path))
    }
}

/// The sibling path a backup is written to.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}

fn read_file(path: &Path) -> Result<Option<String>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(e, format!("Failed to read {}", path.display())))?;
    Ok(Some(content))
}

/// Writes `bytes` to `path` by way of a uniquely-named temp sibling, creating
/// missing parent directories first. The target is only replaced once the
/// full content is on disk.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(e, format!("Failed to create directory {}", parent.display()))
            })?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| {
            StorageError::InvalidInput(format!("Not a file path: {}", path.display()))
        })?
        .to_string_lossy();
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    fs::write(&temp_path, bytes).map_err(|e| {
        StorageError::Io(e, format!("Failed to write {}", temp_path.display()))
    })?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::Io(
            e,
            format!("Failed to replace {}", path.display()),
        ));
    }
    Ok(())
}
