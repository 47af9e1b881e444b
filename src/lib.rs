//! Main library for ledgerbook.
//!
//! This crate contains the storage layer for two record collections kept as
//! XML files on local disk — an address book and an expenditure tracker —
//! plus the operations the CLI exposes over them: check, init, backup and
//! export.

// Make modules public within the crate but not necessarily public API
pub mod errors;
pub mod formats;
pub mod models_address;
pub mod models_expenditure;
pub mod storage;
pub mod user_prefs;
pub mod validation;

use clap::ValueEnum;
use errors::StorageError;
use formats::DataKind;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// What to do with the data file.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Parse the data file and report every problem found
    Check,
    /// Create an empty data file if one does not exist yet
    Init,
    /// Save a copy of the data file next to it
    Backup,
    /// Write the records out as pretty-printed JSON
    Export,
}

/// Top-level configuration for one run.
#[derive(Debug)]
pub struct Config {
    pub file: PathBuf,
    pub operation: Operation,
    pub kind: Option<DataKind>,
    pub output: Option<PathBuf>,
}

/// The main entry point for the tool's logic.
///
/// Resolves the data kind and dispatches to the requested operation.
pub fn run(config: Config) -> Result<(), StorageError> {
    let start_time = Instant::now();
    info!("Starting {:?}", config.operation);
    info!("  File: {}", config.file.display());

    match config.operation {
        Operation::Check => check(&config),
        Operation::Init => init(&config),
        Operation::Backup => backup(&config),
        Operation::Export => export(&config),
    }?;

    info!("Total execution time: {:.2?}", start_time.elapsed());
    Ok(())
}

/// Determine which collection the file holds: an explicit kind wins,
/// otherwise the root element of the file decides.
fn resolve_kind(config: &Config) -> Result<DataKind, StorageError> {
    if let Some(kind) = config.kind {
        return Ok(kind);
    }
    if !config.file.exists() {
        return Err(StorageError::InvalidInput(format!(
            "{} does not exist and no kind was given; pass --kind",
            config.file.display()
        )));
    }
    let content = fs::read(&config.file).map_err(|e| {
        StorageError::Io(e, format!("Failed to read {}", config.file.display()))
    })?;
    let kind = DataKind::from_content(&content)?;
    info!("  Detected kind: {}", kind.name());
    Ok(kind)
}

fn check(config: &Config) -> Result<(), StorageError> {
    if !config.file.exists() {
        info!("{} not found, nothing to check", config.file.display());
        println!("{} not found, nothing to check", config.file.display());
        return Ok(());
    }

    let kind = resolve_kind(config)?;
    let content = fs::read_to_string(&config.file).map_err(|e| {
        StorageError::Io(e, format!("Failed to read {}", config.file.display()))
    })?;

    let report = match kind {
        DataKind::AddressBook => {
            let document = formats::address::xml::parse_str(&content)?;
            validation::validate_address_book(&document)
        }
        DataKind::ExpenditureTracker => {
            let document = formats::expenditure::xml::parse_str(&content)?;
            validation::validate_expenditure_tracker(&document)
        }
    };

    let subject = format!("{} {}", kind.name(), config.file.display());
    validation::print_report(&report, &subject);

    if report.is_ok() {
        Ok(())
    } else {
        Err(StorageError::Validation(format!(
            "{} error(s) found in {}",
            report.error_count(),
            config.file.display()
        )))
    }
}

fn init(config: &Config) -> Result<(), StorageError> {
    let kind = config.kind.ok_or_else(|| {
        StorageError::InvalidInput("--kind is required for init".to_string())
    })?;

    if config.file.exists() {
        info!("{} already exists, leaving it untouched", config.file.display());
        println!("{} already exists, left untouched", config.file.display());
        return Ok(());
    }

    let store = storage::XmlStorage::new(&config.file, &config.file);
    match kind {
        DataKind::AddressBook => store.save_address_book(&models_address::AddressBook::new())?,
        DataKind::ExpenditureTracker => {
            store.save_expenditure_tracker(&models_expenditure::ExpenditureTracker::new())?
        }
    }
    println!("Created empty {} at {}", kind.name(), config.file.display());
    Ok(())
}

fn backup(config: &Config) -> Result<(), StorageError> {
    if !config.file.exists() {
        return Err(StorageError::InvalidInput(format!(
            "Cannot back up {}: file does not exist",
            config.file.display()
        )));
    }

    let kind = resolve_kind(config)?;
    let store = storage::XmlStorage::new(&config.file, &config.file);
    let records = match kind {
        DataKind::AddressBook => {
            let book = read_present(store.read_address_book()?, config)?;
            store.backup_address_book(&book)?;
            book.len()
        }
        DataKind::ExpenditureTracker => {
            let tracker = read_present(store.read_expenditure_tracker()?, config)?;
            store.backup_expenditure_tracker(&tracker)?;
            tracker.len()
        }
    };
    println!(
        "Backed up {} record(s) to {}",
        records,
        storage::backup_path(&config.file).display()
    );
    Ok(())
}

fn export(config: &Config) -> Result<(), StorageError> {
    if !config.file.exists() {
        return Err(StorageError::InvalidInput(format!(
            "Cannot export {}: file does not exist",
            config.file.display()
        )));
    }

    let kind = resolve_kind(config)?;
    let store = storage::XmlStorage::new(&config.file, &config.file);
    let (json, records) = match kind {
        DataKind::AddressBook => {
            let book = read_present(store.read_address_book()?, config)?;
            let document = formats::address::AddressBookDocument::from_model(&book);
            (to_pretty_json(&document)?, book.len())
        }
        DataKind::ExpenditureTracker => {
            let tracker = read_present(store.read_expenditure_tracker()?, config)?;
            let document =
                formats::expenditure::ExpenditureTrackerDocument::from_model(&tracker);
            (to_pretty_json(&document)?, tracker.len())
        }
    };

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| config.file.with_extension("json"));
    storage::write_atomic(&output, json.as_bytes())?;
    println!("Exported {} record(s) to {}", records, output.display());
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, StorageError> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::Serialization(format!("Failed to serialize to JSON: {e}")))?;
    json.push('\n');
    Ok(json)
}

// The existence check above makes an empty read unreachable in practice,
// but a file racing out from under us should not panic.
fn read_present<T>(read: Option<T>, config: &Config) -> Result<T, StorageError> {
    read.ok_or_else(|| {
        StorageError::InvalidInput(format!("{} disappeared during the run", config.file.display()))
    })
}
