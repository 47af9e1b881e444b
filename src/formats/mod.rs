//! Data-kind detection and definition module.
//!
//! Both record collections are stored as XML, so the file extension says
//! nothing; the root element does. This module provides types and utilities
//! for telling an address book file from an expenditure tracker file.

pub mod address;
pub mod expenditure;

use crate::errors::StorageError;

/// The two record collections this tool persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Address book data (`<addressbook>` root)
    AddressBook,
    /// Expenditure tracker data (`<expendituretracker>` root)
    ExpenditureTracker,
}

impl DataKind {
    /// Detect the kind from file content by inspecting the root element,
    /// skipping the XML declaration, comments and whitespace.
    pub fn from_content(content: &[u8]) -> Result<Self, StorageError> {
        let root = root_element_name(content)?;
        match root.as_str() {
            "addressbook" => Ok(DataKind::AddressBook),
            "expendituretracker" => Ok(DataKind::ExpenditureTracker),
            other => Err(StorageError::UnsupportedFormat(format!(
                "Unknown root element <{other}>. Expected <addressbook> or <expendituretracker>"
            ))),
        }
    }

    /// The root element this kind is stored under.
    pub fn root_element(&self) -> &'static str {
        match self {
            DataKind::AddressBook => "addressbook",
            DataKind::ExpenditureTracker => "expendituretracker",
        }
    }

    /// Human-readable collection name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            DataKind::AddressBook => "address book",
            DataKind::ExpenditureTracker => "expenditure tracker",
        }
    }
}

/// Extracts the name of the first real element in `content`.
fn root_element_name(content: &[u8]) -> Result<String, StorageError> {
    let mut rest = content;
    loop {
        while let [first, tail @ ..] = rest {
            if first.is_ascii_whitespace() {
                rest = tail;
            } else {
                break;
            }
        }
        if rest.is_empty() {
            return Err(StorageError::InvalidInput("Empty file content".to_string()));
        }
        if rest[0] != b'<' {
            return Err(StorageError::InvalidInput(
                "Could not detect data kind from content. Expected an XML document".to_string(),
            ));
        }
        if rest.starts_with(b"<?") {
            rest = skip_past(rest, b"?>")?;
        } else if rest.starts_with(b"<!--") {
            rest = skip_past(rest, b"-->")?;
        } else {
            let name: String = rest[1..]
                .iter()
                .take_while(|b| !b.is_ascii_whitespace() && **b != b'>' && **b != b'/')
                .map(|b| *b as char)
                .collect();
            if name.is_empty() {
                return Err(StorageError::InvalidInput(
                    "Could not detect data kind from content. Expected an XML document".to_string(),
                ));
            }
            return Ok(name);
        }
    }
}

fn skip_past<'a>(content: &'a [u8], marker: &[u8]) -> Result<&'a [u8], StorageError> {
    content
        .windows(marker.len())
        .position(|window| window == marker)
        .map(|at| &content[at + marker.len()..])
        .ok_or_else(|| {
            StorageError::InvalidInput("Unterminated XML prolog in file content".to_string())
        })
}
