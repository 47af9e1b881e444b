//! Address book XML codec

use crate::errors::{DataError, StorageError};
use crate::formats::address::AddressBookDocument;
use quick_xml::de::from_reader;
use quick_xml::se::to_string;
use std::io::{BufRead, Write};

/// Parse an address book document from XML.
pub fn parse<R: BufRead>(reader: R) -> Result<AddressBookDocument, DataError> {
    from_reader(reader).map_err(|e| DataError::Malformed(format!("address book XML: {e}")))
}

/// Parse an address book document from an XML string.
pub fn parse_str(content: &str) -> Result<AddressBookDocument, DataError> {
    quick_xml::de::from_str(content)
        .map_err(|e| DataError::Malformed(format!("address book XML: {e}")))
}

/// Write an address book document as XML.
pub fn write<W: Write>(mut writer: W, document: &AddressBookDocument) -> Result<(), StorageError> {
    writer
        .write_all(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")
        .map_err(|e| StorageError::Io(e, "Failed to write XML declaration".to_string()))?;

    let xml_content = to_string(document).map_err(|e| {
        StorageError::Serialization(format!("Failed to serialize address book to XML: {e}"))
    })?;

    writer
        .write_all(xml_content.as_bytes())
        .map_err(|e| StorageError::Io(e, "Failed to write XML content".to_string()))?;
    writer
        .write_all(b"\n")
        .map_err(|e| StorageError::Io(e, "Failed to write XML content".to_string()))?;

    Ok(())
}
