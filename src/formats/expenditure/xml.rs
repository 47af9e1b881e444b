//! Expenditure tracker XML codec

use crate::errors::{DataError, StorageError};
use crate::formats::expenditure::ExpenditureTrackerDocument;
use quick_xml::de::from_reader;
use quick_xml::se::to_string;
use std::io::{BufRead, Write};

/// Parse an expenditure tracker document from XML.
pub fn parse<R: BufRead>(reader: R) -> Result<ExpenditureTrackerDocument, DataError> {
    from_reader(reader).map_err(|e| DataError::Malformed(format!("expenditure tracker XML: {e}")))
}

/// Parse an expenditure tracker document from an XML string.
pub fn parse_str(content: &str) -> Result<ExpenditureTrackerDocument, DataError> {
    quick_xml::de::from_str(content)
        .map_err(|e| DataError::Malformed(format!("expenditure tracker XML: {e}")))
}

/// Write an expenditure tracker document as XML.
pub fn write<W: Write>(
    mut writer: W,
    document: &ExpenditureTrackerDocument,
) -> Result<(), StorageError> {
    writer
        .write_all(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")
        .map_err(|e| StorageError::Io(e, "Failed to write XML declaration".to_string()))?;

    let xml_content = to_string(document).map_err(|e| {
        StorageError::Serialization(format!(
            "Failed to serialize expenditure tracker to XML: {e}"
        ))
    })?;

    writer
        .write_all(xml_content.as_bytes())
        .map_err(|e| StorageError::Io(e, "Failed to write XML content".to_string()))?;
    writer
        .write_all(b"\n")
        .map_err(|e| StorageError::Io(e, "Failed to write XML content".to_string()))?;

    Ok(())
}
