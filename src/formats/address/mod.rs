//! Address book save-file handlers (document structs and XML codec)

pub mod document;
pub mod xml;

pub use document::AddressBookDocument;
