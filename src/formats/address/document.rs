//! Document structures for the address book save file.
//!
//! These mirror the on-disk XML shape: a `<addressbook>` root holding one
//! `<persons>` entry per person, each with leaf elements for the fields and
//! a repeated `<tagged>` element per tag. Leaves are `Option<String>` so a
//! missing element becomes a "field is missing" conversion failure rather
//! than a parse error.

use crate::errors::DataError;
use crate::models_address::{Address, AddressBook, Email, Name, Person, Phone, Tag};
use serde::{Deserialize, Serialize};

/// Complete address book document as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename = "addressbook", deny_unknown_fields)]
pub struct AddressBookDocument {
    #[serde(rename = "persons", default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<PersonElement>,
}

/// One `<persons>` entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PersonElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "tagged", default, skip_serializing_if = "Vec::is_empty")]
    pub tagged: Vec<String>,
}

impl PersonElement {
    /// Validates this entry into a domain [`Person`].
    pub fn to_model(&self) -> Result<Person, DataError> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Person", "name"))?;
        let phone = self
            .phone
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Person", "phone"))?;
        let email = self
            .email
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Person", "email"))?;
        let address = self
            .address
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Person", "address"))?;

        let tags = self
            .tagged
            .iter()
            .map(|t| Tag::new(t.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Person::new(
            Name::new(name)?,
            Phone::new(phone)?,
            Email::new(email)?,
            Address::new(address)?,
            tags,
        ))
    }
}

impl From<&Person> for PersonElement {
    fn from(person: &Person) -> Self {
        PersonElement {
            name: Some(person.name().as_str().to_string()),
            phone: Some(person.phone().as_str().to_string()),
            email: Some(person.email().as_str().to_string()),
            address: Some(person.address().as_str().to_string()),
            tagged: person.tags().iter().map(|t| t.as_str().to_string()).collect(),
        }
    }
}

impl AddressBookDocument {
    /// Validates the whole document into a domain [`AddressBook`].
    ///
    /// Fails on the first bad field or duplicate person. For a full listing
    /// of every problem in a file, see the validation module.
    pub fn to_model(&self) -> Result<AddressBook, DataError> {
        let mut book = AddressBook::new();
        for element in &self.persons {
            book.add_person(element.to_model()?)?;
        }
        Ok(book)
    }

    pub fn from_model(book: &AddressBook) -> Self {
        AddressBookDocument {
            persons: book.persons().iter().map(PersonElement::from).collect(),
        }
    }
}
