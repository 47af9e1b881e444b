//! Domain model for the address book collection.
//!
//! Every field type validates on construction; storage code converts the
//! failure into a data conversion error instead of letting a bad record
//! reach the rest of the application.

use crate::errors::DataError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain digits, and should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str =
    "Emails should be of the form local-part@domain, where the local part uses word characters \
     plus '.', '+' or '-', and the domain is one or more dot-separated labels";
pub const ADDRESS_CONSTRAINTS: &str =
    "Addresses can take any value, but should not be blank or start with whitespace";
pub const TAG_CONSTRAINTS: &str = "Tag names should be alphanumeric and non-empty";
pub const DUPLICATE_PERSON: &str = "Persons list contains duplicate person(s)";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("name pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,}$").expect("phone pattern compiles"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)*$").expect("email pattern compiles"));
static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S").expect("address pattern compiles"));
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("tag pattern compiles"));

/// A person's display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if NAME_PATTERN.is_match(&value) {
            Ok(Name(value))
        } else {
            Err(DataError::illegal(NAME_CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phone number, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if PHONE_PATTERN.is_match(&value) {
            Ok(Phone(value))
        } else {
            Err(DataError::illegal(PHONE_CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email address of the form `local-part@domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if EMAIL_PATTERN.is_match(&value) {
            Ok(Email(value))
        } else {
            Err(DataError::illegal(EMAIL_CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A postal address. Free-form, but never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if ADDRESS_PATTERN.is_match(&value) {
            Ok(Address(value))
        } else {
            Err(DataError::illegal(ADDRESS_CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A label attached to a person, e.g. `friends` or `colleagues`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if TAG_PATTERN.is_match(&value) {
            Ok(Tag(value))
        } else {
            Err(DataError::illegal(TAG_CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single address book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Person {
            name,
            phone,
            email,
            address,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Identity used for duplicate detection: same name, and at least one
    /// of phone or email matching. Weaker than full equality.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name && (self.phone == other.phone || self.email == other.email)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Phone: {} Email: {} Address: {}",
            self.name, self.phone, self.email, self.address
        )?;
        for tag in &self.tags {
            write!(f, " [{tag}]")?;
        }
        Ok(())
    }
}

/// The address book: an ordered list of unique persons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    persons: Vec<Person>,
}

impl AddressBook {
    pub fn new() -> Self {
        AddressBook::default()
    }

    /// Adds a person, rejecting one that duplicates an existing entry.
    pub fn add_person(&mut self, person: Person) -> Result<(), DataError> {
        if self.persons.iter().any(|p| p.is_same_person(&person)) {
            return Err(DataError::illegal(DUPLICATE_PERSON));
        }
        self.persons.push(person);
        Ok(())
    }

    /// Removes the first entry equal to `person`. Returns whether one was found.
    pub fn remove_person(&mut self, person: &Person) -> bool {
        match self.persons.iter().position(|p| p == person) {
            Some(index) => {
                self.persons.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Person {
        Person::new(
            Name::new("Alice Pauline").unwrap(),
            Phone::new("94351253").unwrap(),
            Email::new("alice@example.com").unwrap(),
            Address::new("123, Jurong West Ave 6, #08-111").unwrap(),
            [Tag::new("friends").unwrap()],
        )
    }

    #[test]
    fn name_rejects_blank_and_punctuation() {
        assert!(Name::new("").is_err());
        assert!(Name::new(" leading space").is_err());
        assert!(Name::new("peter*").is_err());
        assert!(Name::new("Capital Tan").is_ok());
        assert!(Name::new("David Roger Jackson Ray Jr 2nd").is_ok());
    }

    #[test]
    fn phone_requires_three_digits() {
        assert!(Phone::new("91").is_err());
        assert!(Phone::new("phone").is_err());
        assert!(Phone::new("9011p041").is_err());
        assert!(Phone::new("911").is_ok());
        assert!(Phone::new("93121534").is_ok());
    }

    #[test]
    fn email_requires_local_part_and_domain() {
        assert!(Email::new("").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("peterjack@").is_err());
        assert!(Email::new("peter jack@example.com").is_err());
        assert!(Email::new("PeterJack_1190@example.com").is_ok());
        assert!(Email::new("a+b-c.d@sub.example.com").is_ok());
    }

    #[test]
    fn address_rejects_blank() {
        assert!(Address::new("").is_err());
        assert!(Address::new(" ").is_err());
        assert!(Address::new("-").is_ok());
        assert!(Address::new("Leng Inc; 1234 Market St; San Francisco").is_ok());
    }

    #[test]
    fn tag_must_be_alphanumeric() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new("best friend").is_err());
        assert!(Tag::new("friends").is_ok());
        assert!(Tag::new("cs2103").is_ok());
    }

    #[test]
    fn same_person_matches_on_name_and_phone_or_email() {
        let a = alice();
        let same_phone = Person::new(
            a.name().clone(),
            a.phone().clone(),
            Email::new("other@example.com").unwrap(),
            Address::new("elsewhere").unwrap(),
            [],
        );
        let different = Person::new(
            Name::new("Bob Choo").unwrap(),
            a.phone().clone(),
            a.email().clone(),
            a.address().clone(),
            [],
        );
        assert!(a.is_same_person(&same_phone));
        assert!(!a.is_same_person(&different));
    }

    #[test]
    fn address_book_rejects_duplicates() {
        let mut book = AddressBook::new();
        book.add_person(alice()).unwrap();
        let err = book.add_person(alice()).unwrap_err();
        assert_eq!(err, DataError::illegal(DUPLICATE_PERSON));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn remove_person_drops_exact_match_only() {
        let mut book = AddressBook::new();
        book.add_person(alice()).unwrap();
        let bob = Person::new(
            Name::new("Bob Choo").unwrap(),
            Phone::new("87654321").unwrap(),
            Email::new("bob@example.com").unwrap(),
            Address::new("Block 123, Bobby Street 3").unwrap(),
            [],
        );
        assert!(!book.remove_person(&bob));
        assert!(book.remove_person(&alice()));
        assert!(book.is_empty());
    }

    #[test]
    fn tags_are_deduplicated_and_ordered() {
        let person = Person::new(
            Name::new("Carl Kurz").unwrap(),
            Phone::new("95352563").unwrap(),
            Email::new("heinz@example.com").unwrap(),
            Address::new("wall street").unwrap(),
            [
                Tag::new("owesMoney").unwrap(),
                Tag::new("friends").unwrap(),
                Tag::new("friends").unwrap(),
            ],
        );
        let tags: Vec<&str> = person.tags().iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["friends", "owesMoney"]);
    }
}
