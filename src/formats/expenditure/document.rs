//! Document structures for the expenditure tracker save file.
//!
//! On-disk shape: an `<expendituretracker>` root holding one
//! `<expenditures>` entry per record with `<description>`, `<date>` and
//! `<money>` leaves. Same missing-element convention as the address book
//! document.

use crate::errors::DataError;
use crate::models_expenditure::{
    Description, Expenditure, ExpenditureDate, ExpenditureTracker, Money,
};
use serde::{Deserialize, Serialize};

/// Complete expenditure tracker document as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename = "expendituretracker", deny_unknown_fields)]
pub struct ExpenditureTrackerDocument {
    #[serde(
        rename = "expenditures",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub expenditures: Vec<ExpenditureElement>,
}

/// One `<expenditures>` entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExpenditureElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<String>,
}

impl ExpenditureElement {
    /// Validates this entry into a domain [`Expenditure`].
    pub fn to_model(&self) -> Result<Expenditure, DataError> {
        let description = self
            .description
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Expenditure", "description"))?;
        let date = self
            .date
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Expenditure", "date"))?;
        let money = self
            .money
            .as_deref()
            .ok_or_else(|| DataError::missing_field("Expenditure", "money"))?;

        Ok(Expenditure::new(
            Description::new(description)?,
            ExpenditureDate::parse(date)?,
            Money::parse(money)?,
        ))
    }
}

impl From<&Expenditure> for ExpenditureElement {
    fn from(expenditure: &Expenditure) -> Self {
        ExpenditureElement {
            description: Some(expenditure.description().as_str().to_string()),
            date: Some(expenditure.date().to_string()),
            money: Some(expenditure.money().to_string()),
        }
    }
}

impl ExpenditureTrackerDocument {
    /// Validates the whole document into a domain [`ExpenditureTracker`].
    pub fn to_model(&self) -> Result<ExpenditureTracker, DataError> {
        let mut tracker = ExpenditureTracker::new();
        for element in &self.expenditures {
            tracker.add_expenditure(element.to_model()?);
        }
        Ok(tracker)
    }

    pub fn from_model(tracker: &ExpenditureTracker) -> Self {
        ExpenditureTrackerDocument {
            expenditures: tracker
                .expenditures()
                .iter()
                .map(ExpenditureElement::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_element() -> ExpenditureElement {
        ExpenditureElement {
            description: Some("Lunch at hall".to_string()),
            date: Some("01-11-2018".to_string()),
            money: Some("5.50".to_string()),
        }
    }

    #[test]
    fn valid_element_converts() {
        let expenditure = valid_element().to_model().unwrap();
        assert_eq!(expenditure.description().as_str(), "Lunch at hall");
        assert_eq!(expenditure.money().cents(), 550);
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let element = ExpenditureElement {
            money: None,
            ..valid_element()
        };
        let err = element.to_model().unwrap_err();
        assert_eq!(err, DataError::missing_field("Expenditure", "money"));
    }

    #[test]
    fn invalid_date_fails_conversion() {
        let element = ExpenditureElement {
            date: Some("2018-11-01".to_string()),
            ..valid_element()
        };
        assert!(element.to_model().is_err());
    }

    #[test]
    fn repeated_entries_survive_document_conversion() {
        let document = ExpenditureTrackerDocument {
            expenditures: vec![valid_element(), valid_element()],
        };
        let tracker = document.to_model().unwrap();
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn document_round_trips_through_model() {
        let document = ExpenditureTrackerDocument {
            expenditures: vec![valid_element()],
        };
        let tracker = document.to_model().unwrap();
        assert_eq!(ExpenditureTrackerDocument::from_model(&tracker), document);
    }
}
