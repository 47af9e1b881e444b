//! Domain model for the expenditure tracker collection.

use crate::errors::DataError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const DESCRIPTION_CONSTRAINTS: &str =
    "Descriptions can take any value, but should not be blank or start with whitespace";
pub const DATE_CONSTRAINTS: &str =
    "Dates should be in DD-MM-YYYY format and must be valid calendar dates";
pub const MONEY_CONSTRAINTS: &str =
    "Amounts should be non-negative dollar values with at most two decimal places, e.g. 5 or 5.50";

static DESCRIPTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S").expect("description pattern compiles"));
static MONEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\.(\d{1,2}))?$").expect("money pattern compiles"));

const DATE_FORMAT: &str = "%d-%m-%Y";

/// What an expenditure was for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if DESCRIPTION_PATTERN.is_match(&value) {
            Ok(Description(value))
        } else {
            Err(DataError::illegal(DESCRIPTION_CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The calendar date an expenditure happened, kept in `DD-MM-YYYY` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenditureDate(NaiveDate);

impl ExpenditureDate {
    pub fn parse(value: &str) -> Result<Self, DataError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(ExpenditureDate)
            .map_err(|_| DataError::illegal(DATE_CONSTRAINTS))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ExpenditureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A non-negative dollar amount, stored as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: u64,
}

impl Money {
    pub fn parse(value: &str) -> Result<Self, DataError> {
        let captures = MONEY_PATTERN
            .captures(value)
            .ok_or_else(|| DataError::illegal(MONEY_CONSTRAINTS))?;

        let dollars: u64 = captures[1]
            .parse()
            .map_err(|_| DataError::illegal(MONEY_CONSTRAINTS))?;
        let cents = match captures.get(2) {
            // "5.5" means 50 cents, not 5
            Some(fraction) if fraction.len() == 1 => fraction.as_str().parse::<u64>().map(|c| c * 10),
            Some(fraction) => fraction.as_str().parse::<u64>(),
            None => Ok(0),
        }
        .map_err(|_| DataError::illegal(MONEY_CONSTRAINTS))?;

        dollars
            .checked_mul(100)
            .and_then(|total| total.checked_add(cents))
            .map(|cents| Money { cents })
            .ok_or_else(|| DataError::illegal(MONEY_CONSTRAINTS))
    }

    pub fn from_cents(cents: u64) -> Self {
        Money { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// A single expenditure record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expenditure {
    description: Description,
    date: ExpenditureDate,
    money: Money,
}

impl Expenditure {
    pub fn new(description: Description, date: ExpenditureDate, money: Money) -> Self {
        Expenditure {
            description,
            date,
            money,
        }
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn date(&self) -> ExpenditureDate {
        self.date
    }

    pub fn money(&self) -> Money {
        self.money
    }
}

impl fmt::Display for Expenditure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Date: {} Money: {}", self.description, self.date, self.money)
    }
}

/// The expenditure tracker: an ordered list of records. Unlike the address
/// book, repeated identical entries are meaningful and allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenditureTracker {
    expenditures: Vec<Expenditure>,
}

impl ExpenditureTracker {
    pub fn new() -> Self {
        ExpenditureTracker::default()
    }

    pub fn add_expenditure(&mut self, expenditure: Expenditure) {
        self.expenditures.push(expenditure);
    }

    pub fn expenditures(&self) -> &[Expenditure] {
        &self.expenditures
    }

    /// Sum of all recorded amounts. `None` if the total overflows.
    pub fn total(&self) -> Option<Money> {
        self.expenditures
            .iter()
            .try_fold(Money::default(), |acc, e| acc.checked_add(e.money()))
    }

    pub fn len(&self) -> usize {
        self.expenditures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenditures.is_empty()
    }
}
