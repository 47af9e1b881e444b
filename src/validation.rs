//! Validation for data files.
//!
//! Unlike the storage reads, which fail fast on the first bad field, a check
//! run walks the whole document and reports every problem it finds with
//! enough context to fix the file by hand.

use crate::formats::address::AddressBookDocument;
use crate::formats::expenditure::ExpenditureTrackerDocument;
use crate::models_address::DUPLICATE_PERSON;
use colored::*;

/// Validation severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single validation issue with context
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub location: Option<String>,
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location: None,
            suggestion: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location: None,
            suggestion: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            location: None,
            suggestion: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// All issues found in one check run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// True when the file can be loaded by the storage layer.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Checks every person entry in an address book document.
pub fn validate_address_book(document: &AddressBookDocument) -> ValidationReport {
    use crate::models_address::{Address, Email, Name, Person, Phone, Tag};

    let mut report = ValidationReport::new();
    if document.persons.is_empty() {
        report.push(ValidationIssue::info("address book contains no persons"));
    }

    let mut converted: Vec<(usize, Person)> = Vec::new();
    for (index, element) in document.persons.iter().enumerate() {
        let location = format!("person #{}", index + 1);
        let check_field = |field: &str,
                           value: &Option<String>,
                           validate: &dyn Fn(&str) -> Option<String>,
                           report: &mut ValidationReport| {
            match value.as_deref() {
                None => report.push(
                    ValidationIssue::error(format!("required field <{field}> is missing"))
                        .with_location(location.clone())
                        .with_suggestion(format!("add a <{field}> element to the entry")),
                ),
                Some(raw) => {
                    if let Some(message) = validate(raw) {
                        report.push(
                            ValidationIssue::error(message).with_location(location.clone()),
                        );
                    }
                }
            }
        };

        check_field("name", &element.name, &constraint_of(Name::new), &mut report);
        check_field("phone", &element.phone, &constraint_of(Phone::new), &mut report);
        check_field("email", &element.email, &constraint_of(Email::new), &mut report);
        check_field(
            "address",
            &element.address,
            &constraint_of(Address::new),
            &mut report,
        );

        for tag in &element.tagged {
            if let Some(message) = constraint_of(Tag::new)(tag) {
                report.push(
                    ValidationIssue::error(format!("tag \"{tag}\": {message}"))
                        .with_location(location.clone()),
                );
            }
        }

        if let Ok(person) = element.to_model() {
            if let Some((earlier, _)) = converted
                .iter()
                .find(|(_, other)| other.is_same_person(&person))
            {
                report.push(
                    ValidationIssue::error(DUPLICATE_PERSON)
                        .with_location(location.clone())
                        .with_suggestion(format!("duplicates person #{}", earlier + 1)),
                );
            } else {
                converted.push((index, person));
            }
        }
    }
    report
}

/// Checks every record in an expenditure tracker document.
pub fn validate_expenditure_tracker(document: &ExpenditureTrackerDocument) -> ValidationReport {
    use crate::models_expenditure::{Description, ExpenditureDate, Money};

    let mut report = ValidationReport::new();
    if document.expenditures.is_empty() {
        report.push(ValidationIssue::info("expenditure tracker contains no records"));
    }

    for (index, element) in document.expenditures.iter().enumerate() {
        let location = format!("expenditure #{}", index + 1);

        let check_field =
            |field: &str, value: &Option<String>, validate: &dyn Fn(&str) -> Option<String>| {
                match value.as_deref() {
                    None => Some(
                        ValidationIssue::error(format!("required field <{field}> is missing"))
                            .with_location(location.clone())
                            .with_suggestion(format!("add a <{field}> element to the entry")),
                    ),
                    Some(raw) => validate(raw).map(|message| {
                        ValidationIssue::error(message).with_location(location.clone())
                    }),
                }
            };

        let issues: Vec<_> = [
            check_field(
                "description",
                &element.description,
                &constraint_of(Description::new),
            ),
            check_field("date", &element.date, &|raw| {
                ExpenditureDate::parse(raw).err().map(|e| e.to_string())
            }),
            check_field("money", &element.money, &|raw| {
                Money::parse(raw).err().map(|e| e.to_string())
            }),
        ]
        .into_iter()
        .flatten()
        .collect();
        for issue in issues {
            report.push(issue);
        }
    }
    report
}

/// Adapts a validating constructor into a `value -> Option<message>` check.
fn constraint_of<T, E: std::fmt::Display>(
    constructor: impl Fn(String) -> Result<T, E>,
) -> impl Fn(&str) -> Option<String> {
    move |raw| constructor(raw.to_string()).err().map(|e| e.to_string())
}

/// Renders a report to the terminal, colorized by severity.
pub fn print_report(report: &ValidationReport, subject: &str) {
    if report.issues().is_empty() {
        println!("{} {subject} looks good", "OK".green().bold());
        return;
    }

    for issue in report.issues() {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue(),
        };
        match &issue.location {
            Some(location) => println!("{label}: {} ({location})", issue.message),
            None => println!("{label}: {}", issue.message),
        }
        if let Some(suggestion) = &issue.suggestion {
            println!("  {} {suggestion}", "hint:".dimmed());
        }
    }

    let summary = format!(
        "{} error(s), {} warning(s) in {subject}",
        report.error_count(),
        report.warning_count()
    );
    if report.is_ok() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::address::document::PersonElement;
    use crate::formats::expenditure::document::ExpenditureElement;

    fn person(name: &str, phone: &str, email: &str) -> PersonElement {
        PersonElement {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            email: Some(email.to_string()),
            address: Some("somewhere".to_string()),
            tagged: vec![],
        }
    }

    #[test]
    fn clean_document_reports_no_errors() {
        let document = AddressBookDocument {
            persons: vec![person("Alice Pauline", "94351253", "alice@example.com")],
        };
        let report = validate_address_book(&document);
        assert!(report.is_ok());
        assert_eq!(report.issues().len(), 0);
    }

    #[test]
    fn empty_document_is_only_informational() {
        let report = validate_address_book(&AddressBookDocument::default());
        assert!(report.is_ok());
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.issues()[0].severity, Severity::Info);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let document = AddressBookDocument {
            persons: vec![PersonElement {
                name: Some("Bad*Name".to_string()),
                phone: None,
                email: Some("no-at-sign".to_string()),
                address: Some(" leading space".to_string()),
                tagged: vec!["not ok".to_string()],
            }],
        };
        let report = validate_address_book(&document);
        assert_eq!(report.error_count(), 5);
        assert!(report.issues().iter().all(|i| i.location.is_some()));
    }

    #[test]
    fn duplicates_are_located() {
        let document = AddressBookDocument {
            persons: vec![
                person("Alice Pauline", "94351253", "alice@example.com"),
                person("Alice Pauline", "94351253", "other@example.com"),
            ],
        };
        let report = validate_address_book(&document);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.issues()[0].location.as_deref(), Some("person #2"));
    }

    #[test]
    fn expenditure_issues_are_reported_per_record() {
        let document = ExpenditureTrackerDocument {
            expenditures: vec![
                ExpenditureElement {
                    description: Some("Lunch".to_string()),
                    date: Some("01-11-2018".to_string()),
                    money: Some("5.50".to_string()),
                },
                ExpenditureElement {
                    description: None,
                    date: Some("2018/11/01".to_string()),
                    money: Some("abc".to_string()),
                },
            ],
        };
        let report = validate_expenditure_tracker(&document);
        assert_eq!(report.error_count(), 3);
        assert!(
            report
                .issues()
                .iter()
                .all(|i| i.location.as_deref() == Some("expenditure #2"))
        );
    }
}
