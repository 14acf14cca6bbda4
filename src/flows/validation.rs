// ABOUTME: Step validation failures and the notifications they surface as
// Two kinds only: a required field is missing, or a selection is empty, past or unavailable

use crate::app::Notification;
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

/// Form fields a step can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Email,
    PartnerName,
    Date,
    Time,
    Location,
}

impl RequiredField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::PartnerName => "partner name",
            Self::Date => "date",
            Self::Time => "time",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What an empty selection was supposed to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    TimeSlots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    MissingField,
    InvalidSelection,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("Nothing selected")]
    EmptySelection(SelectionKind),

    #[error("{0} is in the past")]
    PastSelection(NaiveDateTime),

    #[error("'{0}' is not one of the available options")]
    UnavailableSelection(String),

    #[error("'{0}' is not one of the listed locations")]
    UnknownLocation(String),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// "name", "name and email", "date, time and location"
fn describe_fields(fields: &[RequiredField]) -> String {
    match fields {
        [] => String::new(),
        [only] => only.label().to_string(),
        [init @ .., last] => format!("{} and {}", join_fields(init), last.label()),
    }
}

impl ValidationError {
    pub fn missing(field: RequiredField) -> Self {
        Self::MissingFields(vec![field])
    }

    pub const fn kind(&self) -> ValidationKind {
        match self {
            Self::MissingFields(_) => ValidationKind::MissingField,
            Self::EmptySelection(_)
            | Self::PastSelection(_)
            | Self::UnavailableSelection(_)
            | Self::UnknownLocation(_) => ValidationKind::InvalidSelection,
        }
    }

    /// The toast shown for this failure
    pub fn notification(&self) -> Notification {
        match self {
            Self::MissingFields(fields) => match fields.as_slice() {
                [RequiredField::PartnerName] => Notification::destructive("Name required")
                    .with_description("Please enter your partner's name to continue"),
                [RequiredField::Date] => Notification::destructive("Please select a date"),
                [RequiredField::Time] => Notification::destructive("Please select a time"),
                [RequiredField::Location] => Notification::destructive("Please enter a location"),
                _ => Notification::destructive("Required fields missing").with_description(
                    format!("Please provide your {} to continue.", describe_fields(fields)),
                ),
            },
            Self::EmptySelection(SelectionKind::TimeSlots) => {
                Notification::destructive("No time slots selected")
                    .with_description("Please select at least one time slot.")
            }
            Self::PastSelection(_) => Notification::destructive("Cannot select past time")
                .with_description("Please select a future time slot."),
            Self::UnavailableSelection(_) => Notification::destructive("Time not available")
                .with_description("This time slot is not available for selection."),
            Self::UnknownLocation(location) => Notification::destructive("Location not available")
                .with_description(format!("{location} is not one of the listed locations.")),
        }
    }
}

/// Trimmed value of a required text field
pub(crate) fn required(
    value: &str,
    field: RequiredField,
    missing: &mut Vec<RequiredField>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        missing.push(field);
    }
    trimmed.to_string()
}
