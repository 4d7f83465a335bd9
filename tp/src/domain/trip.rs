//! Trip form and validated trip details

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::TripConfig;

/// Date format accepted on the form and used in prompts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while validating a trip form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    #[error("Please fill in all fields: {0} is missing")]
    MissingField(&'static str),

    #[error("Invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Stay of {days} days exceeds the maximum of {max} days")]
    StayTooLong { days: u32, max: u32 },
}

/// Inclusive number of days between two dates
pub fn stay_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    span.max(0) as u32
}

/// Raw form fields as the user typed them
#[derive(Debug, Clone, Default)]
pub struct TripForm {
    pub destination: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub activities: String,
}

impl TripForm {
    pub fn new(
        destination: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        activities: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            activities: activities.into(),
        }
    }

    /// Validate the form into a [`TripInfo`]
    ///
    /// Presence checks run before any parsing so an incomplete form is always
    /// reported as missing fields, never as a bad date.
    pub fn validate(&self, rules: &TripConfig) -> Result<TripInfo, TripError> {
        debug!(?self, ?rules, "TripForm::validate: called");
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(TripError::MissingField("destination"));
        }
        let start_raw = present(&self.start_date).ok_or(TripError::MissingField("start date"))?;
        let end_raw = present(&self.end_date).ok_or(TripError::MissingField("end date"))?;
        let activities = self.activities.trim();
        if activities.is_empty() {
            return Err(TripError::MissingField("activities"));
        }

        let start_date = parse_date("start date", start_raw)?;
        let end_date = parse_date("end date", end_raw)?;
        if end_date < start_date {
            debug!(%start_date, %end_date, "TripForm::validate: end before start");
            return Err(TripError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }

        let days = stay_days(start_date, end_date);
        if let Some(max) = rules.max_stay_days
            && days > max
        {
            debug!(days, max, "TripForm::validate: stay too long");
            return Err(TripError::StayTooLong { days, max });
        }

        Ok(TripInfo {
            destination: destination.to_string(),
            start_date,
            end_date,
            activities: activities.to_string(),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, TripError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| TripError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Validated trip details, fixed for the rest of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripInfo {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    activities: String,
}

impl TripInfo {
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn activities(&self) -> &str {
        &self.activities
    }

    /// Length of the stay, counting both the first and last day
    pub fn stay_days(&self) -> u32 {
        stay_days(self.start_date, self.end_date)
    }

    /// Summary of the trip attached to follow-up questions
    pub fn context_note(&self) -> String {
        format!(
            "Context: The user is traveling to {} from {} to {}. Planned activities: {}",
            self.destination,
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT),
            self.activities
        )
    }
}
