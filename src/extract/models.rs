//! Data extracted from a meeting email

use serde::{Deserialize, Serialize};

/// Date used when the email does not mention one
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Meeting date and agenda pulled out of an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDetails {
    /// Human-readable date ("November 01, 2023"), the raw matched text when
    /// it could not be parsed, or [`UNKNOWN_DATE`]
    pub meeting_date: String,

    /// Numbered agenda lines in email order ("1. Approve budget")
    pub agenda_points: Vec<String>,
}

impl MeetingDetails {
    pub fn new(meeting_date: impl Into<String>, agenda_points: Vec<String>) -> Self {
        Self {
            meeting_date: meeting_date.into(),
            agenda_points,
        }
    }

    /// Whether the date fell back to the sentinel
    pub fn has_known_date(&self) -> bool {
        self.meeting_date != UNKNOWN_DATE
    }
}

impl Default for MeetingDetails {
    fn default() -> Self {
        Self {
            meeting_date: UNKNOWN_DATE.to_string(),
            agenda_points: Vec::new(),
        }
    }
}
