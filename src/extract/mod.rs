//! Extraction of the meeting date and agenda from email text
//!
//! Only one phrasing is understood: "scheduled on <Weekday>, <Month> <Day>,
//! <Year>" for the date, and a numbered list starting at "1." for the
//! agenda. Anything else degrades to the sentinel date or an empty agenda.

mod models;

pub use models::{MeetingDetails, UNKNOWN_DATE};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"scheduled on ([A-Za-z]+, [A-Za-z]+ \d{1,2}, \d{4})")
        .expect("date pattern is valid")
});

/// From a line starting with "1." (after optional indentation) up to the
/// first blank line or end of text
static AGENDA_BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]*(1\..*?)(?:\n\n|\z)").expect("agenda block pattern is valid")
});

static AGENDA_ITEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(\d+\..*)$").expect("agenda item pattern is valid"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Pull the meeting date and agenda points out of an email body
pub fn extract_meeting_details(text: &str) -> MeetingDetails {
    let text = text.replace("\r\n", "\n");

    let meeting_date = extract_meeting_date(&text);
    let agenda_points = extract_agenda_points(&text);

    debug!(
        "Extracted date {:?} and {} agenda points",
        meeting_date,
        agenda_points.len()
    );

    MeetingDetails {
        meeting_date,
        agenda_points,
    }
}

/// Date following the first "scheduled on", normalized to "November 01, 2023"
pub fn extract_meeting_date(text: &str) -> String {
    let Some(captures) = DATE_PATTERN.captures(text) else {
        return UNKNOWN_DATE.to_string();
    };
    let raw = &captures[1];

    // Drop the weekday
    let without_weekday = raw.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");

    match parse_long_date(&without_weekday) {
        Some(date) => date.format("%B %d, %Y").to_string(),
        None => {
            debug!("Could not parse meeting date {:?}, keeping it verbatim", raw);
            raw.to_string()
        }
    }
}

/// Numbered lines of the first agenda block
pub fn extract_agenda_points(text: &str) -> Vec<String> {
    let Some(block) = AGENDA_BLOCK_PATTERN.captures(text) else {
        return Vec::new();
    };
    let block = block[1].trim();

    AGENDA_ITEM_PATTERN
        .captures_iter(block)
        .map(|item| item[1].to_string())
        .collect()
}

/// Parse "<Month> <Day>, <Year>" with a full English month name
fn parse_long_date(text: &str) -> Option<NaiveDate> {
    let (month_name, rest) = text.split_once(' ')?;
    let (day, year) = rest.split_once(", ")?;

    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month_name))? as u32
        + 1;
    let day: u32 = ascii_number(day)?;
    let year: i32 = ascii_number(year)?;
    if year < 1 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

fn ascii_number<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
