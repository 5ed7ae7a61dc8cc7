//! Template filling for momgen
//!
//! The template is a Word document with three placeholders:
//! `<<MEETING_DATE>>` (body and page headers), `<<MEETING_DATE_u>>`
//! (underlined) and `<<AGENDA>>` (a paragraph replaced by the agenda).

mod filler;
pub mod starter;

pub use filler::{fill, fill_in, render, FillReport, GeneratedDocument, TemplateFiller};

/// Plain date placeholder, replaced in the body and in page headers
pub const MEETING_DATE: &str = "<<MEETING_DATE>>";

/// Date placeholder whose paragraph is underlined after substitution
pub const MEETING_DATE_UNDERLINED: &str = "<<MEETING_DATE_u>>";

/// Paragraph replaced by the bold agenda items
pub const AGENDA: &str = "<<AGENDA>>";

/// Download name for a generated document
pub fn output_file_name(meeting_date: &str) -> String {
    let date: String = meeting_date
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect();
    format!("MoM of the MBA Committee meeting dated {}.docx", date)
}
