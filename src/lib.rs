//! momgen - Turn a meeting invitation email into a minutes-of-meeting document
//!
//! The email text is mined for the meeting date and the numbered agenda, and
//! both are poured into a Word template.

pub mod cli;
pub mod config;
pub mod docx;
pub mod extract;
pub mod template;
pub mod web;

use thiserror::Error;

/// Main error type for momgen
#[derive(Error, Debug)]
pub enum MomError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MomError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "momgen";
