//! Word document (DOCX) support for momgen
//!
//! Just enough WordprocessingML to edit a template: open the zip package,
//! parse its XML parts into mutable trees, and work on paragraphs.

mod package;
pub mod paragraph;
pub mod xml;

pub use package::{DocxPackage, DOCUMENT_PART, DOCUMENT_RELS_PART};
pub use paragraph::Emphasis;
pub use xml::{XmlDocument, XmlElement, XmlNode};

/// MIME type of `.docx` files
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
