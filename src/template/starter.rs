//! Starter MoM template
//!
//! Writes a small but complete Word document carrying all three
//! placeholders, for `momgen template init` and for tests.

use std::path::Path;

use crate::docx::{DocxPackage, DOCUMENT_PART, DOCUMENT_RELS_PART};
use crate::Result;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/></Relationships>"#;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>MBA Committee | &lt;&lt;MEETING_DATE&gt;&gt;</w:t></w:r></w:p></w:hdr>"#;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Minutes of the MBA Committee Meeting</w:t></w:r></w:p><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>&lt;&lt;MEETING_DATE_u&gt;&gt;</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">The meeting of the MBA Committee was held on &lt;&lt;MEETING_DATE&gt;&gt;. The following agenda was discussed:</w:t></w:r></w:p><w:p><w:r><w:t>&lt;&lt;AGENDA&gt;&gt;</w:t></w:r></w:p><w:p><w:r><w:t>The meeting ended with a vote of thanks to the chair.</w:t></w:r></w:p><w:sectPr><w:headerReference w:type="default" r:id="rId1"/><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#;

/// The starter template as an in-memory package
pub fn starter_package() -> DocxPackage {
    DocxPackage::from_parts(vec![
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        (DOCUMENT_PART, DOCUMENT.as_bytes().to_vec()),
        (DOCUMENT_RELS_PART, DOCUMENT_RELS.as_bytes().to_vec()),
        ("word/header1.xml", HEADER.as_bytes().to_vec()),
    ])
}

/// Write the starter template to `path`, creating parent directories
pub fn write_starter_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    starter_package().save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{render, AGENDA, MEETING_DATE, MEETING_DATE_UNDERLINED};

    #[test]
    fn starter_carries_every_placeholder() {
        let package = starter_package();
        let document = std::str::from_utf8(package.part(DOCUMENT_PART).unwrap()).unwrap();
        let escaped = |p: &str| p.replace('<', "&lt;").replace('>', "&gt;");

        assert!(document.contains(&escaped(MEETING_DATE)));
        assert!(document.contains(&escaped(MEETING_DATE_UNDERLINED)));
        assert!(document.contains(&escaped(AGENDA)));
        assert_eq!(
            package.header_part_names().unwrap(),
            vec!["word/header1.xml".to_string()]
        );
    }

    #[test]
    fn starter_renders_cleanly() {
        let mut package = starter_package();
        let report = render(
            &mut package,
            "May 05, 2024",
            &["1. Item A".to_string(), "2. Item B".to_string()],
        )
        .unwrap();

        assert_eq!(report.body_dates, 1);
        assert_eq!(report.underlined_dates, 1);
        assert_eq!(report.header_dates, 1);
        assert_eq!(report.agenda_inserted, Some(2));
    }
}
