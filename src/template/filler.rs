//! Fill the MoM template with a meeting date and agenda

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::docx::paragraph::{is_paragraph, new_paragraph, paragraph_text, set_paragraph_text};
use crate::docx::{DocxPackage, Emphasis, XmlElement, XmlNode, DOCUMENT_PART};
use crate::extract::MeetingDetails;
use crate::template::{output_file_name, AGENDA, MEETING_DATE, MEETING_DATE_UNDERLINED};
use crate::{MomError, Result};

/// What a fill pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Body paragraphs where the plain date was substituted
    pub body_dates: usize,
    /// Body paragraphs where the underlined date was substituted
    pub underlined_dates: usize,
    /// Header paragraphs where the plain date was substituted
    pub header_dates: usize,
    /// Number of agenda paragraphs inserted, `None` if the template has no
    /// agenda placeholder
    pub agenda_inserted: Option<usize>,
}

/// Apply date substitution and agenda insertion to an in-memory package
pub fn render(package: &mut DocxPackage, date: &str, agenda: &[String]) -> Result<FillReport> {
    let mut report = FillReport::default();

    let mut document = package.xml_part(DOCUMENT_PART)?.ok_or_else(|| {
        MomError::Template(format!("Not a Word document: missing {}", DOCUMENT_PART))
    })?;
    let body = document
        .root_mut()
        .and_then(|root| root.find_child_mut("body"))
        .ok_or_else(|| MomError::Template("Document has no body".to_string()))?;

    report.body_dates = replace_in_paragraphs(body, MEETING_DATE, date, Emphasis::None);
    report.underlined_dates =
        replace_in_paragraphs(body, MEETING_DATE_UNDERLINED, date, Emphasis::Underline);
    report.agenda_inserted = insert_agenda(body, agenda);

    package.set_xml_part(DOCUMENT_PART, &document)?;

    for name in package.header_part_names()? {
        let Some(mut header) = package.xml_part(&name)? else {
            continue;
        };
        let Some(root) = header.root_mut() else {
            continue;
        };

        let replaced = replace_in_paragraphs(root, MEETING_DATE, date, Emphasis::None);
        if replaced > 0 {
            debug!("Replaced {} date placeholder(s) in {}", replaced, name);
            report.header_dates += replaced;
            package.set_xml_part(&name, &header)?;
        }
    }

    Ok(report)
}

/// Replace `placeholder` in every direct child paragraph of `container`.
///
/// The paragraph is rebuilt as a single run carrying `emphasis`.
fn replace_in_paragraphs(
    container: &mut XmlElement,
    placeholder: &str,
    replacement: &str,
    emphasis: Emphasis,
) -> usize {
    let mut replaced = 0;

    for paragraph in container.child_elements_mut().filter(|el| is_paragraph(el)) {
        let text = paragraph_text(paragraph);
        if text.contains(placeholder) {
            set_paragraph_text(paragraph, &text.replace(placeholder, replacement), emphasis);
            replaced += 1;
        }
    }

    replaced
}

/// Swap the first agenda placeholder paragraph for one bold paragraph per item
fn insert_agenda(body: &mut XmlElement, agenda: &[String]) -> Option<usize> {
    let index = body.children.iter().position(|node| {
        node.as_element()
            .is_some_and(|el| is_paragraph(el) && paragraph_text(el).contains(AGENDA))
    })?;

    let prefix = body.children[index]
        .as_element()
        .and_then(|el| el.prefix().map(str::to_string));

    let items = agenda.iter().map(|item| {
        let mut paragraph = new_paragraph(prefix.as_deref());
        set_paragraph_text(&mut paragraph, item, Emphasis::Bold);
        XmlNode::Element(paragraph)
    });
    body.children.splice(index..=index, items);

    Some(agenda.len())
}

/// Fill the template at `template_path` and write the result to a fresh
/// temporary file in the system temp dir
pub fn fill(template_path: &Path, date: &str, agenda: &[String]) -> Result<PathBuf> {
    fill_in(template_path, &std::env::temp_dir(), date, agenda)
}

/// Same as [`fill`], writing into `output_dir`
pub fn fill_in(
    template_path: &Path,
    output_dir: &Path,
    date: &str,
    agenda: &[String],
) -> Result<PathBuf> {
    let mut package = DocxPackage::open(template_path)?;
    let report = render(&mut package, date, agenda)?;
    debug!("Template filled: {:?}", report);

    let mut file = tempfile::Builder::new()
        .prefix("mom-")
        .suffix(".docx")
        .tempfile_in(output_dir)?;
    file.write_all(&package.to_bytes()?)?;
    file.flush()?;

    let path = file.into_temp_path().keep().map_err(std::io::Error::from)?;
    Ok(path)
}

/// A generated document on disk, owned by one request
#[derive(Debug)]
pub struct GeneratedDocument {
    path: PathBuf,
    file_name: String,
}

impl GeneratedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name to offer the user ("MoM of the MBA Committee meeting dated ...")
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    /// Move the document to `dest`, falling back to copy across filesystems.
    /// The temporary file is removed whether or not the copy succeeds.
    pub fn persist(self, dest: &Path) -> Result<()> {
        if std::fs::rename(&self.path, dest).is_ok() {
            return Ok(());
        }

        let copied = std::fs::copy(&self.path, dest);
        self.cleanup();
        copied?;
        Ok(())
    }

    /// Delete the file. Failures are logged and swallowed.
    pub fn cleanup(self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

/// Fills one configured template, reloading it for every document
#[derive(Debug, Clone)]
pub struct TemplateFiller {
    template_path: PathBuf,
    output_dir: PathBuf,
}

impl TemplateFiller {
    pub fn new(template_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Generate a document for the given meeting
    pub fn fill(&self, details: &MeetingDetails) -> Result<GeneratedDocument> {
        let path = fill_in(
            &self.template_path,
            &self.output_dir,
            &details.meeting_date,
            &details.agenda_points,
        )?;
        info!(
            "Generated MoM for {} ({} agenda points)",
            details.meeting_date,
            details.agenda_points.len()
        );

        Ok(GeneratedDocument {
            path,
            file_name: output_file_name(&details.meeting_date),
        })
    }
}
