use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use momgen::docx::paragraph::{is_paragraph, paragraph_text};
use momgen::docx::{DocxPackage, XmlDocument, XmlElement, DOCUMENT_PART};
use tempfile::TempDir;

#[allow(dead_code)]
pub const SAMPLE_EMAIL: &str = "\
Dear Members,

The next meeting of the MBA Committee is scheduled on Wednesday, November 01, 2023 at 11:00 AM in the Senate Hall.

Agenda:
1. Confirmation of the minutes of the previous meeting
2. Approval of the revised course structure
3. Any other matter with the permission of the chair

Regards,
Convener";

#[allow(dead_code)]
pub fn run_momgen(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

#[allow(dead_code)]
pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
    pub work: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
            work: tempfile::tempdir().expect("create temporary working dir"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_momgen"));
        cmd.args(args)
            .current_dir(self.work.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env("TMPDIR", self.work.path())
            .env_remove("MOMGEN_TEMPLATE")
            .env_remove("MOMGEN_BIND")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("failed to execute momgen binary")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn momgen binary");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_bytes())
            .expect("write email to stdin");

        child.wait_with_output().expect("wait for momgen binary")
    }

    pub fn work_path(&self, name: &str) -> PathBuf {
        self.work.path().join(name)
    }
}

/// Assert a command succeeded, dumping its output otherwise
#[allow(dead_code)]
pub fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} should succeed\nstdout:\n{}\nstderr:\n{}",
        what,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

/// Build a template whose body holds one paragraph per entry, and an
/// optional page header paragraph
#[allow(dead_code)]
pub fn write_template(path: &Path, body: &[&str], header: Option<&str>) {
    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    let mut document = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>"#, W_NS);
    for text in body {
        document.push_str(&format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text)
        ));
    }
    document.push_str("<w:sectPr/></w:body></w:document>");

    let mut parts = vec![(DOCUMENT_PART.to_string(), document.into_bytes())];
    if let Some(text) = header {
        let header = format!(
            r#"<w:hdr xmlns:w="{}"><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:hdr>"#,
            W_NS,
            escape(text)
        );
        parts.push(("word/header1.xml".to_string(), header.into_bytes()));
    }

    DocxPackage::from_parts(parts)
        .save(path)
        .expect("write test template");
}

#[allow(dead_code)]
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Top-level body paragraphs of a generated document
#[allow(dead_code)]
pub fn body_paragraphs(path: &Path) -> Vec<XmlElement> {
    let package = DocxPackage::open(path).expect("open generated document");
    let document = XmlDocument::parse(package.part(DOCUMENT_PART).expect("document part"))
        .expect("parse document part");

    document
        .root()
        .and_then(|root| root.find_child("body"))
        .expect("document body")
        .child_elements()
        .filter(|el| is_paragraph(el))
        .cloned()
        .collect()
}

/// Text of every paragraph in the header part
#[allow(dead_code)]
pub fn header_texts(path: &Path) -> Vec<String> {
    let package = DocxPackage::open(path).expect("open generated document");
    let header = XmlDocument::parse(package.part("word/header1.xml").expect("header part"))
        .expect("parse header part");

    header
        .root()
        .expect("header root")
        .child_elements()
        .filter(|el| is_paragraph(el))
        .map(paragraph_text)
        .collect()
}

#[allow(dead_code)]
pub fn texts(paragraphs: &[XmlElement]) -> Vec<String> {
    paragraphs.iter().map(paragraph_text).collect()
}
