//! DOCX package I/O
//!
//! A `.docx` file is a zip archive of XML parts. The package keeps every
//! entry in archive order so that parts we never touch are written back
//! byte-for-byte.

use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::docx::xml::XmlDocument;
use crate::{MomError, Result};

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Relationships of the main document part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

const HEADER_REL_SUFFIX: &str = "/header";

/// One entry of the zip archive
#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// In-memory copy of a Word document package
#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<PackageEntry>,
}

impl DocxPackage {
    /// Load a package from disk
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            MomError::Template(format!("Cannot open template {}: {}", path.display(), e))
        })?;
        let package = Self::from_reader(file)?;
        debug!(
            "Loaded {} ({} parts)",
            path.display(),
            package.entries.len()
        );
        Ok(package)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(PackageEntry {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                is_dir: file.is_dir(),
            });
        }

        let package = Self { entries };
        if package.part(DOCUMENT_PART).is_none() {
            return Err(MomError::Template(format!(
                "Not a Word document: missing {}",
                DOCUMENT_PART
            )));
        }

        Ok(package)
    }

    /// Build a package from `(name, bytes)` pairs, all deflated
    pub fn from_parts<I, N>(parts: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<u8>)>,
        N: Into<String>,
    {
        let entries = parts
            .into_iter()
            .map(|(name, data)| PackageEntry {
                name: name.into(),
                data,
                compression: CompressionMethod::Deflated,
                is_dir: false,
            })
            .collect();
        Self { entries }
    }

    /// Names of all parts in archive order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.name.as_str())
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| !e.is_dir && e.name == name)
            .map(|e| e.data.as_slice())
    }

    /// Replace the bytes of an existing part, or append a new one
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.data = data,
            None => self.entries.push(PackageEntry {
                name: name.to_string(),
                data,
                compression: CompressionMethod::Deflated,
                is_dir: false,
            }),
        }
    }

    /// Parse a part as XML
    pub fn xml_part(&self, name: &str) -> Result<Option<XmlDocument>> {
        self.part(name).map(XmlDocument::parse).transpose()
    }

    pub fn set_xml_part(&mut self, name: &str, doc: &XmlDocument) -> Result<()> {
        let bytes = doc.to_bytes()?;
        self.set_part(name, bytes);
        Ok(())
    }

    /// Header parts referenced by the main document.
    ///
    /// Read from the document relationships; when those are missing, every
    /// `word/header*.xml` part is treated as a header.
    pub fn header_part_names(&self) -> Result<Vec<String>> {
        let Some(rels) = self.xml_part(DOCUMENT_RELS_PART)? else {
            return Ok(self
                .part_names()
                .filter(|name| name.starts_with("word/header") && name.ends_with(".xml"))
                .map(str::to_string)
                .collect());
        };

        let mut names = Vec::new();
        if let Some(root) = rels.root() {
            for rel in root.child_elements() {
                let is_header = rel
                    .attribute("Type")
                    .is_some_and(|t| t.ends_with(HEADER_REL_SUFFIX));
                if !is_header || rel.attribute("TargetMode") == Some("External") {
                    continue;
                }
                if let Some(target) = rel.attribute("Target") {
                    let name = resolve_target(target);
                    if self.part(&name).is_some() && !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
        Ok(names)
    }

    /// Serialize the package as a zip archive
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);

        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
            } else {
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(&entry.data)?;
            }
        }

        Ok(zip.finish()?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cursor = self.write_to(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Write the package to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(file)?;
        Ok(())
    }
}

/// Resolve a relationship target against the `word/` folder
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => {
            let mut parts: Vec<&str> = vec!["word"];
            for segment in target.split('/') {
                match segment {
                    "" | "." => {}
                    ".." => {
                        parts.pop();
                    }
                    other => parts.push(other),
                }
            }
            parts.join("/")
        }
    }
}
