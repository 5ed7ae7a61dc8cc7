//! Owned, mutable XML tree built on quick-xml events
//!
//! WordprocessingML parts are small enough to hold fully in memory, and the
//! template filler needs to move whole paragraphs around, so each part is
//! parsed into a tree and written back out after editing. Markup the tree
//! does not model (declarations, comments, processing instructions, CDATA)
//! is carried through verbatim.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::{MomError, Result};

/// A node in the XML tree
#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    /// Markup passed through untouched
    Other(Event<'static>),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// An element with its qualified name (e.g. `w:p`), attributes in document
/// order, and children
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Name without the namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Namespace prefix, if the name carries one
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Build a name in the same namespace prefix as this element
    pub fn sibling_name(&self, local: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    pub fn find_child(&self, local: &str) -> Option<&XmlElement> {
        self.child_elements().find(|el| el.local_name() == local)
    }

    pub fn find_child_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        self.child_elements_mut().find(|el| el.local_name() == local)
    }
}

/// A parsed XML part
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    /// Top-level nodes: the declaration, whitespace, and the root element
    pub nodes: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse raw part bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let decoder = reader.decoder();
        let mut buf = Vec::new();

        let mut doc = XmlDocument::default();
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf).map_err(xml_err)?;
            match event {
                Event::Start(ref e) => {
                    stack.push(element_from_start(e, decoder)?);
                }
                Event::Empty(ref e) => {
                    let element = element_from_start(e, decoder)?;
                    attach(&mut doc, &mut stack, XmlNode::Element(element));
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        MomError::Template("malformed XML: unexpected closing tag".to_string())
                    })?;
                    attach(&mut doc, &mut stack, XmlNode::Element(element));
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(xml_err)?.into_owned();
                    attach(&mut doc, &mut stack, XmlNode::Text(text));
                }
                Event::Eof => break,
                other => {
                    attach(&mut doc, &mut stack, XmlNode::Other(other.into_owned()));
                }
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(MomError::Template(format!(
                "malformed XML: <{}> is never closed",
                open.name
            )));
        }

        Ok(doc)
    }

    /// The first element at the top level
    pub fn root(&self) -> Option<&XmlElement> {
        self.nodes.iter().find_map(XmlNode::as_element)
    }

    pub fn root_mut(&mut self) -> Option<&mut XmlElement> {
        self.nodes.iter_mut().find_map(XmlNode::as_element_mut)
    }

    /// Serialize back to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            write_node(&mut writer, node)?;
        }
        Ok(writer.into_inner())
    }
}

fn xml_err<E: Into<quick_xml::Error>>(err: E) -> MomError {
    MomError::Xml(err.into())
}

fn element_from_start(
    start: &BytesStart<'_>,
    decoder: quick_xml::encoding::Decoder,
) -> Result<XmlElement> {
    let qname = start.name();
    let name = decoder.decode(qname.as_ref()).map_err(xml_err)?;
    let mut element = XmlElement::new(name.into_owned());

    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = decoder.decode(attr.key.as_ref()).map_err(xml_err)?;
        let value = attr.unescape_value().map_err(xml_err)?;
        element
            .attributes
            .push((key.into_owned(), value.into_owned()));
    }

    Ok(element)
}

fn attach(doc: &mut XmlDocument, stack: &mut [XmlElement], node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => doc.nodes.push(node),
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<()> {
    match node {
        XmlNode::Element(element) => {
            let mut start = BytesStart::new(element.name.as_str());
            for (key, value) in &element.attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if element.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for child in &element.children {
                    write_node(writer, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
            }
        }
        XmlNode::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        XmlNode::Other(event) => {
            writer.write_event(event.clone())?;
        }
    }
    Ok(())
}
