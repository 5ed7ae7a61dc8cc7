//! Paragraph-level operations on WordprocessingML (`w:p`) elements

use crate::docx::xml::{XmlElement, XmlNode};

/// Run-level formatting applied to inserted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    None,
    Bold,
    Underline,
}

pub fn is_paragraph(element: &XmlElement) -> bool {
    element.local_name() == "p"
}

/// Visible text of a paragraph.
///
/// Text runs are concatenated; `w:tab` becomes `\t` and `w:br`/`w:cr`
/// become `\n`. Only runs directly in the paragraph or inside hyperlinks,
/// insertions, smart tags and simple fields are read. Drawings, text boxes
/// and paragraph properties contribute nothing.
pub fn paragraph_text(paragraph: &XmlElement) -> String {
    let mut text = String::new();
    collect_text(paragraph, &mut text);
    text
}

/// Elements between a paragraph and its runs
const RUN_CONTAINERS: [&str; 4] = ["hyperlink", "ins", "smartTag", "fldSimple"];

fn collect_text(element: &XmlElement, out: &mut String) {
    for child in element.child_elements() {
        match child.local_name() {
            "r" => collect_run_text(child, out),
            name if RUN_CONTAINERS.contains(&name) => collect_text(child, out),
            _ => {}
        }
    }
}

fn collect_run_text(run: &XmlElement, out: &mut String) {
    for child in run.child_elements() {
        match child.local_name() {
            "t" => {
                for node in &child.children {
                    if let XmlNode::Text(t) = node {
                        out.push_str(t);
                    }
                }
            }
            "tab" => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            _ => {}
        }
    }
}

/// Remove all content from a paragraph, keeping its paragraph properties
pub fn clear_paragraph(paragraph: &mut XmlElement) {
    paragraph.children.retain(|node| match node {
        XmlNode::Element(el) => el.local_name() == "pPr",
        _ => false,
    });
}

/// Create an empty paragraph in the given namespace prefix
pub fn new_paragraph(prefix: Option<&str>) -> XmlElement {
    XmlElement::new(qualify(prefix, "p"))
}

/// Append a run holding `text` with the requested emphasis
pub fn add_run(paragraph: &mut XmlElement, text: &str, emphasis: Emphasis) {
    let prefix = paragraph.prefix().map(str::to_string);
    let prefix = prefix.as_deref();

    let mut run = XmlElement::new(qualify(prefix, "r"));

    match emphasis {
        Emphasis::None => {}
        Emphasis::Bold => {
            run = run.with_child(XmlElement::new(qualify(prefix, "rPr")).with_child(
                XmlElement::new(qualify(prefix, "b")),
            ));
        }
        Emphasis::Underline => {
            run = run.with_child(
                XmlElement::new(qualify(prefix, "rPr")).with_child(
                    XmlElement::new(qualify(prefix, "u"))
                        .with_attribute(qualify(prefix, "val"), "single"),
                ),
            );
        }
    }

    let mut pending = String::new();
    for ch in text.chars() {
        match ch {
            '\t' | '\n' => {
                flush_text(&mut run, prefix, &mut pending);
                let local = if ch == '\t' { "tab" } else { "br" };
                run = run.with_child(XmlElement::new(qualify(prefix, local)));
            }
            _ => pending.push(ch),
        }
    }
    flush_text(&mut run, prefix, &mut pending);

    paragraph.children.push(XmlNode::Element(run));
}

/// Replace the whole paragraph content with `text` in a single run
pub fn set_paragraph_text(paragraph: &mut XmlElement, text: &str, emphasis: Emphasis) {
    clear_paragraph(paragraph);
    add_run(paragraph, text, emphasis);
}

/// Whether `run` carries the given emphasis
pub fn run_has_emphasis(run: &XmlElement, emphasis: Emphasis) -> bool {
    let props = run.find_child("rPr");
    match emphasis {
        Emphasis::None => props.map_or(true, |p| {
            p.find_child("b").is_none() && p.find_child("u").is_none()
        }),
        Emphasis::Bold => props.and_then(|p| p.find_child("b")).is_some(),
        Emphasis::Underline => props
            .and_then(|p| p.find_child("u"))
            .is_some_and(|u| u.attributes.iter().all(|(_, v)| v != "none")),
    }
}

fn flush_text(run: &mut XmlElement, prefix: Option<&str>, pending: &mut String) {
    if pending.is_empty() {
        return;
    }

    let mut t = XmlElement::new(qualify(prefix, "t"));
    if pending.starts_with(char::is_whitespace) || pending.ends_with(char::is_whitespace) {
        t = t.with_attribute("xml:space", "preserve");
    }
    t.children.push(XmlNode::Text(std::mem::take(pending)));
    run.children.push(XmlNode::Element(t));
}

fn qualify(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}
